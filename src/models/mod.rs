pub mod recommendation;

pub use recommendation::{
    DownvoteOutcome, NewRecommendation, Recommendation, ScoreFilter, DELETE_THRESHOLD,
    LIST_LIMIT, POPULAR_SCORE, POPULAR_WEIGHT,
};
