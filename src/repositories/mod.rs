//! Recommendation persistence
//!
//! The service layer talks to storage only through [`RecommendationRepository`], so the
//! Postgres store and the in-memory store are interchangeable, and unit tests can swap in
//! a mock.

use crate::{
    error::AppResult,
    models::{DownvoteOutcome, NewRecommendation, Recommendation, ScoreFilter},
};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryRecommendationRepository;
pub use postgres::PgRecommendationRepository;

/// Data access for recommendations
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationRepository: Send + Sync {
    /// Stores a new recommendation with score 0
    ///
    /// Returns `AppError::Conflict` when the name is already taken.
    async fn create(&self, new: NewRecommendation) -> AppResult<Recommendation>;

    /// Looks up a recommendation by id
    async fn find(&self, id: i32) -> AppResult<Option<Recommendation>>;

    /// Returns every recommendation, or only those matching `filter`
    async fn find_all(&self, filter: Option<ScoreFilter>) -> AppResult<Vec<Recommendation>>;

    /// Most recently created recommendations first
    async fn find_latest(&self, limit: i64) -> AppResult<Vec<Recommendation>>;

    /// Highest scores first
    async fn find_top(&self, amount: i64) -> AppResult<Vec<Recommendation>>;

    async fn count(&self) -> AppResult<i64>;

    /// Increments the score, returning the updated record or `None` for an unknown id
    async fn upvote(&self, id: i32) -> AppResult<Option<Recommendation>>;

    /// Decrements the score and deletes the record if it drops below `threshold`
    ///
    /// Both steps happen as one unit against the store. Returns `None` for an unknown id.
    async fn downvote(&self, id: i32, threshold: i32) -> AppResult<Option<DownvoteOutcome>>;

    /// Removes every recommendation
    async fn truncate(&self) -> AppResult<()>;
}
