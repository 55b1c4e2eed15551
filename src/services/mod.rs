pub mod random;
pub mod recommendations;

pub use random::{RandomSource, ThreadRandom};
pub use recommendations::RecommendationService;
