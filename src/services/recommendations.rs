use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{
        DownvoteOutcome, NewRecommendation, Recommendation, ScoreFilter, DELETE_THRESHOLD,
        LIST_LIMIT,
    },
    repositories::RecommendationRepository,
    services::random::{RandomSource, ThreadRandom},
};

/// Business rules for recommendations
///
/// Uniqueness of names and the atomic downvote-and-prune step are delegated to the
/// repository, which enforces both at the store level.
#[derive(Clone)]
pub struct RecommendationService {
    repository: Arc<dyn RecommendationRepository>,
    random: Arc<dyn RandomSource>,
}

impl RecommendationService {
    pub fn new(repository: Arc<dyn RecommendationRepository>) -> Self {
        Self::with_random(repository, Arc::new(ThreadRandom))
    }

    pub fn with_random(
        repository: Arc<dyn RecommendationRepository>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self { repository, random }
    }

    /// Creates a recommendation with score 0
    pub async fn insert(&self, new: NewRecommendation) -> AppResult<Recommendation> {
        match self.repository.create(new).await {
            Ok(created) => {
                tracing::info!(id = created.id, name = %created.name, "Recommendation created");
                Ok(created)
            }
            Err(e @ AppError::Conflict(_)) => {
                tracing::warn!("Rejected recommendation with duplicate name");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn upvote(&self, id: i32) -> AppResult<Recommendation> {
        let updated = self
            .repository
            .upvote(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!(id, score = updated.score, "Recommendation upvoted");
        Ok(updated)
    }

    /// Decrements the score, deleting the recommendation once it falls below the threshold
    pub async fn downvote(&self, id: i32) -> AppResult<DownvoteOutcome> {
        let outcome = self
            .repository
            .downvote(id, DELETE_THRESHOLD)
            .await?
            .ok_or_else(|| not_found(id))?;

        match &outcome {
            DownvoteOutcome::Updated(r) => {
                tracing::info!(id, score = r.score, "Recommendation downvoted");
            }
            DownvoteOutcome::Removed(r) => {
                tracing::info!(id, score = r.score, "Recommendation removed after downvote");
            }
        }

        Ok(outcome)
    }

    /// Every recommendation in store order
    pub async fn get(&self) -> AppResult<Vec<Recommendation>> {
        self.repository.find_all(None).await
    }

    /// The most recently created recommendations, newest first
    pub async fn get_latest(&self) -> AppResult<Vec<Recommendation>> {
        self.repository.find_latest(LIST_LIMIT).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Recommendation> {
        self.repository.find(id).await?.ok_or_else(|| not_found(id))
    }

    /// Picks a random recommendation, favoring popular ones
    ///
    /// A first draw selects the bucket (score above 10 with weight 0.7, the rest
    /// otherwise); a second draw picks uniformly within it.
    pub async fn get_random(&self) -> AppResult<Recommendation> {
        let filter = ScoreFilter::for_draw(self.random.draw());
        let mut candidates = self.repository.find_all(Some(filter)).await?;

        tracing::debug!(?filter, candidates = candidates.len(), "Random pick bucket");

        if candidates.is_empty() {
            tracing::warn!(?filter, "No recommendations in random bucket");
            return Err(AppError::NotFound(
                "No recommendations available".to_string(),
            ));
        }

        let index = self.random.pick(candidates.len());
        if index >= candidates.len() {
            return Err(AppError::Internal(format!(
                "random index {} out of bounds for {} candidates",
                index,
                candidates.len()
            )));
        }

        Ok(candidates.swap_remove(index))
    }

    /// The `amount` highest-scored recommendations, best first
    pub async fn get_top(&self, amount: u32) -> AppResult<Vec<Recommendation>> {
        self.repository.find_top(i64::from(amount)).await
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.repository.count().await
    }

    /// Deletes every recommendation
    pub async fn reset(&self) -> AppResult<()> {
        self.repository.truncate().await?;
        tracing::warn!("All recommendations deleted");
        Ok(())
    }
}

fn not_found(id: i32) -> AppError {
    tracing::warn!(id, "Recommendation not found");
    AppError::NotFound(format!("Recommendation {} not found", id))
}
