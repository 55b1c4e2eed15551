use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{DownvoteOutcome, NewRecommendation, Recommendation, ScoreFilter},
    repositories::RecommendationRepository,
};

/// In-process recommendation store
///
/// Mirrors the Postgres schema: serial ids, unique names, score defaulting to 0.
/// Every mutation runs under a single write lock, which gives the same all-or-nothing
/// behavior the table's constraints and transactions give.
#[derive(Default)]
pub struct InMemoryRecommendationRepository {
    inner: RwLock<Store>,
}

struct Store {
    next_id: i32,
    records: BTreeMap<i32, Recommendation>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: BTreeMap::new(),
        }
    }
}

impl InMemoryRecommendationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn limit_to_usize(limit: i64) -> usize {
    usize::try_from(limit.max(0)).unwrap_or(usize::MAX)
}

#[async_trait::async_trait]
impl RecommendationRepository for InMemoryRecommendationRepository {
    async fn create(&self, new: NewRecommendation) -> AppResult<Recommendation> {
        let mut store = self.inner.write().await;

        if store.records.values().any(|r| r.name == new.name) {
            return Err(AppError::duplicate_name());
        }

        let id = store.next_id;
        store.next_id += 1;

        let recommendation = Recommendation {
            id,
            name: new.name,
            youtube_link: new.youtube_link,
            score: 0,
        };
        store.records.insert(id, recommendation.clone());

        Ok(recommendation)
    }

    async fn find(&self, id: i32) -> AppResult<Option<Recommendation>> {
        let store = self.inner.read().await;
        Ok(store.records.get(&id).cloned())
    }

    async fn find_all(&self, filter: Option<ScoreFilter>) -> AppResult<Vec<Recommendation>> {
        let store = self.inner.read().await;
        let rows = store
            .records
            .values()
            .filter(|r| filter.map_or(true, |f| f.matches(r.score)))
            .cloned()
            .collect();
        Ok(rows)
    }

    async fn find_latest(&self, limit: i64) -> AppResult<Vec<Recommendation>> {
        let store = self.inner.read().await;
        let rows = store
            .records
            .values()
            .rev()
            .take(limit_to_usize(limit))
            .cloned()
            .collect();
        Ok(rows)
    }

    async fn find_top(&self, amount: i64) -> AppResult<Vec<Recommendation>> {
        let store = self.inner.read().await;
        let mut rows: Vec<Recommendation> = store.records.values().cloned().collect();
        // Stable sort keeps id order among equal scores.
        rows.sort_by(|a, b| b.score.cmp(&a.score));
        rows.truncate(limit_to_usize(amount));
        Ok(rows)
    }

    async fn count(&self) -> AppResult<i64> {
        let store = self.inner.read().await;
        Ok(store.records.len() as i64)
    }

    async fn upvote(&self, id: i32) -> AppResult<Option<Recommendation>> {
        let mut store = self.inner.write().await;
        Ok(store.records.get_mut(&id).map(|r| {
            r.score += 1;
            r.clone()
        }))
    }

    async fn downvote(&self, id: i32, threshold: i32) -> AppResult<Option<DownvoteOutcome>> {
        let mut store = self.inner.write().await;

        let Some(record) = store.records.get_mut(&id) else {
            return Ok(None);
        };
        record.score -= 1;

        if record.score < threshold {
            let removed = store.records.remove(&id).ok_or_else(|| {
                AppError::Internal(format!("recommendation {} vanished during downvote", id))
            })?;
            Ok(Some(DownvoteOutcome::Removed(removed)))
        } else {
            Ok(Some(DownvoteOutcome::Updated(record.clone())))
        }
    }

    async fn truncate(&self) -> AppResult<()> {
        let mut store = self.inner.write().await;
        *store = Store::default();
        Ok(())
    }
}
