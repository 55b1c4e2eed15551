use sqlx::PgPool;

use crate::{
    error::{AppError, AppResult},
    models::{DownvoteOutcome, NewRecommendation, Recommendation, ScoreFilter},
    repositories::RecommendationRepository,
};

/// Recommendation store backed by the `recommendations` table
#[derive(Clone)]
pub struct PgRecommendationRepository {
    pool: PgPool,
}

impl PgRecommendationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl RecommendationRepository for PgRecommendationRepository {
    async fn create(&self, new: NewRecommendation) -> AppResult<Recommendation> {
        sqlx::query_as::<_, Recommendation>(
            r#"
            INSERT INTO recommendations (name, youtube_link)
            VALUES ($1, $2)
            RETURNING id, name, youtube_link, score
            "#,
        )
        .bind(&new.name)
        .bind(&new.youtube_link)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_insert)
    }

    async fn find(&self, id: i32) -> AppResult<Option<Recommendation>> {
        let row = sqlx::query_as::<_, Recommendation>(
            r#"
            SELECT id, name, youtube_link, score
            FROM recommendations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self, filter: Option<ScoreFilter>) -> AppResult<Vec<Recommendation>> {
        let rows = match filter {
            None => {
                sqlx::query_as::<_, Recommendation>(
                    "SELECT id, name, youtube_link, score FROM recommendations ORDER BY id",
                )
                .fetch_all(&self.pool)
                .await?
            }
            Some(ScoreFilter::Gt(score)) => {
                sqlx::query_as::<_, Recommendation>(
                    r#"
                    SELECT id, name, youtube_link, score
                    FROM recommendations
                    WHERE score > $1
                    ORDER BY id
                    "#,
                )
                .bind(score)
                .fetch_all(&self.pool)
                .await?
            }
            Some(ScoreFilter::Lte(score)) => {
                sqlx::query_as::<_, Recommendation>(
                    r#"
                    SELECT id, name, youtube_link, score
                    FROM recommendations
                    WHERE score <= $1
                    ORDER BY id
                    "#,
                )
                .bind(score)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }

    async fn find_latest(&self, limit: i64) -> AppResult<Vec<Recommendation>> {
        let rows = sqlx::query_as::<_, Recommendation>(
            r#"
            SELECT id, name, youtube_link, score
            FROM recommendations
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_top(&self, amount: i64) -> AppResult<Vec<Recommendation>> {
        let rows = sqlx::query_as::<_, Recommendation>(
            r#"
            SELECT id, name, youtube_link, score
            FROM recommendations
            ORDER BY score DESC, id ASC
            LIMIT $1
            "#,
        )
        .bind(amount)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recommendations")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn upvote(&self, id: i32) -> AppResult<Option<Recommendation>> {
        let row = sqlx::query_as::<_, Recommendation>(
            r#"
            UPDATE recommendations
            SET score = score + 1
            WHERE id = $1
            RETURNING id, name, youtube_link, score
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn downvote(&self, id: i32, threshold: i32) -> AppResult<Option<DownvoteOutcome>> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Recommendation>(
            r#"
            UPDATE recommendations
            SET score = score - 1
            WHERE id = $1
            RETURNING id, name, youtube_link, score
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(recommendation) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        // The row stays locked by the UPDATE until commit, so no concurrent vote
        // can land between the decrement and the delete.
        let outcome = if recommendation.score < threshold {
            sqlx::query("DELETE FROM recommendations WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            DownvoteOutcome::Removed(recommendation)
        } else {
            DownvoteOutcome::Updated(recommendation)
        };

        tx.commit().await?;

        Ok(Some(outcome))
    }

    async fn truncate(&self) -> AppResult<()> {
        sqlx::query("TRUNCATE TABLE recommendations RESTART IDENTITY CASCADE")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
