use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A recommendation drops out of the catalogue once its score falls below this
pub const DELETE_THRESHOLD: i32 = -5;

/// Scores strictly above this count as "popular" for random picks
pub const POPULAR_SCORE: i32 = 10;

/// Share of random picks drawn from the popular bucket
pub const POPULAR_WEIGHT: f64 = 0.7;

/// Number of records returned by the list endpoint
pub const LIST_LIMIT: i64 = 10;

const YOUTUBE_HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
    "youtu.be",
];

/// A user-submitted video recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: i32,
    pub name: String,
    pub youtube_link: String,
    pub score: i32,
}

/// Body of `POST /recommendations`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewRecommendation {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(custom = "validate_youtube_link")]
    pub youtube_link: String,
}

impl NewRecommendation {
    pub fn new(name: impl Into<String>, youtube_link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            youtube_link: youtube_link.into(),
        }
    }
}

/// Accepts http(s) links pointing at a YouTube host
fn validate_youtube_link(link: &str) -> Result<(), ValidationError> {
    let parsed = url::Url::parse(link).map_err(|_| ValidationError::new("youtube_link"))?;

    let scheme_ok = matches!(parsed.scheme(), "http" | "https");
    let host_ok = parsed
        .host_str()
        .map(|host| YOUTUBE_HOSTS.contains(&host.to_ascii_lowercase().as_str()))
        .unwrap_or(false);

    if scheme_ok && host_ok {
        Ok(())
    } else {
        Err(ValidationError::new("youtube_link"))
    }
}

/// Score comparison used to pick a bucket of candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreFilter {
    /// `score > n`
    Gt(i32),
    /// `score <= n`
    Lte(i32),
}

impl ScoreFilter {
    pub fn matches(&self, score: i32) -> bool {
        match *self {
            ScoreFilter::Gt(n) => score > n,
            ScoreFilter::Lte(n) => score <= n,
        }
    }

    /// Bucket chosen for a uniform draw in `[0, 1)`
    pub fn for_draw(draw: f64) -> Self {
        if draw < POPULAR_WEIGHT {
            ScoreFilter::Gt(POPULAR_SCORE)
        } else {
            ScoreFilter::Lte(POPULAR_SCORE)
        }
    }
}

/// Result of a downvote that found its target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownvoteOutcome {
    /// Score was decremented and the record kept
    Updated(Recommendation),
    /// Score fell below the threshold and the record was deleted
    Removed(Recommendation),
}

impl DownvoteOutcome {
    pub fn recommendation(&self) -> &Recommendation {
        match self {
            DownvoteOutcome::Updated(r) | DownvoteOutcome::Removed(r) => r,
        }
    }
}
