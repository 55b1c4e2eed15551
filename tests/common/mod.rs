#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum_test::TestServer;
use fake::{faker::name::en::Name, Fake};
use serde_json::{json, Value};

use recommendations_api::{
    create_router,
    models::{NewRecommendation, Recommendation},
    repositories::{InMemoryRecommendationRepository, RecommendationRepository},
    services::{RandomSource, RecommendationService},
    AppState, RouterOptions,
};

pub const YOUTUBE_LINK: &str = "https://www.youtube.com/watch?v=PNNJksqrz-U";

static SEQUENCE: AtomicUsize = AtomicUsize::new(0);

/// Random source returning a fixed draw and always the first candidate
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn draw(&self) -> f64 {
        self.0
    }

    fn pick(&self, _len: usize) -> usize {
        0
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub repository: Arc<InMemoryRecommendationRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(None, RouterOptions::default())
    }

    pub fn with_draw(draw: f64) -> Self {
        Self::build(Some(draw), RouterOptions::default())
    }

    pub fn with_test_routes() -> Self {
        Self::build(
            None,
            RouterOptions {
                enable_test_routes: true,
            },
        )
    }

    fn build(draw: Option<f64>, options: RouterOptions) -> Self {
        let repository = Arc::new(InMemoryRecommendationRepository::new());
        let repo: Arc<dyn RecommendationRepository> = repository.clone();

        let service = match draw {
            Some(draw) => RecommendationService::with_random(repo, Arc::new(FixedRandom(draw))),
            None => RecommendationService::new(repo),
        };

        let app = create_router(AppState::new(service), options);
        let server = TestServer::new(app).unwrap();

        Self { server, repository }
    }

    /// Inserts a recommendation directly into the store
    pub async fn create_recommendation(&self) -> Recommendation {
        let body = generate_recommendation();
        self.repository
            .create(NewRecommendation::new(
                body["name"].as_str().unwrap(),
                body["youtubeLink"].as_str().unwrap(),
            ))
            .await
            .unwrap()
    }

    /// Inserts a recommendation and upvotes it to `score`
    pub async fn create_with_score(&self, score: i32) -> Recommendation {
        let created = self.create_recommendation().await;
        let mut current = created;
        for _ in 0..score {
            current = self.repository.upvote(current.id).await.unwrap().unwrap();
        }
        current
    }

    pub async fn find(&self, id: i32) -> Option<Recommendation> {
        self.repository.find(id).await.unwrap()
    }

    pub async fn all(&self) -> Vec<Recommendation> {
        self.repository.find_all(None).await.unwrap()
    }

    pub async fn count(&self) -> i64 {
        self.repository.count().await.unwrap()
    }
}

/// A valid creation body with a unique name
pub fn generate_recommendation() -> Value {
    let name: String = Name().fake();
    let n = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    json!({
        "name": format!("{} {}", name, n),
        "youtubeLink": YOUTUBE_LINK,
    })
}

/// A creation body whose name has the wrong type
pub fn generate_wrong_recommendation() -> Value {
    json!({
        "name": 123,
        "youtubeLink": "string",
    })
}
