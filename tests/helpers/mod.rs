#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use mealplanner::{
    AppState,
    config::{
        AiConfig, Config, DatabaseConfig, JwtConfig, ObservabilityConfig, ServerConfig,
    },
};
use mealplanner_ai::{ClientError, TextGenerator};
use serde_json::Value;
use temp_dir::TempDir;
use tower::ServiceExt;

pub const PASSWORD: &str = "my_password";

/// Answers every prompt with the same text, or fails like an unconfigured client
pub struct FakeGenerator {
    reply: Option<String>,
    pub calls: AtomicUsize,
}

#[async_trait::async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        self.reply.to_owned().ok_or(ClientError::NotConfigured)
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub generator: Arc<FakeGenerator>,
    _dir: TempDir,
}

fn config(url: String) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 3000,
            cors_origins: vec![],
        },
        database: DatabaseConfig {
            url,
            max_connections: 2,
        },
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_owned(),
            expiration_days: 7,
        },
        ai: AiConfig::default(),
        observability: ObservabilityConfig::default(),
        root: None,
    }
}

pub async fn setup() -> anyhow::Result<TestApp> {
    setup_with_reply(None).await
}

pub async fn setup_with_reply(reply: Option<&str>) -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let url = format!("sqlite:{}", dir.child("db.sqlite3").to_string_lossy());
    let pool = mealplanner::db::create_pool(&url, 2).await?;
    mealplanner_db::migrate(&pool).await?;

    let generator = Arc::new(FakeGenerator {
        reply: reply.map(ToOwned::to_owned),
        calls: AtomicUsize::new(0),
    });

    let state = AppState::new(config(url), pool, generator.clone());

    Ok(TestApp {
        router: mealplanner::router(state.clone()),
        state,
        generator,
        _dir: dir,
    })
}

impl TestApp {
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let body = body.map(|body| serde_json::to_vec(&body)).transpose()?;

        self.send_raw(method, uri, token, body).await
    }

    /// Sends `body` untouched as `application/json`
    pub async fn send_raw(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Vec<u8>>,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok((status, json))
    }

    /// Registers `name@mealplanner.localhost` and returns its token and id
    pub async fn register(&self, name: &str) -> anyhow::Result<(String, String)> {
        let (status, body) = self
            .send(
                "POST",
                "/api/auth/register",
                None,
                Some(serde_json::json!({
                    "name": name,
                    "email": format!("{name}@mealplanner.localhost"),
                    "password": PASSWORD,
                })),
            )
            .await?;

        anyhow::ensure!(status == StatusCode::CREATED, "register failed: {body}");

        Ok((
            body["data"]["token"].as_str().unwrap_or_default().to_owned(),
            body["data"]["user"]["id"].as_str().unwrap_or_default().to_owned(),
        ))
    }

    pub async fn register_admin(&self, name: &str) -> anyhow::Result<(String, String)> {
        let (token, id) = self.register(name).await?;
        self.state
            .user_command
            .set_role(&id, mealplanner_user::Role::Admin)
            .await?;

        Ok((token, id))
    }
}

pub fn recipe_body(title: &str, is_public: bool) -> Value {
    serde_json::json!({
        "title": title,
        "cuisine": "italian",
        "meal_type": "dinner",
        "servings": 2,
        "prep_time": 10,
        "cook_time": 20,
        "ingredients": [
            {"name": "pasta", "quantity": 200, "unit": "g"},
            {"name": "tomato", "quantity": 3, "unit": "pcs"}
        ],
        "instructions": ["Boil pasta", "Add sauce"],
        "is_public": is_public,
    })
}
