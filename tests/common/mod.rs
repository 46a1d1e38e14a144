#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use coursegate::cli::create_developer;
use coursegate::coursegate_config::{CorsConfig, JwtConfig};
use coursegate::router::init_router;
use coursegate::state::AppState;

pub const TEST_PASSWORD: &str = "password123";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        token_ttl_secs: 7200,
    }
}

/// The full router over a fresh in-memory store.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::in_memory(
            test_jwt_config(),
            CorsConfig::from_origins("http://localhost:3000"),
        );
        Self {
            router: init_router(state.clone()),
            state,
        }
    }

    /// Sends a request and returns the status with the decoded JSON body
    /// (`Value::Null` for an empty body).
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    pub async fn register(&self, email: &str, role: Option<&str>) -> (StatusCode, Value) {
        let mut body = json!({
            "name": "Test User",
            "email": email,
            "password": TEST_PASSWORD,
        });
        if let Some(role) = role {
            body["role"] = json!(role);
        }
        self.request("POST", "/v1/api/auth/register", None, Some(body))
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            "POST",
            "/v1/api/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Registers an account with `role` and returns its session token.
    pub async fn token_for(&self, role: &str) -> String {
        let email = generate_unique_email();
        let (status, body) = self.register(&email, Some(role)).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["token"].as_str().unwrap().to_string()
    }

    /// Creates a developer the way an administrator would and logs in.
    pub async fn developer_token(&self) -> String {
        let email = generate_unique_email();
        create_developer(self.state.users.as_ref(), "Devon Developer", &email, TEST_PASSWORD)
            .await
            .unwrap();

        let (status, body) = self.login(&email, TEST_PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn create_course(&self, token: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", "/v1/api/courses", Some(token), Some(body))
            .await
    }
}

pub fn course_body(title: &str, audience: &[&str]) -> Value {
    json!({
        "title": title,
        "description": "A practical course for the whole team",
        "audience": audience,
        "modules": [{
            "title": "Getting Started",
            "topics": ["Basics"],
            "classes": [{ "title": "Welcome Class", "duration": 20 }]
        }]
    })
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn course_titles(list_body: &Value) -> Vec<String> {
    list_body["courses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap().to_string())
        .collect()
}
