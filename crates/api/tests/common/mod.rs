//! Common test utilities for integration tests.
//!
//! Tests run against a real PostgreSQL database named by `TEST_DATABASE_URL`
//! and return early when it is not set. Every test registers its own users,
//! so tests never need to truncate tables.

#![allow(dead_code)]

use apiary_api::app::create_app;
use apiary_api::config::{
    AdminConfig, Config, DatabaseConfig, JwtAuthConfig, LoggingConfig, SecurityConfig,
    ServerConfig,
};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use fake::faker::internet::en::Username;
use fake::Fake;
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

fn database_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL").ok().filter(|u| !u.is_empty())
}

/// Connects and migrates the test database, or `None` to skip the test.
pub async fn test_pool() -> Option<PgPool> {
    let Some(url) = database_url() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

/// Test configuration with a fixed signing secret.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        },
        database: DatabaseConfig {
            url: database_url().unwrap_or_default(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 10,
            idle_timeout_secs: 600,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig::default(),
        jwt: JwtAuthConfig {
            secret: "integration_test_secret_0123456789abcdef".to_string(),
            access_token_expiry_secs: 1800,
            leeway_secs: 0,
        },
        admin: AdminConfig::default(),
    }
}

/// Create a test application router.
pub fn test_app(pool: PgPool) -> Router {
    let config = test_config();
    let tokens = config.jwt.token_config().expect("valid test jwt config");
    create_app(config, pool, tokens)
}

/// Registration data with a collision-free username and email.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl TestUser {
    pub fn new() -> Self {
        let base: String = Username().fake();
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let username = format!("{}_{}", base.replace('.', "_"), &suffix[..10]);
        Self {
            email: format!("{}@example.com", username),
            username,
            password: TEST_PASSWORD.to_string(),
        }
    }
}

impl Default for TestUser {
    fn default() -> Self {
        Self::new()
    }
}

/// A registered user holding a bearer token.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub id: i64,
    pub username: String,
    pub token: String,
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// A request with a verbatim body and an optional content type.
pub fn raw_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    content_type: Option<&str>,
    body: &str,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn login_request(username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username={}&password={}",
            username, password
        )))
        .unwrap()
}

/// Sends a request and returns the status and parsed JSON body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

/// Registers a fresh user through the API and logs them in.
pub async fn register_and_login(app: &Router) -> AuthedUser {
    let user = TestUser::new();

    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/v1/users",
            None,
            &serde_json::json!({
                "email": user.email,
                "username": user.username,
                "password": user.password,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {}", body);
    let id = body["id"].as_i64().expect("user id");

    let (status, body) = send(app, login_request(&user.username, &user.password)).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);

    AuthedUser {
        id,
        username: user.username,
        token: body["access_token"].as_str().unwrap().to_string(),
    }
}

/// Registers a user and grants the superuser flag directly in the database.
pub async fn register_superuser(app: &Router, pool: &PgPool) -> AuthedUser {
    let user = register_and_login(app).await;
    sqlx::query("UPDATE users SET is_superuser = TRUE WHERE id = $1")
        .bind(user.id)
        .execute(pool)
        .await
        .expect("Failed to grant superuser");
    user
}

/// Creates a hive owned by `user` and returns its id.
pub async fn create_hive(app: &Router, user: &AuthedUser, name: &str) -> i64 {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/v1/hives",
            Some(&user.token),
            &serde_json::json!({
                "name": name,
                "location": "South meadow",
                "queen_year": 2023,
                "frames_count": 10,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "hive creation failed: {}", body);
    body["id"].as_i64().unwrap()
}

/// Creates a sensor on a hive and returns its id.
pub async fn create_sensor(app: &Router, user: &AuthedUser, hive_id: i64) -> i64 {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/v1/sensors",
            Some(&user.token),
            &serde_json::json!({
                "name": "Brood temperature",
                "sensor_type": "temperature",
                "hive_id": hive_id,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "sensor creation failed: {}", body);
    body["id"].as_i64().unwrap()
}
