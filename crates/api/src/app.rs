use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use shared::jwt::TokenConfig;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, security_headers_middleware, trace_id};
use crate::routes::{
    alerts, auth, health, hives, inspections, measurements, notifications, sensors, settings,
    templates, users,
};
use crate::services::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub auth: AuthService,
}

pub fn create_app(config: Config, pool: PgPool, tokens: TokenConfig) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        auth: AuthService::new(pool.clone(), Arc::new(tokens)),
        pool,
        config: config.clone(),
    };

    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Auth service
    let auth_routes = Router::new()
        .route("/api/v1/auth/token", post(auth::login))
        .route("/api/v1/users", post(users::register))
        .route("/api/v1/users/me", get(users::me))
        .route(
            "/api/v1/users/:id",
            get(users::get_user).put(users::update_user),
        );

    // Hive service
    let hive_routes = Router::new()
        .route("/api/v1/hives", post(hives::create_hive).get(hives::list_hives))
        .route("/api/v1/hives/:id", get(hives::get_hive).put(hives::update_hive))
        .route(
            "/api/v1/hives/:id/inspections",
            get(inspections::list_hive_inspections),
        )
        .route("/api/v1/inspections", post(inspections::create_inspection));

    // Monitoring service
    let monitoring_routes = Router::new()
        .route("/api/v1/sensors", post(sensors::create_sensor))
        .route("/api/v1/hives/:id/sensors", get(sensors::list_hive_sensors))
        .route("/api/v1/sensors/:id/stats", get(sensors::sensor_stats))
        .route("/api/v1/measurements", post(measurements::create_measurement))
        .route(
            "/api/v1/sensors/:id/measurements",
            get(measurements::list_sensor_measurements),
        )
        .route(
            "/api/v1/alerts",
            post(alerts::create_alert).get(alerts::list_active_alerts),
        )
        .route("/api/v1/alerts/:id/resolve", put(alerts::resolve_alert));

    // Notification service
    let notification_routes = Router::new()
        .route(
            "/api/v1/templates",
            post(templates::create_template).get(templates::list_templates),
        )
        .route(
            "/api/v1/templates/by-name/:name",
            get(templates::get_template_by_name),
        )
        .route("/api/v1/settings", post(settings::create_settings))
        .route(
            "/api/v1/settings/me",
            get(settings::get_my_settings).put(settings::update_my_settings),
        )
        .route(
            "/api/v1/notifications",
            post(notifications::create_notification).get(notifications::list_my_notifications),
        )
        .route(
            "/api/v1/notifications/pending",
            get(notifications::list_pending),
        )
        .route(
            "/api/v1/notifications/:id/sent",
            put(notifications::mark_sent),
        );

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(hive_routes)
        .merge(monitoring_routes)
        .merge(notification_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
