//! 路由模块

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// 创建宠物商店路由
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/infos", get(handlers::get_infos))
        .route("/api/pets", get(handlers::list_pets))
        .route("/api/health", get(handlers::health_check))
        .route("/health", get(handlers::health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use axum::{
        body::{Body, Bytes},
        http::{Request, StatusCode},
    };
    use common::config::{AppConfig, ConfigSource, DriverKind};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::initializer;
    use crate::repository::memory::MemoryPetRepository;

    fn config() -> AppConfig {
        let env = HashMap::from([
            ("INSTANCE_UUID", "instance-1"),
            ("APP_VERSION", "2.0.0"),
            ("APP_COLOR", "green"),
        ]);
        AppConfig::from_env(&env, "petstore-service")
    }

    async fn app(driver: DriverKind) -> (Router, Arc<MemoryPetRepository>) {
        let repo = Arc::new(MemoryPetRepository::new(driver));
        initializer::initialize(repo.as_ref()).await.unwrap();
        let state = AppState::new(config(), ConfigSource::Defaults, repo.clone());
        (router().with_state(state), repo)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Bytes) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        (status, body)
    }

    #[tokio::test]
    async fn test_infos() {
        let (app, _) = app(DriverKind::MySql).await;
        let (status, body) = get(app, "/api/infos").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["uuid"], "instance-1");
        assert_eq!(json["version"], "2.0.0");
        assert_eq!(json["deploymentColor"], "green");
        assert_eq!(json["techStack"]["language"], "Rust");
        assert_eq!(json["techStack"]["database"], "MySQL");
        assert!(json["techStack"].get("languageVersion").is_some());
    }

    #[tokio::test]
    async fn test_list_pets() {
        let (app, _) = app(DriverKind::Postgres).await;
        let (status, body) = get(app, "/api/pets").await;
        assert_eq!(status, StatusCode::OK);
        let pets: Vec<Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(pets.len(), 8);
        assert_eq!(pets[0]["id"], 1);
        assert_eq!(pets[0]["name"], "Max");
        assert_eq!(pets[7]["race"], "Cockatiel");
    }

    #[tokio::test]
    async fn test_list_pets_failure_uses_error_envelope() {
        let (app, repo) = app(DriverKind::Postgres).await;
        repo.set_online(false);
        let (status, body) = get(app, "/api/pets").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn test_plain_health() {
        let (app, repo) = app(DriverKind::Postgres).await;
        let (status, body) = get(app.clone(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"Healthy");

        repo.set_online(false);
        let (status, body) = get(app, "/health").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(&body[..], b"Unhealthy");
    }

    #[tokio::test]
    async fn test_json_health() {
        let (app, repo) = app(DriverKind::Postgres).await;
        let (status, body) = get(app.clone(), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "petstore-service");
        assert_eq!(json["database"], "PostgreSQL");
        assert_eq!(json["source"], "defaults");

        repo.set_online(false);
        let (status, _) = get(app, "/api/health").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (app, _) = app(DriverKind::Postgres).await;
        let (status, _) = get(app, "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
