//! Handler模块

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use common::config::ConfigSource;
use common::errors::AppError;
use common::models::{Pet, TechStack, TechStackInfo};
use crate::state::AppState;

const FRAMEWORK: &str = "Rust + Axum";
const FRAMEWORK_VERSION: &str = "0.8";
const LANGUAGE: &str = "Rust";
const LANGUAGE_VERSION: &str = "2021 edition";
const RUNTIME: &str = "Tokio";

/// 获取技术栈信息
#[utoipa::path(
    get,
    path = "/api/infos",
    tag = "info",
    responses(
        (status = 200, description = "实例与技术栈信息", body = TechStackInfo)
    )
)]
pub async fn get_infos(State(state): State<AppState>) -> Json<TechStackInfo> {
    Json(TechStackInfo {
        uuid: state.config.instance_id.clone(),
        version: state.config.app_version.clone(),
        deployment_color: state.config.deployment_color.clone(),
        tech_stack: TechStack {
            framework: FRAMEWORK.to_string(),
            version: FRAMEWORK_VERSION.to_string(),
            language: LANGUAGE.to_string(),
            language_version: LANGUAGE_VERSION.to_string(),
            runtime: RUNTIME.to_string(),
            database: state.pets.driver().display_name().to_string(),
        },
    })
}

/// 列出所有宠物
#[utoipa::path(
    get,
    path = "/api/pets",
    tag = "pets",
    responses(
        (status = 200, description = "按 id 排序的宠物列表", body = Vec<Pet>),
        (status = 500, description = "查询失败")
    )
)]
pub async fn list_pets(State(state): State<AppState>) -> Result<Json<Vec<Pet>>, AppError> {
    // 任何仓储错误都按 500 返回
    let pets = state
        .pets
        .list()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(pets))
}

/// 纯文本健康检查
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "数据库可用", body = String),
        (status = 503, description = "数据库不可用", body = String)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.pets.ping().await {
        Ok(()) => (StatusCode::OK, "Healthy"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "Unhealthy")
        }
    }
}

/// 健康检查端点
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "服务运行正常", body = HealthResponse),
        (status = 503, description = "数据库不可用", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, label) = match state.pets.ping().await {
        Ok(()) => (StatusCode::OK, "healthy"),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "unhealthy"),
    };
    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            service: state.config.service_name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            database: state.pets.driver().display_name().to_string(),
            source: state.database_source,
        }),
    )
}

/// 健康检查响应
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// 服务状态
    pub status: String,
    /// 服务名称
    pub service: String,
    /// 服务版本
    pub version: String,
    /// 当前时间戳
    pub timestamp: DateTime<Utc>,
    /// 数据库类型
    pub database: String,
    /// 数据库配置来源
    pub source: ConfigSource,
}
