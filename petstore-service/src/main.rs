//! 宠物商店服务
//!
//! 提供以下功能：
//! - 根据平台服务绑定、DATABASE_URL 或默认值选择 PostgreSQL / MySQL
//! - 启动时建表并写入示例数据
//! - 技术栈信息、宠物列表与健康检查接口

mod handlers;
mod initializer;
mod pool;
mod repository;
mod routes;
mod state;

use std::sync::Arc;

use anyhow::Context;
use axum::{middleware, routing::get, Json, Router};
use common::config::{resolve, AppConfig, ProcessEnv, ResolverOptions};
use common::middleware::request_id::request_id_middleware;
use pool::DatabasePool;
use repository::SqlPetRepository;
use state::AppState;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

const SERVICE_NAME: &str = "petstore-service";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "宠物商店 API",
        version = "0.1.0",
        description = "宠物商店演示服务"
    ),
    paths(
        handlers::get_infos,
        handlers::list_pets,
        handlers::health,
        handlers::health_check,
    ),
    components(schemas(
        common::models::Pet,
        common::models::TechStack,
        common::models::TechStackInfo,
        common::config::ConfigSource,
        handlers::HealthResponse,
    )),
    tags(
        (name = "info", description = "技术栈信息"),
        (name = "pets", description = "宠物端点"),
        (name = "health", description = "健康检查端点")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 文件可选，已存在的环境变量优先
    let dotenv_path = dotenvy::dotenv().ok();

    // 初始化日志追踪
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    if let Some(path) = dotenv_path {
        info!(path = %path.display(), "已加载 .env 文件");
    }

    // 加载配置
    let config = AppConfig::load_with_service(SERVICE_NAME);
    let descriptor = resolve(&ProcessEnv, &ResolverOptions::from_env(&ProcessEnv));

    // 连接数据库并初始化数据
    let pool = DatabasePool::connect(&descriptor, &config)
        .await
        .context("failed to connect to the database")?;
    let pets = Arc::new(SqlPetRepository::new(pool.clone()));
    initializer::initialize(pets.as_ref())
        .await
        .context("database initialization failed")?;

    let state = AppState::new(config.clone(), descriptor.source, pets);
    let app = create_router(state);

    // 启动服务
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        service = SERVICE_NAME,
        address = %addr,
        version = %config.app_version,
        color = %config.deployment_color,
        instance = %config.instance_id,
        database = descriptor.driver.display_name(),
        "启动服务"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("关闭数据库连接池");
    pool.close().await;
    Ok(())
}

fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("收到关闭信号，停止接受新请求");
}
