//! Service configuration.
//!
//! Everything is read from the environment once at start-up. The database
//! connection is resolved separately by [`database::resolve`] and handed to
//! the pool constructor as a plain value.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8080` |
//! | `APP_VERSION` | `1.0.0` |
//! | `APP_COLOR` | `blue` |
//! | `INSTANCE_UUID` | random v4 UUID |
//! | `DB_MAX_CONNECTIONS` | `10` |
//! | `DB_CONNECT_TIMEOUT_SECS` | `5` |

pub mod bindings;
pub mod connection_string;
pub mod database;
pub mod env;

pub use database::{
    resolve, ConfigSource, ConnectionDescriptor, ConnectionParams, ConnectionTarget, DriverKind,
    FallbackPolicy, ResolverOptions, TlsMode,
};
pub use env::{EnvSource, ProcessEnv};

use uuid::Uuid;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_VERSION: &str = "1.0.0";
const DEFAULT_COLOR: &str = "blue";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Application settings shared by the HTTP layer and the pool constructor.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Name reported in health responses and logs.
    pub service_name: String,
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Deployed application version.
    pub app_version: String,
    /// Blue/green deployment color.
    pub deployment_color: String,
    /// Identifier of this running instance.
    pub instance_id: String,
    /// Upper bound on pooled database connections.
    pub max_connections: u32,
    /// Timeout for acquiring a pooled connection.
    pub connect_timeout_secs: u64,
}

impl AppConfig {
    /// Loads the configuration for `service_name` from the process environment.
    pub fn load_with_service(service_name: &str) -> Self {
        Self::from_env(&ProcessEnv, service_name)
    }

    /// Loads the configuration from an arbitrary environment source.
    pub fn from_env(env: &impl EnvSource, service_name: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
            host: env.var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(env, "PORT", DEFAULT_PORT),
            app_version: env
                .var("APP_VERSION")
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            deployment_color: env
                .var("APP_COLOR")
                .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            instance_id: env
                .var("INSTANCE_UUID")
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            max_connections: parse_or(env, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            connect_timeout_secs: parse_or(
                env,
                "DB_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            ),
        }
    }

    /// Returns the `host:port` bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(env: &impl EnvSource, key: &str, default: T) -> T {
    match env.var(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "无法解析配置项，使用默认值");
            default
        }),
        None => default,
    }
}
