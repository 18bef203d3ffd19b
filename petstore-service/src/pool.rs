//! Database pool construction.
//!
//! Turns a resolved [`ConnectionDescriptor`] into sqlx connect options and
//! opens a pool for the selected driver.

use std::str::FromStr;
use std::time::Duration;

use common::config::connection_string::{is_key_value, KeyValueConnectionString};
use common::config::{AppConfig, ConnectionDescriptor, ConnectionTarget, DriverKind};
use common::errors::{AppError, AppResult};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions, MySqlSslMode};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::{MySqlPool, PgPool};

/// Connection pool for the resolved driver.
#[derive(Clone, Debug)]
pub enum DatabasePool {
    MySql(MySqlPool),
    Postgres(PgPool),
}

impl DatabasePool {
    /// Opens a pool for `descriptor` using the pool settings in `config`.
    pub async fn connect(descriptor: &ConnectionDescriptor, config: &AppConfig) -> AppResult<Self> {
        let timeout = Duration::from_secs(config.connect_timeout_secs);
        let max_connections = config.max_connections;

        match descriptor.driver {
            DriverKind::MySql => {
                let pool = MySqlPoolOptions::new()
                    .max_connections(max_connections)
                    .acquire_timeout(timeout)
                    .connect_with(mysql_options(descriptor)?)
                    .await
                    .map_err(|e| AppError::DatabaseConnection(e.to_string()))?;
                tracing::info!(max_connections, "MySQL connection pool created");
                Ok(DatabasePool::MySql(pool))
            }
            DriverKind::Postgres => {
                let pool = PgPoolOptions::new()
                    .max_connections(max_connections)
                    .acquire_timeout(timeout)
                    .connect_with(postgres_options(descriptor)?)
                    .await
                    .map_err(|e| AppError::DatabaseConnection(e.to_string()))?;
                tracing::info!(max_connections, "PostgreSQL connection pool created");
                Ok(DatabasePool::Postgres(pool))
            }
        }
    }

    pub fn driver(&self) -> DriverKind {
        match self {
            DatabasePool::MySql(_) => DriverKind::MySql,
            DatabasePool::Postgres(_) => DriverKind::Postgres,
        }
    }

    pub async fn close(&self) {
        match self {
            DatabasePool::MySql(pool) => pool.close().await,
            DatabasePool::Postgres(pool) => pool.close().await,
        }
    }
}

/// TLS setting carried by the connection target itself.
enum TargetTls<M> {
    /// Nothing specified; the descriptor decides.
    Unset,
    /// A URL query parameter already applied by sqlx's parser.
    FromUrl,
    /// An explicit mode from a key/value string.
    Mode(M),
}

/// Builds MySQL connect options from a descriptor.
pub fn mysql_options(descriptor: &ConnectionDescriptor) -> AppResult<MySqlConnectOptions> {
    let (options, target_tls) = match &descriptor.target {
        ConnectionTarget::Params(p) => (
            MySqlConnectOptions::new()
                .host(&p.host)
                .port(p.port)
                .database(&p.database)
                .username(&p.user)
                .password(&p.password),
            TargetTls::Unset,
        ),
        ConnectionTarget::ConnectionString(s) if is_key_value(s) => {
            let kv = KeyValueConnectionString::parse(s);
            let mut options = MySqlConnectOptions::new()
                .port(kv.port.unwrap_or(DriverKind::MySql.default_port()));
            if let Some(host) = &kv.host {
                options = options.host(host);
            }
            if let Some(database) = &kv.database {
                options = options.database(database);
            }
            if let Some(user) = &kv.user {
                options = options.username(user);
            }
            if let Some(password) = &kv.password {
                options = options.password(password);
            }
            let tls = match kv.effective_ssl_mode() {
                Some(mode) => TargetTls::Mode(mysql_ssl_mode(mode)),
                None => TargetTls::Unset,
            };
            (options, tls)
        }
        ConnectionTarget::ConnectionString(s) => {
            // The resolver strips `mysql://`; sqlx needs it back.
            let url = if s.contains("://") {
                s.clone()
            } else {
                format!("mysql://{s}")
            };
            let options = MySqlConnectOptions::from_str(&url)
                .map_err(|e| AppError::InvalidConnection(e.to_string()))?;
            (options, url_tls(s))
        }
    };

    let options = match (descriptor.tls.is_required(), target_tls) {
        (true, _) => options.ssl_mode(MySqlSslMode::Required),
        (false, TargetTls::Mode(mode)) => options.ssl_mode(mode),
        (false, TargetTls::FromUrl) => options,
        (false, TargetTls::Unset) => options.ssl_mode(MySqlSslMode::Disabled),
    };
    Ok(options)
}

/// Builds PostgreSQL connect options from a descriptor.
///
/// sqlx's `require` mode encrypts without verifying the server certificate,
/// which also covers the trust-server-certificate case.
pub fn postgres_options(descriptor: &ConnectionDescriptor) -> AppResult<PgConnectOptions> {
    let (options, target_tls) = match &descriptor.target {
        ConnectionTarget::Params(p) => (
            PgConnectOptions::new()
                .host(&p.host)
                .port(p.port)
                .database(&p.database)
                .username(&p.user)
                .password(&p.password),
            TargetTls::Unset,
        ),
        ConnectionTarget::ConnectionString(s) if is_key_value(s) => {
            let kv = KeyValueConnectionString::parse(s);
            let mut options = PgConnectOptions::new()
                .port(kv.port.unwrap_or(DriverKind::Postgres.default_port()));
            if let Some(host) = &kv.host {
                options = options.host(host);
            }
            if let Some(database) = &kv.database {
                options = options.database(database);
            }
            if let Some(user) = &kv.user {
                options = options.username(user);
            }
            if let Some(password) = &kv.password {
                options = options.password(password);
            }
            let tls = match kv.effective_ssl_mode() {
                Some(mode) => TargetTls::Mode(pg_ssl_mode(mode)),
                None => TargetTls::Unset,
            };
            (options, tls)
        }
        ConnectionTarget::ConnectionString(s) => {
            let options = PgConnectOptions::from_str(s)
                .map_err(|e| AppError::InvalidConnection(e.to_string()))?;
            (options, url_tls(s))
        }
    };

    let options = match (descriptor.tls.is_required(), target_tls) {
        (true, _) => options.ssl_mode(PgSslMode::Require),
        (false, TargetTls::Mode(mode)) => options.ssl_mode(mode),
        (false, TargetTls::FromUrl) => options,
        (false, TargetTls::Unset) => options.ssl_mode(PgSslMode::Disable),
    };
    Ok(options)
}

fn url_tls<M>(url: &str) -> TargetTls<M> {
    let lower = url.to_ascii_lowercase();
    if ["sslmode", "ssl-mode", "ssl_mode"].iter().any(|k| lower.contains(k)) {
        TargetTls::FromUrl
    } else {
        TargetTls::Unset
    }
}

fn mysql_ssl_mode(mode: &str) -> MySqlSslMode {
    match mode {
        "disable" | "disabled" | "none" => MySqlSslMode::Disabled,
        "prefer" | "preferred" => MySqlSslMode::Preferred,
        "verify-ca" | "verifyca" => MySqlSslMode::VerifyCa,
        "verify-full" | "verifyfull" | "verify-identity" => MySqlSslMode::VerifyIdentity,
        _ => MySqlSslMode::Required,
    }
}

fn pg_ssl_mode(mode: &str) -> PgSslMode {
    match mode {
        "disable" | "disabled" | "none" => PgSslMode::Disable,
        "allow" => PgSslMode::Allow,
        "prefer" | "preferred" => PgSslMode::Prefer,
        "verify-ca" | "verifyca" => PgSslMode::VerifyCa,
        "verify-full" | "verifyfull" => PgSslMode::VerifyFull,
        _ => PgSslMode::Require,
    }
}
