//! Platform service bindings.
//!
//! Platform-as-a-service environments inject a JSON document describing the
//! backing services bound to the application:
//!
//! ```json
//! { "mysql": [ { "name": "db", "credentials": { "host": "...", "port": 3306 } } ] }
//! ```
//!
//! Field names inside `credentials` differ between brokers, so every field is
//! looked up through an ordered list of candidate keys.

use serde_json::{Map, Value};
use thiserror::Error;

/// Candidate keys for the database host.
pub const HOST_KEYS: &[&str] = &["host", "hostname"];
/// Candidate keys for the port.
pub const PORT_KEYS: &[&str] = &["port"];
/// Candidate keys for the database name.
pub const DATABASE_KEYS: &[&str] = &["database", "name"];
/// Candidate keys for the login user.
pub const USER_KEYS: &[&str] = &["username", "user"];
/// Candidate keys for the password.
pub const PASSWORD_KEYS: &[&str] = &["password"];
/// Candidate keys for the TLS hint.
pub const SSL_KEYS: &[&str] = &["ssl"];

/// Why a binding document could not be used.
#[derive(Debug, Error)]
pub enum BindingsError {
    #[error("invalid service binding JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("service binding document is not a JSON object")]
    NotAnObject,
}

/// Credentials of one bound service instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceCredentials {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub ssl: Option<bool>,
}

impl ServiceCredentials {
    /// Extracts credentials from a `credentials` object.
    pub fn from_object(creds: &Map<String, Value>) -> Self {
        Self {
            host: lookup_string(creds, HOST_KEYS),
            port: lookup_port(creds, PORT_KEYS),
            database: lookup_string(creds, DATABASE_KEYS),
            user: lookup_string(creds, USER_KEYS),
            password: lookup_string(creds, PASSWORD_KEYS),
            ssl: lookup(creds, SSL_KEYS).and_then(as_bool),
        }
    }
}

/// Parsed service binding document.
#[derive(Debug, Clone)]
pub struct ServiceBindings {
    services: Map<String, Value>,
}

impl ServiceBindings {
    /// Parses a binding document.
    pub fn parse(raw: &str) -> Result<Self, BindingsError> {
        match serde_json::from_str::<Value>(raw)? {
            Value::Object(services) => Ok(Self { services }),
            _ => Err(BindingsError::NotAnObject),
        }
    }

    /// Returns the credentials of the first instance bound under `service`.
    ///
    /// Missing, non-array and empty entries all yield `None`.
    pub fn first_credentials(&self, service: &str) -> Option<ServiceCredentials> {
        let first = self.services.get(service)?.as_array()?.first()?;
        let creds = match first.get("credentials") {
            Some(Value::Object(creds)) => ServiceCredentials::from_object(creds),
            _ => ServiceCredentials::default(),
        };
        Some(creds)
    }
}

fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

fn lookup_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match obj.get(*k)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lookup_port(obj: &Map<String, Value>, keys: &[&str]) -> Option<u16> {
    keys.iter().find_map(|k| match obj.get(*k)? {
        Value::Number(n) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Value::Object(_) => Some(true),
        _ => None,
    }
}
