//! Tech stack info returned by `/api/infos`.

use serde::Serialize;
use utoipa::ToSchema;

/// Instance identity plus the technology stack it runs on.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TechStackInfo {
    /// Identifier of the running instance.
    pub uuid: String,
    /// Deployed application version.
    pub version: String,
    /// Blue/green deployment color.
    pub deployment_color: String,
    pub tech_stack: TechStack,
}

/// Framework, language and database in use.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TechStack {
    pub framework: String,
    pub version: String,
    pub language: String,
    pub language_version: String,
    pub runtime: String,
    /// Display name of the database, e.g. `PostgreSQL`.
    pub database: String,
}
