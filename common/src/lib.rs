//! Shared building blocks for the pet store services.
//!
//! - [`config`]: application settings and database connection resolution
//! - [`errors`]: the service-wide error type
//! - [`models`]: pet and tech-stack models
//! - [`response`]: the JSON error envelope
//! - [`middleware`]: request id propagation

pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod response;
