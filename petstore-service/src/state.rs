//! Application state for the pet store service.

use std::sync::Arc;

use common::config::{AppConfig, ConfigSource};

use crate::repository::PetRepository;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    /// Which configuration source selected the database.
    pub database_source: ConfigSource,
    pub pets: Arc<dyn PetRepository>,
}

impl AppState {
    pub fn new(config: AppConfig, database_source: ConfigSource, pets: Arc<dyn PetRepository>) -> Self {
        Self {
            config,
            database_source,
            pets,
        }
    }
}
