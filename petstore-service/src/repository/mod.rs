//! Pet storage.

#[cfg(test)]
pub mod memory;
mod sql;

pub use sql::SqlPetRepository;

use async_trait::async_trait;
use common::config::DriverKind;
use common::errors::AppResult;
use common::models::{NewPet, Pet};

/// Access to the `pets` table.
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Database backing this repository.
    fn driver(&self) -> DriverKind;

    /// Creates the `pets` table if it does not exist.
    async fn ensure_schema(&self) -> AppResult<()>;

    /// Number of stored pets.
    async fn count(&self) -> AppResult<i64>;

    /// Stores a new pet.
    async fn insert(&self, pet: &NewPet) -> AppResult<()>;

    /// All pets ordered by id.
    async fn list(&self) -> AppResult<Vec<Pet>>;

    /// Round-trips a trivial query to check connectivity.
    async fn ping(&self) -> AppResult<()>;
}
