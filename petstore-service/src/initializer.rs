//! Schema creation and sample data seeding.

use common::errors::AppResult;
use common::models::sample_pets;

use crate::repository::PetRepository;

/// Ensures the `pets` table exists and seeds it when empty.
///
/// Returns the number of pets inserted; existing data is never touched.
pub async fn initialize(repo: &dyn PetRepository) -> AppResult<usize> {
    tracing::info!(database = repo.driver().display_name(), "初始化数据库");

    repo.ensure_schema().await?;

    let count = repo.count().await?;
    if count > 0 {
        tracing::info!(count, "Database already contains pets, skipping seed");
        return Ok(0);
    }

    let pets = sample_pets();
    for pet in &pets {
        repo.insert(pet).await?;
    }
    tracing::info!(inserted = pets.len(), "Sample pets inserted");
    Ok(pets.len())
}
