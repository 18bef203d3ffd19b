//! In-memory repository used by handler and initializer tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use common::config::DriverKind;
use common::errors::{AppError, AppResult};
use common::models::{NewPet, Pet};
use tokio::sync::RwLock;

use super::PetRepository;

pub struct MemoryPetRepository {
    driver: DriverKind,
    pets: RwLock<Vec<Pet>>,
    online: AtomicBool,
}

impl MemoryPetRepository {
    pub fn new(driver: DriverKind) -> Self {
        Self {
            driver,
            pets: RwLock::new(Vec::new()),
            online: AtomicBool::new(true),
        }
    }

    /// Simulates losing the database.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    fn check(&self) -> AppResult<()> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::DatabaseConnection("connection refused".into()))
        }
    }
}

#[async_trait]
impl PetRepository for MemoryPetRepository {
    fn driver(&self) -> DriverKind {
        self.driver
    }

    async fn ensure_schema(&self) -> AppResult<()> {
        self.check()
    }

    async fn count(&self) -> AppResult<i64> {
        self.check()?;
        Ok(self.pets.read().await.len() as i64)
    }

    async fn insert(&self, pet: &NewPet) -> AppResult<()> {
        self.check()?;
        let mut pets = self.pets.write().await;
        let id = pets.len() as i32 + 1;
        pets.push(pet.clone().with_id(id));
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Pet>> {
        self.check()?;
        Ok(self.pets.read().await.clone())
    }

    async fn ping(&self) -> AppResult<()> {
        self.check()
    }
}
