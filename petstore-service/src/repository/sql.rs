//! sqlx-backed pet repository for MySQL and PostgreSQL.

use async_trait::async_trait;
use common::config::DriverKind;
use common::errors::{AppError, AppResult};
use common::models::{NewPet, Pet};

use super::PetRepository;
use crate::pool::DatabasePool;

const CREATE_TABLE_POSTGRES: &str = "CREATE TABLE IF NOT EXISTS pets (
    id SERIAL PRIMARY KEY,
    race VARCHAR(50) NOT NULL,
    gender VARCHAR(10) NOT NULL,
    name VARCHAR(50) NOT NULL,
    age INTEGER NOT NULL,
    description TEXT
)";

const CREATE_TABLE_MYSQL: &str = "CREATE TABLE IF NOT EXISTS `pets` (
    `id` INT AUTO_INCREMENT PRIMARY KEY,
    `race` VARCHAR(50) NOT NULL,
    `gender` VARCHAR(10) NOT NULL,
    `name` VARCHAR(50) NOT NULL,
    `age` INT NOT NULL,
    `description` TEXT
)";

const SELECT_PETS: &str = "SELECT id, race, gender, name, age, description FROM pets ORDER BY id";
const COUNT_PETS: &str = "SELECT COUNT(*) FROM pets";
const INSERT_PET_POSTGRES: &str =
    "INSERT INTO pets (race, gender, name, age, description) VALUES ($1, $2, $3, $4, $5)";
const INSERT_PET_MYSQL: &str =
    "INSERT INTO pets (race, gender, name, age, description) VALUES (?, ?, ?, ?, ?)";

/// Pet repository over a [`DatabasePool`].
pub struct SqlPetRepository {
    pool: DatabasePool,
}

impl SqlPetRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PetRepository for SqlPetRepository {
    fn driver(&self) -> DriverKind {
        self.pool.driver()
    }

    async fn ensure_schema(&self) -> AppResult<()> {
        let result = match &self.pool {
            DatabasePool::MySql(pool) => {
                sqlx::query(CREATE_TABLE_MYSQL).execute(pool).await.map(|_| ())
            }
            DatabasePool::Postgres(pool) => {
                sqlx::query(CREATE_TABLE_POSTGRES).execute(pool).await.map(|_| ())
            }
        };
        result.map_err(|e| AppError::DatabaseQuery(format!("Failed to create pets table: {}", e)))?;
        tracing::info!("Pets table ready");
        Ok(())
    }

    async fn count(&self) -> AppResult<i64> {
        let (count,): (i64,) = match &self.pool {
            DatabasePool::MySql(pool) => sqlx::query_as(COUNT_PETS).fetch_one(pool).await?,
            DatabasePool::Postgres(pool) => sqlx::query_as(COUNT_PETS).fetch_one(pool).await?,
        };
        Ok(count)
    }

    async fn insert(&self, pet: &NewPet) -> AppResult<()> {
        match &self.pool {
            DatabasePool::MySql(pool) => {
                sqlx::query(INSERT_PET_MYSQL)
                    .bind(&pet.race)
                    .bind(&pet.gender)
                    .bind(&pet.name)
                    .bind(pet.age)
                    .bind(&pet.description)
                    .execute(pool)
                    .await?;
            }
            DatabasePool::Postgres(pool) => {
                sqlx::query(INSERT_PET_POSTGRES)
                    .bind(&pet.race)
                    .bind(&pet.gender)
                    .bind(&pet.name)
                    .bind(pet.age)
                    .bind(&pet.description)
                    .execute(pool)
                    .await?;
            }
        }
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Pet>> {
        let pets = match &self.pool {
            DatabasePool::MySql(pool) => {
                sqlx::query_as::<_, Pet>(SELECT_PETS).fetch_all(pool).await?
            }
            DatabasePool::Postgres(pool) => {
                sqlx::query_as::<_, Pet>(SELECT_PETS).fetch_all(pool).await?
            }
        };
        Ok(pets)
    }

    async fn ping(&self) -> AppResult<()> {
        match &self.pool {
            DatabasePool::MySql(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
            }
            DatabasePool::Postgres(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
            }
        }
        Ok(())
    }
}
