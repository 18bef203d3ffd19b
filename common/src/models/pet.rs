//! Pet models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A pet row from the `pets` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Pet {
    /// Row identifier.
    pub id: i32,
    /// Breed or species.
    pub race: String,
    /// `Male` or `Female`.
    pub gender: String,
    pub name: String,
    /// Age in years.
    pub age: i32,
    pub description: Option<String>,
}

/// A pet that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct NewPet {
    pub race: String,
    pub gender: String,
    pub name: String,
    pub age: i32,
    pub description: Option<String>,
}

impl NewPet {
    pub fn new(race: &str, gender: &str, name: &str, age: i32, description: &str) -> Self {
        Self {
            race: race.to_string(),
            gender: gender.to_string(),
            name: name.to_string(),
            age,
            description: Some(description.to_string()),
        }
    }

    /// Attaches a row identifier.
    pub fn with_id(self, id: i32) -> Pet {
        Pet {
            id,
            race: self.race,
            gender: self.gender,
            name: self.name,
            age: self.age,
            description: self.description,
        }
    }
}

/// The sample data inserted into an empty `pets` table.
pub fn sample_pets() -> Vec<NewPet> {
    vec![
        NewPet::new("Golden Retriever", "Male", "Max", 5, "Friendly and energetic dog"),
        NewPet::new("Persian Cat", "Female", "Luna", 3, "Calm and fluffy cat"),
        NewPet::new("Labrador", "Male", "Charlie", 7, "Loyal companion"),
        NewPet::new("Siamese Cat", "Female", "Bella", 2, "Playful and vocal"),
        NewPet::new("German Shepherd", "Male", "Rex", 4, "Smart and protective"),
        NewPet::new("Maine Coon", "Male", "Oliver", 6, "Large and gentle cat"),
        NewPet::new("Parakeet", "Female", "Kiwi", 1, "Colorful and chirpy bird"),
        NewPet::new("Cockatiel", "Male", "Sunny", 2, "Friendly whistling bird"),
    ]
}
