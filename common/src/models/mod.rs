//! Shared data models.

pub mod info;
pub mod pet;

// Re-export commonly used types
pub use info::{TechStack, TechStackInfo};
pub use pet::{sample_pets, NewPet, Pet};
