// Team domain module
// Contains the team aggregate root, its player entities and value objects

#![allow(clippy::module_inception)]

pub mod player;
pub mod team;
pub mod value_objects;

// Re-export main types for convenience
pub use player::{Player, PlayerSpec};
pub use team::{Team, TeamDraft};
pub use value_objects::Budget;
