// Repository traits (ports) implemented by the infrastructure layer

pub mod team_repository;

pub use team_repository::{StoreResult, TeamRepository};
