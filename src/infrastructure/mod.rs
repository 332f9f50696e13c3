// Infrastructure layer module
// Contains database adapters and process-level setup
// Follows Hexagonal Architecture

pub mod logging;
pub mod repositories;
