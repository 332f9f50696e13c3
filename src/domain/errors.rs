use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Failures raised by a `TeamRepository` implementation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Team {0} no longer exists in storage")]
    TeamMissing(i64),

    #[error("Player {player_id} is not owned by team {team_id}")]
    PlayerMissing { team_id: i64, player_id: i64 },

    #[error("Store returned a team without assigned ids")]
    UnassignedId,
}

/// Field-level validation failures keyed by field path
///
/// Paths follow the request shape, e.g. `name` or `players[1].position`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation, keeping the first message reported for a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Kind of failure, independent of any transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ValidationFailed,
    NotFound,
    StoreFailure,
}

/// Errors surfaced by the team aggregate service
///
/// Input is validated before the service runs, so the service itself only
/// reports missing teams and store failures.
#[derive(Debug, Error)]
pub enum TeamError {
    #[error("Team not found by id: {0}")]
    NotFound(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TeamError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TeamError::NotFound(_) => ErrorKind::NotFound,
            TeamError::Store(_) => ErrorKind::StoreFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_carries_id() {
        let error = TeamError::NotFound(42);
        assert_eq!(error.to_string(), "Team not found by id: 42");
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn store_error_is_transparent() {
        let error = TeamError::from(StoreError::TeamMissing(7));
        assert_eq!(error.to_string(), "Team 7 no longer exists in storage");
        assert_eq!(error.kind(), ErrorKind::StoreFailure);
    }

    #[test]
    fn validation_errors_keep_first_message_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("budget", "Team budget cannot be null");
        errors.add("budget", "Team budget must be a positive number");
        errors.add("name", "Team name cannot be empty or null");

        assert_eq!(errors.get("budget"), Some("Team budget cannot be null"));
        assert_eq!(
            errors.to_string(),
            "budget: Team budget cannot be null; name: Team name cannot be empty or null"
        );
    }
}
