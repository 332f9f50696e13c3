/// Name and position of a player that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSpec {
    pub name: String,
    pub position: String,
}

impl PlayerSpec {
    pub fn new(name: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
        }
    }
}

/// Player entity, owned by exactly one Team
///
/// The owning team is not referenced from here: a `Team` holds its
/// players, and the `team_id` back-reference only exists in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: Option<i64>,
    name: String,
    position: String,
}

impl Player {
    /// Creates a player that the store has not seen yet
    pub fn new(spec: PlayerSpec) -> Self {
        Self {
            id: None,
            name: spec.name,
            position: spec.position,
        }
    }

    /// Store-assigned id, `None` until the player is first saved
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    /// Reconstructs a Player from persistence layer data
    ///
    /// # Note
    /// Only to be used by repository implementations.
    pub fn from_persistence(id: i64, name: String, position: String) -> Self {
        Self {
            id: Some(id),
            name,
            position,
        }
    }
}
