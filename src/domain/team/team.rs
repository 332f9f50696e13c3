use super::player::{Player, PlayerSpec};
use super::value_objects::Budget;

/// Validated input for creating or replacing a team
///
/// Produced by the validation layer; the aggregate trusts its contents.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamDraft {
    pub name: String,
    pub acronym: String,
    pub budget: Budget,
    pub players: Vec<PlayerSpec>,
}

/// Team aggregate root
///
/// A team together with the roster of players it exclusively owns. The
/// aggregate is persisted and deleted as one unit.
///
/// # Invariants
/// - Name and acronym are non-empty (guaranteed by `TeamDraft`)
/// - Budget is strictly positive
/// - `id` is assigned by the store on first save and never changes
/// - An unsaved team only holds unsaved players
/// - Revising a team never reuses a player: the roster is rebuilt from
///   scratch, so every player gets a fresh id on the next save
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use team_roster_api::domain::team::{Budget, PlayerSpec, Team, TeamDraft};
///
/// let team = Team::new(TeamDraft {
///     name: "Nice".to_string(),
///     acronym: "NC".to_string(),
///     budget: Budget::new(Decimal::from(1_000_000)).expect("positive"),
///     players: vec![PlayerSpec::new("Messi", "Forward")],
/// });
///
/// assert_eq!(team.id(), None);
/// assert_eq!(team.players().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    id: Option<i64>,
    name: String,
    acronym: String,
    budget: Budget,
    players: Vec<Player>,
}

impl Team {
    /// Creates a new, not yet persisted, team with its initial roster
    pub fn new(draft: TeamDraft) -> Self {
        Self {
            id: None,
            name: draft.name,
            acronym: draft.acronym,
            budget: draft.budget,
            players: build_roster(draft.players),
        }
    }

    /// Replaces every scalar field and the whole roster, keeping the id
    ///
    /// Previous players are dropped rather than matched against the new
    /// specs; saving the result makes the store delete them.
    pub fn revise(self, draft: TeamDraft) -> Self {
        Self {
            id: self.id,
            name: draft.name,
            acronym: draft.acronym,
            budget: draft.budget,
            players: build_roster(draft.players),
        }
    }

    // ===== Getters =====

    /// Returns the store-assigned id, `None` before the first save
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn acronym(&self) -> &str {
        &self.acronym
    }

    pub fn budget(&self) -> Budget {
        self.budget
    }

    /// Returns the roster in store order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// # Note
    /// Only to be used by repository implementations for data reconstruction.
    pub fn from_persistence(
        id: i64,
        name: String,
        acronym: String,
        budget: Budget,
        players: Vec<Player>,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            acronym,
            budget,
            players,
        }
    }
}

fn build_roster(specs: Vec<PlayerSpec>) -> Vec<Player> {
    specs.into_iter().map(Player::new).collect()
}
