use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::errors::StoreError;
use crate::domain::pagination::PageRequest;
use crate::domain::team::Team;

pub type StoreResult<T> = Result<T, StoreError>;

/// Repository trait for the Team aggregate
///
/// Every write is atomic: either the team row and its whole roster change
/// together, or nothing changes.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Find a team, with its full roster, by ID
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Team>>;

    /// Find one page of teams in natural order, plus the total team count
    async fn find_all(&self, page: PageRequest) -> StoreResult<(Vec<Team>, u64)>;

    /// Save a team (insert or update) together with its roster
    ///
    /// Assigns ids to the team and to players that have none. The stored
    /// roster is made to match `team.players()` exactly: any player
    /// previously owned by the team and absent from the given roster is
    /// deleted. Returns the team with assigned ids, players in the given
    /// order.
    async fn save(&self, team: Team) -> StoreResult<Team>;

    /// Check whether a team exists
    async fn exists_by_id(&self, id: i64) -> StoreResult<bool>;

    /// Delete a team and every player it owns
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;
}
