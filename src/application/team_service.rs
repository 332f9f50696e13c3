//! Team aggregate service.
//!
//! Creates, replaces, reads and deletes a team together with its roster.
//! The service holds no state of its own; atomicity of every write is
//! delegated to the repository.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::TeamResponse;
use crate::domain::errors::{StoreError, TeamError};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::repositories::TeamRepository;
use crate::domain::team::{Team, TeamDraft};

/// Team service for managing team aggregates
#[derive(Clone)]
pub struct TeamService {
    repository: Arc<dyn TeamRepository>,
}

impl TeamService {
    /// Create a new team service
    pub fn new(repository: Arc<dyn TeamRepository>) -> Self {
        Self { repository }
    }

    /// Create a team and its initial roster in one write
    pub async fn create_team(&self, draft: TeamDraft) -> Result<TeamResponse, TeamError> {
        info!(
            name = %draft.name,
            players = draft.players.len(),
            "Creating team"
        );

        let saved = self.repository.save(Team::new(draft)).await?;
        let response = project(&saved)?;

        info!(id = response.id, "Team created");
        Ok(response)
    }

    /// Replace a team's fields and its entire roster
    ///
    /// Existing players are never reused: every player in the returned
    /// projection has a freshly assigned id, even if its name and position
    /// match a previous one.
    pub async fn update_team(&self, id: i64, draft: TeamDraft) -> Result<TeamResponse, TeamError> {
        info!(id, players = draft.players.len(), "Updating team");

        let existing = self.repository.find_by_id(id).await?.ok_or_else(|| {
            warn!(id, "Update of unknown team");
            TeamError::NotFound(id)
        })?;

        let replaced = existing.players().len();
        let saved = self.repository.save(existing.revise(draft)).await?;

        debug!(id, replaced, "Roster replaced");
        project(&saved)
    }

    /// Get a team by ID
    pub async fn get_team_by_id(&self, id: i64) -> Result<TeamResponse, TeamError> {
        debug!(id, "Fetching team");

        let team = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TeamError::NotFound(id))?;

        project(&team)
    }

    /// List one page of teams in store order
    pub async fn list_teams(&self, page: PageRequest) -> Result<Page<TeamResponse>, TeamError> {
        debug!(page = page.number(), size = page.size(), "Listing teams");

        let (teams, total) = self.repository.find_all(page).await?;
        let content = teams
            .iter()
            .map(project)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(content, page, total))
    }

    /// Delete a team and all of its players
    pub async fn delete_team(&self, id: i64) -> Result<(), TeamError> {
        info!(id, "Deleting team");

        if !self.repository.exists_by_id(id).await? {
            warn!(id, "Delete of unknown team");
            return Err(TeamError::NotFound(id));
        }

        self.repository.delete_by_id(id).await?;
        Ok(())
    }
}

fn project(team: &Team) -> Result<TeamResponse, TeamError> {
    TeamResponse::from_persisted(team).ok_or(TeamError::Store(StoreError::UnassignedId))
}
