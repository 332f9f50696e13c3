use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::StoreError;
use crate::domain::pagination::PageRequest;
use crate::domain::repositories::{StoreResult, TeamRepository};
use crate::domain::team::{Budget, Player, Team};

#[derive(Debug, Clone)]
struct TeamRow {
    name: String,
    acronym: String,
    budget: Budget,
}

#[derive(Debug, Clone)]
struct PlayerRow {
    team_id: i64,
    name: String,
    position: String,
}

/// Table-shaped state guarded by a single lock, so every write is atomic
#[derive(Debug, Default)]
struct Tables {
    teams: BTreeMap<i64, TeamRow>,
    players: BTreeMap<i64, PlayerRow>,
    last_team_id: i64,
    last_player_id: i64,
}

impl Tables {
    fn load(&self, id: i64) -> Option<Team> {
        let row = self.teams.get(&id)?;
        let players = self
            .players
            .iter()
            .filter(|(_, player)| player.team_id == id)
            .map(|(player_id, player)| {
                Player::from_persistence(*player_id, player.name.clone(), player.position.clone())
            })
            .collect();

        Some(Team::from_persistence(
            id,
            row.name.clone(),
            row.acronym.clone(),
            row.budget,
            players,
        ))
    }
}

/// In-memory implementation of TeamRepository
///
/// Keeps teams and players in separate id-ordered tables linked by
/// `team_id`, mirroring the relational layout. Ids come from per-table
/// sequences and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryTeamRepository {
    tables: RwLock<Tables>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored player rows, across all teams
    pub async fn player_count(&self) -> usize {
        self.tables.read().await.players.len()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Team>> {
        Ok(self.tables.read().await.load(id))
    }

    async fn find_all(&self, page: PageRequest) -> StoreResult<(Vec<Team>, u64)> {
        let tables = self.tables.read().await;
        let total = tables.teams.len() as u64;

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let teams = tables
            .teams
            .keys()
            .skip(offset)
            .take(page.size() as usize)
            .filter_map(|id| tables.load(*id))
            .collect();

        Ok((teams, total))
    }

    async fn save(&self, team: Team) -> StoreResult<Team> {
        let mut tables = self.tables.write().await;

        // Check everything before the first mutation so a failed save
        // leaves the tables untouched.
        if let Some(id) = team.id() {
            if !tables.teams.contains_key(&id) {
                return Err(StoreError::TeamMissing(id));
            }
            for player_id in team.players().iter().filter_map(Player::id) {
                let owned = tables
                    .players
                    .get(&player_id)
                    .is_some_and(|player| player.team_id == id);
                if !owned {
                    return Err(StoreError::PlayerMissing {
                        team_id: id,
                        player_id,
                    });
                }
            }
        }

        let team_id = match team.id() {
            Some(id) => id,
            None => {
                tables.last_team_id += 1;
                tables.last_team_id
            }
        };
        tables.teams.insert(
            team_id,
            TeamRow {
                name: team.name().to_string(),
                acronym: team.acronym().to_string(),
                budget: team.budget(),
            },
        );

        let retained: HashSet<i64> = team.players().iter().filter_map(Player::id).collect();
        tables
            .players
            .retain(|player_id, player| player.team_id != team_id || retained.contains(player_id));

        let mut players = Vec::with_capacity(team.players().len());
        for player in team.players() {
            let player_id = match player.id() {
                Some(id) => id,
                None => {
                    tables.last_player_id += 1;
                    tables.last_player_id
                }
            };
            tables.players.insert(
                player_id,
                PlayerRow {
                    team_id,
                    name: player.name().to_string(),
                    position: player.position().to_string(),
                },
            );
            players.push(Player::from_persistence(
                player_id,
                player.name().to_string(),
                player.position().to_string(),
            ));
        }

        Ok(Team::from_persistence(
            team_id,
            team.name().to_string(),
            team.acronym().to_string(),
            team.budget(),
            players,
        ))
    }

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.read().await.teams.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.teams.remove(&id);
        tables.players.retain(|_, player| player.team_id != id);
        Ok(())
    }
}
