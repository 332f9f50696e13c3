use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationErrors;
use crate::domain::pagination::PageRequest;
use crate::domain::team::{Budget, Player, PlayerSpec, Team, TeamDraft};

/// Request body for a player, inside a team request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerRequest {
    pub name: Option<String>,
    pub position: Option<String>,
}

impl PlayerRequest {
    pub fn new(name: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            position: Some(position.into()),
        }
    }
}

/// Request body for creating or replacing a team
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation failure instead of a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamRequest {
    pub name: Option<String>,
    pub acronym: Option<String>,
    pub budget: Option<Decimal>,
    pub players: Option<Vec<PlayerRequest>>,
}

impl TeamRequest {
    /// Checks every field and converts the request into a `TeamDraft`
    ///
    /// All violations are collected rather than stopping at the first one.
    pub fn validate(self) -> Result<TeamDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = non_empty(self.name);
        if name.is_none() {
            errors.add("name", "Team name cannot be empty or null");
        }

        let acronym = non_empty(self.acronym);
        if acronym.is_none() {
            errors.add("acronym", "Team acronym cannot be null or empty");
        }

        let budget = match self.budget {
            None => {
                errors.add("budget", "Team budget cannot be null");
                None
            }
            Some(amount) => match Budget::new(amount) {
                Ok(budget) => Some(budget),
                Err(message) => {
                    errors.add("budget", message);
                    None
                }
            },
        };

        let mut players = Vec::new();
        match self.players {
            None => errors.add("players", "Team Players list cannot be null"),
            Some(requests) => {
                for (index, request) in requests.into_iter().enumerate() {
                    let name = non_empty(request.name);
                    if name.is_none() {
                        errors.add(
                            format!("players[{}].name", index),
                            "Player name cannot be empty",
                        );
                    }
                    let position = non_empty(request.position);
                    if position.is_none() {
                        errors.add(
                            format!("players[{}].position", index),
                            "Player position cannot be empty",
                        );
                    }
                    if let (Some(name), Some(position)) = (name, position) {
                        players.push(PlayerSpec { name, position });
                    }
                }
            }
        }

        match (name, acronym, budget) {
            (Some(name), Some(acronym), Some(budget)) if errors.is_empty() => Ok(TeamDraft {
                name,
                acronym,
                budget,
                players,
            }),
            _ => Err(errors),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Query string for listing teams
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub size: u32,
}

fn default_page_size() -> u32 {
    20
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_page_size(),
        }
    }
}

impl PageQuery {
    pub fn validate(self) -> Result<PageRequest, ValidationErrors> {
        PageRequest::new(self.page, self.size).map_err(|message| {
            let mut errors = ValidationErrors::new();
            errors.add("size", message);
            errors
        })
    }
}

/// Player projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub id: i64,
    pub name: String,
    pub position: String,
}

/// Team projection, including the full roster in store order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamResponse {
    pub id: i64,
    pub name: String,
    pub acronym: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub budget: Decimal,
    pub players: Vec<PlayerResponse>,
}

impl TeamResponse {
    /// Projects a persisted team
    ///
    /// Returns `None` if the team or one of its players has not been
    /// assigned an id, which only happens for teams that never went through
    /// the store.
    pub fn from_persisted(team: &Team) -> Option<Self> {
        let players = team
            .players()
            .iter()
            .map(PlayerResponse::from_persisted)
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            id: team.id()?,
            name: team.name().to_string(),
            acronym: team.acronym().to_string(),
            budget: team.budget().amount(),
            players,
        })
    }
}

impl PlayerResponse {
    fn from_persisted(player: &Player) -> Option<Self> {
        Some(Self {
            id: player.id()?,
            name: player.name().to_string(),
            position: player.position().to_string(),
        })
    }
}
