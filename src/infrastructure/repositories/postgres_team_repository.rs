use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::domain::errors::StoreError;
use crate::domain::pagination::PageRequest;
use crate::domain::repositories::{StoreResult, TeamRepository};
use crate::domain::team::{Budget, Player, Team};

#[derive(Debug, sqlx::FromRow)]
struct TeamRow {
    id: i64,
    name: String,
    acronym: String,
    budget: Decimal,
}

#[derive(Debug, sqlx::FromRow)]
struct PlayerRow {
    id: i64,
    team_id: i64,
    name: String,
    position: String,
}

impl TeamRow {
    fn into_team(self, players: Vec<Player>) -> Team {
        Team::from_persistence(
            self.id,
            self.name,
            self.acronym,
            Budget::from_persistence(self.budget),
            players,
        )
    }
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Self {
        Player::from_persistence(row.id, row.name, row.position)
    }
}

/// PostgreSQL implementation of TeamRepository
///
/// Stores teams and players in two tables linked by `players.team_id`.
/// Every write runs in its own transaction. Reads span several statements,
/// so each read runs in a `REPEATABLE READ` snapshot and never mixes a
/// team's old scalars with a new roster.
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Creates a new PostgresTeamRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_team(conn: &mut PgConnection, team: &Team) -> StoreResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO teams (name, acronym, budget)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(team.name())
        .bind(team.acronym())
        .bind(team.budget().amount())
        .fetch_one(conn)
        .await?;

        Ok(id)
    }

    async fn update_team(conn: &mut PgConnection, id: i64, team: &Team) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE teams
            SET name = $2, acronym = $3, budget = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(team.name())
        .bind(team.acronym())
        .bind(team.budget().amount())
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::TeamMissing(id));
        }
        Ok(())
    }

    /// Makes the stored roster match `players` exactly
    async fn sync_players(
        conn: &mut PgConnection,
        team_id: i64,
        players: &[Player],
    ) -> StoreResult<Vec<Player>> {
        let retained: Vec<i64> = players.iter().filter_map(Player::id).collect();

        // Orphan removal: rows owned by the team and absent from the roster.
        sqlx::query(
            r#"
            DELETE FROM players
            WHERE team_id = $1 AND NOT (id = ANY($2))
            "#,
        )
        .bind(team_id)
        .bind(&retained)
        .execute(&mut *conn)
        .await?;

        let mut saved = Vec::with_capacity(players.len());
        for player in players {
            let id = match player.id() {
                Some(player_id) => {
                    let result = sqlx::query(
                        r#"
                        UPDATE players
                        SET name = $3, position = $4
                        WHERE id = $1 AND team_id = $2
                        "#,
                    )
                    .bind(player_id)
                    .bind(team_id)
                    .bind(player.name())
                    .bind(player.position())
                    .execute(&mut *conn)
                    .await?;

                    if result.rows_affected() == 0 {
                        return Err(StoreError::PlayerMissing { team_id, player_id });
                    }
                    player_id
                }
                None => {
                    sqlx::query_scalar::<_, i64>(
                        r#"
                        INSERT INTO players (team_id, name, position)
                        VALUES ($1, $2, $3)
                        RETURNING id
                        "#,
                    )
                    .bind(team_id)
                    .bind(player.name())
                    .bind(player.position())
                    .fetch_one(&mut *conn)
                    .await?
                }
            };

            saved.push(Player::from_persistence(
                id,
                player.name().to_string(),
                player.position().to_string(),
            ));
        }

        Ok(saved)
    }

    /// Opens a read-only transaction whose statements all see one snapshot
    async fn snapshot(&self) -> StoreResult<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }

    async fn players_of(
        conn: &mut PgConnection,
        team_ids: &[i64],
    ) -> StoreResult<HashMap<i64, Vec<Player>>> {
        let rows = sqlx::query_as::<_, PlayerRow>(
            r#"
            SELECT id, team_id, name, position
            FROM players
            WHERE team_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(team_ids)
        .fetch_all(conn)
        .await?;

        let mut by_team: HashMap<i64, Vec<Player>> = HashMap::new();
        for row in rows {
            by_team.entry(row.team_id).or_default().push(row.into());
        }
        Ok(by_team)
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Team>> {
        let mut tx = self.snapshot().await?;

        let row = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, name, acronym, budget
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.commit().await?;
            return Ok(None);
        };

        let players = Self::players_of(&mut tx, &[id])
            .await?
            .remove(&id)
            .unwrap_or_default();

        tx.commit().await?;
        Ok(Some(row.into_team(players)))
    }

    async fn find_all(&self, page: PageRequest) -> StoreResult<(Vec<Team>, u64)> {
        let mut tx = self.snapshot().await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teams")
            .fetch_one(&mut *tx)
            .await?;

        let rows = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, name, acronym, budget
            FROM teams
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(page.size()))
        .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
        .fetch_all(&mut *tx)
        .await?;

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut players = Self::players_of(&mut tx, &ids).await?;

        tx.commit().await?;

        let teams = rows
            .into_iter()
            .map(|row| {
                let roster = players.remove(&row.id).unwrap_or_default();
                row.into_team(roster)
            })
            .collect();

        Ok((teams, u64::try_from(total).unwrap_or_default()))
    }

    async fn save(&self, team: Team) -> StoreResult<Team> {
        let mut tx = self.pool.begin().await?;

        let team_id = match team.id() {
            Some(id) => {
                Self::update_team(&mut tx, id, &team).await?;
                id
            }
            None => Self::insert_team(&mut tx, &team).await?,
        };
        let players = Self::sync_players(&mut tx, team_id, team.players()).await?;

        tx.commit().await?;

        Ok(Team::from_persistence(
            team_id,
            team.name().to_string(),
            team.acronym().to_string(),
            team.budget(),
            players,
        ))
    }

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM teams WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM players WHERE team_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
