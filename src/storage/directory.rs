//! Player directory and result sink backed by the JSONL data lake.

use tracing::{debug, info};

use super::{EntityType, JsonlReader, JsonlWriter, StorageConfig, StorageError};
use crate::models::{Player, RosterEntry, StoredAssignment, TeamAssignment, Tournament};

/// Source of tournaments and their active team members.
pub trait PlayerDirectory: Send + Sync {
    /// Look up a tournament by id.
    fn tournament(&self, tournament_id: &str) -> Result<Option<Tournament>, StorageError>;

    /// Active members of every team on the tournament's roster, in roster order.
    fn active_players(&self, tournament_id: &str) -> Result<Vec<Player>, StorageError>;
}

/// Destination for computed assignments.
pub trait ResultSink: Send + Sync {
    /// Persist assignments for a tournament, replacing earlier ones.
    /// Returns the number of player rows written.
    fn store(
        &self,
        tournament_id: &str,
        teams: &[TeamAssignment],
    ) -> Result<usize, StorageError>;

    /// Load the current assignments for a tournament.
    fn load(&self, tournament_id: &str) -> Result<Vec<TeamAssignment>, StorageError>;
}

/// JSONL implementation of [`PlayerDirectory`] and [`ResultSink`].
#[derive(Debug, Clone)]
pub struct JsonlStore {
    config: StorageConfig,
}

impl JsonlStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn tournaments(&self) -> Result<Vec<Tournament>, StorageError> {
        JsonlReader::new(self.config.tournaments_path()).read_all()
    }

    /// Insert or replace a tournament record.
    pub fn upsert_tournament(&self, tournament: &Tournament) -> Result<(), StorageError> {
        let mut all = self.tournaments()?;
        match all.iter_mut().find(|t| t.id == tournament.id) {
            Some(existing) => *existing = tournament.clone(),
            None => all.push(tournament.clone()),
        }
        JsonlWriter::new(self.config.tournaments_path()).write_all(&all)?;
        Ok(())
    }

    /// Replace a tournament's roster.
    pub fn write_roster(
        &self,
        tournament_id: &str,
        entries: &[RosterEntry],
    ) -> Result<usize, StorageError> {
        JsonlWriter::for_entity(&self.config, EntityType::Roster, tournament_id)?
            .write_all(entries)
    }

    /// Register a tournament and replace its roster. A tournament with no
    /// confirmed teams gets every team on the roster confirmed, in roster
    /// order.
    pub fn import_roster(
        &self,
        mut tournament: Tournament,
        entries: &[RosterEntry],
    ) -> Result<usize, StorageError> {
        if tournament.confirmed_team_ids.is_empty() {
            for entry in entries {
                if !tournament.is_confirmed(&entry.player.team_id) {
                    tournament
                        .confirmed_team_ids
                        .push(entry.player.team_id.clone());
                }
            }
        }

        let written = self.write_roster(tournament.id.as_str(), entries)?;
        self.upsert_tournament(&tournament)?;
        info!(
            tournament_id = %tournament.id,
            entries = written,
            teams = tournament.confirmed_team_ids.len(),
            "Imported roster"
        );
        Ok(written)
    }

    pub fn roster(&self, tournament_id: &str) -> Result<Vec<RosterEntry>, StorageError> {
        JsonlReader::for_entity(&self.config, EntityType::Roster, tournament_id)?.read_all()
    }
}

impl PlayerDirectory for JsonlStore {
    fn tournament(&self, tournament_id: &str) -> Result<Option<Tournament>, StorageError> {
        Ok(self
            .tournaments()?
            .into_iter()
            .find(|t| t.id.as_str() == tournament_id))
    }

    fn active_players(&self, tournament_id: &str) -> Result<Vec<Player>, StorageError> {
        let entries: Vec<RosterEntry> =
            JsonlReader::for_entity(&self.config, EntityType::Roster, tournament_id)?
                .read_where(|e: &RosterEntry| e.is_active)?;
        debug!(
            tournament_id,
            active = entries.len(),
            "Loaded active roster"
        );
        Ok(entries.into_iter().map(|e| e.player).collect())
    }
}

impl ResultSink for JsonlStore {
    fn store(
        &self,
        tournament_id: &str,
        teams: &[TeamAssignment],
    ) -> Result<usize, StorageError> {
        let rows = StoredAssignment::from_teams(teams);
        let written = JsonlWriter::for_entity(&self.config, EntityType::Assignment, tournament_id)?
            .write_all(&rows)?;
        info!(
            tournament_id,
            teams = teams.len(),
            players = written,
            "Stored assignments"
        );
        Ok(written)
    }

    fn load(&self, tournament_id: &str) -> Result<Vec<TeamAssignment>, StorageError> {
        let rows: Vec<StoredAssignment> =
            JsonlReader::for_entity(&self.config, EntityType::Assignment, tournament_id)?
                .read_all()?;
        Ok(StoredAssignment::into_teams(rows))
    }
}
