//! Tournament records and persisted assignment rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AssignedPlayer, Player, TeamAssignment, TeamId, TournamentId};
use crate::assignment::GameMode;

/// A tournament as far as squad assignment is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,

    pub name: String,

    /// Match size, if fixed
    #[serde(default)]
    pub mode: Option<GameMode>,

    /// Assignments are frozen once the tournament starts
    #[serde(default)]
    pub is_started: bool,

    /// Teams whose registration is confirmed
    #[serde(default)]
    pub confirmed_team_ids: Vec<TeamId>,
}

impl Tournament {
    pub fn new(id: impl Into<TournamentId>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            mode: None,
            is_started: false,
            confirmed_team_ids: Vec::new(),
        }
    }

    pub fn is_confirmed(&self, team_id: &TeamId) -> bool {
        self.confirmed_team_ids.contains(team_id)
    }
}

/// A team membership row in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(flatten)]
    pub player: Player,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl From<Player> for RosterEntry {
    fn from(player: Player) -> Self {
        Self {
            player,
            is_active: true,
        }
    }
}

/// One persisted squad/position assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAssignment {
    /// Assignment run that produced this row
    pub run_id: Uuid,

    pub assigned_at: DateTime<Utc>,

    /// Team name as resolved at assignment time
    pub resolved_team_name: String,

    #[serde(flatten)]
    pub assigned: AssignedPlayer,
}

impl StoredAssignment {
    /// Flatten team assignments into rows sharing one run id and timestamp.
    pub fn from_teams(teams: &[TeamAssignment]) -> Vec<Self> {
        let run_id = Uuid::new_v4();
        let assigned_at = Utc::now();
        teams
            .iter()
            .flat_map(|team| {
                team.players.iter().map(move |assigned| Self {
                    run_id,
                    assigned_at,
                    resolved_team_name: team.team_name.clone(),
                    assigned: assigned.clone(),
                })
            })
            .collect()
    }

    /// Regroup rows into team assignments, in first-seen team order.
    pub fn into_teams(rows: Vec<Self>) -> Vec<TeamAssignment> {
        let mut teams: Vec<TeamAssignment> = Vec::new();
        for row in rows {
            let team_id = row.assigned.player.team_id.clone();
            match teams.iter_mut().find(|t| t.team_id == team_id) {
                Some(team) => team.players.push(row.assigned),
                None => teams.push(TeamAssignment {
                    team_id,
                    team_name: row.resolved_team_name,
                    players: vec![row.assigned],
                }),
            }
        }
        teams
    }
}
