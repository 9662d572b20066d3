//! Tournament-level assignment workflow.
//!
//! Connects the assignment engine to the player directory and the result
//! sink: automatic assignment of every confirmed team, manual assignments
//! submitted by an organiser, and validation of what is stored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::assignment::{
    auto_assign_teams, balance_teams_by_tier, validate_team_composition, ValidationReport,
};
use crate::models::{
    AssignedPlayer, Player, PlayerId, Position, Squad, TeamAssignment, TeamId, Tournament,
    UNKNOWN_TEAM_NAME,
};
use crate::storage::{PlayerDirectory, ResultSink, StorageError};

/// Errors from the assignment workflow.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Tournament not found: {0}")]
    TournamentNotFound(String),

    #[error("Cannot modify assignments after tournament has started")]
    TournamentStarted,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// One organiser-chosen placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPlacement {
    pub player_id: PlayerId,
    pub position: Position,
    #[serde(default)]
    pub squad_assignment: Option<Squad>,
}

/// Organiser-chosen placements for one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualAssignment {
    pub team_id: TeamId,
    pub player_assignments: Vec<PlayerPlacement>,
}

/// Counts reported back after an assignment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentSummary {
    pub message: String,
    pub teams_processed: usize,
    pub players_assigned: usize,
    pub failed_assignments: usize,
}

/// Result of a workflow run: the computed teams plus the summary.
#[derive(Debug, Clone)]
pub struct AssignmentOutcome {
    pub teams: Vec<TeamAssignment>,
    pub summary: AssignmentSummary,
}

fn ensure_open(tournament: &Tournament) -> Result<(), RosterError> {
    if tournament.is_started {
        return Err(RosterError::TournamentStarted);
    }
    Ok(())
}

/// Auto-assign every confirmed team of an open tournament.
///
/// Members of unconfirmed teams are ignored.
pub fn auto_assign_tournament(
    tournament: &Tournament,
    roster: &[Player],
    balance_by_tier: bool,
) -> Result<AssignmentOutcome, RosterError> {
    ensure_open(tournament)?;

    let confirmed: Vec<Player> = roster
        .iter()
        .filter(|p| tournament.is_confirmed(&p.team_id))
        .cloned()
        .collect();
    if confirmed.len() < roster.len() {
        warn!(
            tournament_id = %tournament.id,
            skipped = roster.len() - confirmed.len(),
            "Ignoring members of unconfirmed teams"
        );
    }

    let mut teams = auto_assign_teams(&confirmed);
    if balance_by_tier {
        teams = balance_teams_by_tier(teams);
    }

    let summary = AssignmentSummary {
        message: "Auto-assignment completed".to_string(),
        teams_processed: teams.len(),
        players_assigned: teams.iter().map(|t| t.players.len()).sum(),
        failed_assignments: 0,
    };
    Ok(AssignmentOutcome { teams, summary })
}

/// Apply organiser placements to an open tournament.
///
/// Assignments for unconfirmed teams are dropped. A placement fails, and is
/// counted rather than raised, when its player is not on that team's roster.
/// A placement that names no squad keeps the player's stored squad, or the
/// first squad when nothing is stored yet.
///
/// The returned teams hold only the placed players; merge them over the
/// stored set with [`merge_assignments`].
pub fn apply_manual_assignments(
    tournament: &Tournament,
    roster: &[Player],
    stored: &[TeamAssignment],
    manual: &[ManualAssignment],
) -> Result<AssignmentOutcome, RosterError> {
    ensure_open(tournament)?;

    let mut teams = Vec::new();
    let mut failed = 0;

    for assignment in manual
        .iter()
        .filter(|a| tournament.is_confirmed(&a.team_id))
    {
        let mut players = Vec::new();
        for placement in &assignment.player_assignments {
            let Some(player) = roster
                .iter()
                .find(|p| p.team_id == assignment.team_id && p.id == placement.player_id)
            else {
                warn!(
                    team_id = %assignment.team_id,
                    player_id = %placement.player_id,
                    "Player is not on the team roster"
                );
                failed += 1;
                continue;
            };

            let squad = placement
                .squad_assignment
                .or_else(|| stored_squad(stored, &assignment.team_id, &placement.player_id))
                .unwrap_or(Squad::ALL[0]);
            players.push(AssignedPlayer::new(player.clone(), squad, placement.position));
        }

        let team_name = roster
            .iter()
            .find(|p| p.team_id == assignment.team_id)
            .and_then(|p| p.team_name())
            .unwrap_or(UNKNOWN_TEAM_NAME)
            .to_string();
        teams.push(TeamAssignment {
            team_id: assignment.team_id.clone(),
            team_name,
            players,
        });
    }

    let summary = AssignmentSummary {
        message: "Manual assignment completed".to_string(),
        teams_processed: teams.len(),
        players_assigned: teams.iter().map(|t| t.players.len()).sum(),
        failed_assignments: failed,
    };
    Ok(AssignmentOutcome { teams, summary })
}

fn stored_squad(
    stored: &[TeamAssignment],
    team_id: &TeamId,
    player_id: &PlayerId,
) -> Option<Squad> {
    stored
        .iter()
        .filter(|t| &t.team_id == team_id)
        .flat_map(|t| &t.players)
        .find(|p| &p.player.id == player_id)
        .map(|p| p.squad_assignment)
}

/// Merge placements into the stored set, one player at a time.
///
/// A player in `updates` replaces the stored row with the same team and
/// player id; teammates not named in `updates` keep their stored squad and
/// position. Teams with no stored rows are appended.
pub fn merge_assignments(
    mut stored: Vec<TeamAssignment>,
    updates: Vec<TeamAssignment>,
) -> Vec<TeamAssignment> {
    for update in updates {
        let index = match stored.iter().position(|t| t.team_id == update.team_id) {
            Some(index) => index,
            None => {
                stored.push(TeamAssignment {
                    team_id: update.team_id.clone(),
                    team_name: update.team_name.clone(),
                    players: Vec::new(),
                });
                stored.len() - 1
            }
        };

        let team = &mut stored[index];
        for assigned in update.players {
            match team
                .players
                .iter_mut()
                .find(|p| p.player.id == assigned.player.id)
            {
                Some(existing) => *existing = assigned,
                None => team.players.push(assigned),
            }
        }
    }
    stored
}

/// How an assignment run is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "assignment_type", rename_all = "lowercase")]
pub enum AssignmentRequest {
    Auto,
    Manual {
        team_assignments: Vec<ManualAssignment>,
    },
}

fn find_tournament<D>(directory: &D, tournament_id: &str) -> Result<Tournament, RosterError>
where
    D: PlayerDirectory + ?Sized,
{
    directory
        .tournament(tournament_id)?
        .ok_or_else(|| RosterError::TournamentNotFound(tournament_id.to_string()))
}

/// Load a tournament and its roster, run the requested assignment and
/// persist the result.
///
/// Auto runs replace every stored assignment. Manual runs are merged over
/// the stored set, so callers sharing a sink must serialise runs for the
/// same tournament.
pub fn run_assignment<D, S>(
    directory: &D,
    sink: &S,
    tournament_id: &str,
    request: &AssignmentRequest,
    balance_by_tier: bool,
) -> Result<AssignmentSummary, RosterError>
where
    D: PlayerDirectory + ?Sized,
    S: ResultSink + ?Sized,
{
    let tournament = find_tournament(directory, tournament_id)?;
    let roster = directory.active_players(tournament_id)?;

    let (teams, summary) = match request {
        AssignmentRequest::Auto => {
            let outcome = auto_assign_tournament(&tournament, &roster, balance_by_tier)?;
            (outcome.teams, outcome.summary)
        }
        AssignmentRequest::Manual { team_assignments } => {
            let stored = sink.load(tournament_id)?;
            let outcome =
                apply_manual_assignments(&tournament, &roster, &stored, team_assignments)?;
            (merge_assignments(stored, outcome.teams), outcome.summary)
        }
    };
    sink.store(tournament_id, &teams)?;

    info!(
        tournament_id,
        teams = summary.teams_processed,
        players = summary.players_assigned,
        failed = summary.failed_assignments,
        "{}",
        summary.message
    );
    Ok(summary)
}

/// Stored teams paired with their validation reports.
#[derive(Debug, Clone, Serialize)]
pub struct TournamentAssignments {
    pub teams: Vec<TeamAssignment>,
    pub reports: Vec<ValidationReport>,
}

pub fn stored_assignments<S>(
    sink: &S,
    tournament_id: &str,
) -> Result<TournamentAssignments, RosterError>
where
    S: ResultSink + ?Sized,
{
    let teams = sink.load(tournament_id)?;
    let reports = teams.iter().map(validate_team_composition).collect();
    Ok(TournamentAssignments { teams, reports })
}

/// Headcounts for a tournament's draft board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftStatistics {
    pub total_teams: usize,
    pub total_players: usize,
    /// Keyed by tier label; players without a tier count as bronze
    pub players_by_tier: BTreeMap<String, usize>,
    pub players_by_position: BTreeMap<String, usize>,
    /// Players per confirmed team, rounded half up; 0 without teams
    pub avg_team_size: usize,
}

/// Count the active members of a tournament's confirmed teams.
pub fn draft_statistics(tournament: &Tournament, roster: &[Player]) -> DraftStatistics {
    let mut confirmed: Vec<&TeamId> = Vec::new();
    for team_id in &tournament.confirmed_team_ids {
        if !confirmed.contains(&team_id) {
            confirmed.push(team_id);
        }
    }

    let mut players_by_tier = BTreeMap::new();
    let mut players_by_position = BTreeMap::new();
    let mut total_players = 0;
    for player in roster.iter().filter(|p| tournament.is_confirmed(&p.team_id)) {
        let tier = player.tier.label().unwrap_or("BRONZE");
        *players_by_tier.entry(tier.to_string()).or_insert(0) += 1;
        *players_by_position
            .entry(player.position.as_str().to_string())
            .or_insert(0) += 1;
        total_players += 1;
    }

    let total_teams = confirmed.len();
    let avg_team_size = if total_teams == 0 {
        0
    } else {
        (2 * total_players + total_teams) / (2 * total_teams)
    };

    DraftStatistics {
        total_teams,
        total_players,
        players_by_tier,
        players_by_position,
        avg_team_size,
    }
}

/// Load a tournament's roster and compute its [`DraftStatistics`].
pub fn tournament_statistics<D>(
    directory: &D,
    tournament_id: &str,
) -> Result<DraftStatistics, RosterError>
where
    D: PlayerDirectory + ?Sized,
{
    let tournament = find_tournament(directory, tournament_id)?;
    let roster = directory.active_players(tournament_id)?;
    Ok(draft_statistics(&tournament, &roster))
}
