//! Competitive-balance checks for a team's composition.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::limits::max_specialized;
use crate::models::{Position, PositionCounts, Squad, SquadCounts, TeamAssignment};

/// Outcome of [`validate_team_composition`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ValidationReport {
    fn flag(&mut self, issue: String, suggestion: String) {
        self.issues.push(issue);
        self.suggestions.push(suggestion);
    }
}

/// Infantry floor: 40% of the roster, at least four.
pub fn min_infantry(team_size: usize) -> u32 {
    ((team_size * 2 / 5) as u32).max(4)
}

/// Largest squad tolerated: one and a half times the even share, rounded up.
pub fn max_squad_size(team_size: usize) -> u32 {
    (team_size * 3).div_ceil(Squad::COUNT * 2) as u32
}

/// Check a team against the infantry floor, the specialised-role caps and
/// squad balance. Violations are reported, never raised.
pub fn validate_team_composition(team: &TeamAssignment) -> ValidationReport {
    let team_size = team.players.len();
    let positions = PositionCounts::tally(team.players.iter().map(|p| p.assigned_position));
    let squads = SquadCounts::tally(team.players.iter().map(|p| p.squad_assignment));

    let mut report = ValidationReport::default();

    let required = min_infantry(team_size);
    if positions[Position::Infantry] < required {
        report.flag(
            format!("Team needs at least {} infantry players", required),
            "Reassign some specialized roles to infantry".to_string(),
        );
    }

    let specialized = max_specialized(team_size);

    if positions[Position::Armor] > specialized * 2 {
        report.flag(
            "Too many armor players".to_string(),
            "Limit armor players to maintain balance".to_string(),
        );
    }

    if positions[Position::Heli] > specialized {
        report.flag(
            "Too many helicopter pilots".to_string(),
            "Limit helicopter pilots to one per squad".to_string(),
        );
    }

    if positions[Position::Jet] > specialized {
        report.flag(
            "Too many jet pilots".to_string(),
            "Limit jet pilots to maintain air superiority balance".to_string(),
        );
    }

    let max_squad = max_squad_size(team_size);
    for (squad, count) in squads.iter() {
        if count > max_squad {
            report.flag(
                format!("Squad {} is oversized ({} players)", squad, count),
                format!("Redistribute players from {} to other squads", squad),
            );
        }
    }

    report.valid = report.issues.is_empty();
    debug!(
        team_id = %team.team_id,
        issues = report.issues.len(),
        "Validated team composition"
    );
    report
}
