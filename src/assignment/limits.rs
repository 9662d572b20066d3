//! Position capacity limits scaled to team size.

use crate::models::{Position, Squad};

/// Specialised-slot allowance for a team: one per full squad's worth of
/// players, never less than one.
pub fn max_specialized(team_size: usize) -> u32 {
    (team_size / Squad::COUNT).max(1) as u32
}

/// Per-position capacity for one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionLimits {
    pub infantry: u32,
    pub armor: u32,
    pub heli: u32,
    pub jet: u32,
    pub support: u32,
}

impl PositionLimits {
    pub fn for_team_size(team_size: usize) -> Self {
        let specialized = max_specialized(team_size);
        Self {
            infantry: team_size as u32,
            armor: specialized * 2,
            heli: specialized,
            jet: specialized,
            support: (team_size / 16).max(1) as u32,
        }
    }

    pub fn limit(&self, position: Position) -> u32 {
        match position {
            Position::Infantry => self.infantry,
            Position::Armor => self.armor,
            Position::Heli => self.heli,
            Position::Jet => self.jet,
            Position::Support => self.support,
        }
    }
}
