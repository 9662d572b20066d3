//! Recommended squad templates per game mode.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::str::FromStr;

use super::AssignmentError;
use crate::models::{Position, PositionCounts};

/// Supported match sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[serde(rename = "16v16")]
    Small,
    #[serde(rename = "32v32")]
    Medium,
    #[serde(rename = "64v64")]
    Large,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Small, GameMode::Medium, GameMode::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Small => "16v16",
            GameMode::Medium => "32v32",
            GameMode::Large => "64v64",
        }
    }

    /// Players per side.
    pub fn team_size(&self) -> usize {
        match self {
            GameMode::Small => 16,
            GameMode::Medium => 32,
            GameMode::Large => 64,
        }
    }
}

impl FromStr for GameMode {
    type Err = AssignmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| AssignmentError::UnknownGameMode(s.to_string()))
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommended squad layout for a mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SquadComposition {
    pub recommended_squads: u32,
    pub squad_size: u32,
    #[serde(serialize_with = "serialize_distribution")]
    pub position_distribution: PositionCounts,
}

fn serialize_distribution<S>(counts: &PositionCounts, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(Position::COUNT))?;
    for (position, count) in counts.iter() {
        map.serialize_entry(position.as_str(), &count)?;
    }
    map.end()
}

fn distribution(infantry: u32, armor: u32, heli: u32, jet: u32, support: u32) -> PositionCounts {
    let mut counts = PositionCounts::new();
    counts[Position::Infantry] = infantry;
    counts[Position::Armor] = armor;
    counts[Position::Heli] = heli;
    counts[Position::Jet] = jet;
    counts[Position::Support] = support;
    counts
}

/// Fixed template for a game mode.
pub fn generate_squad_compositions(mode: GameMode) -> SquadComposition {
    match mode {
        GameMode::Small => SquadComposition {
            recommended_squads: 2,
            squad_size: 8,
            position_distribution: distribution(5, 1, 1, 1, 0),
        },
        GameMode::Medium => SquadComposition {
            recommended_squads: 4,
            squad_size: 8,
            position_distribution: distribution(20, 6, 3, 2, 1),
        },
        GameMode::Large => SquadComposition {
            recommended_squads: 8,
            squad_size: 8,
            position_distribution: distribution(40, 12, 6, 4, 2),
        },
    }
}

/// Template lookup by mode label. Labels outside the supported modes are an
/// error; there is no fallback template.
pub fn squad_composition_for(mode: &str) -> Result<SquadComposition, AssignmentError> {
    let mode: GameMode = mode.parse()?;
    Ok(generate_squad_compositions(mode))
}
