//! In-game position specialisations.

use serde::{Deserialize, Deserializer, Serialize};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// A player's role on the battlefield.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    /// Uncapped fallback position
    #[default]
    Infantry,
    Armor,
    Heli,
    Jet,
    Support,
}

impl Position {
    pub const COUNT: usize = 5;

    pub const ALL: [Position; Position::COUNT] = [
        Position::Infantry,
        Position::Armor,
        Position::Heli,
        Position::Jet,
        Position::Support,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Infantry => "INFANTRY",
            Position::Armor => "ARMOR",
            Position::Heli => "HELI",
            Position::Jet => "JET",
            Position::Support => "SUPPORT",
        }
    }

    /// Lenient serde adapter for preferred positions: anything outside the
    /// closed set, including `null`, becomes infantry.
    pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Position::ALL
            .into_iter()
            .find(|position| position.as_str() == upper)
            .ok_or_else(|| format!("unknown position: {}", s))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Occupancy counter per position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionCounts([u32; Position::COUNT]);

impl PositionCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tally<I: IntoIterator<Item = Position>>(positions: I) -> Self {
        let mut counts = Self::new();
        for position in positions {
            counts[position] += 1;
        }
        counts
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, u32)> + '_ {
        Position::ALL
            .into_iter()
            .map(move |position| (position, self[position]))
    }
}

impl Index<Position> for PositionCounts {
    type Output = u32;

    fn index(&self, position: Position) -> &u32 {
        &self.0[position.index()]
    }
}

impl IndexMut<Position> for PositionCounts {
    fn index_mut(&mut self, position: Position) -> &mut u32 {
        &mut self.0[position.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Preferred {
        #[serde(default, deserialize_with = "Position::deserialize_lenient")]
        position: Position,
    }

    #[test]
    fn test_position_serialization() {
        let json = serde_json::to_string(&Position::Heli).unwrap();
        assert_eq!(json, "\"HELI\"");
        let parsed: Position = serde_json::from_str("\"SUPPORT\"").unwrap();
        assert_eq!(parsed, Position::Support);
    }

    #[test]
    fn test_lenient_position_falls_back_to_infantry() {
        let p: Preferred = serde_json::from_str(r#"{"position": "SNIPER"}"#).unwrap();
        assert_eq!(p.position, Position::Infantry);

        let p: Preferred = serde_json::from_str(r#"{"position": null}"#).unwrap();
        assert_eq!(p.position, Position::Infantry);

        let p: Preferred = serde_json::from_str("{}").unwrap();
        assert_eq!(p.position, Position::Infantry);

        let p: Preferred = serde_json::from_str(r#"{"position": "jet"}"#).unwrap();
        assert_eq!(p.position, Position::Jet);
    }

    #[test]
    fn test_position_counts() {
        let counts = PositionCounts::tally([Position::Armor, Position::Armor, Position::Jet]);
        assert_eq!(counts[Position::Armor], 2);
        assert_eq!(counts[Position::Jet], 1);
        assert_eq!(counts[Position::Infantry], 0);
        assert_eq!(counts.iter().count(), Position::COUNT);
    }
}
