//! Player skill tiers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Skill rank of a player, ordered by weight.
///
/// Labels outside the five known tiers are kept verbatim in
/// [`Tier::Unknown`] so they serialise back exactly as the directory
/// supplied them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tier {
    Diamond,
    Platinum,
    Gold,
    Silver,
    Bronze,
    /// Missing (`None`) or unrecognised tier label
    Unknown(Option<String>),
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Unknown(None)
    }
}

impl Tier {
    /// Priority weight of this tier. Unknown tiers weigh the same as bronze.
    pub fn weight(&self) -> u32 {
        match self {
            Tier::Diamond => 5,
            Tier::Platinum => 4,
            Tier::Gold => 3,
            Tier::Silver => 2,
            Tier::Bronze | Tier::Unknown(_) => 1,
        }
    }

    /// Wire label, `None` when the directory supplied no tier at all.
    pub fn label(&self) -> Option<&str> {
        match self {
            Tier::Diamond => Some("DIAMOND"),
            Tier::Platinum => Some("PLATINUM"),
            Tier::Gold => Some("GOLD"),
            Tier::Silver => Some("SILVER"),
            Tier::Bronze => Some("BRONZE"),
            Tier::Unknown(raw) => raw.as_deref(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Tier::Unknown(None))
    }

    /// Classify a raw label: known tiers match case-insensitively, anything
    /// else is kept as given.
    pub fn from_label(raw: Option<String>) -> Self {
        match raw {
            Some(label) => label.parse().unwrap_or(Tier::Unknown(Some(label))),
            None => Tier::Unknown(None),
        }
    }
}

impl Serialize for Tier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.label().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Tier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(Tier::from_label(raw))
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DIAMOND" => Ok(Tier::Diamond),
            "PLATINUM" => Ok(Tier::Platinum),
            "GOLD" => Ok(Tier::Gold),
            "SILVER" => Ok(Tier::Silver),
            "BRONZE" => Ok(Tier::Bronze),
            other => Err(format!("unknown tier: {}", other)),
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label().unwrap_or("UNKNOWN"))
    }
}
