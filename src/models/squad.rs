//! The eight fixed squads of a team.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// A squad name. The set is closed and its order is the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Squad {
    Alpha,
    Bravo,
    Charlie,
    Delta,
    Echo,
    Foxtrot,
    Golf,
    Hotel,
}

impl Squad {
    pub const COUNT: usize = 8;

    /// All squads in enumeration order.
    pub const ALL: [Squad; Squad::COUNT] = [
        Squad::Alpha,
        Squad::Bravo,
        Squad::Charlie,
        Squad::Delta,
        Squad::Echo,
        Squad::Foxtrot,
        Squad::Golf,
        Squad::Hotel,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Squad::Alpha => "ALPHA",
            Squad::Bravo => "BRAVO",
            Squad::Charlie => "CHARLIE",
            Squad::Delta => "DELTA",
            Squad::Echo => "ECHO",
            Squad::Foxtrot => "FOXTROT",
            Squad::Golf => "GOLF",
            Squad::Hotel => "HOTEL",
        }
    }
}

impl FromStr for Squad {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Squad::ALL
            .into_iter()
            .find(|squad| squad.as_str() == upper)
            .ok_or_else(|| format!("unknown squad: {}", s))
    }
}

impl std::fmt::Display for Squad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Occupancy counter per squad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquadCounts([u32; Squad::COUNT]);

impl SquadCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally the given squads.
    pub fn tally<I: IntoIterator<Item = Squad>>(squads: I) -> Self {
        let mut counts = Self::new();
        for squad in squads {
            counts[squad] += 1;
        }
        counts
    }

    /// The least-occupied squad; the earliest squad wins ties.
    pub fn least_loaded(&self) -> Squad {
        let mut best = Squad::Alpha;
        for squad in Squad::ALL {
            if self[squad] < self[best] {
                best = squad;
            }
        }
        best
    }

    /// Squads paired with their counts, in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (Squad, u32)> + '_ {
        Squad::ALL.into_iter().map(move |squad| (squad, self[squad]))
    }

    pub fn max(&self) -> u32 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    pub fn min(&self) -> u32 {
        self.0.iter().copied().min().unwrap_or(0)
    }
}

impl Index<Squad> for SquadCounts {
    type Output = u32;

    fn index(&self, squad: Squad) -> &u32 {
        &self.0[squad.index()]
    }
}

impl IndexMut<Squad> for SquadCounts {
    fn index_mut(&mut self, squad: Squad) -> &mut u32 {
        &mut self.0[squad.index()]
    }
}
