//! Player records and per-team assignment output.

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use super::{PlayerId, Position, Squad, TeamId, Tier};

/// Fallback name for a team group whose first member carries no team name.
pub const UNKNOWN_TEAM_NAME: &str = "Unknown Team";

/// Leadership role of a player within their team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamRole {
    Captain,
    CoLeader,
    #[default]
    Member,
}

impl TeamRole {
    pub fn is_captain(&self) -> bool {
        matches!(self, TeamRole::Captain)
    }

    /// Lenient serde adapter: unrecognised roles are plain members.
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

impl FromStr for TeamRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CAPTAIN" => Ok(TeamRole::Captain),
            "CO_LEADER" => Ok(TeamRole::CoLeader),
            "MEMBER" => Ok(TeamRole::Member),
            other => Err(format!("unknown team role: {}", other)),
        }
    }
}

impl std::fmt::Display for TeamRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamRole::Captain => write!(f, "CAPTAIN"),
            TeamRole::CoLeader => write!(f, "CO_LEADER"),
            TeamRole::Member => write!(f, "MEMBER"),
        }
    }
}

/// An active team member as supplied by the player directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    pub username: String,

    /// Skill tier; unknown labels weigh 1 and are kept verbatim
    #[serde(default, skip_serializing_if = "Tier::is_missing")]
    pub tier: Tier,

    /// Preferred position
    #[serde(default, deserialize_with = "Position::deserialize_lenient")]
    pub position: Position,

    pub team_id: TeamId,

    #[serde(default)]
    pub team_name: Option<String>,

    /// Leadership role within the team
    #[serde(default, deserialize_with = "TeamRole::deserialize_lenient")]
    pub role: TeamRole,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, username: &str, team_id: impl Into<TeamId>) -> Self {
        Self {
            id: id.into(),
            username: username.to_string(),
            tier: Tier::default(),
            position: Position::default(),
            team_id: team_id.into(),
            team_name: None,
            role: TeamRole::default(),
        }
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_role(mut self, role: TeamRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_team_name(mut self, name: &str) -> Self {
        self.team_name = Some(name.to_string());
        self
    }

    /// Team name, or `None` when absent or blank.
    pub fn team_name(&self) -> Option<&str> {
        self.team_name.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// A player with the squad and position computed for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedPlayer {
    #[serde(flatten)]
    pub player: Player,

    pub squad_assignment: Squad,

    pub assigned_position: Position,
}

impl AssignedPlayer {
    pub fn new(player: Player, squad: Squad, position: Position) -> Self {
        Self {
            player,
            squad_assignment: squad,
            assigned_position: position,
        }
    }
}

/// Assignment output for one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAssignment {
    pub team_id: TeamId,
    pub team_name: String,
    pub players: Vec<AssignedPlayer>,
}

impl TeamAssignment {
    /// Sum of tier weights across the team.
    pub fn tier_score(&self) -> u32 {
        self.players.iter().map(|p| p.player.tier.weight()).sum()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_deserialize_full_record() {
        let json = r#"{
            "id": "p1",
            "username": "sgt_rock",
            "tier": "DIAMOND",
            "position": "ARMOR",
            "team_id": "t1",
            "team_name": "Iron Wolves",
            "role": "CAPTAIN"
        }"#;
        let player: Player = serde_json::from_str(json).unwrap();

        assert_eq!(player.id.as_str(), "p1");
        assert_eq!(player.tier, Tier::Diamond);
        assert_eq!(player.position, Position::Armor);
        assert_eq!(player.team_name(), Some("Iron Wolves"));
        assert!(player.role.is_captain());
    }

    #[test]
    fn test_player_deserialize_sparse_record() {
        let json = r#"{"id": "p2", "username": "rookie", "team_id": "t1", "tier": null}"#;
        let player: Player = serde_json::from_str(json).unwrap();

        assert_eq!(player.tier, Tier::Unknown(None));
        assert_eq!(player.position, Position::Infantry);
        assert_eq!(player.role, TeamRole::Member);
        assert_eq!(player.team_name(), None);
    }

    #[test]
    fn test_unrecognised_tier_survives_assignment() {
        let json = r#"{"id": "p4", "username": "odd", "team_id": "t1", "tier": "MYTHIC"}"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.tier.weight(), 1);

        let assigned = AssignedPlayer::new(player, Squad::Alpha, Position::Infantry);
        let value = serde_json::to_value(&assigned).unwrap();
        assert_eq!(value["tier"], "MYTHIC");
    }

    #[test]
    fn test_unknown_role_is_member() {
        let json = r#"{"id": "p3", "username": "x", "team_id": "t1", "role": "COACH"}"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.role, TeamRole::Member);
    }

    #[test]
    fn test_blank_team_name_is_none() {
        let player = Player::new("p1", "a", "t1").with_team_name("   ");
        assert_eq!(player.team_name(), None);
    }

    #[test]
    fn test_assigned_player_serializes_flat() {
        let player = Player::new("p1", "medic", "t1").with_tier(Tier::Gold);
        let assigned = AssignedPlayer::new(player, Squad::Bravo, Position::Support);
        let value = serde_json::to_value(&assigned).unwrap();

        assert_eq!(value["username"], "medic");
        assert_eq!(value["tier"], "GOLD");
        assert_eq!(value["squad_assignment"], "BRAVO");
        assert_eq!(value["assigned_position"], "SUPPORT");

        let parsed: AssignedPlayer = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, assigned);
    }

    #[test]
    fn test_team_tier_score() {
        let team = TeamAssignment {
            team_id: "t1".into(),
            team_name: "Alpha Co".to_string(),
            players: vec![
                AssignedPlayer::new(
                    Player::new("a", "a", "t1").with_tier(Tier::Diamond),
                    Squad::Alpha,
                    Position::Infantry,
                ),
                AssignedPlayer::new(
                    Player::new("b", "b", "t1"),
                    Squad::Bravo,
                    Position::Infantry,
                ),
            ],
        };
        assert_eq!(team.tier_score(), 6);
        assert_eq!(team.player_count(), 2);
    }

    #[test]
    fn test_team_role_display() {
        assert_eq!(TeamRole::CoLeader.to_string(), "CO_LEADER");
        assert_eq!("co_leader".parse::<TeamRole>(), Ok(TeamRole::CoLeader));
    }
}
