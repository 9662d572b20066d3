//! Squad and position assignment engine.
//!
//! Pure functions over an in-memory roster:
//! - Greedy squad/position placement per team
//! - Tier score standings across teams
//! - Composition validation against competitive-balance rules
//! - Recommended templates per game mode

mod composition;
mod limits;
mod validate;

pub use composition::*;
pub use limits::*;
pub use validate::*;

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{
    AssignedPlayer, Player, Position, PositionCounts, SquadCounts, TeamAssignment, TeamId,
    UNKNOWN_TEAM_NAME,
};

/// Errors raised by the assignment engine.
#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("Unknown game mode: {0:?} (expected 16v16, 32v32 or 64v64)")]
    UnknownGameMode(String),
}

/// Assign every player to a squad and a position, team by team.
///
/// Teams are returned in the order their id first appears in `players`; the
/// member order inside a team only matters for tie-breaks.
pub fn auto_assign_teams(players: &[Player]) -> Vec<TeamAssignment> {
    group_by_team(players)
        .into_iter()
        .map(|(team_id, members)| {
            let team_name = members
                .first()
                .and_then(|p| p.team_name())
                .unwrap_or(UNKNOWN_TEAM_NAME)
                .to_string();
            let players = assign_team(&members);
            debug!(
                team_id = %team_id,
                team_name = %team_name,
                players = players.len(),
                "Assigned team"
            );
            TeamAssignment {
                team_id,
                team_name,
                players,
            }
        })
        .collect()
}

fn group_by_team(players: &[Player]) -> Vec<(TeamId, Vec<&Player>)> {
    let mut groups: Vec<(TeamId, Vec<&Player>)> = Vec::new();
    let mut index: HashMap<&TeamId, usize> = HashMap::new();

    for player in players {
        match index.get(&player.team_id) {
            Some(&i) => groups[i].1.push(player),
            None => {
                index.insert(&player.team_id, groups.len());
                groups.push((player.team_id.clone(), vec![player]));
            }
        }
    }

    groups
}

/// Captains first, then heavier tiers. Stable, so ties keep roster order.
fn priority_order<'a>(members: &[&'a Player]) -> Vec<&'a Player> {
    let mut sorted = members.to_vec();
    sorted.sort_by_key(|p| (!p.role.is_captain(), Reverse(p.tier.weight())));
    sorted
}

/// Single greedy pass over one team: least-loaded squad, preferred position
/// while it has capacity, infantry otherwise.
fn assign_team(members: &[&Player]) -> Vec<AssignedPlayer> {
    let limits = PositionLimits::for_team_size(members.len());
    let mut squads = SquadCounts::new();
    let mut positions = PositionCounts::new();

    priority_order(members)
        .into_iter()
        .map(|player| {
            let squad = squads.least_loaded();
            let position = if positions[player.position] < limits.limit(player.position) {
                player.position
            } else {
                Position::Infantry
            };

            squads[squad] += 1;
            positions[position] += 1;

            AssignedPlayer::new(player.clone(), squad, position)
        })
        .collect()
}

/// Tier strength of one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTierStats {
    pub team_id: TeamId,
    pub team_name: String,
    pub tier_score: u32,
    pub player_count: usize,
}

/// Teams ordered weakest first by summed tier weight.
pub fn tier_standings(teams: &[TeamAssignment]) -> Vec<TeamTierStats> {
    let mut stats: Vec<TeamTierStats> = teams
        .iter()
        .map(|team| TeamTierStats {
            team_id: team.team_id.clone(),
            team_name: team.team_name.clone(),
            tier_score: team.tier_score(),
            player_count: team.player_count(),
        })
        .collect();
    stats.sort_by_key(|s| s.tier_score);
    stats
}

/// Rank teams by tier strength and return the assignments.
///
/// Players are not moved between teams: the result is `teams` unchanged. The
/// standings are only logged.
// TODO: redistribute players between teams once a rebalancing rule is agreed.
pub fn balance_teams_by_tier(teams: Vec<TeamAssignment>) -> Vec<TeamAssignment> {
    for stats in tier_standings(&teams) {
        debug!(
            team_id = %stats.team_id,
            tier_score = stats.tier_score,
            players = stats.player_count,
            "Tier standing"
        );
    }
    teams
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Squad, TeamRole, Tier};
    use pretty_assertions::assert_eq;

    fn player(id: &str, team: &str) -> Player {
        Player::new(id, id, team).with_team_name(&format!("Team {}", team))
    }

    fn ids(team: &TeamAssignment) -> Vec<&str> {
        team.players.iter().map(|p| p.player.id.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(auto_assign_teams(&[]).is_empty());
    }

    #[test]
    fn test_single_player_team() {
        let teams = auto_assign_teams(&[player("solo", "t1").with_position(Position::Jet)]);
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].team_name, "Team t1");
        assert_eq!(teams[0].players[0].squad_assignment, Squad::Alpha);
        assert_eq!(teams[0].players[0].assigned_position, Position::Jet);
    }

    #[test]
    fn test_teams_in_first_seen_order() {
        let players = vec![
            player("a1", "b"),
            player("b1", "a"),
            player("a2", "b"),
            player("c1", "c"),
        ];
        let teams = auto_assign_teams(&players);
        let team_ids: Vec<&str> = teams.iter().map(|t| t.team_id.as_str()).collect();
        assert_eq!(team_ids, vec!["b", "a", "c"]);
        assert_eq!(ids(&teams[0]), vec!["a1", "a2"]);
    }

    #[test]
    fn test_missing_team_name_defaults() {
        let players = vec![Player::new("p1", "p1", "t9"), player("p2", "t9")];
        let teams = auto_assign_teams(&players);
        assert_eq!(teams[0].team_name, UNKNOWN_TEAM_NAME);
    }

    #[test]
    fn test_captain_goes_first_into_alpha() {
        let players = vec![
            player("m1", "t1").with_tier(Tier::Gold),
            player("m2", "t1").with_tier(Tier::Gold),
            player("cap", "t1")
                .with_tier(Tier::Gold)
                .with_role(TeamRole::Captain),
            player("m3", "t1").with_tier(Tier::Gold),
        ];
        let teams = auto_assign_teams(&players);
        let first = &teams[0].players[0];
        assert_eq!(first.player.id.as_str(), "cap");
        assert_eq!(first.squad_assignment, Squad::Alpha);
        assert_eq!(ids(&teams[0]), vec!["cap", "m1", "m2", "m3"]);
    }

    #[test]
    fn test_priority_captains_then_tier_stable() {
        let players = vec![
            player("bronze", "t1").with_tier(Tier::Bronze),
            player("gold_a", "t1").with_tier(Tier::Gold),
            player("cap_silver", "t1")
                .with_tier(Tier::Silver)
                .with_role(TeamRole::Captain),
            player("diamond", "t1").with_tier(Tier::Diamond),
            player("unknown", "t1"),
            player("gold_b", "t1").with_tier(Tier::Gold),
            player("cap_bronze", "t1")
                .with_tier(Tier::Bronze)
                .with_role(TeamRole::Captain),
            player("co_lead", "t1")
                .with_tier(Tier::Platinum)
                .with_role(TeamRole::CoLeader),
        ];
        let teams = auto_assign_teams(&players);
        assert_eq!(
            ids(&teams[0]),
            vec![
                "cap_silver",
                "cap_bronze",
                "diamond",
                "co_lead",
                "gold_a",
                "gold_b",
                "bronze",
                "unknown",
            ]
        );
    }

    #[test]
    fn test_squads_fill_evenly_in_order() {
        let players: Vec<Player> = (0..10).map(|i| player(&format!("p{}", i), "t1")).collect();
        let teams = auto_assign_teams(&players);
        let squads: Vec<Squad> = teams[0]
            .players
            .iter()
            .map(|p| p.squad_assignment)
            .collect();
        let mut expected = Squad::ALL.to_vec();
        expected.extend([Squad::Alpha, Squad::Bravo]);
        assert_eq!(squads, expected);
    }

    #[test]
    fn test_squad_spread_at_most_one() {
        for size in [1usize, 7, 8, 9, 23, 32, 64, 65] {
            let players: Vec<Player> = (0..size)
                .map(|i| player(&format!("p{}", i), "t1"))
                .collect();
            let teams = auto_assign_teams(&players);
            let counts =
                SquadCounts::tally(teams[0].players.iter().map(|p| p.squad_assignment));
            assert!(
                counts.max() - counts.min() <= 1,
                "size {} spread {:?}",
                size,
                counts
            );
        }
    }

    #[test]
    fn test_position_caps_overflow_to_infantry() {
        // 16 players: armor 4, heli 2, jet 2, support 1
        let players: Vec<Player> = (0..16)
            .map(|i| {
                let position = match i % 4 {
                    0 => Position::Armor,
                    1 => Position::Heli,
                    2 => Position::Jet,
                    _ => Position::Support,
                };
                player(&format!("p{}", i), "t1").with_position(position)
            })
            .collect();
        let teams = auto_assign_teams(&players);
        let counts =
            PositionCounts::tally(teams[0].players.iter().map(|p| p.assigned_position));

        assert_eq!(counts[Position::Armor], 4);
        assert_eq!(counts[Position::Heli], 2);
        assert_eq!(counts[Position::Jet], 2);
        assert_eq!(counts[Position::Support], 1);
        assert_eq!(counts[Position::Infantry], 7);
    }

    #[test]
    fn test_higher_tier_wins_contested_slot() {
        let players = vec![
            player("low", "t1")
                .with_tier(Tier::Bronze)
                .with_position(Position::Heli),
            player("high", "t1")
                .with_tier(Tier::Diamond)
                .with_position(Position::Heli),
        ];
        let teams = auto_assign_teams(&players);
        let by_id: HashMap<&str, Position> = teams[0]
            .players
            .iter()
            .map(|p| (p.player.id.as_str(), p.assigned_position))
            .collect();
        assert_eq!(by_id["high"], Position::Heli);
        assert_eq!(by_id["low"], Position::Infantry);
    }

    #[test]
    fn test_deterministic() {
        let players: Vec<Player> = (0..40)
            .map(|i| {
                let tier = [Tier::Bronze, Tier::Gold, Tier::Diamond][i % 3].clone();
                let position = Position::ALL[i % Position::COUNT];
                player(&format!("p{}", i), ["t1", "t2"][i % 2])
                    .with_tier(tier)
                    .with_position(position)
            })
            .collect();
        assert_eq!(auto_assign_teams(&players), auto_assign_teams(&players));
    }

    #[test]
    fn test_grouping_independent_of_interleaving() {
        let t1: Vec<Player> = (0..5)
            .map(|i| player(&format!("a{}", i), "t1").with_position(Position::Armor))
            .collect();
        let t2: Vec<Player> = (0..5)
            .map(|i| player(&format!("b{}", i), "t2").with_position(Position::Jet))
            .collect();

        let partitioned: Vec<Player> = t1.iter().chain(t2.iter()).cloned().collect();
        let interleaved: Vec<Player> = t1
            .iter()
            .zip(t2.iter())
            .flat_map(|(a, b)| [a.clone(), b.clone()])
            .collect();

        assert_eq!(
            auto_assign_teams(&partitioned),
            auto_assign_teams(&interleaved)
        );
    }

    #[test]
    fn test_input_not_mutated() {
        let players = vec![
            player("p1", "t1").with_position(Position::Jet),
            player("p2", "t1").with_position(Position::Jet),
        ];
        let before = players.clone();
        let _ = auto_assign_teams(&players);
        assert_eq!(players, before);
    }

    #[test]
    fn test_tier_standings_sorted_ascending() {
        let players = vec![
            player("a", "strong").with_tier(Tier::Diamond),
            player("b", "strong").with_tier(Tier::Diamond),
            player("c", "weak").with_tier(Tier::Bronze),
            player("d", "mid").with_tier(Tier::Gold),
        ];
        let teams = auto_assign_teams(&players);
        let standings = tier_standings(&teams);
        let order: Vec<(&str, u32)> = standings
            .iter()
            .map(|s| (s.team_id.as_str(), s.tier_score))
            .collect();
        assert_eq!(order, vec![("weak", 1), ("mid", 3), ("strong", 10)]);
        assert_eq!(standings[2].player_count, 2);
    }

    #[test]
    fn test_balance_is_identity() {
        let players = vec![
            player("a", "strong").with_tier(Tier::Diamond),
            player("c", "weak").with_tier(Tier::Bronze),
        ];
        let teams = auto_assign_teams(&players);
        let balanced = balance_teams_by_tier(teams.clone());
        assert_eq!(balanced, teams);
    }
}
