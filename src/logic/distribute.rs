//! Team distribution: greedy longest-processing-time fill over skill.

use crate::models::{Player, Team, TieBreak};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Errors from the distributor.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum DistributeError {
    #[error("Team count must be at least 1 (got {0})")]
    InvalidTeamCount(usize),
}

/// Split `players` into `team_count` teams with balanced total skill, keeping equal-skill players
/// in input order. Deterministic.
///
/// Zero players yields `team_count` empty teams.
pub fn distribute(players: &[Player], team_count: usize) -> Result<Vec<Team>, DistributeError> {
    fill_teams(players.to_vec(), team_count)
}

/// Split `players` into `team_count` teams with the given tie-break mode.
///
/// 1. Order players by skill, descending (ties per `tie_break`; `rng` is only used by
///    [`TieBreak::Shuffled`]).
/// 2. Give each player in turn to the team with the smallest running total, lowest index on ties.
pub fn distribute_with<R: Rng + ?Sized>(
    players: &[Player],
    team_count: usize,
    tie_break: TieBreak,
    rng: &mut R,
) -> Result<Vec<Team>, DistributeError> {
    let mut ordered = players.to_vec();
    if tie_break == TieBreak::Shuffled && team_count > 0 {
        ordered.shuffle(rng);
    }
    fill_teams(ordered, team_count)
}

/// Stable-sort `ordered` by skill, descending, then hand out players greedily.
fn fill_teams(mut ordered: Vec<Player>, team_count: usize) -> Result<Vec<Team>, DistributeError> {
    if team_count == 0 {
        return Err(DistributeError::InvalidTeamCount(team_count));
    }

    // sort_by is stable: ties keep the order from above
    ordered.sort_by(|a, b| b.skill.total_cmp(&a.skill));

    let mut teams = vec![Team::default(); team_count];
    for player in ordered {
        let idx = lightest_team(&teams);
        log::debug!(
            "Assigning {} (skill {}) to team {} (total {})",
            player.name,
            player.skill,
            idx,
            teams[idx].total_skill
        );
        teams[idx].push(player);
    }
    Ok(teams)
}

/// Index of the team with the strictly smallest total; the first one wins ties.
fn lightest_team(teams: &[Team]) -> usize {
    let mut min_idx = 0;
    for (i, team) in teams.iter().enumerate().skip(1) {
        if team.total_skill < teams[min_idx].total_skill {
            min_idx = i;
        }
    }
    min_idx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team_with_total(total: f64) -> Team {
        Team {
            players: Vec::new(),
            total_skill: total,
        }
    }

    #[test]
    fn lightest_team_prefers_lowest_index_on_tie() {
        let teams = vec![team_with_total(5.0), team_with_total(3.0), team_with_total(3.0)];
        assert_eq!(lightest_team(&teams), 1);
    }

    #[test]
    fn lightest_team_single() {
        assert_eq!(lightest_team(&[team_with_total(9.0)]), 0);
    }

    #[test]
    fn stable_mode_leaves_rng_untouched() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let players: Vec<Player> = [("A", 3.0), ("B", 3.0), ("C", 1.0)]
            .into_iter()
            .map(|(name, skill)| Player::new(name, skill))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);
        let teams = distribute_with(&players, 2, TieBreak::Stable, &mut rng).unwrap();

        assert_eq!(teams, distribute(&players, 2).unwrap());
        assert_eq!(rng.gen::<u64>(), StdRng::seed_from_u64(7).gen::<u64>());
    }
}
