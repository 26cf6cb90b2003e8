//! Property tests for the team distributor.

use proptest::prelude::*;
use volley_pickup_web::{distribute, Player};

fn roster(skills: &[f64]) -> Vec<Player> {
    skills
        .iter()
        .enumerate()
        .map(|(i, s)| Player::new(format!("P{i}"), *s))
        .collect()
}

proptest! {
    /// Property: every player lands in exactly one team
    #[test]
    fn prop_conserves_players(
        skills in prop::collection::vec(-50.0f64..100.0, 0..40),
        team_count in 1usize..10
    ) {
        let players = roster(&skills);
        let teams = distribute(&players, team_count).unwrap();

        let mut expected: Vec<_> = players.iter().map(|p| p.id).collect();
        let mut actual: Vec<_> = teams
            .iter()
            .flat_map(|t| t.players.iter().map(|p| p.id))
            .collect();
        expected.sort();
        actual.sort();
        prop_assert_eq!(actual, expected);
    }

    /// Property: exactly `team_count` teams, even when some stay empty
    #[test]
    fn prop_team_count(
        skills in prop::collection::vec(0.0f64..100.0, 0..40),
        team_count in 1usize..20
    ) {
        let teams = distribute(&roster(&skills), team_count).unwrap();
        prop_assert_eq!(teams.len(), team_count);
    }

    /// Property: team totals differ by at most the best player's skill
    #[test]
    fn prop_spread_bounded_by_top_skill(
        skills in prop::collection::vec(0.0f64..100.0, 1..40),
        team_count in 1usize..10
    ) {
        let teams = distribute(&roster(&skills), team_count).unwrap();
        let totals: Vec<f64> = teams.iter().map(|t| t.total_skill).collect();
        let max = totals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = totals.iter().cloned().fold(f64::INFINITY, f64::min);
        let top = skills.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(max - min <= top + 1e-9, "spread {} > top skill {}", max - min, top);
    }

    /// Property: running totals match the assigned players
    #[test]
    fn prop_totals_match_players(
        skills in prop::collection::vec(0.0f64..100.0, 0..30),
        team_count in 1usize..6
    ) {
        for team in distribute(&roster(&skills), team_count).unwrap() {
            let sum: f64 = team.players.iter().map(|p| p.skill).sum();
            prop_assert!((sum - team.total_skill).abs() < 1e-9);
        }
    }

    /// Property: same input, same output
    #[test]
    fn prop_deterministic(
        skills in prop::collection::vec(0u8..10, 0..30),
        team_count in 1usize..6
    ) {
        // small integer skills so ties are common
        let skills: Vec<f64> = skills.into_iter().map(f64::from).collect();
        let players = roster(&skills);
        prop_assert_eq!(
            distribute(&players, team_count).unwrap(),
            distribute(&players, team_count).unwrap()
        );
    }
}
