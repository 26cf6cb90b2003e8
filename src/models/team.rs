//! Team and Distribution (the distributor's output and its persisted record).

use crate::models::player::Player;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How players with equal skill are ordered before the greedy fill.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Equal-skill players keep their input (roster) order. Deterministic.
    #[default]
    Stable,
    /// Equal-skill players are shuffled with the caller's RNG.
    Shuffled,
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::Stable => write!(f, "stable"),
            TieBreak::Shuffled => write!(f, "shuffled"),
        }
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stable" => Ok(TieBreak::Stable),
            "shuffled" | "random" => Ok(TieBreak::Shuffled),
            other => Err(format!("unknown tie-break mode '{other}'")),
        }
    }
}

/// One team: players in assignment order plus their summed skill.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub players: Vec<Player>,
    pub total_skill: f64,
}

impl Team {
    /// Append a player and add their skill to the running total.
    pub fn push(&mut self, player: Player) {
        self.total_skill += player.skill;
        self.players.push(player);
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// A generated set of teams, kept as "the last distribution" until the next one replaces it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub teams: Vec<Team>,
    pub tie_break: TieBreak,
    pub generated_at: DateTime<Utc>,
}

impl Distribution {
    pub fn new(teams: Vec<Team>, tie_break: TieBreak) -> Self {
        Self {
            teams,
            tie_break,
            generated_at: Utc::now(),
        }
    }

    /// Largest minus smallest team total (0 for no teams).
    pub fn skill_spread(&self) -> f64 {
        if self.teams.is_empty() {
            return 0.0;
        }
        let (min, max) = self
            .teams
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
                (lo.min(t.total_skill), hi.max(t.total_skill))
            });
        max - min
    }
}
