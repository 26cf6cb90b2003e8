//! Data structures for a pickup session: players, roster with check-ins, teams.

mod player;
mod roster;
mod team;

pub use player::{normalize_name, Player, PlayerId};
pub use roster::{Roster, RosterError};
pub use team::{Distribution, Team, TieBreak};
