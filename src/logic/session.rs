//! Session operations over a roster store: registration, check-in, team generation.

use crate::logic::distribute::{distribute_with, DistributeError};
use crate::logic::eligibility::filter_eligible;
use crate::models::{Distribution, Player, PlayerId, RosterError, TieBreak};
use crate::store::{RosterStore, StoreError};
use rand::Rng;
use thiserror::Error;

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Distribute(#[from] DistributeError),
}

impl From<RosterError> for SessionError {
    fn from(err: RosterError) -> Self {
        SessionError::Store(StoreError::Roster(err))
    }
}

/// Self-registration: new player with skill 0, waiting for an admin to rate them.
pub fn register_player(store: &dyn RosterStore, name: &str) -> Result<Player, SessionError> {
    let player = Player::unrated(name.trim());
    store.upsert_player(player.clone())?;
    log::info!("Registered player '{}' (pending skill)", player.name);
    Ok(player)
}

/// Admin registration with an explicit skill.
pub fn add_player(store: &dyn RosterStore, name: &str, skill: f64) -> Result<Player, SessionError> {
    let player = Player::new(name.trim(), skill);
    store.upsert_player(player.clone())?;
    log::info!("Added player '{}' with skill {}", player.name, player.skill);
    Ok(player)
}

/// Admin edit of name and skill. Check-ins follow the id, so renaming keeps the player checked in.
/// A player deleted concurrently stays deleted: the edit fails with `PlayerNotFound`.
pub fn update_player(
    store: &dyn RosterStore,
    id: PlayerId,
    name: &str,
    skill: f64,
) -> Result<Player, SessionError> {
    let player = Player {
        id,
        name: name.trim().to_string(),
        skill,
    };
    store.update_player(player.clone())?;
    log::info!("Updated player {} -> '{}' skill {}", id, player.name, player.skill);
    Ok(player)
}

/// Self check-in by typed name. Already checked in is not an error.
pub fn check_in_by_name(store: &dyn RosterStore, name: &str) -> Result<Player, SessionError> {
    let player = store
        .find_player_by_name(name)?
        .ok_or_else(|| RosterError::PlayerNameNotFound(name.trim().to_string()))?;
    store.set_checked_in(player.id, true)?;
    log::info!("Checked in '{}'", player.name);
    Ok(player)
}

/// Checked-in players in roster order.
pub fn eligible_players(store: &dyn RosterStore) -> Result<Vec<Player>, SessionError> {
    let roster = store.list_players()?;
    let checked_in = store.list_checked_in()?;
    Ok(filter_eligible(&roster, &checked_in))
}

/// Distribute the checked-in players into `team_count` teams and store the result as the last
/// distribution.
pub fn generate_teams<R: Rng + ?Sized>(
    store: &dyn RosterStore,
    team_count: usize,
    tie_break: TieBreak,
    rng: &mut R,
) -> Result<Distribution, SessionError> {
    let eligible = eligible_players(store)?;
    let teams = distribute_with(&eligible, team_count, tie_break, rng)?;
    let distribution = Distribution::new(teams, tie_break);
    log::info!(
        "Generated {} teams from {} players ({} tie-break, spread {})",
        team_count,
        eligible.len(),
        tie_break,
        distribution.skill_spread()
    );
    store.save_distribution(distribution.clone())?;
    Ok(distribution)
}
