//! Session business logic: team distribution, eligibility, roster operations, CSV.

mod distribute;
mod eligibility;
mod roster_csv;
mod session;

pub use distribute::{distribute, distribute_with, DistributeError};
pub use eligibility::filter_eligible;
pub use roster_csv::{import_players, read_players_csv, write_players_csv, PlayerRecord};
pub use session::{
    add_player, check_in_by_name, eligible_players, generate_teams, register_player,
    update_player, SessionError,
};
