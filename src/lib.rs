//! Volleyball pickup session app: library with models, team balancing and roster storage.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use config::Config;
pub use logic::{
    add_player, check_in_by_name, distribute, distribute_with, eligible_players, filter_eligible,
    generate_teams, import_players, read_players_csv, register_player, update_player,
    write_players_csv, DistributeError, PlayerRecord, SessionError,
};
pub use models::{
    normalize_name, Distribution, Player, PlayerId, Roster, RosterError, Team, TieBreak,
};
pub use store::{JsonFileStore, MemoryStore, RosterStore, StoreError, StoreResult};
