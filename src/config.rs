//! Runtime configuration from environment variables.
//!
//! | Variable         | Default       | Meaning                                              |
//! |------------------|---------------|------------------------------------------------------|
//! | `HOST`           | `0.0.0.0`     | bind address                                         |
//! | `PORT`           | `8080`        | bind port                                            |
//! | `DATA_FILE`      | `roster.json` | roster file; empty or `:memory:` keeps it in memory  |
//! | `TIE_BREAK`      | `stable`      | `stable` or `shuffled` ordering of equal skills      |
//! | `MAX_TEAM_COUNT` | `64`          | largest team count the API accepts                   |

use crate::models::TieBreak;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_FILE: &str = "roster.json";
const DEFAULT_MAX_TEAM_COUNT: usize = 64;
const MEMORY_DATA_FILE: &str = ":memory:";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// `None` means the in-memory store.
    pub data_file: Option<PathBuf>,
    /// Used when a team request does not name a mode.
    pub tie_break: TieBreak,
    pub max_team_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_file: Some(PathBuf::from(DEFAULT_DATA_FILE)),
            tie_break: TieBreak::default(),
            max_team_count: DEFAULT_MAX_TEAM_COUNT,
        }
    }
}

impl Config {
    /// Read from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values are logged and replaced by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let data_file = match lookup("DATA_FILE") {
            Some(v) if v.trim().is_empty() || v.trim() == MEMORY_DATA_FILE => None,
            Some(v) => Some(PathBuf::from(v.trim())),
            None => defaults.data_file,
        };
        let max_team_count = match parse_or(&lookup, "MAX_TEAM_COUNT", defaults.max_team_count) {
            0 => {
                log::warn!("MAX_TEAM_COUNT must be at least 1; using {}", DEFAULT_MAX_TEAM_COUNT);
                DEFAULT_MAX_TEAM_COUNT
            }
            n => n,
        };
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            data_file,
            tie_break: parse_or(&lookup, "TIE_BREAK", defaults.tie_break),
            max_team_count,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Invalid {}='{}'; using default {:?}", key, raw, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config_from(&[]), Config::default());
    }

    #[test]
    fn reads_all_values() {
        let c = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("DATA_FILE", "/tmp/r.json"),
            ("TIE_BREAK", "Shuffled"),
            ("MAX_TEAM_COUNT", "12"),
        ]);
        assert_eq!(c.host, "127.0.0.1");
        assert_eq!(c.port, 9000);
        assert_eq!(c.data_file, Some(PathBuf::from("/tmp/r.json")));
        assert_eq!(c.tie_break, TieBreak::Shuffled);
        assert_eq!(c.max_team_count, 12);
    }

    #[test]
    fn memory_data_file() {
        assert_eq!(config_from(&[("DATA_FILE", ":memory:")]).data_file, None);
        assert_eq!(config_from(&[("DATA_FILE", "")]).data_file, None);
    }

    #[test]
    fn invalid_values_fall_back() {
        let c = config_from(&[
            ("PORT", "eighty"),
            ("TIE_BREAK", "coin-flip"),
            ("MAX_TEAM_COUNT", "0"),
        ]);
        assert_eq!(c.port, DEFAULT_PORT);
        assert_eq!(c.tie_break, TieBreak::Stable);
        assert_eq!(c.max_team_count, DEFAULT_MAX_TEAM_COUNT);
    }
}
