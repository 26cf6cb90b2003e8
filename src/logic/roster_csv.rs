//! Roster CSV export/import (`id,name,skill`; `id` optional on import).

use crate::logic::session::SessionError;
use crate::models::{Player, PlayerId};
use crate::store::RosterStore;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use uuid::Uuid;

/// One CSV row. A row without `id` is a new player; an empty or missing `skill` is 0 (unrated).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(default)]
    pub id: Option<PlayerId>,
    pub name: String,
    #[serde(default)]
    pub skill: Option<f64>,
}

impl From<&Player> for PlayerRecord {
    fn from(p: &Player) -> Self {
        Self {
            id: Some(p.id),
            name: p.name.clone(),
            skill: Some(p.skill),
        }
    }
}

impl From<PlayerRecord> for Player {
    fn from(r: PlayerRecord) -> Self {
        let skill = r.skill.unwrap_or(0.0);
        match r.id {
            Some(id) => Player {
                id,
                name: r.name,
                skill,
            },
            None => Player::new(r.name, skill),
        }
    }
}

/// Write players as CSV with a header row.
pub fn write_players_csv<W: Write>(players: &[Player], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for p in players {
        wtr.serialize(PlayerRecord::from(p))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Parse CSV rows (header required; columns matched by name, whitespace trimmed).
pub fn read_players_csv<R: Read>(reader: R) -> Result<Vec<PlayerRecord>, csv::Error> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect()
}

/// Upsert each record into the store. Stops at the first rejected row; earlier rows stay.
/// Returns how many rows were applied.
pub fn import_players(
    store: &dyn RosterStore,
    records: Vec<PlayerRecord>,
) -> Result<usize, SessionError> {
    let mut applied = 0;
    for record in records {
        // rows without an id update the player of the same name, if any
        let id = match record.id {
            Some(id) => id,
            None => store
                .find_player_by_name(&record.name)?
                .map(|p| p.id)
                .unwrap_or_else(Uuid::new_v4),
        };
        store.upsert_player(Player::from(PlayerRecord {
            id: Some(id),
            ..record
        }))?;
        applied += 1;
    }
    log::info!("Imported {} players from CSV", applied);
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn export_then_parse_keeps_ids() {
        let players = vec![Player::new("Alice", 10.0), Player::new("Bob", 7.5)];
        let mut buf = Vec::new();
        write_players_csv(&players, &mut buf).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("id,name,skill"));

        let records = read_players_csv(buf.as_slice()).unwrap();
        let back: Vec<Player> = records.into_iter().map(Player::from).collect();
        assert_eq!(back, players);
    }

    #[test]
    fn parse_without_id_column() {
        let input = "name,skill\n Carol , 6\nDave,4.5\n";
        let records = read_players_csv(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, None);
        assert_eq!(records[0].name, "Carol");
        assert_eq!(records[1].skill, Some(4.5));
    }

    #[test]
    fn empty_skill_cell_imports_as_unrated() {
        let store = MemoryStore::new();
        let input = "name,skill\nBob,\nCarol, \n";
        let records = read_players_csv(input.as_bytes()).unwrap();
        assert_eq!(records[0].skill, None);

        assert_eq!(import_players(&store, records).unwrap(), 2);
        let players = store.list_players().unwrap();
        assert_eq!(players[0].name, "Bob");
        assert_eq!(players[0].skill, 0.0);
        assert_eq!(players[1].skill, 0.0);
    }

    #[test]
    fn import_updates_existing_by_name() {
        let store = MemoryStore::new();
        let alice = Player::new("Alice", 1.0);
        store.upsert_player(alice.clone()).unwrap();

        let input = "name,skill\nALICE,9\nBob,3\n";
        let applied = import_players(&store, read_players_csv(input.as_bytes()).unwrap()).unwrap();
        assert_eq!(applied, 2);

        let players = store.list_players().unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].id, alice.id);
        assert_eq!(players[0].name, "ALICE");
        assert_eq!(players[0].skill, 9.0);
        assert_eq!(players[1].name, "Bob");
    }
}
