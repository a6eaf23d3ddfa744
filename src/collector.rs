use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::warn;

use crate::game::{GameRecord, Side, Speed};
use crate::lichess::GameSource;
use crate::normalize::UNKNOWN_OPENING;

/// Per-game metadata: opening, speed and absolute winner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDataEntry {
    pub id: String,
    pub opening: String,
    pub speed: Option<Speed>,
    pub winner: Option<Side>,
    pub played_at: Option<DateTime<Utc>>,
}

/// Collects the first `limit` games of `username`. Openings missing from the
/// batch export are looked up one game at a time.
pub fn collect_game_data(
    source: &dyn GameSource,
    username: &str,
    limit: usize,
) -> Result<Vec<GameDataEntry>> {
    let games = source.export_by_player(username, limit, true)?;
    Ok(games
        .iter()
        .take(limit)
        .map(|game| entry_for(source, game))
        .collect())
}

fn entry_for(source: &dyn GameSource, game: &GameRecord) -> GameDataEntry {
    let opening = match game.opening_name() {
        Some(name) => name.to_string(),
        None => lookup_opening(source, &game.id).unwrap_or_else(|| UNKNOWN_OPENING.to_string()),
    };
    GameDataEntry {
        id: game.id.clone(),
        opening,
        speed: game.speed,
        winner: game.winner,
        played_at: game.played_at(),
    }
}

fn lookup_opening(source: &dyn GameSource, game_id: &str) -> Option<String> {
    match source.export_game(game_id) {
        Ok(full) => full.opening_name().map(str::to_string),
        Err(err) => {
            warn!(game_id, "opening lookup failed: {err:#}");
            None
        }
    }
}
