use tracing::trace;

use crate::game::{GameRecord, Speed};

pub const UNKNOWN_OPENING: &str = "Unknown Opening";

/// Outcome of a game from the queried player's side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    pub fn score(self) -> i8 {
        match self {
            GameResult::Win => 1,
            GameResult::Loss => -1,
            GameResult::Draw => 0,
        }
    }

    pub fn is_decisive(self) -> bool {
        self != GameResult::Draw
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    pub opening: String,
    pub speed: Speed,
    pub result: GameResult,
}

/// Flattens one record for `username`. Returns `None` when the speed or the
/// players block is missing, or when a decisive game cannot be attributed to
/// the player.
pub fn normalize_game(game: &GameRecord, username: &str) -> Option<NormalizedRow> {
    let speed = game.speed?;
    let players = game.players.as_ref()?;

    let result = match game.winner {
        None => GameResult::Draw,
        Some(winner) => {
            let color = players.color_of(username)?;
            if color == winner {
                GameResult::Win
            } else {
                GameResult::Loss
            }
        }
    };

    let opening = game
        .opening_name()
        .unwrap_or(UNKNOWN_OPENING)
        .to_string();

    Some(NormalizedRow {
        opening,
        speed,
        result,
    })
}

pub fn normalize_games(games: &[GameRecord], username: &str) -> Vec<NormalizedRow> {
    games
        .iter()
        .filter_map(|game| {
            let row = normalize_game(game, username);
            if row.is_none() {
                trace!(game_id = %game.id, "dropping game with missing fields");
            }
            row
        })
        .collect()
}
