use std::fmt;
use std::io::BufRead;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

/// One game as exported by the Lichess API. Every field the pipeline may
/// need to reject a record on is optional so a sparse export still decodes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: String,
    #[serde(default)]
    pub rated: Option<bool>,
    #[serde(default)]
    pub speed: Option<Speed>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub players: Option<Players>,
    #[serde(default)]
    pub winner: Option<Side>,
    #[serde(default)]
    pub opening: Option<Opening>,
}

impl GameRecord {
    pub fn opening_name(&self) -> Option<&str> {
        self.opening
            .as_ref()
            .and_then(|o| o.name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn played_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Opening {
    #[serde(default)]
    pub eco: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ply: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Players {
    #[serde(default)]
    pub white: Option<GamePlayer>,
    #[serde(default)]
    pub black: Option<GamePlayer>,
}

impl Players {
    pub fn side(&self, side: Side) -> Option<&GamePlayer> {
        match side {
            Side::White => self.white.as_ref(),
            Side::Black => self.black.as_ref(),
        }
    }

    /// Colour played by `username`, if either seat belongs to that account.
    pub fn color_of(&self, username: &str) -> Option<Side> {
        [Side::White, Side::Black]
            .into_iter()
            .find(|side| self.side(*side).is_some_and(|p| p.is_user(username)))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePlayer {
    #[serde(default)]
    pub user: Option<LightUser>,
    #[serde(default)]
    pub rating: Option<u32>,
    #[serde(default)]
    pub ai_level: Option<u8>,
}

impl GamePlayer {
    pub fn is_user(&self, username: &str) -> bool {
        let username = username.trim();
        if username.is_empty() {
            return false;
        }
        self.user.as_ref().is_some_and(|u| {
            u.name.as_deref().is_some_and(|name| name.eq_ignore_ascii_case(username))
                || u.id.as_deref().is_some_and(|id| id.eq_ignore_ascii_case(username))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LightUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Speed {
    UltraBullet,
    Bullet,
    Blitz,
    Rapid,
    Classical,
    Correspondence,
    #[serde(other)]
    Other,
}

impl Speed {
    pub fn as_str(self) -> &'static str {
        match self {
            Speed::UltraBullet => "ultraBullet",
            Speed::Bullet => "bullet",
            Speed::Blitz => "blitz",
            Speed::Rapid => "rapid",
            Speed::Classical => "classical",
            Speed::Correspondence => "correspondence",
            Speed::Other => "other",
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn parse_game_json(raw: &str) -> Result<GameRecord> {
    serde_json::from_str(raw.trim()).context("invalid game json")
}

/// Decodes an NDJSON export held in memory. Lines that are not valid game
/// objects are skipped.
pub fn parse_games_ndjson(raw: &str) -> Vec<GameRecord> {
    raw.lines().filter_map(decode_line).collect()
}

/// Streams an NDJSON export one line at a time. IO failures abort the read;
/// undecodable lines are skipped. Stops after `max` records.
pub fn read_games_ndjson<R: BufRead>(reader: R, max: usize) -> Result<Vec<GameRecord>> {
    let mut games = Vec::new();
    for line in reader.lines() {
        if games.len() >= max {
            break;
        }
        let line = line.context("failed reading game stream")?;
        if let Some(game) = decode_line(&line) {
            games.push(game);
        }
    }
    Ok(games)
}

fn decode_line(line: &str) -> Option<GameRecord> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    match parse_game_json(trimmed) {
        Ok(game) => Some(game),
        Err(err) => {
            debug!(error = %err, "skipping undecodable game line");
            None
        }
    }
}
