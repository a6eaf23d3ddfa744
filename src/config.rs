use std::env;

use tracing::warn;

use crate::summary::WinCounting;

pub const DEFAULT_BASE_URL: &str = "https://lichess.org";
pub const DEFAULT_USERNAME: &str = "rvvr4";
pub const DEFAULT_MAX_GAMES: usize = 1000;
pub const MAX_GAMES_LIMIT: usize = 10_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_token: Option<String>,
    pub base_url: String,
    pub username: String,
    pub max_games: usize,
    pub win_counting: WinCounting,
}

impl Config {
    /// Reads `.env.local` and `.env` (when present) and then the process
    /// environment.
    pub fn load() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_token = get("LICHESS_API");
        let base_url = get("LICHESS_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let username = get("LICHESS_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        let max_games = get("LICHESS_MAX_GAMES")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_GAMES)
            .clamp(1, MAX_GAMES_LIMIT);
        let win_counting = match get("WIN_COUNTING") {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                warn!("{err}; falling back to decisive counting");
                WinCounting::Decisive
            }),
            None => WinCounting::Decisive,
        };

        Self {
            api_token,
            base_url,
            username,
            max_games,
            win_counting,
        }
    }
}
