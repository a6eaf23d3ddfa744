use std::io::BufReader;

use anyhow::{Context, Result, anyhow};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::ACCEPT;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::game::{GameRecord, parse_game_json, read_games_ndjson};

const NDJSON: &str = "application/x-ndjson";
const JSON: &str = "application/json";

/// The two remote calls the pipeline depends on. Implemented by
/// [`LichessClient`] and by in-memory sources in tests.
pub trait GameSource {
    /// Most recent games first, at most `max`.
    fn export_by_player(
        &self,
        username: &str,
        max: usize,
        with_opening: bool,
    ) -> Result<Vec<GameRecord>>;

    fn export_game(&self, game_id: &str) -> Result<GameRecord>;
}

pub struct LichessClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl LichessClient {
    pub fn new(http: Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            token,
        }
    }

    pub fn from_config(http: Client, cfg: &Config) -> Self {
        Self::new(http, cfg.base_url.clone(), cfg.api_token.clone())
    }

    fn get(&self, url: &str, accept: &str) -> RequestBuilder {
        let req = self.http.get(url).header(ACCEPT, accept);
        match self.token.as_deref() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

impl GameSource for LichessClient {
    fn export_by_player(
        &self,
        username: &str,
        max: usize,
        with_opening: bool,
    ) -> Result<Vec<GameRecord>> {
        let username = username.trim();
        if username.is_empty() {
            return Err(anyhow!("username is empty"));
        }
        let url = format!("{}/api/games/user/{username}", self.base_url);
        debug!(%url, max, with_opening, "exporting games");

        let resp = self
            .get(&url, NDJSON)
            .query(&[
                ("max", max.to_string()),
                ("opening", with_opening.to_string()),
            ])
            .send()
            .context("request failed")?;
        let resp = ensure_success(resp)?;
        read_games_ndjson(BufReader::new(resp), max)
    }

    fn export_game(&self, game_id: &str) -> Result<GameRecord> {
        let url = format!("{}/game/export/{game_id}", self.base_url);
        let resp = self
            .get(&url, JSON)
            .query(&[("opening", "true")])
            .send()
            .context("request failed")?;
        let body = ensure_success(resp)?
            .text()
            .context("failed reading body")?;
        parse_game_json(&body).with_context(|| format!("game {game_id}"))
    }
}

fn ensure_success(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    Err(anyhow!("http {}: {}", status, body.trim()))
}

/// Result of asking a [`GameSource`] for a player's games.
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(Vec<GameRecord>),
    Failed(String),
}

impl FetchOutcome {
    /// Keeps the games, or reports the failure and carries on with none.
    pub fn into_games_or_empty(self) -> Vec<GameRecord> {
        match self {
            FetchOutcome::Fetched(games) => games,
            FetchOutcome::Failed(reason) => {
                warn!("Failed to fetch games: {reason}");
                Vec::new()
            }
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }
}

pub fn fetch_games(source: &dyn GameSource, username: &str, max: usize) -> FetchOutcome {
    match source.export_by_player(username, max, true) {
        Ok(games) => {
            info!(count = games.len(), username, "fetched games");
            FetchOutcome::Fetched(games)
        }
        Err(err) => FetchOutcome::Failed(format!("{err:#}")),
    }
}
