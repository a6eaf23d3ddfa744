use anyhow::Result;

use lichess_openings::cli::CliArgs;
use lichess_openings::collector::collect_game_data;
use lichess_openings::config::Config;
use lichess_openings::http_client::build_http_client;
use lichess_openings::lichess::LichessClient;
use lichess_openings::logging::init_logging;

const DEFAULT_GAMES: usize = 10;

fn main() -> Result<()> {
    let cfg = Config::load();
    init_logging();
    let args = CliArgs::collector_from_env_args()?;

    let username = args.user.unwrap_or(cfg.username.clone());
    let limit = args.max.unwrap_or(DEFAULT_GAMES);

    let client = LichessClient::from_config(build_http_client()?, &cfg);
    let entries = collect_game_data(&client, &username, limit)?;

    println!("Games for {username}: {}", entries.len());
    for entry in entries {
        let speed = entry.speed.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string());
        let winner = entry.winner.map(|w| w.to_string()).unwrap_or_else(|| "-".to_string());
        let date = entry
            .played_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        println!("{}  {}  {}  {}  {}", entry.id, entry.opening, speed, winner, date);
    }

    Ok(())
}
