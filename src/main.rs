use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use lichess_openings::cli::CliArgs;
use lichess_openings::config::Config;
use lichess_openings::export::{SummarySheet, export_summaries_xlsx};
use lichess_openings::http_client::build_http_client;
use lichess_openings::lichess::{LichessClient, fetch_games};
use lichess_openings::logging::init_logging;
use lichess_openings::normalize::normalize_games;
use lichess_openings::report::{render_table, sort_by_wins};
use lichess_openings::summary::{GroupKey, WinCounting, summarize};

fn main() -> Result<()> {
    let cfg = Config::load();
    init_logging();
    let args = CliArgs::from_env_args()?;

    let username = args.user.clone().unwrap_or_else(|| cfg.username.clone());
    let max_games = args.max.unwrap_or(cfg.max_games);
    let counting = if args.wins_only {
        WinCounting::WinsOnly
    } else {
        cfg.win_counting
    };

    let client = LichessClient::from_config(build_http_client()?, &cfg);
    let games = fetch_games(&client, &username, max_games).into_games_or_empty();
    let rows = normalize_games(&games, &username);
    info!(games = games.len(), rows = rows.len(), "normalized games");

    let by_opening = sort_by_wins(summarize(&rows, GroupKey::Opening, counting));
    let by_family = sort_by_wins(summarize(&rows, GroupKey::Family, counting));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_table(GroupKey::Opening.label(), &by_opening, &mut out)?;
    writeln!(out).context("write stdout")?;
    render_table(GroupKey::Family.label(), &by_family, &mut out)?;

    if let Some(path) = args.xlsx.as_deref() {
        let report = export_summaries_xlsx(
            path,
            &[
                SummarySheet {
                    name: "Openings",
                    key_header: GroupKey::Opening.label(),
                    rows: &by_opening,
                },
                SummarySheet {
                    name: "Families",
                    key_header: GroupKey::Family.label(),
                    rows: &by_family,
                },
            ],
        )?;
        writeln!(
            out,
            "\nWrote {} sheets ({} rows) to {}",
            report.sheets,
            report.rows,
            path.display()
        )
        .context("write stdout")?;
    }

    Ok(())
}
