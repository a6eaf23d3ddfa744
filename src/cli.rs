use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Flags shared by the binaries. Anything left `None` falls back to the
/// environment configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub user: Option<String>,
    pub max: Option<usize>,
    pub wins_only: bool,
    pub xlsx: Option<PathBuf>,
}

impl CliArgs {
    pub fn from_env_args() -> Result<Self> {
        Self::parse(std::env::args().skip(1))
    }

    /// Flags for `game_data`, which has no summary tables to filter or export.
    pub fn collector_from_env_args() -> Result<Self> {
        Self::parse_collector(std::env::args().skip(1))
    }

    /// Accepts `--flag value` and `--flag=value`.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        Self::parse_with(args, true)
    }

    /// Like [`CliArgs::parse`] but only `--user` and `--max` are allowed.
    pub fn parse_collector(args: impl IntoIterator<Item = String>) -> Result<Self> {
        Self::parse_with(args, false)
    }

    fn parse_with(args: impl IntoIterator<Item = String>, summary_flags: bool) -> Result<Self> {
        let mut out = CliArgs::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg.clone(), None),
            };
            if !summary_flags && matches!(flag.as_str(), "--wins-only" | "--xlsx") {
                bail!("{flag} is not supported by this command");
            }
            match flag.as_str() {
                "--wins-only" => out.wins_only = true,
                "--user" | "--max" | "--xlsx" => {
                    let value = match inline {
                        Some(value) => value,
                        None => args
                            .next()
                            .with_context(|| format!("missing value for {flag}"))?,
                    };
                    let value = value.trim().to_string();
                    if value.is_empty() {
                        bail!("empty value for {flag}");
                    }
                    match flag.as_str() {
                        "--user" => out.user = Some(value),
                        "--max" => {
                            let max = value
                                .parse::<usize>()
                                .with_context(|| format!("invalid --max value: {value}"))?;
                            out.max = Some(max.max(1));
                        }
                        _ => out.xlsx = Some(PathBuf::from(value)),
                    }
                }
                other => bail!("unknown argument: {other}"),
            }
        }
        Ok(out)
    }
}
