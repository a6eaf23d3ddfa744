use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::{Result, anyhow};

use crate::normalize::{GameResult, NormalizedRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Opening,
    Family,
}

impl GroupKey {
    pub fn label(self) -> &'static str {
        match self {
            GroupKey::Opening => "Opening",
            GroupKey::Family => "Opening Family",
        }
    }

    fn key_for(self, row: &NormalizedRow) -> String {
        match self {
            GroupKey::Opening => row.opening.clone(),
            GroupKey::Family => opening_family(&row.opening).to_string(),
        }
    }
}

/// Which results count towards the `wins` column.
///
/// `Decisive` tallies every game that was not a draw, so a loss also lands
/// in `wins`. `WinsOnly` counts actual wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WinCounting {
    #[default]
    Decisive,
    WinsOnly,
}

impl WinCounting {
    pub fn counts(self, result: GameResult) -> bool {
        match self {
            WinCounting::Decisive => result.is_decisive(),
            WinCounting::WinsOnly => result == GameResult::Win,
        }
    }
}

impl FromStr for WinCounting {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "decisive" | "legacy" => Ok(WinCounting::Decisive),
            "wins" | "wins-only" | "wins_only" => Ok(WinCounting::WinsOnly),
            other => Err(anyhow!("unknown win counting mode: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub key: String,
    pub total_plays: u32,
    pub wins: u32,
    pub win_percentage: f64,
}

/// Root of an opening name: everything before the first `:`, then before
/// the first `|`, trimmed.
pub fn opening_family(opening: &str) -> &str {
    let head = opening.split(':').next().unwrap_or(opening);
    head.split('|').next().unwrap_or(head).trim()
}

/// Groups rows by `key` and tallies plays and wins. Groups come back in
/// ascending key order.
pub fn summarize(rows: &[NormalizedRow], key: GroupKey, counting: WinCounting) -> Vec<SummaryRow> {
    let mut groups: BTreeMap<String, (u32, u32)> = BTreeMap::new();
    for row in rows {
        let entry = groups.entry(key.key_for(row)).or_insert((0, 0));
        entry.0 += 1;
        if counting.counts(row.result) {
            entry.1 += 1;
        }
    }

    groups
        .into_iter()
        .map(|(key, (total_plays, wins))| SummaryRow {
            key,
            total_plays,
            wins,
            win_percentage: win_percentage(wins, total_plays),
        })
        .collect()
}

pub fn win_percentage(wins: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = f64::from(wins) / f64::from(total) * 100.0;
    (pct * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::{WinCounting, opening_family, win_percentage};

    #[test]
    fn family_truncates_at_first_delimiter() {
        assert_eq!(opening_family("Italian Game: Giuoco Piano"), "Italian Game");
        assert_eq!(opening_family("Sicilian Defense | Najdorf"), "Sicilian Defense");
        assert_eq!(opening_family("A | B: C"), "A");
        assert_eq!(opening_family("  Queen's Gambit  "), "Queen's Gambit");
        assert_eq!(opening_family(""), "");
    }

    #[test]
    fn percentage_rounds_to_two_places() {
        assert_eq!(win_percentage(2, 3), 66.67);
        assert_eq!(win_percentage(1, 3), 33.33);
        assert_eq!(win_percentage(0, 5), 0.0);
        assert_eq!(win_percentage(0, 0), 0.0);
    }

    #[test]
    fn decisive_counting_includes_losses() {
        use crate::normalize::GameResult;

        assert!(WinCounting::Decisive.counts(GameResult::Loss));
        assert!(!WinCounting::Decisive.counts(GameResult::Draw));
        assert!(!WinCounting::WinsOnly.counts(GameResult::Loss));
        assert!(WinCounting::WinsOnly.counts(GameResult::Win));
    }

    #[test]
    fn win_counting_parses() {
        assert_eq!("wins".parse::<WinCounting>().unwrap(), WinCounting::WinsOnly);
        assert_eq!(" Decisive ".parse::<WinCounting>().unwrap(), WinCounting::Decisive);
        assert!("sometimes".parse::<WinCounting>().is_err());
    }
}
