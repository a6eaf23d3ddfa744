use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use lichess_openings::game::{Side, Speed, parse_games_ndjson, read_games_ndjson};
use lichess_openings::normalize::{GameResult, UNKNOWN_OPENING, normalize_games};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_games_fixture() {
    let raw = read_fixture("games.ndjson");
    let games = parse_games_ndjson(&raw);
    assert_eq!(games.len(), 10);
    assert_eq!(games[0].id, "g1aaaaaa");
    assert_eq!(games[0].speed, Some(Speed::Blitz));
    assert_eq!(games[0].winner, Some(Side::White));
    assert_eq!(games[0].opening_name(), Some("Italian Game"));
    assert!(games[1].winner.is_none());
    assert!(games[5].opening.is_none());
}

#[test]
fn streamed_fixture_matches_in_memory_parse() {
    let raw = read_fixture("games.ndjson");
    let streamed = read_games_ndjson(Cursor::new(raw.as_bytes()), usize::MAX).expect("stream");
    let ids: Vec<_> = streamed.iter().map(|g| g.id.as_str()).collect();
    let parsed = parse_games_ndjson(&raw);
    let expected: Vec<_> = parsed.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn normalizes_fixture_relative_to_player() {
    let games = parse_games_ndjson(&read_fixture("games.ndjson"));
    let rows = normalize_games(&games, "rvvr4");
    assert_eq!(rows.len(), 7);

    let results: Vec<_> = rows.iter().map(|r| r.result).collect();
    assert_eq!(
        results,
        [
            GameResult::Win,
            GameResult::Draw,
            GameResult::Loss,
            GameResult::Win,
            GameResult::Loss,
            GameResult::Win,
            GameResult::Loss,
        ]
    );
    assert_eq!(rows[5].opening, UNKNOWN_OPENING);
    assert_eq!(rows[5].speed, Speed::Classical);
    assert_eq!(rows[6].opening, "Queen's Gambit Declined");
}

#[test]
fn records_without_players_or_speed_are_dropped() {
    let raw = concat!(
        r#"{"id":"a","speed":"blitz","opening":{"name":"Italian Game"}}"#,
        "\n",
        r#"{"id":"b","players":{"white":{"user":{"name":"me"}},"black":{"user":{"name":"you"}}},"winner":"white"}"#,
        "\n",
        r#"{"id":"c","speed":"blitz","players":{"white":{"user":{"name":"me"}},"black":{"user":{"name":"you"}}}}"#,
    );
    let rows = normalize_games(&parse_games_ndjson(raw), "me");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].result, GameResult::Draw);
    assert_eq!(rows[0].opening, UNKNOWN_OPENING);
}

#[test]
fn opening_without_name_becomes_unknown_opening() {
    let raw = concat!(
        r#"{"id":"e1","speed":"blitz","players":{"white":{"user":{"name":"me","id":"me"}},"black":{"user":{"name":"you","id":"you"}}},"winner":"white","opening":{"eco":"C50","ply":5}}"#,
        "\n",
        r#"{"id":"e2","speed":"rapid","players":{"white":{"user":{"id":"you"}},"black":{"user":{"name":"me"}}},"opening":{"eco":"B20","name":null}}"#,
    );
    let games = parse_games_ndjson(raw);
    assert_eq!(games.len(), 2);

    let rows = normalize_games(&games, "me");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].opening, UNKNOWN_OPENING);
    assert_eq!(rows[0].result, GameResult::Win);
    assert_eq!(rows[1].opening, UNKNOWN_OPENING);
    assert_eq!(rows[1].result, GameResult::Draw);
}

#[test]
fn empty_export_is_empty() {
    assert!(parse_games_ndjson("").is_empty());
    assert!(parse_games_ndjson("\n\n").is_empty());
}
