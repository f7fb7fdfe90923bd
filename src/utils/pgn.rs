//! PGN read/write utilities for game history interchange.
//!
//! Writes SAN movetext under a Seven Tag Roster header and reads every game of
//! a PGN document back into replayable move lists. Comments, variations,
//! NAGs and move numbers are skipped on import.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::Local;
use log::info;

use crate::errors::PgnError;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;
use crate::utils::san::{move_to_san, san_to_move};

/// Tags every exported game carries, in export order.
pub const SEVEN_TAG_ROSTER: [&str; 7] =
    ["Event", "Site", "Date", "Round", "White", "Black", "Result"];

const MAX_LINE_WIDTH: usize = 80;

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    pub initial_state: GameState,
    pub moves: Vec<Move>,
    pub final_state: GameState,
    pub result: String,
}

/// Seven Tag Roster with today's date and the given players and result.
pub fn default_headers(white: &str, black: &str, result: &str) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("Event".to_owned(), "Casual game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), Local::now().format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), white.to_owned());
    headers.insert("Black".to_owned(), black.to_owned());
    headers.insert("Result".to_owned(), normalize_result(result).to_owned());
    headers
}

pub fn write_pgn(initial_state: &GameState, moves: &[Move], result: &str) -> String {
    write_pgn_with_headers(initial_state, moves, &default_headers("?", "?", result))
}

/// Export with caller-supplied tags. Roster tags come first in roster order,
/// the rest alphabetically. `SetUp`/`FEN` are added for non-standard starts.
pub fn write_pgn_with_headers(
    initial_state: &GameState,
    moves: &[Move],
    headers: &BTreeMap<String, String>,
) -> String {
    let mut headers = headers.clone();
    for tag in SEVEN_TAG_ROSTER {
        headers.entry(tag.to_owned()).or_insert_with(|| match tag {
            "Result" => "*".to_owned(),
            "Date" => "????.??.??".to_owned(),
            _ => "?".to_owned(),
        });
    }
    let initial_fen = initial_state.to_fen();
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }

    let mut out = String::new();
    for tag in SEVEN_TAG_ROSTER {
        push_tag(&mut out, tag, &headers[tag]);
    }
    for (key, value) in &headers {
        if !SEVEN_TAG_ROSTER.contains(&key.as_str()) {
            push_tag(&mut out, key, value);
        }
    }
    out.push('\n');

    let mut state = initial_state.clone();
    let mut tokens = Vec::with_capacity(moves.len() + moves.len() / 2 + 1);
    for (ply, &mv) in moves.iter().enumerate() {
        if state.side_to_move == Color::White {
            tokens.push(format!("{}.", state.fullmove_number));
        } else if ply == 0 {
            tokens.push(format!("{}...", state.fullmove_number));
        }
        tokens.push(move_to_san(&state, mv));
        state.push(mv);
    }
    tokens.push(normalize_result(&headers["Result"]).to_owned());

    out.push_str(&wrap_tokens(&tokens));
    out.push('\n');
    out
}

/// Every game in a PGN document, in order.
pub fn read_pgn_games(text: &str) -> Result<Vec<PgnGame>, PgnError> {
    let mut games = Vec::new();
    let mut tag_lines = Vec::<&str>::new();
    let mut movetext = String::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        if trimmed.starts_with('[') {
            if !movetext.trim().is_empty() {
                games.push(build_game(games.len() + 1, &tag_lines, &movetext)?);
                tag_lines.clear();
                movetext.clear();
            }
            tag_lines.push(trimmed);
        } else {
            movetext.push_str(trimmed);
            movetext.push('\n');
        }
    }
    if !tag_lines.is_empty() || !movetext.trim().is_empty() {
        games.push(build_game(games.len() + 1, &tag_lines, &movetext)?);
    }

    Ok(games)
}

pub fn load_games_from_pgn_file(path: impl AsRef<Path>) -> Result<Vec<PgnGame>, PgnError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| PgnError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let games = read_pgn_games(&text)?;
    info!("loaded {} games from {}", games.len(), path.display());
    Ok(games)
}

fn build_game(number: usize, tag_lines: &[&str], movetext: &str) -> Result<PgnGame, PgnError> {
    let mut headers = BTreeMap::new();
    for line in tag_lines {
        let (key, value) = parse_header_line(line)?;
        headers.insert(key, value);
    }

    let initial_state = match headers.get("FEN") {
        Some(fen) => GameState::from_fen(fen)?,
        None => GameState::new_game(),
    };

    let mut state = initial_state.clone();
    let mut moves = Vec::new();
    let mut result = "*".to_owned();

    let cleaned = strip_comments_and_variations(movetext);
    for raw in cleaned.split_whitespace() {
        if is_result_token(raw) {
            result = raw.to_owned();
            break;
        }
        if raw.starts_with('$') {
            continue;
        }
        let token = strip_move_number(raw);
        if token.is_empty() {
            continue;
        }

        let mv = san_to_move(&state, token).map_err(|_| PgnError::Move {
            game: number,
            ply: moves.len() + 1,
            token: token.to_owned(),
        })?;
        state.push(mv);
        moves.push(mv);
    }

    if let Some(tag) = headers.get("Result").filter(|r| is_result_token(r)) {
        result = tag.clone();
    }

    Ok(PgnGame {
        headers,
        initial_state,
        moves,
        final_state: state,
        result,
    })
}

fn parse_header_line(line: &str) -> Result<(String, String), PgnError> {
    let malformed = || PgnError::Tag(line.to_owned());
    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(malformed)?;
    let (key, value_raw) = inner.trim().split_once(' ').ok_or_else(malformed)?;
    let value = value_raw
        .trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(malformed)?;
    Ok((key.to_owned(), value.replace("\\\"", "\"").replace("\\\\", "\\")))
}

/// Drop `{...}` and `;` comments and `(...)` variations, nested or not.
fn strip_comments_and_variations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_brace = false;
    let mut in_line_comment = false;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        if in_line_comment {
            if ch == '\n' {
                in_line_comment = false;
                out.push(' ');
            }
            continue;
        }
        if in_brace {
            if ch == '}' {
                in_brace = false;
                out.push(' ');
            }
            continue;
        }
        match ch {
            '{' => in_brace = true,
            ';' => in_line_comment = true,
            '(' => paren_depth += 1,
            ')' => {
                paren_depth = paren_depth.saturating_sub(1);
                out.push(' ');
            }
            _ if paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

/// `12.` -> "", `12...` -> "", `12.Nf3` -> "Nf3".
fn strip_move_number(token: &str) -> &str {
    if token.starts_with(|c: char| c.is_ascii_digit()) {
        if let Some(idx) = token.rfind('.') {
            return &token[idx + 1..];
        }
    }
    token
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn push_tag(out: &mut String, key: &str, value: &str) {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    out.push_str(&format!("[{key} \"{escaped}\"]\n"));
}

fn wrap_tokens(tokens: &[String]) -> String {
    let mut out = String::new();
    let mut line_len = 0usize;
    for token in tokens {
        if line_len > 0 && line_len + 1 + token.len() > MAX_LINE_WIDTH {
            out.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            out.push(' ');
            line_len += 1;
        }
        out.push_str(token);
        line_len += token.len();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::uci_move::resolve_uci_move;

    fn play(game: &mut GameState, moves: &[&str]) -> Vec<Move> {
        moves
            .iter()
            .map(|uci| {
                let mv = resolve_uci_move(game, uci).expect("move should be legal");
                game.push(mv);
                mv
            })
            .collect()
    }

    #[test]
    fn export_then_import_restores_the_game() {
        let mut game = GameState::new_game();
        let history = play(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6"]);

        let pgn = write_pgn(&GameState::new_game(), &history, "*");
        assert!(pgn.starts_with("[Event \"Casual game\"]\n[Site \"Local\"]\n[Date \""));
        assert!(pgn.contains("1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 *"));

        let parsed = read_pgn_games(&pgn).expect("PGN should parse");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].moves, history);
        assert_eq!(parsed[0].final_state.to_fen(), game.to_fen());
        assert_eq!(parsed[0].result, "*");
    }

    #[test]
    fn date_tag_uses_pgn_date_layout() {
        let headers = default_headers("Human", "Engine", "1-0");
        let date = &headers["Date"];
        assert_eq!(date.len(), 10);
        assert_eq!(date.as_bytes()[4], b'.');
        assert_eq!(date.as_bytes()[7], b'.');
        assert_eq!(headers["Result"], "1-0");
    }

    #[test]
    fn custom_start_writes_setup_and_black_first_move_number() {
        let initial = GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 12")
            .expect("FEN should parse");
        let mut game = initial.clone();
        let history = play(&mut game, &["e8d7", "e2e4"]);

        let pgn = write_pgn(&initial, &history, "1/2-1/2");
        assert!(pgn.contains("[SetUp \"1\"]"));
        assert!(pgn.contains("[FEN \"4k3/8/8/8/8/8/4P3/4K3 b - - 0 12\"]"));
        assert!(pgn.contains("12... Kd7 13. e4 1/2-1/2"));

        let parsed = read_pgn_games(&pgn).expect("PGN should parse");
        assert_eq!(parsed[0].initial_state.to_fen(), initial.to_fen());
        assert_eq!(parsed[0].moves, history);
        assert_eq!(parsed[0].result, "1/2-1/2");
    }

    #[test]
    fn imports_every_game_and_skips_annotations() {
        let text = r#"
[Event "First"]
[Result "1-0"]

1. e4 {best by test} e5 2. Qh5 (2. Nf3 Nc6 (2... d6)) Nc6 3. Bc4 Nf6?? $4
4. Qxf7# 1-0

[Event "Second"]
[Result "0-1"]

1.f3 e5 2.g4 ; a famous blunder
2... Qh4# 0-1
"#;
        let games = read_pgn_games(text).expect("PGN should parse");
        assert_eq!(games.len(), 2);

        assert_eq!(games[0].headers["Event"], "First");
        assert_eq!(games[0].moves.len(), 7);
        assert!(games[0].final_state.is_checkmate());
        assert_eq!(games[0].result, "1-0");

        assert_eq!(games[1].moves.len(), 4);
        assert!(games[1].final_state.is_checkmate());
        assert_eq!(games[1].result, "0-1");
    }

    #[test]
    fn reports_the_offending_token() {
        let text = "[Event \"Bad\"]\n\n1. e4 e5 2. Ke3 *\n";
        match read_pgn_games(text) {
            Err(PgnError::Move { game, ply, token }) => {
                assert_eq!((game, ply, token.as_str()), (1, 3, "Ke3"));
            }
            other => panic!("expected a move error, got {other:?}"),
        }

        assert!(matches!(
            read_pgn_games("[Event First]\n1. e4 *"),
            Err(PgnError::Tag(_))
        ));
    }

    #[test]
    fn loads_games_from_disk() {
        let path = std::env::temp_dir().join(format!("pgn_load_{}.pgn", std::process::id()));
        let mut game = GameState::new_game();
        let history = play(&mut game, &["d2d4", "d7d5"]);
        fs::write(&path, write_pgn(&GameState::new_game(), &history, "*"))
            .expect("temp file should be writable");

        let games = load_games_from_pgn_file(&path).expect("file should load");
        fs::remove_file(&path).ok();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].moves, history);

        assert!(matches!(
            load_games_from_pgn_file(path.with_extension("missing")),
            Err(PgnError::Io { .. })
        ));
    }

    #[test]
    fn long_games_wrap_movetext() {
        let mut game = GameState::new_game();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        let mut history = Vec::new();
        for _ in 0..4 {
            history.extend(play(&mut game, &shuffle));
        }
        let pgn = write_pgn(&GameState::new_game(), &history, "*");
        assert!(pgn.lines().all(|line| line.len() <= MAX_LINE_WIDTH));
    }
}
