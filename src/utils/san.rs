//! Standard Algebraic Notation.
//!
//! `move_to_san` renders a legal move the way PGN movetext expects it;
//! `san_to_move` matches a SAN token against the legal moves of a position.

use crate::errors::MoveInputError;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::chess_move::Move;
use crate::utils::algebraic::{file_char, parse_square, rank_char, square_name};
use crate::utils::uci_move::resolve_uci_move;

/// SAN for `mv`, which must be legal in `game_state`.
pub fn move_to_san(game_state: &GameState, mv: Move) -> String {
    let mut san = san_without_suffix(game_state, mv);

    let mut after = game_state.clone();
    after.push(mv);
    if after.is_check() {
        san.push(if after.has_legal_move() { '+' } else { '#' });
    }
    san
}

fn san_without_suffix(game_state: &GameState, mv: Move) -> String {
    if mv.is_castling() {
        return if square_file(mv.to()) == 6 {
            "O-O".to_owned()
        } else {
            "O-O-O".to_owned()
        };
    }

    let mut san = String::with_capacity(8);
    match mv.moved_piece().san_letter() {
        None => {
            if mv.is_capture() {
                san.push(file_char(mv.from()));
            }
        }
        Some(letter) => {
            san.push(letter);
            push_disambiguation(game_state, mv, &mut san);
        }
    }

    if mv.is_capture() {
        san.push('x');
    }
    san.push_str(&square_name(mv.to()));

    if let Some(promo) = mv.promotion().and_then(PieceKind::san_letter) {
        san.push('=');
        san.push(promo);
    }
    san
}

fn push_disambiguation(game_state: &GameState, mv: Move, san: &mut String) {
    let rivals: Vec<Square> = game_state
        .legal_moves()
        .into_iter()
        .filter(|other| {
            other.moved_piece() == mv.moved_piece()
                && other.to() == mv.to()
                && other.from() != mv.from()
        })
        .map(|other| other.from())
        .collect();

    if rivals.is_empty() {
        return;
    }
    let shares_file = rivals
        .iter()
        .any(|&sq| square_file(sq) == square_file(mv.from()));
    let shares_rank = rivals
        .iter()
        .any(|&sq| square_rank(sq) == square_rank(mv.from()));

    if !shares_file {
        san.push(file_char(mv.from()));
    } else if !shares_rank {
        san.push(rank_char(mv.from()));
    } else {
        san.push(file_char(mv.from()));
        san.push(rank_char(mv.from()));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SanParts {
    piece: PieceKind,
    from_file: Option<u8>,
    from_rank: Option<u8>,
    to: Square,
    promotion: Option<PieceKind>,
}

/// Legal move named by `token` in `game_state`.
///
/// Accepts check and annotation suffixes, `0-0` for castling, and falls back
/// to coordinate notation (`e2e4`) when the token is not SAN.
pub fn san_to_move(game_state: &GameState, token: &str) -> Result<Move, MoveInputError> {
    let cleaned = token
        .trim()
        .trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'));

    let castle_file = match cleaned {
        "O-O" | "0-0" => Some(6),
        "O-O-O" | "0-0-0" => Some(2),
        _ => None,
    };
    if let Some(file) = castle_file {
        return game_state
            .legal_moves()
            .into_iter()
            .find(|mv| mv.is_castling() && square_file(mv.to()) == file)
            .ok_or_else(|| MoveInputError::IllegalMove(token.trim().to_owned()));
    }

    let Some(parts) = parse_san(cleaned) else {
        return resolve_uci_move(game_state, cleaned).map_err(|err| match err {
            MoveInputError::InvalidMoveFormat(_) => {
                MoveInputError::InvalidMoveFormat(token.trim().to_owned())
            }
            other => other,
        });
    };

    let mut candidates = game_state.legal_moves().into_iter().filter(|mv| {
        mv.moved_piece() == parts.piece
            && !mv.is_castling()
            && mv.to() == parts.to
            && mv.promotion() == parts.promotion
            && parts.from_file.map_or(true, |f| square_file(mv.from()) == f)
            && parts.from_rank.map_or(true, |r| square_rank(mv.from()) == r)
    });

    match (candidates.next(), candidates.next()) {
        (Some(mv), None) => Ok(mv),
        _ => Err(MoveInputError::IllegalMove(token.trim().to_owned())),
    }
}

fn parse_san(token: &str) -> Option<SanParts> {
    if !token.is_ascii() || token.len() < 2 {
        return None;
    }

    let (piece, rest) = match token.as_bytes()[0] {
        b'N' => (PieceKind::Knight, &token[1..]),
        b'B' => (PieceKind::Bishop, &token[1..]),
        b'R' => (PieceKind::Rook, &token[1..]),
        b'Q' => (PieceKind::Queen, &token[1..]),
        b'K' => (PieceKind::King, &token[1..]),
        _ => (PieceKind::Pawn, token),
    };

    let (body, promotion) = match rest.find('=') {
        Some(idx) => (&rest[..idx], Some(promotion_from_letter(&rest[idx + 1..])?)),
        None if piece == PieceKind::Pawn => match rest.as_bytes().last() {
            Some(b'N' | b'B' | b'R' | b'Q') => (
                &rest[..rest.len() - 1],
                Some(promotion_from_letter(&rest[rest.len() - 1..])?),
            ),
            _ => (rest, None),
        },
        None => (rest, None),
    };
    if promotion.is_some() && piece != PieceKind::Pawn {
        return None;
    }
    if body.len() < 2 {
        return None;
    }

    let to = parse_square(&body[body.len() - 2..])?;
    let middle = body[..body.len() - 2].trim_end_matches('x');
    if middle.len() > 2 {
        return None;
    }

    let mut from_file = None;
    let mut from_rank = None;
    for ch in middle.bytes() {
        match ch {
            b'a'..=b'h' if from_file.is_none() && from_rank.is_none() => {
                from_file = Some(ch - b'a')
            }
            b'1'..=b'8' if from_rank.is_none() => from_rank = Some(ch - b'1'),
            _ => return None,
        }
    }

    // A pawn push without a file names the pawn on the destination file.
    if piece == PieceKind::Pawn && from_file.is_none() {
        from_file = Some(square_file(to));
    }

    Some(SanParts {
        piece,
        from_file,
        from_rank,
        to,
        promotion,
    })
}

fn promotion_from_letter(letter: &str) -> Option<PieceKind> {
    match letter {
        "N" => Some(PieceKind::Knight),
        "B" => Some(PieceKind::Bishop),
        "R" => Some(PieceKind::Rook),
        "Q" => Some(PieceKind::Queen),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    fn san_of(fen: &str, uci: &str) -> String {
        let game = state(fen);
        let mv = resolve_uci_move(&game, uci).expect("move should be legal");
        move_to_san(&game, mv)
    }

    #[test]
    fn renders_common_move_shapes() {
        let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(san_of(start, "e2e4"), "e4");
        assert_eq!(san_of(start, "g1f3"), "Nf3");
        assert_eq!(
            san_of("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2", "e4d5"),
            "exd5"
        );
        assert_eq!(san_of("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1g1"), "O-O");
        assert_eq!(san_of("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", "e8c8"), "O-O-O");
        assert_eq!(san_of("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7b8q"), "axb8=Q+");
        assert_eq!(san_of("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", "a1a8"), "Ra8#");
        assert_eq!(san_of("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2", "e5d6"), "exd6");
    }

    #[test]
    fn disambiguates_by_file_then_rank() {
        assert_eq!(san_of("4k3/8/8/8/8/8/8/N1N1K3 w - - 0 1", "a1b3"), "Nab3");
        assert_eq!(san_of("4k3/8/8/N7/8/8/8/N3K3 w - - 0 1", "a1b3"), "N1b3");
        assert_eq!(san_of("4k3/8/8/8/8/Q1Q5/8/Q3K3 w - - 0 1", "a1b2"), "Q1b2");
        assert_eq!(san_of("4k3/8/8/8/8/Q7/8/Q1Q1K3 w - - 0 1", "a1b2"), "Qa1b2");
    }

    #[test]
    fn every_legal_move_survives_san() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
            "4k3/8/8/8/8/Q1Q5/8/Q3K3 w - - 0 1",
            "4k3/8/8/8/8/Q7/8/Q1Q1K3 w - - 0 1",
        ] {
            let game = state(fen);
            for mv in game.legal_moves() {
                let san = move_to_san(&game, mv);
                assert_eq!(san_to_move(&game, &san), Ok(mv), "{fen}: {san}");
            }
        }
    }

    #[test]
    fn accepts_alternate_spellings() {
        let game = state("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let castle = san_to_move(&game, "0-0").expect("castling should parse");
        assert_eq!(castle.to_uci(), "e1g1");
        assert_eq!(san_to_move(&game, "O-O-O+"), san_to_move(&game, "0-0-0"));

        let start = GameState::new_game();
        let mv = san_to_move(&start, "e2e4").expect("coordinate fallback should resolve");
        assert_eq!(mv.to_uci(), "e2e4");
        assert_eq!(san_to_move(&start, "Nf3!?").map(|m| m.to_uci()), Ok("g1f3".to_owned()));

        let promo = state("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(san_to_move(&promo, "a8Q").map(|m| m.to_uci()), Ok("a7a8q".to_owned()));
    }

    #[test]
    fn rejects_unknown_or_illegal_tokens() {
        let start = GameState::new_game();
        assert_eq!(
            san_to_move(&start, "Ke2"),
            Err(MoveInputError::IllegalMove("Ke2".to_owned()))
        );
        assert_eq!(
            san_to_move(&start, "O-O"),
            Err(MoveInputError::IllegalMove("O-O".to_owned()))
        );
        assert!(matches!(
            san_to_move(&start, "hello"),
            Err(MoveInputError::InvalidMoveFormat(_))
        ));
        // Both knights reach d2, so a bare "Nd2" is ambiguous.
        let game = state("4k3/8/8/8/8/5N2/8/1N2K3 w - - 0 1");
        assert!(matches!(
            san_to_move(&game, "Nd2"),
            Err(MoveInputError::IllegalMove(_))
        ));
        assert_eq!(san_to_move(&game, "Nbd2").map(|m| m.to_uci()), Ok("b1d2".to_owned()));
    }
}
