//! FEN-to-GameState parser.
//!
//! Builds a fully-populated state from a Forsyth-Edwards Notation string,
//! including bitboards, rights, clocks, occupancies and the Zobrist key.

use crate::errors::FenError;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::parse_square;

const BACK_RANKS: u64 = 0xFF00_0000_0000_00FF;

pub fn parse_fen(fen: &str) -> Result<GameState, FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() != 6 {
        return Err(FenError::FieldCount(fields.len()));
    }

    let mut game_state = GameState::new_empty();

    parse_board(fields[0], &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(fields[1])?;
    game_state.castling_rights = parse_castling_rights(fields[2])?;
    game_state.en_passant_square = parse_en_passant_square(fields[3])?;
    game_state.halfmove_clock = parse_counter(fields[4])?;
    game_state.fullmove_number = parse_counter(fields[5])?.max(1);

    for color in Color::ALL {
        if game_state.pieces[color.index()][PieceKind::King.index()].count_ones() != 1 {
            return Err(FenError::KingCount);
        }
        if game_state.pieces[color.index()][PieceKind::Pawn.index()] & BACK_RANKS != 0 {
            return Err(FenError::PawnOnBackRank);
        }
    }
    game_state.recalc_occupancy();
    validate_en_passant(&game_state, fields[3])?;

    game_state.refresh_derived();
    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> Result<(), FenError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(FenError::PieceChar(ch));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(FenError::RankWidth {
                        rank: board_rank + 1,
                    });
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or(FenError::PieceChar(ch))?;
            if file >= 8 {
                return Err(FenError::RankWidth {
                    rank: board_rank + 1,
                });
            }

            let sq = board_rank * 8 + file;
            game_state.pieces[piece.color.index()][piece.kind.index()] |= square_bit(sq);
            file += 1;
        }

        if file != 8 {
            return Err(FenError::RankWidth {
                rank: board_rank + 1,
            });
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, FenError> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(FenError::SideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, FenError> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        rights |= match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            _ => return Err(FenError::Castling(castling_part.to_owned())),
        };
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, FenError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    parse_square(en_passant_part)
        .map(Some)
        .ok_or_else(|| FenError::EnPassant(en_passant_part.to_owned()))
}

/// The target must sit behind an enemy pawn that just double-pushed, on the
/// rank matching the side to move, with the target square itself empty.
fn validate_en_passant(game_state: &GameState, field: &str) -> Result<(), FenError> {
    let Some(ep) = game_state.en_passant_square else {
        return Ok(());
    };
    let us = game_state.side_to_move;
    let (expected_rank, victim) = match us {
        Color::White => (5, ep.wrapping_sub(8)),
        Color::Black => (2, ep.wrapping_add(8)),
    };
    if square_rank(ep) != expected_rank {
        return Err(FenError::EnPassant(field.to_owned()));
    }
    let victim_is_pawn =
        game_state.pieces[us.opposite().index()][PieceKind::Pawn.index()] & square_bit(victim) != 0;
    if !victim_is_pawn || game_state.occupancy_all & square_bit(ep) != 0 {
        return Err(FenError::EnPassant(field.to_owned()));
    }
    Ok(())
}

fn parse_counter(field: &str) -> Result<u16, FenError> {
    field
        .parse::<u16>()
        .map_err(|_| FenError::Counter(field.to_owned()))
}
