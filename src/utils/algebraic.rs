//! Square name conversions (`e4` <-> 28).

use crate::game_state::chess_types::Square;

/// Parse a two-character square name. Returns `None` for anything else.
#[inline]
pub fn parse_square(name: &str) -> Option<Square> {
    let bytes = name.as_bytes();
    if bytes.len() != 2 {
        return None;
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }

    Some((rank - b'1') * 8 + (file - b'a'))
}

/// Square name for an index in `0..=63`.
#[inline]
pub fn square_name(square: Square) -> String {
    let mut out = String::with_capacity(2);
    out.push(file_char(square));
    out.push(rank_char(square));
    out
}

#[inline]
pub fn file_char(square: Square) -> char {
    char::from(b'a' + (square % 8))
}

#[inline]
pub fn rank_char(square: Square) -> char {
    char::from(b'1' + (square / 8) % 8)
}

#[cfg(test)]
mod tests {
    use super::{parse_square, square_name};

    #[test]
    fn corner_squares() {
        assert_eq!(parse_square("a1"), Some(0));
        assert_eq!(parse_square("h8"), Some(63));
        assert_eq!(square_name(0), "a1");
        assert_eq!(square_name(28), "e4");
        assert_eq!(square_name(63), "h8");
    }

    #[test]
    fn rejects_out_of_range_names() {
        assert_eq!(parse_square("i1"), None);
        assert_eq!(parse_square("a9"), None);
        assert_eq!(parse_square("a"), None);
        assert_eq!(parse_square("a10"), None);
        assert_eq!(parse_square("A1"), None);
    }
}
