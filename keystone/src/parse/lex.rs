//! Token recognizers.
//!
//! The parser collects a token through the cursor and hands the bytes to
//! one of these functions. All of them must consume the token completely.

use nom::{bytes, character, combinator, number, IResult};

fn is_octal_digit(chr: u8) -> bool {
    (b'0'..=b'7').contains(&chr)
}

pub(crate) fn integer(token: &[u8]) -> Option<i64> {
    combinator::all_consuming(character::complete::i64::<_, ()>)(token)
        .ok()
        .map(|(_, value)| value)
}

pub(crate) fn real(token: &[u8]) -> Option<f64> {
    combinator::all_consuming(number::complete::double::<_, ()>)(token)
        .ok()
        .map(|(_, value)| value)
}

pub(crate) fn unsigned(token: &[u8]) -> Option<u64> {
    combinator::all_consuming(character::complete::u64::<_, ()>)(token)
        .ok()
        .map(|(_, value)| value)
}

/// One to three octal digits. Values above 255 keep their low byte.
pub(crate) fn octal_escape(input: &[u8]) -> IResult<&[u8], u8> {
    let (remainder, digits) = bytes::complete::take_while_m_n(1, 3, is_octal_digit)(input)?;
    let value = digits
        .iter()
        .fold(0u16, |value, digit| value * 8 + u16::from(digit - b'0'));

    Ok((remainder, (value & 0xff) as u8))
}

pub(crate) fn version(input: &[u8]) -> IResult<&[u8], (u8, u8)> {
    let (remainder, _) = bytes::complete::tag_no_case("%PDF-")(input)?;
    let (remainder, major) = character::complete::u8(remainder)?;
    let (remainder, _) = character::complete::char('.')(remainder)?;
    let (remainder, minor) = character::complete::u8(remainder)?;

    Ok((remainder, (major, minor)))
}
