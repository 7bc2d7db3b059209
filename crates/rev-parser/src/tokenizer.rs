// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! REV token recognizers using nom combinators
//!
//! Works on raw bytes: the format is ASCII with Latin-1 text lines, so no
//! up-front UTF-8 validation is done on the buffer.

use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{opt, recognize},
    IResult, Parser,
};
use std::borrow::Cow;

// ============================================================================
// Numbers
// ============================================================================

/// Recognize an unsigned decimal integer, optionally with a `+` sign
pub fn unsigned_literal(input: &[u8]) -> IResult<&[u8], &[u8]> {
    recognize((opt(char('+')), digit1)).parse(input)
}

/// Recognize the digits and exponent of a decimal float
fn decimal(input: &[u8]) -> IResult<&[u8], &[u8]> {
    recognize((
        opt(one_of("+-")),
        alt((
            recognize((digit1, opt((char('.'), digit0)))),
            recognize((char('.'), digit1)),
        )),
        opt((one_of("eE"), opt(one_of("+-")), digit1)),
    ))
    .parse(input)
}

/// Recognize `inf`, `infinity` or `nan`, optionally signed
fn special(input: &[u8]) -> IResult<&[u8], &[u8]> {
    recognize((
        opt(one_of("+-")),
        alt((
            tag_no_case("infinity"),
            tag_no_case("inf"),
            tag_no_case("nan"),
        )),
    ))
    .parse(input)
}

/// Recognize a float literal as written by `printf`-style producers
pub fn float_literal(input: &[u8]) -> IResult<&[u8], &[u8]> {
    alt((decimal, special)).parse(input)
}

/// Parse an unsigned 32-bit integer, returning the value and bytes consumed
pub fn parse_u32(input: &[u8]) -> Option<(u32, usize)> {
    let (_, text) = unsigned_literal(input).ok()?;
    let digits = text.strip_prefix(b"+").unwrap_or(text);
    let value = lexical_core::parse::<u32>(digits).ok()?;
    Some((value, text.len()))
}

/// Parse a 32-bit float, returning the value and bytes consumed
pub fn parse_f32(input: &[u8]) -> Option<(f32, usize)> {
    let (_, text) = float_literal(input).ok()?;
    let value = match lexical_core::parse::<f32>(text) {
        Ok(v) => v,
        Err(_) => special_value(text)?,
    };
    Some((value, text.len()))
}

fn special_value(text: &[u8]) -> Option<f32> {
    let (negative, body) = match text.first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let value = match body.first()?.to_ascii_lowercase() {
        b'i' => f32::INFINITY,
        b'n' => f32::NAN,
        _ => return None,
    };
    Some(if negative { -value } else { value })
}

// ============================================================================
// Text
// ============================================================================

/// Whitespace within a line
#[inline]
pub fn is_horizontal_space(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Strip leading and trailing spaces and tabs
pub fn trim_horizontal(mut s: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = s {
        if !is_horizontal_space(*first) {
            break;
        }
        s = rest;
    }
    while let [rest @ .., last] = s {
        if !is_horizontal_space(*last) {
            break;
        }
        s = rest;
    }
    s
}

/// Decode a text line
///
/// Valid UTF-8 is borrowed as is; anything else is read as Latin-1.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}
