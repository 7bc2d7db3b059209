// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Byte cursor over a REV buffer
//!
//! Uses memchr for line scanning. Numeric fields skip any whitespace before
//! them, so values may be split across lines; text fields are whole lines
//! read from the cursor without skipping.

use crate::tokenizer::{is_horizontal_space, parse_f32, parse_u32};
use memchr::{memchr, memchr_iter};
use rev_model::{ParseError, Result};

/// Cursor over an immutable byte buffer
pub struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    /// 1-based line of `pos`, kept in step with every advance
    line: usize,
}

impl<'a> Scanner<'a> {
    /// Create a scanner positioned at the start of `bytes`
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            line: 1,
        }
    }

    /// Current byte offset
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total buffer length
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Unread bytes
    pub fn remaining(&self) -> &'a [u8] {
        self.bytes.get(self.pos..).unwrap_or(&[])
    }

    /// 1-based line of the cursor
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Move the cursor `n` bytes, counting the line breaks passed over
    fn advance(&mut self, n: usize) {
        let end = (self.pos + n).min(self.bytes.len());
        self.line += memchr_iter(b'\n', &self.bytes[self.pos..end]).count();
        self.pos = end;
    }

    /// Skip spaces, tabs and line breaks
    pub fn skip_whitespace(&mut self) {
        let n = self
            .remaining()
            .iter()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        self.advance(n);
    }

    /// Skip whitespace and stray commas between numeric fields
    fn skip_separators(&mut self) {
        let n = self
            .remaining()
            .iter()
            .take_while(|b| b.is_ascii_whitespace() || **b == b',')
            .count();
        self.advance(n);
    }

    /// Read up to the next `\n`, without the terminator or a trailing `\r`
    ///
    /// Returns `None` only when the cursor is already at the end.
    pub fn read_line(&mut self) -> Option<&'a [u8]> {
        let rest = self.remaining();
        if rest.is_empty() {
            return None;
        }
        let (line, consumed) = match memchr(b'\n', rest) {
            Some(i) => {
                self.line += 1;
                (&rest[..i], i + 1)
            }
            None => (rest, rest.len()),
        };
        self.pos += consumed;
        Some(line.strip_suffix(b"\r").unwrap_or(line))
    }

    /// Read a text line, failing at end of input
    pub fn expect_line(&mut self, context: &'static str) -> Result<&'a [u8]> {
        match self.read_line() {
            Some(line) => Ok(line),
            None => Err(ParseError::lexical(self.line, context, "line")),
        }
    }

    /// Consume trailing spaces and tabs plus one line terminator, if present
    pub fn finish_line(&mut self) {
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| is_horizontal_space(*b))
        {
            self.pos += 1;
        }
        if self.bytes.get(self.pos) == Some(&b'\r') && self.bytes.get(self.pos + 1) == Some(&b'\n')
        {
            self.pos += 2;
            self.line += 1;
        } else if self.bytes.get(self.pos) == Some(&b'\n') {
            self.pos += 1;
            self.line += 1;
        }
    }

    /// Read an unsigned 32-bit integer
    pub fn read_u32(&mut self, context: &'static str) -> Result<u32> {
        self.skip_separators();
        match parse_u32(self.remaining()) {
            Some((value, len)) => {
                self.pos += len;
                Ok(value)
            }
            None => Err(ParseError::lexical(self.line_number(), context, "integer")),
        }
    }

    /// Read a 32-bit float
    pub fn read_f32(&mut self, context: &'static str) -> Result<f32> {
        self.skip_separators();
        match parse_f32(self.remaining()) {
            Some((value, len)) => {
                self.pos += len;
                Ok(value)
            }
            None => Err(ParseError::lexical(self.line_number(), context, "float")),
        }
    }

    /// Read `N` floats
    pub fn read_floats<const N: usize>(&mut self, context: &'static str) -> Result<[f32; N]> {
        let mut out = [0.0; N];
        for slot in &mut out {
            *slot = self.read_f32(context)?;
        }
        Ok(out)
    }

    /// Read `N` floats and the end of their line
    pub fn read_record<const N: usize>(&mut self, context: &'static str) -> Result<[f32; N]> {
        let values = self.read_floats(context)?;
        self.finish_line();
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rev_model::ErrorKind;

    #[test]
    fn test_lines_and_crlf() {
        let mut s = Scanner::new(b"first\r\nsecond\n\nlast");
        assert_eq!(s.read_line(), Some(&b"first"[..]));
        assert_eq!(s.line_number(), 2);
        assert_eq!(s.read_line(), Some(&b"second"[..]));
        assert_eq!(s.read_line(), Some(&b""[..]));
        assert_eq!(s.read_line(), Some(&b"last"[..]));
        assert_eq!(s.read_line(), None);
        assert!(s.is_at_end());
    }

    #[test]
    fn test_numbers_span_lines() {
        let mut s = Scanner::new(b"  1000.0 2000.0\n 3000.0  \n7\nname\n");
        let t: [f32; 3] = s.read_floats("translation").unwrap();
        assert_eq!(t, [1000.0, 2000.0, 3000.0]);
        s.finish_line();
        assert_eq!(s.read_u32("material").unwrap(), 7);
        s.finish_line();
        assert_eq!(s.read_line(), Some(&b"name"[..]));
    }

    #[test]
    fn test_commas_are_separators() {
        let mut s = Scanner::new(b"1.5, 2.5 ,3.5");
        assert_eq!(s.read_record::<3>("vec").unwrap(), [1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_lexical_error_reports_line() {
        let mut s = Scanner::new(b"1 2\n3 x\n");
        let err = s.read_floats::<4>("matrix row").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lexical);
        assert_eq!(err.to_string(), "matrix row: expected float at line 2");
    }

    #[test]
    fn test_line_number_follows_every_advance() {
        let text = b"HEAD\n  1  1\n\n info\r\n 1.0,\n 2.0\n\t3.0  \r\n 7\nname";
        let recount = |s: &Scanner| memchr_iter(b'\n', &text[..s.position()]).count() + 1;

        let mut s = Scanner::new(text);
        assert_eq!(s.read_line(), Some(&b"HEAD"[..]));
        assert_eq!(s.line_number(), recount(&s));
        assert_eq!(s.read_u32("version").unwrap(), 1);
        assert_eq!(s.read_u32("version").unwrap(), 1);
        s.finish_line();
        assert_eq!(s.line_number(), recount(&s));
        s.skip_whitespace();
        assert_eq!(s.line_number(), 4);
        assert_eq!(s.expect_line("info").unwrap(), b"info");
        assert_eq!(s.read_record::<3>("vec").unwrap(), [1.0, 2.0, 3.0]);
        assert_eq!(s.line_number(), recount(&s));
        assert_eq!(s.read_u32("material").unwrap(), 7);
        s.finish_line();
        assert_eq!(s.expect_line("name").unwrap(), b"name");
        assert_eq!(s.line_number(), 9);
        assert_eq!(s.line_number(), recount(&s));
    }

    #[test]
    fn test_many_text_lines_keep_line_count() {
        let text = "NAME\n".repeat(5000);
        let mut s = Scanner::new(text.as_bytes());
        for expected in 1..=5000 {
            assert_eq!(s.line_number(), expected);
            s.expect_line("name").unwrap();
        }
        let err = s.expect_line("name").unwrap_err();
        assert_eq!(err.to_string(), "name: expected line at line 5001");
    }

    #[test]
    fn test_expect_line_at_end() {
        let mut s = Scanner::new(b"");
        assert!(s.expect_line("HEAD info").is_err());
        assert!(s.read_u32("kind").is_err());
    }
}
