// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Chunk headers
//!
//! A header is an identifier line followed by two reserved unsigned integers.

use crate::scanner::Scanner;
use crate::tokenizer::{decode_text, trim_horizontal};
use rev_model::{GeometryClass, ParseError, Result};
use std::borrow::Cow;
use std::fmt;

/// Version pair written by every known producer
pub const CHUNK_VERSION: [u32; 2] = [1, 1];

/// The eight chunk identifiers
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ChunkId {
    Head,
    Modl,
    Cntb,
    Cnte,
    Prim,
    Obst,
    Insu,
    End,
}

impl ChunkId {
    pub fn parse(token: &str) -> Option<Self> {
        Some(match token {
            "HEAD" => ChunkId::Head,
            "MODL" => ChunkId::Modl,
            "CNTB" => ChunkId::Cntb,
            "CNTE" => ChunkId::Cnte,
            "PRIM" => ChunkId::Prim,
            "OBST" => ChunkId::Obst,
            "INSU" => ChunkId::Insu,
            "END:" => ChunkId::End,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChunkId::Head => "HEAD",
            ChunkId::Modl => "MODL",
            ChunkId::Cntb => "CNTB",
            ChunkId::Cnte => "CNTE",
            ChunkId::Prim => "PRIM",
            ChunkId::Obst => "OBST",
            ChunkId::Insu => "INSU",
            ChunkId::End => "END:",
        }
    }

    /// Geometry class for `PRIM`, `OBST` and `INSU`
    pub fn geometry_class(self) -> Option<GeometryClass> {
        match self {
            ChunkId::Prim => Some(GeometryClass::Primitive),
            ChunkId::Obst => Some(GeometryClass::Obstruction),
            ChunkId::Insu => Some(GeometryClass::Insulation),
            _ => None,
        }
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded header, identifier not yet validated
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkHeader<'a> {
    /// Identifier line, trimmed of spaces and tabs
    pub token: Cow<'a, str>,
    /// The two reserved integers
    pub version: [u32; 2],
}

impl ChunkHeader<'_> {
    /// Resolve the token to a known chunk
    pub fn id(&self) -> Result<ChunkId> {
        ChunkId::parse(&self.token)
            .ok_or_else(|| ParseError::UnrecognizedChunk(self.token.to_string()))
    }
}

/// Read the next header
///
/// Blank lines before the identifier are skipped. Returns `Ok(None)` when
/// only whitespace remains.
pub fn read_header<'a>(scanner: &mut Scanner<'a>) -> Result<Option<ChunkHeader<'a>>> {
    scanner.skip_whitespace();
    let Some(line) = scanner.read_line() else {
        return Ok(None);
    };
    let token = decode_text(trim_horizontal(line));
    let major = scanner.read_u32("chunk header")?;
    let minor = scanner.read_u32("chunk header")?;
    scanner.finish_line();
    Ok(Some(ChunkHeader {
        token,
        version: [major, minor],
    }))
}
