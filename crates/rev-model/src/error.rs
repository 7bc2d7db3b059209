// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for REV parsing operations

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Coarse classification of a [`ParseError`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// An expected integer, float or line was not found at the cursor
    Lexical,
    /// A chunk appeared where the nesting state forbids it
    Grammar,
    /// The buffer ended inside an open construct
    UnexpectedEof,
    /// A recognized but unsupported, or out of range, primitive kind
    Unsupported,
    /// A tolerated anomaly promoted to an error by strict parsing
    Strict,
}

/// Errors that can occur while reading a REV document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Expected token missing or malformed
    #[error("{context}: expected {expected} at line {line}")]
    Lexical {
        line: usize,
        context: &'static str,
        expected: &'static str,
    },

    /// Chunk not allowed in the current nesting state
    #[error("{0}")]
    Grammar(String),

    /// Identifier that is not one of the eight chunk tokens
    #[error("Unrecognized chunk '{0}'")]
    UnrecognizedChunk(String),

    /// Buffer exhausted before a construct was closed
    #[error("Unexpected EOF {0}")]
    UnexpectedEof(String),

    /// Sphere primitives are never written in the text form
    #[error("Sphere (kind=9) not supported in text format")]
    SphereUnsupported,

    /// Primitive kind outside 1..=11
    #[error("Unknown primitive kind {0}")]
    UnknownPrimitiveKind(u32),

    /// Anomaly rejected because strict parsing is enabled
    #[error("Strict mode: {0}")]
    Strict(String),
}

impl ParseError {
    /// Create a new lexical error
    pub fn lexical(line: usize, context: &'static str, expected: &'static str) -> Self {
        ParseError::Lexical {
            line,
            context,
            expected,
        }
    }

    /// Create a new grammar error
    pub fn grammar(msg: impl Into<String>) -> Self {
        ParseError::Grammar(msg.into())
    }

    /// Create a new end-of-input error
    pub fn unexpected_eof(msg: impl Into<String>) -> Self {
        ParseError::UnexpectedEof(msg.into())
    }

    /// Create a strict-mode error
    pub fn strict(msg: impl Into<String>) -> Self {
        ParseError::Strict(msg.into())
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Lexical { .. } => ErrorKind::Lexical,
            ParseError::Grammar(_) | ParseError::UnrecognizedChunk(_) => ErrorKind::Grammar,
            ParseError::UnexpectedEof(_) => ErrorKind::UnexpectedEof,
            ParseError::SphereUnsupported | ParseError::UnknownPrimitiveKind(_) => {
                ErrorKind::Unsupported
            }
            ParseError::Strict(_) => ErrorKind::Strict,
        }
    }
}
