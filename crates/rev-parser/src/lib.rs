// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! REV Parser - reader for the chunked REV plant-model text format
//!
//! This crate reads REV text into a [`Store`] from `rev-model`. It implements
//! the [`SceneParser`] trait defined there.
//!
//! # Features
//!
//! - **Token recognition** using `nom` combinators over raw bytes
//! - **Line scanning** using `memchr`
//! - **Fast number conversion** using `lexical-core`
//! - **Strict and tolerant modes** for malformed producers
//! - **Progress reporting** for large files
//!
//! # Example
//!
//! ```ignore
//! use rev_parser::RevParser;
//! use rev_model::{LogFacade, SceneParser};
//!
//! let parser = RevParser::new();
//! let store = parser.parse("plant.rev", &bytes, &mut LogFacade)?;
//!
//! println!("{} geometries", store.counts().geometries);
//! ```

mod chunk;
mod decoder;
mod reader;
mod scanner;
mod tokenizer;

pub use chunk::{read_header, ChunkHeader, ChunkId, CHUNK_VERSION};
pub use decoder::{decode_primitive, read_preamble, Preamble};
pub use scanner::Scanner;

use reader::Reader;
use rev_model::{LogFacade, Logger, NodeId, ProgressCallback, Result, SceneParser, Store};

/// Default limit on `CNTB` nesting
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Parse behaviour switches
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Promote tolerated anomalies to errors
    pub strict: bool,
    /// Require every chunk header to carry the version pair `1 1`
    pub validate_chunk_version: bool,
    /// Maximum group nesting depth
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict: false,
            validate_chunk_version: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Main REV parser implementing the `SceneParser` trait
///
/// This is the entry point for reading REV buffers. Each call adds one File
/// root to the destination store.
#[derive(Clone, Copy, Debug, Default)]
pub struct RevParser {
    pub options: ParseOptions,
}

impl RevParser {
    /// Create a tolerant parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser that rejects every anomaly
    pub fn strict() -> Self {
        Self::new().with_strict(true).with_chunk_version_check(true)
    }

    /// Set whether anomalies are errors
    pub fn with_strict(mut self, enabled: bool) -> Self {
        self.options.strict = enabled;
        self
    }

    /// Set whether chunk header versions are checked
    pub fn with_chunk_version_check(mut self, enabled: bool) -> Self {
        self.options.validate_chunk_version = enabled;
        self
    }

    /// Set the maximum group nesting depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = depth;
        self
    }

    /// Parse `bytes` into `store`, returning the new File node
    ///
    /// On failure the store's error string is set to the error message.
    pub fn parse_file(
        &self,
        store: &mut Store,
        logger: &mut dyn Logger,
        path: &str,
        bytes: &[u8],
    ) -> Result<NodeId> {
        let result = Reader::new(bytes, store, logger, &self.options, path).run();
        record_failure(store, path, result)
    }

    /// Parse into a fresh store with progress reporting
    pub fn parse_with_progress(
        &self,
        path: &str,
        bytes: &[u8],
        logger: &mut dyn Logger,
        on_progress: ProgressCallback,
    ) -> Result<Store> {
        on_progress("Starting", 0.0);
        let mut store = Store::new();
        let result = Reader::new(bytes, &mut store, logger, &self.options, path)
            .with_progress(&on_progress)
            .run();
        record_failure(&mut store, path, result)?;
        Ok(store)
    }
}

fn record_failure(store: &mut Store, path: &str, result: Result<NodeId>) -> Result<NodeId> {
    if let Err(err) = &result {
        log::debug!("parse of {path} failed: {err}");
        store.set_error_string(err.to_string());
    }
    result
}

impl SceneParser for RevParser {
    fn parse_into(
        &self,
        store: &mut Store,
        logger: &mut dyn Logger,
        path: &str,
        bytes: &[u8],
    ) -> Result<()> {
        self.parse_file(store, logger, path, bytes).map(|_| ())
    }
}

/// Parse `bytes` into `store` with default options
pub fn parse_rev(store: &mut Store, logger: &mut dyn Logger, path: &str, bytes: &[u8]) -> Result<()> {
    RevParser::new().parse_into(store, logger, path, bytes)
}

/// Quick parse function for simple use cases
///
/// Warnings go to the `log` facade.
pub fn parse(path: &str, bytes: &[u8]) -> Result<Store> {
    RevParser::new().parse(path, bytes, &mut LogFacade)
}

/// Parse with progress reporting
pub fn parse_with_progress(
    path: &str,
    bytes: &[u8],
    on_progress: impl Fn(&str, f32) + Send + 'static,
) -> Result<Store> {
    RevParser::new().parse_with_progress(path, bytes, &mut LogFacade, Box::new(on_progress))
}
