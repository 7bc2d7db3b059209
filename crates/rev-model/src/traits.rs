// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core traits for REV parsing and traversal
//!
//! These traits define the boundaries of the store: parsers fill it, loggers
//! receive non-fatal diagnostics, visitors consume the finished tree.

use crate::{FileInfo, Geometry, GroupInfo, ModelInfo, Result, Store};
use serde::{Deserialize, Serialize};

/// Progress callback type for parsing operations
pub type ProgressCallback = Box<dyn Fn(&str, f32) + Send>;

/// Severity of a diagnostic message
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info = 0,
    Warning = 1,
    Error = 2,
}

/// Sink for non-fatal diagnostics raised while parsing
///
/// Any `FnMut(Severity, &str)` closure is a logger.
pub trait Logger {
    fn log(&mut self, severity: Severity, message: &str);
}

impl<F: FnMut(Severity, &str)> Logger for F {
    fn log(&mut self, severity: Severity, message: &str) {
        self(severity, message)
    }
}

/// Logger forwarding to the `log` crate macros
#[derive(Clone, Copy, Debug, Default)]
pub struct LogFacade;

impl Logger for LogFacade {
    fn log(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => log::info!("{message}"),
            Severity::Warning => log::warn!("{message}"),
            Severity::Error => log::error!("{message}"),
        }
    }
}

/// Main parsing interface - entry point for reading a scene into a store
///
/// # Example
///
/// ```ignore
/// use rev_model::{SceneParser, LogFacade};
///
/// let parser: Box<dyn SceneParser> = get_parser();
/// let store = parser.parse("plant.rev", &bytes, &mut LogFacade)?;
/// println!("{} groups", store.counts().groups);
/// ```
pub trait SceneParser: Send + Sync {
    /// Parse `bytes` into an existing store
    ///
    /// # Arguments
    /// * `store` - Destination store; receives one new file root
    /// * `logger` - Receives non-fatal diagnostics
    /// * `path` - Label used in diagnostics only
    /// * `bytes` - The complete document
    ///
    /// On failure the store's error string is set to the error message.
    fn parse_into(
        &self,
        store: &mut Store,
        logger: &mut dyn Logger,
        path: &str,
        bytes: &[u8],
    ) -> Result<()>;

    /// Parse `bytes` into a fresh store
    fn parse(&self, path: &str, bytes: &[u8], logger: &mut dyn Logger) -> Result<Store> {
        let mut store = Store::new();
        self.parse_into(&mut store, logger, path, bytes)?;
        Ok(store)
    }
}

/// Depth-first traversal callbacks
///
/// Calls arrive in document order. `attribute` calls for a container follow
/// its `begin_*` call and precede its children. Every method defaults to a
/// no-op so visitors implement only what they need.
pub trait StoreVisitor {
    fn begin_file(&mut self, _store: &Store, _file: &FileInfo) {}

    fn end_file(&mut self) {}

    fn begin_model(&mut self, _store: &Store, _model: &ModelInfo) {}

    fn end_model(&mut self) {}

    fn begin_group(&mut self, _store: &Store, _group: &GroupInfo) {}

    fn end_group(&mut self) {}

    fn attribute(&mut self, _key: &str, _value: &str) {}

    fn geometry(&mut self, _store: &Store, _geometry: &Geometry) {}
}
