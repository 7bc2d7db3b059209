// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! REV Model - Scene store and shared types for REV plant models
//!
//! This crate provides the in-memory representation of a parsed REV document:
//! a [`Store`] that owns every node, every interned string and every variable
//! length geometry payload of one or more parsed files. Parsers write into the
//! store; consumers walk it through the [`StoreVisitor`] trait.
//!
//! # Architecture
//!
//! - [`Store`] - owns the node table, the [`StringInterner`] and the geometry arenas
//! - [`Node`] / [`NodeKind`] - File, Model, Group and Geometry nodes addressed by [`NodeId`]
//! - [`Geometry`] / [`Primitive`] - a transformed primitive with its decoded payload
//! - [`SceneParser`] - entry point implemented by format readers
//! - [`StoreVisitor`] - depth-first traversal callbacks
//! - [`Logger`] - sink for non-fatal diagnostics raised while parsing
//!
//! # Example
//!
//! ```ignore
//! use rev_model::{SceneParser, Store, StoreVisitor};
//!
//! let parser = get_parser();
//! let store = parser.parse("plant.rev", &bytes, &mut rev_model::LogFacade)?;
//! println!("{} geometries", store.counts().geometries);
//! store.apply(&mut my_exporter);
//! ```

pub mod arena;
pub mod error;
pub mod geometry;
pub mod interner;
pub mod linalg;
pub mod store;
pub mod traits;
pub mod traversal;
pub mod types;

// Re-export all public types
pub use arena::*;
pub use error::*;
pub use geometry::*;
pub use interner::*;
pub use linalg::*;
pub use store::*;
pub use traits::*;
pub use types::*;
