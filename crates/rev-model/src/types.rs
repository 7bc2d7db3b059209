// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core node types of the scene tree
//!
//! Every node lives in the [`Store`](crate::Store) node table and is addressed
//! by a [`NodeId`]. Parent and child links are ids, not ownership edges.

use crate::{Geometry, Symbol};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transparency given to a group whose parent is not a group
pub const DEFAULT_TRANSPARENCY: u8 = 0;

/// Type-safe node handle
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Index into the node table
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

impl From<NodeId> for u32 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// Discriminant of [`NodeKind`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum NodeType {
    File,
    Model,
    Group,
    Geometry,
}

impl NodeType {
    /// Display name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            NodeType::File => "File",
            NodeType::Model => "Model",
            NodeType::Group => "Group",
            NodeType::Geometry => "Geometry",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Header fields of a parsed file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileInfo {
    pub info: Symbol,
    pub note: Symbol,
    pub date: Symbol,
    pub user: Symbol,
    /// Text encoding declared by the file; empty for REV
    pub encoding: Symbol,
    /// Source path label, for diagnostics only
    pub path: Symbol,
}

/// A model inside a file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelInfo {
    pub project: Symbol,
    pub name: Symbol,
}

/// A named container of groups and geometry
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupInfo {
    pub name: Symbol,
    /// Offset in meters
    pub translation: [f32; 3],
    pub material: u32,
    /// Inherited from the nearest enclosing group at creation
    pub transparency: u8,
}

/// Key/value metadata attached to a container
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub key: Symbol,
    pub value: Symbol,
}

/// Kind-specific node payload
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    File(FileInfo),
    Model(ModelInfo),
    Group(GroupInfo),
    Geometry(Geometry),
}

/// A node of the scene tree
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub parent: Option<NodeId>,
    /// Children in discovery order
    pub children: Vec<NodeId>,
    pub attributes: Vec<Attribute>,
    pub kind: NodeKind,
}

impl Node {
    pub(crate) fn new(parent: Option<NodeId>, kind: NodeKind) -> Self {
        Self {
            parent,
            children: Vec::new(),
            attributes: Vec::new(),
            kind,
        }
    }

    /// Node discriminant
    pub fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::File(_) => NodeType::File,
            NodeKind::Model(_) => NodeType::Model,
            NodeKind::Group(_) => NodeType::Group,
            NodeKind::Geometry(_) => NodeType::Geometry,
        }
    }

    pub fn as_file(&self) -> Option<&FileInfo> {
        match &self.kind {
            NodeKind::File(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<&ModelInfo> {
        match &self.kind {
            NodeKind::Model(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&GroupInfo> {
        match &self.kind {
            NodeKind::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_geometry(&self) -> Option<&Geometry> {
        match &self.kind {
            NodeKind::Geometry(g) => Some(g),
            _ => None,
        }
    }
}
