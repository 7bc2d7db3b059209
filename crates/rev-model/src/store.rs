// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene store - owner of every node, string and geometry payload
//!
//! Nodes are appended to one table and never removed. Group and geometry
//! fields are written once, at creation; the only later write is
//! [`Store::add_attribute`], which appends metadata without touching the
//! node's identity.

use crate::{
    Arena, Attribute, BBox3, Contour, FacetGroup, FileInfo, Geometry, GeometryClass, GroupInfo,
    Mat3x4, ModelInfo, Node, NodeId, NodeKind, NodeType, ParseError, Polygon, Primitive, Result,
    Span, StringInterner, Symbol, DEFAULT_TRANSPARENCY,
};
use serde::{Deserialize, Serialize};

/// Aggregate counters, refreshed by [`Store::update_counts`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCounts {
    pub nodes: usize,
    pub files: usize,
    pub models: usize,
    pub groups: usize,
    pub geometries: usize,
    pub facet_polygons: usize,
    pub facet_contours: usize,
    pub facet_vertices: usize,
}

/// Owning container for one or more parsed scene trees
#[derive(Debug, Default)]
pub struct Store {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    strings: StringInterner,
    floats: Arena<f32>,
    contours: Arena<Contour>,
    polygons: Arena<Polygon>,
    next_geometry_id: u32,
    counts: StoreCounts,
    error: Option<String>,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Node creation
    // ========================================================================

    fn push_node(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(parent, kind));
        match parent {
            Some(p) => self.nodes[p.index()].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    fn expect_parent(&self, parent: NodeId, allowed: &[NodeType], what: &str) -> Result<NodeType> {
        let node = self
            .get(parent)
            .ok_or_else(|| ParseError::grammar(format!("{what}: unknown parent {parent}")))?;
        let ty = node.node_type();
        if allowed.contains(&ty) {
            Ok(ty)
        } else {
            Err(ParseError::grammar(format!("{what} cannot be a child of a {ty}")))
        }
    }

    /// Create a file root
    pub fn new_file(&mut self, info: FileInfo) -> NodeId {
        self.push_node(None, NodeKind::File(info))
    }

    /// Create a model under a file
    pub fn new_model(&mut self, parent: NodeId, project: Symbol, name: Symbol) -> Result<NodeId> {
        self.expect_parent(parent, &[NodeType::File], "Model")?;
        Ok(self.push_node(Some(parent), NodeKind::Model(ModelInfo { project, name })))
    }

    /// Create a group under a model or group
    ///
    /// Transparency is copied from the parent when the parent is a group.
    pub fn new_group(
        &mut self,
        parent: NodeId,
        name: Symbol,
        translation: [f32; 3],
        material: u32,
    ) -> Result<NodeId> {
        self.expect_parent(parent, &[NodeType::Model, NodeType::Group], "Group")?;
        let transparency = self
            .group_transparency(parent)
            .unwrap_or(DEFAULT_TRANSPARENCY);
        let info = GroupInfo {
            name,
            translation,
            material,
            transparency,
        };
        Ok(self.push_node(Some(parent), NodeKind::Group(info)))
    }

    /// Create a geometry leaf under a group
    ///
    /// The world bounding box is derived here from `bbox_local` and `transform`.
    pub fn new_geometry(
        &mut self,
        parent: NodeId,
        class: GeometryClass,
        transform: Mat3x4,
        bbox_local: BBox3,
        primitive: Primitive,
    ) -> Result<NodeId> {
        self.expect_parent(parent, &[NodeType::Group], "Geometry")?;
        let transparency = self
            .group_transparency(parent)
            .unwrap_or(DEFAULT_TRANSPARENCY);
        let id = self.next_geometry_id;
        self.next_geometry_id += 1;
        let geometry = Geometry::new(id, class, transparency, transform, bbox_local, primitive);
        Ok(self.push_node(Some(parent), NodeKind::Geometry(geometry)))
    }

    /// Attach key/value metadata to a node
    pub fn add_attribute(&mut self, node: NodeId, key: &str, value: &str) -> Result<()> {
        let key = self.strings.intern(key);
        let value = self.strings.intern(value);
        let target = self
            .nodes
            .get_mut(node.index())
            .ok_or_else(|| ParseError::grammar(format!("attribute on unknown {node}")))?;
        target.attributes.push(Attribute { key, value });
        Ok(())
    }

    fn group_transparency(&self, id: NodeId) -> Option<u8> {
        self.get(id)?.as_group().map(|g| g.transparency)
    }

    // ========================================================================
    // Strings
    // ========================================================================

    /// Intern a string
    pub fn intern(&mut self, s: &str) -> Symbol {
        self.strings.intern(s)
    }

    /// Text of an interned string
    pub fn str(&self, sym: Symbol) -> &str {
        self.strings.resolve(sym)
    }

    // ========================================================================
    // Geometry arena
    // ========================================================================

    /// Reserve `len` floats for facet data
    pub fn alloc_floats(&mut self, len: usize) -> Span<f32> {
        self.floats.alloc(len)
    }

    pub fn floats_mut(&mut self, span: Span<f32>) -> &mut [f32] {
        self.floats.get_mut(span)
    }

    /// Reserve `len` contours
    pub fn alloc_contours(&mut self, len: usize) -> Span<Contour> {
        self.contours.alloc(len)
    }

    pub fn contours_mut(&mut self, span: Span<Contour>) -> &mut [Contour] {
        self.contours.get_mut(span)
    }

    /// Reserve `len` polygons
    pub fn alloc_polygons(&mut self, len: usize) -> Span<Polygon> {
        self.polygons.alloc(len)
    }

    pub fn polygons_mut(&mut self, span: Span<Polygon>) -> &mut [Polygon] {
        self.polygons.get_mut(span)
    }

    /// Polygons of a facet group
    pub fn polygons(&self, facets: &FacetGroup) -> &[Polygon] {
        self.polygons.get(facets.polygons)
    }

    /// Contours of a polygon
    pub fn contours(&self, polygon: &Polygon) -> &[Contour] {
        self.contours.get(polygon.contours)
    }

    /// Raw interleaved position/normal floats of a contour
    pub fn contour_data(&self, contour: &Contour) -> &[f32] {
        self.floats.get(contour.data)
    }

    /// (position, normal) pairs of a contour in stream order
    pub fn contour_vertices<'s>(
        &'s self,
        contour: &Contour,
    ) -> impl Iterator<Item = ([f32; 3], [f32; 3])> + 's {
        self.contour_data(contour)
            .chunks_exact(6)
            .map(|v| ([v[0], v[1], v[2]], [v[3], v[4], v[5]]))
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Node by id
    ///
    /// # Panics
    /// Panics if `id` was not created by this store.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// File roots in parse order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// All nodes with their ids, in creation (document) order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// All geometry leaves in document order
    pub fn geometries(&self) -> impl Iterator<Item = &Geometry> {
        self.nodes.iter().filter_map(Node::as_geometry)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ========================================================================
    // Bookkeeping
    // ========================================================================

    /// Recompute [`StoreCounts`] from the node table
    pub fn update_counts(&mut self) {
        let mut counts = StoreCounts {
            nodes: self.nodes.len(),
            ..StoreCounts::default()
        };
        for node in &self.nodes {
            match &node.kind {
                NodeKind::File(_) => counts.files += 1,
                NodeKind::Model(_) => counts.models += 1,
                NodeKind::Group(_) => counts.groups += 1,
                NodeKind::Geometry(g) => {
                    counts.geometries += 1;
                    if let Primitive::FacetGroup(facets) = &g.primitive {
                        for polygon in self.polygons(facets) {
                            counts.facet_polygons += 1;
                            for contour in self.contours(polygon) {
                                counts.facet_contours += 1;
                                counts.facet_vertices += contour.vertices_n as usize;
                            }
                        }
                    }
                }
            }
        }
        self.counts = counts;
    }

    /// Counters as of the last [`Store::update_counts`]
    pub fn counts(&self) -> StoreCounts {
        self.counts
    }

    /// Record the diagnostic of a failed parse
    pub fn set_error_string(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Diagnostic of the last failed parse, if any
    pub fn error_string(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
