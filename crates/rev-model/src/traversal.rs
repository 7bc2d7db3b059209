// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Depth-first traversal of a store

use crate::{Node, NodeId, NodeKind, Store, StoreVisitor};

impl Store {
    /// Walk every file root depth first, reporting to `visitor`
    pub fn apply(&self, visitor: &mut dyn StoreVisitor) {
        for &root in self.roots() {
            self.visit(root, visitor);
        }
    }

    /// Walk the subtree rooted at `id`
    pub fn apply_from(&self, id: NodeId, visitor: &mut dyn StoreVisitor) {
        if self.get(id).is_some() {
            self.visit(id, visitor);
        }
    }

    fn visit(&self, id: NodeId, visitor: &mut dyn StoreVisitor) {
        let node = self.node(id);
        match &node.kind {
            NodeKind::File(file) => {
                visitor.begin_file(self, file);
                self.visit_contents(node, visitor);
                visitor.end_file();
            }
            NodeKind::Model(model) => {
                visitor.begin_model(self, model);
                self.visit_contents(node, visitor);
                visitor.end_model();
            }
            NodeKind::Group(group) => {
                visitor.begin_group(self, group);
                self.visit_contents(node, visitor);
                visitor.end_group();
            }
            NodeKind::Geometry(geometry) => visitor.geometry(self, geometry),
        }
    }

    fn visit_contents(&self, node: &Node, visitor: &mut dyn StoreVisitor) {
        for attr in &node.attributes {
            visitor.attribute(self.str(attr.key), self.str(attr.value));
        }
        for &child in &node.children {
            self.visit(child, visitor);
        }
    }
}
