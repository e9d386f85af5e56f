// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory document for tests and headless runs.
//!
//! [`StaticDocument`] implements [`DocumentHost`] over a flat list of nodes
//! with fixed document geometry. Live bounding boxes are derived from a
//! settable scroll offset, so the reveal band can be exercised without a
//! browser.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::element::{ElementGeometry, ElementKey, Viewport};
use crate::host::DocumentHost;

/// A node in a [`StaticDocument`].
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Document-space top edge.
    pub offset_top: f64,
    /// Content height.
    pub height: f64,
    /// Document-space left edge.
    pub left: f64,
    /// Width.
    pub width: f64,
    /// Group markers carried by the node.
    pub markers: Vec<&'static str>,
    /// Whether the node is still attached to the document.
    pub attached: bool,
}

impl Node {
    /// Creates an attached, unmarked node spanning 100 units horizontally.
    #[must_use]
    pub fn new(offset_top: f64, height: f64) -> Self {
        Self {
            offset_top,
            height,
            left: 0.0,
            width: 100.0,
            markers: Vec::new(),
            attached: true,
        }
    }

    /// Adds a marker.
    #[must_use]
    pub fn with_marker(mut self, marker: &'static str) -> Self {
        self.markers.push(marker);
        self
    }

    /// Sets the horizontal extent.
    #[must_use]
    pub fn with_span(mut self, left: f64, width: f64) -> Self {
        self.left = left;
        self.width = width;
        self
    }
}

/// A fixed document with a movable scroll offset.
#[derive(Clone, Debug)]
pub struct StaticDocument {
    nodes: Vec<Node>,
    viewport: Viewport,
    scroll: f64,
    epoch: u32,
}

impl StaticDocument {
    /// Creates an empty document with the given viewport size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            nodes: Vec::new(),
            viewport: Viewport::new(width, height),
            scroll: 0.0,
            epoch: 0,
        }
    }

    /// Appends a node and returns its slot.
    pub fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Mutable access to a node, e.g. to move it without a rescan.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    pub fn node_mut(&mut self, slot: usize) -> &mut Node {
        &mut self.nodes[slot]
    }

    /// Sets the scroll offset used for live bounding boxes.
    pub fn set_scroll(&mut self, offset: f64) {
        self.scroll = offset;
    }

    /// Resizes the viewport.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
    }

    /// Current discovery epoch.
    #[must_use]
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    fn resolve(&self, key: ElementKey) -> Option<&Node> {
        if key.epoch != self.epoch {
            return None;
        }
        self.nodes
            .get(key.index as usize)
            .filter(|node| node.attached)
    }
}

impl DocumentHost for StaticDocument {
    fn begin_scan(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    fn query(&mut self, marker: &str, out: &mut Vec<ElementKey>) {
        for (slot, node) in self.nodes.iter().enumerate() {
            if node.attached && node.markers.iter().any(|m| *m == marker) {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "headless documents hold far fewer than u32::MAX nodes"
                )]
                out.push(ElementKey::new(slot as u32, self.epoch));
            }
        }
    }

    fn has_marker(&self, key: ElementKey, marker: &str) -> bool {
        self.resolve(key)
            .is_some_and(|node| node.markers.iter().any(|m| *m == marker))
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn geometry(&self, key: ElementKey) -> Option<ElementGeometry> {
        self.resolve(key)
            .map(|node| ElementGeometry::new(node.offset_top, node.height))
    }

    fn bounding_box(&self, key: ElementKey) -> Option<Rect> {
        self.resolve(key).map(|node| {
            let top = node.offset_top - self.scroll;
            Rect::new(node.left, top, node.left + node.width, top + node.height)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_keys_resolve_to_none() {
        let mut doc = StaticDocument::new(800.0, 600.0);
        doc.push(Node::new(50.0, 10.0).with_marker("float-on-scroll"));
        doc.begin_scan();
        let mut keys = Vec::new();
        doc.query("float-on-scroll", &mut keys);
        let key = keys[0];
        assert!(doc.geometry(key).is_some());

        doc.begin_scan();
        assert!(doc.geometry(key).is_none(), "key from an older epoch");
    }

    #[test]
    fn detached_nodes_disappear() {
        let mut doc = StaticDocument::new(800.0, 600.0);
        let slot = doc.push(Node::new(50.0, 10.0).with_marker("glow-on-scroll"));
        doc.begin_scan();
        let mut keys = Vec::new();
        doc.query("glow-on-scroll", &mut keys);
        doc.node_mut(slot).attached = false;
        assert!(doc.bounding_box(keys[0]).is_none());
    }

    #[test]
    fn bounding_box_follows_scroll() {
        let mut doc = StaticDocument::new(800.0, 600.0);
        doc.push(Node::new(1000.0, 200.0).with_marker("reveal-on-scroll"));
        doc.begin_scan();
        let mut keys = Vec::new();
        doc.query("reveal-on-scroll", &mut keys);
        doc.set_scroll(700.0);
        let rect = doc.bounding_box(keys[0]).unwrap();
        assert_eq!(rect.y0, 300.0);
        assert_eq!(rect.y1, 500.0);
    }
}
