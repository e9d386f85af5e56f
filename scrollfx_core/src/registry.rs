// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-group element registries.
//!
//! Each effect group owns one [`Registry`] mapping element keys to a geometry
//! snapshot plus effect-local state. Registries are rebuilt wholesale by
//! discovery; there is no incremental update path.

use alloc::vec::Vec;

use crate::element::{ElementGeometry, ElementKey};
use crate::host::DocumentHost;

/// One (element, group) entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tracked<S> {
    /// Non-owning handle to the page element.
    pub key: ElementKey,
    /// Geometry captured at discovery.
    pub geometry: ElementGeometry,
    /// Effect-local mutable state.
    pub state: S,
}

/// Ordered set of tracked elements for one effect group.
///
/// An element appears at most once per registry.
#[derive(Clone, Debug)]
pub struct Registry<S> {
    entries: Vec<Tracked<S>>,
}

impl<S> Default for Registry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Registry<S> {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Tracks `key`, unless it is already present.
    ///
    /// Returns whether an entry was added.
    pub fn insert(&mut self, key: ElementKey, geometry: ElementGeometry, state: S) -> bool {
        if self.contains(key) {
            return false;
        }
        self.entries.push(Tracked {
            key,
            geometry,
            state,
        });
        true
    }

    /// Whether `key` is tracked.
    #[must_use]
    pub fn contains(&self, key: ElementKey) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Returns the entry for `key`.
    #[must_use]
    pub fn get(&self, key: ElementKey) -> Option<&Tracked<S>> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Number of tracked elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in discovery order.
    pub fn iter(&self) -> core::slice::Iter<'_, Tracked<S>> {
        self.entries.iter()
    }

    /// Mutable entries in discovery order.
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Tracked<S>> {
        self.entries.iter_mut()
    }
}

/// Re-scans one group: clears `registry`, then tracks every element carrying
/// `marker` that still reports geometry.
///
/// `state` builds the initial (reset) state for each element. `scratch` is a
/// reusable key buffer.
pub fn rescan<H, S>(
    registry: &mut Registry<S>,
    host: &mut H,
    marker: &str,
    scratch: &mut Vec<ElementKey>,
    mut state: impl FnMut(&H, ElementKey) -> S,
) where
    H: DocumentHost + ?Sized,
{
    registry.clear();
    scratch.clear();
    host.query(marker, scratch);
    for &key in scratch.iter() {
        let Some(geometry) = host.geometry(key) else {
            continue;
        };
        let initial = state(&*host, key);
        registry.insert(key, geometry, initial);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{Node, StaticDocument};

    #[test]
    fn insert_rejects_duplicates() {
        let mut reg: Registry<f64> = Registry::new();
        let key = ElementKey::new(3, 0);
        assert!(reg.insert(key, ElementGeometry::new(10.0, 5.0), 0.0));
        assert!(!reg.insert(key, ElementGeometry::new(99.0, 5.0), 1.0));
        assert_eq!(reg.len(), 1);
        assert_eq!(
            reg.get(key).map(|e| e.geometry.offset_top),
            Some(10.0),
            "first snapshot is kept"
        );
    }

    #[test]
    fn rescan_tracks_marked_elements_only() {
        let mut doc = StaticDocument::new(800.0, 600.0);
        doc.push(Node::new(0.0, 100.0).with_marker("glow-on-scroll"));
        doc.push(Node::new(200.0, 100.0));
        doc.push(Node::new(400.0, 100.0).with_marker("glow-on-scroll"));

        let mut reg: Registry<u8> = Registry::new();
        let mut scratch = Vec::new();
        doc.begin_scan();
        rescan(&mut reg, &mut doc, "glow-on-scroll", &mut scratch, |_, _| 0);

        let tops: Vec<f64> = reg.iter().map(|e| e.geometry.offset_top).collect();
        assert_eq!(tops, [0.0, 400.0]);
    }

    #[test]
    fn rescan_of_missing_group_is_empty() {
        let mut doc = StaticDocument::new(800.0, 600.0);
        doc.push(Node::new(0.0, 100.0).with_marker("reveal-on-scroll"));
        let mut reg: Registry<u8> = Registry::new();
        let mut scratch = Vec::new();
        doc.begin_scan();
        rescan(&mut reg, &mut doc, "text-warp", &mut scratch, |_, _| 0);
        assert!(reg.is_empty());
    }
}
