// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Values published to the presentation layer.
//!
//! Updaters write their clamped per-element results into a
//! [`PublishedStore`]. A write only counts as a change when it moves the value
//! by more than [`PUBLISH_EPSILON`] from what was last published, or flips a
//! marker. [`PublishedStore::collect_changes`] drains the dirty channels into
//! a [`FrameChanges`] so presenters touch only elements whose output moved.
//!
//! Indices in [`FrameChanges`] are raw [`ElementKey::index`] values; the store
//! is reset on every discovery, so they always belong to the current epoch.

use alloc::vec::Vec;

use understory_dirty::{Channel, CycleHandling, DirtyTracker};

use crate::dirty;
use crate::element::ElementKey;

/// Smallest change in a continuous value worth writing to the page.
pub const PUBLISH_EPSILON: f64 = 1e-3;

/// A continuous value paired with its boundary marker.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Level {
    /// Published value.
    pub value: f64,
    /// Whether the marker gating the visual is set.
    pub active: bool,
}

/// Everything published for one element. `None` means the element is not in
/// that group.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Published {
    /// Reveal marker.
    pub revealed: Option<bool>,
    /// Vertical parallax offset.
    pub parallax: Option<f64>,
    /// Glow intensity and active marker.
    pub glow: Option<Level>,
    /// Vertical float offset.
    pub float: Option<f64>,
    /// Warp amount and active marker.
    pub warp: Option<Level>,
}

/// The changes produced by one [`PublishedStore::collect_changes`] call.
#[derive(Clone, Debug, Default)]
pub struct FrameChanges {
    /// Elements whose reveal marker flipped.
    pub reveal: Vec<u32>,
    /// Elements whose parallax offset moved.
    pub parallax: Vec<u32>,
    /// Elements whose glow changed.
    pub glow: Vec<u32>,
    /// Elements whose float offset moved.
    pub float: Vec<u32>,
    /// Elements whose warp changed.
    pub warp: Vec<u32>,
    /// Discovery ran since the previous collection.
    pub rediscovered: bool,
    /// Scrolling went idle since the previous collection.
    pub settled: bool,
}

impl FrameChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.reveal.clear();
        self.parallax.clear();
        self.glow.clear();
        self.float.clear();
        self.warp.clear();
        self.rediscovered = false;
        self.settled = false;
    }

    /// Whether the presenter has nothing to do.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reveal.is_empty()
            && self.parallax.is_empty()
            && self.glow.is_empty()
            && self.float.is_empty()
            && self.warp.is_empty()
            && !self.rediscovered
            && !self.settled
    }

    /// Total number of per-element writes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reveal.len()
            + self.parallax.len()
            + self.glow.len()
            + self.float.len()
            + self.warp.len()
    }
}

/// Per-element published values with change tracking.
#[derive(Debug)]
pub struct PublishedStore {
    slots: Vec<Published>,
    dirty: DirtyTracker<u32>,
    rediscovered: bool,
    settled: bool,
}

impl Default for PublishedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PublishedStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            rediscovered: false,
            settled: false,
        }
    }

    /// Forgets every published value; called by discovery.
    ///
    /// The next publish for each element is always reported as a change, so
    /// the presentation layer snaps to the reset state.
    pub fn reset(&mut self) {
        self.slots.clear();
        for channel in dirty::ALL {
            let _: Vec<u32> = self.dirty.drain(channel).deterministic().run().collect();
        }
        self.rediscovered = true;
    }

    /// Records that scrolling went idle.
    pub fn mark_settled(&mut self) {
        self.settled = true;
    }

    /// Everything published for the element at `index`.
    #[must_use]
    pub fn get(&self, index: u32) -> Option<&Published> {
        self.slots.get(index as usize)
    }

    /// Reveal marker at `index`.
    #[must_use]
    pub fn revealed(&self, index: u32) -> Option<bool> {
        self.get(index).and_then(|p| p.revealed)
    }

    /// Parallax offset at `index`.
    #[must_use]
    pub fn parallax(&self, index: u32) -> Option<f64> {
        self.get(index).and_then(|p| p.parallax)
    }

    /// Glow at `index`.
    #[must_use]
    pub fn glow(&self, index: u32) -> Option<Level> {
        self.get(index).and_then(|p| p.glow)
    }

    /// Float offset at `index`.
    #[must_use]
    pub fn float(&self, index: u32) -> Option<f64> {
        self.get(index).and_then(|p| p.float)
    }

    /// Warp at `index`.
    #[must_use]
    pub fn warp(&self, index: u32) -> Option<Level> {
        self.get(index).and_then(|p| p.warp)
    }

    /// Publishes a reveal marker.
    pub fn publish_reveal(&mut self, key: ElementKey, revealed: bool) {
        let slot = self.slot_mut(key);
        if slot.revealed != Some(revealed) {
            slot.revealed = Some(revealed);
            self.dirty.mark(key.index, dirty::REVEAL);
        }
    }

    /// Publishes a parallax offset.
    pub fn publish_parallax(&mut self, key: ElementKey, offset: f64) {
        let slot = self.slot_mut(key);
        if value_moved(slot.parallax, offset) {
            slot.parallax = Some(offset);
            self.dirty.mark(key.index, dirty::PARALLAX);
        }
    }

    /// Publishes a glow intensity and marker.
    pub fn publish_glow(&mut self, key: ElementKey, level: Level) {
        let slot = self.slot_mut(key);
        if level_moved(slot.glow, level) {
            slot.glow = Some(level);
            self.dirty.mark(key.index, dirty::GLOW);
        }
    }

    /// Publishes a float offset.
    pub fn publish_float(&mut self, key: ElementKey, offset: f64) {
        let slot = self.slot_mut(key);
        if value_moved(slot.float, offset) {
            slot.float = Some(offset);
            self.dirty.mark(key.index, dirty::FLOAT);
        }
    }

    /// Publishes a warp amount and marker.
    pub fn publish_warp(&mut self, key: ElementKey, level: Level) {
        let slot = self.slot_mut(key);
        if level_moved(slot.warp, level) {
            slot.warp = Some(level);
            self.dirty.mark(key.index, dirty::WARP);
        }
    }

    /// Drains all channels into `changes`.
    pub fn collect_changes(&mut self, changes: &mut FrameChanges) {
        changes.clear();
        changes.reveal = self.drain(dirty::REVEAL);
        changes.parallax = self.drain(dirty::PARALLAX);
        changes.glow = self.drain(dirty::GLOW);
        changes.float = self.drain(dirty::FLOAT);
        changes.warp = self.drain(dirty::WARP);
        changes.rediscovered = core::mem::take(&mut self.rediscovered);
        changes.settled = core::mem::take(&mut self.settled);
    }

    fn drain(&mut self, channel: Channel) -> Vec<u32> {
        self.dirty.drain(channel).deterministic().run().collect()
    }

    fn slot_mut(&mut self, key: ElementKey) -> &mut Published {
        let idx = key.index as usize;
        if self.slots.len() <= idx {
            self.slots.resize_with(idx + 1, Published::default);
        }
        &mut self.slots[idx]
    }
}

fn value_moved(previous: Option<f64>, next: f64) -> bool {
    previous.is_none_or(|prev| (next - prev).abs() > PUBLISH_EPSILON)
}

fn level_moved(previous: Option<Level>, next: Level) -> bool {
    previous.is_none_or(|prev| {
        prev.active != next.active || (next.value - prev.value).abs() > PUBLISH_EPSILON
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(index: u32) -> ElementKey {
        ElementKey::new(index, 1)
    }

    #[test]
    fn first_publish_is_always_a_change() {
        let mut store = PublishedStore::new();
        store.publish_parallax(key(2), 0.0);
        let mut changes = FrameChanges::default();
        store.collect_changes(&mut changes);
        assert_eq!(changes.parallax, [2]);
        assert_eq!(store.parallax(2), Some(0.0));
    }

    #[test]
    fn sub_epsilon_moves_are_held_back() {
        let mut store = PublishedStore::new();
        let mut changes = FrameChanges::default();
        store.publish_float(key(0), 1.0);
        store.collect_changes(&mut changes);

        store.publish_float(key(0), 1.0004);
        store.collect_changes(&mut changes);
        assert!(changes.float.is_empty(), "tiny move should not be written");
        assert_eq!(store.float(0), Some(1.0), "last published value is kept");

        store.publish_float(key(0), 1.0008);
        store.publish_float(key(0), 1.002);
        store.collect_changes(&mut changes);
        assert_eq!(changes.float, [0], "accumulated drift is written");
    }

    #[test]
    fn marker_flip_is_a_change_even_without_value_move() {
        let mut store = PublishedStore::new();
        let mut changes = FrameChanges::default();
        store.publish_glow(
            key(1),
            Level {
                value: 0.1,
                active: false,
            },
        );
        store.collect_changes(&mut changes);
        store.publish_glow(
            key(1),
            Level {
                value: 0.1,
                active: true,
            },
        );
        store.collect_changes(&mut changes);
        assert_eq!(changes.glow, [1]);
    }

    #[test]
    fn reset_reports_rediscovery_and_forgets_values() {
        let mut store = PublishedStore::new();
        let mut changes = FrameChanges::default();
        store.publish_reveal(key(0), true);
        store.reset();
        store.collect_changes(&mut changes);
        assert!(changes.rediscovered);
        assert!(changes.reveal.is_empty(), "pending marks are dropped on reset");
        assert_eq!(store.revealed(0), None);

        store.collect_changes(&mut changes);
        assert!(changes.is_empty());
    }

    #[test]
    fn settled_is_one_shot() {
        let mut store = PublishedStore::new();
        let mut changes = FrameChanges::default();
        store.mark_settled();
        store.collect_changes(&mut changes);
        assert!(changes.settled);
        store.collect_changes(&mut changes);
        assert!(!changes.settled);
    }
}
