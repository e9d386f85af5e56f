// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal gate.
//!
//! An element is [`Visible`](RevealState::Visible) while its live bounding box
//! is inside the reveal band: top edge above `band × viewportHeight` and
//! bottom edge below the top of the viewport. Leaving the band in either
//! direction hides it again, so scrolling back re-triggers the reveal.
//!
//! The band is asymmetric: an element is revealed while still mostly below
//! the fold, and only released once it has fully scrolled past the top.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::config::RevealConfig;
use crate::element::{ElementKey, Viewport};
use crate::host::DocumentHost;
use crate::publish::PublishedStore;
use crate::registry::{Registry, rescan};

/// Per-element reveal state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RevealState {
    /// Outside the band.
    #[default]
    Hidden,
    /// Inside the band.
    Visible,
}

impl RevealState {
    /// Whether the reveal marker is set.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// Updater for the reveal group.
#[derive(Clone, Debug)]
pub struct Reveal {
    config: RevealConfig,
    registry: Registry<RevealState>,
}

impl Reveal {
    /// Creates an updater with an empty registry.
    #[must_use]
    pub const fn new(config: RevealConfig) -> Self {
        Self {
            config,
            registry: Registry::new(),
        }
    }

    /// Tracked elements.
    #[must_use]
    pub fn registry(&self) -> &Registry<RevealState> {
        &self.registry
    }

    /// State for `key`.
    #[must_use]
    pub fn state(&self, key: ElementKey) -> Option<RevealState> {
        self.registry.get(key).map(|t| t.state)
    }

    /// Rebuilds the registry; every element starts hidden.
    pub fn discover<H: DocumentHost + ?Sized>(
        &mut self,
        host: &mut H,
        marker: &str,
        scratch: &mut Vec<ElementKey>,
    ) {
        rescan(&mut self.registry, host, marker, scratch, |_, _| {
            RevealState::Hidden
        });
    }

    /// Whether a viewport-relative box lies in the reveal band.
    #[must_use]
    pub fn in_band(&self, rect: &Rect, viewport: &Viewport) -> bool {
        in_band(self.config.band, rect, viewport)
    }

    /// Re-evaluates every element from its live bounding box.
    ///
    /// Elements the host can no longer resolve keep their previous state.
    pub fn update<H: DocumentHost + ?Sized>(&mut self, host: &H, viewport: &Viewport) {
        let band = self.config.band;
        for tracked in self.registry.iter_mut() {
            let Some(rect) = host.bounding_box(tracked.key) else {
                continue;
            };
            tracked.state = if in_band(band, &rect, viewport) {
                RevealState::Visible
            } else {
                RevealState::Hidden
            };
        }
    }

    /// Publishes every element's marker.
    pub fn publish(&self, store: &mut PublishedStore) {
        for tracked in self.registry.iter() {
            store.publish_reveal(tracked.key, tracked.state.is_visible());
        }
    }
}

fn in_band(band: f64, rect: &Rect, viewport: &Viewport) -> bool {
    rect.y0 < viewport.height * band && rect.y1 > 0.0
}
