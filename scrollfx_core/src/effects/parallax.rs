// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth-tiered parallax.

use crate::config::{Markers, ParallaxConfig};
use crate::element::{ElementGeometry, ElementKey};
use crate::host::DocumentHost;
use crate::publish::PublishedStore;

use super::{EffectGroup, FrameInput, Motion, ScrollCoupled};

/// Parallax tier, fixed at discovery from mutually exclusive depth markers.
///
/// The tier multiplies the base factor, so at equal distance a tier-3
/// element targets three times the offset of a tier-1 element (before
/// clamping).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParallaxDepth {
    /// Carries the first depth marker.
    Tier1,
    /// Carries the second depth marker.
    Tier2,
    /// Carries the third depth marker, or none of them.
    #[default]
    Tier3,
}

impl ParallaxDepth {
    /// Integer tier (1, 2 or 3).
    #[must_use]
    pub const fn tier(self) -> u8 {
        match self {
            Self::Tier1 => 1,
            Self::Tier2 => 2,
            Self::Tier3 => 3,
        }
    }

    /// Multiplier applied to the base factor.
    #[must_use]
    pub fn multiplier(self) -> f64 {
        f64::from(self.tier())
    }
}

/// Vertical offset proportional to the signed distance between the viewport
/// center and the element center.
#[derive(Clone, Copy, Debug)]
pub struct Parallax {
    config: ParallaxConfig,
    depth_1: &'static str,
    depth_2: &'static str,
    depth_3: &'static str,
}

impl Parallax {
    /// Creates the effect, reading depth markers from `markers`.
    #[must_use]
    pub fn new(config: ParallaxConfig, markers: &Markers) -> Self {
        Self {
            config,
            depth_1: markers.parallax_depth_1,
            depth_2: markers.parallax_depth_2,
            depth_3: markers.parallax_depth_3,
        }
    }
}

impl ScrollCoupled for Parallax {
    type Params = ParallaxDepth;

    const GROUP: EffectGroup = EffectGroup::Parallax;

    fn params<H: DocumentHost + ?Sized>(&self, host: &H, key: ElementKey) -> ParallaxDepth {
        if host.has_marker(key, self.depth_1) {
            ParallaxDepth::Tier1
        } else if host.has_marker(key, self.depth_2) {
            ParallaxDepth::Tier2
        } else if host.has_marker(key, self.depth_3) {
            ParallaxDepth::Tier3
        } else {
            ParallaxDepth::default()
        }
    }

    fn target(&self, depth: ParallaxDepth, geometry: &ElementGeometry, input: &FrameInput) -> f64 {
        let distance = input.viewport.center_at(input.scroll) - geometry.center();
        distance * self.config.base_factor * depth.multiplier()
    }

    fn range(&self) -> (f64, f64) {
        (-self.config.max_offset, self.config.max_offset)
    }

    fn ease(&self) -> f64 {
        self.config.ease
    }

    fn publish(&self, key: ElementKey, motion: &Motion, store: &mut PublishedStore) {
        store.publish_parallax(key, motion.current);
    }
}
