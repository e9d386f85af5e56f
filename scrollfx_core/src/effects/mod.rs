// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-coupled effect updaters.
//!
//! Four of the five effect groups share one shape: each frame, compute a
//! target from the element's cached geometry and the smoothed scroll offset,
//! clamp it, step the current value toward it, and publish. That shape is
//! [`Interpolated`], parameterized by a [`ScrollCoupled`] implementation that
//! supplies the formula, clamp range and easing factor:
//!
//! | Effect | Target | Range | Ease |
//! |---|---|---|---|
//! | [`Parallax`] | `(viewportCenter − elementCenter) × 0.05 × depth` | `±5` | `0.1` |
//! | [`Glow`] | `1 − |elementCenter − viewportCenter| / viewportHeight` | `[0, 1]` | `0.15` |
//! | [`Float`] | `(elementCenter − viewportCenter) / viewportHeight × 3` | `±2` | `0.12` |
//! | [`TextWarp`] | `clamp(progress, ±0.5) × 3` | `±1.5` | `0.1` |
//!
//! [`Reveal`] is the odd one out: a binary gate recomputed from the live
//! bounding box every frame, with no interpolation.

mod float;
mod glow;
mod parallax;
mod reveal;
mod warp;

use core::fmt;

use alloc::vec::Vec;

pub use float::Float;
pub use glow::Glow;
pub use parallax::{Parallax, ParallaxDepth};
pub use reveal::{Reveal, RevealState};
pub use warp::TextWarp;

use crate::config::assert_ease;
use crate::element::{ElementGeometry, ElementKey, Viewport};
use crate::host::DocumentHost;
use crate::math::{clamp, lerp};
use crate::publish::PublishedStore;
use crate::registry::{Registry, rescan};

/// The five effect groups, in scheduler order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectGroup {
    /// Fade/slide into view.
    Reveal,
    /// Depth-tiered vertical offset.
    Parallax,
    /// Proximity glow.
    Glow,
    /// Vertical drift.
    Float,
    /// Text skew.
    TextWarp,
}

impl EffectGroup {
    /// All groups in scheduler order.
    pub const ALL: [Self; 5] = [
        Self::Reveal,
        Self::Parallax,
        Self::Glow,
        Self::Float,
        Self::TextWarp,
    ];

    /// Short name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reveal => "reveal",
            Self::Parallax => "parallax",
            Self::Glow => "glow",
            Self::Float => "float",
            Self::TextWarp => "text-warp",
        }
    }
}

/// Per-frame inputs shared by every updater.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// Smoothed scroll offset.
    pub scroll: f64,
    /// Viewport; its height is always finite and positive here.
    pub viewport: Viewport,
}

/// Interpolation state for one element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Motion {
    /// Value published this frame.
    pub current: f64,
    /// Clamped value `current` is moving toward.
    pub target: f64,
    /// Boundary marker, for effects that have one.
    pub active: bool,
}

/// Tracked state: discovery-time parameters plus motion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Entry<P> {
    /// Parameters fixed at discovery (e.g. parallax depth).
    pub params: P,
    /// Interpolation state; reset to zero by discovery.
    pub motion: Motion,
}

/// The formula and constants of one interpolated effect.
pub trait ScrollCoupled {
    /// Parameters read from the host at discovery.
    type Params: Copy + fmt::Debug;

    /// Group this effect serves.
    const GROUP: EffectGroup;

    /// Reads per-element parameters at discovery.
    fn params<H: DocumentHost + ?Sized>(&self, host: &H, key: ElementKey) -> Self::Params;

    /// Unclamped target value.
    fn target(&self, params: Self::Params, geometry: &ElementGeometry, input: &FrameInput) -> f64;

    /// Inclusive clamp range for both target and current.
    fn range(&self) -> (f64, f64);

    /// Per-frame interpolation factor.
    fn ease(&self) -> f64;

    /// Boundary marker for the current value; effects without one return
    /// `false`.
    fn is_active(&self, current: f64) -> bool {
        _ = current;
        false
    }

    /// Writes one element's result into the published store.
    fn publish(&self, key: ElementKey, motion: &Motion, store: &mut PublishedStore);
}

/// Generic updater driving one [`ScrollCoupled`] effect over its registry.
#[derive(Clone, Debug)]
pub struct Interpolated<E: ScrollCoupled> {
    effect: E,
    registry: Registry<Entry<E::Params>>,
}

impl<E: ScrollCoupled> Interpolated<E> {
    /// Creates an updater with an empty registry.
    ///
    /// # Panics
    ///
    /// Panics if the effect's easing factor is not in `(0, 1]`.
    #[must_use]
    pub fn new(effect: E) -> Self {
        assert_ease(effect.ease(), E::GROUP.name());
        Self {
            effect,
            registry: Registry::new(),
        }
    }

    /// The effect's formula and constants.
    #[must_use]
    pub fn effect(&self) -> &E {
        &self.effect
    }

    /// Tracked elements.
    #[must_use]
    pub fn registry(&self) -> &Registry<Entry<E::Params>> {
        &self.registry
    }

    /// Motion state for `key`.
    #[must_use]
    pub fn motion(&self, key: ElementKey) -> Option<Motion> {
        self.registry.get(key).map(|t| t.state.motion)
    }

    /// Rebuilds the registry from every element carrying `marker`, with
    /// motion reset to zero.
    pub fn discover<H: DocumentHost + ?Sized>(
        &mut self,
        host: &mut H,
        marker: &str,
        scratch: &mut Vec<ElementKey>,
    ) {
        let effect = &self.effect;
        rescan(&mut self.registry, host, marker, scratch, |host, key| Entry {
            params: effect.params(host, key),
            motion: Motion::default(),
        });
    }

    /// Recomputes every target and steps every current value one frame.
    pub fn update(&mut self, input: &FrameInput) {
        let (min, max) = self.effect.range();
        let ease = self.effect.ease();
        for tracked in self.registry.iter_mut() {
            let entry = &mut tracked.state;
            let target = clamp(
                self.effect.target(entry.params, &tracked.geometry, input),
                min,
                max,
            );
            let current = clamp(lerp(entry.motion.current, target, ease), min, max);
            entry.motion = Motion {
                current,
                target,
                active: self.effect.is_active(current),
            };
        }
    }

    /// Publishes every element's current value.
    pub fn publish(&self, store: &mut PublishedStore) {
        for tracked in self.registry.iter() {
            self.effect.publish(tracked.key, &tracked.state.motion, store);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;

    pub(crate) fn input(scroll: f64, viewport_height: f64) -> FrameInput {
        FrameInput {
            scroll,
            viewport: Viewport::new(1280.0, viewport_height),
        }
    }

    /// Runs `ticks` frames at a fixed input and returns the motion history.
    pub(crate) fn run<E: ScrollCoupled>(
        updater: &mut Interpolated<E>,
        input: &FrameInput,
        ticks: usize,
    ) -> Vec<Motion> {
        let key = updater.registry().iter().next().map(|t| t.key);
        (0..ticks)
            .map(|_| {
                updater.update(input);
                key.and_then(|k| updater.motion(k)).unwrap_or_default()
            })
            .collect()
    }

    /// Tracks a single element with default params.
    pub(crate) fn track<E: ScrollCoupled>(
        updater: &mut Interpolated<E>,
        geometry: ElementGeometry,
        params: E::Params,
    ) -> ElementKey {
        let key = ElementKey::new(updater.registry.len() as u32, 0);
        updater.registry.insert(
            key,
            geometry,
            Entry {
                params,
                motion: Motion::default(),
            },
        );
        key
    }
}
