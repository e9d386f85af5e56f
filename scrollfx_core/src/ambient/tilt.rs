// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-tilt cards.
//!
//! While the pointer is over a card, its position within the card's box maps
//! to a normalized `(nx, ny)` in `[-1, 1]²`, and the card rotates toward it:
//!
//! ```text
//! rotate_y =  nx × max_tilt
//! rotate_x = −ny × max_tilt
//! scale    =  hover_scale
//! ```
//!
//! Leaving the card sends every target back to rest. Poses ease toward their
//! targets once per frame like the scroll-coupled effects.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::config::{TiltConfig, assert_ease};
use crate::element::ElementKey;
use crate::host::DocumentHost;
use crate::math::{clamp, lerp};
use crate::publish::PUBLISH_EPSILON;

/// Rotation (degrees) and scale of one card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltPose {
    /// Rotation about the horizontal axis.
    pub rotate_x: f64,
    /// Rotation about the vertical axis.
    pub rotate_y: f64,
    /// Uniform scale.
    pub scale: f64,
}

impl TiltPose {
    /// Flat and unscaled.
    pub const REST: Self = Self {
        rotate_x: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
    };

    fn step_toward(self, target: Self, ease: f64) -> Self {
        Self {
            rotate_x: lerp(self.rotate_x, target.rotate_x, ease),
            rotate_y: lerp(self.rotate_y, target.rotate_y, ease),
            scale: lerp(self.scale, target.scale, ease),
        }
    }

    fn differs(self, other: Self) -> bool {
        (self.rotate_x - other.rotate_x).abs() > PUBLISH_EPSILON
            || (self.rotate_y - other.rotate_y).abs() > PUBLISH_EPSILON
            || (self.scale - other.scale).abs() > PUBLISH_EPSILON
    }
}

impl Default for TiltPose {
    fn default() -> Self {
        Self::REST
    }
}

#[derive(Clone, Copy, Debug)]
struct Card {
    key: ElementKey,
    current: TiltPose,
    target: TiltPose,
    written: TiltPose,
}

/// Every tilt card on the page.
#[derive(Clone, Debug)]
pub struct TiltSet {
    config: TiltConfig,
    cards: Vec<Card>,
}

impl TiltSet {
    /// Creates an empty set.
    ///
    /// # Panics
    ///
    /// Panics if the easing factor is outside `(0, 1]`.
    #[must_use]
    pub fn new(config: TiltConfig) -> Self {
        assert_ease(config.ease, "tilt");
        Self {
            config,
            cards: Vec::new(),
        }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether there are no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Replaces the card list with every element carrying `marker`.
    ///
    /// Does not start a new discovery epoch; run it right after the scroll
    /// session's discovery so the keys share that epoch.
    pub fn discover<H: DocumentHost + ?Sized>(&mut self, host: &mut H, marker: &str) {
        let mut keys = Vec::new();
        host.query(marker, &mut keys);
        self.cards = keys
            .into_iter()
            .map(|key| Card {
                key,
                current: TiltPose::REST,
                target: TiltPose::REST,
                written: TiltPose::REST,
            })
            .collect();
    }

    /// Keys of every card, in document order.
    pub fn keys(&self) -> impl Iterator<Item = ElementKey> + '_ {
        self.cards.iter().map(|c| c.key)
    }

    /// Current pose of `key`.
    #[must_use]
    pub fn pose(&self, key: ElementKey) -> Option<TiltPose> {
        self.card(key).map(|c| c.current)
    }

    /// Target pose of `key`.
    #[must_use]
    pub fn target(&self, key: ElementKey) -> Option<TiltPose> {
        self.card(key).map(|c| c.target)
    }

    /// Aims `key` at the pointer, given the card's viewport-relative box.
    ///
    /// Degenerate boxes are ignored.
    pub fn pointer_move(&mut self, key: ElementKey, pointer: Point, bounds: Rect) {
        let max = self.config.max_tilt_deg;
        let scale = self.config.hover_scale;
        let Some(card) = self.card_mut(key) else {
            return;
        };
        let (width, height) = (bounds.width(), bounds.height());
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let nx = clamp((pointer.x - bounds.x0) / width * 2.0 - 1.0, -1.0, 1.0);
        let ny = clamp((pointer.y - bounds.y0) / height * 2.0 - 1.0, -1.0, 1.0);
        card.target = TiltPose {
            rotate_x: -ny * max,
            rotate_y: nx * max,
            scale,
        };
    }

    /// Sends `key` back to rest.
    pub fn pointer_leave(&mut self, key: ElementKey) {
        if let Some(card) = self.card_mut(key) {
            card.target = TiltPose::REST;
        }
    }

    /// Eases every card one frame and appends the keys whose pose moved
    /// visibly since it was last reported.
    pub fn step(&mut self, moved: &mut Vec<ElementKey>) {
        let ease = self.config.ease;
        for card in &mut self.cards {
            card.current = card.current.step_toward(card.target, ease);
            if card.current.differs(card.written) {
                card.written = card.current;
                moved.push(card.key);
            }
        }
    }

    fn card(&self, key: ElementKey) -> Option<&Card> {
        self.cards.iter().find(|c| c.key == key)
    }

    fn card_mut(&mut self, key: ElementKey) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.key == key)
    }
}
