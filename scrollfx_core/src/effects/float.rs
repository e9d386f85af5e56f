// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertical float drift, symmetric around the viewport center.

use crate::config::FloatConfig;
use crate::element::{ElementGeometry, ElementKey};
use crate::host::DocumentHost;
use crate::publish::PublishedStore;

use super::{EffectGroup, FrameInput, Motion, ScrollCoupled};

/// Offset `(elementCenter − viewportCenter) / viewportHeight × scale`.
///
/// Elements above the viewport center drift one way, below the other, and
/// settle to zero at dead center.
#[derive(Clone, Copy, Debug)]
pub struct Float {
    config: FloatConfig,
}

impl Float {
    /// Creates the effect.
    #[must_use]
    pub const fn new(config: FloatConfig) -> Self {
        Self { config }
    }
}

impl ScrollCoupled for Float {
    type Params = ();

    const GROUP: EffectGroup = EffectGroup::Float;

    fn params<H: DocumentHost + ?Sized>(&self, _host: &H, _key: ElementKey) {}

    fn target(&self, (): (), geometry: &ElementGeometry, input: &FrameInput) -> f64 {
        let normalized =
            (geometry.center() - input.viewport.center_at(input.scroll)) / input.viewport.height;
        normalized * self.config.scale
    }

    fn range(&self) -> (f64, f64) {
        (-self.config.limit, self.config.limit)
    }

    fn ease(&self) -> f64 {
        self.config.ease
    }

    fn publish(&self, key: ElementKey, motion: &Motion, store: &mut PublishedStore) {
        store.publish_float(key, motion.current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EffectConfig;
    use crate::effects::Interpolated;
    use crate::effects::test_util::{input, run, track};

    fn float() -> Interpolated<Float> {
        Interpolated::new(Float::new(EffectConfig::standard().float))
    }

    #[test]
    fn symmetric_around_center() {
        let mut updater = float();
        let above = track(&mut updater, ElementGeometry::new(150.0, 100.0), ());
        let below = track(&mut updater, ElementGeometry::new(350.0, 100.0), ());
        let centered = track(&mut updater, ElementGeometry::new(250.0, 100.0), ());
        // Viewport center = 0 + 300.
        updater.update(&input(0.0, 600.0));
        let t = |k| updater.motion(k).unwrap().target;
        assert!((t(above) + 0.5).abs() < 1e-12, "above: {}", t(above));
        assert!((t(below) - 0.5).abs() < 1e-12, "below: {}", t(below));
        assert_eq!(t(centered), 0.0);
    }

    #[test]
    fn far_elements_clamp_to_limit() {
        let mut updater = float();
        let key = track(&mut updater, ElementGeometry::new(1e9, 100.0), ());
        let history = run(&mut updater, &input(0.0, 600.0), 120);
        assert!(history.iter().all(|m| m.current.abs() <= 2.0));
        assert_eq!(updater.motion(key).unwrap().target, 2.0);
    }

    #[test]
    fn converges_at_twelve_percent_per_tick() {
        let mut updater = float();
        track(&mut updater, ElementGeometry::new(550.0, 100.0), ());
        // target = (600 − 300) / 600 × 3 = 1.5
        let history = run(&mut updater, &input(0.0, 600.0), 50);
        for (k, motion) in history.iter().enumerate() {
            let expected = 1.5 * 0.88_f64.powi(k as i32 + 1);
            let err = motion.target - motion.current;
            assert!((err - expected).abs() < 1e-9, "tick {k}: {err} vs {expected}");
        }
    }
}
