// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-progress text skew.

use crate::config::WarpConfig;
use crate::element::{ElementGeometry, ElementKey};
use crate::host::DocumentHost;
use crate::math::clamp;
use crate::publish::{Level, PublishedStore};

use super::{EffectGroup, FrameInput, Motion, ScrollCoupled};

/// Warp amount from scroll progress past the point where the element's top
/// reaches the viewport center.
///
/// `progress = (scroll − (offsetTop − viewportHeight / 2)) / viewportHeight`
/// is clamped to `±progress_limit`, then scaled. The active marker is only
/// set while the warp is visible, so a negligible warp leaves no transform
/// behind.
#[derive(Clone, Copy, Debug)]
pub struct TextWarp {
    config: WarpConfig,
}

impl TextWarp {
    /// Creates the effect.
    #[must_use]
    pub const fn new(config: WarpConfig) -> Self {
        Self { config }
    }

    /// Largest magnitude a target can reach.
    #[must_use]
    pub fn max_amount(&self) -> f64 {
        self.config.progress_limit * self.config.scale
    }
}

impl ScrollCoupled for TextWarp {
    type Params = ();

    const GROUP: EffectGroup = EffectGroup::TextWarp;

    fn params<H: DocumentHost + ?Sized>(&self, _host: &H, _key: ElementKey) {}

    fn target(&self, (): (), geometry: &ElementGeometry, input: &FrameInput) -> f64 {
        let height = input.viewport.height;
        let progress = (input.scroll - (geometry.offset_top - height / 2.0)) / height;
        let limit = self.config.progress_limit;
        clamp(progress, -limit, limit) * self.config.scale
    }

    fn range(&self) -> (f64, f64) {
        (-self.max_amount(), self.max_amount())
    }

    fn ease(&self) -> f64 {
        self.config.ease
    }

    fn is_active(&self, current: f64) -> bool {
        current.abs() > self.config.active_threshold
    }

    fn publish(&self, key: ElementKey, motion: &Motion, store: &mut PublishedStore) {
        store.publish_warp(
            key,
            Level {
                value: motion.current,
                active: motion.active,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EffectConfig;
    use crate::effects::Interpolated;
    use crate::effects::test_util::{input, run, track};

    fn warp() -> Interpolated<TextWarp> {
        Interpolated::new(TextWarp::new(EffectConfig::standard().warp))
    }

    #[test]
    fn progress_is_scaled_and_clamped() {
        let mut updater = warp();
        // offsetTop 1000, viewport 600: progress = (scroll − 700) / 600.
        let key = track(&mut updater, ElementGeometry::new(1000.0, 50.0), ());

        updater.update(&input(760.0, 600.0));
        assert!((updater.motion(key).unwrap().target - 0.3).abs() < 1e-12);

        updater.update(&input(5000.0, 600.0));
        assert_eq!(updater.motion(key).unwrap().target, 1.5);

        updater.update(&input(-5000.0, 600.0));
        assert_eq!(updater.motion(key).unwrap().target, -1.5);
    }

    #[test]
    fn marker_gates_negligible_warp() {
        let mut updater = warp();
        let key = track(&mut updater, ElementGeometry::new(1000.0, 50.0), ());
        // progress 0 → target 0; current stays 0.
        updater.update(&input(700.0, 600.0));
        assert!(!updater.motion(key).unwrap().active);

        // target 0.3: first step 0.03 > 0.01.
        updater.update(&input(760.0, 600.0));
        let motion = updater.motion(key).unwrap();
        assert!((motion.current - 0.03).abs() < 1e-12);
        assert!(motion.active);
    }

    #[test]
    fn targets_never_exceed_limit() {
        let mut updater = warp();
        track(&mut updater, ElementGeometry::new(-1e15, 50.0), ());
        track(&mut updater, ElementGeometry::new(1e15, 50.0), ());
        let history = run(&mut updater, &input(0.0, 600.0), 10);
        assert!(history.iter().all(|m| m.target.abs() <= 1.5));
        for tracked in updater.registry().iter() {
            assert!(tracked.state.motion.target.abs() <= 1.5);
        }
    }

    #[test]
    fn converges_at_ten_percent_per_tick() {
        let mut updater = warp();
        track(&mut updater, ElementGeometry::new(1000.0, 50.0), ());
        let history = run(&mut updater, &input(760.0, 600.0), 60);
        let last = history.last().unwrap();
        let expected = 0.3 * 0.9_f64.powi(60);
        assert!(((last.target - last.current) - expected).abs() < 1e-9);
    }
}
