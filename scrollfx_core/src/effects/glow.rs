// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Proximity glow: brightest when the element is centered in the viewport.

use crate::config::GlowConfig;
use crate::element::{ElementGeometry, ElementKey};
use crate::host::DocumentHost;
use crate::publish::{Level, PublishedStore};

use super::{EffectGroup, FrameInput, Motion, ScrollCoupled};

/// Intensity `1 − |elementCenter − viewportCenter| / viewportHeight`, zero at
/// one viewport height away or more.
///
/// The active marker gates whether a shadow is rendered at all.
#[derive(Clone, Copy, Debug)]
pub struct Glow {
    config: GlowConfig,
}

impl Glow {
    /// Creates the effect.
    #[must_use]
    pub const fn new(config: GlowConfig) -> Self {
        Self { config }
    }
}

impl ScrollCoupled for Glow {
    type Params = ();

    const GROUP: EffectGroup = EffectGroup::Glow;

    fn params<H: DocumentHost + ?Sized>(&self, _host: &H, _key: ElementKey) {}

    fn target(&self, (): (), geometry: &ElementGeometry, input: &FrameInput) -> f64 {
        let gap = (geometry.center() - input.viewport.center_at(input.scroll)).abs();
        1.0 - gap / input.viewport.height
    }

    fn range(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn ease(&self) -> f64 {
        self.config.ease
    }

    fn is_active(&self, current: f64) -> bool {
        current > self.config.active_threshold
    }

    fn publish(&self, key: ElementKey, motion: &Motion, store: &mut PublishedStore) {
        store.publish_glow(
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

    fn glow() -> Interpolated<Glow> {
        Interpolated::new(Glow::new(EffectConfig::standard().glow))
    }

    #[test]
    fn centered_element_activates_after_one_tick() {
        let mut updater = glow();
        // Center 600; viewport center at scroll 300 is 300 + 300 = 600.
        let key = track(&mut updater, ElementGeometry::new(550.0, 100.0), ());
        updater.update(&input(300.0, 600.0));
        let motion = updater.motion(key).unwrap();
        assert_eq!(motion.target, 1.0);
        assert!((motion.current - 0.15).abs() < 1e-12);
        assert!(motion.active, "0.15 > 0.1 after the first tick");
    }

    #[test]
    fn far_element_is_dark() {
        let mut updater = glow();
        let key = track(&mut updater, ElementGeometry::new(5000.0, 100.0), ());
        updater.update(&input(0.0, 600.0));
        let motion = updater.motion(key).unwrap();
        assert_eq!(motion.target, 0.0);
        assert!(!motion.active);
    }

    #[test]
    fn half_viewport_away_is_half_bright() {
        let mut updater = glow();
        // Element center 900, viewport center 600, height 600 → 1 − 300/600.
        let key = track(&mut updater, ElementGeometry::new(850.0, 100.0), ());
        updater.update(&input(300.0, 600.0));
        assert!((updater.motion(key).unwrap().target - 0.5).abs() < 1e-12);
    }

    #[test]
    fn converges_at_fifteen_percent_per_tick() {
        let mut updater = glow();
        track(&mut updater, ElementGeometry::new(550.0, 100.0), ());
        let history = run(&mut updater, &input(300.0, 600.0), 40);
        let mut previous_err = 1.0;
        for (k, motion) in history.iter().enumerate() {
            let err = motion.target - motion.current;
            let expected = 0.85_f64.powi(k as i32 + 1);
            assert!((err - expected).abs() < 1e-9, "tick {k}: {err} vs {expected}");
            assert!(err < previous_err, "monotone approach");
            assert!((0.0..=1.0).contains(&motion.current));
            previous_err = err;
        }
    }
}
