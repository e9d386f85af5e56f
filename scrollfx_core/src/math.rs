// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric helpers shared by every updater.

/// Clamps `value` to `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics: callers pass ranges from config,
/// and a NaN `value` collapses to `min` so it can never reach published state.
#[inline]
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// Linear interpolation from `from` toward `to` by `factor`.
///
/// A factor of `0.0` returns `from`; `1.0` returns `to`.
#[inline]
#[must_use]
pub fn lerp(from: f64, to: f64, factor: f64) -> f64 {
    from + (to - from) * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(7.0, -5.0, 5.0), 5.0);
        assert_eq!(clamp(-7.0, -5.0, 5.0), -5.0);
        assert_eq!(clamp(1.5, -5.0, 5.0), 1.5);
    }

    #[test]
    fn clamp_contains_non_finite() {
        assert_eq!(clamp(f64::NAN, 0.0, 1.0), 0.0);
        assert_eq!(clamp(f64::INFINITY, 0.0, 1.0), 1.0);
        assert_eq!(clamp(f64::NEG_INFINITY, 0.0, 1.0), 0.0);
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 10.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 10.0, 1.0), 10.0);
        assert!((lerp(0.0, 1.0, 0.15) - 0.15).abs() < 1e-12);
    }
}
