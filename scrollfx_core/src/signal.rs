// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll signal smoothing and idle detection.
//!
//! [`ScrollSignal`] turns bursty scroll notifications into a continuous value:
//!
//! ```text
//! smoothed ← smoothed + (raw − smoothed) × easing
//! ```
//!
//! `raw` is written by the event source whenever the host reports a new
//! offset (last write wins between ticks). `smoothed` is advanced exactly
//! once per frame by the scheduler, so after `k` frames at a fixed `raw` the
//! remaining error is `(1 − easing)^k` of the initial gap.
//!
//! [`SettleTimer`] is a debounce that reports when scrolling has stopped.

use crate::config::{SignalConfig, assert_ease};
use crate::math::lerp;
use crate::time::{Duration, HostTime};

/// Raw and smoothed scroll position.
#[derive(Clone, Copy, Debug)]
pub struct ScrollSignal {
    raw: f64,
    smoothed: f64,
    easing: f64,
}

impl ScrollSignal {
    /// Creates a signal at rest at offset zero.
    ///
    /// # Panics
    ///
    /// Panics if `easing` is not in `(0, 1]`.
    #[must_use]
    pub fn new(easing: f64) -> Self {
        assert_ease(easing, "scroll");
        Self {
            raw: 0.0,
            smoothed: 0.0,
            easing,
        }
    }

    /// Creates a signal from config.
    #[must_use]
    pub fn from_config(config: &SignalConfig) -> Self {
        Self::new(config.easing)
    }

    /// Records the latest observed scroll offset.
    ///
    /// Non-finite offsets are dropped; a NaN folded into `smoothed` would
    /// never recover.
    pub fn set_raw(&mut self, offset: f64) {
        if offset.is_finite() {
            self.raw = offset;
        }
    }

    /// Advances `smoothed` one frame toward `raw` and returns it.
    pub fn advance(&mut self) -> f64 {
        self.smoothed = lerp(self.smoothed, self.raw, self.easing);
        self.smoothed
    }

    /// Latest observed offset.
    #[must_use]
    pub fn raw(&self) -> f64 {
        self.raw
    }

    /// Eased offset consumed by the updaters.
    #[must_use]
    pub fn smoothed(&self) -> f64 {
        self.smoothed
    }

    /// Smoothing factor.
    #[must_use]
    pub fn easing(&self) -> f64 {
        self.easing
    }
}

/// One-shot debounce fired once `delay` passes without a new scroll event.
#[derive(Clone, Copy, Debug)]
pub struct SettleTimer {
    delay: Duration,
    last_event: Option<HostTime>,
}

impl SettleTimer {
    /// Creates an idle timer.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_event: None,
        }
    }

    /// Restarts the window; called on every scroll event.
    pub fn notify(&mut self, now: HostTime) {
        self.last_event = Some(now);
    }

    /// Returns `true` exactly once per burst, on the first poll at least
    /// `delay` after the last event.
    pub fn poll(&mut self, now: HostTime) -> bool {
        match self.last_event {
            Some(at) if now.saturating_duration_since(at) >= self.delay => {
                self.last_event = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a burst is in progress (an event arrived and has not settled).
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.last_event.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothed_follows_geometric_decay() {
        let mut signal = ScrollSignal::new(0.12);
        signal.set_raw(1000.0);
        for k in 1..=30 {
            let s = signal.advance();
            let expected = 1000.0 * (1.0 - 0.88_f64.powi(k));
            assert!(
                (s - expected).abs() < 1e-9,
                "tick {k}: expected {expected}, got {s}"
            );
        }
        assert!(
            (signal.smoothed() - 979.8).abs() < 0.1,
            "after 30 ticks: {}",
            signal.smoothed()
        );
    }

    #[test]
    fn last_write_wins_between_ticks() {
        let mut signal = ScrollSignal::new(0.5);
        signal.set_raw(100.0);
        signal.set_raw(300.0);
        signal.set_raw(200.0);
        assert_eq!(signal.raw(), 200.0);
        assert_eq!(signal.smoothed(), 0.0, "raw is only folded in on advance");
        assert_eq!(signal.advance(), 100.0);
    }

    #[test]
    fn easing_of_one_tracks_exactly() {
        let mut signal = ScrollSignal::new(1.0);
        signal.set_raw(42.0);
        assert_eq!(signal.advance(), 42.0);
    }

    #[test]
    fn non_finite_offsets_are_dropped() {
        let mut signal = ScrollSignal::new(0.12);
        signal.set_raw(10.0);
        signal.set_raw(f64::NAN);
        signal.set_raw(f64::INFINITY);
        assert_eq!(signal.raw(), 10.0);
        assert!(signal.advance().is_finite());
    }

    #[test]
    #[should_panic(expected = "easing factor must be in (0, 1]")]
    fn zero_easing_is_rejected() {
        let _ = ScrollSignal::new(0.0);
    }

    #[test]
    fn settle_fires_once_after_quiet_window() {
        let mut timer = SettleTimer::new(Duration(150));
        assert!(!timer.poll(HostTime(0)), "no burst yet");

        timer.notify(HostTime(1_000));
        assert!(!timer.poll(HostTime(1_100)));
        timer.notify(HostTime(1_100));
        assert!(!timer.poll(HostTime(1_200)), "window restarted by new event");
        assert!(timer.poll(HostTime(1_250)));
        assert!(!timer.poll(HostTime(1_400)), "fires once per burst");
        assert!(!timer.is_pending());
    }
}
