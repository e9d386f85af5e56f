// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic host time.
//!
//! [`HostTime`] is a point in time in backend-native ticks (microseconds on
//! the web). [`Timebase`] converts ticks to nanoseconds, and [`Duration`]
//! shares the tick unit so debounce windows can be compared directly against
//! elapsed host time.

use core::fmt;

/// A point in time expressed as backend-native monotonic ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// Returns the raw tick value.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Returns the time elapsed since `earlier`, or zero if `earlier` is later.
    #[inline]
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }
}

impl fmt::Debug for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTime({})", self.0)
    }
}

/// A span of time in the same tick unit as [`HostTime`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(pub u64);

impl Duration {
    /// A zero-length duration.
    pub const ZERO: Self = Self(0);

    /// Returns the raw tick value.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Builds a duration of `millis` milliseconds in `timebase` ticks.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: u64, timebase: Timebase) -> Self {
        Self(timebase.nanos_to_ticks(millis.saturating_mul(1_000_000)))
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({})", self.0)
    }
}

/// Rational conversion from ticks to nanoseconds: `nanos = ticks * numer / denom`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timebase {
    /// Numerator of the ticks-to-nanoseconds ratio.
    pub numer: u32,
    /// Denominator of the ticks-to-nanoseconds ratio.
    pub denom: u32,
}

impl Timebase {
    /// Ticks are nanoseconds.
    pub const NANOS: Self = Self { numer: 1, denom: 1 };

    /// Ticks are microseconds (the web backend's unit).
    pub const MICROS: Self = Self {
        numer: 1000,
        denom: 1,
    };

    /// Creates a timebase.
    ///
    /// # Panics
    ///
    /// Panics if `numer` or `denom` is zero.
    #[inline]
    #[must_use]
    pub const fn new(numer: u32, denom: u32) -> Self {
        assert!(
            numer != 0 && denom != 0,
            "timebase terms must not be zero"
        );
        Self { numer, denom }
    }

    /// Converts ticks to nanoseconds.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "u128 intermediate avoids overflow; results stay within u64 for page lifetimes"
    )]
    pub const fn ticks_to_nanos(self, ticks: u64) -> u64 {
        (ticks as u128 * self.numer as u128 / self.denom as u128) as u64
    }

    /// Converts nanoseconds to ticks.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "u128 intermediate avoids overflow; results stay within u64 for page lifetimes"
    )]
    pub const fn nanos_to_ticks(self, nanos: u64) -> u64 {
        (nanos as u128 * self.denom as u128 / self.numer as u128) as u64
    }
}

impl fmt::Debug for Timebase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timebase({}/{})", self.numer, self.denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn micros_timebase_round_trips_millis() {
        let d = Duration::from_millis(150, Timebase::MICROS);
        assert_eq!(d, Duration(150_000));
        assert_eq!(Timebase::MICROS.ticks_to_nanos(d.ticks()), 150_000_000);
    }

    #[test]
    fn saturating_since_never_underflows() {
        let a = HostTime(100);
        let b = HostTime(250);
        assert_eq!(b.saturating_duration_since(a), Duration(150));
        assert_eq!(a.saturating_duration_since(b), Duration::ZERO);
    }

    #[test]
    #[should_panic(expected = "timebase terms must not be zero")]
    fn zero_denominator_panics() {
        let _ = Timebase::new(1, 0);
    }
}
