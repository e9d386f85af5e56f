// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for scrollfx.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`FrameLoop`]: runs a page's [`EffectFrame`] (tick, present, ambient
//!   work) once per `requestAnimationFrame` callback
//! - [`DomDocument`]: [`DocumentHost`] over the live page, finding marked
//!   elements by class
//! - [`DomPresenter`]: writes published values as custom properties and
//!   class markers
//! - [`ParticleCanvas`]: draws a particle field on a 2D canvas
//! - [`events`]: scroll, resize and pointer listener guards

#![no_std]

extern crate alloc;

mod canvas;
mod document;
pub mod events;
mod frame_loop;
mod presenter;

pub use canvas::ParticleCanvas;
pub use document::{DomDocument, NodeTable};
pub use frame_loop::{EffectFrame, FrameLoop, run_frame};
pub use presenter::{DomPresenter, PresenterNames};
pub use scrollfx_core::host::{DocumentHost, Presenter};

use scrollfx_core::time::{HostTime, Timebase};

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks. Use [`timebase`] to
/// convert to nanoseconds.
#[must_use]
pub fn now() -> HostTime {
    millis_to_host_time(frame_loop::performance_now())
}

/// Returns the web [`Timebase`]: 1 tick = 1 µs = 1000 ns.
#[must_use]
pub fn timebase() -> Timebase {
    Timebase::MICROS
}

pub(crate) fn millis_to_host_time(ms: f64) -> HostTime {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "browser timestamps are small positive f64; µs fits in u64"
    )]
    let us = (ms * 1000.0) as u64;
    HostTime(us)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timebase_is_microsecond() {
        let tb = timebase();
        assert_eq!(tb.ticks_to_nanos(1), 1000);
        assert_eq!(tb.ticks_to_nanos(1_000_000), 1_000_000_000);
    }

    #[test]
    fn timestamps_become_microseconds() {
        assert_eq!(millis_to_host_time(16.667), HostTime(16_667));
        assert_eq!(millis_to_host_time(0.0), HostTime(0));
        assert_eq!(millis_to_host_time(-3.0), HostTime(0), "saturates");
    }
}
