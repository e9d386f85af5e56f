// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer- and time-driven effects that run beside the scroll pipeline.
//!
//! Neither effect reads the scroll signal. Both step once per frame on the
//! same tick as the [`FrameScheduler`](crate::scheduler::FrameScheduler) and
//! leave drawing to the backend.

pub mod particles;
pub mod tilt;

pub use particles::{Particle, ParticleField};
pub use tilt::{TiltPose, TiltSet};
