// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame opportunities delivered by a tick source.

use crate::time::HostTime;

/// One display-refresh callback.
///
/// Tick sources (e.g. `requestAnimationFrame`) produce one `FrameTick` per
/// refresh; the [`FrameScheduler`](crate::scheduler::FrameScheduler) runs one
/// update pass per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTick {
    /// Host time at which the callback fired.
    pub now: HostTime,
    /// Monotonically increasing frame counter.
    pub frame_index: u64,
}
