// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the frame loop.
//!
//! [`TraceSink`] has one method per event, all defaulting to no-ops, so a
//! sink only implements what it cares about.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. With the `trace`
//! feature **off**, every `Tracer` method compiles to nothing. With it **on**,
//! each method performs a single `Option` branch before dispatching.
//!
//! [`FrameSummaryBuilder`] collects phase timestamps during a frame and
//! produces a [`FrameSummary`] at the end.

use crate::effects::EffectGroup;
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// One step of the fixed per-frame order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    /// Scroll smoother advance.
    Smooth,
    /// Reveal updater.
    Reveal,
    /// Parallax updater.
    Parallax,
    /// Glow updater.
    Glow,
    /// Float updater.
    Float,
    /// Text-warp updater.
    TextWarp,
    /// Publishing values and collecting changes.
    Publish,
}

impl PhaseKind {
    /// Every phase in execution order.
    pub const ALL: [Self; 7] = [
        Self::Smooth,
        Self::Reveal,
        Self::Parallax,
        Self::Glow,
        Self::Float,
        Self::TextWarp,
        Self::Publish,
    ];

    /// Short name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Smooth => "smooth",
            Self::Reveal => "reveal",
            Self::Parallax => "parallax",
            Self::Glow => "glow",
            Self::Float => "float",
            Self::TextWarp => "text-warp",
            Self::Publish => "publish",
        }
    }

    /// Position in [`ALL`](Self::ALL).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Smooth => 0,
            Self::Reveal => 1,
            Self::Parallax => 2,
            Self::Glow => 3,
            Self::Float => 4,
            Self::TextWarp => 5,
            Self::Publish => 6,
        }
    }
}

impl From<EffectGroup> for PhaseKind {
    fn from(group: EffectGroup) -> Self {
        match group {
            EffectGroup::Reveal => Self::Reveal,
            EffectGroup::Parallax => Self::Parallax,
            EffectGroup::Glow => Self::Glow,
            EffectGroup::Float => Self::Float,
            EffectGroup::TextWarp => Self::TextWarp,
        }
    }
}

/// Why a frame ran no updaters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Viewport height was zero, negative or non-finite.
    UnusableViewport,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once per tick, after the smoother has advanced.
#[derive(Clone, Copy, Debug)]
pub struct FrameTickEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Host time of the tick.
    pub now: HostTime,
    /// Latest observed scroll offset.
    pub raw: f64,
    /// Smoothed scroll offset for this frame.
    pub smoothed: f64,
}

/// Marks the beginning of a phase.
#[derive(Clone, Copy, Debug)]
pub struct PhaseBeginEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Which phase is starting.
    pub phase: PhaseKind,
    /// Host time at the start of the phase.
    pub timestamp: HostTime,
}

/// Marks the end of a phase.
#[derive(Clone, Copy, Debug)]
pub struct PhaseEndEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Which phase is ending.
    pub phase: PhaseKind,
    /// Host time at the end of the phase.
    pub timestamp: HostTime,
}

/// Emitted after every discovery pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiscoveryEvent {
    /// Number of discovery passes so far, including this one.
    pub pass: u32,
    /// Tracked elements per group, in [`EffectGroup::ALL`] order.
    pub counts: [usize; 5],
}

impl DiscoveryEvent {
    /// Elements tracked by `group`.
    #[must_use]
    pub const fn count(&self, group: EffectGroup) -> usize {
        match group {
            EffectGroup::Reveal => self.counts[0],
            EffectGroup::Parallax => self.counts[1],
            EffectGroup::Glow => self.counts[2],
            EffectGroup::Float => self.counts[3],
            EffectGroup::TextWarp => self.counts[4],
        }
    }

    /// Total entries across all groups.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Emitted when a frame skips every updater.
#[derive(Clone, Copy, Debug)]
pub struct FrameSkippedEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Why the frame was skipped.
    pub reason: SkipReason,
}

/// Emitted when scrolling goes idle.
#[derive(Clone, Copy, Debug)]
pub struct SettleEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Host time the debounce fired at.
    pub now: HostTime,
    /// Smoothed offset at that time.
    pub smoothed: f64,
}

/// Per-frame summary produced by [`FrameSummaryBuilder`].
#[derive(Clone, Copy, Debug)]
pub struct FrameSummary {
    /// Frame counter.
    pub frame_index: u64,
    /// Host time of the tick.
    pub now: HostTime,
    /// Smoothed scroll offset.
    pub smoothed: f64,
    /// Entries updated across all groups.
    pub tracked: usize,
    /// Per-element writes handed to the presenter.
    pub changed: usize,
    /// Phase durations in ticks, in [`PhaseKind::ALL`] order (0 if not
    /// measured).
    pub phase_ticks: [u64; 7],
    /// Whether the updaters were skipped.
    pub skipped: bool,
}

impl FrameSummary {
    /// Duration of `phase` in ticks.
    #[must_use]
    pub const fn phase(&self, phase: PhaseKind) -> u64 {
        self.phase_ticks[phase.index()]
    }

    /// Sum of all phase durations in ticks.
    #[must_use]
    pub fn total_ticks(&self) -> u64 {
        self.phase_ticks.iter().sum()
    }
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the frame loop.
pub trait TraceSink {
    /// Called once per tick after smoothing.
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        _ = e;
    }

    /// Called at the beginning of a phase.
    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        _ = e;
    }

    /// Called at the end of a phase.
    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        _ = e;
    }

    /// Called after a discovery pass.
    fn on_discovery(&mut self, e: &DiscoveryEvent) {
        _ = e;
    }

    /// Called when a frame skips its updaters.
    fn on_frame_skipped(&mut self, e: &FrameSkippedEvent) {
        _ = e;
    }

    /// Called when scrolling goes idle.
    fn on_settle(&mut self, e: &SettleEvent) {
        _ = e;
    }

    /// Called with the per-frame summary.
    fn on_frame_summary(&mut self, s: &FrameSummary) {
        _ = s;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

/// Generates a `Tracer` forwarding method.
macro_rules! forward {
    ($(#[$doc:meta])* $name:ident => $sink_method:ident($ty:ty)) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, e: &$ty) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$sink_method(e);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = e;
            }
        }
    };
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    forward!(
        /// Emits a [`FrameTickEvent`].
        frame_tick => on_frame_tick(FrameTickEvent)
    );
    forward!(
        /// Emits a [`PhaseBeginEvent`].
        phase_begin => on_phase_begin(PhaseBeginEvent)
    );
    forward!(
        /// Emits a [`PhaseEndEvent`].
        phase_end => on_phase_end(PhaseEndEvent)
    );
    forward!(
        /// Emits a [`DiscoveryEvent`].
        discovery => on_discovery(DiscoveryEvent)
    );
    forward!(
        /// Emits a [`FrameSkippedEvent`].
        frame_skipped => on_frame_skipped(FrameSkippedEvent)
    );
    forward!(
        /// Emits a [`SettleEvent`].
        settle => on_settle(SettleEvent)
    );
    forward!(
        /// Emits a [`FrameSummary`].
        frame_summary => on_frame_summary(FrameSummary)
    );
}

// ---------------------------------------------------------------------------
// FrameSummaryBuilder
// ---------------------------------------------------------------------------

/// Collects phase timestamps during a frame and produces a [`FrameSummary`].
#[derive(Debug)]
pub struct FrameSummaryBuilder {
    tick: FrameTickEvent,
    phase_starts: [Option<HostTime>; 7],
    phase_ends: [Option<HostTime>; 7],
    tracked: usize,
    changed: usize,
    skipped: bool,
}

impl FrameSummaryBuilder {
    /// Starts building a summary for the given tick.
    #[must_use]
    pub fn new(tick: &FrameTickEvent) -> Self {
        Self {
            tick: *tick,
            phase_starts: [None; 7],
            phase_ends: [None; 7],
            tracked: 0,
            changed: 0,
            skipped: false,
        }
    }

    /// Records the start of a phase.
    pub fn phase_begin(&mut self, phase: PhaseKind, t: HostTime) {
        self.phase_starts[phase.index()] = Some(t);
    }

    /// Records the end of a phase.
    pub fn phase_end(&mut self, phase: PhaseKind, t: HostTime) {
        self.phase_ends[phase.index()] = Some(t);
    }

    /// Sets the number of updated entries.
    pub fn set_tracked(&mut self, tracked: usize) {
        self.tracked = tracked;
    }

    /// Sets the number of presenter writes.
    pub fn set_changed(&mut self, changed: usize) {
        self.changed = changed;
    }

    /// Marks the frame as skipped.
    pub fn set_skipped(&mut self, skipped: bool) {
        self.skipped = skipped;
    }

    /// Consumes the builder and produces the final [`FrameSummary`].
    #[must_use]
    pub fn finish(self) -> FrameSummary {
        let mut phase_ticks = [0; 7];
        for phase in PhaseKind::ALL {
            let i = phase.index();
            if let (Some(start), Some(end)) = (self.phase_starts[i], self.phase_ends[i]) {
                phase_ticks[i] = end.saturating_duration_since(start).ticks();
            }
        }
        FrameSummary {
            frame_index: self.tick.frame_index,
            now: self.tick.now,
            smoothed: self.tick.smoothed,
            tracked: self.tracked,
            changed: self.changed,
            phase_ticks,
            skipped: self.skipped,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tick() -> FrameTickEvent {
        FrameTickEvent {
            frame_index: 42,
            now: HostTime(1_000_000),
            raw: 500.0,
            smoothed: 420.0,
        }
    }

    #[test]
    fn phases_are_indexed_in_order() {
        for (i, phase) in PhaseKind::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i);
        }
        for group in EffectGroup::ALL {
            assert_eq!(PhaseKind::from(group).name(), group.name());
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_frame_tick(&sample_tick());
        sink.on_discovery(&DiscoveryEvent {
            pass: 1,
            counts: [1, 2, 3, 4, 5],
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.frame_tick(&sample_tick());
        tracer.frame_skipped(&FrameSkippedEvent {
            frame_index: 0,
            reason: SkipReason::UnusableViewport,
        });
    }

    #[test]
    fn discovery_counts_by_group() {
        let e = DiscoveryEvent {
            pass: 2,
            counts: [3, 0, 1, 0, 2],
        };
        assert_eq!(e.count(EffectGroup::Reveal), 3);
        assert_eq!(e.count(EffectGroup::TextWarp), 2);
        assert_eq!(e.total(), 6);
    }

    #[test]
    fn summary_builder_computes_durations() {
        let mut builder = FrameSummaryBuilder::new(&sample_tick());
        builder.phase_begin(PhaseKind::Smooth, HostTime(1_000_000));
        builder.phase_end(PhaseKind::Smooth, HostTime(1_000_010));
        builder.phase_begin(PhaseKind::Parallax, HostTime(1_000_020));
        builder.phase_end(PhaseKind::Parallax, HostTime(1_000_120));
        builder.set_tracked(12);
        builder.set_changed(4);

        let summary = builder.finish();
        assert_eq!(summary.phase(PhaseKind::Smooth), 10);
        assert_eq!(summary.phase(PhaseKind::Parallax), 100);
        assert_eq!(summary.phase(PhaseKind::Glow), 0, "unmeasured phase");
        assert_eq!(summary.total_ticks(), 110);
        assert_eq!(summary.tracked, 12);
        assert_eq!(summary.changed, 4);
        assert!(!summary.skipped);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            ticks: Vec<u64>,
        }
        impl TraceSink for RecordingSink {
            fn on_frame_tick(&mut self, e: &FrameTickEvent) {
                self.ticks.push(e.frame_index);
            }
        }

        let mut sink = RecordingSink { ticks: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.frame_tick(&sample_tick());
        drop(tracer);
        assert_eq!(sink.ticks, &[42]);
    }
}
