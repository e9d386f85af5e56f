// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are converted to microseconds using a [`Timebase`].

use std::io::Write;

use scrollfx_core::effects::EffectGroup;
use scrollfx_core::time::{HostTime, Timebase};
use scrollfx_core::trace::{
    DiscoveryEvent, FrameSkippedEvent, FrameSummary, FrameTickEvent, PhaseBeginEvent,
    PhaseEndEvent, PhaseKind, SettleEvent, SkipReason, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
    phases: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .field("phases", &self.phases)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self::new(Box::new(std::io::stderr()), timebase)
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self::with_writer(writer, timebase)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    ///
    /// Phase begin/end lines are off by default; there are seven pairs per
    /// frame.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self {
            writer,
            timebase,
            phases: false,
        }
    }

    /// Also prints phase begin/end lines.
    #[must_use]
    pub fn with_phases(mut self, phases: bool) -> Self {
        self.phases = phases;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn ticks_to_us(&self, ticks: u64) -> f64 {
        self.timebase.ticks_to_nanos(ticks) as f64 / 1000.0
    }

    fn host_us(&self, t: HostTime) -> f64 {
        self.ticks_to_us(t.ticks())
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        let _ = writeln!(
            self.writer,
            "[tick] frame={} now={:.1}µs raw={:.2} smoothed={:.2}",
            e.frame_index,
            self.host_us(e.now),
            e.raw,
            e.smoothed,
        );
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        if !self.phases {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[phase:begin] frame={} {} at {:.1}µs",
            e.frame_index,
            e.phase.name(),
            self.host_us(e.timestamp),
        );
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        if !self.phases {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[phase:end] frame={} {} at {:.1}µs",
            e.frame_index,
            e.phase.name(),
            self.host_us(e.timestamp),
        );
    }

    fn on_discovery(&mut self, e: &DiscoveryEvent) {
        let _ = write!(self.writer, "[discovery] pass={}", e.pass);
        for group in EffectGroup::ALL {
            let _ = write!(self.writer, " {}={}", group.name(), e.count(group));
        }
        let _ = writeln!(self.writer);
    }

    fn on_frame_skipped(&mut self, e: &FrameSkippedEvent) {
        let reason = match e.reason {
            SkipReason::UnusableViewport => "viewport not laid out",
        };
        let _ = writeln!(self.writer, "[skip] frame={} {reason}", e.frame_index);
    }

    fn on_settle(&mut self, e: &SettleEvent) {
        let _ = writeln!(
            self.writer,
            "[settle] frame={} at {:.1}µs smoothed={:.2}",
            e.frame_index,
            self.host_us(e.now),
            e.smoothed,
        );
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        let _ = write!(
            self.writer,
            "[summary] frame={} tracked={} changed={}",
            s.frame_index, s.tracked, s.changed,
        );
        if s.skipped {
            let _ = write!(self.writer, " skipped");
        }
        for phase in PhaseKind::ALL {
            let _ = write!(
                self.writer,
                " {}={:.1}µs",
                phase.name(),
                self.ticks_to_us(s.phase(phase)),
            );
        }
        let _ = writeln!(self.writer);
    }
}
