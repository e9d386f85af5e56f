// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame driver.
//!
//! [`FrameScheduler`] pairs an [`AnimationSession`] with a [`DocumentHost`]
//! and runs one logical tick per display refresh in a fixed order:
//!
//! ```text
//! Smooth ─► Reveal ─► Parallax ─► Glow ─► Float ─► TextWarp ─► Publish
//! ```
//!
//! The updaters are independent of each other; the order is fixed so runs
//! are reproducible. A tick never blocks: it is `O(tracked elements)` and
//! only reads geometry the host already has.
//!
//! When the viewport is not laid out yet (zero, negative or non-finite
//! height) the smoother still advances but every updater is skipped, so no
//! non-finite value can reach interpolation state.

use crate::config::EffectConfig;
use crate::effects::EffectGroup;
use crate::host::{DocumentHost, Presenter};
use crate::publish::FrameChanges;
use crate::session::AnimationSession;
use crate::time::{HostTime, Timebase};
use crate::timing::FrameTick;
use crate::trace::{
    DiscoveryEvent, FrameSkippedEvent, FrameSummaryBuilder, FrameTickEvent, PhaseBeginEvent,
    PhaseEndEvent, PhaseKind, SettleEvent, SkipReason, Tracer,
};

/// Drives an [`AnimationSession`] against a host document.
#[derive(Debug)]
pub struct FrameScheduler<H: DocumentHost> {
    host: H,
    session: AnimationSession,
    changes: FrameChanges,
    clock: Option<fn() -> HostTime>,
}

impl<H: DocumentHost> FrameScheduler<H> {
    /// Creates a scheduler and runs the initial discovery pass.
    ///
    /// # Panics
    ///
    /// Panics if any easing factor in `config` is outside `(0, 1]`.
    #[must_use]
    pub fn new(host: H, config: EffectConfig, timebase: Timebase) -> Self {
        let mut scheduler = Self {
            host,
            session: AnimationSession::new(config, timebase),
            changes: FrameChanges::default(),
            clock: None,
        };
        scheduler.discover(&mut Tracer::none());
        scheduler
    }

    /// Uses `clock` to timestamp phase boundaries in traces.
    ///
    /// Without a clock every phase is stamped with the tick's own time.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> HostTime) -> Self {
        self.clock = Some(clock);
        self
    }

    /// The host document.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host document.
    ///
    /// Changes to element geometry are not picked up until the next
    /// [`discover`](Self::discover) or [`resize`](Self::resize).
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The animation session.
    #[must_use]
    pub fn session(&self) -> &AnimationSession {
        &self.session
    }

    /// Changes produced by the most recent tick.
    #[must_use]
    pub fn changes(&self) -> &FrameChanges {
        &self.changes
    }

    /// Rescans the host for every group and reports what was found.
    pub fn discover(&mut self, tracer: &mut Tracer<'_>) -> DiscoveryEvent {
        let event = self.session.discover(&mut self.host);
        tracer.discovery(&event);
        event
    }

    /// Handles a viewport resize: geometry snapshots are stale, so rescan.
    pub fn resize(&mut self, tracer: &mut Tracer<'_>) -> DiscoveryEvent {
        self.discover(tracer)
    }

    /// Records a scroll notification.
    ///
    /// Only the latest offset before a tick matters; it is folded into the
    /// smoothed value at the next tick.
    pub fn scroll_to(&mut self, offset: f64, now: HostTime) {
        self.session.scroll_to(offset, now);
    }

    /// Whether a scroll burst is still within its settle window.
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.session.is_scrolling()
    }

    /// Runs one frame and returns what the presenter should write.
    pub fn tick(&mut self, tick: FrameTick, tracer: &mut Tracer<'_>) -> &FrameChanges {
        let frame_index = tick.frame_index;

        let smooth_start = self.stamp(tick);
        let smoothed = self.session.advance_signal();
        let smooth_end = self.stamp(tick);

        let tick_event = FrameTickEvent {
            frame_index,
            now: tick.now,
            raw: self.session.signal().raw(),
            smoothed,
        };
        tracer.frame_tick(&tick_event);
        let mut summary = FrameSummaryBuilder::new(&tick_event);
        self.phase(tracer, &mut summary, frame_index, PhaseKind::Smooth, smooth_start, true);
        self.phase(tracer, &mut summary, frame_index, PhaseKind::Smooth, smooth_end, false);

        let viewport = self.host.viewport();
        let usable = viewport.is_usable();
        if usable {
            let input = self.session.frame_input(viewport);
            for group in EffectGroup::ALL {
                let phase = PhaseKind::from(group);
                let start = self.stamp(tick);
                self.phase(tracer, &mut summary, frame_index, phase, start, true);
                self.session.update(group, &self.host, &input);
                let end = self.stamp(tick);
                self.phase(tracer, &mut summary, frame_index, phase, end, false);
            }
            summary.set_tracked(self.session.total_tracked());
        } else {
            tracer.frame_skipped(&FrameSkippedEvent {
                frame_index,
                reason: SkipReason::UnusableViewport,
            });
            summary.set_skipped(true);
        }

        let start = self.stamp(tick);
        self.phase(tracer, &mut summary, frame_index, PhaseKind::Publish, start, true);
        if self.session.poll_settle(tick.now) {
            tracer.settle(&SettleEvent {
                frame_index,
                now: tick.now,
                smoothed,
            });
        }
        if usable {
            self.session.publish();
        }
        self.session
            .published_mut()
            .collect_changes(&mut self.changes);
        let end = self.stamp(tick);
        self.phase(tracer, &mut summary, frame_index, PhaseKind::Publish, end, false);

        summary.set_changed(self.changes.len());
        tracer.frame_summary(&summary.finish());
        &self.changes
    }

    /// Applies the most recent tick's changes through `presenter`.
    pub fn present<P: Presenter + ?Sized>(&self, presenter: &mut P) {
        presenter.apply(self.session.published(), &self.changes);
    }

    fn stamp(&self, tick: FrameTick) -> HostTime {
        self.clock.map_or(tick.now, |clock| clock())
    }

    fn phase(
        &self,
        tracer: &mut Tracer<'_>,
        summary: &mut FrameSummaryBuilder,
        frame_index: u64,
        phase: PhaseKind,
        timestamp: HostTime,
        begin: bool,
    ) {
        if begin {
            summary.phase_begin(phase, timestamp);
            tracer.phase_begin(&PhaseBeginEvent {
                frame_index,
                phase,
                timestamp,
            });
        } else {
            summary.phase_end(phase, timestamp);
            tracer.phase_end(&PhaseEndEvent {
                frame_index,
                phase,
                timestamp,
            });
        }
    }
}
