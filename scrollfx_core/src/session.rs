// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The animation session: every piece of per-page effect state in one place.
//!
//! An [`AnimationSession`] owns the scroll signal, the settle debounce, the
//! five effect updaters with their registries, and the published store. It
//! is constructed once per page and threaded through the
//! [`FrameScheduler`](crate::scheduler::FrameScheduler); nothing here is
//! global.

use alloc::vec::Vec;

use crate::config::EffectConfig;
use crate::effects::{
    EffectGroup, Float, FrameInput, Glow, Interpolated, Parallax, Reveal, TextWarp,
};
use crate::element::{ElementKey, Viewport};
use crate::host::DocumentHost;
use crate::publish::PublishedStore;
use crate::signal::{ScrollSignal, SettleTimer};
use crate::time::{Duration, HostTime, Timebase};
use crate::trace::DiscoveryEvent;

/// Owner of all scroll-linked effect state for one page.
#[derive(Debug)]
pub struct AnimationSession {
    config: EffectConfig,
    signal: ScrollSignal,
    settle: SettleTimer,
    reveal: Reveal,
    parallax: Interpolated<Parallax>,
    glow: Interpolated<Glow>,
    float: Interpolated<Float>,
    warp: Interpolated<TextWarp>,
    published: PublishedStore,
    scratch: Vec<ElementKey>,
    passes: u32,
}

impl AnimationSession {
    /// Creates a session with empty registries and the signal at rest at
    /// offset zero. Settle delays are converted to `timebase` ticks.
    ///
    /// # Panics
    ///
    /// Panics if any easing factor in `config` is outside `(0, 1]`.
    #[must_use]
    pub fn new(config: EffectConfig, timebase: Timebase) -> Self {
        Self {
            signal: ScrollSignal::from_config(&config.signal),
            settle: SettleTimer::new(Duration::from_millis(
                config.signal.settle_delay_ms,
                timebase,
            )),
            reveal: Reveal::new(config.reveal),
            parallax: Interpolated::new(Parallax::new(config.parallax, &config.markers)),
            glow: Interpolated::new(Glow::new(config.glow)),
            float: Interpolated::new(Float::new(config.float)),
            warp: Interpolated::new(TextWarp::new(config.warp)),
            published: PublishedStore::new(),
            scratch: Vec::new(),
            passes: 0,
            config,
        }
    }

    /// Configuration the session was built with.
    #[must_use]
    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// The scroll signal.
    #[must_use]
    pub fn signal(&self) -> &ScrollSignal {
        &self.signal
    }

    /// Reveal updater.
    #[must_use]
    pub fn reveal(&self) -> &Reveal {
        &self.reveal
    }

    /// Parallax updater.
    #[must_use]
    pub fn parallax(&self) -> &Interpolated<Parallax> {
        &self.parallax
    }

    /// Glow updater.
    #[must_use]
    pub fn glow(&self) -> &Interpolated<Glow> {
        &self.glow
    }

    /// Float updater.
    #[must_use]
    pub fn float(&self) -> &Interpolated<Float> {
        &self.float
    }

    /// Text-warp updater.
    #[must_use]
    pub fn warp(&self) -> &Interpolated<TextWarp> {
        &self.warp
    }

    /// Last published values.
    #[must_use]
    pub fn published(&self) -> &PublishedStore {
        &self.published
    }

    pub(crate) fn published_mut(&mut self) -> &mut PublishedStore {
        &mut self.published
    }

    /// Number of entries tracked by `group`.
    #[must_use]
    pub fn tracked(&self, group: EffectGroup) -> usize {
        match group {
            EffectGroup::Reveal => self.reveal.registry().len(),
            EffectGroup::Parallax => self.parallax.registry().len(),
            EffectGroup::Glow => self.glow.registry().len(),
            EffectGroup::Float => self.float.registry().len(),
            EffectGroup::TextWarp => self.warp.registry().len(),
        }
    }

    /// Entries tracked across all groups.
    #[must_use]
    pub fn total_tracked(&self) -> usize {
        EffectGroup::ALL.iter().map(|g| self.tracked(*g)).sum()
    }

    /// Rebuilds every registry from the host.
    ///
    /// Starts a new discovery epoch, so keys from earlier passes go stale.
    /// Motion state restarts from zero and the published store is
    /// forgotten, which makes the next tick report every element as changed.
    pub fn discover<H: DocumentHost + ?Sized>(&mut self, host: &mut H) -> DiscoveryEvent {
        let markers = self.config.markers;
        host.begin_scan();
        self.reveal.discover(host, markers.reveal, &mut self.scratch);
        self.parallax
            .discover(host, markers.parallax, &mut self.scratch);
        self.glow.discover(host, markers.glow, &mut self.scratch);
        self.float.discover(host, markers.float, &mut self.scratch);
        self.warp
            .discover(host, markers.text_warp, &mut self.scratch);
        self.published.reset();
        self.passes = self.passes.wrapping_add(1);

        DiscoveryEvent {
            pass: self.passes,
            counts: EffectGroup::ALL.map(|g| self.tracked(g)),
        }
    }

    /// Records a scroll notification and restarts the settle debounce.
    pub fn scroll_to(&mut self, offset: f64, now: HostTime) {
        self.signal.set_raw(offset);
        self.settle.notify(now);
    }

    /// Whether a scroll burst has not yet settled.
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.settle.is_pending()
    }

    /// Advances the smoother one frame and returns the smoothed offset.
    pub fn advance_signal(&mut self) -> f64 {
        self.signal.advance()
    }

    /// Fires the settle debounce if it is due; marks the store when it does.
    pub fn poll_settle(&mut self, now: HostTime) -> bool {
        let fired = self.settle.poll(now);
        if fired {
            self.published.mark_settled();
        }
        fired
    }

    /// Runs one group's updater for this frame.
    pub fn update<H: DocumentHost + ?Sized>(
        &mut self,
        group: EffectGroup,
        host: &H,
        input: &FrameInput,
    ) {
        match group {
            EffectGroup::Reveal => self.reveal.update(host, &input.viewport),
            EffectGroup::Parallax => self.parallax.update(input),
            EffectGroup::Glow => self.glow.update(input),
            EffectGroup::Float => self.float.update(input),
            EffectGroup::TextWarp => self.warp.update(input),
        }
    }

    /// Writes every tracked element's current value into the store.
    pub fn publish(&mut self) {
        self.reveal.publish(&mut self.published);
        self.parallax.publish(&mut self.published);
        self.glow.publish(&mut self.published);
        self.float.publish(&mut self.published);
        self.warp.publish(&mut self.published);
    }

    /// Builds the per-frame input from the current smoothed offset.
    #[must_use]
    pub fn frame_input(&self, viewport: Viewport) -> FrameInput {
        FrameInput {
            scroll: self.signal.smoothed(),
            viewport,
        }
    }
}
