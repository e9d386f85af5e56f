// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page's scroll frame, driven by `requestAnimationFrame`.
//!
//! A page keeps its effect state in one value implementing [`EffectFrame`]:
//! the [`FrameScheduler`] over its document, the [`Presenter`] that writes to
//! it, and whatever ambient work it adds. [`FrameLoop`] calls
//! [`run_frame`] on that value once per display refresh, so every frame is
//! tick, then present, then ambient effects, in that order.
//!
//! Event handlers share the same value through the `Rc<RefCell<_>>` handed to
//! [`FrameLoop::new`]. A frame that finds the state already borrowed is
//! skipped; the scroll offset it would have read is still picked up by the
//! next one.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use scrollfx_core::host::{DocumentHost, Presenter};
use scrollfx_core::scheduler::FrameScheduler;
use scrollfx_core::timing::FrameTick;
use scrollfx_core::trace::{TraceSink, Tracer};

use crate::millis_to_host_time;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

/// Per-page effect state run once per frame.
pub trait EffectFrame {
    /// Document the scheduler scans.
    type Host: DocumentHost;
    /// Presenter receiving each frame's changes.
    type Presenter: Presenter;

    /// The scheduler and presenter, borrowed together.
    fn parts(&mut self) -> (&mut FrameScheduler<Self::Host>, &mut Self::Presenter);

    /// Work that follows the scroll pipeline (tilt, particles).
    fn after_present(&mut self, tick: FrameTick) {
        _ = tick;
    }
}

/// Runs one scroll frame: tick, present, then [`EffectFrame::after_present`].
///
/// Returns the number of per-element writes handed to the presenter.
pub fn run_frame<F: EffectFrame + ?Sized>(
    frame: &mut F,
    tick: FrameTick,
    tracer: &mut Tracer<'_>,
) -> usize {
    let (scheduler, presenter) = frame.parts();
    let writes = scheduler.tick(tick, tracer).len();
    scheduler.present(presenter);
    frame.after_present(tick);
    writes
}

type FrameCallback = Closure<dyn FnMut(f64)>;

struct Shared<F> {
    frame: Rc<RefCell<F>>,
    sink: RefCell<Option<Box<dyn TraceSink>>>,
    /// Registered with `requestAnimationFrame`; holds only a weak handle back.
    callback: RefCell<Option<FrameCallback>>,
    /// Outstanding request while the loop runs.
    request: Cell<Option<i32>>,
    next_frame: Cell<u64>,
    skipped: Cell<u64>,
}

impl<F: EffectFrame> Shared<F> {
    fn on_animation_frame(&self, timestamp_ms: f64) {
        if self.request.take().is_none() {
            return;
        }

        match self.frame.try_borrow_mut() {
            Ok(mut frame) => {
                let tick = FrameTick {
                    now: millis_to_host_time(timestamp_ms),
                    frame_index: self.next_frame.get(),
                };
                self.next_frame.set(tick.frame_index + 1);
                let mut sink = self.sink.borrow_mut();
                let mut tracer = match sink.as_deref_mut() {
                    Some(sink) => Tracer::new(sink),
                    None => Tracer::none(),
                };
                run_frame(&mut *frame, tick, &mut tracer);
            }
            Err(_) => self.skipped.set(self.skipped.get() + 1),
        }

        self.schedule();
    }

    fn schedule(&self) {
        if let Some(callback) = &*self.callback.borrow() {
            let id = request_animation_frame(callback.as_ref().unchecked_ref());
            self.request.set(Some(id));
        }
    }
}

/// Drives an [`EffectFrame`] from `requestAnimationFrame` callbacks.
///
/// The loop starts stopped. While running it runs one [`run_frame`] per
/// refresh with the browser's frame timestamp converted to microseconds.
/// Dropping the loop cancels the outstanding request.
pub struct FrameLoop<F: EffectFrame + 'static> {
    shared: Rc<Shared<F>>,
}

impl<F: EffectFrame + 'static> FrameLoop<F> {
    /// Creates a stopped loop over `frame`.
    #[must_use]
    pub fn new(frame: Rc<RefCell<F>>) -> Self {
        let shared = Rc::new(Shared {
            frame,
            sink: RefCell::new(None),
            callback: RefCell::new(None),
            request: Cell::new(None),
            next_frame: Cell::new(0),
            skipped: Cell::new(0),
        });
        let weak: Weak<Shared<F>> = Rc::downgrade(&shared);
        let callback = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            if let Some(shared) = weak.upgrade() {
                shared.on_animation_frame(timestamp_ms);
            }
        }) as Box<dyn FnMut(f64)>);
        *shared.callback.borrow_mut() = Some(callback);
        Self { shared }
    }

    /// Sends scheduler trace events to `sink`.
    ///
    /// Events only arrive when `scrollfx_core` is built with its `trace`
    /// feature (enable this crate's `trace` feature).
    #[must_use]
    pub fn with_trace_sink(self, sink: impl TraceSink + 'static) -> Self {
        *self.shared.sink.borrow_mut() = Some(Box::new(sink));
        self
    }

    /// Requests the first frame. Does nothing if already running.
    pub fn start(&self) {
        if self.is_running() {
            return;
        }
        self.shared.schedule();
    }

    /// Cancels the outstanding frame; [`start`](Self::start) resumes with the
    /// next frame index.
    pub fn stop(&self) {
        if let Some(id) = self.shared.request.take() {
            cancel_animation_frame(id);
        }
    }

    /// Whether a frame is currently requested.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shared.request.get().is_some()
    }

    /// Frames run so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.shared.next_frame.get()
    }

    /// Frames dropped because an event handler held the page state.
    #[must_use]
    pub fn skipped(&self) -> u64 {
        self.shared.skipped.get()
    }

    /// The shared page state.
    #[must_use]
    pub fn frame(&self) -> &Rc<RefCell<F>> {
        &self.shared.frame
    }
}

impl<F: EffectFrame + 'static> Drop for FrameLoop<F> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<F: EffectFrame + 'static> core::fmt::Debug for FrameLoop<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameLoop")
            .field("running", &self.is_running())
            .field("frames", &self.frames())
            .field("skipped", &self.skipped())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use scrollfx_core::config::EffectConfig;
    use scrollfx_core::headless::{Node, StaticDocument};
    use scrollfx_core::publish::{FrameChanges, PublishedStore};
    use scrollfx_core::time::{HostTime, Timebase};

    use super::*;

    #[derive(Default)]
    struct CountingPresenter {
        applied: Vec<usize>,
    }

    impl Presenter for CountingPresenter {
        fn apply(&mut self, _published: &PublishedStore, changes: &FrameChanges) {
            self.applied.push(changes.len());
        }
    }

    struct Page {
        scheduler: FrameScheduler<StaticDocument>,
        presenter: CountingPresenter,
        /// `(frame_index, presents seen so far)` per `after_present` call.
        after: Vec<(u64, usize)>,
    }

    impl EffectFrame for Page {
        type Host = StaticDocument;
        type Presenter = CountingPresenter;

        fn parts(&mut self) -> (&mut FrameScheduler<StaticDocument>, &mut CountingPresenter) {
            (&mut self.scheduler, &mut self.presenter)
        }

        fn after_present(&mut self, tick: FrameTick) {
            self.after
                .push((tick.frame_index, self.presenter.applied.len()));
        }
    }

    fn page() -> Page {
        let config = EffectConfig::standard();
        let mut doc = StaticDocument::new(1280.0, 800.0);
        doc.push(
            Node::new(600.0, 200.0)
                .with_marker(config.markers.parallax)
                .with_marker(config.markers.float),
        );
        Page {
            scheduler: FrameScheduler::new(doc, config, Timebase::MICROS),
            presenter: CountingPresenter::default(),
            after: Vec::new(),
        }
    }

    fn tick(frame_index: u64) -> FrameTick {
        FrameTick {
            now: HostTime(frame_index * 16_667),
            frame_index,
        }
    }

    #[test]
    fn frame_presents_what_the_tick_changed() {
        let mut page = page();
        page.scheduler.scroll_to(400.0, HostTime(0));

        let writes = run_frame(&mut page, tick(0), &mut Tracer::none());
        assert_eq!(writes, 2, "parallax and float for the one node");
        assert_eq!(page.presenter.applied, [2]);
    }

    #[test]
    fn ambient_work_follows_the_presenter() {
        let mut page = page();
        for i in 0..3 {
            run_frame(&mut page, tick(i), &mut Tracer::none());
        }
        assert_eq!(page.after, [(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn quiet_frames_still_present() {
        let mut page = page();
        for i in 0..300 {
            run_frame(&mut page, tick(i), &mut Tracer::none());
        }
        let writes = run_frame(&mut page, tick(300), &mut Tracer::none());
        assert_eq!(writes, 0);
        assert_eq!(page.presenter.applied.len(), 301, "presenter sees every frame");
        assert_eq!(page.after.len(), 301);
    }
}
