// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: scroll-linked effects driven by `scrollfx_backend_web`.
//!
//! Wires one page-lifetime [`FrameLoop`]: each frame ticks a
//! [`FrameScheduler`] over the live document and [`DomPresenter`] writes the
//! results. After that, pointer-tilt cards follow the mouse and an ambient
//! particle field is drawn on a `canvas.ambient-particles` element when the
//! page has one.
//!
//! Build with: `wasm-pack build --target web demos/web_scroll`
//!
//! Then serve `demos/web_scroll/` and open `index.html` in a browser.
//!
//! [`FrameLoop`]: scrollfx_backend_web::FrameLoop
//! [`DomPresenter`]: scrollfx_backend_web::DomPresenter
//! [`FrameScheduler`]: scrollfx_core::scheduler::FrameScheduler

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::{Point, Size};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use scrollfx_backend_web::events::{self, Listener};
use scrollfx_backend_web::{
    DocumentHost as _, DomDocument, DomPresenter, EffectFrame, FrameLoop, ParticleCanvas,
};
use scrollfx_core::ambient::{ParticleField, TiltSet};
use scrollfx_core::config::EffectConfig;
use scrollfx_core::element::ElementKey;
use scrollfx_core::scheduler::FrameScheduler;
use scrollfx_core::time::HostTime;
use scrollfx_core::timing::FrameTick;
use scrollfx_core::trace::Tracer;

const PARTICLE_CANVAS: &str = "canvas.ambient-particles";

struct Particles {
    field: ParticleField,
    canvas: ParticleCanvas,
}

struct App {
    config: EffectConfig,
    scheduler: FrameScheduler<DomDocument>,
    presenter: DomPresenter,
    tilt: TiltSet,
    moved: Vec<ElementKey>,
    particles: Option<Particles>,
    /// Pointer handlers for the current tilt cards; replaced on rediscovery.
    tilt_listeners: Vec<Listener>,
}

impl App {
    fn on_scroll(&mut self, offset: f64, now: HostTime) {
        self.scheduler.scroll_to(offset, now);
        self.presenter.begin_scrolling();
    }

    fn on_resize(&mut self) {
        self.scheduler.resize(&mut Tracer::none());
        self.tilt
            .discover(self.scheduler.host_mut(), self.config.markers.tilt_card);
        let size = viewport_size(self.scheduler.host());
        if let Some(p) = &mut self.particles {
            p.field.resize(size);
            p.canvas.resize(size);
        }
    }

    fn pointer_move(&mut self, key: ElementKey, pointer: Point) {
        if let Some(bounds) = self.scheduler.host().bounding_box(key) {
            self.tilt.pointer_move(key, pointer, bounds);
        }
    }
}

impl EffectFrame for App {
    type Host = DomDocument;
    type Presenter = DomPresenter;

    fn parts(&mut self) -> (&mut FrameScheduler<DomDocument>, &mut DomPresenter) {
        (&mut self.scheduler, &mut self.presenter)
    }

    fn after_present(&mut self, _tick: FrameTick) {
        self.moved.clear();
        self.tilt.step(&mut self.moved);
        self.presenter.apply_tilt(&self.tilt, &self.moved);

        if let Some(p) = &mut self.particles {
            p.field.step();
            p.canvas.draw(&p.field);
        }
    }
}

/// Entry point, called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let config = EffectConfig::standard();

    let host = DomDocument::new(window.clone())?;
    let presenter = DomPresenter::new(host.nodes(), host.root());
    let particles = particle_canvas(&host)?.map(|canvas| {
        let size = viewport_size(&host);
        canvas.resize(size);
        Particles {
            field: ParticleField::new(&config.ambient.particles, size),
            canvas,
        }
    });
    let initial_offset = host.scroll_offset();

    let mut scheduler = FrameScheduler::new(host, config, scrollfx_backend_web::timebase());
    scheduler.scroll_to(initial_offset, scrollfx_backend_web::now());
    let mut tilt = TiltSet::new(config.ambient.tilt);
    tilt.discover(scheduler.host_mut(), config.markers.tilt_card);

    let app = Rc::new(RefCell::new(App {
        config,
        scheduler,
        presenter,
        tilt,
        moved: Vec::new(),
        particles,
        tilt_listeners: Vec::new(),
    }));
    bind_tilt_cards(&app)?;

    let scroll_app = Rc::clone(&app);
    let scroll = events::on_scroll(&window, move |offset, now| {
        scroll_app.borrow_mut().on_scroll(offset, now);
    })?;

    let resize_app = Rc::clone(&app);
    let resize = events::on_resize(&window, move || {
        resize_app.borrow_mut().on_resize();
        // A failed rebind leaves the cards flat; scroll effects keep running.
        let _ = bind_tilt_cards(&resize_app);
    })?;

    let frames = FrameLoop::new(app);
    frames.start();

    // The loop and its listeners live as long as the page.
    core::mem::forget(frames);
    core::mem::forget(scroll);
    core::mem::forget(resize);

    Ok(())
}

/// Attaches pointer handlers to every current tilt card.
fn bind_tilt_cards(app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    let cards: Vec<_> = {
        let app = app.borrow();
        let table = app.scheduler.host().table();
        app.tilt
            .keys()
            .filter_map(|key| table.resolve(key).cloned().map(|el| (key, el)))
            .collect()
    };

    let mut listeners = Vec::with_capacity(cards.len() * 2);
    for (key, el) in cards {
        let move_app = Rc::clone(app);
        listeners.push(events::on_pointer_move(&el, move |pointer| {
            move_app.borrow_mut().pointer_move(key, pointer);
        })?);
        let leave_app = Rc::clone(app);
        listeners.push(events::on_pointer_leave(&el, move || {
            leave_app.borrow_mut().tilt.pointer_leave(key);
        })?);
    }
    app.borrow_mut().tilt_listeners = listeners;
    Ok(())
}

fn particle_canvas(host: &DomDocument) -> Result<Option<ParticleCanvas>, JsValue> {
    let Some(el) = host.document().query_selector(PARTICLE_CANVAS)? else {
        return Ok(None);
    };
    let canvas = el.dyn_into::<HtmlCanvasElement>()?;
    ParticleCanvas::new(canvas).map(Some)
}

fn viewport_size(host: &DomDocument) -> Size {
    let viewport = host.viewport();
    Size::new(viewport.width, viewport.height)
}
