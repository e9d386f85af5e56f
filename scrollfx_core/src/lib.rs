// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-linked visual effects runtime.
//!
//! `scrollfx_core` turns a bursty stream of scroll offsets into smooth,
//! per-element effect values that a presentation layer applies to a page. It
//! is `no_std` compatible (with `alloc`), never touches page nodes directly,
//! and holds only non-owning [`ElementKey`](element::ElementKey)s that the
//! host resolves.
//!
//! # Architecture
//!
//! ```text
//!   Host scroll events ──► FrameScheduler::scroll_to() ──► ScrollSignal.raw
//!                                                              │
//!   Backend (tick source)                                      │
//!       │                                                      ▼
//!       ▼                                                  smoothed
//!   FrameTick ──► FrameScheduler::tick()  ◄────────────────────┘
//!                     │
//!                     ├─► Reveal ─► Parallax ─► Glow ─► Float ─► TextWarp
//!                     ▼
//!               PublishedStore ──► FrameChanges ──► Presenter::apply()
//! ```
//!
//! **[`signal`]**: exponential scroll smoother and the settle debounce.
//!
//! **[`registry`]**: per-group element tables, rebuilt wholesale by
//! discovery from the markers in [`config::Markers`].
//!
//! **[`effects`]**: the five updaters. Parallax, glow, float and text warp
//! share the generic [`Interpolated`](effects::Interpolated) driver; reveal
//! is a binary gate over live bounding boxes.
//!
//! **[`publish`]**: last-published values with multi-channel dirty tracking
//! via `understory_dirty`, so presenters only write what moved.
//!
//! **[`session`]** and **[`scheduler`]**: the page-lifetime state owner and
//! the fixed-order per-frame driver.
//!
//! **[`host`]**: the [`DocumentHost`](host::DocumentHost) and
//! [`Presenter`](host::Presenter) seams a backend implements.
//!
//! **[`ambient`]**: pointer-tilt cards and a seeded particle field, which run
//! beside the scroll pipeline.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! frame-loop instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! **[`headless`]**: an in-memory document for tests and offline runs.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod ambient;
pub mod config;
pub mod dirty;
pub mod effects;
pub mod element;
pub mod headless;
pub mod host;
pub mod math;
pub mod publish;
pub mod registry;
pub mod scheduler;
pub mod session;
pub mod signal;
pub mod time;
pub mod timing;
pub mod trace;
