// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and Chrome trace export for scrollfx diagnostics.
//!
//! This crate provides [`TraceSink`](scrollfx_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`chrome::ChromeTraceSink`]: buffers events and writes Chrome Trace
//!   Event Format JSON.

pub mod chrome;
pub mod pretty;
