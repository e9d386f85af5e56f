// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channels for published values.
//!
//! Each effect group publishes into its own channel (via
//! [`understory_dirty`]). All channels are local-only: marking an element
//! never marks any other element, since published values are per-element.
//!
//! # Consumption
//!
//! Presenters never query dirty state directly. Each
//! [`PublishedStore::collect_changes`](crate::publish::PublishedStore::collect_changes)
//! call drains all channels into
//! [`FrameChanges`](crate::publish::FrameChanges).

use understory_dirty::Channel;

/// Reveal marker toggled.
pub const REVEAL: Channel = Channel::new(0);

/// Parallax offset moved.
pub const PARALLAX: Channel = Channel::new(1);

/// Glow intensity or active marker changed.
pub const GLOW: Channel = Channel::new(2);

/// Float offset moved.
pub const FLOAT: Channel = Channel::new(3);

/// Warp amount or active marker changed.
pub const WARP: Channel = Channel::new(4);

/// Every channel, in scheduler phase order.
pub const ALL: [Channel; 5] = [REVEAL, PARALLAX, GLOW, FLOAT, WARP];
