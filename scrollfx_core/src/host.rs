// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract between the core and a host page.
//!
//! A backend provides two pieces:
//!
//! - **Document**: implements [`DocumentHost`] so the registry can find
//!   marked elements and query their geometry.
//! - **Presenter**: implements [`Presenter`] to turn published values into
//!   visible change (custom properties, transforms, class markers).
//!
//! The core never touches page nodes directly; it only holds
//! [`ElementKey`]s, which the host resolves.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::element::{ElementGeometry, ElementKey, Viewport};
use crate::publish::{FrameChanges, PublishedStore};

/// Read access to the host document.
///
/// Geometry queries return `None` when the key is stale (minted in an older
/// discovery epoch) or the element has left the page; callers skip such
/// entries rather than treating them as errors.
pub trait DocumentHost {
    /// Starts a new discovery epoch, invalidating every previously minted key.
    fn begin_scan(&mut self);

    /// Appends the keys of all elements carrying `marker` to `out`, in
    /// document order.
    fn query(&mut self, marker: &str, out: &mut Vec<ElementKey>);

    /// Whether `key` also carries `marker`.
    fn has_marker(&self, key: ElementKey, marker: &str) -> bool;

    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Static geometry for `key`: document offset and content height.
    fn geometry(&self, key: ElementKey) -> Option<ElementGeometry>;

    /// Live viewport-relative bounding box for `key`.
    fn bounding_box(&self, key: ElementKey) -> Option<Rect>;
}

/// Applies published values to the presentation layer.
///
/// # Frame loop pseudocode
///
/// ```rust,ignore
/// fn on_frame(tick: FrameTick) {
///     scheduler.tick(tick, &mut tracer);
///     scheduler.present(&mut presenter);
/// }
/// ```
pub trait Presenter {
    /// Writes the entries listed in `changes`, reading their values from
    /// `published`.
    fn apply(&mut self, published: &PublishedStore, changes: &FrameChanges);
}
