// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element identity and geometry snapshots.

use core::fmt;

/// A non-owning handle to a page element.
///
/// The host document owns element lifetime. A key is only a lookup index into
/// the host's table for one discovery pass: every re-scan starts a new
/// `epoch`, and hosts answer `None` for keys minted under an older one.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementKey {
    /// Slot index into the host's element table.
    pub index: u32,
    /// Discovery epoch the key was minted in.
    pub epoch: u32,
}

impl ElementKey {
    /// Creates a key for `index` in discovery `epoch`.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, epoch: u32) -> Self {
        Self { index, epoch }
    }
}

impl fmt::Debug for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementKey({}@epoch{})", self.index, self.epoch)
    }
}

/// Static geometry captured at discovery time.
///
/// This is a point-in-time snapshot in document coordinates. It is not kept
/// live and is only refreshed by a full re-discovery.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementGeometry {
    /// Distance from the top of the document to the element's top edge.
    pub offset_top: f64,
    /// Content height of the element.
    pub height: f64,
}

impl ElementGeometry {
    /// Creates a snapshot.
    #[inline]
    #[must_use]
    pub const fn new(offset_top: f64, height: f64) -> Self {
        Self { offset_top, height }
    }

    /// Document-space vertical center.
    #[inline]
    #[must_use]
    pub fn center(&self) -> f64 {
        self.offset_top + self.height / 2.0
    }
}

/// Visible viewport dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport.
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether the height can be divided by (finite and positive).
    ///
    /// A viewport that has not been laid out yet reports zero height; every
    /// updater is skipped for such a tick.
    #[inline]
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.height.is_finite() && self.height > 0.0
    }

    /// Document-space vertical center of the viewport at scroll offset `scroll`.
    #[inline]
    #[must_use]
    pub fn center_at(&self, scroll: f64) -> f64 {
        scroll + self.height / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_height_viewport_is_unusable() {
        assert!(!Viewport::new(1024.0, 0.0).is_usable());
        assert!(!Viewport::new(1024.0, f64::NAN).is_usable());
        assert!(!Viewport::new(1024.0, -10.0).is_usable());
        assert!(Viewport::new(1024.0, 768.0).is_usable());
    }

    #[test]
    fn centers() {
        let g = ElementGeometry::new(1000.0, 200.0);
        assert_eq!(g.center(), 1100.0);
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.center_at(500.0), 800.0);
    }
}
