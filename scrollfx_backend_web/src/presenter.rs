// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM writes.
//!
//! Applies [`PublishedStore`] values to the elements listed in
//! [`FrameChanges`]. Numeric values become CSS custom properties and boolean
//! markers become classes. The presenter never writes `transform` itself: an
//! element can sit in several groups at once (parallax and float, or a tilt
//! card that also reveals), and the stylesheet composes one transform from
//! all of their properties.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use web_sys::HtmlElement;

use scrollfx_core::ambient::{TiltPose, TiltSet};
use scrollfx_core::element::ElementKey;
use scrollfx_core::host::Presenter;
use scrollfx_core::publish::{FrameChanges, PublishedStore};

use crate::document::NodeTable;

/// Class and property names the presenter writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresenterNames {
    /// Class set while an element is in the reveal band.
    pub revealed_class: &'static str,
    /// Custom property carrying the parallax offset in pixels.
    pub parallax_property: &'static str,
    /// Custom property carrying glow intensity in `[0, 1]`.
    pub glow_property: &'static str,
    /// Class set while the glow is above its threshold.
    pub glow_active_class: &'static str,
    /// Custom property carrying the float offset in pixels.
    pub float_property: &'static str,
    /// Custom property carrying the warp amount.
    pub warp_property: &'static str,
    /// Class set while the warp is non-negligible.
    pub warp_active_class: &'static str,
    /// Custom property carrying a tilt card's rotation about X, in degrees.
    pub tilt_x_property: &'static str,
    /// Custom property carrying a tilt card's rotation about Y, in degrees.
    pub tilt_y_property: &'static str,
    /// Custom property carrying a tilt card's scale.
    pub tilt_scale_property: &'static str,
    /// Class set on the page root during a scroll burst.
    pub scrolling_class: &'static str,
}

impl PresenterNames {
    /// Names used by the bundled stylesheet.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            revealed_class: "is-revealed",
            parallax_property: "--parallax-offset",
            glow_property: "--glow-intensity",
            glow_active_class: "glow-active",
            float_property: "--float-offset",
            warp_property: "--warp-amount",
            warp_active_class: "warp-active",
            tilt_x_property: "--tilt-x",
            tilt_y_property: "--tilt-y",
            tilt_scale_property: "--tilt-scale",
            scrolling_class: "is-scrolling",
        }
    }
}

impl Default for PresenterNames {
    fn default() -> Self {
        Self::standard()
    }
}

/// One write to a single element.
#[derive(Clone, Debug, PartialEq)]
enum StyleWrite {
    Property(&'static str, String),
    Class(&'static str, bool),
}

impl StyleWrite {
    fn apply(&self, el: &HtmlElement) {
        match self {
            Self::Property(name, value) => {
                let _ = el.style().set_property(name, value);
            }
            Self::Class(class, on) => {
                let _ = el.class_list().toggle_with_force(class, *on);
            }
        }
    }
}

/// Writes published values to the live page.
///
/// Indices in [`FrameChanges`] are resolved through the [`NodeTable`] shared
/// with the [`DomDocument`](crate::DomDocument) that discovered them.
pub struct DomPresenter {
    nodes: Rc<RefCell<NodeTable>>,
    root: Option<HtmlElement>,
    names: PresenterNames,
    scrolling: bool,
    writes: Vec<(u32, StyleWrite)>,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("nodes", &self.nodes.borrow().len())
            .field("names", &self.names)
            .field("scrolling", &self.scrolling)
            .finish_non_exhaustive()
    }
}

impl DomPresenter {
    /// Creates a presenter over `nodes`; `root` receives the scrolling
    /// class.
    #[must_use]
    pub fn new(nodes: Rc<RefCell<NodeTable>>, root: Option<HtmlElement>) -> Self {
        Self {
            nodes,
            root,
            names: PresenterNames::standard(),
            scrolling: false,
            writes: Vec::new(),
        }
    }

    /// Replaces the class and property names.
    #[must_use]
    pub fn with_names(mut self, names: PresenterNames) -> Self {
        self.names = names;
        self
    }

    /// Marks the page as scrolling until the next settle.
    pub fn begin_scrolling(&mut self) {
        if self.scrolling {
            return;
        }
        self.scrolling = true;
        if let Some(root) = &self.root {
            let _ = root.class_list().add_1(self.names.scrolling_class);
        }
    }

    /// Writes tilt poses for the cards that moved this frame.
    pub fn apply_tilt(&self, tilt: &TiltSet, moved: &[ElementKey]) {
        let nodes = self.nodes.borrow();
        for &key in moved {
            if let (Some(el), Some(pose)) = (nodes.resolve(key), tilt.pose(key)) {
                for write in tilt_writes(&self.names, &pose) {
                    write.apply(el);
                }
            }
        }
    }
}

impl Presenter for DomPresenter {
    fn apply(&mut self, published: &PublishedStore, changes: &FrameChanges) {
        if changes.settled && self.scrolling {
            self.scrolling = false;
            if let Some(root) = &self.root {
                let _ = root.class_list().remove_1(self.names.scrolling_class);
            }
        }

        self.writes.clear();
        plan_writes(&self.names, published, changes, &mut self.writes);

        let nodes = self.nodes.borrow();
        for (idx, write) in &self.writes {
            if let Some(el) = nodes.get(*idx) {
                write.apply(el);
            }
        }
    }
}

/// Appends the writes for every changed element to `out`, channel by channel.
fn plan_writes(
    names: &PresenterNames,
    published: &PublishedStore,
    changes: &FrameChanges,
    out: &mut Vec<(u32, StyleWrite)>,
) {
    for &idx in &changes.reveal {
        if let Some(on) = published.revealed(idx) {
            out.push((idx, StyleWrite::Class(names.revealed_class, on)));
        }
    }

    for &idx in &changes.parallax {
        if let Some(offset) = published.parallax(idx) {
            out.push((idx, StyleWrite::Property(names.parallax_property, px(offset))));
        }
    }

    for &idx in &changes.glow {
        if let Some(level) = published.glow(idx) {
            out.push((idx, StyleWrite::Property(names.glow_property, number(level.value))));
            out.push((idx, StyleWrite::Class(names.glow_active_class, level.active)));
        }
    }

    for &idx in &changes.float {
        if let Some(offset) = published.float(idx) {
            out.push((idx, StyleWrite::Property(names.float_property, px(offset))));
        }
    }

    for &idx in &changes.warp {
        if let Some(level) = published.warp(idx) {
            out.push((idx, StyleWrite::Property(names.warp_property, number(level.value))));
            out.push((idx, StyleWrite::Class(names.warp_active_class, level.active)));
        }
    }
}

fn tilt_writes(names: &PresenterNames, pose: &TiltPose) -> [StyleWrite; 3] {
    [
        StyleWrite::Property(names.tilt_x_property, deg(pose.rotate_x)),
        StyleWrite::Property(names.tilt_y_property, deg(pose.rotate_y)),
        StyleWrite::Property(names.tilt_scale_property, number(pose.scale)),
    ]
}

fn number(value: f64) -> String {
    format!("{value:.4}")
}

fn px(value: f64) -> String {
    format!("{value:.3}px")
}

fn deg(value: f64) -> String {
    format!("{value:.3}deg")
}

#[cfg(test)]
mod tests {
    use super::*;

    use scrollfx_core::publish::Level;

    fn key(index: u32) -> ElementKey {
        ElementKey::new(index, 1)
    }

    fn plan(store: &mut PublishedStore) -> Vec<(u32, StyleWrite)> {
        let mut changes = FrameChanges::default();
        store.collect_changes(&mut changes);
        let mut writes = Vec::new();
        plan_writes(&PresenterNames::standard(), store, &changes, &mut writes);
        writes
    }

    fn property(name: &'static str, value: &str) -> StyleWrite {
        StyleWrite::Property(name, value.into())
    }

    fn touches_transform(writes: &[(u32, StyleWrite)]) -> bool {
        writes
            .iter()
            .any(|(_, w)| matches!(w, StyleWrite::Property(name, _) if *name == "transform"))
    }

    #[test]
    fn offsets_are_pixel_lengths() {
        assert_eq!(px(-4.25), "-4.250px");
        assert_eq!(px(1.5), "1.500px");
    }

    #[test]
    fn levels_keep_four_decimals() {
        assert_eq!(number(0.15), "0.1500");
        assert_eq!(number(1.0), "1.0000");
    }

    #[test]
    fn parallax_and_float_on_one_element_keep_separate_properties() {
        let mut store = PublishedStore::new();
        store.publish_parallax(key(0), 12.0);
        store.publish_float(key(0), -3.0);
        let writes = plan(&mut store);
        assert_eq!(
            writes,
            [
                (0, property("--parallax-offset", "12.000px")),
                (0, property("--float-offset", "-3.000px")),
            ]
        );

        // Only the parallax offset moves: the float property is left alone,
        // so the stylesheet still adds both.
        store.publish_parallax(key(0), 14.0);
        store.publish_float(key(0), -3.0);
        let writes = plan(&mut store);
        assert_eq!(writes, [(0, property("--parallax-offset", "14.000px"))]);
        assert!(!touches_transform(&writes));
    }

    #[test]
    fn no_channel_writes_transform() {
        let mut store = PublishedStore::new();
        store.publish_reveal(key(0), true);
        store.publish_parallax(key(0), 1.0);
        store.publish_glow(
            key(1),
            Level {
                value: 0.5,
                active: true,
            },
        );
        store.publish_float(key(1), 2.0);
        store.publish_warp(
            key(2),
            Level {
                value: 1.5,
                active: true,
            },
        );
        let writes = plan(&mut store);
        assert_eq!(writes.len(), 7);
        assert!(!touches_transform(&writes));
        assert!(writes.contains(&(0, StyleWrite::Class("is-revealed", true))));
        assert!(writes.contains(&(2, StyleWrite::Class("warp-active", true))));

        let tilt = tilt_writes(&PresenterNames::standard(), &TiltPose::REST);
        assert!(
            tilt.iter()
                .all(|w| !matches!(w, StyleWrite::Property(name, _) if *name == "transform"))
        );
    }

    #[test]
    fn rest_pose_is_flat() {
        assert_eq!(
            tilt_writes(&PresenterNames::standard(), &TiltPose::REST),
            [
                property("--tilt-x", "0.000deg"),
                property("--tilt-y", "0.000deg"),
                property("--tilt-scale", "1.0000"),
            ]
        );
    }

    #[test]
    fn names_default_to_standard() {
        let names = PresenterNames::default();
        assert_eq!(names.revealed_class, "is-revealed");
        assert_eq!(names.scrolling_class, "is-scrolling");
    }
}
