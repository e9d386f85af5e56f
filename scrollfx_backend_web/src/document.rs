// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live page as a [`DocumentHost`].
//!
//! Group membership is a class on the element: an element is in the reveal
//! group when it carries the reveal marker class, and so on. Discovery runs
//! `querySelectorAll(".marker")` per group; each distinct element gets one
//! slot in a [`NodeTable`] for the current epoch, so an element in several
//! groups resolves to the same [`ElementKey`] everywhere.

use alloc::format;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell};

use kurbo::Rect;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlElement, Window};

use scrollfx_core::element::{ElementGeometry, ElementKey, Viewport};
use scrollfx_core::host::DocumentHost;

/// Elements discovered in the current epoch, indexed by key slot.
///
/// Shared between [`DomDocument`] and the presenter, which resolves the
/// indices in `FrameChanges` through it.
#[derive(Debug, Default)]
pub struct NodeTable {
    epoch: u32,
    nodes: Vec<HtmlElement>,
}

impl NodeTable {
    /// Current discovery epoch.
    #[must_use]
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Number of distinct elements discovered this epoch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing was discovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The element at `index` in the current epoch.
    #[must_use]
    pub fn get(&self, index: u32) -> Option<&HtmlElement> {
        self.nodes.get(index as usize)
    }

    /// The element behind `key`, if the key is current and the element is
    /// still attached to the page.
    #[must_use]
    pub fn resolve(&self, key: ElementKey) -> Option<&HtmlElement> {
        if key.epoch != self.epoch {
            return None;
        }
        self.get(key.index).filter(|el| el.is_connected())
    }

    fn begin(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.nodes.clear();
    }

    fn intern(&mut self, el: HtmlElement) -> ElementKey {
        let slot = match self.nodes.iter().position(|known| *known == el) {
            Some(slot) => slot,
            None => {
                self.nodes.push(el);
                self.nodes.len() - 1
            }
        };
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a page holds far fewer than u32::MAX marked elements"
        )]
        let index = slot as u32;
        ElementKey::new(index, self.epoch)
    }
}

/// [`DocumentHost`] backed by the browser document.
pub struct DomDocument {
    window: Window,
    document: Document,
    nodes: Rc<RefCell<NodeTable>>,
}

impl core::fmt::Debug for DomDocument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomDocument")
            .field("nodes", &self.nodes.borrow().len())
            .finish_non_exhaustive()
    }
}

impl DomDocument {
    /// Wraps the window's document.
    ///
    /// # Errors
    ///
    /// Fails when the window has no document (e.g. inside a worker).
    pub fn new(window: Window) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        Ok(Self {
            window,
            document,
            nodes: Rc::new(RefCell::new(NodeTable::default())),
        })
    }

    /// The shared node table, for presenters.
    #[must_use]
    pub fn nodes(&self) -> Rc<RefCell<NodeTable>> {
        Rc::clone(&self.nodes)
    }

    /// Borrows the node table.
    #[must_use]
    pub fn table(&self) -> Ref<'_, NodeTable> {
        self.nodes.borrow()
    }

    /// The browser document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The browser window.
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The page's root element, where page-wide class markers go.
    #[must_use]
    pub fn root(&self) -> Option<HtmlElement> {
        self.document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    /// Current vertical scroll offset; zero if the window cannot report it.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }
}

impl DocumentHost for DomDocument {
    fn begin_scan(&mut self) {
        self.nodes.borrow_mut().begin();
    }

    fn query(&mut self, marker: &str, out: &mut Vec<ElementKey>) {
        // An invalid selector means a misconfigured marker; the group is
        // left empty.
        let Ok(list) = self.document.query_selector_all(&format!(".{marker}")) else {
            return;
        };
        let mut nodes = self.nodes.borrow_mut();
        for i in 0..list.length() {
            let Some(el) = list
                .item(i)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            out.push(nodes.intern(el));
        }
    }

    fn has_marker(&self, key: ElementKey, marker: &str) -> bool {
        self.nodes
            .borrow()
            .resolve(key)
            .is_some_and(|el| el.class_list().contains(marker))
    }

    fn viewport(&self) -> Viewport {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        Viewport::new(width, height)
    }

    fn geometry(&self, key: ElementKey) -> Option<ElementGeometry> {
        let nodes = self.nodes.borrow();
        let el = nodes.resolve(key)?;
        Some(ElementGeometry::new(
            f64::from(el.offset_top()),
            f64::from(el.client_height()),
        ))
    }

    fn bounding_box(&self, key: ElementKey) -> Option<Rect> {
        let nodes = self.nodes.borrow();
        let r = nodes.resolve(key)?.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.right(), r.bottom()))
    }
}
