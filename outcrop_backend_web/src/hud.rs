// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM status overlay.
//!
//! [`HudPresenter`] renders the tracking state into a fixed-position DOM
//! overlay: a status line mirroring the reticle, and one marker line per
//! live placement. Markers are slot-indexed and applied incrementally from
//! [`PlacementChanges`], mirroring how the set itself reuses slots.

use alloc::format;
use alloc::vec::Vec;

use wasm_bindgen::JsCast as _;
use web_sys::HtmlElement;

use outcrop_core::backend::ScenePresenter;
use outcrop_core::placement::{PlacementChanges, PlacementSet};
use outcrop_core::tracker::Reticle;

/// Maps tracking state to a DOM overlay, applying placement updates
/// incrementally.
///
/// The presenter owns a container `HtmlElement`; a status element and one
/// child `<div>` per live placement are managed inside it.
pub struct HudPresenter {
    container: HtmlElement,
    status: HtmlElement,
    markers: Vec<Option<HtmlElement>>,
}

impl core::fmt::Debug for HudPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HudPresenter")
            .field("markers_len", &self.markers.len())
            .finish_non_exhaustive()
    }
}

impl HudPresenter {
    /// Creates a presenter that manages child elements of `container`.
    ///
    /// A status element is created and appended immediately.
    #[must_use]
    pub fn new(container: HtmlElement) -> Self {
        let doc = container.owner_document().expect("no owner document");
        let status: HtmlElement = doc
            .create_element("div")
            .expect("create_element failed")
            .unchecked_into();
        status.set_text_content(Some("searching for a surface"));
        let _ = container.append_child(&status);
        Self {
            container,
            status,
            markers: Vec::new(),
        }
    }

    /// Returns a reference to the container element.
    #[must_use]
    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// Returns the marker element for the given slot, if it exists.
    #[must_use]
    pub fn marker(&self, slot: u32) -> Option<&HtmlElement> {
        self.markers.get(slot as usize).and_then(|m| m.as_ref())
    }

    fn take_marker(&mut self, slot: u32) -> Option<HtmlElement> {
        self.markers.get_mut(slot as usize)?.take()
    }

    fn put_marker(&mut self, slot: u32, el: HtmlElement) {
        let idx = slot as usize;
        if self.markers.len() <= idx {
            self.markers.resize_with(idx + 1, || None);
        }
        self.markers[idx] = Some(el);
    }
}

impl ScenePresenter for HudPresenter {
    fn update_reticle(&mut self, reticle: &Reticle) {
        if reticle.visible() {
            let [x, y, z] = reticle.transform().position();
            self.status
                .set_text_content(Some(&format!("surface at ({x:.2}, {y:.2}, {z:.2})")));
        } else {
            self.status.set_text_content(Some("searching for a surface"));
        }
    }

    fn apply_placements(&mut self, set: &PlacementSet, changes: &PlacementChanges) {
        // Removals first, so a replaced slot frees its marker before the
        // addition for the same slot arrives.
        for &slot in &changes.removed {
            if let Some(el) = self.take_marker(slot) {
                el.remove();
            }
        }

        for &slot in &changes.added {
            let Some(placement) = set.get(slot) else {
                continue;
            };
            let doc = self.container.owner_document().expect("no owner document");
            let el: HtmlElement = doc
                .create_element("div")
                .expect("create_element failed")
                .unchecked_into();
            let [x, y, z] = placement.pose.position();
            el.set_text_content(Some(&format!(
                "placed #{slot} at ({x:.2}, {y:.2}, {z:.2})"
            )));
            let _ = self.container.append_child(&el);
            self.put_marker(slot, el);
        }
    }
}
