// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Outcrop splits platform-specific work into *backend* crates. Each backend
//! provides the following pieces:
//!
//! - **Frame clock** — Invokes a callback once per displayable frame via a
//!   platform mechanism (`XRSession.requestAnimationFrame` on the web, a
//!   scripted step in the simulation harness). This is backend-specific and
//!   not abstracted by a trait because setup and lifecycle differ
//!   fundamentally across runtimes.
//!
//! - **Acquisition driver** — Runs the three sequential asynchronous
//!   requests (viewer reference space → hit-test source → `local` reference
//!   space) between [`begin_acquire`] and [`finish_acquire`] /
//!   [`fail_acquire`]. Each step must complete before the next begins.
//!
//! - **Hit resolution** — Supplies the closure [`poll_frame`] runs each
//!   frame: query the frame's ranked hit results against the stored source
//!   and resolve the first hit's pose in the stored reference space.
//!
//! - **Placement trigger** — Routes the runtime's discrete `select` event to
//!   [`PlacementSet::place_at`].
//!
//! - **Presenter** — Implements [`ScenePresenter`] to surface reticle and
//!   placement state.
//!
//! # Crate boundaries
//!
//! `outcrop_core` owns the data model, the tracker state machine, and this
//! contract module. Backend crates depend on `outcrop_core` and provide
//! runtime glue. Application code depends on both and wires them together in
//! a frame loop:
//!
//! ```rust,ignore
//! fn on_frame(tick: FrameTick, frame: &XrFrame) {
//!     if let Some(token) = tracker.begin_acquire() {
//!         spawn_acquire(session, token, tracker_handle);
//!     }
//!     tracker.poll_frame(|source, space| resolve_first_hit(frame, source, space));
//!     presenter.update_reticle(tracker.reticle());
//! }
//!
//! fn on_select() {
//!     let changes = placements.place_at(tracker.reticle());
//!     presenter.apply_placements(&placements, &changes);
//! }
//! ```
//!
//! [`begin_acquire`]: crate::tracker::HitTracker::begin_acquire
//! [`finish_acquire`]: crate::tracker::HitTracker::finish_acquire
//! [`fail_acquire`]: crate::tracker::HitTracker::fail_acquire
//! [`poll_frame`]: crate::tracker::HitTracker::poll_frame
//! [`PlacementSet::place_at`]: crate::placement::PlacementSet::place_at

use crate::placement::{PlacementChanges, PlacementSet};
use crate::tracker::Reticle;

/// Surfaces tracker and placement state on a platform-native presentation.
///
/// Both the DOM HUD presenter and test doubles implement this trait,
/// enabling generic frame loops.
pub trait ScenePresenter {
    /// Called once per frame with the current reticle state.
    fn update_reticle(&mut self, reticle: &Reticle);

    /// Applies the given [`PlacementChanges`], reading current placement
    /// poses from `set` as needed. Removed slots must release whatever
    /// resources back them before added slots are realized.
    fn apply_placements(&mut self, set: &PlacementSet, changes: &PlacementChanges);
}
