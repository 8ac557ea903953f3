// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame hit-test polling.
//!
//! Resolves the frame's hit-test results against the room-stable reference
//! space and feeds the first-ranked hit into
//! [`HitTracker::poll_frame`](outcrop_core::tracker::HitTracker::poll_frame).
//! Must only be called from inside an XR animation-frame callback; an
//! `XRFrame` is invalid outside it.

use wasm_bindgen::JsCast as _;
use web_sys::{XrFrame, XrHitTestResult, XrHitTestSource, XrReferenceSpace};

use outcrop_core::pose::RigidTransform;
use outcrop_core::tracker::PollOutcome;

use crate::WebHitTracker;

/// Resolves the frame's first-ranked hit against `space`.
///
/// Returns `None` when the frame carries no hits, when the hit's pose cannot
/// be expressed in `space` (tracking loss), or when the runtime hands back a
/// malformed matrix.
#[must_use]
pub fn resolve_first_hit(
    frame: &XrFrame,
    source: &XrHitTestSource,
    space: &XrReferenceSpace,
) -> Option<RigidTransform> {
    let results = frame.get_hit_test_results(source);
    if results.length() == 0 {
        return None;
    }
    // Results arrive ranked by the runtime; trust its ordering.
    let first: XrHitTestResult = results.get(0).unchecked_into();
    let pose = first.get_pose(space)?;
    RigidTransform::try_from_matrix(&pose.transform().matrix())
}

/// Polls one frame's hit-test results into the tracker's reticle.
///
/// A no-op returning [`PollOutcome::Inactive`] until acquisition completes.
pub fn poll_hit_test(tracker: &mut WebHitTracker, frame: &XrFrame) -> PollOutcome {
    tracker.poll_frame(|source, space| resolve_first_hit(frame, source, space))
}
