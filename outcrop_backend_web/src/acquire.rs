// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Asynchronous hit-test acquisition.
//!
//! Runs the once-per-session acquisition sequence against a live
//! `XRSession`: a `viewer` reference space to subscribe the hit-test source
//! against, the hit-test source itself, and the room-stable `local`
//! reference space that hit poses are resolved in. The sequence is spawned
//! onto the browser microtask queue and reports back to the shared
//! [`WebHitTracker`](crate::WebHitTracker) through its epoch-guarded
//! completion methods, so a sequence that outlives its session is discarded
//! on arrival.

use alloc::format;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    XrHitTestOptionsInit, XrHitTestSource, XrReferenceSpace, XrReferenceSpaceType, XrSession,
};

use outcrop_core::tracker::AcquireError;

use crate::SharedTracker;

/// Claims the acquisition sequence for the tracker's current session and, if
/// this call won it, spawns the async chain.
///
/// Call this unconditionally from every frame callback until the tracker
/// leaves `Idle`; only the first call spawns anything.
pub fn spawn_acquire(session: &XrSession, tracker: &SharedTracker) {
    let Some(token) = tracker.borrow_mut().begin_acquire() else {
        return;
    };

    let session = session.clone();
    let tracker = SharedTracker::clone(tracker);
    wasm_bindgen_futures::spawn_local(async move {
        match run_acquire(&session).await {
            Ok((source, local)) => {
                tracker.borrow_mut().finish_acquire(token, source, local);
            }
            Err(error) => {
                web_sys::console::error_1(
                    &format!("hit-test acquisition failed: {error}").into(),
                );
                tracker.borrow_mut().fail_acquire(token, error);
            }
        }
    });
}

/// The acquisition chain proper: viewer space, hit-test source, local space.
async fn run_acquire(
    session: &XrSession,
) -> Result<(XrHitTestSource, XrReferenceSpace), AcquireError> {
    let viewer: XrReferenceSpace =
        JsFuture::from(session.request_reference_space(XrReferenceSpaceType::Viewer))
            .await
            .map_err(|_| AcquireError::SpaceRejected)?
            .unchecked_into();

    // Hit rays are cast forward from the viewer pose each frame.
    let options = XrHitTestOptionsInit::new(&viewer);
    let source: XrHitTestSource = JsFuture::from(session.request_hit_test_source(&options))
        .await
        .map_err(|_| AcquireError::QueryRejected)?
        .unchecked_into();

    let local: XrReferenceSpace =
        JsFuture::from(session.request_reference_space(XrReferenceSpaceType::Local))
            .await
            .map_err(|_| AcquireError::SpaceRejected)?
            .unchecked_into();

    Ok((source, local))
}
