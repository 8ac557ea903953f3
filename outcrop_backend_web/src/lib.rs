// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! WebXR backend for outcrop.
//!
//! This crate provides integration with the browser's WebXR device API:
//!
//! - [`XrFrameLoop`]: `XRSession.requestAnimationFrame` frame clock
//! - [`session`]: AR session negotiation and lifecycle event wiring
//! - [`acquire`]: the asynchronous hit-test acquisition driver
//! - [`hit`]: per-frame hit-test polling against an `XRFrame`
//! - [`HudPresenter`]: DOM status overlay implementing
//!   [`ScenePresenter`](outcrop_core::backend::ScenePresenter)
//!
//! The WebXR interfaces bound through `web-sys` are unstable APIs; compile
//! with `RUSTFLAGS=--cfg=web_sys_unstable_apis`.

#![no_std]

extern crate alloc;

pub mod acquire;
pub mod hit;
mod hud;
pub mod session;
mod xr_loop;

pub use hud::HudPresenter;
pub use outcrop_core::backend::ScenePresenter;
pub use xr_loop::XrFrameLoop;

use alloc::rc::Rc;
use core::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::{XrHitTestSource, XrReferenceSpace};

use outcrop_core::time::HostTime;
use outcrop_core::tracker::HitTracker;

/// The tracker instantiated with this backend's runtime handles.
pub type WebHitTracker = HitTracker<XrHitTestSource, XrReferenceSpace>;

/// Shared tracker handle reachable from the frame callback, the acquisition
/// future, and the `select` handler. Single-threaded wasm needs no locking.
pub type SharedTracker = Rc<RefCell<WebHitTracker>>;

// Direct global binding instead of `web_sys::Window` methods; avoids
// fetching (and unwrapping) the Window/Performance objects on every call.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;
}

/// Returns the current host time from `performance.now()`.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis(performance_now())
}
