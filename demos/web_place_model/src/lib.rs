// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! AR demo: tap to move a single object between detected surfaces.
//!
//! At most one placement exists at a time; each tap removes the previous one
//! ([`RetentionPolicy::ReplaceLatest`]).
//!
//! Build with: `wasm-pack build --target web demos/web_place_model`
//! (requires `RUSTFLAGS=--cfg=web_sys_unstable_apis`), then serve the demo
//! directory and open it on a WebXR-capable device.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

use wasm_bindgen::prelude::*;

use outcrop_core::placement::RetentionPolicy;

/// Entry point, called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    web_place_common::launch(RetentionPolicy::ReplaceLatest, "tap to move the object")
}
