// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! AR demo: tap to place a marker on every detected surface.
//!
//! Placements accumulate for the life of the session
//! ([`RetentionPolicy::RetainAll`]).
//!
//! Build with: `wasm-pack build --target web demos/web_place_sphere`
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
    web_place_common::launch(RetentionPolicy::RetainAll, "tap to place markers")
}
