// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared wiring for the AR placement demos.
//!
//! Both web demos are the same application with one knob: the
//! [`RetentionPolicy`] handed to the placement set. [`launch`] builds the
//! page chrome with a start button (session negotiation requires a user
//! activation), and the click handler runs the session: negotiate
//! `immersive-ar` with `hit-test`, wire the `select` and `end` events, and
//! drive acquisition and per-frame polling from an
//! [`XrFrameLoop`](outcrop_backend_web::XrFrameLoop).

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use core::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use outcrop_backend_web::{
    HudPresenter, ScenePresenter as _, SharedTracker, WebHitTracker, XrFrameLoop, acquire, hit,
    session,
};
use outcrop_core::placement::{PlacementSet, RetentionPolicy};

/// Builds the page chrome and arms the start button.
///
/// Call once from the wasm entry point. The actual session starts on click.
pub fn launch(policy: RetentionPolicy, title: &'static str) -> Result<(), JsValue> {
    let window = web_sys::window().expect("no global window");
    let document = window.document().expect("no document");

    let overlay = create_overlay(&document, title)?;
    document.body().expect("no body").append_child(&overlay)?;

    let button: HtmlElement = document.create_element("button")?.unchecked_into();
    button.set_text_content(Some("Start AR"));
    overlay.append_child(&button)?;

    // Session negotiation only succeeds under a user activation, so it runs
    // from the click handler rather than at load.
    let clicked = button.clone();
    let on_click = Closure::wrap(Box::new(move || {
        clicked.remove();
        let overlay = overlay.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = run_session(overlay, policy).await {
                web_sys::console::error_1(&e);
            }
        });
    }) as Box<dyn FnMut()>);
    button.set_onclick(Some(on_click.as_ref().unchecked_ref()));
    on_click.forget();

    Ok(())
}

/// Negotiates the session and wires the tracking lifecycle to it.
async fn run_session(overlay: HtmlElement, policy: RetentionPolicy) -> Result<(), JsValue> {
    let xr_session = session::request_ar_session()
        .await
        .map_err(|e| JsValue::from_str(&format!("{e}")))?;

    let tracker: SharedTracker = Rc::new(RefCell::new(WebHitTracker::new()));
    let placements = Rc::new(RefCell::new(PlacementSet::new(policy)));
    let presenter = Rc::new(RefCell::new(HudPresenter::new(overlay)));

    // Placement trigger: a screen tap fires `select`. Placing while the
    // reticle is hidden yields empty changes and the HUD stays untouched.
    {
        let tracker = Rc::clone(&tracker);
        let placements = Rc::clone(&placements);
        let presenter = Rc::clone(&presenter);
        session::on_select(&xr_session, move |_event| {
            let tracker = tracker.borrow();
            let mut placements = placements.borrow_mut();
            let changes = placements.place_at(tracker.reticle());
            if !changes.is_empty() {
                presenter
                    .borrow_mut()
                    .apply_placements(&placements, &changes);
            }
        });
    }

    // Session end: reset the tracker so a later session starts clean and an
    // in-flight acquisition is discarded on arrival.
    {
        let tracker = Rc::clone(&tracker);
        let presenter = Rc::clone(&presenter);
        session::on_end(&xr_session, move || {
            let mut tracker = tracker.borrow_mut();
            tracker.end_session();
            presenter.borrow_mut().update_reticle(tracker.reticle());
        });
    }

    // Frame loop: issue the acquisition until it wins, poll every frame.
    let loop_session = xr_session.clone();
    let frame_tracker = Rc::clone(&tracker);
    let frame_presenter = Rc::clone(&presenter);
    let frames = XrFrameLoop::new(xr_session, move |_tick, frame| {
        acquire::spawn_acquire(&loop_session, &frame_tracker);
        let mut tracker = frame_tracker.borrow_mut();
        let _ = hit::poll_hit_test(&mut tracker, frame);
        frame_presenter.borrow_mut().update_reticle(tracker.reticle());
    });
    frames.start();

    // Keep the frame loop alive for the page's lifetime; there is no
    // graceful shutdown on the web.
    core::mem::forget(frames);

    Ok(())
}

fn create_overlay(doc: &Document, title: &str) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = doc.create_element("div")?.unchecked_into();
    let s = el.style();
    s.set_property("position", "fixed")?;
    s.set_property("top", "0")?;
    s.set_property("left", "0")?;
    s.set_property("padding", "12px")?;
    s.set_property("font-family", "monospace")?;
    s.set_property("color", "#fff")?;
    s.set_property("background", "rgba(0, 0, 0, 0.6)")?;

    let heading: HtmlElement = doc.create_element("div")?.unchecked_into();
    heading.set_text_content(Some(title));
    el.append_child(&heading)?;
    Ok(el)
}
