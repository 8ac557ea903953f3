// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! AR session negotiation and lifecycle events.
//!
//! [`request_ar_session`] negotiates an `immersive-ar` session with the
//! `hit-test` feature from `navigator.xr`. The event helpers wire the two
//! session events the tracking lifecycle hangs off: `select` (the placement
//! trigger) and `end` (tracker reset).

use alloc::boxed::Box;
use alloc::format;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{XrInputSourceEvent, XrSession, XrSessionInit, XrSessionMode, XrSystem};

/// Why session negotiation failed.
#[derive(Clone, Debug)]
pub enum SessionError {
    /// `navigator.xr` is absent; the browser has no WebXR device API.
    XrUnavailable,
    /// The runtime rejected the `immersive-ar` session request, typically
    /// because AR or the `hit-test` feature is unsupported on this device.
    SessionRejected(alloc::string::String),
}

impl core::fmt::Display for SessionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::XrUnavailable => f.write_str("navigator.xr is unavailable"),
            Self::SessionRejected(reason) => {
                write!(f, "immersive-ar session rejected: {reason}")
            }
        }
    }
}

/// Requests an `immersive-ar` session with `hit-test` as a required feature.
///
/// Resolves once the user grants the session (browsers require a user
/// activation such as a button click before this can succeed).
pub async fn request_ar_session() -> Result<XrSession, SessionError> {
    let window = web_sys::window().ok_or(SessionError::XrUnavailable)?;
    let xr: XrSystem = window.navigator().xr();
    if xr.is_undefined() {
        return Err(SessionError::XrUnavailable);
    }

    let init = XrSessionInit::new();
    init.set_required_features(&js_sys::Array::of1(&"hit-test".into()));

    let session = JsFuture::from(xr.request_session_with_options(XrSessionMode::ImmersiveAr, &init))
        .await
        .map_err(|e| SessionError::SessionRejected(format!("{e:?}")))?;
    Ok(session.unchecked_into())
}

/// Registers a `select` handler on the session.
///
/// `select` fires when the user taps the screen (or actuates the primary
/// input); it is the placement trigger. The closure is leaked into the JS
/// heap and lives for the page's lifetime, matching the session's.
pub fn on_select(session: &XrSession, handler: impl FnMut(XrInputSourceEvent) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(XrInputSourceEvent)>);
    session.set_onselect(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
}

/// Registers an `end` handler on the session.
///
/// Fires when the session ends for any reason, including the user exiting
/// AR from browser chrome. Same leak discipline as [`on_select`].
pub fn on_end(session: &XrSession, handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    session.set_onend(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
}
