// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `XRSession.requestAnimationFrame` frame clock.
//!
//! [`XrFrameLoop`] drives a per-frame callback using the XR session's own
//! animation-frame scheduler, which runs at the XR device's refresh rate and
//! hands each callback a [`DOMHighResTimeStamp`][mdn] plus the per-frame
//! `XRFrame` query object. Polling only ever happens inside this callback —
//! an `XRFrame` is not valid outside it.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{XrFrame, XrSession};

use outcrop_core::frame::FrameTick;
use outcrop_core::time::HostTime;

/// An XR animation loop that emits [`FrameTick`]s alongside the `XRFrame`.
///
/// Create with [`XrFrameLoop::new`], then call [`start`](Self::start) to
/// begin receiving callbacks. The loop re-registers itself each frame until
/// [`stop`](Self::stop) is called or the `XrFrameLoop` is dropped.
pub struct XrFrameLoop {
    inner: Rc<LoopInner>,
}

type FrameClosure = Closure<dyn FnMut(f64, XrFrame)>;

struct LoopInner {
    /// The session whose animation-frame scheduler drives the loop.
    session: XrSession,

    /// The JS closure registered with `requestAnimationFrame`.
    ///
    /// Stored in its own `RefCell` so we can set it once in `start()` and
    /// reference it from inside itself without conflicting with `callback`.
    closure: RefCell<Option<FrameClosure>>,

    /// The user-supplied callback receiving each tick and its `XRFrame`.
    callback: RefCell<Box<dyn FnMut(FrameTick, &XrFrame)>>,

    /// Monotonically increasing frame counter (becomes `FrameTick::frame_index`).
    frame_counter: Cell<u64>,

    /// Whether the loop is currently running.
    running: Cell<bool>,

    /// The handle returned by the most recent `requestAnimationFrame` call,
    /// used by `cancelAnimationFrame` when stopping.
    raf_handle: Cell<i32>,
}

impl XrFrameLoop {
    /// Creates a new `XrFrameLoop` that is **not yet running**.
    ///
    /// `callback` will receive a [`FrameTick`] and the frame's `XRFrame` on
    /// each XR animation frame once [`start`](Self::start) is called.
    pub fn new(session: XrSession, callback: impl FnMut(FrameTick, &XrFrame) + 'static) -> Self {
        Self {
            inner: Rc::new(LoopInner {
                session,
                closure: RefCell::new(None),
                callback: RefCell::new(Box::new(callback)),
                frame_counter: Cell::new(0),
                running: Cell::new(false),
                raf_handle: Cell::new(0),
            }),
        }
    }

    /// The session this loop is registered against.
    #[must_use]
    pub fn session(&self) -> &XrSession {
        &self.inner.session
    }

    /// Starts the animation loop.
    ///
    /// If already running, this is a no-op.
    pub fn start(&self) {
        if self.inner.running.get() {
            return;
        }
        self.inner.running.set(true);

        let inner = Rc::clone(&self.inner);
        let closure = Closure::wrap(Box::new(move |timestamp_ms: f64, frame: XrFrame| {
            if !inner.running.get() {
                return;
            }

            let tick = FrameTick {
                now: HostTime::from_millis(timestamp_ms),
                frame_index: inner.frame_counter.get(),
            };
            inner.frame_counter.set(tick.frame_index + 1);

            // Invoke user callback. The borrow is scoped so it doesn't
            // overlap with the `closure` RefCell.
            inner.callback.borrow_mut()(tick, &frame);

            // Re-register for the next frame if still running.
            if inner.running.get()
                && let Some(ref closure) = *inner.closure.borrow()
            {
                let handle = inner
                    .session
                    .request_animation_frame(closure.as_ref().unchecked_ref());
                inner.raf_handle.set(handle);
            }
        }) as Box<dyn FnMut(f64, XrFrame)>);

        // Register the first frame.
        let handle = self
            .inner
            .session
            .request_animation_frame(closure.as_ref().unchecked_ref());
        self.inner.raf_handle.set(handle);
        *self.inner.closure.borrow_mut() = Some(closure);
    }

    /// Stops the animation loop.
    ///
    /// The pending animation-frame callback is cancelled. Can be restarted
    /// by calling [`start`](Self::start) again.
    pub fn stop(&self) {
        if !self.inner.running.get() {
            return;
        }
        self.inner.running.set(false);
        self.inner
            .session
            .cancel_animation_frame(self.inner.raf_handle.get());
    }

    /// Returns `true` if the loop is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }
}

impl Drop for XrFrameLoop {
    fn drop(&mut self) {
        self.stop();
        // Drop the JS closure so it doesn't leak.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for XrFrameLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("XrFrameLoop")
            .field("running", &self.inner.running.get())
            .field("frame_counter", &self.inner.frame_counter.get())
            .finish_non_exhaustive()
    }
}
