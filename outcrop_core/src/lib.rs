// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core state machine and placement model for AR surface hit-testing.
//!
//! `outcrop_core` owns the session-scoped logic that bridges a per-frame
//! polling render loop to an asynchronous, once-per-session acquisition of
//! spatial-query handles. It is `no_std` compatible (with `alloc`) and is
//! generic over the runtime's opaque handles, so it runs identically under a
//! live WebXR session and under a scripted simulation.
//!
//! # Architecture
//!
//! Each frame flows through the tracker and into a presenter:
//!
//! ```text
//!   Backend (frame clock)
//!       │
//!       ▼
//!   FrameTick ──► HitTracker::poll_frame() ──► Reticle (pose + visibility)
//!                                                  │
//!   select event ──► PlacementSet::place_at() ◄────┤
//!                         │                        │
//!                         ▼                        ▼
//!                  PlacementChanges ──► ScenePresenter::apply
//! ```
//!
//! Acquisition runs off to the side, at most once per session: the backend
//! calls [`HitTracker::begin_acquire`](tracker::HitTracker::begin_acquire)
//! from the frame callback until it yields a token, performs the runtime's
//! three asynchronous requests, and completes with
//! [`finish_acquire`](tracker::HitTracker::finish_acquire) or
//! [`fail_acquire`](tracker::HitTracker::fail_acquire). An epoch carried by
//! the token guards late completions against a session-end reset.
//!
//! **[`tracker`]** — The `Idle → Acquiring → Ready` state machine, the
//! reticle it maintains, and the epoch guard.
//!
//! **[`placement`]** — Pose-stamped placed objects with `RetainAll` /
//! `ReplaceLatest` retention, reporting incremental changes.
//!
//! **[`pose`]** — Column-major 4×4 rigid transform matching WebXR's
//! `XRRigidTransform.matrix` layout.
//!
//! **[`backend`]** — The [`ScenePresenter`](backend::ScenePresenter) trait
//! that platform backends implement to surface tracker and placement state.
//!
//! **[`frame`]** / **[`time`]** — Frame tick record and microsecond host
//! time.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! lifecycle instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod frame;
pub mod placement;
pub mod pose;
pub mod time;
pub mod trace;
pub mod tracker;
