// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the tracking lifecycle.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! lifecycle instrumentation calls at each stage. All method bodies default
//! to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.

use crate::time::HostTime;
use crate::tracker::{AcquireError, PollOutcome, SessionEpoch};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the acquisition sequence is issued.
#[derive(Clone, Copy, Debug)]
pub struct AcquireBeginEvent {
    /// Epoch the sequence was issued under.
    pub epoch: SessionEpoch,
    /// Frame on which the first `begin_acquire` succeeded.
    pub frame_index: u64,
}

/// Emitted when both handles are installed and polling goes live.
#[derive(Clone, Copy, Debug)]
pub struct AcquireReadyEvent {
    /// Epoch the handles belong to.
    pub epoch: SessionEpoch,
}

/// Emitted when the runtime rejects the acquisition sequence.
#[derive(Clone, Copy, Debug)]
pub struct AcquireFailedEvent {
    /// Epoch the failed sequence was issued under.
    pub epoch: SessionEpoch,
    /// Which request was rejected.
    pub error: AcquireError,
}

/// Emitted when a poll changes the surface-tracking outcome.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceEvent {
    /// Frame the poll ran on.
    pub frame_index: u64,
    /// Host time of the frame.
    pub now: HostTime,
    /// The poll outcome.
    pub outcome: PollOutcome,
}

/// Emitted when a placement is made (or a trigger fires with no surface).
#[derive(Clone, Copy, Debug)]
pub struct PlacementEvent {
    /// Slot the placement landed in; `None` when the reticle was hidden and
    /// nothing was placed.
    pub slot: Option<u32>,
    /// Position of the placement, when one was made.
    pub position: Option<[f32; 3]>,
}

/// Emitted when the session ends and the tracker resets.
#[derive(Clone, Copy, Debug)]
pub struct SessionEndEvent {
    /// Epoch of the session that ended.
    pub epoch: SessionEpoch,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the tracking lifecycle.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when the acquisition sequence is issued.
    fn on_acquire_begin(&mut self, e: &AcquireBeginEvent) {
        _ = e;
    }

    /// Called when acquisition completes and polling goes live.
    fn on_acquire_ready(&mut self, e: &AcquireReadyEvent) {
        _ = e;
    }

    /// Called when acquisition fails (terminal for the session).
    fn on_acquire_failed(&mut self, e: &AcquireFailedEvent) {
        _ = e;
    }

    /// Called when a poll changes the surface-tracking outcome.
    fn on_surface(&mut self, e: &SurfaceEvent) {
        _ = e;
    }

    /// Called when a placement trigger fires.
    fn on_placement(&mut self, e: &PlacementEvent) {
        _ = e;
    }

    /// Called when the session ends.
    fn on_session_end(&mut self, e: &SessionEndEvent) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits an [`AcquireBeginEvent`].
    #[inline]
    pub fn acquire_begin(&mut self, e: &AcquireBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_acquire_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`AcquireReadyEvent`].
    #[inline]
    pub fn acquire_ready(&mut self, e: &AcquireReadyEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_acquire_ready(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`AcquireFailedEvent`].
    #[inline]
    pub fn acquire_failed(&mut self, e: &AcquireFailedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_acquire_failed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SurfaceEvent`].
    #[inline]
    pub fn surface(&mut self, e: &SurfaceEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_surface(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PlacementEvent`].
    #[inline]
    pub fn placement(&mut self, e: &PlacementEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_placement(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SessionEndEvent`].
    #[inline]
    pub fn session_end(&mut self, e: &SessionEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_session_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingSink {
        begins: u32,
        surfaces: u32,
    }

    impl TraceSink for CountingSink {
        fn on_acquire_begin(&mut self, _e: &AcquireBeginEvent) {
            self.begins += 1;
        }

        fn on_surface(&mut self, _e: &SurfaceEvent) {
            self.surfaces += 1;
        }
    }

    #[test]
    fn default_methods_are_noops() {
        let mut sink = NoopSink;
        sink.on_acquire_ready(&AcquireReadyEvent {
            epoch: SessionEpoch(0),
        });
        sink.on_session_end(&SessionEndEvent {
            epoch: SessionEpoch(0),
        });
    }

    #[test]
    fn tracer_dispatches_when_enabled() {
        let mut sink = CountingSink::default();
        let mut tracer = Tracer::new(&mut sink);
        tracer.acquire_begin(&AcquireBeginEvent {
            epoch: SessionEpoch(0),
            frame_index: 0,
        });
        tracer.surface(&SurfaceEvent {
            frame_index: 1,
            now: HostTime(16_000),
            outcome: PollOutcome::Surface,
        });
        drop(tracer);

        #[cfg(feature = "trace")]
        {
            assert_eq!(sink.begins, 1);
            assert_eq!(sink.surfaces, 1);
        }
        #[cfg(not(feature = "trace"))]
        {
            assert_eq!(sink.begins, 0);
            assert_eq!(sink.surfaces, 0);
        }
    }

    #[test]
    fn none_tracer_is_silent() {
        let mut tracer = Tracer::none();
        tracer.session_end(&SessionEndEvent {
            epoch: SessionEpoch(3),
        });
    }
}
