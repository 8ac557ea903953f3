// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame tick record.

use crate::time::HostTime;

/// A frame opportunity delivered by the backend's frame clock.
///
/// The XR frame callback supplies a timestamp and (when a session is
/// presenting) a per-frame query object; the query object itself stays in
/// the backend — core code only sees the tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTick {
    /// Host time when the tick was generated.
    pub now: HostTime,
    /// Monotonically increasing frame counter.
    pub frame_index: u64,
}
