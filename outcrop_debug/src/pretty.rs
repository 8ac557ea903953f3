// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per
//! tracking-lifecycle event to a [`Write`](std::io::Write) destination
//! (default: stderr). Timestamps are printed as milliseconds.

use std::io::Write;

use outcrop_core::trace::{
    AcquireBeginEvent, AcquireFailedEvent, AcquireReadyEvent, PlacementEvent, SessionEndEvent,
    SurfaceEvent, TraceSink,
};
use outcrop_core::tracker::PollOutcome;

/// Writes human-readable trace lines to a [`Write`](std::io::Write)
/// destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

fn outcome_name(outcome: PollOutcome) -> &'static str {
    match outcome {
        PollOutcome::Inactive => "inactive",
        PollOutcome::NoSurface => "lost",
        PollOutcome::Surface => "tracking",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_acquire_begin(&mut self, e: &AcquireBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[acquire:begin] epoch={} frame={}",
            e.epoch.0, e.frame_index,
        );
    }

    fn on_acquire_ready(&mut self, e: &AcquireReadyEvent) {
        let _ = writeln!(self.writer, "[acquire:ready] epoch={}", e.epoch.0);
    }

    fn on_acquire_failed(&mut self, e: &AcquireFailedEvent) {
        let _ = writeln!(
            self.writer,
            "[acquire:FAILED] epoch={} {}",
            e.epoch.0, e.error,
        );
    }

    fn on_surface(&mut self, e: &SurfaceEvent) {
        let _ = writeln!(
            self.writer,
            "[surface] frame={} at {:.1}ms {}",
            e.frame_index,
            e.now.as_millis(),
            outcome_name(e.outcome),
        );
    }

    fn on_placement(&mut self, e: &PlacementEvent) {
        match (e.slot, e.position) {
            (Some(slot), Some([x, y, z])) => {
                let _ = writeln!(
                    self.writer,
                    "[place] slot={slot} at ({x:.3}, {y:.3}, {z:.3})",
                );
            }
            _ => {
                let _ = writeln!(self.writer, "[place] no surface, ignored");
            }
        }
    }

    fn on_session_end(&mut self, e: &SessionEndEvent) {
        let _ = writeln!(self.writer, "[session:end] epoch={}", e.epoch.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outcrop_core::time::HostTime;
    use outcrop_core::tracker::SessionEpoch;

    #[test]
    fn writes_one_line_per_event() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        sink.on_acquire_begin(&AcquireBeginEvent {
            epoch: SessionEpoch(0),
            frame_index: 2,
        });
        sink.on_surface(&SurfaceEvent {
            frame_index: 3,
            now: HostTime(50_000),
            outcome: PollOutcome::Surface,
        });
        sink.on_placement(&PlacementEvent {
            slot: None,
            position: None,
        });

        let out = String::from_utf8(sink.writer).expect("utf8");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("[acquire:begin]"));
        assert!(lines[1].contains("50.0ms"));
        assert!(lines[2].contains("ignored"));
    }
}
