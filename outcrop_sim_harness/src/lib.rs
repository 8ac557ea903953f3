// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted XR runtime for tests and native demos.
//!
//! [`SimSession`] steps a real [`HitTracker`] through a scripted session the
//! same way the web backend's frame loop does: `begin_acquire` is called
//! unconditionally every frame, the scripted acquisition resolves (or fails)
//! after a configurable latency, and each frame's first-ranked hit comes
//! from a per-frame script. Nothing here touches a browser, so every
//! lifecycle property is testable natively.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use outcrop_core::frame::FrameTick;
use outcrop_core::placement::{PlacementChanges, PlacementSet};
use outcrop_core::pose::RigidTransform;
use outcrop_core::time::HostTime;
use outcrop_core::tracker::{AcquireError, AcquireToken, HitTracker, PollOutcome};

/// Nominal 60 Hz frame interval in microsecond ticks.
const FRAME_INTERVAL_US: u64 = 16_667;

/// Scripted hit-test source handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimSource(pub u32);

/// Scripted reference-space handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimSpace(pub u32);

/// How the scripted acquisition sequence behaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AcquireScript {
    /// Resolve successfully, `latency` frames after the sequence is issued.
    ResolveAfter {
        /// Frames between issue and completion.
        latency: u64,
    },
    /// Fail, `latency` frames after the sequence is issued.
    FailAfter {
        /// Frames between issue and rejection.
        latency: u64,
        /// Which request the runtime rejects.
        error: AcquireError,
    },
}

/// A scripted session: acquisition behavior plus per-frame hit results.
#[derive(Clone, Debug)]
pub struct ScriptedRuntime {
    /// Acquisition script, re-applied for each session.
    pub acquire: AcquireScript,
    /// First-ranked hit pose per frame index; `None` (or past the end)
    /// means no surface was detected that frame.
    pub hits: Vec<Option<RigidTransform>>,
}

impl ScriptedRuntime {
    fn hit_at(&self, frame_index: u64) -> Option<RigidTransform> {
        usize::try_from(frame_index)
            .ok()
            .and_then(|i| self.hits.get(i))
            .copied()
            .flatten()
    }
}

/// An acquisition sequence that has been issued but not yet delivered.
#[derive(Clone, Copy, Debug)]
struct PendingAcquire {
    token: AcquireToken,
    due_frame: u64,
}

/// Drives a [`HitTracker`] through a [`ScriptedRuntime`], one frame per
/// [`step`](Self::step) call.
#[derive(Debug)]
pub struct SimSession {
    runtime: ScriptedRuntime,
    tracker: HitTracker<SimSource, SimSpace>,
    /// Issued-but-undelivered sequences. More than one can be in flight
    /// across a session boundary, just like real spawned futures.
    pending: Vec<PendingAcquire>,
    frame_index: u64,
    /// Acquisition sequences actually issued (idempotence counter).
    sequences_issued: u32,
    /// Completions accepted by the tracker.
    completions_accepted: u32,
    /// Completions discarded by the epoch guard.
    completions_discarded: u32,
}

impl SimSession {
    /// Creates a session that has not yet rendered a frame.
    #[must_use]
    pub fn new(runtime: ScriptedRuntime) -> Self {
        Self {
            runtime,
            tracker: HitTracker::new(),
            pending: Vec::new(),
            frame_index: 0,
            sequences_issued: 0,
            completions_accepted: 0,
            completions_discarded: 0,
        }
    }

    /// The tracker under test.
    #[must_use]
    pub fn tracker(&self) -> &HitTracker<SimSource, SimSpace> {
        &self.tracker
    }

    /// Acquisition sequences issued so far (should stay at one per session).
    #[must_use]
    pub fn sequences_issued(&self) -> u32 {
        self.sequences_issued
    }

    /// Completions the tracker accepted.
    #[must_use]
    pub fn completions_accepted(&self) -> u32 {
        self.completions_accepted
    }

    /// Completions the epoch guard discarded.
    #[must_use]
    pub fn completions_discarded(&self) -> u32 {
        self.completions_discarded
    }

    /// Runs one frame: delivers a due acquisition completion, issues the
    /// acquisition if the tracker will take it, then polls the scripted hit.
    ///
    /// The ordering mirrors the web frame callback — an async completion
    /// scheduled earlier lands before this frame's polling.
    pub fn step(&mut self) -> (FrameTick, PollOutcome) {
        let tick = FrameTick {
            now: HostTime(self.frame_index * FRAME_INTERVAL_US),
            frame_index: self.frame_index,
        };

        let due: Vec<PendingAcquire> = {
            let frame = self.frame_index;
            let (due, rest) = self.pending.iter().copied().partition(|p| frame >= p.due_frame);
            self.pending = rest;
            due
        };
        for pending in due {
            self.deliver(pending);
        }

        // Called unconditionally every frame, exactly like the live driver;
        // only the first call per session wins a token.
        if let Some(token) = self.tracker.begin_acquire() {
            self.sequences_issued += 1;
            let latency = match self.runtime.acquire {
                AcquireScript::ResolveAfter { latency } | AcquireScript::FailAfter { latency, .. } => {
                    latency
                }
            };
            self.pending.push(PendingAcquire {
                token,
                due_frame: self.frame_index + latency,
            });
        }

        let hit = self.runtime.hit_at(self.frame_index);
        let outcome = self.tracker.poll_frame(|_source, _space| hit);

        self.frame_index += 1;
        (tick, outcome)
    }

    fn deliver(&mut self, pending: PendingAcquire) {
        let accepted = match self.runtime.acquire {
            AcquireScript::ResolveAfter { .. } => {
                self.tracker
                    .finish_acquire(pending.token, SimSource(0), SimSpace(0))
            }
            AcquireScript::FailAfter { error, .. } => self.tracker.fail_acquire(pending.token, error),
        };
        if accepted {
            self.completions_accepted += 1;
        } else {
            self.completions_discarded += 1;
        }
    }

    /// Fires the placement trigger against the current reticle.
    pub fn select(&mut self, placements: &mut PlacementSet) -> PlacementChanges {
        placements.place_at(self.tracker.reticle())
    }

    /// Ends the session: the tracker resets and any still-pending completion
    /// will be discarded by the epoch guard when it lands.
    pub fn end(&mut self) {
        self.tracker.end_session();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outcrop_core::placement::RetentionPolicy;
    use outcrop_core::tracker::TrackerPhase;

    fn pose(x: f32) -> RigidTransform {
        RigidTransform::from_translation(x, 0.0, 0.0)
    }

    /// The full frame-by-frame scenario: late acquisition, surface found,
    /// surface lost, trigger with no surface, trigger with surface, reset.
    #[test]
    fn placement_scenario() {
        let t = pose(1.0);
        let t2 = pose(2.0);
        let mut session = SimSession::new(ScriptedRuntime {
            acquire: AcquireScript::ResolveAfter { latency: 2 },
            hits: alloc::vec![None, None, Some(t), None, None, Some(t2)],
        });
        let mut placements = PlacementSet::new(RetentionPolicy::RetainAll);

        // Frames 1–2: acquisition still in flight, no polling.
        assert_eq!(session.step().1, PollOutcome::Inactive);
        assert_eq!(session.step().1, PollOutcome::Inactive);

        // Frame 3: acquisition resolved, surface detected at T.
        assert_eq!(session.step().1, PollOutcome::Surface);
        assert_eq!(session.tracker().reticle().transform(), t);

        // Frame 4: surface lost; transform stays stale.
        assert_eq!(session.step().1, PollOutcome::NoSurface);
        assert!(!session.tracker().reticle().visible());
        assert_eq!(session.tracker().reticle().transform(), t);

        // Frame 5: trigger while hidden — nothing placed.
        assert_eq!(session.step().1, PollOutcome::NoSurface);
        assert!(session.select(&mut placements).is_empty());
        assert!(placements.is_empty());

        // Frame 6: surface at T2, trigger places exactly one object there.
        assert_eq!(session.step().1, PollOutcome::Surface);
        let changes = session.select(&mut placements);
        assert_eq!(changes.added.len(), 1);
        assert_eq!(placements.len(), 1);
        assert_eq!(placements.get(0).expect("placed").pose, t2);

        // One acquisition sequence despite six frames of begin_acquire.
        assert_eq!(session.sequences_issued(), 1);
        assert_eq!(session.completions_accepted(), 1);

        // Session ends: state resets.
        session.end();
        assert_eq!(session.tracker().phase(), TrackerPhase::Idle);
        assert!(!session.tracker().reticle().visible());
    }

    #[test]
    fn acquisition_failure_disables_tracking() {
        let mut session = SimSession::new(ScriptedRuntime {
            acquire: AcquireScript::FailAfter {
                latency: 1,
                error: AcquireError::QueryRejected,
            },
            hits: alloc::vec![Some(pose(1.0)); 8],
        });

        for _ in 0..8 {
            // Hits are scripted every frame, but tracking never goes live.
            assert_eq!(session.step().1, PollOutcome::Inactive);
        }
        assert_eq!(session.tracker().phase(), TrackerPhase::Failed);
        assert_eq!(
            session.tracker().acquire_error(),
            Some(AcquireError::QueryRejected)
        );
        assert_eq!(session.sequences_issued(), 1, "no retry");
    }

    #[test]
    fn session_end_discards_inflight_completion() {
        let mut session = SimSession::new(ScriptedRuntime {
            acquire: AcquireScript::ResolveAfter { latency: 3 },
            hits: alloc::vec![Some(pose(1.0)); 8],
        });

        session.step();
        session.end(); // ends while the completion is still pending

        // The stale completion lands on a later frame and is discarded; a
        // fresh sequence is issued for the new session.
        for _ in 0..6 {
            session.step();
        }
        assert_eq!(session.completions_discarded(), 1);
        assert_eq!(session.sequences_issued(), 2);
        assert_eq!(session.tracker().phase(), TrackerPhase::Ready);
    }

    #[test]
    fn ticks_advance_at_frame_interval() {
        let mut session = SimSession::new(ScriptedRuntime {
            acquire: AcquireScript::ResolveAfter { latency: 0 },
            hits: Vec::new(),
        });
        let (t0, _) = session.step();
        let (t1, _) = session.step();
        assert_eq!(t0.frame_index, 0);
        assert_eq!(t1.frame_index, 1);
        assert_eq!((t1.now - t0.now).ticks(), FRAME_INTERVAL_US);
    }
}
