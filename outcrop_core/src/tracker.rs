// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session-scoped hit-test tracking state machine.
//!
//! [`HitTracker`] bridges a per-frame polling render loop to an
//! asynchronous, once-per-session acquisition of two runtime handles: a
//! hit-test source subscribed against the viewer space, and a room-stable
//! (`local`) reference space that hit poses are resolved in. Both handle
//! types are opaque generics, so the tracker runs unchanged against a live
//! WebXR session and against the scripted simulation harness.
//!
//! # Lifecycle
//!
//! ```text
//!   Idle ──begin_acquire──► Acquiring ──finish_acquire──► Ready
//!                               │
//!                          fail_acquire
//!                               ▼
//!                            Failed
//!
//!   any phase ──end_session──► Idle  (handles dropped, epoch bumped)
//! ```
//!
//! The frame driver calls [`begin_acquire`](HitTracker::begin_acquire)
//! unconditionally every frame until acquisition finishes; only the first
//! call yields an [`AcquireToken`], so at most one acquisition sequence is
//! ever in flight. The token carries the [`SessionEpoch`] it was issued
//! under; [`finish_acquire`](HitTracker::finish_acquire) discards a
//! completion whose epoch is no longer current, which is what prevents a
//! late-resolving acquisition from installing stale handles after a
//! session-end reset.
//!
//! Acquisition failure is terminal for the session: the tracker parks in
//! [`TrackerPhase::Failed`], polling stays a no-op, and no retry is issued.

use core::fmt;

use crate::pose::RigidTransform;

/// Generation counter distinguishing one AR session's handles from the next.
///
/// Bumped by [`HitTracker::end_session`]. Completions carrying a stale epoch
/// are discarded.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SessionEpoch(pub u64);

impl fmt::Debug for SessionEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionEpoch({})", self.0)
    }
}

/// Where the tracker is in its per-session lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackerPhase {
    /// No acquisition has been issued for the current session.
    Idle,
    /// The asynchronous acquisition sequence is in flight.
    Acquiring,
    /// Both handles are installed; polling is live.
    Ready,
    /// Acquisition was rejected by the runtime. Tracking is disabled for the
    /// remainder of the session; no retry.
    Failed,
}

/// Proof that a [`begin_acquire`](HitTracker::begin_acquire) call won the
/// right to run the acquisition sequence.
///
/// Carries the epoch it was issued under so a completion can be checked
/// against a session-end reset.
#[derive(Clone, Copy, Debug)]
pub struct AcquireToken {
    epoch: SessionEpoch,
}

impl AcquireToken {
    /// The epoch this token was issued under.
    #[must_use]
    pub const fn epoch(&self) -> SessionEpoch {
        self.epoch
    }
}

/// Why an acquisition sequence failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AcquireError {
    /// The runtime rejected a reference-space request.
    SpaceRejected,
    /// The runtime rejected the hit-test source request.
    QueryRejected,
}

impl fmt::Display for AcquireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpaceRejected => f.write_str("runtime rejected a reference-space request"),
            Self::QueryRejected => f.write_str("runtime rejected the hit-test source request"),
        }
    }
}

/// The most recently detected placement surface.
///
/// Written only by [`HitTracker::poll_frame`]; read by the presenter and
/// the placement trigger handler. The transform is only meaningful while
/// [`visible`](Self::visible) — a stale transform is deliberately retained
/// while the surface is lost.
#[derive(Clone, Copy, Debug)]
pub struct Reticle {
    transform: RigidTransform,
    visible: bool,
}

impl Reticle {
    const fn hidden() -> Self {
        Self {
            transform: RigidTransform::IDENTITY,
            visible: false,
        }
    }

    /// Whether the most recent poll found at least one surface hit.
    #[inline]
    #[must_use]
    pub const fn visible(&self) -> bool {
        self.visible
    }

    /// Pose of the detected surface. Only meaningful while
    /// [`visible`](Self::visible).
    #[inline]
    #[must_use]
    pub const fn transform(&self) -> RigidTransform {
        self.transform
    }
}

/// Outcome of one [`HitTracker::poll_frame`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    /// The tracker is not `Ready`; nothing was polled.
    Inactive,
    /// The query ran but returned no hits; the reticle is now hidden.
    NoSurface,
    /// A surface hit was resolved; the reticle is visible at its pose.
    Surface,
}

/// Session-scoped owner of the hit-test source (`Q`), the room-stable
/// reference space (`S`), and the reticle they feed.
///
/// See the [module docs](self) for the lifecycle. All methods are
/// synchronous; the asynchronous acquisition chain lives in the backend and
/// reports back through [`finish_acquire`](Self::finish_acquire) /
/// [`fail_acquire`](Self::fail_acquire).
pub struct HitTracker<Q, S> {
    phase: TrackerPhase,
    epoch: SessionEpoch,
    source: Option<Q>,
    local_space: Option<S>,
    last_error: Option<AcquireError>,
    reticle: Reticle,
}

impl<Q, S> Default for HitTracker<Q, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q, S> fmt::Debug for HitTracker<Q, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HitTracker")
            .field("phase", &self.phase)
            .field("epoch", &self.epoch)
            .field("reticle", &self.reticle)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl<Q, S> HitTracker<Q, S> {
    /// Creates a tracker in [`TrackerPhase::Idle`] with a hidden reticle.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: TrackerPhase::Idle,
            epoch: SessionEpoch(0),
            source: None,
            local_space: None,
            last_error: None,
            reticle: Reticle::hidden(),
        }
    }

    /// Current lifecycle phase.
    #[inline]
    #[must_use]
    pub const fn phase(&self) -> TrackerPhase {
        self.phase
    }

    /// Current session epoch.
    #[inline]
    #[must_use]
    pub const fn epoch(&self) -> SessionEpoch {
        self.epoch
    }

    /// The reticle maintained by [`poll_frame`](Self::poll_frame).
    #[inline]
    #[must_use]
    pub const fn reticle(&self) -> &Reticle {
        &self.reticle
    }

    /// The error that parked the tracker in [`TrackerPhase::Failed`], if any.
    #[inline]
    #[must_use]
    pub const fn acquire_error(&self) -> Option<AcquireError> {
        self.last_error
    }

    /// Claims the right to run the acquisition sequence.
    ///
    /// Returns `Some` only from [`TrackerPhase::Idle`], transitioning to
    /// `Acquiring`. All later calls — expected every frame while the
    /// asynchronous chain is still in flight — return `None`, so at most one
    /// sequence is issued per session.
    pub fn begin_acquire(&mut self) -> Option<AcquireToken> {
        match self.phase {
            TrackerPhase::Idle => {
                self.phase = TrackerPhase::Acquiring;
                Some(AcquireToken { epoch: self.epoch })
            }
            TrackerPhase::Acquiring | TrackerPhase::Ready | TrackerPhase::Failed => None,
        }
    }

    /// Installs the acquired handles and transitions to `Ready`.
    ///
    /// If the token's epoch is stale (the session ended while the chain was
    /// in flight) the handles are dropped and the tracker is left untouched.
    /// Returns whether the completion was accepted.
    pub fn finish_acquire(&mut self, token: AcquireToken, source: Q, local_space: S) -> bool {
        if token.epoch != self.epoch || self.phase != TrackerPhase::Acquiring {
            return false;
        }
        self.source = Some(source);
        self.local_space = Some(local_space);
        self.phase = TrackerPhase::Ready;
        true
    }

    /// Records an acquisition failure and parks the tracker in `Failed`.
    ///
    /// Epoch-guarded like [`finish_acquire`](Self::finish_acquire). Returns
    /// whether the failure applied to the current session.
    pub fn fail_acquire(&mut self, token: AcquireToken, error: AcquireError) -> bool {
        if token.epoch != self.epoch || self.phase != TrackerPhase::Acquiring {
            return false;
        }
        self.phase = TrackerPhase::Failed;
        self.last_error = Some(error);
        true
    }

    /// Polls one frame's hit-test results and updates the reticle.
    ///
    /// A no-op unless `Ready` (the reticle keeps its previous state). When
    /// `Ready`, `resolve` receives the stored hit-test source and reference
    /// space and returns the first-ranked hit's pose resolved in that space,
    /// or `None` when no surface is in view. The runtime's own result
    /// ordering is trusted as-is.
    pub fn poll_frame<F>(&mut self, resolve: F) -> PollOutcome
    where
        F: FnOnce(&Q, &S) -> Option<RigidTransform>,
    {
        if self.phase != TrackerPhase::Ready {
            return PollOutcome::Inactive;
        }
        // Both handles are present whenever the phase is Ready.
        let (Some(source), Some(space)) = (self.source.as_ref(), self.local_space.as_ref()) else {
            return PollOutcome::Inactive;
        };
        match resolve(source, space) {
            Some(pose) => {
                self.reticle.transform = pose;
                self.reticle.visible = true;
                PollOutcome::Surface
            }
            None => {
                // Stale transform stays in place; it is not read while hidden.
                self.reticle.visible = false;
                PollOutcome::NoSurface
            }
        }
    }

    /// Resets for the next session: drops both handles, hides the reticle,
    /// returns to `Idle`, and bumps the epoch so any in-flight completion is
    /// discarded on arrival.
    pub fn end_session(&mut self) {
        self.phase = TrackerPhase::Idle;
        self.source = None;
        self.local_space = None;
        self.last_error = None;
        self.reticle = Reticle::hidden();
        self.epoch = SessionEpoch(self.epoch.0 + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Tracker = HitTracker<u32, u32>;

    fn pose_at(x: f32) -> RigidTransform {
        RigidTransform::from_translation(x, 0.0, 0.0)
    }

    fn ready_tracker() -> Tracker {
        let mut t = Tracker::new();
        let token = t.begin_acquire().expect("fresh tracker yields a token");
        assert!(t.finish_acquire(token, 7, 11));
        t
    }

    #[test]
    fn poll_before_ready_is_noop() {
        let mut t = Tracker::new();
        assert_eq!(t.poll_frame(|_, _| Some(pose_at(1.0))), PollOutcome::Inactive);
        assert!(!t.reticle().visible());

        let _token = t.begin_acquire().expect("token");
        assert_eq!(t.poll_frame(|_, _| Some(pose_at(1.0))), PollOutcome::Inactive);
        assert!(!t.reticle().visible());
    }

    #[test]
    fn begin_acquire_is_idempotent() {
        let mut t = Tracker::new();
        assert!(t.begin_acquire().is_some());
        // Re-entrant calls while the chain is in flight: no second sequence.
        for _ in 0..3 {
            assert!(t.begin_acquire().is_none());
        }
        assert_eq!(t.phase(), TrackerPhase::Acquiring);
    }

    #[test]
    fn visibility_tracks_hit_results() {
        let mut t = ready_tracker();

        assert_eq!(t.poll_frame(|_, _| Some(pose_at(2.0))), PollOutcome::Surface);
        assert!(t.reticle().visible());
        assert_eq!(t.reticle().transform(), pose_at(2.0));

        // Empty frame: hidden, stale transform untouched.
        assert_eq!(t.poll_frame(|_, _| None), PollOutcome::NoSurface);
        assert!(!t.reticle().visible());
        assert_eq!(t.reticle().transform(), pose_at(2.0));

        assert_eq!(t.poll_frame(|_, _| Some(pose_at(3.0))), PollOutcome::Surface);
        assert_eq!(t.reticle().transform(), pose_at(3.0));
    }

    #[test]
    fn poll_receives_stored_handles() {
        let mut t = ready_tracker();
        t.poll_frame(|source, space| {
            assert_eq!((*source, *space), (7, 11));
            None
        });
    }

    #[test]
    fn end_session_resets_everything() {
        let mut t = ready_tracker();
        t.poll_frame(|_, _| Some(pose_at(1.0)));
        assert!(t.reticle().visible());

        let before = t.epoch();
        t.end_session();
        assert_eq!(t.phase(), TrackerPhase::Idle);
        assert!(t.epoch() > before);
        assert!(!t.reticle().visible());
        assert_eq!(t.poll_frame(|_, _| Some(pose_at(1.0))), PollOutcome::Inactive);

        // A fresh acquisition is allowed in the next session.
        assert!(t.begin_acquire().is_some());
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut t = Tracker::new();
        let token = t.begin_acquire().expect("token");
        t.end_session();

        assert!(!t.finish_acquire(token, 1, 2));
        assert_eq!(t.phase(), TrackerPhase::Idle);
        assert_eq!(t.poll_frame(|_, _| Some(pose_at(1.0))), PollOutcome::Inactive);
    }

    #[test]
    fn stale_failure_is_discarded() {
        let mut t = Tracker::new();
        let token = t.begin_acquire().expect("token");
        t.end_session();

        assert!(!t.fail_acquire(token, AcquireError::QueryRejected));
        assert_eq!(t.phase(), TrackerPhase::Idle);
        assert_eq!(t.acquire_error(), None);
    }

    #[test]
    fn failure_disables_tracking_for_the_session() {
        let mut t = Tracker::new();
        let token = t.begin_acquire().expect("token");
        assert!(t.fail_acquire(token, AcquireError::SpaceRejected));
        assert_eq!(t.phase(), TrackerPhase::Failed);
        assert_eq!(t.acquire_error(), Some(AcquireError::SpaceRejected));

        // No retry: begin_acquire stays exhausted, polling stays inactive.
        assert!(t.begin_acquire().is_none());
        assert_eq!(t.poll_frame(|_, _| Some(pose_at(1.0))), PollOutcome::Inactive);
        assert!(!t.reticle().visible());

        // The next session starts clean.
        t.end_session();
        assert!(t.begin_acquire().is_some());
    }

    #[test]
    fn finish_after_ready_is_rejected() {
        let mut t = ready_tracker();
        let forged = AcquireToken { epoch: t.epoch() };
        assert!(!t.finish_acquire(forged, 99, 99));
        // Stored handles are unchanged.
        t.poll_frame(|source, space| {
            assert_eq!((*source, *space), (7, 11));
            None
        });
    }
}
