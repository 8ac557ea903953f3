// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placed objects and their retention policies.
//!
//! A [`PlacementSet`] records pose-stamped placements made at the reticle.
//! Each mutation returns a [`PlacementChanges`] naming the slot indices that
//! were added and removed, which the presenter applies incrementally —
//! removal is the presenter's cue to release whatever resources back the
//! slot (DOM element, geometry, material).
//!
//! The two demo variants intentionally diverge in retention and both
//! policies are preserved as configuration:
//!
//! - [`RetentionPolicy::RetainAll`] — placements accumulate unboundedly and
//!   are never removed (the sphere-placement demo).
//! - [`RetentionPolicy::ReplaceLatest`] — at most one placement exists; a
//!   new one removes its predecessor first (the model-placement demo).

use alloc::vec::Vec;

use crate::pose::RigidTransform;
use crate::tracker::Reticle;

/// What happens to existing placements when a new one is made.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RetentionPolicy {
    /// Keep every placement; nothing is ever removed.
    RetainAll,
    /// Keep only the most recent placement, removing its predecessor.
    ReplaceLatest,
}

/// One placed object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Pose the object was placed at (the reticle pose at trigger time).
    pub pose: RigidTransform,
}

/// Slot indices added and removed by one [`PlacementSet`] operation.
///
/// Consumed by [`ScenePresenter::apply_placements`]; removals are listed
/// before additions are applied so a presenter can recycle resources.
///
/// [`ScenePresenter::apply_placements`]: crate::backend::ScenePresenter::apply_placements
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementChanges {
    /// Slots that now hold a new placement.
    pub added: Vec<u32>,
    /// Slots whose placement was removed.
    pub removed: Vec<u32>,
}

impl PlacementChanges {
    /// `true` when the operation changed nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Slot-indexed store of placements under one [`RetentionPolicy`].
#[derive(Clone, Debug)]
pub struct PlacementSet {
    policy: RetentionPolicy,
    slots: Vec<Option<Placement>>,
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "slot indices are u32 by construction; the store never exceeds u32::MAX slots"
)]
impl PlacementSet {
    /// Creates an empty set with the given policy.
    #[must_use]
    pub const fn new(policy: RetentionPolicy) -> Self {
        Self {
            policy,
            slots: Vec::new(),
        }
    }

    /// The retention policy this set was created with.
    #[must_use]
    pub const fn policy(&self) -> RetentionPolicy {
        self.policy
    }

    /// Number of live placements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// `true` when no placement is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }

    /// Returns the placement in the given slot, if live.
    #[must_use]
    pub fn get(&self, slot: u32) -> Option<&Placement> {
        self.slots.get(slot as usize).and_then(|s| s.as_ref())
    }

    /// Iterates live placements as `(slot, placement)`.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Placement)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|p| (i as u32, p)))
    }

    /// Places an object at the current reticle pose.
    ///
    /// When the reticle is hidden no surface is in view; nothing is placed
    /// and the returned changes are empty. Otherwise a placement is recorded
    /// at the reticle transform, removing the predecessor first under
    /// [`RetentionPolicy::ReplaceLatest`].
    pub fn place_at(&mut self, reticle: &Reticle) -> PlacementChanges {
        if !reticle.visible() {
            return PlacementChanges::default();
        }
        self.place(reticle.transform())
    }

    fn place(&mut self, pose: RigidTransform) -> PlacementChanges {
        let mut changes = PlacementChanges::default();

        if self.policy == RetentionPolicy::ReplaceLatest {
            for (i, slot) in self.slots.iter_mut().enumerate() {
                if slot.take().is_some() {
                    changes.removed.push(i as u32);
                }
            }
        }

        let slot = self.alloc_slot();
        self.slots[slot as usize] = Some(Placement { pose });
        changes.added.push(slot);
        changes
    }

    /// First free slot, growing the store when all are occupied.
    fn alloc_slot(&mut self) -> u32 {
        match self.slots.iter().position(|s| s.is_none()) {
            Some(i) => i as u32,
            None => {
                self.slots.push(None);
                (self.slots.len() - 1) as u32
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{HitTracker, PollOutcome};

    fn visible_reticle(x: f32) -> Reticle {
        // Drive a real tracker rather than constructing reticle internals.
        let mut t: HitTracker<(), ()> = HitTracker::new();
        let token = t.begin_acquire().expect("token");
        t.finish_acquire(token, (), ());
        let outcome = t.poll_frame(|_, _| Some(RigidTransform::from_translation(x, 0.0, 0.0)));
        assert_eq!(outcome, PollOutcome::Surface);
        *t.reticle()
    }

    fn hidden_reticle() -> Reticle {
        let mut t: HitTracker<(), ()> = HitTracker::new();
        let token = t.begin_acquire().expect("token");
        t.finish_acquire(token, (), ());
        t.poll_frame(|_, _| None);
        *t.reticle()
    }

    #[test]
    fn hidden_reticle_places_nothing() {
        let mut set = PlacementSet::new(RetentionPolicy::RetainAll);
        let changes = set.place_at(&hidden_reticle());
        assert!(changes.is_empty());
        assert!(set.is_empty());
    }

    #[test]
    fn retain_all_accumulates() {
        let mut set = PlacementSet::new(RetentionPolicy::RetainAll);
        for i in 0_u32..4 {
            let changes = set.place_at(&visible_reticle(i as f32));
            assert_eq!(changes.added, alloc::vec![i]);
            assert!(changes.removed.is_empty());
        }
        assert_eq!(set.len(), 4);
        assert_eq!(
            set.get(2).expect("slot 2 live").pose.position(),
            [2.0, 0.0, 0.0]
        );
    }

    #[test]
    fn replace_latest_keeps_one() {
        let mut set = PlacementSet::new(RetentionPolicy::ReplaceLatest);

        let first = set.place_at(&visible_reticle(1.0));
        assert_eq!(first.added, alloc::vec![0]);
        assert!(first.removed.is_empty());

        let second = set.place_at(&visible_reticle(2.0));
        assert_eq!(second.removed, alloc::vec![0]);
        assert_eq!(second.added, alloc::vec![0], "freed slot is reused");

        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get(0).expect("slot 0 live").pose.position(),
            [2.0, 0.0, 0.0]
        );
    }

    #[test]
    fn iter_skips_dead_slots() {
        let mut set = PlacementSet::new(RetentionPolicy::ReplaceLatest);
        set.place_at(&visible_reticle(1.0));
        set.place_at(&visible_reticle(2.0));
        let live: Vec<u32> = set.iter().map(|(slot, _)| slot).collect();
        assert_eq!(live, alloc::vec![0]);
    }
}
