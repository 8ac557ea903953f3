// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated AR session that exercises the tracking and diagnostics pipeline.
//!
//! Runs a scripted session through [`SimSession`]: acquisition resolves after
//! a few frames, a surface drifts in and out of view, and the placement
//! trigger fires three times (once while no surface is in view). Lifecycle
//! events stream to a [`PrettyPrintSink`](outcrop_debug::pretty::PrettyPrintSink)
//! on stdout.

use outcrop_core::placement::{PlacementSet, RetentionPolicy};
use outcrop_core::pose::RigidTransform;
use outcrop_core::trace::{
    AcquireBeginEvent, AcquireFailedEvent, AcquireReadyEvent, PlacementEvent, SessionEndEvent,
    SurfaceEvent, TraceSink, Tracer,
};
use outcrop_core::tracker::TrackerPhase;
use outcrop_debug::pretty::PrettyPrintSink;
use outcrop_sim_harness::{AcquireScript, ScriptedRuntime, SimSession};

const FRAME_COUNT: u64 = 24;
/// Frames on which the placement trigger fires.
const SELECT_FRAMES: [u64; 3] = [4, 9, 16];

fn main() {
    // -- scripted surface --------------------------------------------------
    // No surface until frame 6, tracked through 11, lost through 13, then
    // tracked again until the end.
    let mut hits: Vec<Option<RigidTransform>> = vec![None; FRAME_COUNT as usize];
    for (i, hit) in hits.iter_mut().enumerate() {
        let x = i as f32 * 0.05;
        if (6..=11).contains(&i) || i >= 14 {
            *hit = Some(RigidTransform::from_translation(x, 0.0, -1.0));
        }
    }

    let mut session = SimSession::new(ScriptedRuntime {
        acquire: AcquireScript::ResolveAfter { latency: 3 },
        hits,
    });
    let mut placements = PlacementSet::new(RetentionPolicy::RetainAll);
    let mut sink = PrettyPrintSink::new(Box::new(std::io::stdout()));

    // -- simulated loop ----------------------------------------------------
    let mut prev_phase = session.tracker().phase();

    for i in 0..FRAME_COUNT {
        let (tick, outcome) = session.step();

        // Report phase transitions as lifecycle events.
        let phase = session.tracker().phase();
        if phase != prev_phase {
            match phase {
                TrackerPhase::Acquiring => sink.on_acquire_begin(&AcquireBeginEvent {
                    epoch: session.tracker().epoch(),
                    frame_index: tick.frame_index,
                }),
                TrackerPhase::Ready => sink.on_acquire_ready(&AcquireReadyEvent {
                    epoch: session.tracker().epoch(),
                }),
                TrackerPhase::Failed => {
                    let error = session
                        .tracker()
                        .acquire_error()
                        .expect("Failed phase records its error");
                    sink.on_acquire_failed(&AcquireFailedEvent {
                        epoch: session.tracker().epoch(),
                        error,
                    });
                }
                TrackerPhase::Idle => {}
            }
            prev_phase = phase;
        }

        sink.on_surface(&SurfaceEvent {
            frame_index: tick.frame_index,
            now: tick.now,
            outcome,
        });

        if SELECT_FRAMES.contains(&i) {
            let changes = session.select(&mut placements);
            let slot = changes.added.first().copied();
            let position = slot
                .and_then(|s| placements.get(s))
                .map(|p| p.pose.position());
            sink.on_placement(&PlacementEvent { slot, position });
        }

        // Also exercise the Tracer wrapper (just to prove it compiles and
        // dispatches).
        if i == 0 {
            let mut tracer = Tracer::new(&mut sink);
            tracer.surface(&SurfaceEvent {
                frame_index: tick.frame_index,
                now: tick.now,
                outcome,
            });
        }
    }

    // -- session end -------------------------------------------------------
    let epoch = session.tracker().epoch();
    session.end();
    sink.on_session_end(&SessionEndEvent { epoch });

    println!(
        "{} placements after {FRAME_COUNT} frames ({} acquisition sequence)",
        placements.len(),
        session.sequences_issued(),
    );
}
