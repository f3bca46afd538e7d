//! Scheduling tests for the animation driver
//!
//! These run on a paused Tokio clock, so elapsed times are exact and the
//! tests finish instantly:
//! - Single animations resolve after their settle duration
//! - Sequences serialize steps and their delays
//! - Stagger groups share timing and offset only by delay
//! - Reduced motion and the admission cap commit end states immediately

mod common;

use common::{assert_elapsed, driver, recording, scale, settling_in, Call};
use sprung_animation::{
    recipes, AnimationSequence, AnimationStep, EasingCurve, ReducedMotion, SpringPreset,
    SpringTiming, TargetRef,
};
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_animate_to_resolves_after_settle_duration() {
    let motion = ReducedMotion::default();
    let driver = driver(20, &motion);
    let (recorder, target) = recording();

    let start = Instant::now();
    let mut done = driver.animate_to(Some(&target), &scale(1.0), SpringPreset::Smooth);

    assert!(!done.is_complete());
    assert_eq!(driver.admission().active_count(), 1);
    assert_eq!(recorder.applied(), vec![scale(1.0)]);
    assert_eq!(
        recorder.calls()[0],
        Call::Timing {
            timing: SpringPreset::Smooth.timing(),
            delay_ms: 0
        }
    );

    done.await.unwrap();

    assert_elapsed(start, 462);
    assert_eq!(driver.admission().active_count(), 0);
    assert_eq!(recorder.calls().last(), Some(&Call::End));
}

#[tokio::test(start_paused = true)]
async fn test_reduced_motion_commits_before_returning() {
    let motion = ReducedMotion::new(true);
    let driver = driver(20, &motion);
    let (recorder, target) = recording();

    let mut done = driver.animate_to(Some(&target), &scale(0.5), SpringPreset::Deliberate);

    assert!(done.is_complete());
    assert_eq!(recorder.applied(), vec![scale(0.5)]);
    assert_eq!(recorder.last_timing().map(|(t, _)| t.duration_ms), Some(0));
    assert!(!recorder.calls().contains(&Call::Begin));
    assert_eq!(driver.admission().active_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_missing_target_is_a_no_op() {
    let driver = driver(20, &ReducedMotion::default());

    let mut done = driver.animate_to(None, &scale(1.0), SpringPreset::Bouncy);

    assert!(done.is_complete());
    assert_eq!(driver.admission().active_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_sequence_serializes_steps_and_delays() {
    let driver = driver(20, &ReducedMotion::default());
    let (recorder, target) = recording();

    let sequence = AnimationSequence::new()
        .then(AnimationStep::on(&target, scale(0.9)).spring(settling_in(200.0)))
        .then(
            AnimationStep::on(&target, scale(1.1))
                .spring(settling_in(150.0))
                .delay(100),
        )
        .then(
            AnimationStep::on(&target, scale(1.0))
                .spring(settling_in(100.0))
                .delay(100),
        );
    assert_eq!(sequence.estimated_duration_ms(), 650);

    let start = Instant::now();
    let done = driver.sequence(sequence);

    // Step B must not start before A settles and B's delay elapses.
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(recorder.applied(), vec![scale(0.9)]);

    done.await.unwrap();

    assert!(start.elapsed() >= Duration::from_millis(650));
    assert_eq!(recorder.applied(), vec![scale(0.9), scale(1.1), scale(1.0)]);

    let ends = recorder.calls().iter().filter(|c| **c == Call::End).count();
    assert_eq!(ends, 3);
}

#[tokio::test(start_paused = true)]
async fn test_sequence_under_reduced_motion_applies_in_order() {
    let driver = driver(20, &ReducedMotion::new(true));
    let (first, first_target) = recording();
    let (second, second_target) = recording();

    let sequence = AnimationSequence::new()
        .then(AnimationStep::on(&first_target, scale(0.9)).delay(300))
        .then(AnimationStep::new(None, scale(2.0)))
        .then(AnimationStep::on(&second_target, scale(1.2)).delay(300))
        .then(AnimationStep::on(&first_target, scale(1.0)));

    let start = Instant::now();
    let mut done = driver.sequence(sequence);

    assert!(done.is_complete());
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert_eq!(first.applied(), vec![scale(0.9), scale(1.0)]);
    assert_eq!(second.applied(), vec![scale(1.2)]);
}

#[tokio::test(start_paused = true)]
async fn test_stagger_group_assigns_offset_delays() {
    let driver = driver(20, &ReducedMotion::default());
    let recorders: Vec<_> = (0..5).map(|_| recording()).collect();
    let targets: Vec<TargetRef> = recorders.iter().map(|(_, t)| t.clone()).collect();

    let plan = driver.stagger_group(&targets, SpringPreset::Smooth, 50);

    assert_eq!(plan.delays, vec![0, 50, 100, 150, 200]);
    assert_eq!(plan.timing.easing, EasingCurve::Smooth);
    assert_eq!(plan.total_duration_ms(), 200 + 462);

    for ((recorder, _), expected_delay) in recorders.iter().zip([0, 50, 100, 150, 200]) {
        assert_eq!(recorder.last_timing(), Some((plan.timing, expected_delay)));
    }
}

#[tokio::test(start_paused = true)]
async fn test_stagger_to_runs_members_concurrently() {
    let driver = driver(20, &ReducedMotion::default());
    let recorders: Vec<_> = (0..5).map(|_| recording()).collect();
    let targets: Vec<TargetRef> = recorders.iter().map(|(_, t)| t.clone()).collect();

    let start = Instant::now();
    let mut completions = driver.stagger_to(&targets, &scale(1.0), SpringPreset::Smooth, 50);
    assert_eq!(completions.len(), 5);
    assert_eq!(driver.admission().active_count(), 5);

    for (recorder, _) in &recorders {
        assert_eq!(recorder.applied(), vec![scale(1.0)]);
    }

    let last = completions.pop().unwrap();
    let first = completions.remove(0);

    first.await.unwrap();
    assert_elapsed(start, 462);

    last.await.unwrap();
    assert_elapsed(start, 200 + 462);
}

#[tokio::test(start_paused = true)]
async fn test_admission_cap_snaps_overflow() {
    let driver = driver(2, &ReducedMotion::default());
    let targets: Vec<_> = (0..3).map(|_| recording()).collect();

    let mut done: Vec<_> = targets
        .iter()
        .map(|(_, t)| driver.animate_to(Some(t), &scale(1.0), SpringPreset::Gentle))
        .collect();

    assert!(!done[0].is_complete());
    assert!(!done[1].is_complete());
    assert!(done[2].is_complete());
    assert_eq!(driver.admission().active_count(), 2);
    assert!(!driver.admission().can_animate());

    let (overflow, _) = &targets[2];
    assert_eq!(overflow.last_timing().map(|(t, _)| t.duration_ms), Some(0));
    assert_eq!(overflow.applied(), vec![scale(1.0)]);

    for completion in done {
        completion.await.unwrap();
    }
    assert_eq!(driver.admission().active_count(), 0);
    assert!(driver.admission().can_animate());
}

#[tokio::test(start_paused = true)]
async fn test_recipes_run_through_driver() {
    let driver = driver(20, &ReducedMotion::default());
    let (recorder, target) = recording();

    let start = Instant::now();
    driver.play(Some(&target), &recipes::exit()).await.unwrap();
    let exit_ms = u64::from(SpringPreset::Quick.timing().duration_ms);
    assert_elapsed(start, exit_ms);

    driver
        .sequence(recipes::drop_celebration(&target))
        .await
        .unwrap();

    let applied = recorder.applied();
    assert_eq!(applied.len(), 3);
    assert_eq!(applied[0], recipes::exit().properties);
    assert_eq!(applied[2], scale(1.0));
}

#[tokio::test(start_paused = true)]
async fn test_reduced_motion_toggle_skips_remaining_delays() {
    let motion = ReducedMotion::default();
    let driver = driver(20, &motion);
    let (recorder, target) = recording();
    let (other, other_target) = recording();

    let sequence = AnimationSequence::new()
        .then(AnimationStep::on(&target, scale(0.9)).spring(settling_in(200.0)))
        .then(
            AnimationStep::on(&target, scale(1.0))
                .spring(settling_in(200.0))
                .delay(5000),
        )
        .then(AnimationStep::on(&other_target, scale(1.2)).delay(5000));

    let start = Instant::now();
    let done = driver.sequence(sequence);

    tokio::time::sleep(Duration::from_millis(10)).await;
    motion.set(true);

    // The running step still settles; nothing after it waits.
    done.await.unwrap();
    assert_elapsed(start, 200);
    assert_eq!(recorder.applied(), vec![scale(0.9), scale(1.0)]);
    assert_eq!(recorder.last_timing(), Some((SpringTiming::instant(EasingCurve::QuickSettle), 0)));
    assert_eq!(other.applied(), vec![scale(1.2)]);
    assert_eq!(driver.admission().active_count(), 0);
}
