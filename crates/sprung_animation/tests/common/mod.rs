//! Shared test fixtures

#![allow(dead_code)]

use sprung_animation::{
    AdmissionController, AnimationDriver, AnimationTarget, PropertyMap, ReducedMotion,
    SpringConfig, SpringPreset, SpringTiming, TargetRef,
};
use std::sync::{Arc, Mutex};

/// Call recorded by [`RecordingTarget`]
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Timing { timing: SpringTiming, delay_ms: u32 },
    Properties(PropertyMap),
    Begin,
    End,
}

/// Target that records every call from the driver
#[derive(Default)]
pub struct RecordingTarget {
    calls: Mutex<Vec<Call>>,
}

impl RecordingTarget {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn applied(&self) -> Vec<PropertyMap> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Properties(map) => Some(map),
                _ => None,
            })
            .collect()
    }

    pub fn last_timing(&self) -> Option<(SpringTiming, u32)> {
        self.calls().into_iter().rev().find_map(|call| match call {
            Call::Timing { timing, delay_ms } => Some((timing, delay_ms)),
            _ => None,
        })
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl AnimationTarget for RecordingTarget {
    fn set_timing(&self, timing: &SpringTiming, delay_ms: u32) {
        self.record(Call::Timing {
            timing: *timing,
            delay_ms,
        });
    }

    fn apply_properties(&self, properties: &PropertyMap) {
        self.record(Call::Properties(properties.clone()));
    }

    fn begin_transition(&self) {
        self.record(Call::Begin);
    }

    fn end_transition(&self) {
        self.record(Call::End);
    }
}

pub fn recording() -> (Arc<RecordingTarget>, TargetRef) {
    let target = Arc::new(RecordingTarget::default());
    let handle: TargetRef = target.clone();
    (target, handle)
}

/// Driver on the current runtime with its own controller
pub fn driver(max_concurrent: usize, motion: &ReducedMotion) -> AnimationDriver {
    AnimationDriver::current(Arc::new(AdmissionController::new(
        max_concurrent,
        motion.clone(),
    )))
}

/// Overdamped spring (ratio 2) whose settle duration is `duration_ms`
pub fn settling_in(duration_ms: f64) -> SpringPreset {
    let omega = 4000.0 / duration_ms;
    SpringConfig::new(omega * omega, 4.0 * omega, 1.0, 0.0)
        .unwrap()
        .into()
}

pub fn scale(value: f32) -> PropertyMap {
    PropertyMap::builder().scale(value).build().unwrap()
}

/// Assert paused-clock time since `start` is `expected_ms`, allowing for
/// the timer wheel's millisecond rounding
#[track_caller]
pub fn assert_elapsed(start: tokio::time::Instant, expected_ms: u64) {
    let elapsed = start.elapsed().as_millis() as u64;
    assert!(
        (expected_ms..=expected_ms + 2).contains(&elapsed),
        "expected ~{expected_ms}ms, elapsed {elapsed}ms"
    );
}
