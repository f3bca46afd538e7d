//! Animation driver
//!
//! Orchestrates spring animations on [`AnimationTarget`]s:
//!
//! - **Single animations** via [`AnimationDriver::animate_to`]
//! - **Sequences** whose steps start only after the previous one settled
//! - **Stagger groups** sharing one timing with per-element start offsets
//!
//! Every entry point honors reduced motion by committing end values
//! immediately. Work is scheduled on a Tokio runtime and observed through
//! [`Completion`] futures; nothing here blocks the caller.
//!
//! [`AnimationTarget`]: crate::target::AnimationTarget

use crate::admission::{AdmissionController, AdmissionPermit};
use crate::completion::Completion;
use crate::presets::SpringPreset;
use crate::property::PropertyMap;
use crate::recipes::Recipe;
use crate::spring::SpringTiming;
use crate::target::TargetRef;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

/// One step of an [`AnimationSequence`]
#[derive(Clone)]
pub struct AnimationStep {
    /// Target to animate; `None` makes the step a no-op
    pub target: Option<TargetRef>,
    /// End values
    pub properties: PropertyMap,
    /// Spring driving the step
    pub spring: SpringPreset,
    /// Wait before the step starts, counted after the previous step settled
    pub delay_ms: u32,
}

impl AnimationStep {
    pub fn new(target: Option<TargetRef>, properties: PropertyMap) -> Self {
        Self {
            target,
            properties,
            spring: SpringPreset::default(),
            delay_ms: 0,
        }
    }

    /// Step on a present target
    pub fn on(target: &TargetRef, properties: PropertyMap) -> Self {
        Self::new(Some(Arc::clone(target)), properties)
    }

    pub fn spring(mut self, spring: SpringPreset) -> Self {
        self.spring = spring;
        self
    }

    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

/// Ordered animation steps, executed strictly in list order
#[derive(Clone, Default)]
pub struct AnimationSequence {
    steps: Vec<AnimationStep>,
}

impl AnimationSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step (builder pattern)
    pub fn then(mut self, step: AnimationStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn push(&mut self, step: AnimationStep) {
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[AnimationStep] {
        &self.steps
    }

    /// Lower bound on wall-clock time with full motion: every delay plus
    /// every step's settle duration
    pub fn estimated_duration_ms(&self) -> u64 {
        self.steps
            .iter()
            .map(|step| u64::from(step.delay_ms) + u64::from(step.spring.timing().duration_ms))
            .sum()
    }
}

impl FromIterator<AnimationStep> for AnimationSequence {
    fn from_iter<I: IntoIterator<Item = AnimationStep>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for AnimationSequence {
    type Item = AnimationStep;
    type IntoIter = std::vec::IntoIter<AnimationStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

/// Shared timing and per-element delays of a stagger group
#[derive(Clone, Debug, PartialEq)]
pub struct StaggerPlan {
    /// Timing shared by every member
    pub timing: SpringTiming,
    /// Start offset of each member, in target order
    pub delays: Vec<u32>,
}

impl StaggerPlan {
    /// Member `i` starts `i * per_element_delay_ms` after the group
    pub fn new(timing: SpringTiming, count: usize, per_element_delay_ms: u32) -> Self {
        let delays = (0..count)
            .map(|i| {
                u32::try_from(i)
                    .unwrap_or(u32::MAX)
                    .saturating_mul(per_element_delay_ms)
            })
            .collect();
        Self { timing, delays }
    }

    pub fn len(&self) -> usize {
        self.delays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }

    /// `(n - 1) * delay + duration`, zero for an empty group
    pub fn total_duration_ms(&self) -> u64 {
        self.delays
            .last()
            .map(|last| u64::from(*last) + u64::from(self.timing.duration_ms))
            .unwrap_or(0)
    }
}

/// Schedules spring animations against targets
#[derive(Clone)]
pub struct AnimationDriver {
    admission: Arc<AdmissionController>,
    runtime: Handle,
}

impl AnimationDriver {
    pub fn new(admission: Arc<AdmissionController>, runtime: Handle) -> Self {
        Self { admission, runtime }
    }

    /// Driver bound to the runtime of the calling context
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime, like [`Handle::current`].
    pub fn current(admission: Arc<AdmissionController>) -> Self {
        Self::new(admission, Handle::current())
    }

    pub fn admission(&self) -> &Arc<AdmissionController> {
        &self.admission
    }

    fn reduced_motion(&self) -> bool {
        self.admission.reduced_motion().is_active()
    }

    /// Timing for `spring`, forced to zero duration under reduced motion
    pub fn timing_for(&self, spring: SpringPreset) -> SpringTiming {
        let timing = spring.timing();
        if self.reduced_motion() {
            SpringTiming::instant(timing.easing)
        } else {
            timing
        }
    }

    /// Compute timing for `spring` and attach it to `target`
    pub fn apply_timing(&self, target: &TargetRef, spring: SpringPreset) -> SpringTiming {
        let timing = self.timing_for(spring);
        target.set_timing(&timing, 0);
        timing
    }

    /// Animate `target` toward `properties`
    ///
    /// An absent target is a silent no-op. Under reduced motion, or when the
    /// admission cap is reached, the end values are committed immediately
    /// and the returned completion is already resolved. Otherwise the
    /// completion resolves once the spring's settle duration has elapsed.
    pub fn animate_to(
        &self,
        target: Option<&TargetRef>,
        properties: &PropertyMap,
        spring: SpringPreset,
    ) -> Completion {
        let Some(target) = target else {
            tracing::trace!(spring = %spring, "animate_to without a target, skipping");
            return Completion::resolved();
        };

        if self.reduced_motion() {
            snap(target, properties, spring.timing());
            return Completion::resolved();
        }

        match self.admission.try_admit() {
            Some(permit) => self.launch(target, properties, spring.timing(), 0, permit),
            None => {
                tracing::debug!(
                    active = self.admission.active_count(),
                    "admission cap reached, committing end state"
                );
                snap(target, properties, spring.timing());
                Completion::resolved()
            }
        }
    }

    /// Animate `target` with a ready-made recipe
    pub fn play(&self, target: Option<&TargetRef>, recipe: &Recipe) -> Completion {
        self.animate_to(target, &recipe.properties, recipe.spring)
    }

    /// Run `sequence` step by step
    ///
    /// Step `i + 1` starts only after step `i` completed and its own delay
    /// elapsed. Under reduced motion every step's end values are committed
    /// in list order and the completion is already resolved. If reduced
    /// motion switches on mid-flight, the steps after the running one are
    /// committed the same way, without their delays. Independent
    /// sequences on the same target may interleave their writes.
    pub fn sequence(&self, sequence: AnimationSequence) -> Completion {
        if self.reduced_motion() {
            snap_steps(sequence);
            return Completion::resolved();
        }

        let (completer, completion) = Completion::pending();
        let driver = self.clone();

        self.runtime.spawn(async move {
            let total = sequence.len();
            let mut steps = sequence.into_iter().enumerate();

            while let Some((index, step)) = steps.next() {
                // Reduced motion can switch on while earlier steps run.
                if driver.reduced_motion() {
                    tracing::debug!(index, total, "reduced motion, committing remaining steps");
                    snap_steps(std::iter::once(step).chain(steps.by_ref().map(|(_, s)| s)));
                    break;
                }

                if step.delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(step.delay_ms.into())).await;
                }

                tracing::debug!(index, total, spring = %step.spring, "sequence step");

                let done = driver.animate_to(step.target.as_ref(), &step.properties, step.spring);
                if let Err(err) = done.await {
                    tracing::debug!(index, %err, "sequence abandoned");
                    return;
                }
            }
            completer.resolve();
        });

        completion
    }

    /// Attach one shared timing to every target with staggered delays
    ///
    /// Target `i` receives delay `i * per_element_delay_ms`; under reduced
    /// motion both duration and delays are zero.
    pub fn stagger_group(
        &self,
        targets: &[TargetRef],
        spring: SpringPreset,
        per_element_delay_ms: u32,
    ) -> StaggerPlan {
        let plan = self.plan_stagger(targets.len(), spring, per_element_delay_ms);
        for (target, delay) in targets.iter().zip(&plan.delays) {
            target.set_timing(&plan.timing, *delay);
        }
        plan
    }

    /// Stagger group that also commits `properties` to every target
    ///
    /// All targets start concurrently; the presentation layer holds each
    /// transition back by its delay. Member `i` completes after its delay
    /// plus the shared duration. The completions are independent and need
    /// not be joined.
    pub fn stagger_to(
        &self,
        targets: &[TargetRef],
        properties: &PropertyMap,
        spring: SpringPreset,
        per_element_delay_ms: u32,
    ) -> Vec<Completion> {
        let plan = self.plan_stagger(targets.len(), spring, per_element_delay_ms);
        let reduced = self.reduced_motion();

        targets
            .iter()
            .zip(&plan.delays)
            .map(|(target, &delay)| {
                let permit = if reduced {
                    None
                } else {
                    self.admission.try_admit()
                };
                match permit {
                    Some(permit) => self.launch(target, properties, plan.timing, delay, permit),
                    None => {
                        snap(target, properties, plan.timing);
                        Completion::resolved()
                    }
                }
            })
            .collect()
    }

    fn plan_stagger(&self, count: usize, spring: SpringPreset, delay_ms: u32) -> StaggerPlan {
        if self.reduced_motion() {
            StaggerPlan::new(self.timing_for(spring), count, 0)
        } else {
            StaggerPlan::new(spring.timing(), count, delay_ms)
        }
    }

    fn launch(
        &self,
        target: &TargetRef,
        properties: &PropertyMap,
        timing: SpringTiming,
        delay_ms: u32,
        permit: AdmissionPermit,
    ) -> Completion {
        target.set_timing(&timing, delay_ms);
        target.begin_transition();
        target.apply_properties(properties);

        tracing::debug!(
            duration_ms = timing.duration_ms,
            delay_ms,
            easing = %timing.easing,
            "spring transition started"
        );

        let (completer, completion) = Completion::pending();
        let target = Arc::clone(target);
        let settle = Duration::from_millis(u64::from(delay_ms) + u64::from(timing.duration_ms));

        self.runtime.spawn(async move {
            tokio::time::sleep(settle).await;
            target.end_transition();
            drop(permit);
            completer.resolve();
        });

        completion
    }
}

/// Commit every step's end values in order, skipping delays
fn snap_steps(steps: impl IntoIterator<Item = AnimationStep>) {
    for step in steps {
        if let Some(target) = &step.target {
            snap(target, &step.properties, step.spring.timing());
        }
    }
}

/// Commit end values with zero-duration timing
fn snap(target: &TargetRef, properties: &PropertyMap, timing: SpringTiming) {
    target.set_timing(&SpringTiming::instant(timing.easing), 0);
    target.apply_properties(properties);
}
