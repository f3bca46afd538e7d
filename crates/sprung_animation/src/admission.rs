//! Admission control
//!
//! Soft cap on concurrently running spring animations, plus the
//! reduced-motion accessibility signal. The controller is advisory: it
//! answers `can_animate` and keeps count, it never blocks or cancels.

use crate::config::MotionConfig;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Default cap on concurrent animations
pub const DEFAULT_MAX_CONCURRENT: usize = 20;

/// Environment variable read by [`ReducedMotion::from_env`]
pub const REDUCED_MOTION_ENV: &str = "SPRUNG_REDUCED_MOTION";

/// Shared reduced-motion flag
///
/// Clones observe the same flag, so the environment collaborator can flip it
/// while animations are being scheduled.
#[derive(Clone, Debug, Default)]
pub struct ReducedMotion(Arc<AtomicBool>);

impl ReducedMotion {
    pub fn new(active: bool) -> Self {
        Self(Arc::new(AtomicBool::new(active)))
    }

    /// Read the flag from `SPRUNG_REDUCED_MOTION` (`1`, `true`, `yes`, `reduce`)
    pub fn from_env() -> Self {
        let value = std::env::var(REDUCED_MOTION_ENV).ok();
        Self::new(requests_reduced_motion(value.as_deref()))
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn set(&self, active: bool) {
        self.0.store(active, Ordering::Release);
    }
}

fn requests_reduced_motion(value: Option<&str>) -> bool {
    value.is_some_and(|value| {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "reduce"
        )
    })
}

/// Snapshot of admission state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AdmissionStats {
    pub active: usize,
    pub max_concurrent: usize,
    pub can_animate: bool,
    pub reduced_motion: bool,
}

/// Counter of active animations with a soft concurrency cap
#[derive(Debug)]
pub struct AdmissionController {
    active: AtomicUsize,
    max_concurrent: usize,
    reduced_motion: ReducedMotion,
}

impl AdmissionController {
    /// Create a controller; a `max_concurrent` of zero is raised to one
    pub fn new(max_concurrent: usize, reduced_motion: ReducedMotion) -> Self {
        Self {
            active: AtomicUsize::new(0),
            max_concurrent: max_concurrent.max(1),
            reduced_motion,
        }
    }

    pub fn from_config(config: &MotionConfig) -> Self {
        Self::new(
            config.max_concurrent,
            ReducedMotion::new(config.reduced_motion),
        )
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    pub fn active_count(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    pub fn reduced_motion(&self) -> &ReducedMotion {
        &self.reduced_motion
    }

    /// False when the cap is reached or reduced motion is active
    pub fn can_animate(&self) -> bool {
        self.active_count() < self.max_concurrent && !self.reduced_motion.is_active()
    }

    pub fn start_animation(&self) {
        self.active.fetch_add(1, Ordering::AcqRel);
    }

    /// Decrement, floored at zero. An unmatched release is tolerated, not reported.
    pub fn end_animation(&self) {
        let _ = self
            .active
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                Some(n.saturating_sub(1))
            });
    }

    /// Check and count in one step
    ///
    /// The returned permit calls [`end_animation`](Self::end_animation) when
    /// dropped.
    pub fn try_admit(self: &Arc<Self>) -> Option<AdmissionPermit> {
        if self.reduced_motion.is_active() {
            return None;
        }
        self.active
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.max_concurrent).then_some(n + 1)
            })
            .ok()?;
        Some(AdmissionPermit {
            controller: Arc::clone(self),
        })
    }

    pub fn stats(&self) -> AdmissionStats {
        AdmissionStats {
            active: self.active_count(),
            max_concurrent: self.max_concurrent,
            can_animate: self.can_animate(),
            reduced_motion: self.reduced_motion.is_active(),
        }
    }
}

impl Default for AdmissionController {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONCURRENT, ReducedMotion::default())
    }
}

/// One counted animation slot, released on drop
#[derive(Debug)]
#[must_use = "dropping the permit releases the slot immediately"]
pub struct AdmissionPermit {
    controller: Arc<AdmissionController>,
}

impl Drop for AdmissionPermit {
    fn drop(&mut self) {
        self.controller.end_animation();
    }
}
