//! Presentation-layer seam
//!
//! The driver never interpolates visuals itself. It hands timing and end
//! values to an [`AnimationTarget`], which performs the actual transition.

use crate::property::PropertyMap;
use crate::spring::SpringTiming;
use std::sync::Arc;

/// Something the driver can animate
///
/// Implementations use interior mutability; the driver calls these from
/// spawned tasks.
pub trait AnimationTarget: Send + Sync {
    /// Attach timing metadata for the next transition
    fn set_timing(&self, timing: &SpringTiming, delay_ms: u32);

    /// Commit property end values
    fn apply_properties(&self, properties: &PropertyMap);

    /// A spring transition is about to run
    fn begin_transition(&self) {}

    /// The transition started by the last `begin_transition` has settled
    fn end_transition(&self) {}
}

/// Shared handle to a target
pub type TargetRef = Arc<dyn AnimationTarget>;
