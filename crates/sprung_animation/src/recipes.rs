//! Motion recipes
//!
//! End states and sequences for the common entry, exit and feedback motions
//! of the application shell. Each recipe is plain data; run it with
//! [`AnimationDriver::play`] or [`AnimationDriver::sequence`].
//!
//! [`AnimationDriver::play`]: crate::AnimationDriver::play
//! [`AnimationDriver::sequence`]: crate::AnimationDriver::sequence

use crate::driver::{AnimationSequence, AnimationStep};
use crate::error::Result;
use crate::presets::SpringPreset;
use crate::property::{Length, PropertyMap, PropertyValue};
use crate::target::TargetRef;

/// Delay between consecutive stages of [`staged`]
pub const STAGE_DELAY_MS: u32 = 200;

/// End values paired with the spring that drives them
#[derive(Clone, Debug, PartialEq)]
pub struct Recipe {
    pub properties: PropertyMap,
    pub spring: SpringPreset,
}

impl Recipe {
    pub fn new(properties: PropertyMap, spring: SpringPreset) -> Self {
        Self { properties, spring }
    }

    pub fn with_spring(mut self, spring: SpringPreset) -> Self {
        self.spring = spring;
        self
    }

    /// Convert into a sequence step on `target`
    pub fn step(&self, target: &TargetRef) -> AnimationStep {
        AnimationStep::on(target, self.properties.clone()).spring(self.spring)
    }
}

// ============================================================================
// Entry / exit
// ============================================================================

/// Fade and settle into place
pub fn enter() -> Recipe {
    Recipe::new(
        PropertyMap::from_trusted([
            PropertyValue::Opacity(1.0),
            PropertyValue::Translate { x: 0.0, y: 0.0 },
            PropertyValue::Scale(1.0),
        ]),
        SpringPreset::Smooth,
    )
}

/// Fade out while lifting and shrinking slightly
pub fn exit() -> Recipe {
    Recipe::new(
        PropertyMap::from_trusted([
            PropertyValue::Opacity(0.0),
            PropertyValue::Translate { x: 0.0, y: -20.0 },
            PropertyValue::Scale(0.95),
        ]),
        SpringPreset::Quick,
    )
}

/// Grow a progress bar to `percent` of its track
pub fn progress(percent: f32) -> Result<Recipe> {
    let properties = PropertyMap::builder()
        .width(Length::Percent(percent.clamp(0.0, 100.0)))
        .build()?;
    Ok(Recipe::new(properties, SpringPreset::Smooth))
}

// ============================================================================
// Feedback sequences
// ============================================================================

/// Press down quickly, then spring back with a bounce
pub fn press_feedback(target: &TargetRef) -> AnimationSequence {
    AnimationSequence::new()
        .then(scale_step(target, 0.96, SpringPreset::Quick))
        .then(scale_step(target, 1.0, SpringPreset::Bouncy))
}

/// Swell on a successful drop, then settle back after a short pause
pub fn drop_celebration(target: &TargetRef) -> AnimationSequence {
    AnimationSequence::new()
        .then(scale_step(target, 1.05, SpringPreset::Quick))
        .then(scale_step(target, 1.0, SpringPreset::Bouncy).delay(100))
}

/// Gentle entrance of the main drop zone after the window settles
pub fn welcome(target: &TargetRef) -> AnimationSequence {
    let properties =
        PropertyMap::from_trusted([PropertyValue::Scale(1.0), PropertyValue::Opacity(1.0)]);
    AnimationSequence::new().then(
        AnimationStep::on(target, properties)
            .spring(SpringPreset::Gentle)
            .delay(600),
    )
}

/// Chain stages with [`STAGE_DELAY_MS`] times the stage index before each
pub fn staged<I>(stages: I) -> AnimationSequence
where
    I: IntoIterator<Item = (TargetRef, PropertyMap, SpringPreset)>,
{
    stages
        .into_iter()
        .enumerate()
        .map(|(index, (target, properties, spring))| {
            AnimationStep::new(Some(target), properties)
                .spring(spring)
                .delay(STAGE_DELAY_MS.saturating_mul(index as u32))
        })
        .collect()
}

fn scale_step(target: &TargetRef, scale: f32, spring: SpringPreset) -> AnimationStep {
    AnimationStep::on(target, PropertyMap::from_trusted([PropertyValue::Scale(scale)]))
        .spring(spring)
}
