//! Sprung Animation Engine
//!
//! Spring physics, admission control, and animation orchestration.
//!
//! # Features
//!
//! - **Spring Physics**: closed-form damped oscillator deriving settle
//!   duration, display easing, and sampled keyframes
//! - **Presets**: a closed registry of named springs plus inline configs
//! - **Admission Control**: soft cap on concurrent animations and the
//!   reduced-motion accessibility signal
//! - **Orchestration**: single animations, ordered sequences, and
//!   staggered groups, observed through resolve-once completions
//!
//! # Example
//!
//! ```rust
//! use sprung_animation::{SpringModel, SpringPreset, DampingRegime, EasingCurve};
//!
//! let model = SpringPreset::Smooth.model();
//! assert_eq!(model.regime(), DampingRegime::Underdamped);
//! assert_eq!(model.timing().easing, EasingCurve::Smooth);
//!
//! let frames = model.generate_keyframes(0.0, 100.0, 10);
//! assert_eq!(frames.len(), 11);
//!
//! assert!(SpringModel::from_parameters(0.0, 30.0, 1.0, 0.0).is_err());
//! ```

pub mod admission;
pub mod completion;
pub mod config;
pub mod driver;
pub mod easing;
pub mod error;
pub mod keyframe;
pub mod presets;
pub mod property;
pub mod recipes;
pub mod spring;
pub mod target;

pub use admission::{AdmissionController, AdmissionPermit, AdmissionStats, ReducedMotion};
pub use completion::Completion;
pub use config::{MotionConfig, MotionConfigError};
pub use driver::{AnimationDriver, AnimationSequence, AnimationStep, StaggerPlan};
pub use easing::EasingCurve;
pub use error::{AnimationError, ConfigError};
pub use keyframe::{SpringKeyframe, SpringKeyframes};
pub use presets::SpringPreset;
pub use property::{AnimatableProperty, Axis, Length, PropertyMap, PropertyValue, Rgba};
pub use recipes::Recipe;
pub use spring::{DampingRegime, SpringConfig, SpringModel, SpringTiming, SETTLE_PERIODS};
pub use target::{AnimationTarget, TargetRef};
