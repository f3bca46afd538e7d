//! Animation error types

use thiserror::Error;

/// Rejected spring parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Tension must be strictly positive
    #[error("spring tension must be positive, got {0}")]
    NonPositiveTension(f64),

    /// Mass must be strictly positive
    #[error("spring mass must be positive, got {0}")]
    NonPositiveMass(f64),

    /// Friction may be zero but never negative
    #[error("spring friction must not be negative, got {0}")]
    NegativeFriction(f64),

    /// NaN or infinite parameter
    #[error("spring parameter `{0}` is not a finite number")]
    NonFinite(&'static str),
}

/// Errors surfaced by the animation layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Invalid spring configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Preset name not present in the registry
    #[error("unknown spring preset: {0}")]
    UnknownPreset(String),

    /// Property name outside the animatable set
    #[error("unknown animatable property: {0}")]
    UnknownProperty(String),

    /// Property value rejected at construction
    #[error("invalid value for `{property}`: {reason}")]
    InvalidProperty {
        property: &'static str,
        reason: String,
    },

    /// The task driving an animation went away before it finished
    #[error("animation was interrupted before completion")]
    Interrupted,
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
