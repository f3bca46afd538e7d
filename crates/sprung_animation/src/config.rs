//! Motion configuration (`sprung.toml`)
//!
//! ```toml
//! max_concurrent = 20
//! reduced_motion = false
//! keyframe_steps = 10
//! default_preset = "smooth"
//! ```

use crate::admission::DEFAULT_MAX_CONCURRENT;
use crate::presets::SpringPreset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading a motion config
#[derive(Error, Debug)]
pub enum MotionConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse motion config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid motion config: {0}")]
    Invalid(String),
}

/// Tunables for admission and keyframe sampling
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Soft cap on concurrent spring animations
    pub max_concurrent: usize,
    /// Start with reduced motion active
    pub reduced_motion: bool,
    /// Samples per keyframe curve
    pub keyframe_steps: usize,
    /// Registry name of the preset used when callers do not pick one
    pub default_preset: String,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            reduced_motion: false,
            keyframe_steps: 10,
            default_preset: SpringPreset::Smooth.name().to_string(),
        }
    }
}

impl MotionConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, MotionConfigError> {
        let config: MotionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, MotionConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| MotionConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolved default preset
    pub fn default_spring(&self) -> Result<SpringPreset, MotionConfigError> {
        self.default_preset
            .parse()
            .map_err(|err: crate::AnimationError| MotionConfigError::Invalid(err.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    fn validate(&self) -> Result<(), MotionConfigError> {
        if self.max_concurrent == 0 {
            return Err(MotionConfigError::Invalid(
                "max_concurrent must be at least 1".to_string(),
            ));
        }
        if self.keyframe_steps == 0 {
            return Err(MotionConfigError::Invalid(
                "keyframe_steps must be at least 1".to_string(),
            ));
        }
        self.default_spring()?;
        Ok(())
    }
}
