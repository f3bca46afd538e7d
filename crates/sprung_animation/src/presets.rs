//! Spring presets
//!
//! A closed registry of named spring configurations. Callers that need
//! something else pass [`SpringPreset::Custom`] with an inline config.

use crate::error::AnimationError;
use crate::spring::{SpringConfig, SpringModel, SpringTiming};
use std::str::FromStr;

const SMOOTH: SpringConfig = SpringConfig::from_preset(300.0, 30.0, 1.0);
const GENTLE: SpringConfig = SpringConfig::from_preset(200.0, 25.0, 1.0);
const SNAPPY: SpringConfig = SpringConfig::from_preset(400.0, 35.0, 0.8);
const BOUNCY: SpringConfig = SpringConfig::from_preset(250.0, 20.0, 1.0);
const QUICK: SpringConfig = SpringConfig::from_preset(500.0, 40.0, 0.6);
const DELIBERATE: SpringConfig = SpringConfig::from_preset(150.0, 28.0, 1.2);

/// Named spring configuration, or an inline one
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SpringPreset {
    /// General purpose, softly damped
    #[default]
    Smooth,
    /// Slower entrance motion
    Gentle,
    /// Fast response for presses and hovers
    Snappy,
    /// Visible overshoot for playful feedback
    Bouncy,
    /// Settles fast, for loading states and exits
    Quick,
    /// Slow and heavy, for important state changes
    Deliberate,
    /// Caller-supplied configuration
    Custom(SpringConfig),
}

impl SpringPreset {
    /// Every named preset, in registry order
    pub const NAMED: [SpringPreset; 6] = [
        SpringPreset::Smooth,
        SpringPreset::Gentle,
        SpringPreset::Snappy,
        SpringPreset::Bouncy,
        SpringPreset::Quick,
        SpringPreset::Deliberate,
    ];

    /// Registry name (`"custom"` for inline configs)
    pub fn name(&self) -> &'static str {
        match self {
            SpringPreset::Smooth => "smooth",
            SpringPreset::Gentle => "gentle",
            SpringPreset::Snappy => "snappy",
            SpringPreset::Bouncy => "bouncy",
            SpringPreset::Quick => "quick",
            SpringPreset::Deliberate => "deliberate",
            SpringPreset::Custom(_) => "custom",
        }
    }

    pub fn config(&self) -> SpringConfig {
        match self {
            SpringPreset::Smooth => SMOOTH,
            SpringPreset::Gentle => GENTLE,
            SpringPreset::Snappy => SNAPPY,
            SpringPreset::Bouncy => BOUNCY,
            SpringPreset::Quick => QUICK,
            SpringPreset::Deliberate => DELIBERATE,
            SpringPreset::Custom(config) => *config,
        }
    }

    pub fn model(&self) -> SpringModel {
        SpringModel::new(self.config())
    }

    /// Shorthand for `self.model().timing()`
    pub fn timing(&self) -> SpringTiming {
        self.model().timing()
    }
}

impl FromStr for SpringPreset {
    type Err = AnimationError;

    /// Parse a registry name. Unknown names are an error rather than a
    /// silent fallback to `smooth`.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        SpringPreset::NAMED
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| AnimationError::UnknownPreset(name.to_string()))
    }
}

impl From<SpringConfig> for SpringPreset {
    fn from(config: SpringConfig) -> Self {
        SpringPreset::Custom(config)
    }
}

impl std::fmt::Display for SpringPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::EasingCurve;
    use crate::spring::DampingRegime;

    #[test]
    fn test_registry_values() {
        let expected = [
            ("smooth", 300.0, 30.0, 1.0),
            ("gentle", 200.0, 25.0, 1.0),
            ("snappy", 400.0, 35.0, 0.8),
            ("bouncy", 250.0, 20.0, 1.0),
            ("quick", 500.0, 40.0, 0.6),
            ("deliberate", 150.0, 28.0, 1.2),
        ];

        for (preset, (name, tension, friction, mass)) in SpringPreset::NAMED.iter().zip(expected) {
            let config = preset.config();
            assert_eq!(preset.name(), name);
            assert_eq!(config.tension(), tension);
            assert_eq!(config.friction(), friction);
            assert_eq!(config.mass(), mass);
            assert_eq!(config.initial_velocity(), 0.0);
        }
    }

    #[test]
    fn test_registry_configs_are_valid() {
        for preset in SpringPreset::NAMED {
            let config = preset.config();
            assert!(SpringConfig::new(
                config.tension(),
                config.friction(),
                config.mass(),
                config.initial_velocity()
            )
            .is_ok());
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("bouncy".parse::<SpringPreset>(), Ok(SpringPreset::Bouncy));
        assert_eq!(" Quick ".parse::<SpringPreset>(), Ok(SpringPreset::Quick));
        assert_eq!(
            "bounce".parse::<SpringPreset>(),
            Err(AnimationError::UnknownPreset("bounce".to_string()))
        );
        assert!("custom".parse::<SpringPreset>().is_err());
    }

    #[test]
    fn test_preset_characteristics() {
        assert_eq!(SpringPreset::Smooth.timing().easing, EasingCurve::Smooth);
        assert_eq!(SpringPreset::Bouncy.timing().easing, EasingCurve::Bouncy);
        assert_eq!(SpringPreset::Snappy.timing().easing, EasingCurve::QuickSettle);
        assert_eq!(SpringPreset::Quick.model().regime(), DampingRegime::Overdamped);
        assert_eq!(SpringPreset::Deliberate.model().regime(), DampingRegime::Overdamped);
    }

    #[test]
    fn test_custom_passthrough() {
        let config = SpringConfig::new(120.0, 12.0, 2.0, 0.5).unwrap();
        let preset = SpringPreset::from(config);
        assert_eq!(preset.config(), config);
        assert_eq!(preset.name(), "custom");
        assert_eq!(SpringPreset::default(), SpringPreset::Smooth);
    }
}
