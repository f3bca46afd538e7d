//! Spring physics
//!
//! Closed-form damped harmonic oscillator used to derive motion timing from
//! tension, friction and mass. Nothing here integrates over frames: every
//! quantity is a pure function of a [`SpringConfig`], so a model can be
//! rebuilt or re-queried at any time with identical results.

use crate::easing::EasingCurve;
use crate::error::ConfigError;
use crate::keyframe::{SpringKeyframe, SpringKeyframes};
use serde::{Deserialize, Serialize};

/// Number of characteristic periods after which a spring is treated as
/// visually settled.
///
/// This is a tuning constant for perceived motion, not an exact rest
/// criterion: underdamped springs still carry a small residual oscillation
/// once this many periods have elapsed.
///
/// Underdamped springs count periods of the damped frequency, which goes to
/// zero as the damping ratio approaches 1. A custom spring just below
/// critical damping therefore gets a far longer estimate than one just
/// above it (friction 19.99999 at tension 100 estimates 400 s, friction
/// 20.000001 estimates 400 ms), and holds its admission permit that long.
pub const SETTLE_PERIODS: f64 = 4.0;

/// Progress samples used by [`SpringModel::easing_error`]
const EASING_ERROR_SAMPLES: usize = 100;

/// Damping ratios within this distance of 1.0 are classified as critical.
const CRITICAL_TOLERANCE: f64 = 1e-9;

/// Validated spring parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpringConfig", into = "RawSpringConfig")]
pub struct SpringConfig {
    tension: f64,
    friction: f64,
    mass: f64,
    initial_velocity: f64,
}

impl SpringConfig {
    /// Create a spring configuration
    ///
    /// Rejects non-positive tension or mass, negative friction and any
    /// non-finite parameter.
    pub fn new(
        tension: f64,
        friction: f64,
        mass: f64,
        initial_velocity: f64,
    ) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("tension", tension),
            ("friction", friction),
            ("mass", mass),
            ("initial_velocity", initial_velocity),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite(name));
            }
        }
        if tension <= 0.0 {
            return Err(ConfigError::NonPositiveTension(tension));
        }
        if mass <= 0.0 {
            return Err(ConfigError::NonPositiveMass(mass));
        }
        if friction < 0.0 {
            return Err(ConfigError::NegativeFriction(friction));
        }

        Ok(Self {
            tension,
            friction,
            mass,
            initial_velocity,
        })
    }

    /// Registry constants only; callers go through [`SpringConfig::new`].
    pub(crate) const fn from_preset(tension: f64, friction: f64, mass: f64) -> Self {
        Self {
            tension,
            friction,
            mass,
            initial_velocity: 0.0,
        }
    }

    pub fn tension(&self) -> f64 {
        self.tension
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Initial velocity toward the target, in normalized displacement per second
    pub fn initial_velocity(&self) -> f64 {
        self.initial_velocity
    }

    /// Copy of this config with a different initial velocity
    pub fn with_initial_velocity(self, initial_velocity: f64) -> Result<Self, ConfigError> {
        Self::new(self.tension, self.friction, self.mass, initial_velocity)
    }
}

/// Serialized form, validated on the way in
#[derive(Serialize, Deserialize)]
struct RawSpringConfig {
    tension: f64,
    friction: f64,
    mass: f64,
    #[serde(default, alias = "velocity")]
    initial_velocity: f64,
}

impl TryFrom<RawSpringConfig> for SpringConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSpringConfig) -> Result<Self, Self::Error> {
        SpringConfig::new(raw.tension, raw.friction, raw.mass, raw.initial_velocity)
    }
}

impl From<SpringConfig> for RawSpringConfig {
    fn from(config: SpringConfig) -> Self {
        Self {
            tension: config.tension,
            friction: config.friction,
            mass: config.mass,
            initial_velocity: config.initial_velocity,
        }
    }
}

/// Motion regime of a spring
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DampingRegime {
    /// Oscillates around the target while settling
    Underdamped,
    /// Fastest settle without oscillation
    CriticallyDamped,
    /// Slow settle without oscillation
    Overdamped,
}

impl DampingRegime {
    pub fn label(&self) -> &'static str {
        match self {
            DampingRegime::Underdamped => "underdamped",
            DampingRegime::CriticallyDamped => "critically-damped",
            DampingRegime::Overdamped => "overdamped",
        }
    }
}

impl std::fmt::Display for DampingRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Timing handed to the presentation layer
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SpringTiming {
    /// Settle duration in milliseconds
    pub duration_ms: u32,
    /// Display curve approximating the spring
    pub easing: EasingCurve,
}

impl SpringTiming {
    /// Zero-duration timing, used when motion is skipped
    pub fn instant(easing: EasingCurve) -> Self {
        Self {
            duration_ms: 0,
            easing,
        }
    }
}

/// Computational model of a single spring
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringModel {
    config: SpringConfig,
}

impl SpringModel {
    pub fn new(config: SpringConfig) -> Self {
        Self { config }
    }

    /// Validate raw parameters and build a model in one step
    pub fn from_parameters(
        tension: f64,
        friction: f64,
        mass: f64,
        initial_velocity: f64,
    ) -> Result<Self, ConfigError> {
        SpringConfig::new(tension, friction, mass, initial_velocity).map(Self::new)
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// `friction / (2 * sqrt(tension * mass))`
    pub fn damping_ratio(&self) -> f64 {
        self.config.friction / (2.0 * (self.config.tension * self.config.mass).sqrt())
    }

    /// `sqrt(tension / mass)`, in radians per second
    pub fn natural_frequency(&self) -> f64 {
        (self.config.tension / self.config.mass).sqrt()
    }

    pub fn regime(&self) -> DampingRegime {
        let ratio = self.damping_ratio();
        if (ratio - 1.0).abs() <= CRITICAL_TOLERANCE {
            DampingRegime::CriticallyDamped
        } else if ratio < 1.0 {
            DampingRegime::Underdamped
        } else {
            DampingRegime::Overdamped
        }
    }

    /// Oscillation frequency of an underdamped spring, `None` otherwise
    pub fn damped_frequency(&self) -> Option<f64> {
        match self.regime() {
            DampingRegime::Underdamped => {
                let ratio = self.damping_ratio();
                Some(self.natural_frequency() * (1.0 - ratio * ratio).sqrt())
            }
            _ => None,
        }
    }

    /// Estimated settle duration in (fractional) milliseconds
    ///
    /// Discontinuous at critical damping; see [`SETTLE_PERIODS`].
    pub fn estimate_duration_ms(&self) -> f64 {
        let frequency = self
            .damped_frequency()
            .unwrap_or_else(|| self.natural_frequency());
        SETTLE_PERIODS / frequency * 1000.0
    }

    /// Bucket the damping ratio into one of the display curves
    pub fn easing_curve(&self) -> EasingCurve {
        EasingCurve::for_damping_ratio(self.damping_ratio())
    }

    /// Duration rounded to whole milliseconds plus the display curve
    pub fn timing(&self) -> SpringTiming {
        let duration = self.estimate_duration_ms().round();
        SpringTiming {
            duration_ms: duration.clamp(0.0, u32::MAX as f64) as u32,
            easing: self.easing_curve(),
        }
    }

    /// Normalized displacement from the target at `t` seconds
    ///
    /// Starts at 1.0 (full displacement) and decays toward 0.0.
    pub fn displacement_at(&self, t: f64) -> f64 {
        let ratio = self.damping_ratio();
        let omega = self.natural_frequency();
        let v0 = self.config.initial_velocity;

        match self.regime() {
            DampingRegime::Underdamped => {
                let omega_d = omega * (1.0 - ratio * ratio).sqrt();
                let envelope = (-ratio * omega * t).exp();
                let oscillation =
                    (omega_d * t).cos() + ((ratio * omega - v0) / omega_d) * (omega_d * t).sin();
                envelope * oscillation
            }
            DampingRegime::CriticallyDamped => (-omega * t).exp() * (1.0 + (omega - v0) * t),
            DampingRegime::Overdamped => {
                let root = (ratio * ratio - 1.0).sqrt();
                let r1 = -omega * (ratio + root);
                let r2 = -omega * (ratio - root);
                let c1 = (-v0 - r2) / (r1 - r2);
                let c2 = 1.0 - c1;
                c1 * (r1 * t).exp() + c2 * (r2 * t).exp()
            }
        }
    }

    /// Sample the spring from `from` to `to` over its estimated duration
    ///
    /// Produces `steps + 1` keyframes with offsets evenly spaced over
    /// `[0, 1]`. A `steps` of zero is treated as one.
    pub fn generate_keyframes(&self, from: f64, to: f64, steps: usize) -> SpringKeyframes {
        let steps = steps.max(1);
        let total_seconds = self.estimate_duration_ms() / 1000.0;

        let frames = (0..=steps)
            .map(|i| {
                let offset = i as f64 / steps as f64;
                let displacement = self.displacement_at(offset * total_seconds);
                SpringKeyframe {
                    offset,
                    value: from + (to - from) * (1.0 - displacement),
                }
            })
            .collect();

        tracing::trace!(
            steps,
            duration_ms = self.estimate_duration_ms(),
            "generated spring keyframes"
        );

        SpringKeyframes::new(frames)
    }

    /// Sample the display easing at the offsets of [`generate_keyframes`]
    ///
    /// [`generate_keyframes`]: SpringModel::generate_keyframes
    pub fn eased_keyframes(&self, from: f64, to: f64, steps: usize) -> SpringKeyframes {
        let steps = steps.max(1);
        let easing = self.easing_curve();

        let frames = (0..=steps)
            .map(|i| {
                let offset = i as f64 / steps as f64;
                SpringKeyframe {
                    offset,
                    value: from + (to - from) * easing.apply(offset),
                }
            })
            .collect();

        SpringKeyframes::new(frames)
    }

    /// Largest gap between the physical progress and the display easing,
    /// as a fraction of the travel
    pub fn easing_error(&self) -> f64 {
        let total_seconds = self.estimate_duration_ms() / 1000.0;
        let easing = self.easing_curve();

        (0..=EASING_ERROR_SAMPLES)
            .map(|i| {
                let progress = i as f64 / EASING_ERROR_SAMPLES as f64;
                let physical = 1.0 - self.displacement_at(progress * total_seconds);
                (physical - easing.apply(progress)).abs()
            })
            .fold(0.0, f64::max)
    }
}

impl From<SpringConfig> for SpringModel {
    fn from(config: SpringConfig) -> Self {
        Self::new(config)
    }
}
