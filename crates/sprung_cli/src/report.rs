//! Spring inspection reports

use serde::Serialize;
use sprung_animation::{
    AdmissionStats, DampingRegime, EasingCurve, MotionConfig, SpringModel, SpringPreset,
};
use std::fmt::Write as _;

/// Derived characteristics of one spring
#[derive(Debug, Serialize)]
pub struct SpringReport {
    pub name: String,
    pub tension: f64,
    pub friction: f64,
    pub mass: f64,
    pub initial_velocity: f64,
    pub damping_ratio: f64,
    pub natural_frequency: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damped_frequency: Option<f64>,
    pub regime: DampingRegime,
    pub duration_ms: u32,
    pub easing: EasingCurve,
    pub css: String,
    /// Largest gap between the spring and its display easing, fraction of travel
    pub easing_error: f64,
}

impl SpringReport {
    pub fn new(name: impl Into<String>, preset: SpringPreset) -> Self {
        let model = preset.model();
        let config = model.config();
        let timing = model.timing();
        Self {
            name: name.into(),
            tension: config.tension(),
            friction: config.friction(),
            mass: config.mass(),
            initial_velocity: config.initial_velocity(),
            damping_ratio: model.damping_ratio(),
            natural_frequency: model.natural_frequency(),
            damped_frequency: model.damped_frequency(),
            regime: model.regime(),
            duration_ms: timing.duration_ms,
            easing: timing.easing,
            css: timing.easing.css(),
            easing_error: model.easing_error(),
        }
    }

    /// Multi-line description for `inspect`
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.name);
        let _ = writeln!(
            out,
            "  tension {}  friction {}  mass {}  velocity {}",
            self.tension, self.friction, self.mass, self.initial_velocity
        );
        let _ = writeln!(out, "  damping ratio      {:.3}", self.damping_ratio);
        let _ = writeln!(out, "  natural frequency  {:.3} rad/s", self.natural_frequency);
        if let Some(damped) = self.damped_frequency {
            let _ = writeln!(out, "  damped frequency   {damped:.3} rad/s");
        }
        let _ = writeln!(out, "  regime             {}", self.regime);
        let _ = writeln!(out, "  duration           {} ms", self.duration_ms);
        let _ = writeln!(out, "  easing             {} {}", self.easing, self.css);
        let _ = writeln!(
            out,
            "  easing error       {:.1}% of travel",
            self.easing_error * 100.0
        );
        out
    }
}

/// Comparison table of every named preset, marking `default`
pub fn preset_table(default: SpringPreset) -> String {
    let mut out = format!(
        "  {:<12} {:>8} {:>8} {:>5} {:>6} {:<18} {:>8}  {}\n",
        "preset", "tension", "friction", "mass", "ratio", "regime", "duration", "easing"
    );
    for preset in SpringPreset::NAMED {
        let report = SpringReport::new(preset.name(), preset);
        let marker = if preset == default { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {:<12} {:>8} {:>8} {:>5} {:>6.3} {:<18} {:>6}ms  {}",
            report.name,
            report.tension,
            report.friction,
            report.mass,
            report.damping_ratio,
            report.regime.label(),
            report.duration_ms,
            report.easing,
        );
    }
    out
}

/// One physical sample next to the display easing at the same offset
#[derive(Debug, Serialize)]
pub struct KeyframeRow {
    pub offset: f64,
    pub value: f64,
    pub eased: f64,
}

/// Sampled spring curve compared with its display easing
#[derive(Debug, Serialize)]
pub struct KeyframeReport {
    pub spring: String,
    pub easing: EasingCurve,
    pub easing_error: f64,
    pub frames: Vec<KeyframeRow>,
}

impl KeyframeReport {
    pub fn new(
        name: impl Into<String>,
        model: &SpringModel,
        from: f64,
        to: f64,
        steps: usize,
    ) -> Self {
        let physical = model.generate_keyframes(from, to, steps);
        let eased = model.eased_keyframes(from, to, steps);
        let frames = physical
            .iter()
            .zip(&eased)
            .map(|(frame, display)| KeyframeRow {
                offset: frame.offset,
                value: frame.value,
                eased: display.value,
            })
            .collect();
        Self {
            spring: name.into(),
            easing: model.easing_curve(),
            easing_error: model.easing_error(),
            frames,
        }
    }

    /// Three-column table: offset, physical value, eased value
    pub fn table(&self) -> String {
        let mut out = format!("{:>8} {:>12} {:>12}\n", "offset", "value", self.easing.label());
        for row in &self.frames {
            let _ = writeln!(
                out,
                "{:>8.3} {:>12.4} {:>12.4}",
                row.offset, row.value, row.eased
            );
        }
        let _ = writeln!(
            out,
            "{} easing strays up to {:.1}% of travel from the spring",
            self.easing,
            self.easing_error * 100.0
        );
        out
    }
}

/// Effective motion config and the admission controller it produces
#[derive(Debug, Serialize)]
pub struct ConfigReport<'a> {
    pub config: &'a MotionConfig,
    pub admission: AdmissionStats,
}
