//! Sprung CLI
//!
//! Tuning aid for spring motion:
//! - `presets` compares every named preset
//! - `inspect` derives ratio, regime, duration and easing for one spring
//! - `keyframes` samples a spring curve next to its display easing
//! - `config` prints the effective motion config and admission state

mod report;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use report::{ConfigReport, KeyframeReport, SpringReport};
use sprung_animation::{
    AdmissionController, MotionConfig, ReducedMotion, SpringConfig, SpringPreset,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Inspect spring presets, timings, and keyframe curves
#[derive(Parser, Debug)]
#[command(name = "sprung", version)]
struct Cli {
    /// Motion config file (sprung.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare every named preset
    Presets,
    /// Show derived characteristics of one spring
    Inspect(SpringArgs),
    /// Sample a spring curve next to its display easing
    Keyframes(KeyframeArgs),
    /// Print the effective motion config and admission state
    Config,
}

/// Spring selection: a preset name or literal parameters
#[derive(Args, Debug)]
struct SpringArgs {
    /// Preset name (defaults to the config's default preset)
    #[arg(long, conflicts_with_all = ["tension", "friction", "mass"])]
    preset: Option<String>,

    /// Spring stiffness
    #[arg(long, requires = "friction")]
    tension: Option<f64>,

    /// Damping coefficient
    #[arg(long, requires = "tension")]
    friction: Option<f64>,

    /// Mass (default 1.0)
    #[arg(long, requires = "tension")]
    mass: Option<f64>,

    /// Initial velocity, in normalized units per second
    #[arg(long)]
    velocity: Option<f64>,
}

#[derive(Args, Debug)]
struct KeyframeArgs {
    #[command(flatten)]
    spring: SpringArgs,

    /// Start value
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    from: f64,

    /// End value
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    to: f64,

    /// Sample count (defaults to the config's keyframe_steps)
    #[arg(long)]
    steps: Option<usize>,
}

impl SpringArgs {
    /// Resolve to a preset plus the name shown in reports
    fn resolve(&self, config: &MotionConfig) -> Result<(String, SpringPreset)> {
        let (name, preset) = match (self.tension, self.friction) {
            (Some(tension), Some(friction)) => {
                let spring = SpringConfig::new(
                    tension,
                    friction,
                    self.mass.unwrap_or(1.0),
                    self.velocity.unwrap_or(0.0),
                )
                .context("invalid spring parameters")?;
                return Ok(("custom".to_string(), SpringPreset::Custom(spring)));
            }
            _ => match &self.preset {
                Some(name) => {
                    let preset: SpringPreset = name.parse()?;
                    (preset.name().to_string(), preset)
                }
                None => {
                    let preset = config.default_spring()?;
                    (preset.name().to_string(), preset)
                }
            },
        };

        match self.velocity {
            Some(velocity) => {
                let spring = preset
                    .config()
                    .with_initial_velocity(velocity)
                    .context("invalid initial velocity")?;
                Ok((name, SpringPreset::Custom(spring)))
            }
            None => Ok((name, preset)),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    debug!(?config, "motion config");

    match cli.command {
        Command::Presets => cmd_presets(&config, cli.json),
        Command::Inspect(args) => cmd_inspect(&args, &config, cli.json),
        Command::Keyframes(args) => cmd_keyframes(&args, &config, cli.json),
        Command::Config => cmd_config(&config, cli.json),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<MotionConfig> {
    match path {
        Some(path) => {
            info!("Loading motion config from {}", path.display());
            MotionConfig::load(path)
                .with_context(|| format!("load motion config '{}'", path.display()))
        }
        None => Ok(MotionConfig::default()),
    }
}

fn cmd_presets(config: &MotionConfig, json: bool) -> Result<()> {
    if json {
        let reports: Vec<_> = SpringPreset::NAMED
            .into_iter()
            .map(|preset| SpringReport::new(preset.name(), preset))
            .collect();
        print_json(&reports)
    } else {
        print!("{}", report::preset_table(config.default_spring()?));
        Ok(())
    }
}

fn cmd_inspect(args: &SpringArgs, config: &MotionConfig, json: bool) -> Result<()> {
    let (name, preset) = args.resolve(config)?;
    let report = SpringReport::new(name, preset);
    if json {
        print_json(&report)
    } else {
        print!("{}", report.describe());
        Ok(())
    }
}

fn cmd_keyframes(args: &KeyframeArgs, config: &MotionConfig, json: bool) -> Result<()> {
    let (name, preset) = args.spring.resolve(config)?;
    let steps = args.steps.unwrap_or(config.keyframe_steps);
    debug!(spring = %name, from = args.from, to = args.to, steps, "sampling keyframes");

    let report = KeyframeReport::new(name, &preset.model(), args.from, args.to, steps);
    if json {
        print_json(&report)
    } else {
        print!("{}", report.table());
        Ok(())
    }
}

/// Controller for `config`, with the environment able to force reduced motion
fn admission_for(config: &MotionConfig) -> AdmissionController {
    let controller = AdmissionController::from_config(config);
    if ReducedMotion::from_env().is_active() {
        debug!("reduced motion requested by the environment");
        controller.reduced_motion().set(true);
    }
    controller
}

fn cmd_config(config: &MotionConfig, json: bool) -> Result<()> {
    let report = ConfigReport {
        config,
        admission: admission_for(config).stats(),
    };
    if json {
        print_json(&report)
    } else {
        print!("{}", config.to_toml().context("serialize motion config")?);
        let stats = report.admission;
        println!(
            "# admission: {}/{} active, reduced motion {}, can animate {}",
            stats.active, stats.max_concurrent, stats.reduced_motion, stats.can_animate
        );
        Ok(())
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize JSON output")?;
    println!("{text}");
    Ok(())
}
