use std::env;
use std::fmt;
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::objects::ObjectKind;

/// Overshoot of `|sin(theta_t)|` above 1 still treated as grazing refraction.
pub const SIN_CLAMP_TOLERANCE: f32 = 1e-6;
/// Incidence angle change per stepper click, in degrees.
pub const ANGLE_STEP: f32 = 1.0;
pub const MIN_ANGLE: f32 = 0.0;
/// Largest incidence angle the stepper reaches. 90 degrees is grazing incidence.
pub const MAX_ANGLE: f32 = 89.0;
/// Lens diameter change per stepper click, in pixels.
pub const LENS_DIAMETER_STEP: f32 = 10.0;
pub const LENS_DIAMETER_MIN: f32 = 60.0;
pub const LENS_DIAMETER_MAX: f32 = 300.0;
/// Drawn length of the incident and reflected rays, in pixels.
pub const INCIDENT_RAY_LENGTH: f32 = 250.0;
/// Drawn length of the refracted ray, in pixels.
pub const REFRACTED_RAY_LENGTH: f32 = 350.0;
/// Horizontal distance from the lens to the object, in pixels.
pub const OBJECT_DISTANCE: f32 = 300.0;
/// Name of the environment variable pointing at the project root.
pub const ROOT_DIR_VAR: &str = "LENSA_ROOT_DIR";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(validate_config(&Settings::default()).is_ok());
    }

    #[test]
    fn rejects_bad_sweep() {
        let settings = Settings {
            sweep_start: 50.0,
            sweep_end: 40.0,
            ..Settings::default()
        };
        assert!(validate_config(&settings).is_err());

        let settings = Settings {
            sweep_end: 90.0,
            ..Settings::default()
        };
        assert!(validate_config(&settings).is_err());

        let settings = Settings {
            sweep_steps: 1,
            ..Settings::default()
        };
        assert!(validate_config(&settings).is_err());
    }

    #[test]
    fn sweep_check_is_shared() {
        assert!(validate_sweep(0.0, 89.0, 90).is_ok());
        assert!(validate_sweep(-1.0, 45.0, 10).is_err());
        assert!(validate_sweep(45.0, 45.0, 10).is_err());
        assert!(validate_sweep(0.0, 45.0, 1).is_err());

        let settings = Settings {
            sweep_start: 50.0,
            sweep_end: 40.0,
            ..Settings::default()
        };
        assert_eq!(
            validate_config(&settings).unwrap_err().to_string(),
            validate_sweep(50.0, 40.0, settings.sweep_steps)
                .unwrap_err()
                .to_string()
        );
    }

    #[test]
    fn rejects_bad_media() {
        let settings = Settings {
            n1: 0.0,
            ..Settings::default()
        };
        assert!(validate_config(&settings).is_err());

        // a non-positive n2 is allowed, every refraction is then TIR
        let settings = Settings {
            n2: 0.0,
            ..Settings::default()
        };
        assert!(validate_config(&settings).is_ok());
    }

    #[test]
    fn cli_overrides() {
        let args = CliArgs::parse_from([
            "lensa",
            "-a",
            "45",
            "--n1",
            "1.5",
            "--n2",
            "1.0",
            "--object",
            "book",
            "--no-reflection",
            "--steps",
            "10",
        ]);
        let mut settings = Settings::default();
        apply_cli_overrides(&mut settings, &args);
        assert_eq!(settings.angle_incident, 45.0);
        assert_eq!((settings.n1, settings.n2), (1.5, 1.0));
        assert_eq!(settings.object, ObjectKind::Book);
        assert!(!settings.show_reflection);
        assert!(settings.show_refraction);
        assert_eq!(settings.sweep_steps, 10);
    }

    #[test]
    fn log_levels() {
        assert_eq!(log_filter_from_level(0), log::LevelFilter::Warn);
        assert_eq!(log_filter_from_level(2), log::LevelFilter::Debug);
        assert_eq!(log_filter_from_level(9), log::LevelFilter::Trace);
    }
}

/// Runtime configuration for the application.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Settings {
    pub angle_incident: f32,
    pub n1: f32,
    pub n2: f32,
    pub object: ObjectKind,
    pub lens_diameter: f32,
    pub show_reflection: bool,
    pub show_refraction: bool,
    pub window_title: String,
    pub window_width: i32,
    pub window_height: i32,
    pub sweep_start: f32,
    pub sweep_end: f32,
    pub sweep_steps: usize,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_output_dir() -> String {
    ".".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            angle_incident: 30.0,
            n1: 1.0,
            n2: 1.5,
            object: ObjectKind::Arrow,
            lens_diameter: 120.0,
            show_reflection: true,
            show_refraction: true,
            window_title: "Convex Lens Refraction".to_string(),
            window_width: 1000,
            window_height: 650,
            sweep_start: 0.0,
            sweep_end: 89.0,
            sweep_steps: 90,
            output_dir: default_output_dir(),
        }
    }
}

/// Loads `config/default.toml` from the project root, without environment or
/// command-line overrides.
pub fn load_default_config() -> Result<Settings> {
    let lensa_dir = retrieve_project_root().context("could not locate the project root")?;
    let default_config_file = lensa_dir.join("config/default.toml");

    let settings = Config::builder()
        .add_source(File::from(default_config_file).required(true))
        .build()
        .context("error loading configuration")?;

    let config: Settings = settings
        .try_deserialize()
        .context("error deserializing configuration")?;

    validate_config(&config)?;

    Ok(config)
}

/// Loads the configuration in layers: built-in defaults, the project's config
/// file, `LENSA_*` environment variables and finally the command line.
pub fn load_config_with_args(args: &CliArgs) -> Result<Settings> {
    let mut builder =
        Config::builder().add_source(Config::try_from(&Settings::default())?);

    // Prefer a local config over the default one
    match retrieve_project_root() {
        Some(lensa_dir) => {
            let default_config_file = lensa_dir.join("config/default.toml");
            let local_config = lensa_dir.join("config/local.toml");
            let config_file = if local_config.exists() {
                log::info!("Using local configuration: {:?}", local_config);
                local_config
            } else {
                log::info!("Using default configuration: {:?}", default_config_file);
                default_config_file
            };
            builder = builder.add_source(File::from(config_file).required(false));
        }
        None => log::warn!("No config directory found, using built-in defaults"),
    }

    let settings = builder
        .add_source(Environment::with_prefix("lensa"))
        .build()
        .context("error loading configuration")?;

    let mut config: Settings = settings
        .try_deserialize()
        .context("error deserializing configuration")?;

    apply_cli_overrides(&mut config, args);

    validate_config(&config)?;

    log::debug!("{:#?}", config);

    Ok(config)
}

fn apply_cli_overrides(config: &mut Settings, args: &CliArgs) {
    if let Some(angle) = args.angle {
        config.angle_incident = angle;
    }
    if let Some(n1) = args.n1 {
        config.n1 = n1;
    }
    if let Some(n2) = args.n2 {
        config.n2 = n2;
    }
    if let Some(object) = args.object {
        config.object = object;
    }
    if let Some(diameter) = args.diameter {
        config.lens_diameter = diameter;
    }
    if args.no_reflection {
        config.show_reflection = false;
    }
    if args.no_refraction {
        config.show_refraction = false;
    }
    if let Some(start) = args.start {
        config.sweep_start = start;
    }
    if let Some(end) = args.end {
        config.sweep_end = end;
    }
    if let Some(steps) = args.steps {
        config.sweep_steps = steps;
    }
    if let Some(out) = &args.out {
        config.output_dir = out.clone();
    }
}

/// Retrieve the project root directory.
/// This function tries to find the project root directory in different ways:
/// 1. If the CARGO_MANIFEST_DIR environment variable is set, use it.
/// 2. If the LENSA_ROOT_DIR environment variable is set, use it.
/// 3. If the "config" subdirectory is found in the executable directory or any of its parents, use it.
fn retrieve_project_root() -> Option<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        // When running through cargo (e.g. cargo run, cargo test)
        return Some(PathBuf::from(manifest_dir));
    }
    if let Ok(path) = env::var(ROOT_DIR_VAR) {
        return Some(PathBuf::from(path));
    }

    let exe_path = env::current_exe().ok()?;
    exe_path
        .ancestors()
        .skip(1)
        .find(|dir| dir.join("config").is_dir())
        .map(|dir| dir.to_path_buf())
}

fn validate_config(config: &Settings) -> Result<()> {
    ensure!(
        config.n1.is_finite() && config.n1 > 0.0,
        "Refractive index n1 must be greater than 0, got {}",
        config.n1
    );
    ensure!(
        config.n2.is_finite(),
        "Refractive index n2 must be finite, got {}",
        config.n2
    );
    if config.n2 <= 0.0 {
        log::warn!(
            "Refractive index n2 = {} is not positive; every ray will be reported as totally internally reflected",
            config.n2
        );
    }
    ensure!(
        (0.0..90.0).contains(&config.angle_incident),
        "Incidence angle must lie in [0, 90) degrees, got {}",
        config.angle_incident
    );
    ensure!(
        config.lens_diameter > 0.0,
        "Lens diameter must be greater than 0"
    );
    ensure!(
        config.window_width > 0 && config.window_height > 0,
        "Window dimensions must be greater than 0"
    );
    validate_sweep(config.sweep_start, config.sweep_end, config.sweep_steps)?;
    Ok(())
}

/// Checks an incidence-angle sweep: `0 <= start < end < 90` with at least 2 steps.
pub fn validate_sweep(start: f32, end: f32, steps: usize) -> Result<()> {
    ensure!(
        start >= 0.0 && start < end && end < 90.0,
        "Sweep range must satisfy 0 <= start < end < 90, got [{}, {}]",
        start,
        end
    );
    ensure!(steps >= 2, "Sweep needs at least 2 steps, got {}", steps);
    Ok(())
}

/// Maps a `-v` count to a log level filter.
pub fn log_filter_from_level(level: u8) -> log::LevelFilter {
    match level {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

#[derive(Parser, Debug, Default)]
#[command(version, about = "Refraction and reflection of a ray at a convex lens")]
pub struct CliArgs {
    /// Incidence angle in degrees, measured from the optical axis.
    #[arg(short, long)]
    pub angle: Option<f32>,

    /// Refractive index of the medium carrying the incident ray.
    #[arg(long)]
    pub n1: Option<f32>,

    /// Refractive index of the lens medium.
    #[arg(long)]
    pub n2: Option<f32>,

    /// Object placed on the optical axis left of the lens.
    #[arg(long, value_enum)]
    pub object: Option<ObjectKind>,

    /// Lens diameter in pixels.
    #[arg(short, long)]
    pub diameter: Option<f32>,

    /// Start with the reflected ray hidden.
    #[arg(long)]
    pub no_reflection: bool,

    /// Start with the refracted ray hidden.
    #[arg(long)]
    pub no_refraction: bool,

    /// Print the parameter panel and exit instead of opening a window.
    #[arg(long, group = "mode")]
    pub headless: bool,

    /// Sweep the incidence angle and write a table and a JSON summary.
    #[arg(long, group = "mode")]
    pub sweep: bool,

    /// First incidence angle of the sweep, in degrees.
    #[arg(long)]
    pub start: Option<f32>,

    /// Last incidence angle of the sweep, in degrees. Must be below 90.
    #[arg(long)]
    pub end: Option<f32>,

    /// Number of angles in the sweep.
    #[arg(long)]
    pub steps: Option<usize>,

    /// Directory for sweep output files.
    #[arg(short, long)]
    pub out: Option<String>,

    /// Increase log verbosity. Can be repeated.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings:
  - Incidence Angle: {:.2}°
  - Incident Medium Index: {:.4}
  - Lens Medium Index: {:.4}
  - Object: {}
  - Lens Diameter: {:.0}px
  - Sweep: [{:.2}°, {:.2}°] in {} steps
  ",
            self.angle_incident,
            self.n1,
            self.n2,
            self.object,
            self.lens_diameter,
            self.sweep_start,
            self.sweep_end,
            self.sweep_steps,
        )
    }
}
