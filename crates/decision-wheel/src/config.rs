use crate::wheel::MAX_JITTER_FRACTION;
use crate::wheel::theme::{DEFAULT_PALETTE, HexColor};
use directories::ProjectDirs;
use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpinConfig {
    pub min_duration_ms: u64,
    pub max_duration_ms: u64,
    pub min_rotations: u32,
    pub max_rotations: u32,
    /// Share of a segment's width the landing point may stray from its center, each way.
    pub jitter_fraction: f64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: 4000,
            max_duration_ms: 7000,
            min_rotations: 10,
            max_rotations: 15,
            jitter_fraction: 0.25,
        }
    }
}

impl SpinConfig {
    pub fn duration_range(&self) -> RangeInclusive<u64> {
        let (lo, hi) = ordered(self.min_duration_ms, self.max_duration_ms);
        lo.max(1)..=hi.max(1)
    }

    pub fn rotation_range(&self) -> RangeInclusive<u32> {
        let (lo, hi) = ordered(self.min_rotations, self.max_rotations);
        lo.max(1)..=hi.max(1)
    }

    pub fn jitter(&self) -> f64 {
        if self.jitter_fraction.is_finite() {
            self.jitter_fraction.clamp(0.0, MAX_JITTER_FRACTION)
        } else {
            0.0
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_duration_ms == 0 || self.min_duration_ms > self.max_duration_ms {
            return Err(ConfigError::InvalidRange(format!(
                "duration {}..={} ms",
                self.min_duration_ms, self.max_duration_ms
            )));
        }
        if self.min_rotations == 0 || self.min_rotations > self.max_rotations {
            return Err(ConfigError::InvalidRange(format!(
                "rotations {}..={}",
                self.min_rotations, self.max_rotations
            )));
        }
        if !(0.0..=MAX_JITTER_FRACTION).contains(&self.jitter_fraction) {
            return Err(ConfigError::InvalidRange(format!(
                "jitter fraction {} (allowed 0..={MAX_JITTER_FRACTION})",
                self.jitter_fraction
            )));
        }
        Ok(())
    }
}

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    pub radius: f64,
    pub palette: Vec<HexColor>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            radius: 150.0,
            palette: Vec::new(),
        }
    }
}

impl RenderConfig {
    pub fn colors(&self) -> Vec<Srgb<u8>> {
        if self.palette.is_empty() {
            DEFAULT_PALETTE.to_vec()
        } else {
            self.palette.iter().copied().map(Srgb::from).collect()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub spin: SpinConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.spin.validate()?;
        if !(self.render.radius.is_finite() && self.render.radius > 0.0) {
            return Err(ConfigError::InvalidRange(format!(
                "render radius {}",
                self.render.radius
            )));
        }
        if self.render.palette.len() == 1 {
            return Err(ConfigError::InvalidRange(
                "palette needs at least 2 colours".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No config directory for the decision wheel on this system")]
    NoConfigDir,
    #[error("Unreadable wheel config: {0}")]
    Source(#[from] config::ConfigError),
    #[error("Could not write wheel config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "troia", "decision-wheel")
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = project_dirs().ok_or(ConfigError::NoConfigDir)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Overrides such as `WHEEL__SPIN__MAX_ROTATIONS=20`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("WHEEL")
        .separator("__")
        .try_parsing(true)
}

fn build<S>(source: S) -> Result<Config, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    build_with_env(source, environment())
}

fn build_with_env<S>(source: S, env: config::Environment) -> Result<Config, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let s = config::Config::builder()
        .add_source(source)
        .add_source(env)
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;
    build(config::File::from(config_path).required(false))
}

pub fn load_from_str(toml: &str) -> Result<Config, ConfigError> {
    build(config::File::from_str(toml, config::FileFormat::Toml))
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Falling back to default config: {}", e);
            Config::default()
        }
    }
}

/// Writes the commented default config unless one exists, then checks that
/// whatever is on disk loads as a valid wheel config.
pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    write_default_config_at(&path)?;
    Ok(path)
}

pub fn write_default_config_at(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        log::info!("Keeping existing config at {}", path.display());
    } else {
        if let Some(parent) = path.parent() {
            fs_err::create_dir_all(parent)?;
        }
        fs_err::write(path, DEFAULT_CONFIG)?;
        log::info!("Wrote default config to {}", path.display());
    }
    build(config::File::from(path.to_path_buf()).required(true))
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
