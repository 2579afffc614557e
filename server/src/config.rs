//! Server configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";
pub const DEFAULT_JWT_EXPIRE_MINUTES: i64 = 60;
pub const DEFAULT_STREAM_FPS: f64 = 24.0;
pub const DEFAULT_JPEG_QUALITY: u8 = 80;
pub const DEFAULT_FRAME_WIDTH: u32 = 1280;
pub const DEFAULT_FRAME_HEIGHT: u32 = 720;
pub const DEFAULT_SHAPES_COUNT: usize = 12;
pub const DEFAULT_SHAPE_MIN_SIZE: u32 = 25;
pub const DEFAULT_SHAPE_MAX_SIZE: u32 = 120;
pub const DEFAULT_SHAPE_MIN_SPEED: f64 = 2.0;
pub const DEFAULT_SHAPE_MAX_SPEED: f64 = 8.0;
pub const DEFAULT_SITE_DIR: &str = "sites";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
}

/// Synthetic scene parameters. Ranges are normalised so `min <= max`.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub width: u32,
    pub height: u32,
    pub shapes: usize,
    pub min_size: u32,
    pub max_size: u32,
    pub min_speed: f64,
    pub max_speed: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreamConfig {
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expire_minutes: i64,
    pub fps: f64,
    pub jpeg_quality: u8,
    pub scene: SceneConfig,
    pub site_dir: PathBuf,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            jwt_secret: DEFAULT_JWT_SECRET.to_owned(),
            jwt_expire_minutes: DEFAULT_JWT_EXPIRE_MINUTES,
            fps: DEFAULT_STREAM_FPS,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            scene: SceneConfig {
                width: DEFAULT_FRAME_WIDTH,
                height: DEFAULT_FRAME_HEIGHT,
                shapes: DEFAULT_SHAPES_COUNT,
                min_size: DEFAULT_SHAPE_MIN_SIZE,
                max_size: DEFAULT_SHAPE_MAX_SIZE,
                min_speed: DEFAULT_SHAPE_MIN_SPEED,
                max_speed: DEFAULT_SHAPE_MAX_SPEED,
            },
            site_dir: PathBuf::from(DEFAULT_SITE_DIR),
        }
    }
}

impl StreamConfig {
    /// Build config from the process environment.
    ///
    /// All variables are optional:
    /// - `PORT` (8000)
    /// - `JWT_SECRET`, `JWT_EXPIRE_MINUTES` (60)
    /// - `STREAM_FPS` (24, floored at 1), `JPEG_QUALITY` (80, clamped to 1..=100)
    /// - `FRAME_WIDTH` (1280), `FRAME_HEIGHT` (720)
    /// - `SYNTHETIC_SHAPES_COUNT` (12, at least 1)
    /// - `SHAPE_MIN_SIZE`/`SHAPE_MAX_SIZE` (25/120)
    /// - `SHAPE_MIN_SPEED`/`SHAPE_MAX_SPEED` (2.0/8.0)
    /// - `SITE_DIR` (`sites`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set but does not parse, or a
    /// frame dimension is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`StreamConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let width = read(&lookup, "FRAME_WIDTH")?.unwrap_or(defaults.scene.width);
        let height = read(&lookup, "FRAME_HEIGHT")?.unwrap_or(defaults.scene.height);
        if width == 0 {
            return Err(ConfigError::Zero { var: "FRAME_WIDTH" });
        }
        if height == 0 {
            return Err(ConfigError::Zero { var: "FRAME_HEIGHT" });
        }

        let size_a: u32 = read(&lookup, "SHAPE_MIN_SIZE")?.unwrap_or(defaults.scene.min_size);
        let size_b: u32 = read(&lookup, "SHAPE_MAX_SIZE")?.unwrap_or(defaults.scene.max_size);
        let speed_a: f64 = read(&lookup, "SHAPE_MIN_SPEED")?.unwrap_or(defaults.scene.min_speed);
        let speed_b: f64 = read(&lookup, "SHAPE_MAX_SPEED")?.unwrap_or(defaults.scene.max_speed);
        let shapes: usize = read(&lookup, "SYNTHETIC_SHAPES_COUNT")?.unwrap_or(defaults.scene.shapes);

        let fps: f64 = read(&lookup, "STREAM_FPS")?.unwrap_or(defaults.fps);
        let quality: i64 = read(&lookup, "JPEG_QUALITY")?.unwrap_or(i64::from(defaults.jpeg_quality));

        Ok(Self {
            port: read(&lookup, "PORT")?.unwrap_or(defaults.port),
            jwt_secret: lookup("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_expire_minutes: read(&lookup, "JWT_EXPIRE_MINUTES")?.unwrap_or(defaults.jwt_expire_minutes),
            fps: if fps.is_finite() { fps.max(1.0) } else { defaults.fps },
            jpeg_quality: u8::try_from(quality.clamp(1, 100)).unwrap_or(defaults.jpeg_quality),
            scene: SceneConfig {
                width,
                height,
                shapes: shapes.max(1),
                min_size: size_a.min(size_b),
                max_size: size_a.max(size_b),
                min_speed: speed_a.min(speed_b),
                max_speed: speed_a.max(speed_b),
            },
            site_dir: lookup("SITE_DIR").map_or(defaults.site_dir, PathBuf::from),
        })
    }

    /// Delay between frames.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1.0))
    }
}

fn read<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    raw.trim().parse().map(Some).map_err(|_| ConfigError::Invalid { var, value: raw })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
