//! Runtime configuration loaded from `assets/galaxy.toml`.
//!
//! [`GalaxyConfig`] is a Bevy [`Resource`] that mirrors the defaults in
//! [`crate::constants`].  At startup, [`load_galaxy_config`] reads
//! `assets/galaxy.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about.
//!
//! ## Tuning workflow
//!
//! 1. Edit `assets/galaxy.toml`.
//! 2. Restart; no recompilation required.
//!
//! Set `seed` to get the same galaxy on every launch; leave it out for a
//! fresh one each time.

use crate::constants::*;
use crate::error::{GalaxyError, GalaxyResult};
use crate::params::GalaxyParameters;
use crate::spin::SpinProfile;
use bevy::color::Srgba;
use bevy::prelude::*;
use serde::Deserialize;

/// Path of the optional configuration file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/galaxy.toml";

/// Runtime-tunable generation, camera, and control configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GalaxyConfig {
    // ── Galaxy ────────────────────────────────────────────────────────────────
    pub count: u32,
    pub size: f32,
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: f32,
    pub inside_color: String,
    pub outside_color: String,
    pub spin_profile: SpinProfile,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,

    // ── Animation ─────────────────────────────────────────────────────────────
    pub rotation_speed: f32,

    // ── Camera ────────────────────────────────────────────────────────────────
    pub camera_position: [f32; 3],
    pub camera_fov_degrees: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    pub orbit_sensitivity: f32,
    pub zoom_speed: f32,
    pub min_orbit_distance: f32,
    pub max_orbit_distance: f32,
    pub orbit_damping: f32,

    // ── Environment ───────────────────────────────────────────────────────────
    /// Cubemap image (asset path) shown as the skybox.  `None` leaves the
    /// background black.
    pub environment_map: Option<String>,
    pub skybox_brightness: f32,
    /// Grayscale image (asset path) that shapes each particle sprite.
    /// `None` renders plain square sprites.
    pub alpha_mask: Option<String>,

    // ── Controls ──────────────────────────────────────────────────────────────
    pub key_repeat_delay: f32,
    pub key_repeat_interval: f32,
    pub panel_font_size: f32,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            // Galaxy
            count: DEFAULT_COUNT,
            size: DEFAULT_SIZE,
            radius: DEFAULT_RADIUS,
            branches: DEFAULT_BRANCHES,
            spin: DEFAULT_SPIN,
            randomness: DEFAULT_RANDOMNESS,
            randomness_power: DEFAULT_RANDOMNESS_POWER,
            inside_color: DEFAULT_INSIDE_COLOR.to_string(),
            outside_color: DEFAULT_OUTSIDE_COLOR.to_string(),
            spin_profile: SpinProfile::default(),
            seed: None,
            // Animation
            rotation_speed: ROTATION_SPEED,
            // Camera
            camera_position: CAMERA_POSITION,
            camera_fov_degrees: CAMERA_FOV_DEGREES,
            camera_near: CAMERA_NEAR,
            camera_far: CAMERA_FAR,
            orbit_sensitivity: ORBIT_SENSITIVITY,
            zoom_speed: ZOOM_SPEED,
            min_orbit_distance: MIN_ORBIT_DISTANCE,
            max_orbit_distance: MAX_ORBIT_DISTANCE,
            orbit_damping: ORBIT_DAMPING,
            // Environment
            environment_map: None,
            skybox_brightness: SKYBOX_BRIGHTNESS,
            alpha_mask: None,
            // Controls
            key_repeat_delay: KEY_REPEAT_DELAY,
            key_repeat_interval: KEY_REPEAT_INTERVAL,
            panel_font_size: PANEL_FONT_SIZE,
        }
    }
}

impl GalaxyConfig {
    /// Parse a TOML document; keys not present keep their defaults.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Build the initial generation parameters from this configuration.
    ///
    /// Values are taken as written (no clamping); only the colors can fail.
    pub fn parameters(&self) -> GalaxyResult<GalaxyParameters> {
        Ok(GalaxyParameters {
            count: self.count,
            size: self.size,
            radius: self.radius,
            branches: self.branches,
            spin: self.spin,
            randomness: self.randomness,
            randomness_power: self.randomness_power,
            inside_color: parse_color("inside_color", &self.inside_color)?,
            outside_color: parse_color("outside_color", &self.outside_color)?,
        })
    }
}

fn parse_color(field: &'static str, value: &str) -> GalaxyResult<Srgba> {
    Srgba::hex(value).map_err(|_| GalaxyError::InvalidColor {
        field,
        value: value.to_string(),
    })
}

/// Startup system: attempt to load `assets/galaxy.toml` and overwrite the
/// `GalaxyConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors are logged
/// but do not abort startup.  A missing file is not an error.
pub fn load_galaxy_config(mut config: ResMut<GalaxyConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match GalaxyConfig::from_toml(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded galaxy config from {CONFIG_PATH}");
            }
            Err(e) => {
                warn!("Failed to parse {CONFIG_PATH}: {e}; using defaults");
            }
        },
        Err(_) => {
            info!("No {CONFIG_PATH} found; using compiled defaults");
        }
    }
}
