//! Centralised generation, camera, and control constants.
//!
//! Every runtime-tunable value in [`crate::config::GalaxyConfig`] defaults to
//! one of these, so the compiled defaults and `assets/galaxy.toml` stay in one
//! place.
//!
//! ## Tuning guidance
//!
//! The `*_MIN` / `*_MAX` pairs are the bounds the control panel clamps edits
//! to.  The generator itself tolerates values outside them.

// ── Galaxy: Defaults ──────────────────────────────────────────────────────────

/// Number of points generated at startup.
///
/// 150 000 points take a few tens of milliseconds on a desktop CPU.  Near the
/// 1 000 000 upper bound a regeneration is a noticeable frame hitch.
pub const DEFAULT_COUNT: u32 = 150_000;

/// World-space point size passed through to the renderer.
pub const DEFAULT_SIZE: f32 = 0.01;

/// Maximum sampled radius of the spiral (world units).
pub const DEFAULT_RADIUS: f32 = 5.0;

/// Number of spiral arms.
pub const DEFAULT_BRANCHES: u32 = 10;

/// Twist coefficient handed to the spin profile.
pub const DEFAULT_SPIN: f32 = 1.0;

/// Jitter magnitude scale.
pub const DEFAULT_RANDOMNESS: f32 = 0.2;

/// Jitter falloff exponent.  Higher values pull most points tight to the arm
/// while leaving a few long excursions.
pub const DEFAULT_RANDOMNESS_POWER: f32 = 7.0;

/// Core color (sRGB hex).
pub const DEFAULT_INSIDE_COLOR: &str = "#ff6030";

/// Rim color (sRGB hex).
pub const DEFAULT_OUTSIDE_COLOR: &str = "#1b3984";

// ── Galaxy: Edit Bounds ───────────────────────────────────────────────────────

pub const COUNT_MIN: u32 = 100;
pub const COUNT_MAX: u32 = 1_000_000;
pub const COUNT_STEP: u32 = 100;
/// Hard ceiling on `count` from any source (config included); above this the
/// buffers would not fit in memory.
pub const COUNT_CEILING: u32 = COUNT_MAX * 10;

pub const SIZE_MIN: f32 = 0.001;
pub const SIZE_MAX: f32 = 0.1;

pub const RADIUS_MIN: f32 = 0.01;
pub const RADIUS_MAX: f32 = 20.0;

pub const BRANCHES_MIN: u32 = 2;
pub const BRANCHES_MAX: u32 = 20;

pub const SPIN_MIN: f32 = -5.0;
pub const SPIN_MAX: f32 = 5.0;

pub const RANDOMNESS_MIN: f32 = 0.0;
pub const RANDOMNESS_MAX: f32 = 2.0;

pub const RANDOMNESS_POWER_MIN: f32 = 1.0;
pub const RANDOMNESS_POWER_MAX: f32 = 10.0;

/// Hue rotation (degrees) applied by one color nudge.
pub const COLOR_HUE_STEP_DEGREES: f32 = 5.0;

// ── Animation ─────────────────────────────────────────────────────────────────

/// Galaxy rotation rate about +Y (rad/s).  Applied with a negative sign so the
/// arms trail the spin direction.
pub const ROTATION_SPEED: f32 = 0.06;

// ── Camera ────────────────────────────────────────────────────────────────────

/// Initial camera position; the camera always looks at the origin.
pub const CAMERA_POSITION: [f32; 3] = [3.0, 5.0, 6.0];

/// Vertical field of view (degrees).
pub const CAMERA_FOV_DEGREES: f32 = 75.0;

pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

/// Orbit angle change (rad) per pixel of mouse drag.
pub const ORBIT_SENSITIVITY: f32 = 0.005;

/// Fractional distance change per scroll line.
pub const ZOOM_SPEED: f32 = 0.1;

/// Closest orbit distance.  Keeps the near plane out of the galactic core.
pub const MIN_ORBIT_DISTANCE: f32 = 0.5;

/// Farthest orbit distance.  Stays inside `CAMERA_FAR`.
pub const MAX_ORBIT_DISTANCE: f32 = 60.0;

/// Fraction of orbit velocity removed per frame.
///
/// 0.0 = never slows down; 1.0 = stops instantly (no damping glide).
pub const ORBIT_DAMPING: f32 = 0.1;

// ── Controls ──────────────────────────────────────────────────────────────────

/// Seconds a nudge key must be held before it starts auto-repeating.
pub const KEY_REPEAT_DELAY: f32 = 0.3;

/// Seconds between auto-repeated nudges while a key stays held.
pub const KEY_REPEAT_INTERVAL: f32 = 0.04;

// ── Rendering ─────────────────────────────────────────────────────────────────

pub const PANEL_FONT_SIZE: f32 = 12.0;

/// Brightness of the optional environment skybox (cd/m²).
pub const SKYBOX_BRIGHTNESS: f32 = 1000.0;
