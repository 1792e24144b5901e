//! Spiral galaxy generator library
//!
//! Procedurally generates a spiral galaxy as a point cloud (arms, spin
//! profile, jitter, radial color gradient) and renders it with Bevy, with
//! keyboard and panel controls that rebuild the galaxy on commit.

pub mod animation;
pub mod config;
pub mod constants;
pub mod controls;
pub mod error;
pub mod galaxy;
pub mod galaxy_rendering;
pub mod generator;
pub mod graphics;
pub mod params;
pub mod rendering;
pub mod scene;
pub mod spin;
