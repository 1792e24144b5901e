//! Spiral point-cloud generation.
//!
//! [`generate_galaxy`] is a pure function of its inputs plus the injected
//! random source: it knows nothing about meshes, entities, or the scene.
//!
//! ## Per-point pipeline
//!
//! For each index `i`:
//!
//! 1. `r = U(0,1) · radius`
//! 2. `branch = (i mod branches) / branches · 2π`, assigned by index so arm
//!    membership follows generation order
//! 3. `twist = spin_profile(r, spin)`
//! 4. per-axis jitter `U(0,1)^power · (±1) · randomness`
//! 5. `x = cos(branch + twist)·r + jx`, `y = jy`, `z = sin(branch + twist)·r + jz`
//! 6. color = lerp(inside, outside, r / radius) in linear RGB
//!
//! Raising the jitter sample to `randomness_power ≥ 1` keeps most points near
//! their arm and leaves a few long excursions, which gives the wispy scatter.

use crate::error::GalaxyResult;
use crate::params::GalaxyParameters;
use bevy::color::{LinearRgba, Mix};
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

/// CPU-side output of one generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedGalaxy {
    /// One position per point, in galaxy-local space.
    pub positions: Vec<Vec3>,
    /// One linear-RGB color per point, parallel to `positions`.
    pub colors: Vec<[f32; 3]>,
    /// Render-only point size carried over from the parameters.
    pub point_size: f32,
}

impl GeneratedGalaxy {
    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Arm angle (radians) for point `index` among `branches` evenly spaced arms.
///
/// `branches` must be non-zero; [`GalaxyParameters::validate`] guarantees it.
#[inline]
pub fn branch_angle(index: u32, branches: u32) -> f32 {
    (index % branches) as f32 / branches as f32 * TAU
}

/// Color interpolation factor for a point at `sampled_radius`.
///
/// Zero when the galaxy radius is zero so degenerate galaxies take the inside
/// color without dividing by zero.
#[inline]
pub fn color_factor(sampled_radius: f32, galaxy_radius: f32) -> f32 {
    if galaxy_radius > 0.0 {
        (sampled_radius / galaxy_radius).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// One signed, power-shaped jitter sample.
#[inline]
fn jitter<R: Rng>(rng: &mut R, power: f32, randomness: f32) -> f32 {
    let magnitude = rng.gen::<f32>().powf(power);
    let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    magnitude * sign * randomness
}

/// Generate every point of a spiral galaxy.
///
/// `spin_profile` maps `(sampled_radius, params.spin)` to the twist angle;
/// pass [`crate::spin::SpinProfile::as_fn`] or any closure.
///
/// Fails fast with [`crate::error::GalaxyError::InvalidParameter`] before
/// allocating anything if `params` is not representable.
pub fn generate_galaxy<F, R>(
    params: &GalaxyParameters,
    spin_profile: F,
    rng: &mut R,
) -> GalaxyResult<GeneratedGalaxy>
where
    F: Fn(f32, f32) -> f32,
    R: Rng,
{
    params.validate()?;

    let count = params.count as usize;
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);

    let inside = LinearRgba::from(params.inside_color);
    let outside = LinearRgba::from(params.outside_color);

    for i in 0..params.count {
        let radius = rng.gen::<f32>() * params.radius;
        let angle = branch_angle(i, params.branches) + spin_profile(radius, params.spin);

        let jx = jitter(rng, params.randomness_power, params.randomness);
        let jy = jitter(rng, params.randomness_power, params.randomness);
        let jz = jitter(rng, params.randomness_power, params.randomness);

        positions.push(Vec3::new(
            angle.cos() * radius + jx,
            jy,
            angle.sin() * radius + jz,
        ));

        let mixed = inside.mix(&outside, color_factor(radius, params.radius));
        colors.push([mixed.red, mixed.green, mixed.blue]);
    }

    Ok(GeneratedGalaxy {
        positions,
        colors,
        point_size: params.size,
    })
}
