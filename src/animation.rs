//! Frame-driven galaxy rotation.
//!
//! Rotation is a pure function of elapsed time, read through [`GalaxyClock`]
//! so tests (or a paused/scrubbed timeline) can inject their own time source.

use crate::config::GalaxyConfig;
use crate::scene::GalaxyPoints;
use bevy::prelude::*;

/// Source of elapsed time for the render step.
pub trait GalaxyClock {
    /// Seconds since the clock started.
    fn elapsed_secs(&self) -> f32;
}

impl<T: Default> GalaxyClock for Time<T> {
    fn elapsed_secs(&self) -> f32 {
        Time::<T>::elapsed_secs(self)
    }
}

/// A clock frozen at a fixed time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedClock(pub f32);

impl GalaxyClock for FixedClock {
    fn elapsed_secs(&self) -> f32 {
        self.0
    }
}

/// Galaxy orientation at the clock's current time: a turn about +Y at
/// `speed` rad/s, negative so the arms trail.
pub fn galaxy_rotation(clock: &impl GalaxyClock, speed: f32) -> Quat {
    Quat::from_rotation_y(-clock.elapsed_secs() * speed)
}

/// Update system: set the live galaxy's rotation from the app clock.
///
/// Reads the galaxy without touching its buffers.
pub fn rotate_galaxy_system(
    time: Res<Time>,
    config: Res<GalaxyConfig>,
    mut query: Query<&mut Transform, With<GalaxyPoints>>,
) {
    let rotation = galaxy_rotation(&*time, config.rotation_speed);
    for mut transform in query.iter_mut() {
        transform.rotation = rotation;
    }
}
