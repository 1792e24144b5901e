use crate::config::GalaxyConfig;
use bevy::core_pipeline::Skybox;
use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

/// Pitch limit, just short of the poles so `looking_at` keeps a stable up axis.
const MAX_PITCH: f32 = FRAC_PI_2 - 0.01;

/// Pixel-based scroll deltas (touchpads) are scaled to roughly one line each.
const PIXELS_PER_SCROLL_LINE: f32 = 16.0;

/// Damped orbit around the origin.
///
/// Input adds to the velocities; every frame the velocities are applied and
/// then decay by the damping factor, so motion glides to a stop.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub yaw_velocity: f32,
    pub pitch_velocity: f32,
    pub zoom_velocity: f32,
}

impl OrbitCamera {
    /// Orbit state whose camera sits at `position`, looking at the origin.
    pub fn from_position(position: Vec3) -> Self {
        let distance = position.length().max(f32::EPSILON);
        Self {
            yaw: position.x.atan2(position.z),
            pitch: (position.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            zoom_velocity: 0.0,
        }
    }

    /// Camera position for the current yaw, pitch and distance.
    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance
    }

    /// Feed one frame of drag (pixels) and scroll (lines) into the velocities.
    pub fn apply_input(&mut self, drag: Vec2, scroll: f32, sensitivity: f32, zoom_speed: f32) {
        self.yaw_velocity -= drag.x * sensitivity;
        self.pitch_velocity += drag.y * sensitivity;
        self.zoom_velocity -= scroll * zoom_speed;
    }

    /// Integrate one frame and apply damping.
    pub fn step(&mut self, damping: f32, min_distance: f32, max_distance: f32) {
        self.yaw += self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity).clamp(-MAX_PITCH, MAX_PITCH);
        self.distance = (self.distance * (1.0 + self.zoom_velocity)).clamp(min_distance, max_distance);

        let keep = (1.0 - damping).clamp(0.0, 1.0);
        self.yaw_velocity *= keep;
        self.pitch_velocity *= keep;
        self.zoom_velocity *= keep;
    }

    /// Camera transform looking at the origin.
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(Vec3::ZERO, Vec3::Y)
    }
}

/// Setup the perspective camera looking at the galaxy, with the optional
/// environment skybox.
///
/// Must be ordered after [`crate::config::load_galaxy_config`].
pub fn setup_camera(
    mut commands: Commands,
    config: Res<GalaxyConfig>,
    asset_server: Res<AssetServer>,
) {
    let orbit = OrbitCamera::from_position(Vec3::from_array(config.camera_position));
    let mut camera = commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: config.camera_fov_degrees.to_radians(),
            near: config.camera_near,
            far: config.camera_far,
            ..default()
        }),
        orbit.transform(),
        orbit,
    ));

    // A missing or undecodable cubemap only leaves the background black.
    if let Some(path) = &config.environment_map {
        camera.insert(Skybox {
            image: asset_server.load(path.clone()),
            brightness: config.skybox_brightness,
            ..default()
        });
        info!("[SETUP] Skybox requested from {path}");
    }
    info!("[SETUP] Camera spawned");
}

/// Orbit the camera with left-drag and zoom with the scroll wheel.
///
/// Drags that start over the control panel are ignored.
pub fn orbit_camera_system(
    mouse: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    config: Res<GalaxyConfig>,
    ui: Query<&Interaction>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let over_ui = ui.iter().any(|i| *i != Interaction::None);

    let drag = if mouse.pressed(MouseButton::Left) && !over_ui {
        motion.delta
    } else {
        Vec2::ZERO
    };
    let lines = match scroll.unit {
        MouseScrollUnit::Line => scroll.delta.y,
        MouseScrollUnit::Pixel => scroll.delta.y / PIXELS_PER_SCROLL_LINE,
    };
    let lines = if over_ui { 0.0 } else { lines };

    for (mut orbit, mut transform) in cameras.iter_mut() {
        orbit.apply_input(drag, lines, config.orbit_sensitivity, config.zoom_speed);
        orbit.step(
            config.orbit_damping,
            config.min_orbit_distance,
            config.max_orbit_distance,
        );
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_position_round_trips() {
        let start = Vec3::new(3.0, 5.0, 6.0);
        let orbit = OrbitCamera::from_position(start);
        assert!(orbit.position().abs_diff_eq(start, 1e-4));
    }

    #[test]
    fn transform_looks_at_origin() {
        let orbit = OrbitCamera::from_position(Vec3::new(3.0, 5.0, 6.0));
        let t = orbit.transform();
        let to_origin = (-t.translation).normalize();
        assert!(t.forward().as_vec3().abs_diff_eq(to_origin, 1e-4));
    }

    #[test]
    fn velocity_decays_with_damping() {
        let mut orbit = OrbitCamera::from_position(Vec3::new(0.0, 0.0, 5.0));
        orbit.apply_input(Vec2::new(10.0, 0.0), 0.0, 0.01, 0.1);
        assert!((orbit.yaw_velocity + 0.1).abs() < 1e-6);

        orbit.step(0.1, 0.5, 60.0);
        assert!((orbit.yaw + 0.1).abs() < 1e-6);
        assert!((orbit.yaw_velocity + 0.09).abs() < 1e-6);

        for _ in 0..200 {
            orbit.step(0.1, 0.5, 60.0);
        }
        assert!(orbit.yaw_velocity.abs() < 1e-6, "comes to rest");
        // Geometric series: total yaw = -0.1 / 0.1.
        assert!((orbit.yaw + 1.0).abs() < 1e-3, "yaw {}", orbit.yaw);
    }

    #[test]
    fn pitch_stays_short_of_the_poles() {
        let mut orbit = OrbitCamera::from_position(Vec3::new(0.0, 0.0, 5.0));
        orbit.apply_input(Vec2::new(0.0, 10_000.0), 0.0, 0.01, 0.1);
        orbit.step(0.0, 0.5, 60.0);
        assert!(orbit.pitch <= MAX_PITCH);
        assert!(orbit.position().is_finite());
    }

    #[test]
    fn zoom_is_clamped() {
        let mut orbit = OrbitCamera::from_position(Vec3::new(0.0, 0.0, 5.0));
        orbit.apply_input(Vec2::ZERO, 100.0, 0.01, 0.1);
        orbit.step(0.1, 0.5, 60.0);
        assert_eq!(orbit.distance, 0.5);

        orbit.zoom_velocity = 0.0;
        orbit.apply_input(Vec2::ZERO, -10_000.0, 0.01, 0.1);
        orbit.step(0.1, 0.5, 60.0);
        assert_eq!(orbit.distance, 60.0);
    }

    #[test]
    fn scroll_up_moves_camera_closer() {
        let mut orbit = OrbitCamera::from_position(Vec3::new(0.0, 0.0, 5.0));
        orbit.apply_input(Vec2::ZERO, 1.0, 0.01, 0.1);
        orbit.step(0.1, 0.5, 60.0);
        assert!(orbit.distance < 5.0);
    }
}
