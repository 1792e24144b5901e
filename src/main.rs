use bevy::prelude::*;
use bevy::window::WindowResolution;
use spiral_galaxy::config::{self, GalaxyConfig};
use spiral_galaxy::controls::ControlsPlugin;
use spiral_galaxy::galaxy::{self, GalaxyPlugin};
use spiral_galaxy::galaxy_rendering;
use spiral_galaxy::graphics;
use spiral_galaxy::rendering::ControlPanelPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Spiral Galaxy".into(),
            resolution: WindowResolution::new(1280, 720),
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::BLACK))
    // Insert GalaxyConfig with compiled defaults; load_galaxy_config will
    // overwrite it from assets/galaxy.toml (if present) in the Startup schedule.
    .insert_resource(GalaxyConfig::default())
    .add_plugins((GalaxyPlugin, ControlsPlugin, ControlPanelPlugin))
    .add_systems(
        Startup,
        (
            // Load config first so every other startup system sees the final values.
            config::load_galaxy_config,
            graphics::setup_camera.after(config::load_galaxy_config),
            galaxy_rendering::load_galaxy_textures
                .after(config::load_galaxy_config)
                .before(galaxy::init_galaxy_state),
        ),
    )
    .add_systems(Update, graphics::orbit_camera_system);

    app.run();
}
