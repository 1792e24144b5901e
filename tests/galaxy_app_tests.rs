//! Headless tests for the galaxy lifecycle in a running Bevy app.
//!
//! These tests use [`MinimalPlugins`] plus the asset plugin, with no window,
//! renderer or UI, so they run fast and deterministically in CI.
//!
//! Covered scenarios:
//! 1. Startup installs exactly one galaxy (one entity, one mesh, one material).
//! 2. Repeated regeneration never leaves more than one galaxy behind.
//! 3. `count = 0` installs an entity with no mesh.
//! 4. Invalid configured parameters are rejected without installing anything.
//! 5. An unparseable configured color falls back to the default parameters.
//! 6. The same seed reproduces the same point positions.
//! 7. A size edit changes the sprite extents of the rebuilt mesh.
//! 8. A previous galaxy whose mesh or entity vanished is counted as a failed
//!    release, and the new galaxy is still the only one installed.

use bevy::prelude::*;
use spiral_galaxy::config::GalaxyConfig;
use spiral_galaxy::galaxy::{GalaxyPlugin, GalaxyStats, RegenerateGalaxy, RegenerateReason};
use spiral_galaxy::galaxy_rendering::VERTICES_PER_POINT;
use spiral_galaxy::params::GalaxySettings;
use spiral_galaxy::scene::{GalaxyPoints, GalaxyScene};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a headless app generating from `config`, and run the startup frame.
fn app_with_config(config: GalaxyConfig) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, AssetPlugin::default()));
    app.init_asset::<Mesh>();
    app.init_asset::<StandardMaterial>();
    app.insert_resource(config);
    app.add_plugins(GalaxyPlugin);
    app.update();
    app
}

fn small_config() -> GalaxyConfig {
    GalaxyConfig {
        count: 500,
        seed: Some(7),
        ..Default::default()
    }
}

fn galaxy_entities(app: &mut App) -> usize {
    let mut query = app.world_mut().query::<&GalaxyPoints>();
    query.iter(app.world()).count()
}

fn mesh_count(app: &App) -> usize {
    app.world().resource::<Assets<Mesh>>().len()
}

fn material_count(app: &App) -> usize {
    app.world().resource::<Assets<StandardMaterial>>().len()
}

fn request(app: &mut App, reason: RegenerateReason) {
    app.world_mut()
        .write_message(RegenerateGalaxy { reason });
}

/// Width of the first sprite's first quad along X.
fn first_sprite_width(app: &App) -> f32 {
    let quad = &positions(app)[..4];
    let min = quad.iter().map(|p| p[0]).fold(f32::INFINITY, f32::min);
    let max = quad.iter().map(|p| p[0]).fold(f32::NEG_INFINITY, f32::max);
    max - min
}

fn positions(app: &App) -> Vec<[f32; 3]> {
    let meshes = app.world().resource::<Assets<Mesh>>();
    let (_, mesh) = meshes.iter().next().expect("a galaxy mesh");
    mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        .and_then(|values| values.as_float3())
        .expect("float3 positions")
        .to_vec()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn startup_installs_exactly_one_galaxy() {
    let mut app = app_with_config(small_config());

    assert_eq!(galaxy_entities(&mut app), 1);
    assert_eq!(mesh_count(&app), 1);
    assert_eq!(material_count(&app), 1);

    let stats = app.world().resource::<GalaxyStats>();
    assert_eq!(stats.generations, 1);
    assert_eq!(stats.point_count, 500);
    assert_eq!(positions(&app).len(), 500 * VERTICES_PER_POINT);
}

#[test]
fn repeated_regeneration_keeps_one_galaxy() {
    let mut app = app_with_config(small_config());

    request(&mut app, RegenerateReason::Reroll);
    app.update();
    request(&mut app, RegenerateReason::Commit);
    app.update();

    assert_eq!(app.world().resource::<GalaxyStats>().generations, 3);
    assert_eq!(galaxy_entities(&mut app), 1, "previous galaxies despawned");
    assert_eq!(mesh_count(&app), 1, "previous meshes released");
    assert_eq!(material_count(&app), 1, "previous materials released");
    assert_eq!(app.world().resource::<GalaxyScene>().0.installs(), 3);
}

#[test]
fn settings_edits_apply_on_next_request() {
    let mut app = app_with_config(small_config());

    app.world_mut().resource_mut::<GalaxySettings>().params.count = 1200;
    app.update();
    assert_eq!(
        app.world().resource::<GalaxyStats>().point_count,
        500,
        "no request, no rebuild"
    );

    request(&mut app, RegenerateReason::Commit);
    app.update();
    assert_eq!(app.world().resource::<GalaxyStats>().point_count, 1200);
    assert_eq!(positions(&app).len(), 1200 * VERTICES_PER_POINT);
}

#[test]
fn zero_count_installs_entity_without_mesh() {
    let mut app = app_with_config(GalaxyConfig {
        count: 0,
        ..small_config()
    });

    assert_eq!(galaxy_entities(&mut app), 1);
    assert_eq!(mesh_count(&app), 0);
    let mut with_mesh = app
        .world_mut()
        .query_filtered::<Entity, (With<GalaxyPoints>, With<Mesh3d>)>();
    assert_eq!(with_mesh.iter(app.world()).count(), 0);
    assert_eq!(app.world().resource::<GalaxyStats>().point_count, 0);
}

#[test]
fn invalid_parameters_are_rejected() {
    let mut app = app_with_config(GalaxyConfig {
        radius: -1.0,
        ..small_config()
    });

    assert_eq!(galaxy_entities(&mut app), 0);
    let stats = app.world().resource::<GalaxyStats>();
    assert_eq!(stats.generations, 0);
    assert_eq!(stats.rejected, 1);
}

#[test]
fn bad_color_falls_back_to_defaults() {
    let mut app = app_with_config(GalaxyConfig {
        inside_color: "nope".to_string(),
        ..small_config()
    });

    // The whole parameter set falls back, including the count.
    let settings = app.world().resource::<GalaxySettings>();
    assert_eq!(settings.params, Default::default());
    assert_eq!(galaxy_entities(&mut app), 1);
}

#[test]
fn same_seed_reproduces_the_galaxy() {
    let a = app_with_config(small_config());
    let b = app_with_config(small_config());
    assert_eq!(positions(&a), positions(&b));

    let c = app_with_config(GalaxyConfig {
        seed: Some(8),
        ..small_config()
    });
    assert_ne!(positions(&a), positions(&c));
}

#[test]
fn size_edit_changes_sprite_extent() {
    let mut app = app_with_config(small_config());
    let before = first_sprite_width(&app);

    app.world_mut().resource_mut::<GalaxySettings>().params.size = 0.05;
    request(&mut app, RegenerateReason::Commit);
    app.update();
    let after = first_sprite_width(&app);

    assert!((before - 0.01).abs() < 1e-5, "default width {before}");
    assert!((after - 0.05).abs() < 1e-5, "edited width {after}");
}

#[test]
fn vanished_mesh_counts_as_failed_release() {
    let mut app = app_with_config(small_config());
    let mesh = app
        .world()
        .resource::<GalaxyScene>()
        .0
        .live()
        .and_then(|live| live.mesh.clone())
        .expect("live galaxy mesh");
    app.world_mut().resource_mut::<Assets<Mesh>>().remove(&mesh);

    request(&mut app, RegenerateReason::Reroll);
    app.update();

    let stats = app.world().resource::<GalaxyStats>();
    assert_eq!(stats.failed_disposals, 1);
    assert_eq!(stats.generations, 2);
    assert_eq!(galaxy_entities(&mut app), 1, "old entity still despawned");
    assert_eq!(mesh_count(&app), 1);
    assert_eq!(material_count(&app), 1);
}

#[test]
fn vanished_entity_counts_as_failed_release() {
    let mut app = app_with_config(small_config());
    let entity = app
        .world()
        .resource::<GalaxyScene>()
        .0
        .live()
        .map(|live| live.entity)
        .expect("live galaxy entity");
    app.world_mut().despawn(entity);

    request(&mut app, RegenerateReason::Reroll);
    app.update();

    assert_eq!(app.world().resource::<GalaxyStats>().failed_disposals, 1);
    assert_eq!(galaxy_entities(&mut app), 1);
    assert_eq!(mesh_count(&app), 1, "old mesh released despite the missing entity");
}
