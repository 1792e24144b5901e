//! Galaxy plugin: settings, regeneration requests, and the live-galaxy owner.
//!
//! ## Systems
//!
//! | System                      | Schedule  | Purpose                                  |
//! |-----------------------------|-----------|------------------------------------------|
//! | `init_galaxy_state`         | Startup   | Seed settings + RNG from `GalaxyConfig`  |
//! | `regenerate_galaxy_system`  | Update    | Dispose-then-install on each request     |
//! | `rotate_galaxy_system`      | Update    | Spin the live galaxy from the clock      |
//! | `teardown_galaxy_system`    | Last      | Release the live galaxy on app exit      |
//!
//! Everything here runs headless: no window, camera, or UI is required, so
//! the whole lifecycle is covered by `MinimalPlugins` tests.

use crate::animation::{galaxy_rotation, rotate_galaxy_system};
use crate::config::{self, GalaxyConfig};
use crate::galaxy_rendering::GalaxyTextures;
use crate::params::GalaxySettings;
use crate::scene::{BevySceneHost, GalaxyScene};
use crate::spin::SpinProfile;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

// ── Messages ──────────────────────────────────────────────────────────────────

/// Why a regeneration was requested (for logging and the status line).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegenerateReason {
    /// First galaxy at startup.
    Startup,
    /// A parameter edit was committed.
    Commit,
    /// A spin profile was selected.
    ProfileSelected,
    /// Same parameters, fresh random draw.
    Reroll,
}

/// Request to rebuild the galaxy from the current [`GalaxySettings`].
///
/// Several requests in the same frame produce one generation.
#[derive(Message, Debug, Clone, Copy)]
pub struct RegenerateGalaxy {
    pub reason: RegenerateReason,
}

// ── Resources ─────────────────────────────────────────────────────────────────

/// Random source shared by every generation.
#[derive(Resource)]
pub struct GalaxyRng(pub StdRng);

impl GalaxyRng {
    /// Seeded when `seed` is given, otherwise from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

/// Bookkeeping shown in the status line.
#[derive(Resource, Debug, Clone, Default)]
pub struct GalaxyStats {
    /// Successful generations so far.
    pub generations: u64,
    /// Points in the live galaxy.
    pub point_count: usize,
    /// Wall time of the last generation, including mesh build.
    pub last_generation_ms: f32,
    /// Profile the live galaxy was generated with.
    pub profile: SpinProfile,
    /// Requests rejected for invalid parameters.
    pub rejected: u32,
    /// Previous-galaxy releases that reported an error.
    pub failed_disposals: u32,
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers galaxy state, the regeneration pipeline, and the rotation.
///
/// `GalaxyConfig` is initialised to its defaults if not already present;
/// `config::load_galaxy_config` (added by the app) runs first when it exists.
/// `GalaxyTextures` starts empty; the app fills it with
/// `galaxy_rendering::load_galaxy_textures` when an asset server with image
/// support is available.
pub struct GalaxyPlugin;

impl Plugin for GalaxyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GalaxyConfig>()
            .init_resource::<GalaxySettings>()
            .init_resource::<GalaxyScene>()
            .init_resource::<GalaxyStats>()
            .init_resource::<GalaxyTextures>()
            .insert_resource(GalaxyRng::new(None))
            .add_message::<RegenerateGalaxy>()
            .add_systems(
                Startup,
                init_galaxy_state.after(config::load_galaxy_config),
            )
            .add_systems(
                Update,
                (regenerate_galaxy_system, rotate_galaxy_system).chain(),
            )
            .add_systems(Last, teardown_galaxy_system);
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Seed [`GalaxySettings`] and [`GalaxyRng`] from the loaded config, then
/// request the first galaxy.
pub fn init_galaxy_state(
    config: Res<GalaxyConfig>,
    mut settings: ResMut<GalaxySettings>,
    mut rng: ResMut<GalaxyRng>,
    mut requests: MessageWriter<RegenerateGalaxy>,
) {
    match config.parameters() {
        Ok(params) => settings.params = params,
        Err(err) => warn!("{err}; using default galaxy parameters"),
    }
    settings.profile = config.spin_profile;
    *rng = GalaxyRng::new(config.seed);

    requests.write(RegenerateGalaxy {
        reason: RegenerateReason::Startup,
    });
}

// ── Update ────────────────────────────────────────────────────────────────────

/// Rebuild the galaxy once per frame if any request arrived.
///
/// Runs synchronously: a million-point request blocks this frame for the
/// full generation.
#[allow(clippy::too_many_arguments)]
pub fn regenerate_galaxy_system(
    mut commands: Commands,
    mut requests: MessageReader<RegenerateGalaxy>,
    settings: Res<GalaxySettings>,
    config: Res<GalaxyConfig>,
    time: Res<Time>,
    textures: Res<GalaxyTextures>,
    mut rng: ResMut<GalaxyRng>,
    mut scene: ResMut<GalaxyScene>,
    mut stats: ResMut<GalaxyStats>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(request) = requests.read().last().copied() else {
        return;
    };

    let params = settings.params;
    let profile = settings.profile;
    let started = Instant::now();

    let mut host = BevySceneHost {
        commands: &mut commands,
        meshes: &mut meshes,
        materials: &mut materials,
        alpha_mask: textures.alpha_mask.clone(),
        rotation: galaxy_rotation(&*time, config.rotation_speed),
    };

    match scene
        .0
        .regenerate(&mut host, &params, profile.as_fn(), &mut rng.0)
    {
        Ok(live) => {
            stats.generations += 1;
            stats.point_count = live.point_count;
            stats.last_generation_ms = started.elapsed().as_secs_f32() * 1000.0;
            stats.profile = profile;
            stats.failed_disposals = scene.0.failed_disposals();
            info!(
                "Generated {} points ({}, {:?}) in {:.1} ms",
                stats.point_count,
                profile.label(),
                request.reason,
                stats.last_generation_ms
            );
        }
        Err(err) => {
            stats.rejected += 1;
            error!("Galaxy regeneration rejected: {err}");
        }
    }
}

/// Release the live galaxy when the app is shutting down.
pub fn teardown_galaxy_system(
    mut commands: Commands,
    mut exit: MessageReader<AppExit>,
    mut scene: ResMut<GalaxyScene>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if exit.read().next().is_none() {
        return;
    }
    let mut host = BevySceneHost {
        commands: &mut commands,
        meshes: &mut meshes,
        materials: &mut materials,
        alpha_mask: None,
        rotation: Quat::IDENTITY,
    };
    scene.0.dispose(&mut host);
    info!("Released galaxy on exit");
}
