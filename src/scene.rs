//! Ownership of the single live galaxy.
//!
//! ## Design
//!
//! The scene holds at most one galaxy.  [`GalaxySlot`] is the only place that
//! replaces it, always in the same order:
//!
//! 1. validate the new parameters (an invalid request leaves the old galaxy
//!    untouched),
//! 2. release the previous galaxy through [`SceneHost::remove_from_scene`],
//! 3. generate the new point set,
//! 4. install it through [`SceneHost::add_to_scene`].
//!
//! The slot is generic over the host's object type so the lifecycle logic is
//! testable without a renderer; [`BevySceneHost`] is the ECS-backed host used
//! by the app, and [`GalaxyScene`] is the resource wrapping the Bevy slot.

use crate::error::{GalaxyError, GalaxyResult};
use crate::galaxy_rendering::{points_material, points_mesh};
use crate::generator::{generate_galaxy, GeneratedGalaxy};
use crate::params::GalaxyParameters;
use bevy::prelude::*;
use rand::Rng;

// ── Host seam ─────────────────────────────────────────────────────────────────

/// Renderer/scene collaborator: turns generated points into a scene object
/// and releases it again.
pub trait SceneHost {
    /// Handle to whatever the host created for one galaxy.
    type Object;

    /// Build renderer resources for `galaxy` and add them to the scene.
    fn add_to_scene(&mut self, galaxy: &GeneratedGalaxy) -> Self::Object;

    /// Release `object`'s renderer resources and remove it from the scene.
    fn remove_from_scene(&mut self, object: Self::Object) -> GalaxyResult<()>;
}

// ── Slot ──────────────────────────────────────────────────────────────────────

/// Holder of at most one live scene object.
#[derive(Debug)]
pub struct GalaxySlot<T> {
    live: Option<T>,
    installs: u64,
    failed_disposals: u32,
}

impl<T> Default for GalaxySlot<T> {
    fn default() -> Self {
        Self {
            live: None,
            installs: 0,
            failed_disposals: 0,
        }
    }
}

impl<T> GalaxySlot<T> {
    /// The currently installed object, if any.
    pub fn live(&self) -> Option<&T> {
        self.live.as_ref()
    }

    /// Total number of galaxies installed over the slot's lifetime.
    pub fn installs(&self) -> u64 {
        self.installs
    }

    /// Number of releases that reported an error.
    pub fn failed_disposals(&self) -> u32 {
        self.failed_disposals
    }

    /// Validate, release the previous galaxy, generate, and install.
    ///
    /// On an invalid `params` the previous galaxy stays live and the error is
    /// returned.  A failed release is logged and counted; the new galaxy is
    /// installed regardless.
    pub fn regenerate<H, F, R>(
        &mut self,
        host: &mut H,
        params: &GalaxyParameters,
        spin_profile: F,
        rng: &mut R,
    ) -> GalaxyResult<&T>
    where
        H: SceneHost<Object = T>,
        F: Fn(f32, f32) -> f32,
        R: Rng,
    {
        params.validate()?;
        self.dispose(host);
        let galaxy = generate_galaxy(params, spin_profile, rng)?;
        Ok(self.install(host, &galaxy))
    }

    /// Release the live galaxy, if there is one.
    pub fn dispose<H: SceneHost<Object = T>>(&mut self, host: &mut H) {
        let Some(previous) = self.live.take() else {
            return;
        };
        if let Err(err) = host.remove_from_scene(previous) {
            self.failed_disposals += 1;
            warn!("{err}; installing the new galaxy anyway");
        }
    }

    /// Install `galaxy` into an empty slot.
    fn install<H: SceneHost<Object = T>>(&mut self, host: &mut H, galaxy: &GeneratedGalaxy) -> &T {
        debug_assert!(self.live.is_none(), "dispose must run before install");
        self.installs += 1;
        self.live.insert(host.add_to_scene(galaxy))
    }
}

// ── Bevy host ─────────────────────────────────────────────────────────────────

/// Marker + point count on the entity that renders the live galaxy.
#[derive(Component, Debug, Clone, Copy)]
pub struct GalaxyPoints {
    pub count: usize,
}

/// Renderer-owned resources of one installed galaxy.
///
/// Empty galaxies get an entity but no mesh or material.
#[derive(Debug, Clone)]
pub struct LiveGalaxy {
    pub entity: Entity,
    pub mesh: Option<Handle<Mesh>>,
    pub material: Option<Handle<StandardMaterial>>,
    pub point_count: usize,
}

/// The app's single galaxy slot.
#[derive(Resource, Debug, Default)]
pub struct GalaxyScene(pub GalaxySlot<LiveGalaxy>);

/// [`SceneHost`] backed by ECS commands and asset storage.
///
/// Despawns and spawns are queued on the same command buffer, in call order,
/// so the previous galaxy leaves the world before the new one enters it.
pub struct BevySceneHost<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<StandardMaterial>,
    /// Sprite alpha mask applied to every new material.
    pub alpha_mask: Option<Handle<Image>>,
    /// Initial orientation of newly installed galaxies, so a replacement
    /// continues the rotation instead of snapping back.
    pub rotation: Quat,
}

impl SceneHost for BevySceneHost<'_, '_, '_> {
    type Object = LiveGalaxy;

    fn add_to_scene(&mut self, galaxy: &GeneratedGalaxy) -> LiveGalaxy {
        let marker = GalaxyPoints {
            count: galaxy.len(),
        };
        let transform = Transform::from_rotation(self.rotation);

        if galaxy.is_empty() {
            let entity = self
                .commands
                .spawn((marker, transform, Visibility::default()))
                .id();
            return LiveGalaxy {
                entity,
                mesh: None,
                material: None,
                point_count: 0,
            };
        }

        let mesh = self.meshes.add(points_mesh(galaxy));
        let material = self.materials.add(points_material(self.alpha_mask.clone()));
        let entity = self
            .commands
            .spawn((
                marker,
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                transform,
                Visibility::default(),
            ))
            .id();

        LiveGalaxy {
            entity,
            mesh: Some(mesh),
            material: Some(material),
            point_count: galaxy.len(),
        }
    }

    fn remove_from_scene(&mut self, object: LiveGalaxy) -> GalaxyResult<()> {
        let mut result = Ok(());

        if let Some(mesh) = &object.mesh {
            if self.meshes.remove(mesh).is_none() {
                result = Err(GalaxyError::ResourceDisposal {
                    context: "release galaxy mesh",
                });
            }
        }
        if let Some(material) = &object.material {
            if self.materials.remove(material).is_none() {
                result = Err(GalaxyError::ResourceDisposal {
                    context: "release galaxy material",
                });
            }
        }

        match self.commands.get_entity(object.entity) {
            Ok(mut entity) => entity.despawn(),
            Err(_) => {
                result = Err(GalaxyError::ResourceDisposal {
                    context: "despawn galaxy entity",
                });
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spin::SpinProfile;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Records every add/remove; can be told to fail the next removal.
    #[derive(Default)]
    struct RecordingHost {
        next_id: u32,
        in_scene: Vec<u32>,
        added: Vec<(u32, usize)>,
        removed: Vec<u32>,
        fail_next_removal: bool,
    }

    impl SceneHost for RecordingHost {
        type Object = u32;

        fn add_to_scene(&mut self, galaxy: &GeneratedGalaxy) -> u32 {
            self.next_id += 1;
            self.in_scene.push(self.next_id);
            self.added.push((self.next_id, galaxy.len()));
            self.next_id
        }

        fn remove_from_scene(&mut self, object: u32) -> GalaxyResult<()> {
            if std::mem::take(&mut self.fail_next_removal) {
                return Err(GalaxyError::ResourceDisposal {
                    context: "test failure",
                });
            }
            self.in_scene.retain(|&id| id != object);
            self.removed.push(object);
            Ok(())
        }
    }

    fn small_params() -> GalaxyParameters {
        GalaxyParameters {
            count: 200,
            ..Default::default()
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn first_regeneration_removes_nothing() {
        let mut slot = GalaxySlot::default();
        let mut host = RecordingHost::default();
        let live = *slot
            .regenerate(&mut host, &small_params(), SpinProfile::Sine.as_fn(), &mut rng())
            .unwrap();
        assert_eq!(live, 1);
        assert!(host.removed.is_empty());
        assert_eq!(host.added, vec![(1, 200)]);
    }

    #[test]
    fn regenerating_twice_leaves_exactly_one_live_galaxy() {
        let mut slot = GalaxySlot::default();
        let mut host = RecordingHost::default();
        let params = small_params();

        slot.regenerate(&mut host, &params, SpinProfile::Sine.as_fn(), &mut rng())
            .unwrap();
        slot.regenerate(&mut host, &params, SpinProfile::Sine.as_fn(), &mut rng())
            .unwrap();

        assert_eq!(host.in_scene, vec![2], "only the second galaxy remains");
        assert_eq!(host.removed, vec![1], "the first galaxy was released");
        assert_eq!(slot.live(), Some(&2));
        assert_eq!(slot.installs(), 2);
    }

    #[test]
    fn many_regenerations_never_leak() {
        let mut slot = GalaxySlot::default();
        let mut host = RecordingHost::default();
        for _ in 0..25 {
            slot.regenerate(&mut host, &small_params(), SpinProfile::Linear.as_fn(), &mut rng())
                .unwrap();
            assert_eq!(host.in_scene.len(), 1);
        }
        assert_eq!(host.removed.len(), 24);
    }

    #[test]
    fn invalid_parameters_keep_previous_galaxy() {
        let mut slot = GalaxySlot::default();
        let mut host = RecordingHost::default();
        slot.regenerate(&mut host, &small_params(), SpinProfile::Sine.as_fn(), &mut rng())
            .unwrap();

        let bad = GalaxyParameters {
            radius: f32::NAN,
            ..small_params()
        };
        let err = slot
            .regenerate(&mut host, &bad, SpinProfile::Sine.as_fn(), &mut rng())
            .unwrap_err();
        assert!(matches!(err, GalaxyError::InvalidParameter { name: "radius", .. }));
        assert_eq!(slot.live(), Some(&1));
        assert_eq!(host.in_scene, vec![1]);
        assert!(host.removed.is_empty());
    }

    #[test]
    fn failed_disposal_still_installs_new_galaxy() {
        let mut slot = GalaxySlot::default();
        let mut host = RecordingHost::default();
        slot.regenerate(&mut host, &small_params(), SpinProfile::Sine.as_fn(), &mut rng())
            .unwrap();

        host.fail_next_removal = true;
        slot.regenerate(&mut host, &small_params(), SpinProfile::Sine.as_fn(), &mut rng())
            .unwrap();

        assert_eq!(slot.live(), Some(&2));
        assert_eq!(slot.failed_disposals(), 1);
    }

    #[test]
    fn dispose_empties_the_slot() {
        let mut slot = GalaxySlot::default();
        let mut host = RecordingHost::default();
        slot.regenerate(&mut host, &small_params(), SpinProfile::Sine.as_fn(), &mut rng())
            .unwrap();
        slot.dispose(&mut host);
        assert!(slot.live().is_none());
        assert!(host.in_scene.is_empty());

        // Disposing an empty slot is a no-op.
        slot.dispose(&mut host);
        assert_eq!(host.removed, vec![1]);
    }

    #[test]
    fn empty_galaxy_is_installed() {
        let mut slot = GalaxySlot::default();
        let mut host = RecordingHost::default();
        let params = GalaxyParameters {
            count: 0,
            ..Default::default()
        };
        slot.regenerate(&mut host, &params, SpinProfile::Sine.as_fn(), &mut rng())
            .unwrap();
        assert_eq!(host.added, vec![(1, 0)]);
    }
}
