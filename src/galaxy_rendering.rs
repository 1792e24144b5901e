//! GPU-side representation of a generated galaxy.
//!
//! A galaxy is a single `Mesh3d`.  Every point becomes a small star sprite:
//! three mutually perpendicular quads of side `point_size` centred on the
//! point, so the sprite has visible area from any viewing angle and shrinks
//! with distance like any other world-space geometry.  Each quad carries UVs
//! for the optional alpha-mask texture and the point's linear vertex color.
//!
//! The material is unlit, double-sided and additively blended so dense arm
//! cores glow brighter than the sparse rim, without any lighting setup.

use crate::config::GalaxyConfig;
use crate::generator::GeneratedGalaxy;
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};

/// Quads per point sprite.
pub const QUADS_PER_POINT: usize = 3;
/// Vertices per point sprite.
pub const VERTICES_PER_POINT: usize = QUADS_PER_POINT * 4;
/// Indices per point sprite.
pub const INDICES_PER_POINT: usize = QUADS_PER_POINT * 6;

/// (u, v) axes spanning each sprite quad: the XY, ZY and XZ planes.
const SPRITE_PLANES: [(Vec3, Vec3); QUADS_PER_POINT] =
    [(Vec3::X, Vec3::Y), (Vec3::Z, Vec3::Y), (Vec3::X, Vec3::Z)];

/// Unit quad corners (in axis units) and their texture coordinates.
const QUAD_CORNERS: [([f32; 2], [f32; 2]); 4] = [
    ([-0.5, -0.5], [0.0, 1.0]),
    ([0.5, -0.5], [1.0, 1.0]),
    ([0.5, 0.5], [1.0, 0.0]),
    ([-0.5, 0.5], [0.0, 0.0]),
];

/// Optional alpha-mask texture shared by every galaxy material.
#[derive(Resource, Debug, Clone, Default)]
pub struct GalaxyTextures {
    pub alpha_mask: Option<Handle<Image>>,
}

/// Startup system: load the configured alpha mask, if any.
///
/// A missing or undecodable file only changes the look: the material then
/// samples Bevy's placeholder image and the sprites render as solid squares.
///
/// Must be ordered after [`crate::config::load_galaxy_config`].
pub fn load_galaxy_textures(
    config: Res<GalaxyConfig>,
    asset_server: Res<AssetServer>,
    mut textures: ResMut<GalaxyTextures>,
) {
    if let Some(path) = &config.alpha_mask {
        textures.alpha_mask = Some(asset_server.load(path.clone()));
        info!("[SETUP] Particle alpha mask requested from {path}");
    }
}

/// Build the sprite mesh for a generated galaxy.
///
/// Colors are expanded to RGBA with full alpha; additive blending handles the
/// accumulation.
pub fn points_mesh(galaxy: &GeneratedGalaxy) -> Mesh {
    let n = galaxy.len();
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(n * VERTICES_PER_POINT);
    let mut colors: Vec<[f32; 4]> = Vec::with_capacity(n * VERTICES_PER_POINT);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(n * VERTICES_PER_POINT);
    let mut indices: Vec<u32> = Vec::with_capacity(n * INDICES_PER_POINT);

    for (center, &[r, g, b]) in galaxy.positions.iter().zip(&galaxy.colors) {
        for (u_axis, v_axis) in SPRITE_PLANES {
            let base = positions.len() as u32;
            for ([cu, cv], uv) in QUAD_CORNERS {
                let offset = (u_axis * cu + v_axis * cv) * galaxy.point_size;
                positions.push((*center + offset).to_array());
                colors.push([r, g, b, 1.0]);
                uvs.push(uv);
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Unlit, additive, double-sided material for the point sprites.
///
/// The base color is white so the per-vertex colors pass through untouched;
/// `alpha_mask` (if any) modulates each sprite into a soft disc.
pub fn points_material(alpha_mask: Option<Handle<Image>>) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: alpha_mask,
        unlit: true,
        alpha_mode: AlphaMode::Add,
        cull_mode: None,
        double_sided: true,
        ..default()
    }
}
