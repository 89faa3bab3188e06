//! Startup loading of the PLY model into the scene.
//!
//! Decoding is synchronous: the model must be in place before the first
//! frame, and a decode failure ends the app since the asset cannot change
//! between attempts.

use bevy::asset::RenderAssetUsages;
use bevy::ecs::message::MessageWriter;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use ply_decode::DecodedModel;

use crate::settings::ViewerSettings;

/// Plugin that decodes the configured asset and spawns it with lighting.
pub struct MeshLoaderPlugin;

impl Plugin for MeshLoaderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, (spawn_light, load_model));
    }
}

/// Marker for the entity holding the decoded model.
#[derive(Component)]
pub struct LoadedModel;

/// Convert decoded buffers into a Bevy triangle-list mesh.
#[must_use]
pub fn to_bevy_mesh(model: &DecodedModel<u32>) -> Mesh {
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, triples(&model.position_buffer))
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, triples(&model.normal_buffer))
        .with_inserted_indices(Indices::U32(model.index_buffer.clone()))
}

fn triples(flat: &[f32]) -> Vec<[f32; 3]> {
    flat.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect()
}

fn spawn_light(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(0.4, 1.0, 0.3).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Decode the asset and spawn it, or exit with an error.
#[allow(clippy::needless_pass_by_value)]
fn load_model(
    mut commands: Commands,
    settings: Res<ViewerSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut exit: MessageWriter<AppExit>,
) {
    let path = &settings.asset_path;
    let model = match ply_decode::load_mesh_from_path::<u32>(path) {
        Ok(model) => model,
        Err(e) => {
            tracing::error!("Failed to load '{}': {}", path.display(), e);
            exit.write(AppExit::error());
            return;
        }
    };

    tracing::info!(
        "Loaded '{}': {} vertices, {} triangles",
        path.display(),
        model.vertex_count(),
        model.triangle_count
    );
    if let Some(bounds) = model.bounding_box() {
        tracing::debug!(
            "Model bounds: center={}, radius={:.3}",
            bounds.center(),
            bounds.radius()
        );
    }

    commands.spawn((
        Mesh3d(meshes.add(to_bevy_mesh(&model))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.7, 0.7, 0.7),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::IDENTITY,
        LoadedModel,
    ));
}
