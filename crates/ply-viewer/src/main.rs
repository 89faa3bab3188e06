//! PLY mesh viewer.
//!
//! Decodes a PLY file at startup and renders it with a single directional
//! light. Drag with one finger (or the left mouse button) to orbit; pinch
//! (or scroll) to zoom.

mod camera;
mod gestures;
mod loader;
mod settings;

use bevy::prelude::*;
use clap::Parser;

use camera::OrbitCameraPlugin;
use loader::MeshLoaderPlugin;
use settings::{Args, ViewerSettings};

fn main() -> AppExit {
    tracing_subscriber::fmt::init();

    let settings = ViewerSettings::from(Args::parse());
    tracing::info!("Opening {}", settings.asset_path.display());

    App::new()
        .insert_resource(settings)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "PLY Viewer".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins((MeshLoaderPlugin, OrbitCameraPlugin))
        .run()
}
