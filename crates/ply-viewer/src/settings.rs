//! Viewer configuration.
//!
//! Defaults suit a room-scale model centered on the origin. The asset path,
//! starting distance, and input rates can be overridden on the command line.

use std::path::PathBuf;

use bevy::prelude::*;
use clap::Parser;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(about = "View a PLY mesh with orbit and zoom controls")]
pub struct Args {
    /// PLY file to display.
    #[arg(long, default_value = "assets/room_model.ply")]
    pub asset: PathBuf,

    /// Initial camera distance from the model origin.
    #[arg(long)]
    pub distance: Option<f32>,

    /// Radians of orbit per pixel dragged.
    #[arg(long)]
    pub rotate_sensitivity: Option<f32>,

    /// Distance change per pixel of pinch or wheel movement.
    #[arg(long)]
    pub zoom_step: Option<f32>,
}

/// Settings for loading and orbiting the model.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ViewerSettings {
    /// PLY file decoded at startup.
    pub asset_path: PathBuf,
    /// Camera distance when the viewer opens.
    pub initial_distance: f32,
    /// Closest the camera may zoom.
    pub min_distance: f32,
    /// Farthest the camera may zoom.
    pub max_distance: f32,
    /// Orbit radians per pixel of drag.
    pub rotate_sensitivity: f32,
    /// Pitch is clamped to `±pitch_limit` radians.
    pub pitch_limit: f32,
    /// Distance change per pixel of zoom input.
    pub zoom_step: f32,
    /// Pinch changes at or below this many pixels are ignored.
    pub pinch_threshold: f32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            asset_path: PathBuf::from("assets/room_model.ply"),
            initial_distance: 2.5,
            min_distance: 1.5,
            max_distance: 8.0,
            rotate_sensitivity: 0.01,
            pitch_limit: 1.2,
            zoom_step: 0.05,
            pinch_threshold: 5.0,
        }
    }
}

impl From<Args> for ViewerSettings {
    fn from(args: Args) -> Self {
        let defaults = Self::default();
        let initial_distance = args
            .distance
            .unwrap_or(defaults.initial_distance)
            .clamp(defaults.min_distance, defaults.max_distance);

        Self {
            asset_path: args.asset,
            initial_distance,
            rotate_sensitivity: args
                .rotate_sensitivity
                .unwrap_or(defaults.rotate_sensitivity),
            zoom_step: args.zoom_step.unwrap_or(defaults.zoom_step),
            ..defaults
        }
    }
}
