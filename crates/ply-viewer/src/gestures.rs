//! Touch and mouse gesture handling.
//!
//! - One finger drag: orbit
//! - Two finger pinch: zoom
//! - Mouse: left-drag to orbit, wheel to zoom

use bevy::ecs::message::MessageReader;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::input::touch::Touches;
use bevy::prelude::*;

use crate::settings::ViewerSettings;

/// Approximate pixels scrolled per wheel notch.
const PIXELS_PER_LINE: f32 = 20.0;

/// Camera deltas accumulated from gestures during a frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitInput {
    /// Drag distance in pixels.
    pub rotate: Vec2,
    /// Zoom amount in pixels; positive moves the camera away.
    pub zoom: f32,
}

impl OrbitInput {
    /// Return the accumulated input and reset it.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

/// Tracks finger separation across frames of a two-finger pinch.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PinchTracker {
    baseline: Option<f32>,
}

impl PinchTracker {
    /// Feed the current finger positions.
    ///
    /// Returns a zoom amount once the separation has changed by more than
    /// `threshold` pixels since the last reported zoom. Spreading the fingers
    /// yields a negative amount, moving the camera closer.
    pub fn update(&mut self, first: Vec2, second: Vec2, threshold: f32) -> Option<f32> {
        let separation = first.distance(second);
        let Some(baseline) = self.baseline else {
            self.baseline = Some(separation);
            return None;
        };

        let change = separation - baseline;
        if change.abs() > threshold {
            self.baseline = Some(separation);
            Some(-change)
        } else {
            None
        }
    }

    /// Forget the baseline when the pinch ends.
    pub fn reset(&mut self) {
        self.baseline = None;
    }
}

/// Translate active touches into orbit input.
#[allow(clippy::needless_pass_by_value)]
pub fn touch_gestures(
    touches: Res<Touches>,
    settings: Res<ViewerSettings>,
    mut pinch: ResMut<PinchTracker>,
    mut input: ResMut<OrbitInput>,
) {
    let active: Vec<_> = touches.iter().collect();
    match active.as_slice() {
        [finger] => {
            pinch.reset();
            input.rotate += finger.delta();
        }
        [first, second] => {
            if let Some(zoom) =
                pinch.update(first.position(), second.position(), settings.pinch_threshold)
            {
                input.zoom += zoom;
            }
        }
        _ => pinch.reset(),
    }
}

/// Desktop fallback: left-drag orbits, the wheel zooms.
#[allow(clippy::needless_pass_by_value)]
pub fn mouse_gestures(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: MessageReader<MouseMotion>,
    mut wheel: MessageReader<MouseWheel>,
    mut input: ResMut<OrbitInput>,
) {
    let drag: Vec2 = motion.read().map(|event| event.delta).sum();
    if buttons.pressed(MouseButton::Left) {
        input.rotate += drag;
    }

    for event in wheel.read() {
        let pixels = match event.unit {
            MouseScrollUnit::Line => event.y * PIXELS_PER_LINE,
            MouseScrollUnit::Pixel => event.y,
        };
        // Scrolling up zooms in.
        input.zoom -= pixels;
    }
}
