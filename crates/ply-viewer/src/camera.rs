//! Orbit camera controller.
//!
//! The camera circles the model origin on a sphere described by yaw, pitch,
//! and distance. Gesture systems accumulate deltas into [`OrbitInput`], which
//! is applied once per frame.

use bevy::prelude::*;

use crate::gestures::{self, OrbitInput, PinchTracker};
use crate::settings::ViewerSettings;

/// Vertical field of view in degrees.
const FOV_DEGREES: f32 = 60.0;

/// Plugin for orbit and zoom camera controls.
pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitInput>()
            .init_resource::<PinchTracker>()
            .add_systems(Startup, spawn_camera)
            .add_systems(
                Update,
                (
                    gestures::touch_gestures,
                    gestures::mouse_gestures,
                    apply_orbit_input,
                )
                    .chain(),
            );
    }
}

/// Camera position on a sphere around the origin.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Rotation around the vertical axis in radians.
    pub yaw: f32,
    /// Elevation above the horizontal plane in radians.
    pub pitch: f32,
    /// Distance from the origin.
    pub distance: f32,
}

impl OrbitCamera {
    #[must_use]
    pub fn new(distance: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance,
        }
    }

    /// Orbit by a drag of `delta` pixels.
    pub fn rotate(&mut self, delta: Vec2, settings: &ViewerSettings) {
        self.yaw += delta.x * settings.rotate_sensitivity;
        self.pitch = (self.pitch + delta.y * settings.rotate_sensitivity)
            .clamp(-settings.pitch_limit, settings.pitch_limit);
    }

    /// Move away from the origin by `amount` pixels of zoom input.
    ///
    /// Negative amounts move closer.
    pub fn zoom(&mut self, amount: f32, settings: &ViewerSettings) {
        self.distance = (self.distance + amount * settings.zoom_step)
            .clamp(settings.min_distance, settings.max_distance);
    }

    /// Eye position in world space.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    /// Transform looking from [`Self::eye`] at the origin with +Y up.
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(Vec3::ZERO, Vec3::Y)
    }
}

#[allow(clippy::needless_pass_by_value)]
fn spawn_camera(mut commands: Commands, settings: Res<ViewerSettings>) {
    let orbit = OrbitCamera::new(settings.initial_distance);
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            near: 0.1,
            far: 500.0,
            ..default()
        }),
        orbit.transform(),
        orbit,
    ));
}

/// Apply this frame's accumulated gesture input to the camera.
#[allow(clippy::needless_pass_by_value)]
fn apply_orbit_input(
    settings: Res<ViewerSettings>,
    mut input: ResMut<OrbitInput>,
    mut query: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let OrbitInput { rotate, zoom } = input.take();
    if rotate == Vec2::ZERO && zoom == 0.0 {
        return;
    }

    for (mut orbit, mut transform) in &mut query {
        orbit.rotate(rotate, &settings);
        orbit.zoom(zoom, &settings);
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.abs_diff_eq(b, 1e-5)
    }

    #[test]
    fn starts_on_positive_z_axis() {
        let orbit = OrbitCamera::new(2.5);
        assert!(approx(orbit.eye(), Vec3::new(0.0, 0.0, 2.5)));
    }

    #[test]
    fn yaw_swings_around_vertical_axis() {
        let settings = ViewerSettings::default();
        let mut orbit = OrbitCamera::new(2.0);
        // 157 px at 0.01 rad/px is about a quarter turn.
        orbit.rotate(Vec2::new(157.079_63, 0.0), &settings);
        assert!(approx(orbit.eye(), Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn pitch_is_clamped() {
        let settings = ViewerSettings::default();
        let mut orbit = OrbitCamera::new(2.5);
        orbit.rotate(Vec2::new(0.0, 10_000.0), &settings);
        assert!((orbit.pitch - settings.pitch_limit).abs() < f32::EPSILON);
        orbit.rotate(Vec2::new(0.0, -20_000.0), &settings);
        assert!((orbit.pitch + settings.pitch_limit).abs() < f32::EPSILON);
    }

    #[test]
    fn zoom_is_clamped_to_distance_range() {
        let settings = ViewerSettings::default();
        let mut orbit = OrbitCamera::new(2.5);

        orbit.zoom(10.0, &settings);
        assert!((orbit.distance - 3.0).abs() < 1e-6);

        orbit.zoom(-1_000.0, &settings);
        assert!((orbit.distance - settings.min_distance).abs() < f32::EPSILON);

        orbit.zoom(1_000.0, &settings);
        assert!((orbit.distance - settings.max_distance).abs() < f32::EPSILON);
    }

    #[test]
    fn transform_looks_at_origin() {
        let mut orbit = OrbitCamera::new(3.0);
        orbit.yaw = 0.7;
        orbit.pitch = 0.4;
        let transform = orbit.transform();
        let toward_origin = (-transform.translation).normalize();
        assert!(approx(*transform.forward(), toward_origin));
    }

    #[test]
    fn input_is_applied_once() {
        let mut app = App::new();
        app.insert_resource(ViewerSettings::default())
            .insert_resource(OrbitInput {
                rotate: Vec2::new(10.0, 0.0),
                zoom: 0.0,
            })
            .add_systems(Update, apply_orbit_input);
        let camera = app.world_mut().spawn((OrbitCamera::new(2.5), Transform::default())).id();

        app.update();
        app.update();

        let orbit = app.world().get::<OrbitCamera>(camera).unwrap();
        assert!((orbit.yaw - 0.1).abs() < 1e-6);
        let transform = app.world().get::<Transform>(camera).unwrap();
        assert!(approx(transform.translation, orbit.eye()));
    }
}
