//! Systems for the world module.
use bevy::{
    ecs::message::MessageReader,
    input::{mouse::MouseMotion, ButtonInput},
    math::primitives::Plane3d,
    prelude::*,
    window::{CursorGrabMode, CursorOptions},
};

use crate::{
    pointer::PointerCamera,
    world::components::{FlyCamera, PrimarySun},
};

const GROUND_SCALE: f32 = 100.0;
const CAMERA_START_POS: Vec3 = Vec3::new(-12.0, 8.0, 16.0);
const SPRINT_MULTIPLIER: f32 = 2.5;

/// Center and size of each occluding block. The first one hides "Behind the
/// wall" from the starting camera position.
const OBSTACLES: [(Vec3, Vec3); 3] = [
    (Vec3::new(-3.0, 2.5, 6.0), Vec3::new(6.0, 5.0, 1.0)),
    (Vec3::new(10.0, 3.0, -2.0), Vec3::new(1.5, 6.0, 1.5)),
    (Vec3::new(-10.0, 1.5, -6.0), Vec3::new(4.0, 3.0, 4.0)),
];

/// Spawns the scene: ground plane, light, obstacles, and the fly camera.
pub fn spawn_world_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Mesh::from(Plane3d::default()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(90, 140, 90),
            perceptual_roughness: 0.9,
            metallic: 0.0,
            ..default()
        })),
        Transform::from_scale(Vec3::splat(GROUND_SCALE)),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 20_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(16.0, 32.0, 16.0).looking_at(Vec3::ZERO, Vec3::Y),
        PrimarySun,
    ));

    let obstacle_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(140, 120, 100),
        perceptual_roughness: 0.8,
        ..default()
    });
    for (center, size) in OBSTACLES {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(obstacle_material.clone()),
            Transform::from_translation(center),
            Name::new("Obstacle"),
        ));
    }

    let camera_transform =
        Transform::from_translation(CAMERA_START_POS).looking_at(Vec3::ZERO, Vec3::Y);
    let (yaw, pitch) = yaw_pitch_from_transform(&camera_transform);

    commands.spawn((
        Camera3d::default(),
        camera_transform,
        FlyCamera::new(yaw, pitch),
        PointerCamera,
    ));

    info!("World spawned with {} obstacles", OBSTACLES.len());
}

/// Toggles cursor grab when engaging the fly camera look mode.
pub fn update_cursor_grab(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut cursor_options: Single<&mut CursorOptions>,
) {
    if mouse_buttons.just_pressed(MouseButton::Right) {
        cursor_options.visible = false;
        cursor_options.grab_mode = CursorGrabMode::Locked;
    } else if mouse_buttons.just_released(MouseButton::Right) {
        cursor_options.visible = true;
        cursor_options.grab_mode = CursorGrabMode::None;
    }
}

/// Applies mouse look while the right mouse button is held.
pub fn fly_camera_mouse_look(
    mut motion_events: MessageReader<MouseMotion>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    mut query: Query<(&mut FlyCamera, &mut Transform)>,
) {
    let cumulative_delta: Vec2 = motion_events.read().map(|ev| ev.delta).sum();

    if !mouse_buttons.pressed(MouseButton::Right) || cumulative_delta == Vec2::ZERO {
        return;
    }

    if let Ok((mut fly_cam, mut transform)) = query.single_mut() {
        let scale = fly_cam.look_sensitivity * time.delta_secs();
        fly_cam.look(cumulative_delta * scale);
        transform.rotation = fly_cam.rotation();
    }
}

/// Moves the fly camera using WASD + Space/LShift, with LCtrl to sprint.
pub fn fly_camera_translate(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut query: Query<(&FlyCamera, &mut Transform)>,
) {
    let Ok((fly_cam, mut transform)) = query.single_mut() else {
        return;
    };

    let direction = movement_direction(&transform, |key| keyboard.pressed(key));
    if direction == Vec3::ZERO {
        return;
    }

    let modifier = if keyboard.pressed(KeyCode::ControlLeft) {
        SPRINT_MULTIPLIER
    } else {
        1.0
    };
    transform.translation += direction * fly_cam.move_speed * modifier * time.delta_secs();
}

/// Normalized movement direction on the ground plane plus vertical input.
fn movement_direction(transform: &Transform, pressed: impl Fn(KeyCode) -> bool) -> Vec3 {
    let flatten = |v: Vec3| Vec3::new(v.x, 0.0, v.z).normalize_or_zero();
    let forward = flatten(transform.forward().as_vec3());
    let right = flatten(transform.right().as_vec3());

    let bindings = [
        (KeyCode::KeyW, forward),
        (KeyCode::KeyS, -forward),
        (KeyCode::KeyA, -right),
        (KeyCode::KeyD, right),
        (KeyCode::Space, Vec3::Y),
        (KeyCode::ShiftLeft, Vec3::NEG_Y),
    ];

    bindings
        .into_iter()
        .filter(|(key, _)| pressed(*key))
        .map(|(_, axis)| axis)
        .sum::<Vec3>()
        .normalize_or_zero()
}

fn yaw_pitch_from_transform(transform: &Transform) -> (f32, f32) {
    let forward = transform.forward().as_vec3();
    let yaw = (-forward.x).atan2(-forward.z);
    let pitch = forward.y.asin();
    (yaw, pitch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaw_pitch_round_trips_through_fly_camera() {
        let transform =
            Transform::from_translation(CAMERA_START_POS).looking_at(Vec3::ZERO, Vec3::Y);
        let (yaw, pitch) = yaw_pitch_from_transform(&transform);
        let rebuilt = FlyCamera::new(yaw, pitch).rotation() * Vec3::NEG_Z;
        assert!((rebuilt - transform.forward().as_vec3()).length() < 1e-4);
    }

    #[test]
    fn wall_blocks_starting_view_of_hidden_point() {
        use bevy::math::bounding::{Aabb3d, RayCast3d};

        use crate::poi::config::PoiSettings;

        let hidden = PoiSettings::default()
            .points
            .into_iter()
            .find(|point| point.label == "Behind the wall")
            .expect("default layout has a hidden point");
        let to_point = hidden.position - CAMERA_START_POS;
        let sight = RayCast3d::new(
            CAMERA_START_POS,
            Dir3::new(to_point).expect("non-zero sight line"),
            to_point.length(),
        );

        let (center, size) = OBSTACLES[0];
        let wall = Aabb3d::new(center, size / 2.0);
        assert!(sight.aabb_intersection_at(&wall).is_some());
    }

    #[test]
    fn opposing_keys_cancel() {
        let transform = Transform::default();
        let direction = movement_direction(&transform, |key| {
            matches!(key, KeyCode::KeyW | KeyCode::KeyS)
        });
        assert_eq!(direction, Vec3::ZERO);
    }

    #[test]
    fn diagonal_movement_is_normalized() {
        let transform = Transform::default();
        let direction = movement_direction(&transform, |key| {
            matches!(key, KeyCode::KeyW | KeyCode::KeyD)
        });
        assert!((direction.length() - 1.0).abs() < 1e-5);
        assert!(direction.z < 0.0);
        assert!(direction.x > 0.0);
    }
}
