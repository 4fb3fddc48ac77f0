//! World-to-screen projection and occlusion queries against the scene camera.
use bevy::{
    picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings},
    prelude::*,
};

const MIN_CLIP_W: f32 = 1e-6;

/// Camera-side collaborator of the pointer engine.
pub trait ProjectionSource {
    /// Projects a world point to `(x, y, depth)`; `x, y` are bottom-left-origin
    /// screen pixels and a negative depth means the point is behind the camera.
    /// `None` when the projection is degenerate for this point.
    fn project_to_screen(&self, world: Vec3) -> Option<Vec3>;

    /// True when scene geometry blocks the line of sight between the camera and `world`.
    fn is_occluded(&mut self, world: Vec3) -> bool;

    /// Full screen size in logical pixels.
    fn screen_size(&self) -> Vec2;
}

/// Projects `world` through a view and clip matrix into screen pixels.
///
/// Points behind the camera divide by a negative `w` and come out mirrored
/// through the screen center; callers correct for that using the depth sign.
pub fn project_world_to_screen(
    view_from_world: Mat4,
    clip_from_view: Mat4,
    screen_size: Vec2,
    world: Vec3,
) -> Option<Vec3> {
    let view = view_from_world.transform_point3(world);
    let clip = clip_from_view * view.extend(1.0);
    if clip.w.abs() < MIN_CLIP_W || !clip.is_finite() {
        return None;
    }

    let ndc = clip.truncate() / clip.w;
    let screen = (ndc.truncate() + Vec2::ONE) * 0.5 * screen_size;
    Some(screen.extend(-view.z))
}

/// Projection and occlusion backed by a Bevy camera and mesh ray casts.
pub struct CameraProjection<'a, 'w, 's> {
    camera: &'a Camera,
    camera_entity: Entity,
    camera_position: Vec3,
    view_from_world: Mat4,
    screen_size: Vec2,
    target: Entity,
    ray_cast: &'a mut MeshRayCast<'w, 's>,
}

impl<'a, 'w, 's> CameraProjection<'a, 'w, 's> {
    /// Returns `None` until the camera has a computed viewport.
    pub fn new(
        camera: &'a Camera,
        camera_entity: Entity,
        camera_transform: &GlobalTransform,
        target: Entity,
        ray_cast: &'a mut MeshRayCast<'w, 's>,
    ) -> Option<Self> {
        let screen_size = camera.logical_viewport_size()?;
        Some(Self {
            camera,
            camera_entity,
            camera_position: camera_transform.translation(),
            view_from_world: Mat4::from(camera_transform.affine().inverse()),
            screen_size,
            target,
            ray_cast,
        })
    }
}

impl ProjectionSource for CameraProjection<'_, '_, '_> {
    fn project_to_screen(&self, world: Vec3) -> Option<Vec3> {
        project_world_to_screen(
            self.view_from_world,
            self.camera.clip_from_view(),
            self.screen_size,
            world,
        )
    }

    fn is_occluded(&mut self, world: Vec3) -> bool {
        let to_camera = self.camera_position - world;
        let distance = to_camera.length();
        let Ok(direction) = Dir3::new(to_camera) else {
            return false;
        };

        let target = self.target;
        let camera_entity = self.camera_entity;
        let filter = |entity: Entity| entity != target && entity != camera_entity;
        let early_exit = |_: Entity| true;
        let settings = MeshRayCastSettings::default()
            .with_filter(&filter)
            .with_early_exit_test(&early_exit);

        self.ray_cast
            .cast_ray(Ray3d::new(world, direction), &settings)
            .iter()
            .any(|(_, hit)| hit.distance < distance)
    }

    fn screen_size(&self) -> Vec2 {
        self.screen_size
    }
}
