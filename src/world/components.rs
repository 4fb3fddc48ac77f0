//! Components used by the world module.
use bevy::prelude::*;

const MAX_PITCH: f32 = 1.54;

/// Primary world camera, storing orientation state for mouse look.
#[derive(Component, Debug)]
pub struct FlyCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub move_speed: f32,
    pub look_sensitivity: f32,
}

impl FlyCamera {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(-MAX_PITCH, MAX_PITCH),
            move_speed: 10.0,
            look_sensitivity: 0.2,
        }
    }

    /// Applies a look delta (already scaled by sensitivity and time).
    pub fn look(&mut self, delta: Vec2) {
        self.yaw -= delta.x;
        self.pitch = (self.pitch - delta.y).clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub fn rotation(&self) -> Quat {
        (Quat::from_axis_angle(Vec3::Y, self.yaw) * Quat::from_axis_angle(Vec3::X, self.pitch))
            .normalize()
    }
}

/// Marker for the main directional light.
#[derive(Component, Default)]
pub struct PrimarySun;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped() {
        let mut camera = FlyCamera::new(0.0, 3.0);
        assert_eq!(camera.pitch, MAX_PITCH);

        camera.look(Vec2::new(0.0, 10.0));
        assert_eq!(camera.pitch, -MAX_PITCH);
    }

    #[test]
    fn zero_orientation_looks_down_negative_z() {
        let camera = FlyCamera::new(0.0, 0.0);
        let forward = camera.rotation() * Vec3::NEG_Z;
        assert!((forward - Vec3::NEG_Z).length() < 1e-5);
    }
}
