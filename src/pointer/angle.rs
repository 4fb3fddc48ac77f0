//! Rotation of the indicator from a screen-space direction.
use bevy::math::Vec2;

/// Returns the indicator rotation, in degrees, that makes its forward axis
/// (screen +X, with +Y pointing up) face along `direction`.
///
/// The result lies in `(-180, 180]`, counter-clockwise positive.
///
/// `direction` must be normalized and non-zero. The engine only passes
/// `(viewport center - screen position)` for positions that failed the
/// on-screen test or are obscured, so the zero vector never reaches here.
pub fn angle_from_direction(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn cardinal_axes() {
        assert_close(angle_from_direction(Vec2::X), 0.0);
        assert_close(angle_from_direction(Vec2::Y), 90.0);
        assert_close(angle_from_direction(Vec2::NEG_X), 180.0);
        assert_close(angle_from_direction(Vec2::NEG_Y), -90.0);
    }

    #[test]
    fn diagonals() {
        let up_left = Vec2::new(-1.0, 1.0).normalize();
        assert_close(angle_from_direction(up_left), 135.0);

        let down_right = Vec2::new(1.0, -1.0).normalize();
        assert_close(angle_from_direction(down_right), -45.0);
    }
}
