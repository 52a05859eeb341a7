// Math utilities and helper functions

use glam::Vec2;

/// Rotate `point` around `pivot` by `angle` radians
pub fn rotate_around(point: Vec2, pivot: Vec2, angle: f32) -> Vec2 {
    pivot + Vec2::from_angle(angle).rotate(point - pivot)
}

/// Axis-aligned bounds (min, max) of a set of points
pub fn bounds(points: &[Vec2]) -> Option<(Vec2, Vec2)> {
    let first = *points.first()?;
    Some(
        points
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotate_around_quarter_turn() {
        let rotated = rotate_around(Vec2::new(2.0, 1.0), Vec2::new(1.0, 1.0), FRAC_PI_2);
        assert_relative_eq!(rotated.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(rotated.y, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_rotate_around_zero_angle_is_identity() {
        let p = Vec2::new(3.5, -2.0);
        assert_eq!(rotate_around(p, Vec2::new(7.0, 7.0), 0.0), p);
    }

    #[test]
    fn test_bounds() {
        let (min, max) = bounds(&[
            Vec2::new(1.0, 5.0),
            Vec2::new(-2.0, 3.0),
            Vec2::new(4.0, -1.0),
        ])
        .unwrap();
        assert_eq!(min, Vec2::new(-2.0, -1.0));
        assert_eq!(max, Vec2::new(4.0, 5.0));
        assert!(bounds(&[]).is_none());
    }
}
