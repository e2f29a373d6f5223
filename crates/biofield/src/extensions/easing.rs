// extensions/easing.rs
//
// Frame-rate independent interpolation helpers.
// Pure math; nothing here touches the scene.

use glam::Vec2;

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec2 values.
#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Fraction of the remaining gap closed in `dt` frames, given the fraction
/// `rate` closed in one nominal frame: `1 - (1 - rate)^dt`.
#[inline]
pub fn damp_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (1.0 - rate.clamp(0.0, 1.0)).powf(dt.max(0.0))
}

/// Exponentially approach `target` from `current`.
#[inline]
pub fn approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    lerp(current, target, damp_factor(rate, dt))
}

/// Exponentially approach a Vec2 target.
#[inline]
pub fn approach_vec2(current: Vec2, target: Vec2, rate: f32, dt: f32) -> Vec2 {
    lerp_vec2(current, target, damp_factor(rate, dt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(100.0, 200.0, 0.0), 100.0);
        assert_eq!(lerp(100.0, 200.0, 1.0), 200.0);
        assert!((lerp(100.0, 200.0, 0.5) - 150.0).abs() < 0.001);
    }

    #[test]
    fn damp_factor_at_one_frame_is_rate() {
        assert!((damp_factor(0.25, 1.0) - 0.25).abs() < 1e-6);
        assert_eq!(damp_factor(0.25, 0.0), 0.0);
    }

    #[test]
    fn two_half_steps_equal_one_full_step() {
        let full = approach(0.0, 100.0, 0.3, 1.0);
        let half = approach(approach(0.0, 100.0, 0.3, 0.5), 100.0, 0.3, 0.5);
        assert!((full - half).abs() < 1e-3, "full {} vs halves {}", full, half);
    }

    #[test]
    fn approach_vec2_moves_toward_target() {
        let p = approach_vec2(Vec2::ZERO, Vec2::new(10.0, -10.0), 0.5, 1.0);
        assert_eq!(p, Vec2::new(5.0, -5.0));
    }
}
