//! Time-driven coordinate transform feeding the noise samplers.

use glam::{Vec2, Vec3};

/// Period-1 triangle wave, range [0, 1].
#[inline]
pub fn triangle(x: f32) -> f32 {
    let f = x - x.floor();
    (f * 2.0 - 1.0).abs()
}

/// Sine mapped into [0, 1] over a unit period.
#[inline]
pub fn wave(x: f32) -> f32 {
    0.5 + 0.5 * (x * std::f32::consts::TAU).sin()
}

/// Fractional part of `t * freq`.
#[inline]
pub fn timef(t: f32, freq: f32) -> f32 {
    let v = t * freq;
    v - v.floor()
}

// Rotation drive frequencies. Deliberately incommensurate so the three axes
// never line up in phase.
const ROT_Z_FREQ: f32 = 0.416;
const ROT_Y_FREQ: f32 = 0.515;
const ROT_X_FREQ: f32 = 0.359;

/// Per-frame transform: a breathing uniform scale plus three rotation angles,
/// fully determined by `t`. Recomputed every frame, never retained.
#[derive(Clone, Copy, Debug)]
pub struct TransformState {
    pub scale: f32,
    pub rot_z: f32,
    pub rot_y: f32,
    pub rot_x: f32,
}

impl TransformState {
    pub fn at(t: f32) -> Self {
        Self {
            scale: 0.15 + 0.15 * triangle(timef(t, 1.0)),
            rot_z: wave(timef(t, ROT_Z_FREQ)) * std::f32::consts::TAU,
            rot_y: wave(timef(t, ROT_Y_FREQ)) * std::f32::consts::TAU,
            rot_x: wave(timef(t, ROT_X_FREQ)) * std::f32::consts::TAU,
        }
    }

    /// Lift a 2D model point (implicit z = 0) into the animated 3D sampling
    /// space: uniform scale, then rotate about Z, then Y, then X. The order
    /// is fixed; changing it changes every rendered frame.
    pub fn apply(&self, model: Vec2) -> Vec3 {
        let (sin_z, cos_z) = self.rot_z.sin_cos();
        let (sin_y, cos_y) = self.rot_y.sin_cos();
        let (sin_x, cos_x) = self.rot_x.sin_cos();

        let x0 = model.x * self.scale;
        let y0 = model.y * self.scale;
        let z0 = 0.0;

        let x1 = x0 * cos_z - y0 * sin_z;
        let y1 = x0 * sin_z + y0 * cos_z;
        let z1 = z0;

        let x2 = x1 * cos_y + z1 * sin_y;
        let y2 = y1;
        let z2 = -x1 * sin_y + z1 * cos_y;

        let x3 = x2;
        let y3 = y2 * cos_x - z2 * sin_x;
        let z3 = y2 * sin_x + z2 * cos_x;

        Vec3::new(x3, y3, z3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_hits_extremes() {
        assert!((triangle(0.0) - 1.0).abs() < 1e-6);
        assert!(triangle(0.5) < 1e-6);
        assert!((triangle(1.0) - 1.0).abs() < 1e-6);
        assert!((triangle(0.25) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn wave_range_and_midpoint() {
        assert!((wave(0.0) - 0.5).abs() < 1e-6);
        assert!((wave(0.25) - 1.0).abs() < 1e-6);
        assert!(wave(0.75) < 1e-6);
    }

    #[test]
    fn transform_is_pure_in_time() {
        let a = TransformState::at(3.7);
        let b = TransformState::at(3.7);
        assert_eq!(a.scale, b.scale);
        assert_eq!(a.rot_z, b.rot_z);
        assert_eq!(a.rot_y, b.rot_y);
        assert_eq!(a.rot_x, b.rot_x);
    }

    #[test]
    fn rotations_preserve_length() {
        let st = TransformState::at(1.234);
        let p = st.apply(Vec2::new(0.3, -0.4));
        let expected = 0.5 * st.scale; // |(0.3, -0.4)| = 0.5
        assert!((p.length() - expected).abs() < 1e-5);
    }
}
