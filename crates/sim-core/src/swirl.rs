//! Closed-form angular swirl pattern, the grayscale alternative to the ridge
//! field. Independent of the noise lattice entirely.

use crate::transform::{timef, wave};
use std::f32::consts::PI;

const TWIST_SPEED: f32 = 0.015;
const ROTATE_SPEED: f32 = 0.002;
const ARMS: f32 = 3.0;

/// Quadrant-aware arctangent matching the reference pattern, including the
/// sentinel `1.0` at the origin. Library `atan2` differs there, so we keep
/// the explicit branches.
#[inline]
fn arctan2(y: f32, x: f32) -> f32 {
    if x > 0.0 {
        (y / x).atan()
    } else if x == 0.0 && y > 0.0 {
        PI / 2.0
    } else if x == 0.0 && y < 0.0 {
        -PI / 2.0
    } else if x < 0.0 {
        PI + (y / x).atan()
    } else {
        1.0
    }
}

/// Evaluate the swirl at normalized coordinates `(mx, my)` in roughly [0, 1]
/// with the sculpture center at (0.5, 0.5). Returns brightness in [0, 1].
pub fn swirl(t: f32, mx: f32, my: f32) -> f32 {
    let twist = wave(timef(t, TWIST_SPEED)) * 2.0 - 1.0;
    let rotation = timef(t, ROTATE_SPEED);

    let xn = (mx - 0.5) * 2.0;
    let yn = (my - 0.5) * 2.0;
    let dist = (xn * xn + yn * yn).sqrt();
    let mut angle = (arctan2(yn, xn) + PI) / (2.0 * PI);
    angle += dist * twist / 2.0;

    let h = angle * ARMS - rotation + 10.0;
    let h = h - h.floor();
    let v = (1.01 - dist) * if h < 0.5 { h * h * h } else { h };
    v.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arctan2_axes() {
        assert!((arctan2(1.0, 0.0) - PI / 2.0).abs() < 1e-6);
        assert!((arctan2(-1.0, 0.0) + PI / 2.0).abs() < 1e-6);
        assert!(arctan2(0.0, 1.0).abs() < 1e-6);
        assert!((arctan2(0.0, -1.0) - PI).abs() < 1e-6);
        assert_eq!(arctan2(0.0, 0.0), 1.0);
    }

    #[test]
    fn swirl_stays_in_unit_range() {
        for i in 0..32 {
            for j in 0..32 {
                let v = swirl(7.5, i as f32 / 31.0, j as f32 / 31.0);
                assert!((0.0..=1.0).contains(&v), "swirl out of range: {v}");
            }
        }
    }
}
