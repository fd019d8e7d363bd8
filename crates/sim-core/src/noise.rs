//! Deterministic value noise and the ridged multi-octave synthesizer.
//!
//! Everything here is a pure function of its inputs: the same coordinates and
//! octave parameters always produce the same scalar, which is what makes the
//! renderer reproducible frame to frame and testable off-device.

use glam::Vec3;

/// Integer mixing hash. Multiply-xor-shift with two avalanche rounds so
/// neighbouring lattice cells decorrelate fully.
#[inline]
pub fn hash(x: i32, y: i32, z: i32) -> u32 {
    let h = (x as u32)
        .wrapping_mul(374_761_393)
        .wrapping_add((y as u32).wrapping_mul(668_265_263))
        ^ (z as u32).wrapping_mul(362_437);
    let h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    h ^ (h >> 16)
}

/// Hashed lattice scalar in `[0, 1)` (24-bit fraction of the hash).
#[inline]
pub fn noise(x: i32, y: i32, z: i32) -> f32 {
    (hash(x, y, z) & 0xFF_FFFF) as f32 / 16_777_216.0
}

#[inline]
fn fade(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Smoothed value noise: trilinear interpolation of the eight hashed lattice
/// corners around `(x, y, z)`, with `fade` weights so the field is C1 at
/// integer boundaries.
pub fn value_noise(x: f32, y: f32, z: f32) -> f32 {
    let xi = x.floor() as i32;
    let yi = y.floor() as i32;
    let zi = z.floor() as i32;
    let fx = x - xi as f32;
    let fy = y - yi as f32;
    let fz = z - zi as f32;
    let u = fade(fx);
    let v = fade(fy);
    let w = fade(fz);

    let n000 = noise(xi, yi, zi);
    let n100 = noise(xi + 1, yi, zi);
    let n010 = noise(xi, yi + 1, zi);
    let n110 = noise(xi + 1, yi + 1, zi);
    let n001 = noise(xi, yi, zi + 1);
    let n101 = noise(xi + 1, yi, zi + 1);
    let n011 = noise(xi, yi + 1, zi + 1);
    let n111 = noise(xi + 1, yi + 1, zi + 1);

    let nx00 = lerp(n000, n100, u);
    let nx10 = lerp(n010, n110, u);
    let nx01 = lerp(n001, n101, u);
    let nx11 = lerp(n011, n111, u);
    let nxy0 = lerp(nx00, nx10, v);
    let nxy1 = lerp(nx01, nx11, v);
    lerp(nxy0, nxy1, w)
}

/// Octave parameters for [`ridge`].
#[derive(Clone, Copy, Debug)]
pub struct RidgeParams {
    /// Number of octaves, must be >= 1 (caller contract).
    pub octaves: u32,
    /// Per-octave frequency multiplier.
    pub lacunarity: f32,
    /// Per-octave amplitude multiplier, in (0, 1) for a finite series.
    pub gain: f32,
    /// Fold offset; each octave contributes `(offset - |signal|)^2`.
    pub offset: f32,
}

impl Default for RidgeParams {
    fn default() -> Self {
        Self {
            octaves: 1,
            lacunarity: 1.3,
            gain: 0.75,
            offset: 1.0,
        }
    }
}

impl RidgeParams {
    /// Geometric amplitude series `sum(0.5 * gain^i)` over the octave count.
    pub fn amp_sum(&self) -> f32 {
        if self.gain == 1.0 {
            0.5 * self.octaves as f32
        } else {
            0.5 * (1.0 - self.gain.powi(self.octaves as i32)) / (1.0 - self.gain)
        }
    }

    /// Analytic worst-case output of [`ridge`]: every octave maximally folded.
    pub fn max_ridge(&self) -> f32 {
        self.offset * self.offset * self.amp_sum()
    }

    /// Reciprocal of [`max_ridge`](Self::max_ridge), floored so the scale is
    /// always finite. Raw ridge values are multiplied by this before any
    /// brightness mapping.
    pub fn norm_scale(&self) -> f32 {
        1.0 / self.max_ridge().max(1e-6)
    }
}

/// Multi-octave ridged sum over [`value_noise`]. Unbounded above, never
/// negative (each octave is squared after folding).
pub fn ridge(p: Vec3, params: &RidgeParams) -> f32 {
    let mut sum = 0.0;
    let mut freq = 1.0;
    let mut amp = 0.5;
    for _ in 0..params.octaves {
        let v = value_noise(p.x * freq, p.y * freq, p.z * freq);
        let v = v * 2.0 - 1.0;
        let v = params.offset - v.abs();
        let v = v * v;
        sum += v * amp;
        freq *= params.lacunarity;
        amp *= params.gain;
    }
    sum
}
