//! Brightness remapping: the threshold-square curve that expands the low
//! dynamic range of normalized ridge values, and the percentile calibration
//! window stretched over it.

/// Stage-1 remap of a normalized field value into display brightness.
/// Monotonic non-decreasing; exact 0 below the threshold, exact 1 at or
/// above full scale.
#[inline]
pub fn threshold_remap(p: f32) -> f32 {
    if p <= 0.1 {
        0.0
    } else if p >= 1.0 {
        1.0
    } else {
        let v = (p - 0.1) / 0.9;
        v * v
    }
}

/// Calibration window mapping `lo -> 0` and `hi -> 1`, clamped. Degenerate
/// windows (`hi <= lo`) pass values through unchanged rather than dividing
/// by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalibrationRange {
    pub lo: f32,
    pub hi: f32,
}

impl Default for CalibrationRange {
    fn default() -> Self {
        Self { lo: 0.2, hi: 0.8 }
    }
}

impl CalibrationRange {
    pub fn apply(&self, v: f32) -> f32 {
        if self.hi <= self.lo {
            return v;
        }
        ((v - self.lo) / (self.hi - self.lo)).clamp(0.0, 1.0)
    }

    /// Percentile stretch over a collected sample multiset: `lo` at the 5th
    /// percentile, `hi` at the 95th, discarding the extremes as outliers so a
    /// single flickering LED cannot skew the window. Returns `None` when
    /// there is nothing to calibrate against.
    pub fn from_samples(samples: &mut [f32]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        samples.sort_by(f32::total_cmp);
        let lo_idx = (samples.len() as f32 * 0.05).floor() as usize;
        let hi_idx = (samples.len() as f32 * 0.95).floor() as usize;
        Some(Self {
            lo: samples[lo_idx],
            hi: samples[hi_idx.min(samples.len() - 1)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_endpoints_are_exact() {
        assert_eq!(threshold_remap(0.0), 0.0);
        assert_eq!(threshold_remap(0.1), 0.0);
        assert_eq!(threshold_remap(1.0), 1.0);
        assert_eq!(threshold_remap(1.5), 1.0);
    }

    #[test]
    fn degenerate_window_is_identity() {
        let cal = CalibrationRange { lo: 0.7, hi: 0.3 };
        for v in [0.0, 0.25, 0.5, 0.99] {
            assert_eq!(cal.apply(v), v);
        }
    }
}
