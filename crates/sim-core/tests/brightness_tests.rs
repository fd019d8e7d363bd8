// Brightness remap and calibration behavior.

use sim_core::{threshold_remap, CalibrationRange};

#[test]
fn stage_one_is_monotonic_non_decreasing() {
    let mut prev = threshold_remap(-0.5);
    for i in 0..=300 {
        let p = -0.5 + i as f32 * 0.01;
        let v = threshold_remap(p);
        assert!(v >= prev, "decreasing at p={p}: {v} < {prev}");
        prev = v;
    }
}

#[test]
fn stage_one_endpoints() {
    assert_eq!(threshold_remap(0.05), 0.0);
    assert_eq!(threshold_remap(0.1), 0.0);
    assert_eq!(threshold_remap(1.0), 1.0);
    assert_eq!(threshold_remap(2.0), 1.0);
    // Midpoint of the band: ((0.55 - 0.1) / 0.9)^2 = 0.25
    assert!((threshold_remap(0.55) - 0.25).abs() < 1e-6);
}

#[test]
fn full_range_calibration_is_identity() {
    let cal = CalibrationRange { lo: 0.0, hi: 1.0 };
    for i in 0..=100 {
        let v = i as f32 / 100.0;
        assert!((cal.apply(v) - v).abs() < 1e-7);
    }
}

#[test]
fn calibration_clamps_outside_window() {
    let cal = CalibrationRange { lo: 0.2, hi: 0.8 };
    assert_eq!(cal.apply(0.1), 0.0);
    assert_eq!(cal.apply(0.9), 1.0);
    assert!((cal.apply(0.5) - 0.5).abs() < 1e-6);
}

#[test]
fn degenerate_window_passes_values_through() {
    for cal in [
        CalibrationRange { lo: 0.5, hi: 0.5 },
        CalibrationRange { lo: 0.8, hi: 0.2 },
    ] {
        for v in [0.0, 0.3, 0.77, 1.0] {
            assert_eq!(cal.apply(v), v);
        }
    }
}

#[test]
fn scenario_b_percentile_indices() {
    // Nine samples: lo index floor(9*0.05) = 0, hi index floor(9*0.95) = 8.
    let mut samples = vec![0.5, 0.3, 0.9, 0.1, 0.7, 0.2, 0.8, 0.4, 0.6];
    let cal = CalibrationRange::from_samples(&mut samples).expect("nine samples");
    assert!((cal.lo - 0.1).abs() < 1e-7);
    assert!((cal.hi - 0.9).abs() < 1e-7);
}

#[test]
fn empty_sample_set_yields_no_window() {
    assert!(CalibrationRange::from_samples(&mut []).is_none());
}
