//! Per-frame orchestration: raster and LED brightness from one shared
//! sampling path.
//!
//! The central invariant is that the full-canvas visualization and the
//! per-LED readout go through the *same* transform and remap code — both
//! call [`sample_brightness`] — so what the screen shows is exactly what the
//! sculpture would display.

use glam::{Vec2, Vec3};

use crate::brightness::{threshold_remap, CalibrationRange};
use crate::constants::{CALIBRATION_CADENCE_HZ, CALIBRATION_FRAMES, SAMPLE_OFFSET, SPATIAL_FREQ};
use crate::noise::{ridge, RidgeParams};
use crate::swirl::swirl;
use crate::topology::LedTopology;
use crate::transform::TransformState;

/// Which field drives the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    Ridge,
    Swirl,
}

/// Immutable parameter snapshot for one frame's evaluation. Built once per
/// frame from the live UI values; the renderer never mutates it.
#[derive(Clone, Debug)]
pub struct RenderParams {
    pub pattern: Pattern,
    pub ridge: RidgeParams,
    /// `None` when calibration is disabled (identity remap).
    pub calibration: Option<CalibrationRange>,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            pattern: Pattern::Ridge,
            ridge: RidgeParams::default(),
            calibration: None,
        }
    }
}

/// Screen/model mapping with independent pan and zoom. Not part of the noise
/// core, but both raster sampling and LED overlay placement must agree on it
/// for pixel-identical output.
#[derive(Clone, Copy, Debug)]
pub struct ViewTransform {
    pub pan: Vec2,
    pub zoom: f32,
    pub width: u32,
    pub height: u32,
}

impl ViewTransform {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
            width,
            height,
        }
    }

    #[inline]
    fn extent(&self) -> f32 {
        (self.width.min(self.height)).max(1) as f32
    }

    pub fn screen_to_model(&self, sx: f32, sy: f32) -> Vec2 {
        let e = self.extent();
        Vec2::new(
            (sx - self.width as f32 * 0.5) / e / self.zoom - self.pan.x / 100.0,
            (sy - self.height as f32 * 0.5) / e / self.zoom - self.pan.y / 100.0,
        )
    }

    pub fn model_to_screen(&self, m: Vec2) -> Vec2 {
        let e = self.extent();
        Vec2::new(
            (m.x + self.pan.x / 100.0) * self.zoom * e + self.width as f32 * 0.5,
            (m.y + self.pan.y / 100.0) * self.zoom * e + self.height as f32 * 0.5,
        )
    }
}

/// One frame's output: a grayscale raster (row-major, `width * height`
/// bytes) and the LED brightness vector in topology order.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub pixels: Vec<u8>,
    pub led_brightness: Vec<f32>,
}

/// Brightness of the field at one model-space point. This is the single
/// sampling path shared by the raster, the LED readout, the click probe and
/// auto-calibration.
pub fn sample_brightness(model: Vec2, t: f32, params: &RenderParams, state: &TransformState) -> f32 {
    let v = match params.pattern {
        Pattern::Swirl => swirl(t, model.x + 0.5, model.y + 0.5),
        Pattern::Ridge => {
            let p = state.apply(model);
            let raw = ridge(
                Vec3::new(
                    p.x * SPATIAL_FREQ + SAMPLE_OFFSET,
                    p.y * SPATIAL_FREQ + SAMPLE_OFFSET,
                    p.z * SPATIAL_FREQ,
                ),
                &params.ridge,
            );
            let p = raw * params.ridge.norm_scale();
            threshold_remap(p * p)
        }
    };
    match params.calibration {
        Some(cal) => cal.apply(v),
        None => v,
    }
}

/// Evaluate one complete frame: pure function of (time, parameters, view,
/// topology). No state survives the call.
pub fn render_frame(
    t: f32,
    params: &RenderParams,
    view: &ViewTransform,
    topology: &LedTopology,
) -> FrameOutput {
    let state = TransformState::at(t);

    let mut pixels = Vec::with_capacity((view.width * view.height) as usize);
    for y in 0..view.height {
        for x in 0..view.width {
            let m = view.screen_to_model(x as f32, y as f32);
            let v = sample_brightness(m, t, params, &state);
            pixels.push((v.clamp(0.0, 1.0) * 255.0).round() as u8);
        }
    }

    let led_brightness = topology
        .positions()
        .into_iter()
        .map(|m| sample_brightness(m, t, params, &state))
        .collect();

    FrameOutput {
        pixels,
        led_brightness,
    }
}

/// LED brightness vector only, skipping the raster. Same sampling path.
pub fn render_leds(t: f32, params: &RenderParams, topology: &LedTopology) -> Vec<f32> {
    let state = TransformState::at(t);
    topology
        .positions()
        .into_iter()
        .map(|m| sample_brightness(m, t, params, &state))
        .collect()
}

/// Percentile auto-calibration: sample every LED's *pre-calibration*
/// brightness across a fixed window (`CALIBRATION_FRAMES` samples at
/// `CALIBRATION_CADENCE_HZ`, advanced by `speed`), then stretch the 5th..95th
/// percentile band to full range. Returns `None` for an empty topology.
pub fn auto_calibrate(
    params: &RenderParams,
    topology: &LedTopology,
    base_t: f32,
    speed: f32,
) -> Option<CalibrationRange> {
    let positions = topology.positions();
    if positions.is_empty() {
        return None;
    }

    let uncalibrated = RenderParams {
        calibration: None,
        ..params.clone()
    };
    let mut samples = Vec::with_capacity(CALIBRATION_FRAMES * positions.len());
    for f in 0..CALIBRATION_FRAMES {
        let sim_t = base_t + (f as f32 / CALIBRATION_CADENCE_HZ) * speed;
        let state = TransformState::at(sim_t);
        for m in &positions {
            samples.push(sample_brightness(*m, sim_t, &uncalibrated, &state));
        }
    }
    let range = CalibrationRange::from_samples(&mut samples);
    if let Some(r) = &range {
        log::debug!("auto-calibration window: lo={} hi={}", r.lo, r.hi);
    }
    range
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_round_trips_screen_coordinates() {
        let view = ViewTransform {
            pan: Vec2::new(12.0, -7.0),
            zoom: 1.8,
            width: 640,
            height: 480,
        };
        let m = view.screen_to_model(123.0, 456.0);
        let s = view.model_to_screen(m);
        assert!((s.x - 123.0).abs() < 1e-3);
        assert!((s.y - 456.0).abs() < 1e-3);
    }
}
