// Shared engine tuning constants used by the renderer, topology, and the
// schema-driven evaluator.

// Sculpture layout
pub const BRANCH_COUNT: usize = 4;
pub const LEDS_PER_BRANCH: usize = 7;
pub const TOTAL_LEDS: usize = BRANCH_COUNT * LEDS_PER_BRANCH;
pub const DEFAULT_LED_DELTA: f32 = 0.05; // model-space spacing between LEDs

// Field sampling
pub const SPATIAL_FREQ: f32 = 3.0; // global spatial frequency of the pattern
pub const SAMPLE_OFFSET: f32 = 0.5; // recenters the sampled lattice region

// Auto-calibration window: 300 samples spanning 10 simulated seconds at 30 Hz
pub const CALIBRATION_FRAMES: usize = 300;
pub const CALIBRATION_CADENCE_HZ: f32 = 30.0;
