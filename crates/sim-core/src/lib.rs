pub mod anim;
pub mod brightness;
pub mod clock;
pub mod constants;
pub mod noise;
pub mod render;
pub mod snapshot;
pub mod swirl;
pub mod topology;
pub mod transform;

pub use anim::{Animation, Evaluator, ParamDef, ParamId, ParamKind, ParamSet, ANIMATIONS, PARAMS};
pub use brightness::{threshold_remap, CalibrationRange};
pub use clock::SimClock;
pub use constants::*;
pub use noise::{hash, noise, ridge, value_noise, RidgeParams};
pub use render::{
    auto_calibrate, render_frame, render_leds, sample_brightness, FrameOutput, Pattern,
    RenderParams, ViewTransform,
};
pub use snapshot::{BranchesSnapshot, PositionSnapshot, SnapshotError};
pub use swirl::swirl;
pub use topology::{default_branches, Branch, LedTopology};
pub use transform::{timef, triangle, wave, TransformState};
