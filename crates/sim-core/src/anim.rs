//! Schema-driven animation evaluator.
//!
//! This is the alternate "LED brightness vector" backend: a small catalog of
//! direct animations (wave, pulse, chase, ...) described by a parameter
//! schema, interchangeable with the field renderer behind the same contract.
//! The two backends share no state.
//!
//! Parameters are a typed in-process interface: each parameter has a fixed
//! id, a kind (bool / range / integer), bounds and a default, and consumers
//! discover an animation's parameter list from the schema instead of
//! hard-coding it.

use rand::prelude::*;

use crate::brightness::CalibrationRange;
use crate::constants::{BRANCH_COUNT, LEDS_PER_BRANCH, TOTAL_LEDS};
use crate::noise::{ridge, RidgeParams};
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamId {
    Speed,
    Phase,
    Width,
    Branch,
    Invert,
    Level,
    SingleIndex,
    RandomMode,
    GlobalSpeed,
    GlobalMin,
    GlobalMax,
    Delta,
    CalMin,
    CalMax,
}

/// Parameter value kind. Bounds live with the kind, so clamping never needs
/// a separate lookup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamKind {
    Bool,
    Range { min: f32, max: f32 },
    Int { min: i32, max: i32 },
}

#[derive(Clone, Copy, Debug)]
pub struct ParamDef {
    pub id: ParamId,
    pub name: &'static str,
    pub kind: ParamKind,
    pub default: f32,
}

pub const PARAMS: &[ParamDef] = &[
    ParamDef {
        id: ParamId::Speed,
        name: "speed",
        kind: ParamKind::Range { min: 0.0, max: 12.0 },
        default: 3.0,
    },
    ParamDef {
        id: ParamId::Phase,
        name: "phase",
        kind: ParamKind::Range { min: -6.283, max: 6.283 },
        default: 0.0,
    },
    ParamDef {
        id: ParamId::Width,
        name: "width",
        kind: ParamKind::Int { min: 1, max: 8 },
        default: 3.0,
    },
    ParamDef {
        id: ParamId::Branch,
        name: "branch",
        kind: ParamKind::Bool,
        default: 0.0,
    },
    ParamDef {
        id: ParamId::Invert,
        name: "invert",
        kind: ParamKind::Bool,
        default: 0.0,
    },
    ParamDef {
        id: ParamId::Level,
        name: "level",
        kind: ParamKind::Range { min: 0.0, max: 1.0 },
        default: 0.5,
    },
    ParamDef {
        id: ParamId::SingleIndex,
        name: "singleIndex",
        kind: ParamKind::Int { min: 0, max: 63 },
        default: 0.0,
    },
    ParamDef {
        id: ParamId::RandomMode,
        name: "random",
        kind: ParamKind::Bool,
        default: 0.0,
    },
    ParamDef {
        id: ParamId::GlobalSpeed,
        name: "globalSpeed",
        kind: ParamKind::Range { min: 0.0, max: 4.0 },
        default: 1.0,
    },
    ParamDef {
        id: ParamId::GlobalMin,
        name: "globalMin",
        kind: ParamKind::Range { min: 0.0, max: 1.0 },
        default: 0.0,
    },
    ParamDef {
        id: ParamId::GlobalMax,
        name: "globalMax",
        kind: ParamKind::Range { min: 0.0, max: 1.0 },
        default: 1.0,
    },
    ParamDef {
        id: ParamId::Delta,
        name: "delta",
        kind: ParamKind::Range { min: 0.0, max: 0.2 },
        default: 0.05,
    },
    ParamDef {
        id: ParamId::CalMin,
        name: "calMin",
        kind: ParamKind::Range { min: 0.0, max: 1.0 },
        default: 0.0,
    },
    ParamDef {
        id: ParamId::CalMax,
        name: "calMax",
        kind: ParamKind::Range { min: 0.0, max: 1.0 },
        default: 0.0,
    },
];

pub fn param_def(id: ParamId) -> &'static ParamDef {
    PARAMS
        .iter()
        .find(|p| p.id == id)
        .unwrap_or_else(|| unreachable!("every ParamId has a schema entry"))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Animation {
    Static,
    Wave,
    Pulse,
    Chase,
    Single,
    Sparkle,
    Ridge,
}

pub const ANIMATIONS: &[Animation] = &[
    Animation::Static,
    Animation::Wave,
    Animation::Pulse,
    Animation::Chase,
    Animation::Single,
    Animation::Sparkle,
    Animation::Ridge,
];

impl Animation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Static => "Static",
            Self::Wave => "Wave",
            Self::Pulse => "Pulse",
            Self::Chase => "Chase",
            Self::Single => "Single",
            Self::Sparkle => "Sparkle",
            Self::Ridge => "Ridge",
        }
    }

    /// Parameter list the UI should expose for this animation.
    pub fn params(&self) -> &'static [ParamId] {
        use ParamId::*;
        match self {
            Self::Static => &[Level],
            Self::Wave => &[Speed, Phase, Branch, Invert],
            Self::Pulse => &[Speed, Phase, Branch],
            Self::Chase => &[Speed, Width, Branch],
            Self::Single => &[SingleIndex],
            Self::Sparkle => &[Speed, RandomMode],
            Self::Ridge => &[Speed, Width, Branch, Delta, CalMin, CalMax],
        }
    }
}

/// The full parameter state, typed. `set`/`get` go through the schema so
/// values are always clamped to their declared bounds.
#[derive(Clone, Debug)]
pub struct ParamSet {
    pub speed: f32,
    pub phase: f32,
    pub width: u8,
    pub branch: bool,
    pub invert: bool,
    pub level: f32,
    pub single_index: u16,
    pub random_mode: bool,
    pub global_speed: f32,
    pub global_min: f32,
    pub global_max: f32,
    pub delta: f32,
    pub cal_min: f32,
    pub cal_max: f32,
}

impl Default for ParamSet {
    fn default() -> Self {
        let d = |id| param_def(id).default;
        Self {
            speed: d(ParamId::Speed),
            phase: d(ParamId::Phase),
            width: d(ParamId::Width) as u8,
            branch: false,
            invert: false,
            level: d(ParamId::Level),
            single_index: d(ParamId::SingleIndex) as u16,
            random_mode: false,
            global_speed: d(ParamId::GlobalSpeed),
            global_min: d(ParamId::GlobalMin),
            global_max: d(ParamId::GlobalMax),
            delta: d(ParamId::Delta),
            cal_min: d(ParamId::CalMin),
            cal_max: d(ParamId::CalMax),
        }
    }
}

impl ParamSet {
    pub fn set(&mut self, id: ParamId, value: f32) {
        let value = match param_def(id).kind {
            ParamKind::Bool => {
                if value != 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            ParamKind::Range { min, max } => value.clamp(min, max),
            ParamKind::Int { min, max } => value.clamp(min as f32, max as f32).round(),
        };
        match id {
            ParamId::Speed => self.speed = value,
            ParamId::Phase => self.phase = value,
            ParamId::Width => self.width = value as u8,
            ParamId::Branch => self.branch = value != 0.0,
            ParamId::Invert => self.invert = value != 0.0,
            ParamId::Level => self.level = value,
            ParamId::SingleIndex => self.single_index = value as u16,
            ParamId::RandomMode => self.random_mode = value != 0.0,
            ParamId::GlobalSpeed => self.global_speed = value,
            ParamId::GlobalMin => self.global_min = value,
            ParamId::GlobalMax => self.global_max = value,
            ParamId::Delta => self.delta = value,
            ParamId::CalMin => self.cal_min = value,
            ParamId::CalMax => self.cal_max = value,
        }
    }

    pub fn get(&self, id: ParamId) -> f32 {
        match id {
            ParamId::Speed => self.speed,
            ParamId::Phase => self.phase,
            ParamId::Width => self.width as f32,
            ParamId::Branch => self.branch as u8 as f32,
            ParamId::Invert => self.invert as u8 as f32,
            ParamId::Level => self.level,
            ParamId::SingleIndex => self.single_index as f32,
            ParamId::RandomMode => self.random_mode as u8 as f32,
            ParamId::GlobalSpeed => self.global_speed,
            ParamId::GlobalMin => self.global_min,
            ParamId::GlobalMax => self.global_max,
            ParamId::Delta => self.delta,
            ParamId::CalMin => self.cal_min,
            ParamId::CalMax => self.cal_max,
        }
    }
}

// Sparkle tuning. Chosen to match the firmware behavior at speed = 1.
const SPARKLE_MIN: usize = 8;
const SPARKLE_MAX: usize = 12;
const RETARGET_INTERVAL: f32 = 2.0;
const SPAWN_SMOOTHING: f32 = 0.8;
const BASE_RISE: f32 = 2.5;
const BASE_DECAY: f32 = 1.3;
const MIN_DECAY: f32 = 0.4;
const MAX_DECAY: f32 = 8.0;
const SPAWN_RATE_MIN: f32 = 6.0;
const SPAWN_RATE_MAX: f32 = 18.0;

#[derive(Clone, Copy, Debug, Default)]
struct Spark {
    brightness: f32,
    fading: bool,
    rise: f32,
    decay: f32,
    active: bool,
}

/// Sparkle keeps per-LED spark state between frames; it lives here instead
/// of in function-local statics so two evaluators never interfere.
#[derive(Clone, Debug)]
struct SparkleState {
    sparks: Vec<Spark>,
    initialized: bool,
    last_t: f32,
    last_retarget_t: f32,
    spawn_rate: f32,
    spawn_rate_target: f32,
}

impl SparkleState {
    fn new() -> Self {
        Self {
            sparks: vec![Spark::default(); TOTAL_LEDS],
            initialized: false,
            last_t: 0.0,
            last_retarget_t: 0.0,
            spawn_rate: 10.0,
            spawn_rate_target: 10.0,
        }
    }
}

/// Evaluates animations into a caller-provided brightness buffer. The buffer
/// length is the LED count; indices follow the branch-major layout of the
/// sculpture (BRANCH_COUNT x LEDS_PER_BRANCH).
pub struct Evaluator {
    pub params: ParamSet,
    sparkle: SparkleState,
    rng: StdRng,
}

impl Evaluator {
    pub fn new(seed: u64) -> Self {
        Self {
            params: ParamSet::default(),
            sparkle: SparkleState::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn set_param(&mut self, id: ParamId, value: f32) {
        self.params.set(id, value);
    }

    pub fn get_param(&self, id: ParamId) -> f32 {
        self.params.get(id)
    }

    /// Fill `out` with per-LED brightness for `anim` at time `t`, then apply
    /// the global min/max output window.
    pub fn eval(&mut self, anim: Animation, t: f32, out: &mut [f32]) {
        let ps = self.params.clone();
        match anim {
            Animation::Static => static_on(ps.level, out),
            Animation::Wave => wave_anim(
                t,
                ps.speed * ps.global_speed,
                ps.phase,
                ps.branch,
                ps.invert,
                out,
            ),
            Animation::Pulse => pulse_anim(t, ps.speed * ps.global_speed, ps.phase, ps.branch, out),
            Animation::Chase => chase_anim(
                t,
                ps.speed * ps.global_speed,
                ps.width.max(1),
                ps.branch,
                out,
            ),
            Animation::Single => single_anim(ps.single_index as usize, out),
            Animation::Sparkle => self.sparkle_anim(t, &ps, out),
            Animation::Ridge => ridge_anim(t, &ps, out),
        }

        // Global output window
        if ps.global_min != 0.0 || ps.global_max != 1.0 {
            let gmin = ps.global_min;
            let gscale = if ps.global_max > ps.global_min {
                ps.global_max - ps.global_min
            } else {
                0.0
            };
            for v in out.iter_mut() {
                *v = (gmin + *v * gscale).clamp(0.0, 1.0);
            }
        }
    }

    fn sparkle_anim(&mut self, t: f32, ps: &ParamSet, out: &mut [f32]) {
        let n = out.len().min(TOTAL_LEDS);
        let st = &mut self.sparkle;
        let rng = &mut self.rng;
        let mut frand = || rng.gen::<f32>();

        if !st.initialized {
            // Seed a few desynchronized sparks so the first frame isn't dark
            for _ in 0..SPARKLE_MIN {
                let idx = (frand() * TOTAL_LEDS as f32) as usize % TOTAL_LEDS;
                let sp = &mut st.sparks[idx];
                sp.active = true;
                sp.fading = frand() < 0.5;
                sp.brightness = frand();
                sp.rise = BASE_RISE * (0.6 + frand() * 0.8);
                sp.decay = BASE_DECAY * (0.6 + frand() * 0.8);
            }
            st.initialized = true;
            st.last_t = t;
            st.last_retarget_t = t;
        }

        // Clamp dt against time resets and frame hitches
        let dt = (t - st.last_t).clamp(0.0, 0.25);
        st.last_t = t;

        let speed_scale = (ps.speed * ps.global_speed).clamp(1e-6, 10.0);

        // Periodically retarget the spawn tempo
        if t - st.last_retarget_t >= RETARGET_INTERVAL {
            let r = frand();
            let norm = 1.0 - r * r; // bias toward faster tempos
            st.spawn_rate_target = SPAWN_RATE_MIN + norm * (SPAWN_RATE_MAX - SPAWN_RATE_MIN);
            st.last_retarget_t = t;
        }
        let blend = 1.0 - (-SPAWN_SMOOTHING * dt * 5.0).exp();
        st.spawn_rate += (st.spawn_rate_target - st.spawn_rate) * blend;

        // Advance live sparks
        let mut active = 0usize;
        for sp in st.sparks.iter_mut().take(n) {
            if !sp.active {
                continue;
            }
            active += 1;
            let jitter = 0.9 + frand() * 0.2;
            if !sp.fading {
                sp.brightness += sp.rise * speed_scale * jitter * dt;
                if sp.brightness >= 1.0 {
                    sp.brightness = 1.0;
                    sp.fading = true;
                }
            } else {
                let decay = (sp.decay * speed_scale * jitter).clamp(MIN_DECAY, MAX_DECAY);
                sp.brightness *= (-decay * dt).exp();
                if sp.brightness < 0.02 {
                    sp.active = false;
                    active -= 1;
                }
            }
        }

        let target = (SPARKLE_MIN
            + (frand() * (SPARKLE_MAX - SPARKLE_MIN + 1) as f32) as usize)
            .min(SPARKLE_MAX)
            .min(n);

        let attempts_per_sec = (st.spawn_rate * speed_scale).max(0.1);
        let spawn_prob = 1.0 - (-attempts_per_sec * dt).exp();

        let mut guard = 0;
        while active < target && guard < 20 {
            guard += 1;
            if frand() > spawn_prob {
                break;
            }
            let idx = (frand() * n as f32) as usize;
            if idx >= n || st.sparks[idx].active {
                continue;
            }
            let sp = &mut st.sparks[idx];
            sp.active = true;
            sp.fading = false;
            sp.rise = if ps.random_mode {
                BASE_RISE * (0.6 + frand() * 0.8)
            } else {
                BASE_RISE
            };
            sp.decay = if ps.random_mode {
                BASE_DECAY * (0.6 + frand() * 0.8)
            } else {
                BASE_DECAY
            };
            sp.brightness = 0.05 + frand() * 0.20;
            active += 1;
        }

        for (i, v) in out.iter_mut().enumerate().take(n) {
            let sp = &st.sparks[i];
            *v = if sp.active {
                sp.brightness.clamp(0.0, 1.0)
            } else {
                0.0
            };
        }
        for v in out.iter_mut().skip(n) {
            *v = 0.0;
        }
        for sp in st.sparks.iter_mut().skip(n) {
            sp.active = false;
            sp.brightness = 0.0;
        }
    }
}

fn static_on(level: f32, out: &mut [f32]) {
    let level = level.clamp(0.0, 1.0);
    out.fill(level);
}

fn wave_anim(t: f32, speed: f32, phase: f32, branch_mode: bool, invert: bool, out: &mut [f32]) {
    let n = out.len();
    if branch_mode {
        for b in 0..BRANCH_COUNT {
            let bp = phase + b as f32 * FRAC_PI_4;
            for i in 0..LEDS_PER_BRANCH {
                let idx = b * LEDS_PER_BRANCH + i;
                if idx >= n {
                    break;
                }
                let ii = if invert { LEDS_PER_BRANCH - 1 - i } else { i };
                let angle = ii as f32 / LEDS_PER_BRANCH as f32 * TAU + t * speed + bp;
                out[idx] = 0.5 + 0.5 * angle.sin();
            }
        }
    } else {
        for i in 0..n {
            let ii = if invert { n - 1 - i } else { i };
            let angle = ii as f32 / n as f32 * TAU + t * speed + phase;
            out[i] = 0.5 + 0.5 * angle.sin();
        }
    }
}

fn pulse_anim(t: f32, speed: f32, phase: f32, branch_mode: bool, out: &mut [f32]) {
    let n = out.len();
    if branch_mode {
        for b in 0..BRANCH_COUNT {
            let bp = phase + b as f32 * FRAC_PI_2;
            let v = 0.5 + 0.5 * (t * speed + bp).sin();
            for i in 0..LEDS_PER_BRANCH {
                let idx = b * LEDS_PER_BRANCH + i;
                if idx >= n {
                    break;
                }
                out[idx] = v;
            }
        }
    } else {
        let v = 0.5 + 0.5 * (t * speed + phase).sin();
        out.fill(v);
    }
}

fn chase_anim(t: f32, speed: f32, width: u8, branch_mode: bool, out: &mut [f32]) {
    let n = out.len();
    out.fill(0.0);
    if n == 0 {
        return;
    }
    if branch_mode {
        for b in 0..BRANCH_COUNT {
            let pos =
                (t * speed + b as f32 * (LEDS_PER_BRANCH as f32 / 2.0)) % LEDS_PER_BRANCH as f32;
            let pos = pos as usize;
            for w in 0..width as usize {
                let idx = b * LEDS_PER_BRANCH + (pos + w) % LEDS_PER_BRANCH;
                if idx < n {
                    out[idx] = 1.0;
                }
            }
        }
    } else {
        let pos = (t * speed % n as f32) as usize;
        for w in 0..width as usize {
            out[(pos + w) % n] = 1.0;
        }
    }
}

fn single_anim(index: usize, out: &mut [f32]) {
    out.fill(0.0);
    if index < out.len() {
        out[index] = 1.0;
    }
}

/// The noise pipeline collapsed onto the LED layout: one octave of ridge
/// noise drifting along z over time, branch geometry spaced by `delta`.
fn ridge_anim(t: f32, ps: &ParamSet, out: &mut [f32]) {
    let n = out.len();
    let params = RidgeParams {
        octaves: 1,
        lacunarity: 1.3,
        gain: 0.75,
        offset: 1.5 / 3.0 * ps.width as f32,
    };
    let norm = params.norm_scale();
    let ts = t * (ps.speed * 0.02) * ps.global_speed;
    let cal = CalibrationRange {
        lo: ps.cal_min,
        hi: ps.cal_max,
    };

    let shade = |x: f32, y: f32| -> f32 {
        let p = ridge(
            Vec3::new(x * 3.0 + 0.5, y * 3.0 + 0.5, ts * 3.0),
            &params,
        ) * norm;
        let v = crate::brightness::threshold_remap(p * p);
        cal.apply(v)
    };

    if ps.branch {
        for b in 0..BRANCH_COUNT {
            for i in 0..LEDS_PER_BRANCH {
                let idx = b * LEDS_PER_BRANCH + i;
                if idx >= n {
                    continue;
                }
                let dist = ps.delta * i as f32 + ps.delta * 0.5;
                let (x, y) = match b {
                    0 => (dist, 0.0),
                    1 => (-dist, 0.0),
                    2 => (0.0, dist),
                    _ => (0.0, -dist),
                };
                out[idx] = shade(x, y);
            }
        }
    } else {
        for (i, v) in out.iter_mut().enumerate() {
            *v = shade(i as f32 * ps.delta, 0.0);
        }
    }
}
