//! Explicit simulation clock.
//!
//! The clock is the only mutable state shared across frames: a monotonic
//! wall-clock origin plus speed and pause. Callers read `t` once per frame
//! and pass it by value into the pure render call, which keeps rendering
//! deterministic under test (inject any `t` directly).

use instant::Instant;

const MIN_SPEED: f32 = 1e-7;

#[derive(Clone, Debug)]
pub struct SimClock {
    origin: Instant,
    speed: f32,
    paused: bool,
    paused_t: f32,
}

impl SimClock {
    pub fn new(speed: f32) -> Self {
        Self {
            origin: Instant::now(),
            speed: speed.max(MIN_SPEED),
            paused: false,
            paused_t: 0.0,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current simulation time in seconds. Frozen while paused.
    pub fn now(&self) -> f32 {
        if self.paused {
            self.paused_t
        } else {
            self.origin.elapsed().as_secs_f32() * self.speed
        }
    }

    /// Change playback speed while keeping the currently visible `t` intact.
    pub fn set_speed(&mut self, speed: f32) {
        let t = self.now();
        self.speed = speed.max(MIN_SPEED);
        if !self.paused {
            self.rewind_origin_to(t);
        } else {
            self.paused_t = t;
        }
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused_t = self.now();
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            let t = self.paused_t;
            self.paused = false;
            self.rewind_origin_to(t);
        }
    }

    /// Jump to an arbitrary simulation time (snapshot import, tests).
    pub fn set_time(&mut self, t: f32) {
        if self.paused {
            self.paused_t = t;
        } else {
            self.rewind_origin_to(t);
        }
    }

    // Re-anchor the origin so `now()` reads `t` from here on.
    fn rewind_origin_to(&mut self, t: f32) {
        let wall_offset = t / self.speed;
        self.origin = Instant::now() - std::time::Duration::from_secs_f64(wall_offset.max(0.0) as f64);
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}
