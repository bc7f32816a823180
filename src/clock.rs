//! Tick timing for driving a flock.
//!
//! The steering update takes the elapsed time of each tick as a plain
//! `f32`. [`TickClock`] produces it from wall time, with pause, time scale,
//! an optional fixed delta for deterministic runs, and a cap on oversized
//! deltas (e.g. after a debugger break).
//!
//! # Example
//!
//! ```ignore
//! use flocksteer::prelude::*;
//!
//! let mut clock = TickClock::new();
//! clock.set_fixed_delta(Some(1.0 / 60.0));
//!
//! loop {
//!     let dt = clock.update();
//!     flock.step(dt, target);
//! }
//! ```

use std::time::{Duration, Instant};

/// Largest delta handed out by default, in seconds.
pub const DEFAULT_MAX_DELTA: f32 = 0.25;

/// Per-tick elapsed time source.
#[derive(Debug)]
pub struct TickClock {
    /// When the last tick occurred.
    last_tick: Instant,
    /// Scaled simulation time accumulated over all ticks.
    elapsed_secs: f32,
    /// Delta handed out by the last `update`.
    delta_secs: f32,
    /// Ticks since start or last reset.
    tick_count: u64,
    paused: bool,
    /// Fixed delta for deterministic stepping (optional).
    fixed_delta: Option<f32>,
    /// Time scale multiplier (1.0 = normal speed).
    time_scale: f32,
    /// Upper bound on a single unscaled delta.
    max_delta: f32,
}

impl TickClock {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            tick_count: 0,
            paused: false,
            fixed_delta: None,
            time_scale: 1.0,
            max_delta: DEFAULT_MAX_DELTA,
        }
    }

    /// Advance one tick and return its delta in seconds.
    ///
    /// Returns 0 while paused. Paused ticks are not counted.
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();
        let raw_delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;

        if self.paused {
            self.delta_secs = 0.0;
            return 0.0;
        }

        let mut delta = self.fixed_delta.unwrap_or(raw_delta);
        if delta > self.max_delta {
            log::warn!(
                "tick delta {:.3}s exceeds {:.3}s, clamping",
                delta,
                self.max_delta
            );
            delta = self.max_delta;
        }

        self.delta_secs = delta * self.time_scale;
        self.elapsed_secs += self.delta_secs;
        self.tick_count += 1;
        self.delta_secs
    }

    /// Scaled simulation time in seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Delta of the last tick in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    #[inline]
    pub fn delta_duration(&self) -> Duration {
        Duration::from_secs_f32(self.delta_secs)
    }

    /// Ticks since start.
    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick_count
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Pause time progression.
    ///
    /// While paused, `update()` returns 0 and `elapsed()` stops increasing.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after pausing. The paused span is not handed out as delta.
    pub fn resume(&mut self) {
        if self.paused {
            self.last_tick = Instant::now();
            self.paused = false;
        }
    }

    /// Set a fixed delta for deterministic updates. `None` uses wall time.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta.map(|d| d.max(0.0));
    }

    /// Set time scale multiplier. Negative values clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Cap a single unscaled delta, in seconds.
    pub fn set_max_delta(&mut self, max_delta: f32) {
        self.max_delta = max_delta.max(0.0);
    }

    /// Reset the clock to its initial state, keeping its settings.
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
        self.elapsed_secs = 0.0;
        self.delta_secs = 0.0;
        self.tick_count = 0;
        self.paused = false;
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}
