//! Growth clock: wall-clock seconds in, cycle progress out.

use crate::constants::{CYCLE_SECS, MATURITY_SECS};
use crate::error::SceneError;

#[derive(Clone, Debug, PartialEq)]
pub struct GrowthClock {
    start_time: f64,
    paused_at: Option<f64>,
    speed: f64,
}

impl GrowthClock {
    pub fn new(now: f64) -> Self {
        Self {
            start_time: now,
            paused_at: None,
            speed: 1.0,
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn paused_at(&self) -> Option<f64> {
        self.paused_at
    }

    /// Speed-scaled seconds since the cycle began, excluding paused spans.
    pub fn elapsed(&self, now: f64) -> f64 {
        let now = self.paused_at.unwrap_or(now);
        (now - self.start_time) * self.speed
    }

    /// Fraction of the growth cycle completed, in [0, 1].
    pub fn progress(&self, now: f64) -> f32 {
        (self.elapsed(now) / CYCLE_SECS).clamp(0.0, 1.0) as f32
    }

    /// Post-cycle bloom in [0, 1]; zero until the cycle completes.
    pub fn maturity_boost(&self, now: f64) -> f32 {
        ((self.elapsed(now) - CYCLE_SECS) / MATURITY_SECS).clamp(0.0, 1.0) as f32
    }

    /// Change the multiplier without a visible jump in progress.
    pub fn set_speed(&mut self, now: f64, speed: f64) -> Result<(), SceneError> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(SceneError::InvalidSpeed(speed));
        }
        let reference = self.paused_at.unwrap_or(now);
        let raw = reference - self.start_time;
        self.start_time = reference - raw * (self.speed / speed);
        self.speed = speed;
        Ok(())
    }

    pub fn pause(&mut self, now: f64) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    pub fn resume(&mut self, now: f64) {
        if let Some(at) = self.paused_at.take() {
            self.start_time += now - at;
        }
    }

    /// Flip between running and paused; returns true when now paused.
    pub fn toggle(&mut self, now: f64) -> bool {
        if self.is_paused() {
            self.resume(now);
        } else {
            self.pause(now);
        }
        self.is_paused()
    }

    /// Discard accumulated progress. A paused clock stays paused at zero.
    pub fn restart(&mut self, now: f64) {
        self.start_time = now;
        if self.paused_at.is_some() {
            self.paused_at = Some(now);
        }
    }
}
