//! Device Timer
//!
//! Millisecond clock shared with the engine. It can be paused so that time
//! spent sleeping is excluded from elapsed-time accounting.

use std::time::{Duration, Instant};

/// Timer collaborator used by the device.
pub trait Timer {
    /// Advance the virtual clock. Called once per [`run`](crate::device::Device::run).
    fn tick(&mut self);

    /// Wall-clock milliseconds since the timer was created. Not affected by
    /// `stop`; wraps after roughly 49 days.
    fn real_time_ms(&self) -> u32;

    /// Virtual milliseconds, frozen while stopped.
    fn time_ms(&self) -> u32;

    fn stop(&mut self);
    fn start(&mut self);
    fn is_stopped(&self) -> bool;
}

/// [`Timer`] over [`Instant`].
#[derive(Debug, Clone)]
pub struct SystemTimer {
    origin: Instant,
    /// Total time spent stopped, subtracted from virtual time
    paused_total: Duration,
    stopped_at: Option<Instant>,
    /// Virtual time sampled at the last tick
    last_tick_ms: u32,
}

impl Default for SystemTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemTimer {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            paused_total: Duration::ZERO,
            stopped_at: None,
            last_tick_ms: 0,
        }
    }

    fn virtual_elapsed(&self, now: Instant) -> Duration {
        let stopped_for = self
            .stopped_at
            .map(|at| now.duration_since(at))
            .unwrap_or_default();
        now.duration_since(self.origin)
            .saturating_sub(self.paused_total + stopped_for)
    }
}

fn as_ms(duration: Duration) -> u32 {
    // Wrap like a 32-bit millisecond counter
    duration.as_millis() as u32
}

impl Timer for SystemTimer {
    fn tick(&mut self) {
        self.last_tick_ms = as_ms(self.virtual_elapsed(Instant::now()));
    }

    fn real_time_ms(&self) -> u32 {
        as_ms(self.origin.elapsed())
    }

    fn time_ms(&self) -> u32 {
        self.last_tick_ms
    }

    fn stop(&mut self) {
        if self.stopped_at.is_none() {
            self.stopped_at = Some(Instant::now());
        }
    }

    fn start(&mut self) {
        if let Some(at) = self.stopped_at.take() {
            self.paused_total += at.elapsed();
        }
    }

    fn is_stopped(&self) -> bool {
        self.stopped_at.is_some()
    }
}
