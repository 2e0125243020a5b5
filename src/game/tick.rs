use std::time::Instant;

/// Source of monotonic time, in seconds
pub trait Clock {
    fn now(&self) -> f64;
}

/// Seconds elapsed since the clock was created
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Gates simulation ticks on elapsed time
///
/// A tick is due once `pace` seconds have passed since the previous one.
/// Missed intervals are not replayed: however late the check comes, it
/// fires at most once and restarts the interval from `now`.
#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    last_tick: f64,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now: f64) -> Self {
        Self { last_tick: now }
    }

    pub fn last_tick(&self) -> f64 {
        self.last_tick
    }

    pub fn is_due(&mut self, now: f64, pace: f64) -> bool {
        if now - self.last_tick >= pace {
            self.last_tick = now;
            return true;
        }
        false
    }
}
