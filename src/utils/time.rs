use std::time::{Duration, Instant};

/// Frame clock producing the delta passed to `advance`.
///
/// Deltas come either from the wall clock ([`Timer::tick`]) or from a fixed
/// step ([`Timer::step`]) for deterministic playback in tools and tests.
#[derive(Debug, Clone)]
pub struct Timer {
    last_tick: Instant,
    delta: Duration,
    elapsed: Duration,
    frame_count: u64,
    paused: bool,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            paused: false,
        }
    }

    /// Measures the wall-clock time since the previous tick and returns it in
    /// seconds. A paused timer reports zero but keeps tracking the clock.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let measured = now - self.last_tick;
        self.last_tick = now;
        self.record(measured)
    }

    /// Advances by exactly `delta`, ignoring the wall clock.
    pub fn step(&mut self, delta: Duration) -> f32 {
        self.last_tick = Instant::now();
        self.record(delta)
    }

    fn record(&mut self, measured: Duration) -> f32 {
        self.delta = if self.paused { Duration::ZERO } else { measured };
        self.elapsed += self.delta;
        self.frame_count += 1;
        self.delta.as_secs_f32()
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Delta of the last tick, in seconds.
    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Sum of every unpaused delta.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
