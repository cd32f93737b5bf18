use instant::Instant;

/// Which phase of the simulation step is being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SystemPhase {
    Collision = 0,
    Behavior = 1,
    Emote = 2,
    Animation = 3,
    BuildInstances = 4,
}

impl SystemPhase {
    pub const COUNT: usize = 5;

    pub const ALL: [SystemPhase; Self::COUNT] = [
        Self::Collision,
        Self::Behavior,
        Self::Emote,
        Self::Animation,
        Self::BuildInstances,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Collision => "Collision",
            Self::Behavior => "Behavior",
            Self::Emote => "Emote",
            Self::Animation => "Animation",
            Self::BuildInstances => "Build Inst.",
        }
    }
}

/// Per-system timing with exponential moving average smoothing.
pub struct SystemTimers {
    /// EMA-smoothed duration in microseconds per phase.
    pub durations_us: [f64; SystemPhase::COUNT],
    /// Timestamp when `begin()` was called.
    start: Instant,
}

const EMA_ALPHA: f64 = 0.1;

impl Default for SystemTimers {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemTimers {
    pub fn new() -> Self {
        Self {
            durations_us: [0.0; SystemPhase::COUNT],
            start: Instant::now(),
        }
    }

    /// Call before a system runs.
    pub fn begin(&mut self) {
        self.start = Instant::now();
    }

    /// Call after a system finishes. Records elapsed time for `phase`.
    pub fn end(&mut self, phase: SystemPhase) {
        let elapsed_us = self.start.elapsed().as_secs_f64() * 1_000_000.0;
        self.record(phase, elapsed_us);
    }

    fn record(&mut self, phase: SystemPhase, elapsed_us: f64) {
        let idx = phase as usize;
        self.durations_us[idx] =
            self.durations_us[idx] * (1.0 - EMA_ALPHA) + elapsed_us * EMA_ALPHA;
    }

    /// Sum of all phase durations (microseconds).
    pub fn total_us(&self) -> f64 {
        self.durations_us.iter().sum()
    }

    /// One-line breakdown for the periodic stats log.
    pub fn summary(&self) -> String {
        SystemPhase::ALL
            .iter()
            .map(|&p| format!("{} {:.0}us", p.label(), self.durations_us[p as usize]))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
