use std::time::Duration;

use instant::Instant;

use crate::debug::TickStats;
use crate::sim::Simulation;
use crate::spatial::Bounds;

/// Max accumulated time before we clamp (prevents spiral of death).
const MAX_ACCUMULATOR: Duration = Duration::from_millis(250);
/// Snooze length when the host does not pick one.
pub const DEFAULT_SNOOZE: Duration = Duration::from_secs(30 * 60);

/// Fixed-timestep loop around [`Simulation::step`].
///
/// The host calls [`TickDriver::pump`] from its frame callback (or
/// [`TickDriver::advance`] with its own clock); wall time accumulates and is
/// spent in whole ticks. Stopped (screen off) and snoozed drivers run no ticks.
pub struct TickDriver {
    tick: Duration,
    accumulator: Duration,
    running: bool,
    snooze_left: Option<Duration>,
    last_pump: Option<Instant>,
    stats: TickStats,
}

impl TickDriver {
    pub fn new(tick_ms: u32) -> Self {
        Self {
            tick: Duration::from_millis(tick_ms.max(1) as u64),
            accumulator: Duration::ZERO,
            running: false,
            snooze_left: None,
            last_pump: None,
            stats: TickStats::new(),
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            log::info!("Tick driver started");
        }
        self.running = true;
    }

    /// Stop ticking. Time spent stopped is not caught up on restart.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Tick driver stopped");
        }
        self.running = false;
        self.accumulator = Duration::ZERO;
        self.last_pump = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Hide and freeze the pets for `duration`; they come back by themselves.
    pub fn snooze(&mut self, duration: Duration) {
        log::info!("Pets snoozed for {}s", duration.as_secs());
        self.snooze_left = Some(duration);
        self.accumulator = Duration::ZERO;
    }

    pub fn wake(&mut self) {
        if self.snooze_left.take().is_some() {
            log::info!("Snooze over, pets back");
        }
    }

    pub fn is_snoozed(&self) -> bool {
        self.snooze_left.is_some()
    }

    /// Whether the host should show the pets at all.
    pub fn pets_visible(&self) -> bool {
        self.running && !self.is_snoozed()
    }

    pub fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Measure wall time since the previous pump and spend it.
    pub fn pump(&mut self, sim: &mut Simulation, bounds: Bounds) -> u32 {
        let now = Instant::now();
        let dt = self
            .last_pump
            .map_or(Duration::ZERO, |last| now.duration_since(last));
        self.last_pump = Some(now);
        self.advance(dt, sim, bounds)
    }

    /// Spend `dt` of wall time in whole ticks. Returns how many ran.
    pub fn advance(&mut self, dt: Duration, sim: &mut Simulation, bounds: Bounds) -> u32 {
        if !self.running {
            return 0;
        }

        if let Some(left) = self.snooze_left {
            match left.checked_sub(dt) {
                Some(rest) if !rest.is_zero() => {
                    self.snooze_left = Some(rest);
                    return 0;
                }
                _ => {
                    self.wake();
                    return 0;
                }
            }
        }

        self.accumulator = (self.accumulator + dt).min(MAX_ACCUMULATOR);

        let mut ticks = 0;
        while self.accumulator >= self.tick {
            sim.step(bounds);
            self.accumulator -= self.tick;
            ticks += 1;
        }

        self.stats.record_pump(dt.as_secs_f64(), ticks, sim.timers());
        ticks
    }
}
