pub mod ring;
pub mod timer;

use self::ring::RingBuffer;
use self::timer::SystemTimers;

/// Number of step durations kept for the rolling averages.
const HISTORY_LEN: usize = 300;
/// How often to log tick statistics (seconds of wall time).
const LOG_INTERVAL: f64 = 5.0;

/// Rolling tick statistics, logged periodically at `info`.
pub struct TickStats {
    /// Wall time between driver pumps (seconds).
    pub pump_times: RingBuffer<f64>,
    pub tick_count: u64,
    pub tick_rate: f64,

    log_timer: f64,
    log_ticks: u64,
    log_pumps: u32,
    log_pump_sum: f64,
    log_pump_max: f64,
}

impl Default for TickStats {
    fn default() -> Self {
        Self::new()
    }
}

impl TickStats {
    pub fn new() -> Self {
        Self {
            pump_times: RingBuffer::new(HISTORY_LEN),
            tick_count: 0,
            tick_rate: 0.0,
            log_timer: 0.0,
            log_ticks: 0,
            log_pumps: 0,
            log_pump_sum: 0.0,
            log_pump_max: 0.0,
        }
    }

    /// Average pump interval over the history window (seconds).
    pub fn avg_pump(&self) -> f64 {
        if self.pump_times.is_empty() {
            return 0.0;
        }
        self.pump_times.iter().sum::<f64>() / self.pump_times.len() as f64
    }

    /// Record one driver pump of `dt` seconds that ran `ticks` steps.
    /// Returns true when a stats line was logged.
    pub fn record_pump(&mut self, dt: f64, ticks: u32, timers: &SystemTimers) -> bool {
        self.pump_times.push(dt);
        self.tick_count += ticks as u64;

        self.log_pumps += 1;
        self.log_ticks += ticks as u64;
        self.log_pump_sum += dt;
        self.log_pump_max = self.log_pump_max.max(dt);
        self.log_timer += dt;

        if self.log_timer < LOG_INTERVAL {
            return false;
        }

        self.tick_rate = self.log_ticks as f64 / self.log_timer;
        log::info!(
            "Ticks/s: {:.0} | pump avg: {:.2}ms | max: {:.2}ms | total ticks: {} | {}",
            self.tick_rate,
            self.log_pump_sum / self.log_pumps as f64 * 1000.0,
            self.log_pump_max * 1000.0,
            self.tick_count,
            timers.summary(),
        );
        self.log_timer = 0.0;
        self.log_ticks = 0;
        self.log_pumps = 0;
        self.log_pump_sum = 0.0;
        self.log_pump_max = 0.0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logs_every_interval() {
        let mut stats = TickStats::new();
        let timers = SystemTimers::new();
        let mut logged = 0;
        // Quarter-second pumps: exactly 20 per interval.
        for _ in 0..30 {
            if stats.record_pump(0.25, 15, &timers) {
                logged += 1;
            }
        }
        assert_eq!(logged, 1);
        assert_eq!(stats.tick_count, 450);
        assert_eq!(stats.tick_rate, 60.0);
        assert_eq!(stats.avg_pump(), 0.25);
    }
}
