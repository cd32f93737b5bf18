/// Probabilities and time thresholds for the behavior state machine.
///
/// Chances are per-tick probabilities in `[0, 1]`; thresholds are milliseconds
/// of behavior time that must pass before the roll is attempted.
#[derive(Debug, Clone, Copy)]
pub struct TransitionTuning {
    /// Idle → random movement.
    pub idle_wander_after_ms: u32,
    pub idle_wander_chance: f32,
    /// Walking → idle.
    pub walk_rest_after_ms: u32,
    pub walk_rest_chance: f32,
    /// Walking into a wall: climb it, otherwise turn around.
    pub wall_climb_chance: f32,
    /// On entering a climb: crawl down instead of up.
    pub climb_down_chance: f32,
    /// Climbing → jump off the wall.
    pub climb_jump_after_ms: u32,
    pub climb_jump_chance: f32,
    /// Climbing → let go and fall.
    pub climb_fall_after_ms: u32,
    pub climb_fall_chance: f32,
    /// Mid-jump → give up the arc and fall.
    pub jump_fall_chance: f32,
    /// Flying → fall.
    pub fly_fall_after_ms: u32,
    pub fly_fall_chance: f32,
    /// Overlapping pets within this many px of the top edge both fall.
    pub ceiling_margin: i32,
    /// Any committed transition shows a random emote.
    pub random_emote_chance: f32,
    /// A jump launch shows SURPRISED.
    pub jump_surprise_chance: f32,
}

impl Default for TransitionTuning {
    fn default() -> Self {
        Self {
            idle_wander_after_ms: 2000,
            idle_wander_chance: 0.05,
            walk_rest_after_ms: 3000,
            walk_rest_chance: 0.02,
            wall_climb_chance: 0.5,
            climb_down_chance: 0.25,
            climb_jump_after_ms: 2000,
            climb_jump_chance: 0.02,
            climb_fall_after_ms: 4000,
            climb_fall_chance: 0.005,
            jump_fall_chance: 0.005,
            fly_fall_after_ms: 2000,
            fly_fall_chance: 0.005,
            ceiling_margin: 10,
            random_emote_chance: 0.05,
            jump_surprise_chance: 0.3,
        }
    }
}

impl TransitionTuning {
    /// Every timed/random roll disabled. Boundary reactions still happen.
    /// Handy for scripted scenarios.
    pub fn quiet() -> Self {
        Self {
            idle_wander_chance: 0.0,
            walk_rest_chance: 0.0,
            climb_jump_chance: 0.0,
            climb_fall_chance: 0.0,
            jump_fall_chance: 0.0,
            fly_fall_chance: 0.0,
            random_emote_chance: 0.0,
            jump_surprise_chance: 0.0,
            ..Self::default()
        }
    }
}

/// Engine-wide constants. Read-only to every system.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Nominal tick length in milliseconds.
    pub tick_ms: u32,
    /// How long an emote stays up.
    pub emote_duration_ms: u32,
    /// How long a freshly spawned pet waits before picking a movement.
    pub none_settle_ms: u32,
    /// Unscaled pet box edge in pixels.
    pub base_size: i32,
    pub tuning: TransitionTuning,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            emote_duration_ms: 3000,
            none_settle_ms: 500,
            base_size: 64,
            tuning: TransitionTuning::default(),
        }
    }
}

impl EngineConfig {
    /// Box edge for a given user scale.
    pub fn box_edge(&self, scale: f32) -> i32 {
        ((self.base_size as f32 * scale) as i32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_edge_follows_scale() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.box_edge(1.0), 64);
        assert_eq!(cfg.box_edge(0.5), 32);
        assert_eq!(cfg.box_edge(1.5), 96);
        assert_eq!(cfg.box_edge(0.0), 1);
    }

    #[test]
    fn quiet_tuning_keeps_thresholds() {
        let q = TransitionTuning::quiet();
        assert_eq!(q.idle_wander_chance, 0.0);
        assert_eq!(q.ceiling_margin, 10);
        assert_eq!(q.wall_climb_chance, 0.5);
    }
}
