use crate::config::{EngineConfig, TransitionTuning};
use crate::ecs::components::{BehaviorState, Emote, EmoteState};

/// Show `emote` from now, restarting its display timer.
pub fn show(state: &mut EmoteState, emote: Emote) {
    state.emote = emote;
    state.timer_ms = 0;
}

/// Emote side effect of a committed behavior transition.
pub fn on_transition(
    state: &mut EmoteState,
    next: BehaviorState,
    tuning: &TransitionTuning,
    rng: &mut fastrand::Rng,
) {
    if next == BehaviorState::Sleep {
        show(state, Emote::Sleepy);
    } else if rng.f32() < tuning.random_emote_chance {
        let pick = Emote::VISIBLE[rng.usize(0..Emote::VISIBLE.len())];
        show(state, pick);
    }
}

/// Age a visible emote by `dt_ms`; it clears once past `duration_ms`.
pub fn advance(state: &mut EmoteState, dt_ms: u32, duration_ms: u32) {
    if state.emote == Emote::None {
        return;
    }
    state.timer_ms = state.timer_ms.saturating_add(dt_ms);
    if state.timer_ms > duration_ms {
        state.emote = Emote::None;
        state.timer_ms = 0;
    }
}

/// Age every pet's emote, held pets included.
pub fn update(world: &mut hecs::World, speed: f32, config: &EngineConfig) {
    let dt_ms = (config.tick_ms as f32 * speed) as u32;
    for (_, emote) in world.query_mut::<&mut EmoteState>() {
        advance(emote, dt_ms, config.emote_duration_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_duration() {
        let mut e = EmoteState {
            emote: Emote::Surprised,
            timer_ms: 2990,
        };
        advance(&mut e, 16, 3000);
        assert_eq!(e.emote, Emote::None);
        assert_eq!(e.timer_ms, 0);
    }

    #[test]
    fn stays_up_until_past_duration() {
        let mut e = EmoteState {
            emote: Emote::Happy,
            timer_ms: 2984,
        };
        advance(&mut e, 16, 3000);
        assert_eq!(e.emote, Emote::Happy);
        assert_eq!(e.timer_ms, 3000);
    }

    #[test]
    fn none_does_not_accumulate() {
        let mut e = EmoteState::default();
        advance(&mut e, 16, 3000);
        assert_eq!(e.timer_ms, 0);
    }

    #[test]
    fn certain_random_emote_is_visible() {
        let tuning = TransitionTuning {
            random_emote_chance: 1.0,
            ..TransitionTuning::quiet()
        };
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..50 {
            let mut e = EmoteState::default();
            on_transition(&mut e, BehaviorState::Idle, &tuning, &mut rng);
            assert_ne!(e.emote, Emote::None);
        }
    }

    #[test]
    fn world_update_scales_with_speed() {
        let mut world = hecs::World::new();
        let pet = world.spawn((EmoteState {
            emote: Emote::Angry,
            timer_ms: 0,
        },));
        update(&mut world, 2.0, &EngineConfig::default());
        assert_eq!(world.get::<&EmoteState>(pet).unwrap().timer_ms, 32);
    }
}
