pub mod animation;
pub mod behavior;
pub mod collision;
pub mod drag;
pub mod emote;

use crate::config::EngineConfig;
use crate::debug::timer::{SystemPhase, SystemTimers};
use crate::ecs::components::PetState;
use crate::spatial::Bounds;
use collision::Collider;

/// Highest speed multiplier a tick runs at. Larger values are capped.
pub const MAX_TICK_SPEED: f32 = 16.0;

/// Treat NaN/inf as normal speed, negative as stopped and cap the rest at
/// [`MAX_TICK_SPEED`].
pub fn sanitize_speed(speed: f32) -> f32 {
    if speed.is_finite() {
        speed.clamp(0.0, MAX_TICK_SPEED)
    } else {
        1.0
    }
}

/// Clear every transition latch and age every behavior timer by one tick.
pub fn begin_tick(world: &mut hecs::World, config: &EngineConfig) {
    for (_, state) in world.query_mut::<&mut PetState>() {
        state.changed_this_tick = false;
        state.timer_ms = state.timer_ms.saturating_add(config.tick_ms);
    }
}

/// Run all simulation systems for one tick: emote ageing, collisions, then
/// per-pet behavior rules (each clamped into `bounds`), then sprite animation.
/// Emotes age before the transitions, so one shown this tick starts at 0.
///
/// Never fails, whatever state the pets are in.
#[allow(clippy::too_many_arguments)]
pub fn tick(
    world: &mut hecs::World,
    bounds: Bounds,
    speed: f32,
    config: &EngineConfig,
    rng: &mut fastrand::Rng,
    colliders: &mut Vec<Collider>,
    timers: &mut SystemTimers,
) {
    let speed = sanitize_speed(speed);

    // 1. Reset latches, age behavior timers
    begin_tick(world, config);

    // 2. Emote display timers
    timers.begin();
    emote::update(world, speed, config);
    timers.end(SystemPhase::Emote);

    // 3. Pet-vs-pet reactions
    timers.begin();
    collision::resolve(world, colliders, bounds, speed, config, rng);
    timers.end(SystemPhase::Collision);

    // 4. Behavior rules + clamp
    timers.begin();
    behavior::update(world, bounds, speed, config, rng);
    timers.end(SystemPhase::Behavior);

    // 5. Sprite frames
    timers.begin();
    animation::update(world, speed, config);
    timers.end(SystemPhase::Animation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::*;
    use glam::IVec2;
    use proptest::prelude::*;

    fn spawn(
        world: &mut hecs::World,
        pos: IVec2,
        size: i32,
        behavior: BehaviorState,
        dragging: bool,
    ) -> hecs::Entity {
        world.spawn((
            Position(pos),
            Velocity(IVec2::ZERO),
            BoxSize(IVec2::splat(size)),
            PetState {
                behavior,
                ..Default::default()
            },
            EmoteState::default(),
            Interaction {
                dragging,
                menu_open: false,
            },
        ))
    }

    fn arb_behavior() -> impl Strategy<Value = BehaviorState> {
        (0..BehaviorState::ALL.len()).prop_map(|i| BehaviorState::ALL[i])
    }

    /// Mostly on-screen, sometimes anywhere in `i32`.
    fn arb_coord() -> impl Strategy<Value = i32> {
        prop_oneof![4 => -500i32..2500, 1 => any::<i32>()]
    }

    #[test]
    fn latch_and_timer_reset_each_tick() {
        let mut world = hecs::World::new();
        let e = spawn(&mut world, IVec2::new(100, 100), 64, BehaviorState::Idle, false);
        world.get::<&mut PetState>(e).unwrap().changed_this_tick = true;
        begin_tick(&mut world, &EngineConfig::default());
        let s = *world.get::<&PetState>(e).unwrap();
        assert!(!s.changed_this_tick);
        assert_eq!(s.timer_ms, 16);
    }

    #[test]
    fn speed_is_sanitized() {
        assert_eq!(sanitize_speed(f32::NAN), 1.0);
        assert_eq!(sanitize_speed(-2.0), 0.0);
        assert_eq!(sanitize_speed(1.5), 1.5);
        assert_eq!(sanitize_speed(1.0e9), MAX_TICK_SPEED);
    }

    #[test]
    fn emote_shown_this_tick_starts_at_zero() {
        let mut world = hecs::World::new();
        let e = spawn(&mut world, IVec2::new(200, 200), 64, BehaviorState::None, false);
        world.get::<&mut PetState>(e).unwrap().timer_ms = 10_000;
        let config = EngineConfig {
            tuning: crate::config::TransitionTuning {
                random_emote_chance: 1.0,
                ..crate::config::TransitionTuning::quiet()
            },
            ..Default::default()
        };
        let mut rng = fastrand::Rng::with_seed(21);
        tick(
            &mut world,
            Bounds::new(0, 0, 1080, 1920),
            1.0,
            &config,
            &mut rng,
            &mut Vec::new(),
            &mut SystemTimers::new(),
        );
        assert!(world.get::<&PetState>(e).unwrap().changed_this_tick);
        let emote = *world.get::<&EmoteState>(e).unwrap();
        assert_ne!(emote.emote, Emote::None);
        assert_eq!(emote.timer_ms, 0);
    }

    #[test]
    fn huge_speed_and_far_positions_stay_inside() {
        let bounds = Bounds::new(0, 0, 1080, 1920);
        let config = EngineConfig::default();
        let mut rng = fastrand::Rng::with_seed(17);
        let starts = [
            IVec2::new(500, 500),
            IVec2::new(i32::MAX - 8, i32::MAX - 8),
            IVec2::new(i32::MIN + 8, i32::MIN + 8),
            IVec2::new(i32::MAX, i32::MIN),
        ];
        for &b in BehaviorState::ALL.iter() {
            for &pos in &starts {
                let mut world = hecs::World::new();
                let e = spawn(&mut world, pos, 64, b, false);
                for _ in 0..5 {
                    tick(
                        &mut world,
                        bounds,
                        1.0e9,
                        &config,
                        &mut rng,
                        &mut Vec::new(),
                        &mut SystemTimers::new(),
                    );
                }
                let p = world.get::<&Position>(e).unwrap().0;
                assert!(p.x >= 0 && p.x <= 1016, "{b:?} from {pos}: {p}");
                assert!(p.y >= 0 && p.y <= 1856, "{b:?} from {pos}: {p}");
            }
        }
    }

    #[test]
    fn wall_bounce_scenario() {
        let mut world = hecs::World::new();
        let bounds = Bounds::new(0, 0, 1080, 1920);
        let e = spawn(&mut world, IVec2::new(0, 900), 64, BehaviorState::WalkLeft, false);
        let mut rng = fastrand::Rng::with_seed(99);
        tick(
            &mut world,
            bounds,
            1.0,
            &EngineConfig::default(),
            &mut rng,
            &mut Vec::new(),
            &mut SystemTimers::new(),
        );
        assert_eq!(world.get::<&Position>(e).unwrap().0.x, 0);
        let b = world.get::<&PetState>(e).unwrap().behavior;
        assert!(matches!(b, BehaviorState::ClimbEdge | BehaviorState::WalkRight));
    }

    #[test]
    fn emote_times_out_during_tick() {
        let mut world = hecs::World::new();
        let e = spawn(&mut world, IVec2::new(200, 200), 64, BehaviorState::Idle, false);
        *world.get::<&mut EmoteState>(e).unwrap() = EmoteState {
            emote: Emote::Surprised,
            timer_ms: 2990,
        };
        let config = EngineConfig {
            tuning: crate::config::TransitionTuning::quiet(),
            ..Default::default()
        };
        let mut rng = fastrand::Rng::with_seed(1);
        tick(
            &mut world,
            Bounds::new(0, 0, 1080, 1920),
            1.0,
            &config,
            &mut rng,
            &mut Vec::new(),
            &mut SystemTimers::new(),
        );
        assert_eq!(world.get::<&EmoteState>(e).unwrap().emote, Emote::None);
    }

    proptest! {
        #[test]
        fn pets_stay_inside_bounds(
            seed in any::<u64>(),
            left in -50i32..50,
            top in -50i32..50,
            w in 100i32..1500,
            h in 100i32..2000,
            pets in prop::collection::vec(
                (arb_coord(), arb_coord(), 16i32..96, arb_behavior()),
                1..6,
            ),
            speed in prop_oneof![0.5f32..3.0, 3.0f32..1.0e9],
            ticks in 1usize..60,
        ) {
            let mut world = hecs::World::new();
            let bounds = Bounds::new(left, top, left + w, top + h);
            let entities: Vec<_> = pets
                .iter()
                .map(|&(x, y, s, b)| spawn(&mut world, IVec2::new(x, y), s, b, false))
                .collect();
            let mut rng = fastrand::Rng::with_seed(seed);
            let config = EngineConfig::default();
            let mut colliders = Vec::new();
            let mut timers = SystemTimers::new();
            for _ in 0..ticks {
                tick(&mut world, bounds, speed, &config, &mut rng, &mut colliders, &mut timers);
                for &e in &entities {
                    let pos = world.get::<&Position>(e).unwrap().0;
                    let size = world.get::<&BoxSize>(e).unwrap().0;
                    prop_assert!(pos.x >= bounds.left && pos.x <= bounds.right - size.x);
                    prop_assert!(pos.y >= bounds.top && pos.y <= bounds.bottom - size.y);
                }
            }
        }

        #[test]
        fn dragged_pets_are_untouched(
            seed in any::<u64>(),
            x in -100i32..1200,
            y in -100i32..2000,
            b in arb_behavior(),
            menu in any::<bool>(),
        ) {
            let mut world = hecs::World::new();
            let held = spawn(&mut world, IVec2::new(x, y), 64, b, !menu);
            world.get::<&mut Interaction>(held).unwrap().menu_open = menu;
            world.get::<&mut Velocity>(held).unwrap().0 = IVec2::new(3, -7);
            // A neighbour piled on top to tempt the collision resolver.
            spawn(&mut world, IVec2::new(x, y), 64, BehaviorState::ClimbEdge, false);

            let mut rng = fastrand::Rng::with_seed(seed);
            let mut colliders = Vec::new();
            let mut timers = SystemTimers::new();
            for _ in 0..10 {
                tick(
                    &mut world,
                    Bounds::new(0, 0, 1080, 1920),
                    1.0,
                    &EngineConfig::default(),
                    &mut rng,
                    &mut colliders,
                    &mut timers,
                );
            }
            prop_assert_eq!(world.get::<&Position>(held).unwrap().0, IVec2::new(x, y));
            prop_assert_eq!(world.get::<&Velocity>(held).unwrap().0, IVec2::new(3, -7));
            prop_assert_eq!(world.get::<&PetState>(held).unwrap().behavior, b);
        }

        #[test]
        fn one_transition_per_tick(
            seed in any::<u64>(),
            pets in prop::collection::vec((0i32..200, 0i32..200, arb_behavior()), 2..8),
        ) {
            // Everything piled into a small box near the top so collisions and
            // timed rules both fire.
            let mut world = hecs::World::new();
            let entities: Vec<_> = pets
                .iter()
                .map(|&(x, y, b)| {
                    let e = spawn(&mut world, IVec2::new(x, y), 64, b, false);
                    world.get::<&mut PetState>(e).unwrap().timer_ms = 10_000;
                    e
                })
                .collect();
            let config = EngineConfig {
                tuning: crate::config::TransitionTuning {
                    idle_wander_chance: 1.0,
                    walk_rest_chance: 1.0,
                    climb_jump_chance: 1.0,
                    climb_fall_chance: 1.0,
                    jump_fall_chance: 1.0,
                    fly_fall_chance: 1.0,
                    ..Default::default()
                },
                ..Default::default()
            };
            let mut rng = fastrand::Rng::with_seed(seed);
            let before: Vec<_> = entities
                .iter()
                .map(|&e| world.get::<&PetState>(e).unwrap().timer_ms)
                .collect();
            tick(
                &mut world,
                Bounds::new(0, 0, 400, 400),
                1.0,
                &config,
                &mut rng,
                &mut Vec::new(),
                &mut SystemTimers::new(),
            );
            for (&e, &t0) in entities.iter().zip(&before) {
                let s = *world.get::<&PetState>(e).unwrap();
                // Either untouched (timer kept ageing) or exactly one commit
                // (timer restarted and latch set).
                if s.changed_this_tick {
                    prop_assert_eq!(s.timer_ms, 0);
                } else {
                    prop_assert_eq!(s.timer_ms, t0 + 16);
                }
            }
        }
    }
}
