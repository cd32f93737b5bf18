use glam::IVec2;

use crate::config::{EngineConfig, TransitionTuning};
use crate::ecs::components::{
    BehaviorState, BoxSize, EmoteState, Emote, Interaction, PetState, Position, Velocity,
};
use crate::ecs::systems::emote;
use crate::spatial::Bounds;

/// Walk speed in px/tick at speed 1.0.
const WALK_SPEED: i32 = 4;
/// Fall speed in px/tick.
const FALL_SPEED: i32 = 10;
/// Climb speed in px/tick.
const CLIMB_SPEED: i32 = 3;
/// Fly (rise) speed in px/tick.
const FLY_SPEED: i32 = 4;
/// Horizontal launch speed of a wall jump.
const JUMP_SPEED_X: i32 = 15;
/// Vertical launch speed of a wall jump (upwards).
const JUMP_SPEED_Y: i32 = 10;
/// Per-tick downward pull during a jump arc.
const GRAVITY: i32 = 1;

/// Mutable view of one pet for the duration of a rule.
pub struct PetMut<'a> {
    pub pos: &'a mut IVec2,
    pub vel: &'a mut IVec2,
    pub size: IVec2,
    pub state: &'a mut PetState,
    pub emote: &'a mut EmoteState,
}

/// Per-tick inputs shared by every rule.
#[derive(Clone, Copy)]
pub struct Rules<'a> {
    pub bounds: Bounds,
    pub speed: f32,
    pub config: &'a EngineConfig,
}

impl Rules<'_> {
    fn tuning(&self) -> &TransitionTuning {
        &self.config.tuning
    }

    /// Scale a base px/tick rate by the speed multiplier (truncating).
    fn scaled(&self, base: i32) -> i32 {
        (base as f32 * self.speed) as i32
    }
}

/// What a behavior rule wants after moving the pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Stay,
    Change(BehaviorState),
    /// Launch off the current wall.
    Jump,
}

fn chance(rng: &mut fastrand::Rng, p: f32) -> bool {
    rng.f32() < p
}

/// Commit a behavior change unless one already happened this tick.
///
/// This is the only place behavior is written during a tick; the collision
/// resolver goes through it too. Re-entering the current behavior counts as a
/// transition (timer reset, latch set).
pub fn commit(
    state: &mut PetState,
    emote: &mut EmoteState,
    next: BehaviorState,
    tuning: &TransitionTuning,
    rng: &mut fastrand::Rng,
) -> bool {
    if state.changed_this_tick {
        return false;
    }
    log::trace!("{} -> {}", state.behavior.label(), next.label());
    state.behavior = next;
    state.timer_ms = 0;
    state.changed_this_tick = true;
    emote::on_transition(emote, next, tuning, rng);
    true
}

/// Switch to JUMP and launch toward the middle of the bounds.
/// Velocity is only touched if the transition actually commits.
pub fn start_jump(pet: &mut PetMut, rules: &Rules, rng: &mut fastrand::Rng) -> bool {
    if !commit(pet.state, pet.emote, BehaviorState::Jump, rules.tuning(), rng) {
        return false;
    }
    let dx = rules.scaled(JUMP_SPEED_X);
    pet.vel.x = if pet.pos.x < rules.bounds.center_x() { dx } else { -dx };
    pet.vel.y = -rules.scaled(JUMP_SPEED_Y);
    if chance(rng, rules.tuning().jump_surprise_chance) {
        emote::show(pet.emote, Emote::Surprised);
    }
    true
}

/// Run the active behavior's rule, apply its outcome and clamp into bounds.
pub fn step(pet: &mut PetMut, rules: &Rules, rng: &mut fastrand::Rng) {
    let outcome = match pet.state.behavior {
        BehaviorState::None => update_none(pet, rules, rng),
        BehaviorState::Idle => update_idle(pet, rules, rng),
        BehaviorState::WalkLeft => update_walk(pet, rules, rng, -1),
        BehaviorState::WalkRight => update_walk(pet, rules, rng, 1),
        BehaviorState::Fall => update_fall(pet, rules, rng),
        BehaviorState::ClimbEdge => update_climb(pet, rules, rng),
        BehaviorState::Jump => update_jump(pet, rules, rng),
        BehaviorState::Fly => update_fly(pet, rules, rng),
        // No dedicated rule: fall until landing.
        BehaviorState::Sleep | BehaviorState::Interact | BehaviorState::Collide => {
            update_fall(pet, rules, rng)
        }
    };

    match outcome {
        Outcome::Stay => {}
        Outcome::Change(next) => {
            commit(pet.state, pet.emote, next, rules.tuning(), rng);
        }
        Outcome::Jump => {
            start_jump(pet, rules, rng);
        }
    }

    *pet.pos = rules.bounds.clamp(*pet.pos, pet.size);
}

fn update_none(pet: &mut PetMut, rules: &Rules, rng: &mut fastrand::Rng) -> Outcome {
    *pet.vel = IVec2::ZERO;
    if pet.state.timer_ms > rules.config.none_settle_ms {
        return Outcome::Change(BehaviorState::random_movement(rng));
    }
    Outcome::Stay
}

fn update_idle(pet: &mut PetMut, rules: &Rules, rng: &mut fastrand::Rng) -> Outcome {
    *pet.vel = IVec2::ZERO;
    let t = rules.tuning();
    if pet.state.timer_ms > t.idle_wander_after_ms && chance(rng, t.idle_wander_chance) {
        return Outcome::Change(BehaviorState::random_movement(rng));
    }
    Outcome::Stay
}

/// `dir` is -1 for left, +1 for right.
fn update_walk(pet: &mut PetMut, rules: &Rules, rng: &mut fastrand::Rng, dir: i32) -> Outcome {
    let t = rules.tuning();
    *pet.vel = IVec2::new(dir * rules.scaled(WALK_SPEED), 0);
    pet.pos.x = pet.pos.x.saturating_add(pet.vel.x);

    let (hit, wall_x, turn) = if dir < 0 {
        (
            rules.bounds.hits_left_wall(*pet.pos),
            rules.bounds.left,
            BehaviorState::WalkRight,
        )
    } else {
        (
            rules.bounds.hits_right_wall(*pet.pos, pet.size),
            rules.bounds.max_x(pet.size),
            BehaviorState::WalkLeft,
        )
    };

    if hit {
        pet.pos.x = wall_x;
        let next = if chance(rng, t.wall_climb_chance) {
            BehaviorState::ClimbEdge
        } else {
            turn
        };
        return Outcome::Change(next);
    }
    if pet.state.timer_ms > t.walk_rest_after_ms && chance(rng, t.walk_rest_chance) {
        return Outcome::Change(BehaviorState::Idle);
    }
    Outcome::Stay
}

fn update_fall(pet: &mut PetMut, rules: &Rules, rng: &mut fastrand::Rng) -> Outcome {
    *pet.vel = IVec2::new(0, rules.scaled(FALL_SPEED));
    pet.pos.y = pet.pos.y.saturating_add(pet.vel.y);

    if rules.bounds.hits_floor(*pet.pos, pet.size) {
        pet.pos.y = rules.bounds.max_y(pet.size);
        return Outcome::Change(BehaviorState::random_movement(rng));
    }
    Outcome::Stay
}

fn update_climb(pet: &mut PetMut, rules: &Rules, rng: &mut fastrand::Rng) -> Outcome {
    let t = rules.tuning();
    pet.vel.x = 0;
    // Direction is picked once per climb and held.
    if pet.vel.y == 0 {
        let v = rules.scaled(CLIMB_SPEED);
        pet.vel.y = if chance(rng, t.climb_down_chance) { v } else { -v };
    }
    pet.pos.y = pet.pos.y.saturating_add(pet.vel.y);

    if rules.bounds.hits_ceiling(*pet.pos) {
        pet.pos.y = rules.bounds.top;
        return Outcome::Change(BehaviorState::random_movement(rng));
    }
    if rules.bounds.hits_floor(*pet.pos, pet.size) {
        pet.pos.y = rules.bounds.max_y(pet.size);
        return Outcome::Change(BehaviorState::random_movement(rng));
    }
    if pet.state.timer_ms > t.climb_jump_after_ms && chance(rng, t.climb_jump_chance) {
        return Outcome::Jump;
    }
    if pet.state.timer_ms > t.climb_fall_after_ms && chance(rng, t.climb_fall_chance) {
        return Outcome::Change(BehaviorState::Fall);
    }
    Outcome::Stay
}

fn update_jump(pet: &mut PetMut, rules: &Rules, rng: &mut fastrand::Rng) -> Outcome {
    pet.pos.x = pet.pos.x.saturating_add(pet.vel.x);
    pet.vel.y = pet.vel.y.saturating_add(rules.scaled(GRAVITY).max(1));
    pet.pos.y = pet.pos.y.saturating_add(pet.vel.y);

    if rules.bounds.hits_left_wall(*pet.pos) {
        return stick_to_wall(pet, rules.bounds.left);
    }
    if rules.bounds.hits_right_wall(*pet.pos, pet.size) {
        return stick_to_wall(pet, rules.bounds.max_x(pet.size));
    }
    if rules.bounds.hits_floor(*pet.pos, pet.size) {
        pet.pos.y = rules.bounds.max_y(pet.size);
        return Outcome::Change(BehaviorState::random_movement(rng));
    }
    if chance(rng, rules.tuning().jump_fall_chance) {
        return Outcome::Change(BehaviorState::Fall);
    }
    Outcome::Stay
}

fn stick_to_wall(pet: &mut PetMut, x: i32) -> Outcome {
    pet.pos.x = x;
    pet.vel.y = 0;
    Outcome::Change(BehaviorState::ClimbEdge)
}

fn update_fly(pet: &mut PetMut, rules: &Rules, rng: &mut fastrand::Rng) -> Outcome {
    let t = rules.tuning();
    *pet.vel = IVec2::new(0, -rules.scaled(FLY_SPEED));
    pet.pos.y = pet.pos.y.saturating_add(pet.vel.y);

    if rules.bounds.hits_ceiling(*pet.pos) {
        pet.pos.y = rules.bounds.top;
        let next = if rng.bool() {
            BehaviorState::WalkLeft
        } else {
            BehaviorState::WalkRight
        };
        return Outcome::Change(next);
    }
    if pet.state.timer_ms > t.fly_fall_after_ms && chance(rng, t.fly_fall_chance) {
        return Outcome::Change(BehaviorState::Fall);
    }
    Outcome::Stay
}

/// Advance every pet not held by the host's input layer by one tick.
pub fn update(
    world: &mut hecs::World,
    bounds: Bounds,
    speed: f32,
    config: &EngineConfig,
    rng: &mut fastrand::Rng,
) {
    let rules = Rules {
        bounds,
        speed,
        config,
    };
    for (_, (pos, vel, size, state, emote, interaction)) in world.query_mut::<(
        &mut Position,
        &mut Velocity,
        &BoxSize,
        &mut PetState,
        &mut EmoteState,
        &Interaction,
    )>() {
        if interaction.is_held() {
            continue;
        }
        let mut pet = PetMut {
            pos: &mut pos.0,
            vel: &mut vel.0,
            size: size.0,
            state,
            emote,
        };
        step(&mut pet, &rules, rng);
    }
}
