use crate::config::EngineConfig;
use crate::ecs::components::{
    BehaviorState, BoxSize, EmoteState, Interaction, PetState, Position, Velocity,
};
use crate::ecs::systems::behavior::{self, PetMut, Rules};
use crate::spatial::{Aabb, Bounds};

/// Box of one pet that may take part in collisions this tick.
/// Positions do not change during resolution, so boxes are taken once.
pub struct Collider {
    pub entity: hecs::Entity,
    pub aabb: Aabb,
}

/// What an overlapping pair gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Too close to the top edge: both fall.
    CeilingCongestion,
    /// Two climbers on top of each other: first jumps off, second falls.
    ClimbJumpApart,
    /// Everything else overlaps freely.
    PassThrough,
}

/// Pick the reaction for an overlapping pair, given their current top edges
/// and behaviors.
pub fn classify(
    a_y: i32,
    a: BehaviorState,
    b_y: i32,
    b: BehaviorState,
    bounds: &Bounds,
    ceiling_margin: i32,
) -> Reaction {
    let limit = bounds.top.saturating_add(ceiling_margin);
    if a_y <= limit || b_y <= limit {
        return Reaction::CeilingCongestion;
    }
    if a == BehaviorState::ClimbEdge && b == BehaviorState::ClimbEdge {
        return Reaction::ClimbJumpApart;
    }
    Reaction::PassThrough
}

/// Rebuild the collider list from pets not held by the host.
pub fn gather(world: &hecs::World, colliders: &mut Vec<Collider>) {
    colliders.clear();
    for (entity, (pos, size, interaction)) in world
        .query::<(&Position, &BoxSize, &Interaction)>()
        .iter()
    {
        if interaction.is_held() {
            continue;
        }
        colliders.push(Collider {
            entity,
            aabb: Aabb::from_pos_size(pos.0, size.0),
        });
    }
}

/// Test every unordered pair once and apply reactions through the same
/// single-transition commit the behavior rules use.
pub fn resolve(
    world: &mut hecs::World,
    colliders: &mut Vec<Collider>,
    bounds: Bounds,
    speed: f32,
    config: &EngineConfig,
    rng: &mut fastrand::Rng,
) {
    gather(world, colliders);
    if colliders.len() < 2 {
        return;
    }

    let rules = Rules {
        bounds,
        speed,
        config,
    };

    for i in 0..colliders.len() {
        for j in (i + 1)..colliders.len() {
            let (a, b) = (&colliders[i], &colliders[j]);
            if !a.aabb.intersects(&b.aabb) {
                continue;
            }

            let (Some(a_state), Some(b_state)) =
                (behavior_of(world, a.entity), behavior_of(world, b.entity))
            else {
                continue;
            };

            let reaction = classify(
                a.aabb.min.y,
                a_state,
                b.aabb.min.y,
                b_state,
                &bounds,
                config.tuning.ceiling_margin,
            );
            match reaction {
                Reaction::CeilingCongestion => {
                    force(world, a.entity, BehaviorState::Fall, config, rng);
                    force(world, b.entity, BehaviorState::Fall, config, rng);
                }
                Reaction::ClimbJumpApart => {
                    log::trace!("climb collision {:?} / {:?}", a.entity, b.entity);
                    jump_off(world, a.entity, &rules, rng);
                    force(world, b.entity, BehaviorState::Fall, config, rng);
                }
                Reaction::PassThrough => {}
            }
        }
    }
}

fn behavior_of(world: &hecs::World, entity: hecs::Entity) -> Option<BehaviorState> {
    world.get::<&PetState>(entity).ok().map(|s| s.behavior)
}

fn force(
    world: &mut hecs::World,
    entity: hecs::Entity,
    next: BehaviorState,
    config: &EngineConfig,
    rng: &mut fastrand::Rng,
) {
    if let Ok((state, emote)) = world.query_one_mut::<(&mut PetState, &mut EmoteState)>(entity) {
        behavior::commit(state, emote, next, &config.tuning, rng);
    }
}

fn jump_off(world: &mut hecs::World, entity: hecs::Entity, rules: &Rules, rng: &mut fastrand::Rng) {
    if let Ok((pos, vel, size, state, emote)) = world.query_one_mut::<(
        &mut Position,
        &mut Velocity,
        &BoxSize,
        &mut PetState,
        &mut EmoteState,
    )>(entity)
    {
        let mut pet = PetMut {
            pos: &mut pos.0,
            vel: &mut vel.0,
            size: size.0,
            state,
            emote,
        };
        behavior::start_jump(&mut pet, rules, rng);
    }
}
