use crate::config::EngineConfig;
use crate::ecs::components::{AnimationState, PetState, SpriteLayout};
use crate::pet::animation;

/// Advance every pet's sprite animation by one speed-scaled tick.
/// Held pets keep animating.
pub fn update(world: &mut hecs::World, speed: f32, config: &EngineConfig) {
    let dt_ms = (config.tick_ms as f32 * speed) as u32;
    for (_, (state, layout, anim)) in
        world.query_mut::<(&PetState, &SpriteLayout, &mut AnimationState)>()
    {
        animation::advance(anim, state.behavior, layout, dt_ms);
    }
}
