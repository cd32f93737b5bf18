pub mod instance;

use crate::ecs::components::{
    AnimationState, BoxSize, EmoteState, PetState, Position, SpriteLayout,
};
use crate::pet::animation;
use crate::sprite::SpriteCache;
use self::instance::PetInstance;

/// Rebuild `out` with one instance per pet whose sheet is ready to sample.
/// Pets still waiting on their sheet are skipped for this frame only; their
/// simulation state is not touched. Returns how many were skipped.
pub fn build_instances(
    world: &hecs::World,
    sprites: &mut SpriteCache,
    opacity: f32,
    out: &mut Vec<PetInstance>,
) -> usize {
    out.clear();
    let mut skipped = 0;

    for (_, (pos, size, state, anim, emote, layout)) in world
        .query::<(
            &Position,
            &BoxSize,
            &PetState,
            &AnimationState,
            &EmoteState,
            &SpriteLayout,
        )>()
        .iter()
    {
        let Some(sheet) = sprites.get(layout.resource) else {
            skipped += 1;
            continue;
        };
        let frame = animation::frame_rect(anim, state.behavior, layout, sheet.width, sheet.height);
        out.push(PetInstance::from_components(pos, size, frame, emote, opacity));
    }
    skipped
}
