pub mod animation;
pub mod roster;

use glam::IVec2;

use crate::config::EngineConfig;
use crate::ecs::components::*;
use crate::error::PetError;
use crate::settings::PetSettings;
use crate::spatial::Bounds;
use roster::Roster;

/// Add one pet from the roster to the world.
///
/// A requested position is clamped into `bounds`; without one the pet lands
/// somewhere random inside them. New pets start in `NONE` with every timer at
/// zero and settle into a movement shortly after.
#[allow(clippy::too_many_arguments)]
pub fn spawn_pet(
    world: &mut hecs::World,
    roster: &Roster,
    id: &str,
    position: Option<IVec2>,
    settings: &PetSettings,
    bounds: Bounds,
    config: &EngineConfig,
    rng: &mut fastrand::Rng,
) -> Result<hecs::Entity, PetError> {
    let layout = roster.layout(id)?;
    let size = IVec2::splat(config.box_edge(settings.scale()));

    let pos = match position {
        Some(p) => bounds.clamp(p, size),
        None => IVec2::new(
            rng.i32(bounds.left..=bounds.max_x(size)),
            rng.i32(bounds.top..=bounds.max_y(size)),
        ),
    };

    let entity = world.spawn((
        PetId(id.to_string()),
        Position(pos),
        Velocity(IVec2::ZERO),
        BoxSize(size),
        PetState::default(),
        AnimationState::default(),
        EmoteState::default(),
        Interaction::default(),
        layout,
    ));
    log::info!("Spawned {id} at {pos} ({}px)", size.x);
    Ok(entity)
}

/// Remove a pet. Returns where it was, for the host to remember.
pub fn despawn_pet(world: &mut hecs::World, entity: hecs::Entity) -> Result<IVec2, PetError> {
    let last = world
        .get::<&Position>(entity)
        .map(|p| p.0)
        .map_err(|_| PetError::NoSuchEntity)?;
    world.despawn(entity).map_err(|_| PetError::NoSuchEntity)?;
    log::info!("Removed pet {entity:?} at {last}");
    Ok(last)
}

/// Resize every pet box after the scale setting changed. Positions are
/// re-clamped on the next tick.
pub fn apply_scale(world: &mut hecs::World, settings: &PetSettings, config: &EngineConfig) {
    let size = IVec2::splat(config.box_edge(settings.scale()));
    for (_, box_size) in world.query_mut::<&mut BoxSize>() {
        box_size.0 = size;
    }
}
