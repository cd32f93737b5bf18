//! Hand-off between the host's pointer input and the simulation.
//!
//! While a pet is dragged or its menu is open, the tick systems leave it alone
//! and only these functions move it.

use glam::IVec2;

use crate::ecs::components::{
    BehaviorState, BoxSize, Interaction, PetState, Position, Velocity,
};
use crate::error::PetError;
use crate::spatial::Bounds;

/// Pointer travel (px, per axis) before a press turns into a drag.
pub const DRAG_THRESHOLD: i32 = 5;

/// Where the pet was when the pointer went down, and whether the pointer has
/// left the jitter zone since.
#[derive(Debug, Clone, Copy)]
pub struct DragAnchor {
    pub origin: IVec2,
    pub started: bool,
}

/// Pointer down on a pet: the pet stops and belongs to the pointer.
/// Ignored while the pet's menu is open.
pub fn begin_drag(world: &mut hecs::World, entity: hecs::Entity) -> Result<(), PetError> {
    let anchor = {
        let (pos, vel, interaction) = world
            .query_one_mut::<(&Position, &mut Velocity, &mut Interaction)>(entity)
            .map_err(|_| PetError::NoSuchEntity)?;
        if interaction.menu_open {
            return Ok(());
        }
        interaction.dragging = true;
        vel.0 = IVec2::ZERO;
        pos.0
    };
    world
        .insert_one(
            entity,
            DragAnchor {
                origin: anchor,
                started: false,
            },
        )
        .map_err(|_| PetError::NoSuchEntity)?;
    log::debug!("drag start {entity:?} at {anchor}");
    Ok(())
}

/// Pointer moved by `delta` since it went down. Until the pointer first gets
/// past [`DRAG_THRESHOLD`] the move is treated as jitter; from then on the pet
/// follows, clamped to `bounds`. Returns whether it moved.
pub fn drag_by(
    world: &mut hecs::World,
    entity: hecs::Entity,
    delta: IVec2,
    bounds: Bounds,
) -> Result<bool, PetError> {
    let (pos, size, anchor, interaction) = world
        .query_one_mut::<(&mut Position, &BoxSize, Option<&mut DragAnchor>, &Interaction)>(
            entity,
        )
        .map_err(|_| PetError::NoSuchEntity)?;

    if !interaction.dragging {
        return Ok(false);
    }
    let Some(anchor) = anchor else {
        return Ok(false);
    };
    if !anchor.started {
        if delta.x.abs() <= DRAG_THRESHOLD && delta.y.abs() <= DRAG_THRESHOLD {
            return Ok(false);
        }
        anchor.started = true;
    }
    pos.0 = bounds.clamp(anchor.origin.saturating_add(delta), size.0);
    Ok(true)
}

/// Pointer up. A dropped pet falls, unless its menu took over.
pub fn end_drag(world: &mut hecs::World, entity: hecs::Entity) -> Result<(), PetError> {
    {
        let (vel, state, interaction) = world
            .query_one_mut::<(&mut Velocity, &mut PetState, &mut Interaction)>(entity)
            .map_err(|_| PetError::NoSuchEntity)?;
        interaction.dragging = false;
        if !interaction.menu_open {
            state.behavior = BehaviorState::Fall;
            state.timer_ms = 0;
            vel.0 = IVec2::ZERO;
        }
    }
    // Already gone if the drag never started.
    let _ = world.remove_one::<DragAnchor>(entity);
    log::debug!("drag end {entity:?}");
    Ok(())
}

pub fn set_menu_open(
    world: &mut hecs::World,
    entity: hecs::Entity,
    open: bool,
) -> Result<(), PetError> {
    let mut interaction = world
        .get::<&mut Interaction>(entity)
        .map_err(|_| PetError::NoSuchEntity)?;
    interaction.menu_open = open;
    Ok(())
}
