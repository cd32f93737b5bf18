use bytemuck::{Pod, Zeroable};

use crate::ecs::components::{BoxSize, Emote, EmoteState, Position};
use crate::pet::animation::FrameRect;

/// Per-pet draw data handed to the host renderer after each step.
/// Stride = 40 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PetInstance {
    /// Top-left corner on screen (x, y).
    pub position: [f32; 2],
    /// Box size on screen (width, height).
    pub size: [f32; 2],
    /// Source rect in the sprite sheet: x, y, w, h.
    pub frame: [u32; 4],
    pub opacity: f32,
    /// Emote overlay, 0 = none.
    pub emote: u32,
}

impl PetInstance {
    pub fn from_components(
        pos: &Position,
        size: &BoxSize,
        frame: FrameRect,
        emote: &EmoteState,
        opacity: f32,
    ) -> Self {
        Self {
            position: pos.0.as_vec2().into(),
            size: size.0.as_vec2().into(),
            frame: [frame.x, frame.y, frame.w, frame.h],
            opacity,
            emote: emote_id(emote.emote),
        }
    }
}

fn emote_id(emote: Emote) -> u32 {
    emote as u8 as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    #[test]
    fn packs_components() {
        let inst = PetInstance::from_components(
            &Position(IVec2::new(10, 20)),
            &BoxSize(IVec2::splat(64)),
            FrameRect {
                x: 32,
                y: 96,
                w: 32,
                h: 32,
            },
            &EmoteState {
                emote: Emote::Sleepy,
                timer_ms: 0,
            },
            0.5,
        );
        assert_eq!(inst.position, [10.0, 20.0]);
        assert_eq!(inst.frame, [32, 96, 32, 32]);
        assert_eq!(inst.emote, 4);
        assert_eq!(bytemuck::bytes_of(&inst).len(), 40);
    }
}
