use crate::ecs::components::{AnimationState, BehaviorState, LayoutScheme, SpriteLayout};

/// Timing of one behavior's animation strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clip {
    pub row: u32,
    /// Frames authored for the behavior; capped later by the sheet's columns.
    pub frames: u32,
    pub frame_ms: u32,
}

impl Clip {
    const fn new(row: u32, frames: u32, frame_ms: u32) -> Self {
        Self {
            row,
            frames,
            frame_ms,
        }
    }
}

const WALK_LEFT: Clip = Clip::new(0, 6, 100);
const WALK_RIGHT: Clip = Clip::new(1, 6, 100);
const CLIMB: Clip = Clip::new(2, 6, 120);
const JUMP: Clip = Clip::new(3, 6, 80);
const IDLE: Clip = Clip::new(4, 6, 250);
const FALL: Clip = Clip::new(5, 6, 120);
const FLY: Clip = Clip::new(6, 6, 150);
const SLEEP_ROW: u32 = 7;

/// Frame timing per behavior, with the standard layout's row.
/// Behaviors without their own strip borrow the idle one.
fn base_clip(behavior: BehaviorState) -> Clip {
    match behavior {
        BehaviorState::WalkLeft => WALK_LEFT,
        BehaviorState::WalkRight => WALK_RIGHT,
        BehaviorState::ClimbEdge => CLIMB,
        BehaviorState::Jump => JUMP,
        BehaviorState::Fall => FALL,
        BehaviorState::Fly => FLY,
        _ => IDLE,
    }
}

/// Sheet row for `behavior` under a layout scheme.
pub fn row_for(scheme: LayoutScheme, behavior: BehaviorState) -> u32 {
    use BehaviorState::*;
    match scheme {
        LayoutScheme::Standard8Row => match behavior {
            Sleep => SLEEP_ROW,
            b => base_clip(b).row,
        },
        // Four rows: walks and climb get their own, the rest share row 3.
        LayoutScheme::Legacy4Row => match behavior {
            WalkLeft => 0,
            WalkRight => 1,
            ClimbEdge | Fly => 2,
            _ => 3,
        },
        LayoutScheme::SevenRow => match behavior {
            WalkLeft => 0,
            WalkRight => 1,
            ClimbEdge => 2,
            Jump => 3,
            Fall => 5,
            Fly => 6,
            _ => 4,
        },
    }
}

/// Clip for `behavior` on a concrete sheet layout. The row is kept inside
/// the sheet and the frame count never exceeds its columns.
pub fn clip_for(layout: &SpriteLayout, behavior: BehaviorState) -> Clip {
    let base = base_clip(behavior);
    let rows = layout.rows.max(1);
    let cols = layout.cols.max(1);
    Clip {
        row: row_for(layout.scheme, behavior).min(rows - 1),
        frames: base.frames.min(cols).max(1),
        frame_ms: base.frame_ms,
    }
}

/// Source rectangle of one frame in sheet pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Advance the animation by `dt_ms`.
///
/// A behavior different from the last one seen restarts the strip at frame 0
/// and does not advance in the same call.
pub fn advance(
    anim: &mut AnimationState,
    behavior: BehaviorState,
    layout: &SpriteLayout,
    dt_ms: u32,
) {
    if behavior != anim.last_behavior {
        anim.last_behavior = behavior;
        anim.timer_ms = 0;
        anim.frame = 0;
        return;
    }

    let clip = clip_for(layout, behavior);
    // Layout may have changed under us (re-registered pet).
    if anim.frame >= clip.frames {
        anim.frame = 0;
    }

    anim.timer_ms = anim.timer_ms.saturating_add(dt_ms);
    if anim.timer_ms >= clip.frame_ms {
        anim.timer_ms = 0;
        anim.frame = (anim.frame + 1) % clip.frames;
    }
}

/// Pixel rectangle of the current frame on a `sheet_w` x `sheet_h` sheet.
pub fn frame_rect(
    anim: &AnimationState,
    behavior: BehaviorState,
    layout: &SpriteLayout,
    sheet_w: u32,
    sheet_h: u32,
) -> FrameRect {
    let clip = clip_for(layout, behavior);
    let w = sheet_w / layout.cols.max(1);
    let h = sheet_h / layout.rows.max(1);
    FrameRect {
        x: anim.frame.min(clip.frames - 1) * w,
        y: clip.row * h,
        w,
        h,
    }
}

/// Advance then return the frame to draw.
pub fn resolve_frame(
    anim: &mut AnimationState,
    behavior: BehaviorState,
    layout: &SpriteLayout,
    sheet_w: u32,
    sheet_h: u32,
    dt_ms: u32,
) -> FrameRect {
    advance(anim, behavior, layout, dt_ms);
    frame_rect(anim, behavior, layout, sheet_w, sheet_h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::ResourceId;
    use proptest::prelude::*;

    fn layout(cols: u32, rows: u32, scheme: LayoutScheme) -> SpriteLayout {
        SpriteLayout {
            resource: ResourceId(1),
            cols,
            rows,
            scheme,
        }
    }

    fn running(behavior: BehaviorState) -> AnimationState {
        AnimationState {
            last_behavior: behavior,
            ..Default::default()
        }
    }

    #[test]
    fn change_resets_without_advancing() {
        let l = layout(6, 8, LayoutScheme::Standard8Row);
        let mut a = AnimationState {
            last_behavior: BehaviorState::Idle,
            timer_ms: 200,
            frame: 3,
        };
        advance(&mut a, BehaviorState::Jump, &l, 16);
        assert_eq!(a.last_behavior, BehaviorState::Jump);
        assert_eq!(a.timer_ms, 0);
        assert_eq!(a.frame, 0);
    }

    #[test]
    fn frame_steps_on_duration() {
        let l = layout(6, 8, LayoutScheme::Standard8Row);
        let mut a = running(BehaviorState::Jump);
        for _ in 0..4 {
            advance(&mut a, BehaviorState::Jump, &l, 16);
        }
        assert_eq!(a.frame, 0);
        assert_eq!(a.timer_ms, 64);
        advance(&mut a, BehaviorState::Jump, &l, 16);
        assert_eq!(a.frame, 1);
        assert_eq!(a.timer_ms, 0);
    }

    #[test]
    fn frames_wrap_and_cap_at_columns() {
        let l = layout(4, 4, LayoutScheme::Legacy4Row);
        let mut a = running(BehaviorState::WalkRight);
        for _ in 0..4 {
            advance(&mut a, BehaviorState::WalkRight, &l, 100);
        }
        assert_eq!(a.frame, 0);
    }

    #[test]
    fn same_behavior_maps_to_different_rows() {
        let b = BehaviorState::Fall;
        assert_eq!(row_for(LayoutScheme::Standard8Row, b), 5);
        assert_eq!(row_for(LayoutScheme::Legacy4Row, b), 3);
        assert_eq!(row_for(LayoutScheme::SevenRow, b), 5);
        assert_eq!(row_for(LayoutScheme::Standard8Row, BehaviorState::Sleep), 7);
        assert_eq!(row_for(LayoutScheme::SevenRow, BehaviorState::Sleep), 4);
        assert_eq!(row_for(LayoutScheme::Legacy4Row, BehaviorState::Fly), 2);
    }

    #[test]
    fn rect_from_sheet_geometry() {
        let l = layout(4, 7, LayoutScheme::SevenRow);
        let a = AnimationState {
            last_behavior: BehaviorState::Fly,
            timer_ms: 0,
            frame: 2,
        };
        let r = frame_rect(&a, BehaviorState::Fly, &l, 256, 448);
        assert_eq!(
            r,
            FrameRect {
                x: 128,
                y: 384,
                w: 64,
                h: 64
            }
        );
    }

    #[test]
    fn short_sheet_keeps_row_inside() {
        // Standard mapping on a sheet that only has four rows.
        let l = layout(6, 4, LayoutScheme::Standard8Row);
        let c = clip_for(&l, BehaviorState::Fly);
        assert_eq!(c.row, 3);
    }

    fn arb_scheme() -> impl Strategy<Value = LayoutScheme> {
        prop_oneof![
            Just(LayoutScheme::Legacy4Row),
            Just(LayoutScheme::Standard8Row),
            Just(LayoutScheme::SevenRow),
        ]
    }

    proptest! {
        #[test]
        fn frame_index_stays_in_range(
            cols in 0u32..10,
            rows in 0u32..10,
            scheme in arb_scheme(),
            steps in prop::collection::vec((0usize..11, 0u32..400), 1..200),
        ) {
            let l = layout(cols, rows, scheme);
            let mut a = AnimationState::default();
            for (b, dt) in steps {
                let behavior = BehaviorState::ALL[b];
                let r = resolve_frame(&mut a, behavior, &l, 640, 640, dt);
                let clip = clip_for(&l, behavior);
                prop_assert!(a.frame < clip.frames);
                prop_assert!(r.x + r.w <= 640);
                prop_assert!(r.y + r.h <= 640);
            }
        }
    }
}
