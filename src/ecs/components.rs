use glam::IVec2;

use crate::sprite::ResourceId;

/// Roster id of the pet definition this entity was spawned from.
#[derive(Debug, Clone)]
pub struct PetId(pub String);

/// Top-left corner in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position(pub IVec2);

/// Per-tick displacement in pixels. Rewritten by the active behavior rule every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Velocity(pub IVec2);

/// Rendered box size (width, height). Changed by the scale setting, never by a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxSize(pub IVec2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BehaviorState {
    None,
    Idle,
    WalkLeft,
    WalkRight,
    Jump,
    Fall,
    ClimbEdge,
    Fly,
    Sleep,
    Interact,
    Collide,
}

impl BehaviorState {
    pub const ALL: [BehaviorState; 11] = [
        Self::None,
        Self::Idle,
        Self::WalkLeft,
        Self::WalkRight,
        Self::Jump,
        Self::Fall,
        Self::ClimbEdge,
        Self::Fly,
        Self::Sleep,
        Self::Interact,
        Self::Collide,
    ];

    /// Uniform pick between standing still and walking either way.
    pub fn random_movement(rng: &mut fastrand::Rng) -> Self {
        match rng.u8(0..3) {
            0 => Self::Idle,
            1 => Self::WalkLeft,
            _ => Self::WalkRight,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Idle => "IDLE",
            Self::WalkLeft => "WALK_LEFT",
            Self::WalkRight => "WALK_RIGHT",
            Self::Jump => "JUMP",
            Self::Fall => "FALL",
            Self::ClimbEdge => "CLIMB_EDGE",
            Self::Fly => "FLY",
            Self::Sleep => "SLEEP",
            Self::Interact => "INTERACT",
            Self::Collide => "COLLIDE",
        }
    }
}

/// Current behavior plus its bookkeeping.
#[derive(Debug, Clone, Copy)]
pub struct PetState {
    pub behavior: BehaviorState,
    /// Milliseconds spent in `behavior`. Reset on every committed transition.
    pub timer_ms: u32,
    /// Set by the first transition committed in a tick; cleared when the tick starts.
    pub changed_this_tick: bool,
}

impl Default for PetState {
    fn default() -> Self {
        Self {
            behavior: BehaviorState::None,
            timer_ms: 0,
            changed_this_tick: false,
        }
    }
}

/// Sprite animation bookkeeping. Runs on its own timer, separate from `PetState`.
#[derive(Debug, Clone, Copy)]
pub struct AnimationState {
    pub last_behavior: BehaviorState,
    pub timer_ms: u32,
    pub frame: u32,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            last_behavior: BehaviorState::None,
            timer_ms: 0,
            frame: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Emote {
    #[default]
    None,
    Happy,
    Surprised,
    Thinking,
    Sleepy,
    Angry,
}

impl Emote {
    /// Every emote that actually shows something.
    pub const VISIBLE: [Emote; 5] = [
        Self::Happy,
        Self::Surprised,
        Self::Thinking,
        Self::Sleepy,
        Self::Angry,
    ];
}

/// Transient cosmetic overlay. Never read by physics.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmoteState {
    pub emote: Emote,
    pub timer_ms: u32,
}

/// Flags owned by the host's input layer. While either is set the engine leaves
/// position, velocity and behavior alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interaction {
    pub dragging: bool,
    pub menu_open: bool,
}

impl Interaction {
    pub fn is_held(&self) -> bool {
        self.dragging || self.menu_open
    }
}

/// How a sprite sheet arranges its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutScheme {
    /// Walk left, walk right, climb, then one shared row for everything else.
    Legacy4Row,
    /// One row per behavior, with a spare eighth row for sleeping.
    Standard8Row,
    /// Seven rows: walks, climb, jump, idle, fall, fly.
    SevenRow,
}

/// Static sheet layout resolved once at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteLayout {
    pub resource: ResourceId,
    pub cols: u32,
    pub rows: u32,
    pub scheme: LayoutScheme,
}
