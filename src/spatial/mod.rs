use glam::IVec2;

/// Usable viewport rectangle (screen minus system insets), in pixels.
///
/// `left`/`top` are inclusive, `right`/`bottom` exclusive. The host recomputes
/// it every tick, so it may shift between ticks (rotation, inset changes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Bounds anchored at the origin.
    pub fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> i32 {
        (self.left + self.right) / 2
    }

    pub fn hits_left_wall(&self, pos: IVec2) -> bool {
        pos.x <= self.left
    }

    pub fn hits_right_wall(&self, pos: IVec2, size: IVec2) -> bool {
        pos.x.saturating_add(size.x) >= self.right
    }

    pub fn hits_ceiling(&self, pos: IVec2) -> bool {
        pos.y <= self.top
    }

    pub fn hits_floor(&self, pos: IVec2, size: IVec2) -> bool {
        pos.y.saturating_add(size.y) >= self.bottom
    }

    /// Largest x a box of `size` may take. Never below `left`.
    pub fn max_x(&self, size: IVec2) -> i32 {
        self.right.saturating_sub(size.x).max(self.left)
    }

    /// Largest y a box of `size` may take. Never below `top`.
    pub fn max_y(&self, size: IVec2) -> i32 {
        self.bottom.saturating_sub(size.y).max(self.top)
    }

    /// Clamp a box's top-left corner so the box stays inside. When the box is
    /// wider or taller than the bounds it pins to the left/top edge.
    pub fn clamp(&self, pos: IVec2, size: IVec2) -> IVec2 {
        IVec2::new(
            pos.x.clamp(self.left, self.max_x(size)),
            pos.y.clamp(self.top, self.max_y(size)),
        )
    }
}

/// Axis-aligned box used for pet-vs-pet overlap tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aabb {
    pub min: IVec2,
    pub max: IVec2,
}

impl Aabb {
    pub fn from_pos_size(pos: IVec2, size: IVec2) -> Self {
        Self {
            min: pos,
            max: pos.saturating_add(size),
        }
    }

    /// Strict overlap: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}
