// Screen-space rectangles and the overlap test every trigger is built on.
//
// Coordinates follow the logical display: origin at the top-left corner, y grows
// downwards. The scenery plugin flips them into Bevy's world space at draw time.
use bevy::math::Vec2;

/// Which point of a rectangle a placement refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Center,
    MidBottom,
}

/// Axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub size: Vec2,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Build a rectangle of `size` whose `anchor` point sits at `point`.
    pub fn anchored(anchor: Anchor, point: Vec2, size: Vec2) -> Self {
        let min = match anchor {
            Anchor::Center => point - size / 2.0,
            Anchor::MidBottom => Vec2::new(point.x - size.x / 2.0, point.y - size.y),
        };
        Self { min, size }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    pub fn anchor_point(&self, anchor: Anchor) -> Vec2 {
        match anchor {
            Anchor::Center => self.center(),
            Anchor::MidBottom => Vec2::new(self.min.x + self.size.x / 2.0, self.bottom()),
        }
    }

    /// Move so that `anchor` lands on `point`, keeping the size.
    pub fn move_anchor(&mut self, anchor: Anchor, point: Vec2) {
        *self = Self::anchored(anchor, point, self.size);
    }

    pub fn set_left(&mut self, x: f32) {
        self.min.x = x;
    }

    pub fn set_bottom(&mut self, y: f32) {
        self.min.y = y - self.size.y;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.min += delta;
    }

    /// Inclusive overlap: rectangles that share an edge count as touching.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        overlaps(self, other)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}

/// Inclusive AABB intersection test.
pub fn overlaps(a: &Bounds, b: &Bounds) -> bool {
    a.left() <= b.right() && b.left() <= a.right() && a.top() <= b.bottom() && b.top() <= a.bottom()
}
