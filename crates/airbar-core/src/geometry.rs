#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_size(size: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w: size.width,
            h: size.height,
        }
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.w,
            height: self.h,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    /// Converts a point from the coordinate space this rect lives in into
    /// the rect's own top-left based space.
    pub fn to_local(&self, p: Vec2) -> Vec2 {
        Vec2 {
            x: p.x - self.x,
            y: p.y - self.y,
        }
    }

    /// Shrinks the rect by `v` on every side, never below zero size.
    pub fn inset(&self, v: f32) -> Rect {
        Rect {
            x: self.x + v,
            y: self.y + v,
            w: (self.w - 2.0 * v).max(0.0),
            h: (self.h - 2.0 * v).max(0.0),
        }
    }
}
