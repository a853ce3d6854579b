use std::rc::Rc;

use crate::{Brush, Color, PointerEvent, Size};

pub type PointerCallback = Rc<dyn Fn(PointerEvent)>;

#[derive(Clone, Default)]
pub struct Modifier {
    pub size: Option<Size>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub padding: Option<f32>,
    pub flex_grow: Option<f32>,
    pub background: Option<Brush>,
    pub clip_rounded: Option<f32>,
    pub on_pointer_down: Option<PointerCallback>,
    pub on_pointer_move: Option<PointerCallback>,
    pub on_pointer_up: Option<PointerCallback>,
}

impl std::fmt::Debug for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modifier")
            .field("size", &self.size)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("padding", &self.padding)
            .field("flex_grow", &self.flex_grow)
            .field("background", &self.background)
            .field("clip_rounded", &self.clip_rounded)
            .field(
                "on_pointer_down",
                &self.on_pointer_down.as_ref().map(|_| "..."),
            )
            .field(
                "on_pointer_move",
                &self.on_pointer_move.as_ref().map(|_| "..."),
            )
            .field("on_pointer_up", &self.on_pointer_up.as_ref().map(|_| "..."))
            .finish()
    }
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn size(mut self, w: f32, h: f32) -> Self {
        self.size = Some(Size {
            width: w,
            height: h,
        });
        self
    }
    pub fn width(mut self, w: f32) -> Self {
        self.width = Some(w);
        self
    }
    pub fn height(mut self, h: f32) -> Self {
        self.height = Some(h);
        self
    }
    pub fn padding(mut self, v: f32) -> Self {
        self.padding = Some(v);
        self
    }
    /// Share of the parent's free main-axis space.
    pub fn flex_grow(mut self, v: f32) -> Self {
        self.flex_grow = Some(v);
        self
    }
    /// Set a solid color background.
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(Brush::Solid(color));
        self
    }
    pub fn background_brush(mut self, brush: Brush) -> Self {
        self.background = Some(brush);
        self
    }
    pub fn clip_rounded(mut self, radius: f32) -> Self {
        self.clip_rounded = Some(radius);
        self
    }
    pub fn on_pointer_down(mut self, f: impl Fn(PointerEvent) + 'static) -> Self {
        self.on_pointer_down = Some(Rc::new(f));
        self
    }
    pub fn on_pointer_move(mut self, f: impl Fn(PointerEvent) + 'static) -> Self {
        self.on_pointer_move = Some(Rc::new(f));
        self
    }
    pub fn on_pointer_up(mut self, f: impl Fn(PointerEvent) + 'static) -> Self {
        self.on_pointer_up = Some(Rc::new(f));
        self
    }

    /// Explicit width, from `width` or `size`.
    pub fn resolved_width(&self) -> Option<f32> {
        self.width.or(self.size.map(|s| s.width))
    }

    /// Explicit height, from `height` or `size`.
    pub fn resolved_height(&self) -> Option<f32> {
        self.height.or(self.size.map(|s| s.height))
    }
}
