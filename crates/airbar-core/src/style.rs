use serde::{Deserialize, Serialize};

use crate::{Brush, Color, LinearGradient, Size, Vec2};

pub const DEFAULT_FILL: Color = Color(0x62, 0x00, 0xEE, 0xFF);
pub const DEFAULT_BACKGROUND: Color = Color(0xF5, 0xF5, 0xF5, 0xFF);

/// Direction of the fill gradient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientDirection {
    /// Top to bottom over the whole bar.
    #[default]
    Vertical,
    /// Top-left to bottom-right over the whole bar.
    Diagonal,
}

impl GradientDirection {
    /// Normalized start and end points.
    pub fn endpoints(self) -> (Vec2, Vec2) {
        let end = match self {
            GradientDirection::Vertical => Vec2 { x: 0.0, y: 1.0 },
            GradientDirection::Diagonal => Vec2 { x: 1.0, y: 1.0 },
        };
        (Vec2 { x: 0.0, y: 0.0 }, end)
    }
}

/// Opaque icon reference resolved by the host's renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    pub id: u64,
    pub width: f32,
    pub height: f32,
}

impl Icon {
    pub fn new(id: u64, width: f32, height: f32) -> Self {
        Self { id, width, height }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirBarStyle {
    pub background: Color,
    pub fill: Color,
    /// Gradient stops, first to last. Two or more replace `fill`.
    pub fill_gradient: Vec<Color>,
    pub gradient_direction: GradientDirection,
    pub corner_radius: f32,
    pub icon: Option<Icon>,
}

impl Default for AirBarStyle {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            fill: DEFAULT_FILL,
            fill_gradient: Vec::new(),
            gradient_direction: GradientDirection::Vertical,
            corner_radius: 50.0,
            icon: None,
        }
    }
}

impl AirBarStyle {
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = color;
        self.fill_gradient.clear();
        self
    }

    pub fn gradient(self, from: Color, to: Color, direction: GradientDirection) -> Self {
        self.gradient_stops(vec![from, to], direction)
    }

    pub fn gradient_stops(mut self, stops: Vec<Color>, direction: GradientDirection) -> Self {
        self.fill_gradient = stops;
        self.gradient_direction = direction;
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn fill_brush(&self) -> Brush {
        if self.fill_gradient.len() < 2 {
            return Brush::Solid(self.fill_gradient.first().copied().unwrap_or(self.fill));
        }
        let (start, end) = self.gradient_direction.endpoints();
        LinearGradient::new(start, end, self.fill_gradient.clone())
    }
}
