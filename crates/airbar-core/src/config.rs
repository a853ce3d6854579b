//! # Configuration
//!
//! A bar is configured with an [`AirBarConfig`], either built in code:
//!
//! ```rust
//! use airbar_core::*;
//!
//! let config = AirBarConfig::horizontal()
//!     .range(0.0, 10.0)
//!     .initial_value(5.0)
//!     .animate_changes(false);
//! assert!(config.value_range().is_ok());
//! ```
//!
//! or loaded from JSON, where every field is optional:
//!
//! ```rust
//! use airbar_core::*;
//!
//! let config = AirBarConfig::from_json(r##"{
//!     "orientation": "vertical",
//!     "min": 0, "max": 200,
//!     "style": { "fill": "#3DDC84", "corner_radius": 24 }
//! }"##).unwrap();
//! assert_eq!(config.max, 200.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::{AirBarError, AirBarStyle, Result, Size, Vec2};

/// Which axis drives the fill. Fixed for the lifetime of a bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Fills bottom to top; driven by the pointer's `y`.
    #[default]
    Vertical,
    /// Fills start to end; driven by the pointer's `x`.
    Horizontal,
}

impl Orientation {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Orientation::Horizontal)
    }

    /// The coordinate of `p` along the driven axis.
    pub fn axis(self, p: Vec2) -> f32 {
        match self {
            Orientation::Vertical => p.y,
            Orientation::Horizontal => p.x,
        }
    }

    /// The length of `size` along the driven axis.
    pub fn extent(self, size: Size) -> f32 {
        match self {
            Orientation::Vertical => size.height,
            Orientation::Horizontal => size.width,
        }
    }
}

/// `[min, max]` with `min < max`, both finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        for bound in [min, max] {
            if !bound.is_finite() {
                return Err(AirBarError::NonFiniteBound(bound));
            }
        }
        if min >= max {
            return Err(AirBarError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirBarConfig {
    pub orientation: Orientation,
    pub min: f64,
    pub max: f64,
    /// Read by renderers that interpolate fill changes.
    pub animate_changes: bool,
    /// Value applied as soon as the bar is created; resolved to a fill
    /// coordinate on the first layout.
    pub initial_value: Option<f64>,
    pub style: AirBarStyle,
}

impl Default for AirBarConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            min: 0.0,
            max: 100.0,
            animate_changes: true,
            initial_value: None,
            style: AirBarStyle::default(),
        }
    }
}

impl AirBarConfig {
    pub fn vertical() -> Self {
        Self::default()
    }

    pub fn horizontal() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            ..Self::default()
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn animate_changes(mut self, animate: bool) -> Self {
        self.animate_changes = animate;
        self
    }

    pub fn initial_value(mut self, value: f64) -> Self {
        self.initial_value = Some(value);
        self
    }

    pub fn style(mut self, style: AirBarStyle) -> Self {
        self.style = style;
        self
    }

    pub fn value_range(&self) -> Result<ValueRange> {
        ValueRange::new(self.min, self.max)
    }

    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AirBarConfig = serde_json::from_str(json)?;
        config.value_range()?;
        log::debug!(
            "loaded AirBar config: {:?} [{}, {}]",
            config.orientation,
            config.min,
            config.max
        );
        Ok(config)
    }
}
