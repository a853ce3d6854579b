//! # Progress controller
//!
//! [`ProgressController`] is the single source of truth for a bar's fill. It
//! stores the *fill coordinate*: the boundary between the filled and the
//! unfilled part, in the same space as pointer events. For a vertical bar
//! that is the distance from the top edge (`0` = full); for a horizontal bar
//! it is the distance from the start edge (`0` = empty).
//!
//! Percentage and value are never stored; they are derived from the fill
//! coordinate, the surface extent and the value range on every read:
//!
//! ```rust
//! use airbar_core::*;
//!
//! let mut c = ProgressController::new(Orientation::Vertical, ValueRange::default());
//! let r = c.set_fill_coordinate(50.0, 200.0);
//! assert_eq!(r, Reading { percentage: 75.0, value: 75.0 });
//!
//! c.set_value(25.0);
//! assert_eq!(c.fill_coordinate(), Some(150.0));
//! ```
//!
//! Before the first layout the surface extent is unknown. Values assigned in
//! that state are kept pending and resolved by the first [`resize`] that
//! reports a nonzero extent.
//!
//! [`resize`]: ProgressController::resize

use crate::math;
use crate::{AirBarConfig, Orientation, Result, ValueRange};

/// Percentage drawn, and adopted on first layout, when no value was assigned
/// before the surface was measured. Leaves the bar mostly full.
pub const PLACEHOLDER_PERCENTAGE: f64 = 90.0;

/// Percentage and scaled value, both rounded to two decimals.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reading {
    pub percentage: f64,
    pub value: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum FillState {
    /// Surface not measured yet. `pending` is a percentage.
    Uninitialized { pending: Option<f64> },
    Initialized { fill: f64 },
}

#[derive(Clone, Debug)]
pub struct ProgressController {
    orientation: Orientation,
    range: ValueRange,
    surface_extent: f64,
    state: FillState,
    animate_changes: bool,
}

impl ProgressController {
    pub fn new(orientation: Orientation, range: ValueRange) -> Self {
        Self {
            orientation,
            range,
            surface_extent: 0.0,
            state: FillState::Uninitialized { pending: None },
            animate_changes: true,
        }
    }

    pub fn from_config(config: &AirBarConfig) -> Result<Self> {
        let mut c = Self::new(config.orientation, config.value_range()?);
        c.animate_changes = config.animate_changes;
        if let Some(v) = config.initial_value {
            c.set_value(v);
        }
        Ok(c)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }

    /// Replaces the value range. The fill coordinate is kept, so the
    /// percentage stays put and the value is rescaled.
    pub fn set_range(&mut self, range: ValueRange) {
        self.range = range;
    }

    pub fn surface_extent(&self) -> f64 {
        self.surface_extent
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, FillState::Initialized { .. })
    }

    pub fn animate_changes(&self) -> bool {
        self.animate_changes
    }

    pub fn set_animate_changes(&mut self, animate: bool) {
        self.animate_changes = animate;
    }

    /// `None` until the surface has been measured.
    pub fn fill_coordinate(&self) -> Option<f64> {
        match self.state {
            FillState::Uninitialized { .. } => None,
            FillState::Initialized { fill } => Some(fill),
        }
    }

    pub fn percentage(&self) -> f64 {
        match self.state {
            FillState::Uninitialized { pending } => pending.unwrap_or(0.0),
            FillState::Initialized { fill } => {
                math::forward_percentage(fill, self.surface_extent, self.orientation)
            }
        }
    }

    pub fn value(&self) -> f64 {
        math::percentage_to_value(self.percentage(), &self.range)
    }

    pub fn reading(&self) -> Reading {
        let percentage = self.percentage();
        Reading {
            percentage,
            value: math::percentage_to_value(percentage, &self.range),
        }
    }

    /// Percentage a renderer should draw. Same as [`percentage`] once
    /// initialized; before that, the pending value or
    /// [`PLACEHOLDER_PERCENTAGE`].
    ///
    /// [`percentage`]: ProgressController::percentage
    pub fn display_percentage(&self) -> f64 {
        match self.state {
            FillState::Uninitialized { pending } => pending.unwrap_or(PLACEHOLDER_PERCENTAGE),
            FillState::Initialized { .. } => self.percentage(),
        }
    }

    /// Moves the fill boundary to `raw`, saturated into `[0, surface_extent]`,
    /// and returns the new reading.
    ///
    /// A non-positive extent leaves the state untouched and reads as `0%`.
    pub fn set_fill_coordinate(&mut self, raw: f64, surface_extent: f64) -> Reading {
        if !raw.is_finite() || !surface_extent.is_finite() {
            log::warn!("ignoring non-finite fill coordinate {raw} (extent {surface_extent})");
            return self.reading();
        }
        if surface_extent <= 0.0 {
            log::trace!("fill coordinate {raw} on an empty surface");
            return Reading {
                percentage: 0.0,
                value: math::percentage_to_value(0.0, &self.range),
            };
        }
        if !self.is_initialized() {
            log::debug!("AirBar initialized by pointer, extent {surface_extent}");
        }
        self.surface_extent = surface_extent;
        self.state = FillState::Initialized {
            fill: raw.clamp(0.0, surface_extent),
        };
        self.reading()
    }

    /// Assigns a value in user space. Values outside the range saturate.
    /// Returns the new fill coordinate, or `None` while the value is pending.
    pub fn set_value(&mut self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            log::warn!("ignoring non-finite value {value}");
            return self.fill_coordinate();
        }
        let value = self.range.clamp(value);
        self.set_percentage(math::value_to_percentage(value, &self.range))
    }

    /// Like [`set_value`](Self::set_value), in percentage space.
    pub fn set_percentage(&mut self, percentage: f64) -> Option<f64> {
        if !percentage.is_finite() {
            log::warn!("ignoring non-finite percentage {percentage}");
            return self.fill_coordinate();
        }
        let percentage = percentage.clamp(0.0, 100.0);
        match self.state {
            FillState::Uninitialized { .. } => {
                log::trace!("holding {percentage}% until the first layout");
                self.state = FillState::Uninitialized {
                    pending: Some(math::round2(percentage)),
                };
                None
            }
            FillState::Initialized { .. } => {
                let fill =
                    math::inverse_coordinate(percentage, self.surface_extent, self.orientation);
                self.state = FillState::Initialized { fill };
                Some(fill)
            }
        }
    }

    /// Records a new surface extent from a layout pass.
    ///
    /// The first nonzero extent resolves the pending value (or the
    /// placeholder); later ones move the fill coordinate so the percentage
    /// is preserved. Non-positive extents are ignored.
    pub fn resize(&mut self, new_extent: f64) {
        if !new_extent.is_finite() || new_extent <= 0.0 {
            log::trace!("ignoring surface extent {new_extent}");
            return;
        }
        let percentage = match self.state {
            FillState::Uninitialized { pending } => {
                let p = pending.unwrap_or(PLACEHOLDER_PERCENTAGE);
                log::debug!("AirBar initialized by layout, extent {new_extent}, {p}%");
                p
            }
            FillState::Initialized { .. } if new_extent == self.surface_extent => return,
            FillState::Initialized { .. } => self.percentage(),
        };
        self.surface_extent = new_extent;
        self.state = FillState::Initialized {
            fill: math::inverse_coordinate(percentage, new_extent, self.orientation),
        };
    }
}
