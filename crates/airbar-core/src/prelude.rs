pub use crate::color::{Brush, Color, LinearGradient};
pub use crate::config::{AirBarConfig, Orientation, ValueRange};
pub use crate::controller::{PLACEHOLDER_PERCENTAGE, ProgressController, Reading};
pub use crate::error::{AirBarError, Result};
pub use crate::geometry::{Rect, Size, Vec2};
pub use crate::input::*;
pub use crate::interaction::{PointerInteractionHandler, PointerOutcome, ReadingCallbacks};
pub use crate::modifier::Modifier;
pub use crate::redraw::RedrawHandle;
pub use crate::runtime::{
    ComposeGuard, Frame, HitRegion, Scheduler, current_redraw, remember, remember_state,
    remember_state_with_key, remember_with_key,
};
pub use crate::signal::{Signal, signal};
pub use crate::style::{AirBarStyle, GradientDirection, Icon};
pub use crate::view::{AirBarNode, Scene, SceneNode, View, ViewId, ViewKind};
