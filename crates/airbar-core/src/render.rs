//! Turns controller state into drawable geometry. Path construction,
//! anti-aliasing and gradient shaders belong to the host's renderer; this
//! module only decides *where* things go.

use crate::math;
use crate::{AirBarStyle, Orientation, ProgressController, Rect, Scene, SceneNode};

/// Gap between the icon and the bottom edge (vertical bars) or the start
/// edge (horizontal bars).
pub const ICON_EDGE_PADDING: f32 = 15.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarGeometry {
    pub bounds: Rect,
    pub corner_radius: f32,
    pub fill: Rect,
    pub icon: Option<Rect>,
    /// Mirrors the controller flag; renderers may tween `fill` when set.
    pub animate: bool,
}

pub fn bar_geometry(
    controller: &ProgressController,
    style: &AirBarStyle,
    bounds: Rect,
) -> BarGeometry {
    let orientation = controller.orientation();
    let extent = orientation.extent(bounds.size());
    let fill = match controller.fill_coordinate() {
        Some(c) => c as f32,
        None => math::inverse_coordinate(
            controller.display_percentage(),
            f64::from(extent),
            orientation,
        ) as f32,
    }
    .clamp(0.0, extent.max(0.0));

    let fill_rect = match orientation {
        Orientation::Vertical => Rect::new(bounds.x, bounds.y + fill, bounds.w, bounds.h - fill),
        Orientation::Horizontal => Rect::new(bounds.x, bounds.y, fill, bounds.h),
    };

    let icon = style.icon.map(|icon| match orientation {
        Orientation::Vertical => Rect::new(
            bounds.x + (bounds.w - icon.width) * 0.5,
            bounds.y + bounds.h - ICON_EDGE_PADDING - icon.height,
            icon.width,
            icon.height,
        ),
        Orientation::Horizontal => Rect::new(
            bounds.x + ICON_EDGE_PADDING,
            bounds.y + (bounds.h - icon.height) * 0.5,
            icon.width,
            icon.height,
        ),
    });

    BarGeometry {
        bounds,
        corner_radius: clamp_corner_radius(style.corner_radius, bounds),
        fill: fill_rect,
        icon,
        animate: controller.animate_changes(),
    }
}

/// Corners can't be rounder than half the shorter side.
pub fn clamp_corner_radius(radius: f32, bounds: Rect) -> f32 {
    radius.clamp(0.0, (bounds.w.min(bounds.h) * 0.5).max(0.0))
}

/// Background, rounded clip, fill, icon.
pub fn paint(
    controller: &ProgressController,
    style: &AirBarStyle,
    bounds: Rect,
    scene: &mut Scene,
) -> BarGeometry {
    let g = bar_geometry(controller, style, bounds);

    scene.nodes.push(SceneNode::Rect {
        rect: g.bounds,
        brush: style.background.into(),
        radius: g.corner_radius,
    });
    scene.nodes.push(SceneNode::PushClip {
        rect: g.bounds,
        radius: g.corner_radius,
    });
    scene.nodes.push(SceneNode::Rect {
        rect: g.fill,
        brush: style.fill_brush(),
        radius: 0.0,
    });
    if let (Some(rect), Some(icon)) = (g.icon, style.icon) {
        scene.nodes.push(SceneNode::Icon { rect, icon });
    }
    scene.nodes.push(SceneNode::PopClip);

    g
}
