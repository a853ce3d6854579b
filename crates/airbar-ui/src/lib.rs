#![allow(non_snake_case)]
//! AirBar widgets in two flavors, plus the layout pass and pointer routing
//! the declarative one needs.
//!
//! - [`AirBarView`]: retained mode. The host owns it, calls
//!   [`on_layout`](AirBarView::on_layout),
//!   [`on_pointer_event`](AirBarView::on_pointer_event) and
//!   [`draw`](AirBarView::draw).
//! - [`AirBar`]: a composable. Its [`AirBarController`] lives in a
//!   composition slot ([`remember_air_bar_controller`]);
//!   [`layout_and_paint`] turns the view tree into a scene and hit regions
//!   and [`PointerRouter`] feeds pointer events back.

pub mod air_bar_view;
pub mod router;

pub use air_bar_view::AirBarView;
pub use router::PointerRouter;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use airbar_core::render;
use airbar_core::*;
use taffy::prelude::length;
use taffy::style::{AlignItems, AvailableSpace, Display, FlexDirection, JustifyContent, Style};
use taffy::{NodeId, TaffyError, TaffyTree};

/// Corner radius of the composable's default style.
pub const COMPOSE_CORNER_RADIUS: f32 = 40.0;
/// Line height of `Text`, relative to its font size.
pub const TEXT_LINE_HEIGHT: f32 = 1.2;
/// Advance of one `Text` glyph, relative to its font size.
pub const TEXT_GLYPH_WIDTH: f32 = 0.6;

pub fn Box(modifier: Modifier) -> View {
    View::new(0, ViewKind::Box).modifier(modifier)
}

pub fn Row(modifier: Modifier) -> View {
    View::new(0, ViewKind::Row).modifier(modifier)
}

pub fn Column(modifier: Modifier) -> View {
    View::new(0, ViewKind::Column).modifier(modifier)
}

pub fn Text(text: impl Into<String>) -> View {
    View::new(
        0,
        ViewKind::Text {
            text: text.into(),
            color: Color::BLACK,
            font_size: 16.0,
        },
    )
}

/// State handle of a declarative bar. Cheap to clone; clones share state.
///
/// Setters request a redraw of the composition that created the
/// controller.
#[derive(Clone, Debug)]
pub struct AirBarController {
    controller: Rc<RefCell<ProgressController>>,
    handler: Rc<RefCell<PointerInteractionHandler>>,
    redraw: RedrawHandle,
}

impl AirBarController {
    pub fn new(config: &AirBarConfig, redraw: RedrawHandle) -> Result<Self> {
        Ok(Self {
            controller: Rc::new(RefCell::new(ProgressController::from_config(config)?)),
            handler: Rc::new(RefCell::new(PointerInteractionHandler::new())),
            redraw,
        })
    }

    /// Fill percentage, `0..=100`.
    pub fn progress(&self) -> f64 {
        self.controller.borrow().percentage()
    }

    pub fn set_progress(&self, percentage: f64) {
        self.controller.borrow_mut().set_percentage(percentage);
        self.redraw.request();
    }

    pub fn value(&self) -> f64 {
        self.controller.borrow().value()
    }

    pub fn set_value(&self, value: f64) {
        self.controller.borrow_mut().set_value(value);
        self.redraw.request();
    }

    pub fn reading(&self) -> Reading {
        self.controller.borrow().reading()
    }

    /// Fill boundary on the driven axis, once laid out.
    pub fn progress_coordinate(&self) -> Option<f64> {
        self.controller.borrow().fill_coordinate()
    }

    pub fn orientation(&self) -> Orientation {
        self.controller.borrow().orientation()
    }

    pub fn is_horizontal(&self) -> bool {
        self.orientation().is_horizontal()
    }

    pub fn animate_progress(&self) -> bool {
        self.controller.borrow().animate_changes()
    }

    pub fn set_animate_progress(&self, animate: bool) {
        self.controller.borrow_mut().set_animate_changes(animate);
        self.redraw.request();
    }

    /// Called once per gesture, on release.
    pub fn on_committed(&self, f: impl Fn(Reading) + 'static) {
        self.handler.borrow_mut().set_on_committed(f);
    }

    pub fn redraw_handle(&self) -> &RedrawHandle {
        &self.redraw
    }

    pub fn shares_state_with(&self, other: &AirBarController) -> bool {
        Rc::ptr_eq(&self.controller, &other.controller)
    }
}

/// Controller kept in the keyed slot `key`, created from `config` the first
/// time. Later compositions get the same controller back and ignore
/// `config`.
pub fn remember_air_bar_controller(
    key: impl Into<String>,
    config: &AirBarConfig,
) -> Result<AirBarController> {
    let slot = remember_with_key(key, || RefCell::new(None::<AirBarController>));
    if let Some(existing) = slot.borrow().as_ref() {
        return Ok(existing.clone());
    }
    let controller = AirBarController::new(config, current_redraw())?;
    *slot.borrow_mut() = Some(controller.clone());
    Ok(controller)
}

/// Default look of the composable: 40 unit corners, diagonal gradient
/// when one is set.
pub fn air_bar_style() -> AirBarStyle {
    AirBarStyle {
        corner_radius: COMPOSE_CORNER_RADIUS,
        gradient_direction: GradientDirection::Diagonal,
        ..AirBarStyle::default()
    }
}

/// Declarative AirBar. `on_value_change` receives the scaled value on every
/// accepted move; it replaces the one from the previous composition.
pub fn AirBar(
    modifier: Modifier,
    controller: &AirBarController,
    style: AirBarStyle,
    on_value_change: impl Fn(f64) + 'static,
) -> View {
    controller
        .handler
        .borrow_mut()
        .set_on_changed(move |r| on_value_change(r.value));
    View::new(
        0,
        ViewKind::AirBar(AirBarNode {
            controller: controller.controller.clone(),
            handler: controller.handler.clone(),
            redraw: controller.redraw.clone(),
            style,
        }),
    )
    .modifier(modifier)
}

/// Lays the tree out in a `size` window and paints it.
///
/// Ids are assigned in pre-order starting at 1. Every container is a flex
/// box: `Row` runs its children left to right, `Column` and `Box` top to
/// bottom, and children stretch across the cross axis. An `AirBar` without
/// an explicit size grows into the free space. Hit regions come out in
/// paint order, so the last one under a point is the top-most.
pub fn layout_and_paint(root: &View, size: (u32, u32)) -> (Scene, Vec<HitRegion>) {
    let mut id = 1u64;
    fn stamp(mut v: View, id: &mut u64) -> View {
        v.id = *id;
        *id += 1;
        v.children = v.children.into_iter().map(|c| stamp(c, id)).collect();
        v
    }
    let root = stamp(root.clone(), &mut id);

    let mut scene = Scene {
        clear_color: Color::WHITE,
        nodes: vec![],
    };
    let mut hits = vec![];

    if let Err(e) = layout_into(&root, size, &mut scene, &mut hits) {
        log::error!("layout failed, frame left empty: {e}");
        scene.nodes.clear();
        hits.clear();
    }
    (scene, hits)
}

#[derive(Clone)]
enum NodeCtx {
    Text { chars: usize, font_size: f32 },
    Container,
}

fn style_from_modifier(m: &Modifier, kind: &ViewKind) -> Style {
    let mut s = Style::default();
    s.display = Display::Flex;
    s.flex_direction = match kind {
        ViewKind::Row => FlexDirection::Row,
        _ => FlexDirection::Column,
    };
    s.align_items = Some(AlignItems::Stretch);
    s.justify_content = Some(JustifyContent::FlexStart);

    if let Some(p) = m.padding {
        let p = length(p.max(0.0));
        s.padding = taffy::geometry::Rect {
            left: p,
            right: p,
            top: p,
            bottom: p,
        };
    }

    let width = m.resolved_width();
    let height = m.resolved_height();
    if let Some(w) = width {
        s.size.width = length(w.max(0.0));
    }
    if let Some(h) = height {
        s.size.height = length(h.max(0.0));
    }

    let grow = match kind {
        ViewKind::AirBar(_) if width.is_none() && height.is_none() => m.flex_grow.or(Some(1.0)),
        _ => m.flex_grow,
    };
    if let Some(g) = grow {
        s.flex_grow = g.max(0.0);
        s.flex_basis = length(0.0);
        s.min_size = taffy::geometry::Size {
            width: length(0.0),
            height: length(0.0),
        };
    }
    s
}

fn build_node(
    v: &View,
    t: &mut TaffyTree<NodeCtx>,
    nodes: &mut HashMap<ViewId, NodeId>,
) -> Result<NodeId, TaffyError> {
    let style = style_from_modifier(&v.modifier, &v.kind);
    let node = match &v.kind {
        ViewKind::Text {
            text, font_size, ..
        } => t.new_leaf_with_context(
            style,
            NodeCtx::Text {
                chars: text.chars().count(),
                font_size: *font_size,
            },
        )?,
        _ => {
            let children = v
                .children
                .iter()
                .map(|c| build_node(c, t, nodes))
                .collect::<Result<Vec<NodeId>, TaffyError>>()?;
            let n = t.new_with_children(style, &children)?;
            t.set_node_context(n, Some(NodeCtx::Container))?;
            n
        }
    };
    nodes.insert(v.id, node);
    Ok(node)
}

fn layout_into(
    root: &View,
    size: (u32, u32),
    scene: &mut Scene,
    hits: &mut Vec<HitRegion>,
) -> Result<(), TaffyError> {
    let mut taffy = TaffyTree::<NodeCtx>::new();
    let mut nodes = HashMap::new();
    let root_node = build_node(root, &mut taffy, &mut nodes)?;

    let (w, h) = (size.0 as f32, size.1 as f32);
    let mut root_style = taffy.style(root_node)?.clone();
    if root.modifier.resolved_width().is_none() {
        root_style.size.width = length(w);
    }
    if root.modifier.resolved_height().is_none() {
        root_style.size.height = length(h);
    }
    taffy.set_style(root_node, root_style)?;

    let available = taffy::geometry::Size {
        width: AvailableSpace::Definite(w),
        height: AvailableSpace::Definite(h),
    };
    taffy.compute_layout_with_measure(
        root_node,
        available,
        |known, _available, _node, ctx, _style| match ctx {
            Some(NodeCtx::Text { chars, font_size }) => taffy::geometry::Size {
                width: known
                    .width
                    .unwrap_or(*chars as f32 * *font_size * TEXT_GLYPH_WIDTH),
                height: known.height.unwrap_or(*font_size * TEXT_LINE_HEIGHT),
            },
            Some(NodeCtx::Container) | None => taffy::geometry::Size::ZERO,
        },
    )?;

    walk(root, &taffy, &nodes, Vec2 { x: 0.0, y: 0.0 }, scene, hits)
}

/// Window rect of `node`; taffy locations are relative to the parent.
fn layout_of(node: NodeId, t: &TaffyTree<NodeCtx>, origin: Vec2) -> Result<Rect, TaffyError> {
    let l = t.layout(node)?;
    Ok(Rect::new(
        origin.x + l.location.x,
        origin.y + l.location.y,
        l.size.width,
        l.size.height,
    ))
}

fn walk(
    v: &View,
    t: &TaffyTree<NodeCtx>,
    nodes: &HashMap<ViewId, NodeId>,
    origin: Vec2,
    scene: &mut Scene,
    hits: &mut Vec<HitRegion>,
) -> Result<(), TaffyError> {
    let Some(&node) = nodes.get(&v.id) else {
        return Ok(());
    };
    let rect = layout_of(node, t, origin)?;
    let m = &v.modifier;
    let radius = m.clip_rounded.unwrap_or(0.0);

    if let Some(bg) = &m.background {
        scene.nodes.push(SceneNode::Rect {
            rect,
            brush: bg.clone(),
            radius,
        });
    }
    if m.clip_rounded.is_some() {
        scene.nodes.push(SceneNode::PushClip { rect, radius });
    }

    let content = rect.inset(m.padding.unwrap_or(0.0));

    match &v.kind {
        ViewKind::AirBar(bar) => paint_air_bar(v.id, bar, content, scene, hits),
        ViewKind::Text {
            text,
            color,
            font_size,
        } => {
            push_modifier_region(v, rect, hits);
            scene.nodes.push(SceneNode::Text {
                rect: content,
                text: text.clone(),
                color: *color,
                size: *font_size,
            });
        }
        ViewKind::Box | ViewKind::Row | ViewKind::Column => {
            push_modifier_region(v, rect, hits);
            let child_origin = Vec2 {
                x: rect.x,
                y: rect.y,
            };
            for child in &v.children {
                walk(child, t, nodes, child_origin, scene, hits)?;
            }
        }
    }

    if m.clip_rounded.is_some() {
        scene.nodes.push(SceneNode::PopClip);
    }
    Ok(())
}

fn push_modifier_region(v: &View, rect: Rect, hits: &mut Vec<HitRegion>) {
    let m = &v.modifier;
    if m.on_pointer_down.is_none() && m.on_pointer_move.is_none() && m.on_pointer_up.is_none() {
        return;
    }
    hits.push(HitRegion {
        id: v.id,
        rect,
        on_pointer_down: m.on_pointer_down.clone(),
        on_pointer_move: m.on_pointer_move.clone(),
        on_pointer_up: m.on_pointer_up.clone(),
        on_pointer_cancel: None,
    });
}

fn paint_air_bar(
    id: u64,
    node: &AirBarNode,
    rect: Rect,
    scene: &mut Scene,
    hits: &mut Vec<HitRegion>,
) {
    {
        let mut controller = node.controller.borrow_mut();
        let extent = controller.orientation().extent(rect.size());
        controller.resize(f64::from(extent));
    }
    render::paint(&node.controller.borrow(), &node.style, rect, scene);

    // Window coordinates in, surface-local coordinates to the handler.
    // Callbacks run after both borrows are released so they may write the
    // controller back.
    let on_event: PointerCallback = {
        let node = node.clone();
        Rc::new(move |pe: PointerEvent| {
            let local = pe.with_position(rect.to_local(pe.position));
            let (outcome, callbacks) = {
                let mut controller = node.controller.borrow_mut();
                let mut handler = node.handler.borrow_mut();
                (
                    handler.process(&mut controller, &local, rect.size()),
                    handler.callbacks(),
                )
            };
            if outcome.changed_state() {
                node.redraw.request();
            }
            callbacks.emit(outcome);
        })
    };

    hits.push(HitRegion {
        id,
        rect,
        on_pointer_down: Some(on_event.clone()),
        on_pointer_move: Some(on_event.clone()),
        on_pointer_up: Some(on_event.clone()),
        on_pointer_cancel: Some(on_event),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn horizontal_bar(scheduler: &mut Scheduler, values: Rc<RefCell<Vec<f64>>>) -> Frame {
        scheduler.compose(
            |_| {
                let config = AirBarConfig::horizontal().initial_value(50.0);
                let controller = remember_air_bar_controller("bar", &config).unwrap();
                let values = values.clone();
                Column(Modifier::new().size(150.0, 80.0)).with_children(vec![AirBar(
                    Modifier::new(),
                    &controller,
                    air_bar_style(),
                    move |v| values.borrow_mut().push(v),
                )])
            },
            layout_and_paint,
        )
    }

    fn bar_controller() -> AirBarController {
        remember_air_bar_controller("bar", &AirBarConfig::horizontal()).unwrap()
    }

    #[test]
    fn test_initial_value_resolved_on_first_frame() {
        let mut scheduler = Scheduler::with_size(400, 300);
        let frame = horizontal_bar(&mut scheduler, Rc::new(RefCell::new(vec![])));

        assert_eq!(frame.hit_regions.len(), 1);
        assert_eq!(frame.hit_regions[0].id, 2);
        assert_eq!(frame.hit_regions[0].rect, Rect::new(0.0, 0.0, 150.0, 80.0));

        let c = bar_controller();
        assert_eq!(c.progress_coordinate(), Some(75.0));
        assert_eq!(c.progress(), 50.0);
        assert!(matches!(
            frame.scene.nodes[0],
            SceneNode::Rect { radius, .. } if radius == 40.0
        ));
    }

    #[test]
    fn test_drag_through_router() {
        let mut scheduler = Scheduler::with_size(400, 300);
        let values = Rc::new(RefCell::new(vec![]));
        let frame = horizontal_bar(&mut scheduler, values.clone());
        let mut router = PointerRouter::new();

        assert!(router.dispatch(&frame, &PointerEvent::down(10.0, 40.0)));
        assert!(!scheduler.redraw.is_dirty());
        assert!(router.dispatch(&frame, &PointerEvent::moved(120.0, 40.0)));
        assert!(router.dispatch(&frame, &PointerEvent::moved(400.0, 40.0)));
        assert!(router.dispatch(&frame, &PointerEvent::up(400.0, 40.0)));

        assert_eq!(*values.borrow(), vec![80.0, 100.0]);
        assert!(scheduler.redraw.is_dirty());
        assert_eq!(bar_controller().progress_coordinate(), Some(150.0));
    }

    #[test]
    fn test_controller_survives_recomposition() {
        let mut scheduler = Scheduler::with_size(400, 300);
        let values = Rc::new(RefCell::new(vec![]));
        horizontal_bar(&mut scheduler, values.clone());
        let first = bar_controller();
        first.set_progress(20.0);

        let frame = horizontal_bar(&mut scheduler, values);
        let second = bar_controller();
        assert!(first.shares_state_with(&second));
        assert_eq!(second.progress(), 20.0);
        assert!(matches!(
            frame.scene.nodes[2],
            SceneNode::Rect { rect, .. } if rect == Rect::new(0.0, 0.0, 30.0, 80.0)
        ));
    }

    #[test]
    fn test_setters_wake_the_scheduler() {
        let mut scheduler = Scheduler::with_size(400, 300);
        let wakes = Rc::new(Cell::new(0));
        {
            let wakes = wakes.clone();
            scheduler
                .redraw
                .set_waker(move || wakes.set(wakes.get() + 1));
        }
        horizontal_bar(&mut scheduler, Rc::new(RefCell::new(vec![])));

        let c = bar_controller();
        c.set_value(10.0);
        c.set_animate_progress(false);
        assert_eq!(wakes.get(), 1);
        assert!(scheduler.redraw.is_dirty());

        horizontal_bar(&mut scheduler, Rc::new(RefCell::new(vec![])));
        assert!(!scheduler.redraw.is_dirty());
        assert!(!c.animate_progress());
    }

    #[test]
    fn test_value_callback_may_assign_progress() {
        let mut scheduler = Scheduler::with_size(400, 300);
        let frame = scheduler.compose(
            |_| {
                let controller = bar_controller();
                let target = controller.clone();
                AirBar(
                    Modifier::new().size(300.0, 80.0),
                    &controller,
                    air_bar_style(),
                    move |v| target.set_progress(v),
                )
            },
            layout_and_paint,
        );

        let mut router = PointerRouter::new();
        router.dispatch(&frame, &PointerEvent::down(0.0, 0.0));
        router.dispatch(&frame, &PointerEvent::moved(90.0, 10.0));
        assert_eq!(bar_controller().progress(), 30.0);
        assert_eq!(bar_controller().progress_coordinate(), Some(90.0));
    }

    #[test]
    fn test_commit_fires_once_per_gesture() {
        let mut scheduler = Scheduler::with_size(400, 300);
        let commits = Rc::new(RefCell::new(vec![]));
        let frame = horizontal_bar(&mut scheduler, Rc::new(RefCell::new(vec![])));
        {
            let commits = commits.clone();
            bar_controller().on_committed(move |r| commits.borrow_mut().push(r.value));
        }

        let mut router = PointerRouter::new();
        router.dispatch(&frame, &PointerEvent::down(30.0, 40.0));
        router.dispatch(&frame, &PointerEvent::moved(30.0, 40.0));
        router.dispatch(&frame, &PointerEvent::moved(60.0, 40.0));
        router.dispatch(&frame, &PointerEvent::up(60.0, 40.0));
        router.dispatch(&frame, &PointerEvent::up(60.0, 40.0));
        assert_eq!(*commits.borrow(), vec![40.0]);
    }

    #[test]
    fn test_padding_offsets_pointer_coordinates() {
        let mut scheduler = Scheduler::with_size(400, 400);
        let frame = scheduler.compose(
            |_| {
                let controller =
                    remember_air_bar_controller("v", &AirBarConfig::vertical()).unwrap();
                Box(Modifier::new().size(80.0, 220.0).padding(10.0)).with_children(vec![AirBar(
                    Modifier::new(),
                    &controller,
                    air_bar_style(),
                    |_| {},
                )])
            },
            layout_and_paint,
        );
        assert_eq!(frame.hit_regions[0].rect, Rect::new(10.0, 10.0, 60.0, 200.0));

        let mut router = PointerRouter::new();
        router.dispatch(&frame, &PointerEvent::down(40.0, 100.0));
        router.dispatch(&frame, &PointerEvent::moved(40.0, 60.0));
        let c = remember_air_bar_controller("v", &AirBarConfig::vertical()).unwrap();
        assert_eq!(c.progress(), 75.0);
    }

    #[test]
    fn test_column_splits_free_space() {
        let root = Column(Modifier::new().size(100.0, 200.0)).with_children(vec![
            Text("status"),
            Box(Modifier::new().flex_grow(1.0).background(Color::WHITE)),
            Box(Modifier::new().height(40.0).background(Color::BLACK)),
        ]);
        let (scene, hits) = layout_and_paint(&root, (800, 600));
        assert!(hits.is_empty());

        let rects: Vec<Rect> = scene
            .nodes
            .iter()
            .map(|n| match n {
                SceneNode::Text { rect, .. } | SceneNode::Rect { rect, .. } => *rect,
                other => panic!("unexpected node {other:?}"),
            })
            .collect();
        let expected = [
            Rect::new(0.0, 0.0, 100.0, 19.2),
            Rect::new(0.0, 19.2, 100.0, 140.8),
            Rect::new(0.0, 160.0, 100.0, 40.0),
        ];
        assert_eq!(rects.len(), expected.len());
        for (got, want) in rects.iter().zip(expected) {
            let close = |a: f32, b: f32| (a - b).abs() < 1e-3;
            assert!(
                close(got.x, want.x)
                    && close(got.y, want.y)
                    && close(got.w, want.w)
                    && close(got.h, want.h),
                "{got:?} != {want:?}"
            );
        }
    }

    #[test]
    fn test_row_bar_takes_space_left_by_text() {
        let mut scheduler = Scheduler::with_size(400, 300);
        let frame = scheduler.compose(
            |_| {
                let controller = bar_controller();
                Row(Modifier::new().size(300.0, 80.0).padding(4.0)).with_children(vec![
                    Text("ab"),
                    AirBar(Modifier::new(), &controller, air_bar_style(), |_| {}),
                ])
            },
            layout_and_paint,
        );

        assert_eq!(frame.hit_regions.len(), 1);
        let bar = frame.hit_regions[0].rect;
        let text_w = 2.0 * 16.0 * TEXT_GLYPH_WIDTH;
        let close = |a: f32, b: f32| (a - b).abs() < 1e-3;
        assert!(close(bar.x, 4.0 + text_w), "{bar:?}");
        assert!(close(bar.y, 4.0) && close(bar.h, 72.0), "{bar:?}");
        assert!(close(bar.w, 292.0 - text_w), "{bar:?}");

        assert_eq!(bar_controller().progress(), 90.0);
    }

    #[test]
    fn test_modifier_pointer_callbacks_get_regions() {
        let pressed = Rc::new(Cell::new(false));
        let root = {
            let pressed = pressed.clone();
            Row(Modifier::new()).with_children(vec![Box(Modifier::new()
                .width(50.0)
                .on_pointer_down(move |_| pressed.set(true)))])
        };
        let (scene, hit_regions) = layout_and_paint(&root, (200, 100));
        assert_eq!(hit_regions.len(), 1);
        assert_eq!(hit_regions[0].rect, Rect::new(0.0, 0.0, 50.0, 100.0));

        let frame = Frame { scene, hit_regions };
        PointerRouter::new().dispatch(&frame, &PointerEvent::down(25.0, 50.0));
        assert!(pressed.get());
    }
}
