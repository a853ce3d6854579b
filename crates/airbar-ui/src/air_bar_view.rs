//! Imperative AirBar: the host owns the view, feeds it layout bounds and
//! surface-local pointer events, and paints it when its redraw handle is
//! dirty.

use airbar_core::render::{self, BarGeometry};
use airbar_core::{
    AirBarConfig, AirBarStyle, Color, GradientDirection, Icon, Orientation,
    PointerInteractionHandler, PointerEvent, ProgressController, Reading, Rect, RedrawHandle,
    Result, Scene, ValueRange,
};

/// Retained-mode bar. Every setter stores the new state and requests a
/// redraw; nothing is painted until the host calls [`AirBarView::draw`].
///
/// Callbacks run at the end of [`on_pointer_event`](Self::on_pointer_event),
/// after the state for that event has been applied.
#[derive(Debug)]
pub struct AirBarView {
    controller: ProgressController,
    handler: PointerInteractionHandler,
    style: AirBarStyle,
    bounds: Rect,
    redraw: RedrawHandle,
}

impl AirBarView {
    pub fn new(config: &AirBarConfig) -> Result<Self> {
        let controller = ProgressController::from_config(config)?;
        log::debug!(
            "AirBarView created: {:?} [{}, {}]",
            config.orientation,
            config.min,
            config.max
        );
        Ok(Self {
            controller,
            handler: PointerInteractionHandler::new(),
            style: config.style.clone(),
            bounds: Rect::default(),
            redraw: RedrawHandle::new(),
        })
    }

    pub fn redraw_handle(&self) -> &RedrawHandle {
        &self.redraw
    }

    // Listeners

    pub fn set_on_changed(&mut self, f: impl Fn(Reading) + 'static) {
        self.handler.set_on_changed(f);
    }

    pub fn set_on_committed(&mut self, f: impl Fn(Reading) + 'static) {
        self.handler.set_on_committed(f);
    }

    pub fn clear_listeners(&mut self) {
        self.handler.clear_on_changed();
        self.handler.clear_on_committed();
    }

    // Range

    pub fn min(&self) -> f64 {
        self.controller.range().min()
    }

    pub fn max(&self) -> f64 {
        self.controller.range().max()
    }

    pub fn set_min(&mut self, min: f64) -> Result<()> {
        self.set_range(min, self.max())
    }

    pub fn set_max(&mut self, max: f64) -> Result<()> {
        self.set_range(self.min(), max)
    }

    /// Replaces the value range; the percentage is kept.
    pub fn set_range(&mut self, min: f64, max: f64) -> Result<()> {
        let range = ValueRange::new(min, max)?;
        self.controller.set_range(range);
        self.redraw.request();
        Ok(())
    }

    // Values

    pub fn orientation(&self) -> Orientation {
        self.controller.orientation()
    }

    pub fn reading(&self) -> Reading {
        self.controller.reading()
    }

    pub fn percentage(&self) -> f64 {
        self.controller.percentage()
    }

    pub fn value(&self) -> f64 {
        self.controller.value()
    }

    pub fn fill_coordinate(&self) -> Option<f64> {
        self.controller.fill_coordinate()
    }

    pub fn is_initialized(&self) -> bool {
        self.controller.is_initialized()
    }

    /// Assigns a value in `[min, max]`; out-of-range values saturate. Before
    /// the first layout the value is held and applied then.
    pub fn set_value(&mut self, value: f64) -> Option<f64> {
        let fill = self.controller.set_value(value);
        self.redraw.request();
        fill
    }

    pub fn set_percentage(&mut self, percentage: f64) -> Option<f64> {
        let fill = self.controller.set_percentage(percentage);
        self.redraw.request();
        fill
    }

    pub fn animate_changes(&self) -> bool {
        self.controller.animate_changes()
    }

    pub fn set_animate_changes(&mut self, animate: bool) {
        self.controller.set_animate_changes(animate);
        self.redraw.request();
    }

    // Style

    pub fn style(&self) -> &AirBarStyle {
        &self.style
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.style.background = color;
        self.redraw.request();
    }

    /// Solid fill; drops any gradient.
    pub fn set_fill_color(&mut self, color: Color) {
        self.style = self.style.clone().fill(color);
        self.redraw.request();
    }

    /// Replaces the first gradient stop, starting a two-stop gradient from
    /// the solid fill when there is none.
    pub fn set_gradient_start(&mut self, color: Color) {
        match self.style.fill_gradient.as_mut_slice() {
            [first, _, ..] => *first = color,
            _ => self.style.fill_gradient = vec![color, self.style.fill],
        }
        self.redraw.request();
    }

    /// Replaces the last gradient stop, starting a two-stop gradient from
    /// the solid fill when there is none.
    pub fn set_gradient_end(&mut self, color: Color) {
        match self.style.fill_gradient.as_mut_slice() {
            [_, .., last] => *last = color,
            _ => self.style.fill_gradient = vec![self.style.fill, color],
        }
        self.redraw.request();
    }

    pub fn set_gradient_stops(&mut self, stops: Vec<Color>) {
        self.style.fill_gradient = stops;
        self.redraw.request();
    }

    pub fn set_gradient_direction(&mut self, direction: GradientDirection) {
        self.style.gradient_direction = direction;
        self.redraw.request();
    }

    pub fn set_corner_radius(&mut self, radius: f32) {
        self.style.corner_radius = radius;
        self.redraw.request();
    }

    pub fn set_icon(&mut self, icon: Option<Icon>) {
        self.style.icon = icon;
        self.redraw.request();
    }

    // Host hooks

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Records the bounds assigned by the host's layout pass.
    pub fn on_layout(&mut self, bounds: Rect) {
        if bounds == self.bounds {
            return;
        }
        log::trace!("AirBarView laid out at {bounds:?}");
        self.bounds = bounds;
        let extent = self.orientation().extent(bounds.size());
        self.controller.resize(f64::from(extent));
        self.redraw.request();
    }

    /// Handles a pointer event whose position is relative to the view's
    /// top-left corner. Returns whether the event was consumed.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> bool {
        let outcome = self
            .handler
            .process(&mut self.controller, event, self.bounds.size());
        if outcome.changed_state() {
            self.redraw.request();
        }
        self.handler.callbacks().emit(outcome);
        outcome.is_handled()
    }

    pub fn geometry(&self) -> BarGeometry {
        render::bar_geometry(&self.controller, &self.style, self.bounds)
    }

    pub fn draw(&self, scene: &mut Scene) -> BarGeometry {
        render::paint(&self.controller, &self.style, self.bounds, scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airbar_core::{Brush, LinearGradient, SceneNode};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn laid_out(config: AirBarConfig, bounds: Rect) -> AirBarView {
        let mut v = AirBarView::new(&config).unwrap();
        v.on_layout(bounds);
        v.redraw_handle().take();
        v
    }

    #[test]
    fn test_first_layout_shows_placeholder() {
        let mut v = AirBarView::new(&AirBarConfig::vertical()).unwrap();
        assert!(!v.is_initialized());
        assert_eq!(v.percentage(), 0.0);

        v.on_layout(Rect::new(0.0, 0.0, 60.0, 200.0));
        assert_eq!(v.percentage(), 90.0);
        assert_eq!(v.fill_coordinate(), Some(20.0));
        assert!(v.redraw_handle().is_dirty());
    }

    #[test]
    fn test_value_before_layout_is_applied_on_layout() {
        let mut v = AirBarView::new(&AirBarConfig::vertical().range(0.0, 200.0)).unwrap();
        assert_eq!(v.set_value(60.0), None);
        v.on_layout(Rect::new(0.0, 0.0, 40.0, 100.0));
        assert_eq!(v.fill_coordinate(), Some(70.0));
        assert_eq!(v.value(), 60.0);
    }

    #[test]
    fn test_drag_reports_and_commits() {
        let mut v = laid_out(AirBarConfig::vertical(), Rect::new(100.0, 100.0, 60.0, 200.0));
        let changed = Rc::new(RefCell::new(Vec::new()));
        let committed = Rc::new(RefCell::new(Vec::new()));
        {
            let changed = changed.clone();
            v.set_on_changed(move |r| changed.borrow_mut().push(r));
            let committed = committed.clone();
            v.set_on_committed(move |r| committed.borrow_mut().push(r));
        }

        assert!(v.on_pointer_event(&PointerEvent::down(30.0, 150.0)));
        assert!(!v.redraw_handle().is_dirty());
        assert!(v.on_pointer_event(&PointerEvent::moved(30.0, 50.0)));
        assert!(v.redraw_handle().is_dirty());
        assert!(v.on_pointer_event(&PointerEvent::up(30.0, 50.0)));

        assert_eq!(changed.borrow().len(), 1);
        assert_eq!(changed.borrow()[0].percentage, 75.0);
        assert_eq!(*committed.borrow(), *changed.borrow());
        assert!(!v.on_pointer_event(&PointerEvent::moved(30.0, 10.0)));
    }

    #[test]
    fn test_setters_coalesce_redraws() {
        let mut v = laid_out(AirBarConfig::vertical(), Rect::new(0.0, 0.0, 60.0, 200.0));
        let wakes = Rc::new(Cell::new(0));
        {
            let wakes = wakes.clone();
            v.redraw_handle()
                .set_waker(move || wakes.set(wakes.get() + 1));
        }

        v.set_value(10.0);
        v.set_fill_color(Color::WHITE);
        v.set_corner_radius(12.0);
        assert_eq!(wakes.get(), 1);
        assert!(v.redraw_handle().take());

        v.set_background_color(Color::BLACK);
        assert_eq!(wakes.get(), 2);
    }

    #[test]
    fn test_animate_flag_requests_redraw() {
        let mut v = laid_out(AirBarConfig::vertical(), Rect::new(0.0, 0.0, 60.0, 200.0));
        assert!(v.animate_changes());

        v.set_animate_changes(false);
        assert!(v.redraw_handle().take());
        assert!(!v.geometry().animate);
    }

    #[test]
    fn test_range_setters_validate() {
        let mut v = laid_out(AirBarConfig::vertical(), Rect::new(0.0, 0.0, 60.0, 200.0));
        v.set_value(50.0);
        assert!(v.set_max(0.0).is_err());
        assert_eq!(v.max(), 100.0);

        v.set_max(10.0).unwrap();
        assert_eq!(v.value(), 5.0);
        v.set_min(-10.0).unwrap();
        assert_eq!(v.value(), 0.0);
    }

    #[test]
    fn test_fill_color_resets_gradient() {
        let mut v = laid_out(AirBarConfig::vertical(), Rect::new(0.0, 0.0, 60.0, 200.0));
        v.set_gradient_start(Color::BLACK);
        v.set_gradient_end(Color::WHITE);
        assert_eq!(
            v.style().fill_brush(),
            LinearGradient::vertical(Color::BLACK, Color::WHITE)
        );

        v.set_fill_color(Color::from_hex("#00FF00"));
        assert!(v.style().fill_gradient.is_empty());
        assert_eq!(v.style().fill_brush(), Brush::Solid(Color(0, 255, 0, 255)));
    }

    #[test]
    fn test_gradient_ends_keep_middle_stops() {
        let mut v = laid_out(AirBarConfig::vertical(), Rect::new(0.0, 0.0, 60.0, 200.0));
        let red = Color::from_hex("#FF0000");
        v.set_gradient_stops(vec![Color::BLACK, red, Color::WHITE]);
        assert!(v.redraw_handle().take());

        let blue = Color::from_hex("#0000FF");
        v.set_gradient_start(blue);
        v.set_gradient_end(red);
        assert_eq!(v.style().fill_gradient, vec![blue, red, red]);
        assert!(matches!(
            v.style().fill_brush(),
            Brush::Linear { ref stops, .. } if stops.len() == 3
        ));
    }

    #[test]
    fn test_relayout_keeps_percentage() {
        let mut v = laid_out(AirBarConfig::horizontal(), Rect::new(0.0, 0.0, 300.0, 80.0));
        v.set_value(30.0);
        assert_eq!(v.fill_coordinate(), Some(90.0));

        v.on_layout(Rect::new(0.0, 0.0, 150.0, 80.0));
        assert_eq!(v.fill_coordinate(), Some(45.0));
        assert_eq!(v.percentage(), 30.0);
    }

    #[test]
    fn test_draw_emits_bar_nodes() {
        let mut v = laid_out(AirBarConfig::vertical(), Rect::new(10.0, 10.0, 60.0, 200.0));
        v.set_icon(Some(Icon::new(3, 24.0, 24.0)));
        let mut scene = Scene::default();
        let g = v.draw(&mut scene);

        assert_eq!(g, v.geometry());
        assert_eq!(scene.nodes.len(), 5);
        assert!(matches!(scene.nodes[3], SceneNode::Icon { rect, .. } if rect == Rect::new(28.0, 171.0, 24.0, 24.0)));
    }
}
