//! Toolkit independent range view: owns the geometry, the drag machine and
//! the style, and exposes the size and touch callbacks a host toolkit drives.

use crate::drag::{DragState, DragStateMachine, DraggingState, Touch};
use crate::events::RangeEventSink;
use crate::geometry::Geometry;
use crate::style::RangeStyle;

pub const DEFAULT_MIN_VALUE: f32 = 0.0;
pub const DEFAULT_MAX_VALUE: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RangeView {
    geometry: Geometry,
    drag: DragStateMachine,
    style: RangeStyle,
    size: Option<(f32, f32)>,
    painted_revision: Option<u64>,
}

impl Default for RangeView {
    fn default() -> Self {
        Self::new(RangeStyle::default())
    }
}

impl RangeView {
    pub fn new(style: RangeStyle) -> Self {
        Self {
            geometry: Geometry::new(
                DEFAULT_MIN_VALUE,
                DEFAULT_MAX_VALUE,
                style.horizontal_margin,
                style.stroke_width,
            ),
            drag: DragStateMachine::new(style.toggle_width, style.touch_size_factor),
            style,
            size: None,
            painted_revision: None,
        }
    }

    pub fn with_bounds(mut self, min_value: f32, max_value: f32) -> Self {
        self.set_min_value(min_value);
        self.set_max_value(max_value);
        self
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn style(&self) -> &RangeStyle {
        &self.style
    }

    pub fn size(&self) -> Option<(f32, f32)> {
        self.size
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn dragging_state(&self) -> DraggingState {
        self.drag.state().dragging_state()
    }

    pub fn set_style(&mut self, style: RangeStyle) {
        self.geometry
            .set_metrics(style.horizontal_margin, style.stroke_width);
        self.drag
            .set_toggle_metrics(style.toggle_width, style.touch_size_factor);
        self.style = style;
        self.relayout();
    }

    pub fn on_size_changed(&mut self, width: f32, height: f32) {
        tracing::trace!(width, height, "range view resized");
        self.size = Some((width, height));
        self.geometry.recompute_layout(width, height);
    }

    /// Handles one touch event. The event is always reported as consumed.
    pub fn on_touch_event(&mut self, touch: Touch, sink: &mut impl RangeEventSink) -> bool {
        self.drag.on_touch(&mut self.geometry, touch, sink)
    }

    pub fn set_max_value(&mut self, max_value: f32) {
        self.geometry.set_max_value(max_value);
    }

    pub fn set_min_value(&mut self, min_value: f32) {
        self.geometry.set_min_value(min_value);
    }

    pub fn set_current_values(&mut self, left_value: f32, right_value: f32) {
        self.geometry.set_current_values(left_value, right_value);
        self.relayout();
    }

    /// Pixel position of `value`, or `0` when the value lies outside `[min, max]`.
    pub fn x_position_of_value(&self, value: f32) -> f32 {
        self.geometry.value_to_x(value)
    }

    pub fn left_value(&self) -> f32 {
        self.geometry.x_to_left_value()
    }

    pub fn right_value(&self) -> f32 {
        self.geometry.x_to_right_value()
    }

    pub fn current_values(&self) -> Option<(f32, f32)> {
        self.geometry.current_values()
    }

    pub fn is_touch_on_left_toggle(&self, x: f32) -> bool {
        self.drag.is_touch_on_left_toggle(&self.geometry, x)
    }

    pub fn is_touch_on_right_toggle(&self, x: f32) -> bool {
        self.drag.is_touch_on_right_toggle(&self.geometry, x)
    }

    pub fn needs_repaint(&self) -> bool {
        self.painted_revision != Some(self.geometry.revision())
    }

    pub fn mark_painted(&mut self) {
        self.painted_revision = Some(self.geometry.revision());
    }

    fn relayout(&mut self) {
        if let Some((width, height)) = self.size {
            self.geometry.recompute_layout(width, height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Listeners, RangeEvent};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    fn view() -> RangeView {
        let style = RangeStyle::default().horizontal_margin(0.0).toggle_width(10.0);
        let mut view = RangeView::new(style).with_bounds(0.0, 100.0);
        view.on_size_changed(300.0, 40.0);
        view
    }

    #[test]
    fn test_defaults() {
        let view = RangeView::default();
        assert_eq!(view.geometry().min_value(), DEFAULT_MIN_VALUE);
        assert_eq!(view.geometry().max_value(), DEFAULT_MAX_VALUE);
        assert_eq!(view.current_values(), None);
        assert_eq!(view.dragging_state(), DraggingState::Idle);
    }

    #[test]
    fn test_x_position_of_value() {
        let view = view();
        assert!(approx(view.x_position_of_value(50.0), 150.0));
        assert_eq!(view.x_position_of_value(150.0), 0.0);
    }

    #[test]
    fn test_set_current_values_relayouts() {
        let mut view = view();
        view.set_current_values(10.0, 90.0);
        assert!(approx(view.geometry().range().left, 30.0));
        assert!(approx(view.geometry().range().right, 270.0));
        assert!(approx(view.left_value(), 10.0));
        assert!(approx(view.right_value(), 90.0));
    }

    #[test]
    fn test_set_current_values_before_size_waits_for_layout() {
        let mut view = RangeView::default().with_bounds(0.0, 100.0);
        view.set_current_values(50.0, 100.0);
        assert_eq!(view.size(), None);
        view.on_size_changed(200.0, 20.0);
        // Track is [16, 184] with the default margin.
        assert!(approx(view.geometry().range().left, 100.0));
    }

    #[test]
    fn test_set_max_value_repaints_without_relayout() {
        let mut view = view();
        view.set_current_values(50.0, 100.0);
        view.mark_painted();
        let range = view.geometry().range();

        view.set_max_value(200.0);
        assert!(view.needs_repaint());
        assert_eq!(view.geometry().range(), range);
        assert!(approx(view.left_value(), 100.0));
    }

    #[test]
    fn test_drag_through_listeners() {
        let mut view = view();
        let reported = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();
        {
            let reported = reported.clone();
            listeners.set_value_listener(move |_max: f32, _min: f32, left: f32, right: f32| {
                reported.borrow_mut().push((left, right));
            });
        }

        assert!(view.on_touch_event(Touch::down(10.0, 20.0), &mut listeners));
        assert!(view.on_touch_event(Touch::moved(200.0, 20.0), &mut listeners));
        assert!(view.on_touch_event(Touch::up(200.0, 20.0), &mut listeners));

        assert!(approx(view.left_value(), 66.67));
        let reported = reported.borrow();
        assert_eq!(reported.len(), 1);
        assert!(reported[0].0 <= reported[0].1);
        assert_eq!(view.dragging_state(), DraggingState::Idle);
    }

    #[test]
    fn test_overlapping_toggles_resolve_by_direction() {
        let mut view = view();
        view.set_current_values(50.0, 50.0);
        let mut events = Vec::new();
        view.on_touch_event(Touch::down(150.0, 20.0), &mut events);
        assert_eq!(view.dragging_state(), DraggingState::DraggingConflict);

        view.on_touch_event(Touch::moved(175.0, 20.0), &mut events);
        assert_eq!(view.dragging_state(), DraggingState::DraggingRight);
        assert_eq!(view.geometry().range().right, 175.0);
        assert!(events.contains(&RangeEvent::DraggingStateChanged(
            DraggingState::DraggingRight
        )));
    }

    #[test]
    fn test_repaint_tracking() {
        let mut view = view();
        assert!(view.needs_repaint());
        view.mark_painted();
        assert!(!view.needs_repaint());

        let mut events = Vec::new();
        view.on_touch_event(Touch::down(150.0, 20.0), &mut events);
        assert!(!view.needs_repaint());

        view.on_touch_event(Touch::down(295.0, 20.0), &mut events);
        view.on_touch_event(Touch::moved(250.0, 20.0), &mut events);
        assert!(view.needs_repaint());
    }

    #[test]
    fn test_set_style_relayouts() {
        let mut view = view();
        view.set_style(RangeStyle::default().horizontal_margin(20.0));
        assert_eq!(view.geometry().track().left, 20.0);
        assert_eq!(view.geometry().track().right, 280.0);
        assert_eq!(view.geometry().range(), view.geometry().track());
    }
}
