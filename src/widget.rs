use crate::drag::Touch;
use crate::events::RangeEvent;
use crate::range_view::RangeView;
use crate::render;
use crate::style::RangeStyle;
use iced::mouse;
use iced::touch;
use iced::widget::canvas::{self, Action, Cache, Canvas, Geometry, Program};
use iced::{Element, Event, Length, Point, Rectangle, Renderer, Size, Theme, Vector};
use std::ops::RangeInclusive;
use std::sync::Arc;

const DEFAULT_HEIGHT: f32 = 56.0;

/// Creates a range view over `bounds`. Every input event that produced
/// notifications publishes one message built from the batch.
pub fn range_view<'a, Message>(
    bounds: RangeInclusive<f32>,
    on_event: impl Fn(Vec<RangeEvent>) -> Message + 'a,
) -> RangeViewWidget<'a, Message> {
    RangeViewWidget::new(bounds, on_event)
}

pub struct RangeViewWidget<'a, Message> {
    props: Props,
    width: Length,
    height: Length,
    on_event: Arc<dyn Fn(Vec<RangeEvent>) -> Message + 'a>,
}

impl<'a, Message> RangeViewWidget<'a, Message> {
    pub fn new(
        bounds: RangeInclusive<f32>,
        on_event: impl Fn(Vec<RangeEvent>) -> Message + 'a,
    ) -> Self {
        Self {
            props: Props {
                min_value: *bounds.start(),
                max_value: *bounds.end(),
                values: None,
                style: RangeStyle::default(),
            },
            width: Length::Fill,
            height: Length::Fixed(DEFAULT_HEIGHT),
            on_event: Arc::new(on_event),
        }
    }

    /// Applied whenever it changes and no drag is in progress. `None` leaves
    /// the selection to the widget.
    pub fn values(mut self, values: Option<(f32, f32)>) -> Self {
        self.props.values = values;
        self
    }

    pub fn style(mut self, style: RangeStyle) -> Self {
        self.props.style = style;
        self
    }

    pub fn width(mut self, width: Length) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: Length) -> Self {
        self.height = height;
        self
    }
}

impl<'a, Message> From<RangeViewWidget<'a, Message>> for Element<'a, Message>
where
    Message: 'a,
{
    fn from(widget: RangeViewWidget<'a, Message>) -> Self {
        let RangeViewWidget {
            props,
            width,
            height,
            on_event,
        } = widget;
        Canvas::new(RangeViewProgram { props, on_event })
            .width(width)
            .height(height)
            .into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Props {
    min_value: f32,
    max_value: f32,
    values: Option<(f32, f32)>,
    style: RangeStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pointer {
    Mouse,
    Finger(touch::Finger),
}

struct RangeViewState {
    view: RangeView,
    applied: Option<Props>,
    pointer: Option<Pointer>,
    background: Cache,
    foreground: Cache,
}

impl Default for RangeViewState {
    fn default() -> Self {
        Self {
            view: RangeView::default(),
            applied: None,
            pointer: None,
            background: Cache::new(),
            foreground: Cache::new(),
        }
    }
}

impl RangeViewState {
    fn sync(&mut self, props: Props, size: Size) {
        let previous_style = self.applied.map(|applied| applied.style);
        self.applied = Some(sync_view(&mut self.view, self.applied, props, size));

        if previous_style != Some(props.style) {
            self.background.clear();
        }
        if self.view.needs_repaint() {
            self.foreground.clear();
            self.view.mark_painted();
        }
    }

    fn is_synced(&self, props: &Props, size: Size) -> bool {
        let Some(applied) = self.applied else {
            return false;
        };
        let mut expected = *props;
        if !self.view.drag_state().is_idle() {
            // Values are deferred until the gesture ends.
            expected.values = applied.values;
        }
        applied == expected && self.view.size() == Some((size.width, size.height))
    }
}

/// Pushes changed properties into `view` and returns what was actually applied.
fn sync_view(view: &mut RangeView, applied: Option<Props>, props: Props, size: Size) -> Props {
    let mut synced = props;

    if applied.map(|a| a.style) != Some(props.style) {
        view.set_style(props.style);
    }
    if applied.map(|a| a.min_value) != Some(props.min_value) {
        view.set_min_value(props.min_value);
    }
    if applied.map(|a| a.max_value) != Some(props.max_value) {
        view.set_max_value(props.max_value);
    }
    if applied.map(|a| a.values) != Some(props.values) {
        if view.drag_state().is_idle() {
            if let Some((left, right)) = props.values {
                view.set_current_values(left, right);
            }
        } else {
            // Retried once the gesture is over.
            synced.values = applied.and_then(|a| a.values);
        }
    }
    if view.size() != Some((size.width, size.height)) {
        view.on_size_changed(size.width, size.height);
    }

    synced
}

struct RangeViewProgram<'a, Message> {
    props: Props,
    on_event: Arc<dyn Fn(Vec<RangeEvent>) -> Message + 'a>,
}

impl<'a, Message> RangeViewProgram<'a, Message> {
    fn local(bounds: Rectangle, position: Point) -> Point {
        position - Vector::new(bounds.x, bounds.y)
    }

    fn to_touch(
        &self,
        state: &mut RangeViewState,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Touch> {
        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                if state.pointer.is_some() {
                    return None;
                }
                state.pointer = Some(Pointer::Mouse);
                Some(Touch::down(position.x, position.y))
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if state.pointer != Some(Pointer::Mouse) {
                    return None;
                }
                let local = Self::local(bounds, *position);
                Some(Touch::moved(local.x, local.y))
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if state.pointer != Some(Pointer::Mouse) {
                    return None;
                }
                state.pointer = None;
                let local = cursor
                    .position()
                    .map(|position| Self::local(bounds, position))
                    .unwrap_or(Point::ORIGIN);
                Some(Touch::up(local.x, local.y))
            }
            Event::Touch(touch::Event::FingerPressed { id, position }) => {
                if state.pointer.is_some() || !bounds.contains(*position) {
                    return None;
                }
                state.pointer = Some(Pointer::Finger(*id));
                let local = Self::local(bounds, *position);
                Some(Touch::down(local.x, local.y))
            }
            Event::Touch(touch::Event::FingerMoved { id, position }) => {
                if state.pointer != Some(Pointer::Finger(*id)) {
                    return None;
                }
                let local = Self::local(bounds, *position);
                Some(Touch::moved(local.x, local.y))
            }
            Event::Touch(
                touch::Event::FingerLifted { id, position }
                | touch::Event::FingerLost { id, position },
            ) => {
                if state.pointer != Some(Pointer::Finger(*id)) {
                    return None;
                }
                state.pointer = None;
                let local = Self::local(bounds, *position);
                Some(Touch::up(local.x, local.y))
            }
            _ => None,
        }
    }
}

impl<'a, Message> Program<Message> for RangeViewProgram<'a, Message> {
    type State = RangeViewState;

    fn draw(
        &self,
        state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let size = bounds.size();

        if state.is_synced(&self.props, size) {
            let view = &state.view;
            let background = state.background.draw(renderer, size, |frame| {
                render::draw_background(frame, view.geometry(), view.style());
            });
            let foreground = state.foreground.draw(renderer, size, |frame| {
                render::draw_foreground(frame, view.geometry(), view.style(), size.height);
            });
            return vec![background, foreground];
        }

        // Not updated for these properties yet; draw a synced copy without touching the caches.
        let mut view = state.view.clone();
        sync_view(&mut view, state.applied, self.props, size);

        let mut background = canvas::Frame::new(renderer, size);
        render::draw_background(&mut background, view.geometry(), view.style());
        let mut foreground = canvas::Frame::new(renderer, size);
        render::draw_foreground(&mut foreground, view.geometry(), view.style(), size.height);

        vec![background.into_geometry(), foreground.into_geometry()]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        state.sync(self.props, bounds.size());

        let touch = self.to_touch(state, event, bounds, cursor)?;
        let mut events = Vec::new();
        state.view.on_touch_event(touch, &mut events);
        state.sync(self.props, bounds.size());

        if events.is_empty() {
            return Some(Action::request_redraw().and_capture());
        }
        Some(Action::publish((self.on_event)(events)).and_capture())
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.pointer.is_some() && !state.view.drag_state().is_idle() {
            return mouse::Interaction::Grabbing;
        }

        if let Some(position) = cursor.position_in(bounds) {
            let view = &state.view;
            let on_left = view.is_touch_on_left_toggle(position.x);
            let on_right = view.is_touch_on_right_toggle(position.x);
            if on_left || on_right {
                return mouse::Interaction::Grab;
            }
        }

        mouse::Interaction::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::DraggingState;

    fn props(values: Option<(f32, f32)>) -> Props {
        Props {
            min_value: 0.0,
            max_value: 100.0,
            values,
            style: RangeStyle::default().horizontal_margin(0.0).toggle_width(10.0),
        }
    }

    #[test]
    fn test_sync_applies_props_and_size() {
        let mut view = RangeView::default();
        let size = Size::new(400.0, 40.0);
        let applied = sync_view(&mut view, None, props(Some((25.0, 75.0))), size);
        assert_eq!(applied, props(Some((25.0, 75.0))));
        assert_eq!(view.size(), Some((400.0, 40.0)));
        assert_eq!(view.geometry().max_value(), 100.0);
        assert_eq!(view.geometry().range().left, 100.0);
        assert_eq!(view.geometry().range().right, 300.0);
    }

    #[test]
    fn test_sync_defers_values_while_dragging() {
        let mut view = RangeView::default();
        let size = Size::new(300.0, 40.0);
        let applied = sync_view(&mut view, None, props(None), size);

        let mut events = Vec::new();
        view.on_touch_event(Touch::down(5.0, 20.0), &mut events);
        assert_eq!(view.dragging_state(), DraggingState::DraggingLeft);

        let deferred = sync_view(&mut view, Some(applied), props(Some((10.0, 20.0))), size);
        assert_eq!(deferred.values, None);
        assert_eq!(view.geometry().range().left, 0.0);

        view.on_touch_event(Touch::up(5.0, 20.0), &mut events);
        let applied = sync_view(&mut view, Some(deferred), props(Some((10.0, 20.0))), size);
        assert_eq!(applied.values, Some((10.0, 20.0)));
        assert_eq!(view.geometry().range().left, 30.0);
    }

    #[test]
    fn test_state_sync_tracks_repaint() {
        let mut state = RangeViewState::default();
        let size = Size::new(300.0, 40.0);
        state.sync(props(None), size);
        assert!(state.is_synced(&props(None), size));
        assert!(!state.view.needs_repaint());
        assert!(!state.is_synced(&props(Some((1.0, 2.0))), size));
        assert!(!state.is_synced(&props(None), Size::new(200.0, 40.0)));
    }

    const BOUNDS: Rectangle = Rectangle {
        x: 10.0,
        y: 20.0,
        width: 300.0,
        height: 40.0,
    };

    fn program(props: Props) -> RangeViewProgram<'static, Vec<RangeEvent>> {
        RangeViewProgram {
            props,
            on_event: Arc::new(|events: Vec<RangeEvent>| events),
        }
    }

    fn synced_state() -> RangeViewState {
        let mut state = RangeViewState::default();
        state.sync(props(None), BOUNDS.size());
        state
    }

    fn cursor(x: f32, y: f32) -> mouse::Cursor {
        mouse::Cursor::Available(Point::new(x, y))
    }

    fn press() -> Event {
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left))
    }

    fn release() -> Event {
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
    }

    fn cursor_moved(x: f32, y: f32) -> Event {
        Event::Mouse(mouse::Event::CursorMoved {
            position: Point::new(x, y),
        })
    }

    fn finger(event: fn(touch::Finger, Point) -> touch::Event, id: u64, x: f32, y: f32) -> Event {
        Event::Touch(event(touch::Finger(id), Point::new(x, y)))
    }

    fn pressed(id: touch::Finger, position: Point) -> touch::Event {
        touch::Event::FingerPressed { id, position }
    }

    fn moved(id: touch::Finger, position: Point) -> touch::Event {
        touch::Event::FingerMoved { id, position }
    }

    fn lifted(id: touch::Finger, position: Point) -> touch::Event {
        touch::Event::FingerLifted { id, position }
    }

    fn lost(id: touch::Finger, position: Point) -> touch::Event {
        touch::Event::FingerLost { id, position }
    }

    #[test]
    fn test_mouse_maps_to_local_touches() {
        let program = program(props(None));
        let mut state = synced_state();

        let down = program.to_touch(&mut state, &press(), BOUNDS, cursor(15.0, 40.0));
        assert_eq!(down, Some(Touch::down(5.0, 20.0)));
        assert_eq!(state.pointer, Some(Pointer::Mouse));

        let event = cursor_moved(110.0, 45.0);
        let moved = program.to_touch(&mut state, &event, BOUNDS, cursor(110.0, 45.0));
        assert_eq!(moved, Some(Touch::moved(100.0, 25.0)));

        let up = program.to_touch(&mut state, &release(), BOUNDS, cursor(120.0, 45.0));
        assert_eq!(up, Some(Touch::up(110.0, 25.0)));
        assert_eq!(state.pointer, None);
    }

    #[test]
    fn test_mouse_outside_bounds_is_ignored() {
        let program = program(props(None));
        let mut state = synced_state();

        let down = program.to_touch(&mut state, &press(), BOUNDS, cursor(5.0, 40.0));
        assert_eq!(down, None);
        assert_eq!(state.pointer, None);

        let event = cursor_moved(50.0, 40.0);
        assert_eq!(program.to_touch(&mut state, &event, BOUNDS, cursor(50.0, 40.0)), None);
        assert_eq!(program.to_touch(&mut state, &release(), BOUNDS, cursor(50.0, 40.0)), None);
    }

    #[test]
    fn test_release_without_cursor_still_ends_gesture() {
        let program = program(props(None));
        let mut state = synced_state();

        program.to_touch(&mut state, &press(), BOUNDS, cursor(15.0, 40.0));
        let up = program.to_touch(&mut state, &release(), BOUNDS, mouse::Cursor::Unavailable);
        assert_eq!(up, Some(Touch::up(0.0, 0.0)));
        assert_eq!(state.pointer, None);
    }

    #[test]
    fn test_only_first_finger_is_tracked() {
        let program = program(props(None));
        let mut state = synced_state();
        let no_cursor = mouse::Cursor::Unavailable;

        let down = finger(pressed, 1, 15.0, 40.0);
        assert_eq!(
            program.to_touch(&mut state, &down, BOUNDS, no_cursor),
            Some(Touch::down(5.0, 20.0))
        );
        assert_eq!(state.pointer, Some(Pointer::Finger(touch::Finger(1))));

        let second = finger(pressed, 2, 200.0, 40.0);
        assert_eq!(program.to_touch(&mut state, &second, BOUNDS, no_cursor), None);
        let second_moved = finger(moved, 2, 210.0, 40.0);
        assert_eq!(program.to_touch(&mut state, &second_moved, BOUNDS, no_cursor), None);
        let mouse_down = program.to_touch(&mut state, &press(), BOUNDS, cursor(100.0, 40.0));
        assert_eq!(mouse_down, None);
        assert_eq!(state.pointer, Some(Pointer::Finger(touch::Finger(1))));

        let first_moved = finger(moved, 1, 60.0, 30.0);
        assert_eq!(
            program.to_touch(&mut state, &first_moved, BOUNDS, no_cursor),
            Some(Touch::moved(50.0, 10.0))
        );

        let second_lifted = finger(lifted, 2, 210.0, 40.0);
        assert_eq!(program.to_touch(&mut state, &second_lifted, BOUNDS, no_cursor), None);

        let first_lifted = finger(lifted, 1, 70.0, 30.0);
        assert_eq!(
            program.to_touch(&mut state, &first_lifted, BOUNDS, no_cursor),
            Some(Touch::up(60.0, 10.0))
        );
        assert_eq!(state.pointer, None);
    }

    #[test]
    fn test_finger_outside_bounds_is_ignored() {
        let program = program(props(None));
        let mut state = synced_state();

        let down = finger(pressed, 1, 400.0, 40.0);
        assert_eq!(
            program.to_touch(&mut state, &down, BOUNDS, mouse::Cursor::Unavailable),
            None
        );
        assert_eq!(state.pointer, None);
    }

    #[test]
    fn test_lost_finger_ends_gesture() {
        let program = program(props(None));
        let mut state = synced_state();
        let no_cursor = mouse::Cursor::Unavailable;

        program.to_touch(&mut state, &finger(pressed, 3, 15.0, 40.0), BOUNDS, no_cursor);
        let up = program.to_touch(&mut state, &finger(lost, 3, 40.0, 40.0), BOUNDS, no_cursor);
        assert_eq!(up, Some(Touch::up(30.0, 20.0)));
        assert_eq!(state.pointer, None);

        let down = finger(pressed, 4, 15.0, 40.0);
        assert!(program.to_touch(&mut state, &down, BOUNDS, no_cursor).is_some());
    }

    #[test]
    fn test_stays_synced_while_host_echoes_values() {
        let mut state = synced_state();
        let first = program(props(None));
        let _ = first.update(&mut state, &press(), BOUNDS, cursor(15.0, 40.0));
        assert_eq!(state.view.dragging_state(), DraggingState::DraggingLeft);

        let event = cursor_moved(40.0, 40.0);
        let _ = first.update(&mut state, &event, BOUNDS, cursor(40.0, 40.0));
        let left = state.view.left_value();
        assert!((left - 10.0).abs() < 0.01);

        // The host feeds the reported values back while the drag continues.
        let echoed = program(props(Some((left, 100.0))));
        let event = cursor_moved(70.0, 40.0);
        let _ = echoed.update(&mut state, &event, BOUNDS, cursor(70.0, 40.0));
        assert!(state.is_synced(&echoed.props, BOUNDS.size()));
        let left = state.view.left_value();
        assert!((left - 20.0).abs() < 0.01);

        let echoed = program(props(Some((left, 100.0))));
        let _ = echoed.update(&mut state, &release(), BOUNDS, cursor(70.0, 40.0));
        assert_eq!(state.view.dragging_state(), DraggingState::Idle);
        assert!(state.is_synced(&echoed.props, BOUNDS.size()));
        assert_eq!(state.view.current_values(), Some((left, 100.0)));
    }
}
