use crate::drag::DraggingState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeEvent {
    /// Values are normalized so that `left_value <= right_value`.
    RangeChanged {
        max_value: f32,
        min_value: f32,
        left_value: f32,
        right_value: f32,
    },
    LeftTogglePositionChanged {
        x: f32,
        value: f32,
    },
    RightTogglePositionChanged {
        x: f32,
        value: f32,
    },
    DraggingStateChanged(DraggingState),
}

/// Receives the notifications produced while handling touch input.
pub trait RangeEventSink {
    fn emit(&mut self, event: RangeEvent);
}

impl RangeEventSink for Vec<RangeEvent> {
    fn emit(&mut self, event: RangeEvent) {
        self.push(event);
    }
}

pub trait RangeValueListener {
    fn on_range_changed(
        &mut self,
        max_value: f32,
        min_value: f32,
        left_value: f32,
        right_value: f32,
    );
}

impl<F> RangeValueListener for F
where
    F: FnMut(f32, f32, f32, f32),
{
    fn on_range_changed(
        &mut self,
        max_value: f32,
        min_value: f32,
        left_value: f32,
        right_value: f32,
    ) {
        self(max_value, min_value, left_value, right_value)
    }
}

pub trait RangePositionListener {
    fn on_left_toggle_position_changed(&mut self, x: f32, value: f32);

    fn on_right_toggle_position_changed(&mut self, x: f32, value: f32);
}

pub trait RangeDraggingListener {
    fn on_dragging_state_changed(&mut self, state: DraggingState);
}

impl<F> RangeDraggingListener for F
where
    F: FnMut(DraggingState),
{
    fn on_dragging_state_changed(&mut self, state: DraggingState) {
        self(state)
    }
}

/// Optional listener registrations, one per notification kind.
#[derive(Default)]
pub struct Listeners {
    value: Option<Box<dyn RangeValueListener>>,
    position: Option<Box<dyn RangePositionListener>>,
    dragging: Option<Box<dyn RangeDraggingListener>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value_listener(&mut self, listener: impl RangeValueListener + 'static) {
        self.value = Some(Box::new(listener));
    }

    pub fn set_position_listener(&mut self, listener: impl RangePositionListener + 'static) {
        self.position = Some(Box::new(listener));
    }

    pub fn set_dragging_listener(&mut self, listener: impl RangeDraggingListener + 'static) {
        self.dragging = Some(Box::new(listener));
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("value", &self.value.is_some())
            .field("position", &self.position.is_some())
            .field("dragging", &self.dragging.is_some())
            .finish()
    }
}

impl RangeEventSink for Listeners {
    fn emit(&mut self, event: RangeEvent) {
        match event {
            RangeEvent::RangeChanged {
                max_value,
                min_value,
                left_value,
                right_value,
            } => {
                if let Some(listener) = self.value.as_mut() {
                    listener.on_range_changed(max_value, min_value, left_value, right_value);
                }
            }
            RangeEvent::LeftTogglePositionChanged { x, value } => {
                if let Some(listener) = self.position.as_mut() {
                    listener.on_left_toggle_position_changed(x, value);
                }
            }
            RangeEvent::RightTogglePositionChanged { x, value } => {
                if let Some(listener) = self.position.as_mut() {
                    listener.on_right_toggle_position_changed(x, value);
                }
            }
            RangeEvent::DraggingStateChanged(state) => {
                if let Some(listener) = self.dragging.as_mut() {
                    listener.on_dragging_state_changed(state);
                }
            }
        }
    }
}
