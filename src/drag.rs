//! Touch handling for the two toggles.
//!
//! A gesture starts on [`TouchPhase::Down`], where the touch is hit tested
//! against both toggles. When the touch lands on both at once the machine
//! waits in [`DragState::Conflict`] until the finger has travelled
//! [`SLOP_DIFF`] pixels and then commits to the toggle in the direction of
//! travel for the rest of the gesture.

use crate::events::{RangeEvent, RangeEventSink};
use crate::geometry::Geometry;

/// Distance a conflicting touch has to travel before a direction is picked.
pub const SLOP_DIFF: f32 = 20.0;

pub const DEFAULT_TOUCH_SIZE_FACTOR: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub phase: TouchPhase,
    pub x: f32,
    pub y: f32,
}

impl Touch {
    pub fn down(x: f32, y: f32) -> Self {
        Self {
            phase: TouchPhase::Down,
            x,
            y,
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            phase: TouchPhase::Move,
            x,
            y,
        }
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self {
            phase: TouchPhase::Up,
            x,
            y,
        }
    }
}

/// State reported to dragging listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraggingState {
    Idle,
    DraggingLeft,
    DraggingRight,
    DraggingConflict,
    DragEnd,
}

impl std::fmt::Display for DraggingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraggingState::Idle => write!(f, "Idle"),
            DraggingState::DraggingLeft => write!(f, "Dragging left"),
            DraggingState::DraggingRight => write!(f, "Dragging right"),
            DraggingState::DraggingConflict => write!(f, "Dragging (undecided)"),
            DraggingState::DragEnd => write!(f, "Drag end"),
        }
    }
}

/// Each dragging variant keeps the x coordinate of the touch that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Left {
        motion_x: f32,
    },
    Right {
        motion_x: f32,
    },
    Conflict {
        motion_x: f32,
    },
}

impl DragState {
    pub fn dragging_state(&self) -> DraggingState {
        match self {
            DragState::Idle => DraggingState::Idle,
            DragState::Left { .. } => DraggingState::DraggingLeft,
            DragState::Right { .. } => DraggingState::DraggingRight,
            DragState::Conflict { .. } => DraggingState::DraggingConflict,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragStateMachine {
    state: DragState,
    toggle_width: f32,
    touch_size_factor: f32,
}

impl DragStateMachine {
    pub fn new(toggle_width: f32, touch_size_factor: f32) -> Self {
        Self {
            state: DragState::Idle,
            toggle_width,
            touch_size_factor,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn set_toggle_metrics(&mut self, toggle_width: f32, touch_size_factor: f32) {
        self.toggle_width = toggle_width;
        self.touch_size_factor = touch_size_factor;
    }

    pub fn is_touch_on_left_toggle(&self, geometry: &Geometry, x: f32) -> bool {
        let left = geometry.range().left;
        let padding = self.toggle_width * self.touch_size_factor;
        x > left - padding && x < left + self.toggle_width + padding
    }

    pub fn is_touch_on_right_toggle(&self, geometry: &Geometry, x: f32) -> bool {
        let right = geometry.range().right;
        let padding = self.toggle_width * self.touch_size_factor;
        x > right - self.toggle_width - padding && x < right + padding
    }

    /// Feeds one touch event through the machine. Always reports the event as consumed.
    pub fn on_touch(
        &mut self,
        geometry: &mut Geometry,
        touch: Touch,
        sink: &mut impl RangeEventSink,
    ) -> bool {
        let x = touch.x;
        match touch.phase {
            TouchPhase::Down => {
                let on_left = self.is_touch_on_left_toggle(geometry, x);
                let on_right = self.is_touch_on_right_toggle(geometry, x);
                self.state = match (on_left, on_right) {
                    (true, true) => DragState::Conflict { motion_x: x },
                    (true, false) => DragState::Left { motion_x: x },
                    (false, true) => DragState::Right { motion_x: x },
                    (false, false) => DragState::Idle,
                };
                tracing::debug!(x, state = ?self.state, "touch down");
            }
            TouchPhase::Move => match self.state {
                DragState::Conflict { motion_x } => {
                    if (motion_x - x).abs() < SLOP_DIFF {
                        return true;
                    }

                    let direction = if x > motion_x {
                        Direction::Right
                    } else {
                        Direction::Left
                    };
                    tracing::debug!(motion_x, x, ?direction, "resolved overlapping toggles");
                    self.state = match direction {
                        Direction::Left => {
                            drag_left_toggle(geometry, x, sink);
                            DragState::Left { motion_x: x }
                        }
                        Direction::Right => {
                            drag_right_toggle(geometry, x, sink);
                            DragState::Right { motion_x: x }
                        }
                    };
                }
                DragState::Left { .. } => {
                    if is_left_toggle_exceed(geometry, x) {
                        return true;
                    }
                    drag_left_toggle(geometry, x, sink);
                }
                DragState::Right { .. } => {
                    if is_right_toggle_exceed(geometry, x) {
                        return true;
                    }
                    drag_right_toggle(geometry, x, sink);
                }
                DragState::Idle => {}
            },
            TouchPhase::Up => {
                sink.emit(RangeEvent::DraggingStateChanged(DraggingState::DragEnd));
                self.state = DragState::Idle;
                tracing::debug!(x, "touch up");
            }
        }

        sink.emit(RangeEvent::DraggingStateChanged(self.state.dragging_state()));
        true
    }
}

fn is_left_toggle_exceed(geometry: &Geometry, x: f32) -> bool {
    x < geometry.track().left || x > geometry.range().right
}

fn is_right_toggle_exceed(geometry: &Geometry, x: f32) -> bool {
    x < geometry.range().left || x > geometry.track().right
}

fn drag_left_toggle(geometry: &mut Geometry, x: f32, sink: &mut impl RangeEventSink) {
    geometry.set_left_edge(x);
    sink.emit(RangeEvent::LeftTogglePositionChanged {
        x: geometry.range().left,
        value: geometry.x_to_left_value(),
    });
    notify_range_changed(geometry, sink);
}

fn drag_right_toggle(geometry: &mut Geometry, x: f32, sink: &mut impl RangeEventSink) {
    geometry.set_right_edge(x);
    sink.emit(RangeEvent::RightTogglePositionChanged {
        x: geometry.range().right,
        value: geometry.x_to_right_value(),
    });
    notify_range_changed(geometry, sink);
}

// Edges may not cross while dragging, but the reported pair is ordered anyway.
fn notify_range_changed(geometry: &mut Geometry, sink: &mut impl RangeEventSink) {
    let first = geometry.x_to_left_value();
    let second = geometry.x_to_right_value();
    let left_value = first.min(second);
    let right_value = first.max(second);

    geometry.set_current_values(left_value, right_value);
    tracing::trace!(left_value, right_value, "range changed");

    sink.emit(RangeEvent::RangeChanged {
        max_value: geometry.max_value(),
        min_value: geometry.min_value(),
        left_value,
        right_value,
    });
}
