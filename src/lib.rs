//! A two-toggle range selection view.
//!
//! [`RangeView`] holds the layout and touch handling and can be driven by any
//! toolkit; [`widget::range_view`] wraps it as an iced canvas widget.

pub mod config;
pub mod drag;
pub mod events;
pub mod geometry;
pub mod range_view;
pub mod render;
pub mod style;
pub mod widget;

pub use drag::{DragState, DragStateMachine, DraggingState, Touch, TouchPhase};
pub use events::{
    Listeners, RangeDraggingListener, RangeEvent, RangeEventSink, RangePositionListener,
    RangeValueListener,
};
pub use geometry::{Geometry, RectF};
pub use range_view::RangeView;
pub use style::RangeStyle;
pub use widget::{RangeViewWidget, range_view};
