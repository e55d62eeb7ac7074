//! Pixel/value mapping and the rectangles the range view is laid out with.
//!
//! The domain scale is zero based: `max_value` is the divisor for every
//! mapping, while `min_value` only takes part in the bound check of
//! [`Geometry::value_to_x`]. Callers are expected to keep
//! `min_value < max_value`; a degenerate domain yields non-finite values
//! rather than an error.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn inset_vertical(&self, amount: f32) -> Self {
        Self {
            top: self.top + amount,
            bottom: self.bottom - amount,
            ..*self
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    min_value: f32,
    max_value: f32,
    current_left_value: Option<f32>,
    current_right_value: Option<f32>,
    horizontal_margin: f32,
    stroke_width: f32,
    track: RectF,
    range: RectF,
    stroke: RectF,
    revision: u64,
}

impl Geometry {
    pub fn new(min_value: f32, max_value: f32, horizontal_margin: f32, stroke_width: f32) -> Self {
        Self {
            min_value,
            max_value,
            current_left_value: None,
            current_right_value: None,
            horizontal_margin,
            stroke_width,
            track: RectF::default(),
            range: RectF::default(),
            stroke: RectF::default(),
            revision: 0,
        }
    }

    pub fn min_value(&self) -> f32 {
        self.min_value
    }

    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    pub fn track(&self) -> RectF {
        self.track
    }

    pub fn range(&self) -> RectF {
        self.range
    }

    pub fn stroke(&self) -> RectF {
        self.stroke
    }

    /// Bumped on every mutation; a changed revision means the view needs a repaint.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The selected `(left, right)` values, or `None` while the whole range is selected.
    pub fn current_values(&self) -> Option<(f32, f32)> {
        self.current_left_value.zip(self.current_right_value)
    }

    pub fn set_min_value(&mut self, min_value: f32) {
        self.min_value = min_value;
        self.touch();
    }

    pub fn set_max_value(&mut self, max_value: f32) {
        self.max_value = max_value;
        self.touch();
    }

    pub fn set_current_values(&mut self, left: f32, right: f32) {
        self.current_left_value = Some(left);
        self.current_right_value = Some(right);
        self.touch();
    }

    /// Takes effect on the next [`Geometry::recompute_layout`].
    pub fn set_metrics(&mut self, horizontal_margin: f32, stroke_width: f32) {
        self.horizontal_margin = horizontal_margin;
        self.stroke_width = stroke_width;
        self.touch();
    }

    pub fn recompute_layout(&mut self, width: f32, height: f32) {
        self.track = RectF::new(
            self.horizontal_margin,
            0.0,
            width - self.horizontal_margin,
            height,
        );

        self.range = match self.current_values() {
            None => self.track,
            Some((left, right)) => {
                let track_width = self.track.width();
                RectF::new(
                    track_width * left / self.max_value + self.horizontal_margin,
                    self.track.top,
                    track_width * right / self.max_value + self.horizontal_margin,
                    self.track.bottom,
                )
            }
        };

        self.update_stroke();
    }

    /// Out-of-domain values map to `0` instead of being clamped.
    pub fn value_to_x(&self, value: f32) -> f32 {
        if value < self.min_value || value > self.max_value {
            return 0.0;
        }
        self.track.width() * value / self.max_value + self.horizontal_margin
    }

    pub fn x_to_left_value(&self) -> f32 {
        self.edge_to_value(self.range.left)
    }

    pub fn x_to_right_value(&self) -> f32 {
        self.edge_to_value(self.range.right)
    }

    pub fn set_left_edge(&mut self, x: f32) {
        self.range.left = x;
        self.update_stroke();
    }

    pub fn set_right_edge(&mut self, x: f32) {
        self.range.right = x;
        self.update_stroke();
    }

    fn edge_to_value(&self, edge_x: f32) -> f32 {
        self.max_value * (edge_x - self.track.left) / self.track.width()
    }

    fn update_stroke(&mut self) {
        self.stroke = self.range.inset_vertical(self.stroke_width / 2.0);
        self.touch();
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
