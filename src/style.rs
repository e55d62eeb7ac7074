use iced::Color;

use crate::drag::DEFAULT_TOUCH_SIZE_FACTOR;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeStyle {
    pub background_color: Color,
    pub stroke_color: Color,
    pub mask_color: Color,
    pub ripple_color: Color,
    pub stroke_width: f32,
    pub toggle_radius: f32,
    pub toggle_width: f32,
    pub horizontal_margin: f32,
    pub stroke_corner_radius: f32,
    pub background_corner_radius: f32,
    /// Multiplier applied to `toggle_width` to pad each toggle's touch area.
    pub touch_size_factor: f32,
}

impl Default for RangeStyle {
    fn default() -> Self {
        Self {
            background_color: Color::from_rgb(0.85, 0.87, 0.90),
            stroke_color: Color::from_rgb(1.0, 0.76, 0.03),
            mask_color: Color::from_rgba(0.0, 0.0, 0.0, 0.45),
            ripple_color: Color::from_rgba(1.0, 1.0, 1.0, 0.9),
            stroke_width: 4.0,
            toggle_radius: 6.0,
            toggle_width: 16.0,
            horizontal_margin: 16.0,
            stroke_corner_radius: 6.0,
            background_corner_radius: 6.0,
            touch_size_factor: DEFAULT_TOUCH_SIZE_FACTOR,
        }
    }
}

impl RangeStyle {
    pub fn stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width.max(0.0);
        self
    }

    pub fn toggle_width(mut self, width: f32) -> Self {
        self.toggle_width = width.max(0.0);
        self
    }

    pub fn horizontal_margin(mut self, margin: f32) -> Self {
        self.horizontal_margin = margin.max(0.0);
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        let radius = radius.max(0.0);
        self.stroke_corner_radius = radius;
        self.background_corner_radius = radius;
        self
    }
}
