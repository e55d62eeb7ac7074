//! Painting of the range view.
//!
//! The background layer is the rounded track. The foreground layer is a mask
//! over the track with the selected range punched out (even-odd fill), the
//! range outline, both toggles and the grip lines on each toggle.

use iced::border;
use iced::widget::canvas::{self, Frame, Path, Stroke, fill};
use iced::{Point, Renderer, Size};

use crate::geometry::{Geometry, RectF};
use crate::style::RangeStyle;

const RIPPLE_LINE_WIDTH: f32 = 4.0;

pub fn left_toggle(geometry: &Geometry, style: &RangeStyle, height: f32) -> RectF {
    let left = geometry.range().left;
    RectF::new(left, 0.0, left + style.toggle_width, height)
}

pub fn right_toggle(geometry: &Geometry, style: &RangeStyle, height: f32) -> RectF {
    let right = geometry.range().right;
    RectF::new(right - style.toggle_width, 0.0, right, height)
}

/// Two short vertical lines centered on each toggle, spanning the middle third of the height.
pub fn ripple_lines(geometry: &Geometry, style: &RangeStyle, height: f32) -> [(Point, Point); 4] {
    let top = height / 3.0;
    let bottom = height * 2.0 / 3.0;
    let half = style.toggle_width / 2.0;
    let spread = style.toggle_width / 10.0;
    let range = geometry.range();

    [
        range.left + half - spread,
        range.left + half + spread,
        range.right - half - spread,
        range.right - half + spread,
    ]
    .map(|x| (Point::new(x, top), Point::new(x, bottom)))
}

pub fn draw_background(frame: &mut Frame<Renderer>, geometry: &Geometry, style: &RangeStyle) {
    let track = rounded(geometry.track(), style.background_corner_radius);
    frame.fill(&track, style.background_color);
}

pub fn draw_foreground(
    frame: &mut Frame<Renderer>,
    geometry: &Geometry,
    style: &RangeStyle,
    height: f32,
) {
    let track = geometry.track();
    let range = geometry.range();
    let mask = Path::new(|builder| {
        push_rounded(builder, track, style.background_corner_radius);
        if range.width() > 0.0 {
            push_rounded(builder, range, style.stroke_corner_radius);
        }
    });
    frame.fill(
        &mask,
        canvas::Fill {
            style: canvas::Style::Solid(style.mask_color),
            rule: fill::Rule::EvenOdd,
        },
    );

    frame.stroke(
        &rounded(geometry.stroke(), style.stroke_corner_radius),
        Stroke::default()
            .with_color(style.stroke_color)
            .with_width(style.stroke_width),
    );

    for toggle in [
        left_toggle(geometry, style, height),
        right_toggle(geometry, style, height),
    ] {
        frame.fill(&rounded(toggle, style.toggle_radius), style.stroke_color);
    }

    for (from, to) in ripple_lines(geometry, style, height) {
        frame.stroke(
            &Path::line(from, to),
            Stroke::default()
                .with_color(style.ripple_color)
                .with_width(RIPPLE_LINE_WIDTH),
        );
    }
}

fn rounded(rect: RectF, radius: f32) -> Path {
    Path::new(|builder| push_rounded(builder, rect, radius))
}

// Rectangles may come in with crossed edges, so normalize before building the path.
fn push_rounded(builder: &mut canvas::path::Builder, rect: RectF, radius: f32) {
    let left = rect.left.min(rect.right);
    let top = rect.top.min(rect.bottom);
    let width = (rect.right - rect.left).abs();
    let height = (rect.bottom - rect.top).abs();
    let radius = radius.min(width / 2.0).min(height / 2.0).max(0.0);

    builder.rounded_rectangle(
        Point::new(left, top),
        Size::new(width, height),
        border::Radius::from(radius),
    );
}
