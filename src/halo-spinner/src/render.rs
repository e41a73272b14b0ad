//! Terminal rendering of a spinner frame.

use halo_core::{Color, Point};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color as TermColor;
use ratatui::symbols::Marker;
use ratatui::widgets::Widget;
use ratatui::widgets::canvas::{Canvas, Context, Points};

use crate::host::{Layer, Shape};
use crate::timeline::Scene;

/// Braille dots per terminal cell, horizontally.
const DOTS_PER_CELL: f32 = 2.0;

/// Draws a [`Scene`] onto a braille canvas covering the widget area.
///
/// Arcs are stroked up to their `stroke_end`, discs are filled, and
/// transparent colors are skipped. Layers are painted in scene order, so
/// later (higher z) layers win where they overlap.
pub struct SpinnerCanvas<'a> {
    scene: &'a Scene,
}

impl<'a> SpinnerCanvas<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene }
    }
}

impl Widget for SpinnerCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || self.scene.size.is_empty() {
            return;
        }

        let width = self.scene.size.width;
        let height = self.scene.size.height;
        let step = (width / (f32::from(area.width) * DOTS_PER_CELL)).max(0.05);

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, f64::from(width)])
            .y_bounds([0.0, f64::from(height)])
            .paint(|ctx| {
                for layer in &self.scene.layers {
                    paint_layer(ctx, layer, height, step);
                }
            })
            .render(area, buf);
    }
}

fn paint_layer(ctx: &mut Context<'_>, layer: &Layer, height: f32, step: f32) {
    match layer.shape {
        Shape::Arc(path) => {
            if layer.stroke_color.is_transparent() || layer.stroke_end <= 0.0 {
                return;
            }
            // rings never reach past the center
            let half = (layer.line_width / 2.0).min(path.radius);
            let half = if half.is_finite() { half.max(0.0) } else { 0.0 };
            let samples = ((path.length() * layer.stroke_end) / step).ceil().max(1.0) as usize;
            let mut coords = Vec::new();
            let mut offset = -half;
            loop {
                let radius = path.radius + offset;
                for i in 0..=samples {
                    let angle = path.angle_at(layer.stroke_end * i as f32 / samples as f32);
                    let point = Point::new(
                        path.center.x + radius * angle.cos(),
                        path.center.y + radius * angle.sin(),
                    );
                    coords.push(to_canvas(point, height));
                }
                offset += step;
                if offset > half {
                    break;
                }
            }
            ctx.draw(&Points {
                coords: &coords,
                color: term_color(layer.stroke_color),
            });
        }
        Shape::Disc { radius } => {
            if layer.fill_color.is_transparent() || !radius.is_finite() || radius <= 0.0 {
                return;
            }
            let center = layer.position;
            let mut coords = Vec::new();
            let mut dy = -radius;
            while dy <= radius {
                let mut dx = -radius;
                while dx <= radius {
                    if dx * dx + dy * dy <= radius * radius {
                        coords.push(to_canvas(center + Point::new(dx, dy), height));
                    }
                    dx += step;
                }
                dy += step;
            }
            ctx.draw(&Points {
                coords: &coords,
                color: term_color(layer.fill_color),
            });
        }
    }
}

/// Scene y grows downwards, canvas y grows upwards.
fn to_canvas(point: Point, height: f32) -> (f64, f64) {
    (f64::from(point.x), f64::from(height - point.y))
}

fn term_color(color: Color) -> TermColor {
    let (r, g, b) = color.to_rgb_u8();
    TermColor::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use halo_core::Size;
    use std::time::Duration;

    use crate::animator::SpinnerAnimator;
    use crate::config::{Direction, SpinnerConfig};
    use crate::geometry::ArcPath;
    use crate::timeline::Timeline;

    fn drawn_cells(buf: &Buffer) -> usize {
        buf.content().iter().filter(|cell| cell.symbol() != " ").count()
    }

    fn render(scene: &Scene, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        SpinnerCanvas::new(scene).render(area, &mut buf);
        buf
    }

    #[test]
    fn test_render_empty_scene() {
        let scene = Scene {
            size: Size::square(40.0),
            layers: Vec::new(),
        };
        assert_eq!(drawn_cells(&render(&scene, 20, 10)), 0);
    }

    #[test]
    fn test_render_zero_area_no_panic() {
        let scene = Timeline::new(Size::square(40.0)).snapshot();
        let _ = render(&scene, 0, 0);
    }

    #[test]
    fn test_render_unbounded_sizes_terminate() {
        let path = ArcPath::full_circle(Point::new(20.0, 20.0), 16.0, Direction::Clockwise);
        let scene = Scene {
            size: Size::square(40.0),
            layers: vec![
                Layer::arc(path, Color::RED, f32::INFINITY),
                Layer::arc(path, Color::GREEN, f32::NAN),
                Layer::disc(f32::INFINITY, Color::BLUE, Point::new(20.0, 4.0)),
            ],
        };
        let buf = render(&scene, 20, 10);
        let blue = term_color(Color::BLUE);
        assert!(drawn_cells(&buf) > 0);
        assert!(buf.content().iter().all(|cell| cell.fg != blue));
    }

    #[test]
    fn test_render_dot_before_start() {
        let config = SpinnerConfig::default();
        let mut timeline = Timeline::new(Size::square(config.dimension));
        SpinnerAnimator::setup(config, &mut timeline).unwrap();

        // circle is transparent and trails are undrawn: only the dot shows
        let buf = render(&timeline.snapshot(), 20, 10);
        let expected = term_color(Color::DARK_GRAY);
        let cells: Vec<_> = buf
            .content()
            .iter()
            .filter(|cell| cell.symbol() != " ")
            .collect();
        assert!(!cells.is_empty());
        assert!(cells.iter().all(|cell| cell.fg == expected));
    }

    #[test]
    fn test_render_grows_with_trail() {
        let config = SpinnerConfig::default().show_spinner(false);
        let mut timeline = Timeline::new(Size::square(config.dimension));
        let mut spinner = SpinnerAnimator::setup(config, &mut timeline).unwrap();
        spinner.start_animating(&mut timeline);

        spinner.advance(&mut timeline, Duration::from_millis(200));
        let early = drawn_cells(&render(&timeline.snapshot(), 20, 10));
        spinner.advance(&mut timeline, Duration::from_millis(600));
        let late = drawn_cells(&render(&timeline.snapshot(), 20, 10));
        assert!(early > 0);
        assert!(late > early);
    }
}
