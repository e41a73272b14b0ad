//! Circular path and padding derived from a [`SpinnerConfig`].

use std::f32::consts::TAU;

use halo_core::{EdgeInsets, Point, Rect, Size};

use crate::config::{Direction, SpinnerConfig};

/// Angle at which every path starts: straight up.
pub const START_ANGLE_DEGREES: f32 = -90.0;

/// End angle of a clockwise path.
pub const CLOCKWISE_END_DEGREES: f32 = 270.0;

/// End angle of a counter-clockwise path.
pub const COUNTER_CLOCKWISE_END_DEGREES: f32 = -450.0;

/// A circular arc described the way toolkit arc primitives take it:
/// center, radius, start/end angle (radians) and a sweep direction.
///
/// Angles grow clockwise on screen because the y axis points down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub center: Point,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub direction: Direction,
}

impl ArcPath {
    /// Builds the full-circle path used by the spinner.
    pub fn full_circle(center: Point, radius: f32, direction: Direction) -> Self {
        let end = match direction {
            Direction::Clockwise => CLOCKWISE_END_DEGREES,
            Direction::CounterClockwise => COUNTER_CLOCKWISE_END_DEGREES,
        };
        Self {
            center,
            radius,
            start_angle: START_ANGLE_DEGREES.to_radians(),
            end_angle: end.to_radians(),
            direction,
        }
    }

    /// Signed sweep in radians (positive is clockwise).
    #[inline]
    pub fn sweep(&self) -> f32 {
        self.end_angle - self.start_angle
    }

    /// Absolute swept angle in degrees.
    pub fn swept_degrees(&self) -> f32 {
        self.sweep().abs().to_degrees()
    }

    /// Arc length of the whole path.
    pub fn length(&self) -> f32 {
        self.sweep().abs() * self.radius
    }

    /// Angle reached after traversing `fraction` of the path.
    #[inline]
    pub fn angle_at(&self, fraction: f32) -> f32 {
        self.start_angle + self.sweep() * fraction
    }

    /// Point reached after traversing `fraction` (0.0..=1.0) of the path.
    ///
    /// On a circle equal fractions cover equal distances, so this is the
    /// paced position of anything following the path.
    pub fn point_at(&self, fraction: f32) -> Point {
        let angle = self.angle_at(fraction);
        Point::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    /// Point where the path starts.
    pub fn start_point(&self) -> Point {
        self.point_at(0.0)
    }

    /// Whether the path covers exactly one revolution.
    pub fn is_full_revolution(&self) -> bool {
        (self.sweep().abs() - TAU).abs() < 1e-4
    }
}

/// Geometry computed once during setup and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryState {
    /// Frame of the spinner, `dimension × dimension` at the origin.
    pub bounds: Rect,
    /// Inset of the circle from the frame; also the dot's radius.
    pub padding: f32,
    /// Circle the trails are stroked along and the dot follows.
    pub path: ArcPath,
}

impl GeometryState {
    /// Derives padding and the circular path from the configuration.
    pub fn derive(config: &SpinnerConfig) -> Self {
        let bounds = Rect::from_size(Size::square(config.dimension));
        let padding = config.dimension / 10.0;
        let inset = bounds.inset_by(EdgeInsets::uniform(padding));
        let path = ArcPath::full_circle(inset.center(), inset.width / 2.0, config.direction);
        Self {
            bounds,
            padding,
            path,
        }
    }

    /// Radius of the dot.
    #[inline]
    pub fn dot_radius(&self) -> f32 {
        self.padding
    }

    /// Whether a stroke of `thickness` leaves room for the dot.
    #[inline]
    pub fn fits_dot(&self, thickness: f32) -> bool {
        thickness < 2.0 * self.padding
    }
}
