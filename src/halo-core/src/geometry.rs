//! Geometry types for layer layout and path math.
//!
//! This module provides the floating-point primitives used by layers and
//! animation paths:
//! - [`Point`]: A 2D point
//! - [`Size`]: A 2D size
//! - [`Rect`]: A rectangle combining position and size
//! - [`EdgeInsets`]: Per-edge insets applied to a [`Rect`]
//!
//! # Coordinate System
//!
//! The coordinate system uses (0, 0) as the top-left corner, with x increasing
//! to the right and y increasing downward:
//!
//! ```text
//! (0,0) ──────► x
//!   │
//!   │
//!   ▼
//!   y
//! ```

use std::ops::{Add, Sub};

/// A 2D point with f32 coordinates.
///
/// # Examples
///
/// ```
/// use halo_core::geometry::Point;
///
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
/// assert_eq!(p1 + p2, Point::new(15.0, 25.0));
/// assert_eq!(p1 - p2, Point::new(5.0, 15.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// The x coordinate.
    pub x: f32,
    /// The y coordinate.
    pub y: f32,
}

impl Point {
    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new point at the given coordinates.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns true if both coordinates are within `epsilon` of `other`.
    #[inline]
    pub fn approx_eq(self, other: Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// The width.
    pub width: f32,
    /// The height.
    pub height: f32,
}

impl Size {
    /// A zero-sized area.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new size with the given dimensions.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Creates a square size with equal width and height.
    #[inline]
    pub const fn square(side: f32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// Returns whether either dimension is zero or negative.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Insets applied to each edge of a [`Rect`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    /// Inset from the top edge.
    pub top: f32,
    /// Inset from the left edge.
    pub left: f32,
    /// Inset from the bottom edge.
    pub bottom: f32,
    /// Inset from the right edge.
    pub right: f32,
}

impl EdgeInsets {
    /// Creates insets with individual values per edge.
    #[inline]
    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Creates insets with the same value on every edge.
    #[inline]
    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }
}

/// A rectangle defined by its top-left corner and a size.
///
/// # Examples
///
/// ```
/// use halo_core::geometry::{EdgeInsets, Point, Rect};
///
/// let rect = Rect::new(0.0, 0.0, 40.0, 40.0);
/// let inner = rect.inset_by(EdgeInsets::uniform(4.0));
/// assert_eq!(inner, Rect::new(4.0, 4.0, 32.0, 32.0));
/// assert_eq!(inner.center(), Point::new(20.0, 20.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// The x coordinate of the left edge.
    pub x: f32,
    /// The y coordinate of the top edge.
    pub y: f32,
    /// The width of the rectangle.
    pub width: f32,
    /// The height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle at the given position with the given size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Returns the size of the rectangle.
    #[inline]
    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the horizontal midpoint.
    #[inline]
    pub fn mid_x(self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Returns the vertical midpoint.
    #[inline]
    pub fn mid_y(self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Returns the center point.
    #[inline]
    pub fn center(self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    /// Returns the rectangle shrunk by the given insets.
    ///
    /// Width and height never go below zero.
    pub fn inset_by(self, insets: EdgeInsets) -> Self {
        Self {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: (self.width - insets.left - insets.right).max(0.0),
            height: (self.height - insets.top - insets.bottom).max(0.0),
        }
    }
}
