//! Core drawing primitives for `halo`.
//!
//! - [`color`]: RGBA color representation with hex/name parsing and interpolation
//! - [`geometry`]: 2D geometry primitives (Point, Size, Rect, EdgeInsets)
//! - [`error`]: Error types for the primitives
//!
//! # Examples
//!
//! ```
//! use halo_core::{Color, EdgeInsets, Rect, Size};
//!
//! let bounds = Rect::from_size(Size::square(40.0));
//! let inner = bounds.inset_by(EdgeInsets::uniform(4.0));
//! assert_eq!(inner.width, 32.0);
//!
//! let trail = Color::parse("#FF8000").unwrap();
//! let faded = Color::TRANSPARENT.lerp(trail, 0.5);
//! assert!(faded.a > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::float_cmp)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::uninlined_format_args)]

pub mod color;
pub mod error;
pub mod geometry;

// Re-export commonly used types at the crate root for convenience
pub use color::Color;
pub use error::ColorParseError;
pub use geometry::{EdgeInsets, Point, Rect, Size};
