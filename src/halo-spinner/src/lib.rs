//! # Halo Spinner
//!
//! An animated loading indicator: a base circle, two alternating colored
//! trails that sweep around it, and a dot that follows the sweep.
//!
//! ## Components
//!
//! - **Config**: [`SpinnerConfig`] with defaults, a builder and TOML loading.
//! - **Geometry**: padding and the circular [`ArcPath`] derived from the
//!   dimension and direction.
//! - **Animator**: [`SpinnerAnimator`], the trail cycle state machine.
//! - **Host**: the [`AnimationHost`] interface the animator drives, and the
//!   headless [`Timeline`] implementation of it.
//! - **Render**: [`SpinnerCanvas`], a ratatui widget drawing a timeline frame.
//!
//! ## Cycle
//!
//! ```text
//!   Idle ──start_animating──► Running(A) ──trail done──► Running(B)
//!                                  ▲                         │
//!                                  └────────trail done───────┘
//! ```
//!
//! Every completion freezes the finished trail at full length, advances the
//! trail color, raises the other slot to the front and restarts its sweep.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//!
//! use halo_core::{Color, Size};
//! use halo_spinner::{SpinnerAnimator, SpinnerConfig, Timeline};
//!
//! let config = SpinnerConfig::new(120.0).with_trail_colors([Color::RED, Color::BLUE]);
//! let mut timeline = Timeline::new(Size::square(config.dimension));
//! let mut spinner = SpinnerAnimator::setup(config, &mut timeline).unwrap();
//! spinner.start_animating(&mut timeline);
//!
//! spinner.advance(&mut timeline, Duration::from_secs(1));
//! assert_eq!(spinner.current_color(), Some(Color::BLUE));
//! ```

pub mod animation;
pub mod animator;
pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod render;
pub mod timeline;

pub use animation::{Animation, AnimationKind, ColorProperty, CrossFade, FillMode, Repeat};
pub use animation::{CycleTransition, SlotId, TrailCycleState, TrailSlot, ZOrder};
pub use animator::{CyclePhase, SpinnerAnimator, SpinnerLayers};
pub use config::{Direction, SpinnerConfig};
pub use error::{Result, SpinnerError};
pub use geometry::{ArcPath, GeometryState};
pub use host::{AnimationHost, AnimationKey, Deferred, HostEvent, Layer, LayerId, PropertyValue, Shape};
pub use render::SpinnerCanvas;
pub use timeline::{Scene, Timeline};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
