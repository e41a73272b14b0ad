//! Interface between the spinner and the rendering/animation host.
//!
//! The spinner never draws. It describes layers and animations, hands them to
//! an [`AnimationHost`], and reacts to the [`HostEvent`]s the host delivers
//! back: one-shot animations finishing and deferred actions coming due.
//!
//! ```text
//! ┌──────────────────┐  add_layer / add_animation / schedule  ┌────────────┐
//! │ SpinnerAnimator  │ ─────────────────────────────────────► │    Host    │
//! │ (state machine)  │ ◄───────────────────────────────────── │ (timeline) │
//! └──────────────────┘     handle_event(HostEvent)            └────────────┘
//! ```
//!
//! Events are handed to `SpinnerAnimator::handle_event`, which takes
//! `&mut self`; a host whose callbacks fire on several threads has to funnel
//! them through one owner before calling it.

use std::fmt;
use std::time::Duration;

use halo_core::{Color, Point};

use crate::animation::{Animation, ColorProperty};
use crate::geometry::ArcPath;

/// Handle to a layer owned by a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub usize);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// Name under which an animation is attached to a layer.
///
/// Attaching a second animation under the same key replaces the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationKey(pub &'static str);

impl fmt::Display for AnimationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Geometry drawn by a layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// An arc stroked from its start up to `stroke_end`.
    Arc(ArcPath),
    /// A filled circle centered on the layer's position.
    Disc { radius: f32 },
}

/// Model values of a shape layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub shape: Shape,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub line_width: f32,
    /// Fraction of the path that is stroked (0.0..=1.0).
    pub stroke_end: f32,
    /// Draw order; higher values are drawn above lower ones.
    pub z_position: f32,
    pub position: Point,
}

impl Layer {
    /// A stroked arc with transparent fill, fully drawn, at z = 0.
    pub fn arc(path: ArcPath, stroke_color: Color, line_width: f32) -> Self {
        Self {
            shape: Shape::Arc(path),
            fill_color: Color::TRANSPARENT,
            stroke_color,
            line_width,
            stroke_end: 1.0,
            z_position: 0.0,
            position: Point::ZERO,
        }
    }

    /// A filled disc with no stroke, at z = 0.
    pub fn disc(radius: f32, fill_color: Color, position: Point) -> Self {
        Self {
            shape: Shape::Disc { radius },
            fill_color,
            stroke_color: Color::TRANSPARENT,
            line_width: 0.0,
            stroke_end: 1.0,
            z_position: 0.0,
            position,
        }
    }

    pub fn with_stroke_end(mut self, stroke_end: f32) -> Self {
        self.stroke_end = stroke_end;
        self
    }

    pub fn with_z_position(mut self, z_position: f32) -> Self {
        self.z_position = z_position;
        self
    }

    /// Applies a property assignment to the model values.
    pub fn apply(&mut self, value: PropertyValue) {
        match value {
            PropertyValue::Color(ColorProperty::Stroke, color) => self.stroke_color = color,
            PropertyValue::Color(ColorProperty::Fill, color) => self.fill_color = color,
            PropertyValue::StrokeEnd(end) => self.stroke_end = end,
            PropertyValue::ZPosition(z) => self.z_position = z,
        }
    }
}

/// A typed assignment to one layer property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    Color(ColorProperty, Color),
    StrokeEnd(f32),
    ZPosition(f32),
}

/// Work the host performs on the component's behalf once a delay elapses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Deferred {
    /// Detach a transient color animation and persist its end color.
    CommitColor {
        layer: LayerId,
        property: ColorProperty,
        key: AnimationKey,
        color: Color,
    },
}

/// Notifications delivered from the host to the spinner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// A one-shot animation reached its end.
    AnimationFinished { layer: LayerId, key: AnimationKey },
    /// A deferred action came due.
    Deferred(Deferred),
}

/// Layer and animation primitives a rendering host provides.
pub trait AnimationHost {
    /// Creates a layer and returns its handle.
    fn add_layer(&mut self, layer: Layer) -> LayerId;

    /// Assigns a model value without animating.
    fn set_property(&mut self, layer: LayerId, value: PropertyValue);

    /// Attaches an animation, replacing any animation with the same key.
    fn add_animation(&mut self, layer: LayerId, key: AnimationKey, animation: Animation);

    /// Detaches the animation with the given key, if present.
    fn remove_animation(&mut self, layer: LayerId, key: AnimationKey);

    /// Detaches every animation from the layer.
    fn remove_all_animations(&mut self, layer: LayerId);

    /// Delivers `action` back as [`HostEvent::Deferred`] once `delay` elapses.
    fn schedule(&mut self, delay: Duration, action: Deferred);
}
