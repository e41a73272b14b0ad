//! Animation descriptors and the trail color cycle.
//!
//! Descriptors are plain values: the spinner builds them once during setup
//! and hands copies to the host every time a cycle starts. Timing is linear
//! except for path following, which is paced (constant speed along the arc).

mod cross_fade;
mod cycle;

use std::time::Duration;

use halo_core::Color;

use crate::geometry::ArcPath;

pub use cross_fade::CrossFade;
pub use cycle::{CycleTransition, SlotId, TrailCycleState, TrailSlot, ZOrder};

/// Color-valued layer properties that can be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorProperty {
    Stroke,
    Fill,
}

/// How often an animation plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    /// Plays once and then reports completion.
    #[default]
    Once,
    /// Loops until removed; never reports completion.
    Forever,
}

/// What a finished one-shot animation leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    /// Detached on completion; the model value shows again.
    #[default]
    Removed,
    /// Stays attached and keeps presenting its end value until removed.
    HoldEnd,
}

/// The property an animation drives and the values it moves between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationKind {
    /// Moves the stroked fraction of a path.
    StrokeEnd { from: f32, to: f32 },
    /// Blends a color property. `from: None` starts at the current model value.
    Color {
        property: ColorProperty,
        from: Option<Color>,
        to: Color,
    },
    /// Moves the layer's position along a path at constant speed.
    FollowPath { path: ArcPath },
}

/// A complete animation description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub kind: AnimationKind,
    pub duration: Duration,
    pub repeat: Repeat,
    pub fill: FillMode,
}

impl Animation {
    /// Stroke progress from `from` to `to`, played once.
    pub fn stroke_end(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            kind: AnimationKind::StrokeEnd { from, to },
            duration,
            repeat: Repeat::Once,
            fill: FillMode::Removed,
        }
    }

    /// Color blend toward `to`, starting from the current model value.
    pub fn color(property: ColorProperty, to: Color, duration: Duration) -> Self {
        Self {
            kind: AnimationKind::Color {
                property,
                from: None,
                to,
            },
            duration,
            repeat: Repeat::Once,
            fill: FillMode::Removed,
        }
    }

    /// Paced movement along `path`, played once.
    pub fn follow_path(path: ArcPath, duration: Duration) -> Self {
        Self {
            kind: AnimationKind::FollowPath { path },
            duration,
            repeat: Repeat::Once,
            fill: FillMode::Removed,
        }
    }

    /// Loop until removed.
    pub fn repeat_forever(mut self) -> Self {
        self.repeat = Repeat::Forever;
        self
    }

    /// Keep presenting the end value after finishing.
    pub fn hold_end(mut self) -> Self {
        self.fill = FillMode::HoldEnd;
        self
    }

    /// Whether the host reports completion for this animation.
    pub fn is_one_shot(&self) -> bool {
        self.repeat == Repeat::Once
    }

    /// Fraction of the animation reached after `elapsed`.
    ///
    /// One-shot animations clamp at 1.0; looping ones wrap around.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let raw = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        match self.repeat {
            Repeat::Once => raw.min(1.0) as f32,
            Repeat::Forever => raw.fract() as f32,
        }
    }
}
