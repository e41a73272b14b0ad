//! Short color transitions that end in a persisted model value.

use std::time::Duration;

use halo_core::Color;

use super::{Animation, ColorProperty};
use crate::host::{AnimationHost, AnimationKey, Deferred, LayerId, PropertyValue};

/// A color blend on one layer property.
///
/// Starting it attaches a transient animation that holds its end value, and
/// schedules a commit after exactly `duration`. The commit detaches the
/// animation and writes `to` into the model, so the frame after the commit
/// matches the last animated frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossFade {
    pub layer: LayerId,
    pub property: ColorProperty,
    pub key: AnimationKey,
    pub to: Color,
    pub duration: Duration,
}

impl CrossFade {
    pub fn new(
        layer: LayerId,
        property: ColorProperty,
        key: AnimationKey,
        to: Color,
        duration: Duration,
    ) -> Self {
        Self {
            layer,
            property,
            key,
            to,
            duration,
        }
    }

    /// Attaches the transient animation and schedules its commit.
    pub fn start<H: AnimationHost + ?Sized>(&self, host: &mut H) {
        let animation = Animation::color(self.property, self.to, self.duration).hold_end();
        host.add_animation(self.layer, self.key, animation);
        host.schedule(self.duration, self.commit_action());
    }

    /// The deferred action that finishes this fade.
    pub fn commit_action(&self) -> Deferred {
        Deferred::CommitColor {
            layer: self.layer,
            property: self.property,
            key: self.key,
            color: self.to,
        }
    }

    /// Performs a due commit: detaches the transient animation and persists
    /// the target color.
    pub fn commit<H: AnimationHost + ?Sized>(host: &mut H, action: &Deferred) {
        let Deferred::CommitColor {
            layer,
            property,
            key,
            color,
        } = *action;
        host.remove_animation(layer, key);
        host.set_property(layer, PropertyValue::Color(property, color));
    }
}
