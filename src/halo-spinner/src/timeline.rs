//! Deterministic, headless [`AnimationHost`].
//!
//! The timeline keeps layers and their attached animations against a virtual
//! clock. Nothing moves on its own: the owner pulls events with
//! [`Timeline::next_event`], which advances the clock to the next completion
//! or deferred action, and samples frames with [`Timeline::presentation`] or
//! [`Timeline::snapshot`].

use std::time::Duration;

use halo_core::{Color, Size};
use tracing::debug;

use crate::animation::{Animation, AnimationKind, ColorProperty, FillMode};
use crate::host::{AnimationHost, AnimationKey, Deferred, HostEvent, Layer, LayerId, PropertyValue};

#[derive(Debug, Clone)]
struct Attached {
    key: AnimationKey,
    animation: Animation,
    begin: Duration,
    seq: u64,
    /// Model color at attach time, used when the animation has no origin.
    origin: Color,
    reported: bool,
}

impl Attached {
    fn due(&self) -> Option<Duration> {
        (self.animation.is_one_shot() && !self.reported).then(|| self.begin + self.animation.duration)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    model: Layer,
    animations: Vec<Attached>,
}

#[derive(Debug, Clone)]
struct Scheduled {
    due: Duration,
    seq: u64,
    action: Deferred,
}

/// Presented layers of one frame, back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub size: Size,
    pub layers: Vec<Layer>,
}

/// A virtual-clock animation host.
#[derive(Debug, Clone)]
pub struct Timeline {
    size: Size,
    now: Duration,
    seq: u64,
    layers: Vec<Entry>,
    scheduled: Vec<Scheduled>,
}

enum Due {
    Animation { layer: usize, index: usize },
    Deferred(usize),
}

impl Timeline {
    /// Creates an empty timeline for a frame of `size`, at time zero.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            now: Duration::ZERO,
            seq: 0,
            layers: Vec::new(),
            scheduled: Vec::new(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Model values of a layer.
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id.0).map(|entry| &entry.model)
    }

    /// Keys of the animations attached to a layer, in attach order.
    pub fn animation_keys(&self, id: LayerId) -> Vec<AnimationKey> {
        self.layers
            .get(id.0)
            .map(|entry| entry.animations.iter().map(|a| a.key).collect())
            .unwrap_or_default()
    }

    pub fn has_animation(&self, id: LayerId, key: AnimationKey) -> bool {
        self.layers
            .get(id.0)
            .is_some_and(|entry| entry.animations.iter().any(|a| a.key == key))
    }

    /// Number of deferred actions not yet delivered.
    pub fn pending_deferred(&self) -> usize {
        self.scheduled.len()
    }

    /// Whether any completion or deferred action is still to come.
    pub fn has_pending_work(&self) -> bool {
        !self.scheduled.is_empty()
            || self
                .layers
                .iter()
                .flat_map(|entry| &entry.animations)
                .any(|a| a.due().is_some())
    }

    /// Advances to the earliest due event no later than `until` and returns
    /// it. Without one, the clock moves to `until` and `None` is returned.
    ///
    /// Events due at the same instant come out in the order they were
    /// attached or scheduled.
    pub fn next_event(&mut self, until: Duration) -> Option<HostEvent> {
        let Some((due, which)) = self.earliest().filter(|(due, _)| *due <= until) else {
            self.now = self.now.max(until);
            return None;
        };
        self.now = self.now.max(due);

        match which {
            Due::Animation { layer, index } => {
                let entry = &mut self.layers[layer];
                let attached = &mut entry.animations[index];
                let key = attached.key;
                if attached.animation.fill == FillMode::Removed {
                    entry.animations.remove(index);
                } else {
                    attached.reported = true;
                }
                Some(HostEvent::AnimationFinished {
                    layer: LayerId(layer),
                    key,
                })
            }
            Due::Deferred(index) => Some(HostEvent::Deferred(self.scheduled.remove(index).action)),
        }
    }

    fn earliest(&self) -> Option<(Duration, Due)> {
        let animations = self.layers.iter().enumerate().flat_map(|(layer, entry)| {
            entry.animations.iter().enumerate().filter_map(move |(index, a)| {
                a.due().map(|due| ((due, a.seq), Due::Animation { layer, index }))
            })
        });
        let deferred = self
            .scheduled
            .iter()
            .enumerate()
            .map(|(index, s)| ((s.due, s.seq), Due::Deferred(index)));

        animations
            .chain(deferred)
            .min_by_key(|(order, _)| *order)
            .map(|((due, _), which)| (due, which))
    }

    /// Model values of a layer overlaid with its animations at the current time.
    pub fn presentation(&self, id: LayerId) -> Option<Layer> {
        let entry = self.layers.get(id.0)?;
        let mut layer = entry.model;
        for attached in &entry.animations {
            let t = attached
                .animation
                .progress(self.now.saturating_sub(attached.begin));
            match attached.animation.kind {
                AnimationKind::StrokeEnd { from, to } => {
                    layer.stroke_end = from + (to - from) * t;
                }
                AnimationKind::Color { property, from, to } => {
                    let color = from.unwrap_or(attached.origin).lerp(to, t);
                    layer.apply(PropertyValue::Color(property, color));
                }
                AnimationKind::FollowPath { path } => {
                    layer.position = path.point_at(t);
                }
            }
        }
        Some(layer)
    }

    /// Presented layers at the current time, ordered by z position. Layers
    /// with equal z keep their creation order.
    pub fn snapshot(&self) -> Scene {
        let mut layers: Vec<Layer> = (0..self.layers.len())
            .filter_map(|index| self.presentation(LayerId(index)))
            .collect();
        layers.sort_by(|a, b| a.z_position.total_cmp(&b.z_position));
        Scene {
            size: self.size,
            layers,
        }
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.seq;
        self.seq += 1;
        seq
    }

    fn entry_mut(&mut self, id: LayerId) -> Option<&mut Entry> {
        let entry = self.layers.get_mut(id.0);
        if entry.is_none() {
            debug!(layer = %id, "Unknown layer");
        }
        entry
    }
}

impl AnimationHost for Timeline {
    fn add_layer(&mut self, layer: Layer) -> LayerId {
        self.layers.push(Entry {
            model: layer,
            animations: Vec::new(),
        });
        LayerId(self.layers.len() - 1)
    }

    fn set_property(&mut self, layer: LayerId, value: PropertyValue) {
        if let Some(entry) = self.entry_mut(layer) {
            entry.model.apply(value);
        }
    }

    fn add_animation(&mut self, layer: LayerId, key: AnimationKey, animation: Animation) {
        let seq = self.next_seq();
        let begin = self.now;
        let Some(entry) = self.entry_mut(layer) else {
            return;
        };
        let origin = match animation.kind {
            AnimationKind::Color {
                property: ColorProperty::Stroke,
                ..
            } => entry.model.stroke_color,
            AnimationKind::Color {
                property: ColorProperty::Fill,
                ..
            } => entry.model.fill_color,
            _ => Color::TRANSPARENT,
        };
        entry.animations.retain(|a| a.key != key);
        entry.animations.push(Attached {
            key,
            animation,
            begin,
            seq,
            origin,
            reported: false,
        });
    }

    fn remove_animation(&mut self, layer: LayerId, key: AnimationKey) {
        if let Some(entry) = self.entry_mut(layer) {
            entry.animations.retain(|a| a.key != key);
        }
    }

    fn remove_all_animations(&mut self, layer: LayerId) {
        if let Some(entry) = self.entry_mut(layer) {
            entry.animations.clear();
        }
    }

    fn schedule(&mut self, delay: Duration, action: Deferred) {
        let seq = self.next_seq();
        self.scheduled.push(Scheduled {
            due: self.now + delay,
            seq,
            action,
        });
    }
}
