//! The spinner component: layer setup and the alternating trail cycle.
//!
//! A [`SpinnerAnimator`] owns every piece of mutable spinner state. It is
//! created by [`SpinnerAnimator::setup`], started with
//! [`SpinnerAnimator::start_animating`], and from then on only changes inside
//! [`SpinnerAnimator::handle_event`]. Each time the active trail finishes it
//! freezes that trail at full length, advances the color, swaps the two trail
//! slots and restarts the sweep on the other slot.

use std::time::Duration;

use halo_core::Color;
use tracing::{debug, trace};

use crate::animation::{Animation, ColorProperty, CrossFade, SlotId, TrailCycleState};
use crate::config::SpinnerConfig;
use crate::error::Result;
use crate::geometry::GeometryState;
use crate::host::{AnimationHost, AnimationKey, Deferred, HostEvent, Layer, LayerId, PropertyValue};
use crate::timeline::Timeline;

/// Keys of the per-slot stroke animations.
pub const TRAIL_KEYS: [AnimationKey; 2] = [
    AnimationKey("trail.a.stroke_end"),
    AnimationKey("trail.b.stroke_end"),
];

/// Keys of the per-slot stroke color cross-fades.
pub const TRAIL_COLOR_KEYS: [AnimationKey; 2] = [
    AnimationKey("trail.a.stroke_color"),
    AnimationKey("trail.b.stroke_color"),
];

/// Key of the dot's rotation around the circle.
pub const DOT_ROTATION_KEY: AnimationKey = AnimationKey("dot.rotation");

/// Key of the dot's fill color cross-fade.
pub const DOT_COLOR_KEY: AnimationKey = AnimationKey("dot.fill_color");

/// Z position of the dot, above both trails.
pub const DOT_Z_POSITION: f32 = 2.0;

/// Where the trail cycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    /// Set up but not started.
    Idle,
    /// Animating the given slot.
    Running(SlotId),
}

/// Host handles of the layers created during setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinnerLayers {
    /// The base circle, always present.
    pub circle: LayerId,
    /// Trail layers indexed by [`SlotId::index`], present when trails are shown.
    pub trails: Option<[LayerId; 2]>,
    /// The dot, present when the spinner is shown.
    pub dot: Option<LayerId>,
}

impl SpinnerLayers {
    /// Trail layer of `slot`.
    pub fn trail(&self, slot: SlotId) -> Option<LayerId> {
        self.trails.map(|layers| layers[slot.index()])
    }

    fn slot_of(&self, layer: LayerId) -> Option<SlotId> {
        SlotId::ALL
            .into_iter()
            .find(|slot| self.trail(*slot) == Some(layer))
    }
}

/// The loading indicator's state machine.
#[derive(Debug, Clone)]
pub struct SpinnerAnimator {
    config: SpinnerConfig,
    geometry: GeometryState,
    layers: SpinnerLayers,
    cycle: TrailCycleState,
    dot_color: Color,
    rotation: Animation,
    trail: Animation,
    started: bool,
}

impl SpinnerAnimator {
    /// Validates `config`, derives the geometry and creates the spinner's
    /// layers on `host`. Nothing animates until [`start_animating`].
    ///
    /// The stored configuration is the effective one: `show_spinner` is
    /// cleared when the stroke is too thick for the dot, and `spinner_color`
    /// follows the first trail color when the dot tracks the trails.
    ///
    /// [`start_animating`]: Self::start_animating
    pub fn setup<H: AnimationHost + ?Sized>(mut config: SpinnerConfig, host: &mut H) -> Result<Self> {
        config.validate()?;
        let geometry = GeometryState::derive(&config);
        let path = geometry.path;

        if config.show_spinner && !geometry.fits_dot(config.thickness) {
            debug!(
                thickness = config.thickness,
                padding = geometry.padding,
                "Stroke too thick for the dot; spinner disabled"
            );
            config.show_spinner = false;
        }

        let first_color = config.trail_colors.first().copied();
        if config.update_spinner_color && config.show_trail_colors {
            if let Some(color) = first_color {
                config.spinner_color = color;
            }
        }

        let circle = host.add_layer(Layer::arc(path, config.circle_color, config.thickness));

        let cycle = TrailCycleState::new(first_color.unwrap_or(Color::TRANSPARENT));
        let trails = config.show_trail_colors.then(|| {
            SlotId::ALL.map(|slot| {
                let record = cycle.slot(slot);
                host.add_layer(
                    Layer::arc(path, record.color, config.thickness)
                        .with_stroke_end(record.progress)
                        .with_z_position(record.z_order.z_position()),
                )
            })
        });

        let dot = config.show_spinner.then(|| {
            host.add_layer(
                Layer::disc(geometry.dot_radius(), config.spinner_color, path.start_point())
                    .with_z_position(DOT_Z_POSITION),
            )
        });

        debug!(
            dimension = config.dimension,
            padding = geometry.padding,
            radius = path.radius,
            direction = ?config.direction,
            trails = trails.is_some(),
            dot = dot.is_some(),
            "Spinner set up"
        );

        Ok(Self {
            rotation: Animation::follow_path(path, config.duration).repeat_forever(),
            trail: Animation::stroke_end(0.0, 1.0, config.duration).hold_end(),
            dot_color: config.spinner_color,
            config,
            geometry,
            layers: SpinnerLayers { circle, trails, dot },
            cycle,
            started: false,
        })
    }

    /// Effective configuration after setup adjustments.
    pub fn config(&self) -> &SpinnerConfig {
        &self.config
    }

    /// Padding, radius and arc path derived during setup.
    pub fn geometry(&self) -> &GeometryState {
        &self.geometry
    }

    /// Ids of the layers this spinner added to its host.
    pub fn layers(&self) -> &SpinnerLayers {
        &self.layers
    }

    /// Color index, active slot and slot records.
    pub fn cycle(&self) -> &TrailCycleState {
        &self.cycle
    }

    /// `Idle` until started, then the slot currently sweeping.
    pub fn phase(&self) -> CyclePhase {
        if self.started {
            CyclePhase::Running(self.cycle.active_slot())
        } else {
            CyclePhase::Idle
        }
    }

    /// Trail color at the current color index, if trails are shown.
    pub fn current_color(&self) -> Option<Color> {
        if !self.config.show_trail_colors {
            return None;
        }
        self.config.trail_colors.get(self.cycle.color_index()).copied()
    }

    /// Persisted fill color of the dot, if the dot exists.
    pub fn dot_color(&self) -> Option<Color> {
        self.layers.dot.map(|_| self.dot_color)
    }

    /// Begins (or restarts) the dot rotation and the active slot's sweep.
    pub fn start_animating<H: AnimationHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(dot) = self.layers.dot {
            host.add_animation(dot, DOT_ROTATION_KEY, self.rotation);
        }
        let active = self.cycle.active_slot();
        if let Some(layer) = self.layers.trail(active) {
            host.add_animation(layer, TRAIL_KEYS[active.index()], self.trail);
        }
        self.started = true;
    }

    /// Reacts to a notification from the host.
    ///
    /// Returns `false` when the event does not belong to this spinner or is
    /// stale (a completion from the slot that is not active).
    pub fn handle_event<H: AnimationHost + ?Sized>(&mut self, host: &mut H, event: HostEvent) -> bool {
        match event {
            HostEvent::AnimationFinished { layer, key } => self.on_animation_finished(host, layer, key),
            HostEvent::Deferred(action) => self.on_deferred(host, action),
        }
    }

    /// Runs `timeline` forward by `elapsed`, handling every event that comes
    /// due on the way. Returns the number of events delivered.
    pub fn advance(&mut self, timeline: &mut Timeline, elapsed: Duration) -> usize {
        let until = timeline.now() + elapsed;
        let mut delivered = 0;
        while let Some(event) = timeline.next_event(until) {
            self.handle_event(timeline, event);
            delivered += 1;
        }
        delivered
    }

    fn trail_color(&self, index: usize) -> Color {
        self.config
            .trail_colors
            .get(index)
            .copied()
            .unwrap_or(Color::TRANSPARENT)
    }

    fn on_animation_finished<H: AnimationHost + ?Sized>(
        &mut self,
        host: &mut H,
        layer: LayerId,
        key: AnimationKey,
    ) -> bool {
        let active = self.cycle.active_slot();
        let Some(finished_layer) = self.layers.trail(active) else {
            debug!(%layer, %key, "Ignoring completion: trails are not shown");
            return false;
        };
        if !self.started || layer != finished_layer || key != TRAIL_KEYS[active.index()] {
            debug!(%layer, %key, active = ?active, "Ignoring stale completion");
            return false;
        }

        // Freeze the finished trail fully drawn in the color it swept with.
        let current = self.trail_color(self.cycle.color_index());
        host.remove_all_animations(finished_layer);
        host.set_property(finished_layer, PropertyValue::Color(ColorProperty::Stroke, current));
        host.set_property(finished_layer, PropertyValue::StrokeEnd(1.0));
        let record = self.cycle.slot_mut(active);
        record.color = current;
        record.progress = 1.0;

        if let Some(dot) = self.layers.dot {
            host.remove_animation(dot, DOT_ROTATION_KEY);
        }

        let transition = self.cycle.advance(self.config.trail_colors.len());
        let next_layer = self.layers.trail(transition.next);
        for slot in [transition.next, transition.finished] {
            if let Some(trail) = self.layers.trail(slot) {
                let z = self.cycle.slot(slot).z_order.z_position();
                host.set_property(trail, PropertyValue::ZPosition(z));
            }
        }

        // The next head starts in the color on screen, then moves on from there.
        if let Some(trail) = next_layer {
            host.set_property(trail, PropertyValue::Color(ColorProperty::Stroke, current));
            self.cycle.slot_mut(transition.next).color = current;
        }

        let next_color = self.trail_color(transition.color_index);
        let recolor_dot = self.layers.dot.filter(|_| self.config.update_spinner_color);
        if self.config.animate_color_change {
            let fade = self.config.duration / 4;
            if let Some(trail) = next_layer {
                CrossFade::new(
                    trail,
                    ColorProperty::Stroke,
                    TRAIL_COLOR_KEYS[transition.next.index()],
                    next_color,
                    fade,
                )
                .start(host);
            }
            if let Some(dot) = recolor_dot {
                CrossFade::new(dot, ColorProperty::Fill, DOT_COLOR_KEY, next_color, fade).start(host);
            }
        } else {
            if let Some(trail) = next_layer {
                host.set_property(trail, PropertyValue::Color(ColorProperty::Stroke, next_color));
                self.cycle.slot_mut(transition.next).color = next_color;
            }
            if let Some(dot) = recolor_dot {
                host.set_property(dot, PropertyValue::Color(ColorProperty::Fill, next_color));
                self.dot_color = next_color;
            }
        }

        trace!(
            finished = ?transition.finished,
            next = ?transition.next,
            color_index = transition.color_index,
            cycles = self.cycle.completed_cycles(),
            "Trail cycle completed"
        );

        self.start_animating(host);
        true
    }

    fn on_deferred<H: AnimationHost + ?Sized>(&mut self, host: &mut H, action: Deferred) -> bool {
        let Deferred::CommitColor {
            layer,
            property,
            key,
            color,
        } = action;

        let slot = self.layers.slot_of(layer);
        let is_dot = self.layers.dot == Some(layer);
        match (slot, property) {
            (Some(slot), ColorProperty::Stroke) => self.cycle.slot_mut(slot).color = color,
            (None, ColorProperty::Fill) if is_dot => self.dot_color = color,
            _ => {
                debug!(%layer, %key, "Ignoring commit for a layer this spinner does not own");
                return false;
            }
        }

        CrossFade::commit(host, &action);
        trace!(%layer, %key, %color, "Color committed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halo_core::Size;
    use pretty_assertions::assert_eq;

    use crate::animation::ZOrder;
    use crate::error::SpinnerError;

    fn timeline(config: &SpinnerConfig) -> Timeline {
        Timeline::new(Size::square(config.dimension))
    }

    mod setup {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_creates_all_layers_with_defaults() {
            let config = SpinnerConfig::default();
            let mut host = timeline(&config);
            let spinner = SpinnerAnimator::setup(config, &mut host).unwrap();

            let layers = *spinner.layers();
            let trails = layers.trails.unwrap();
            let dot = layers.dot.unwrap();
            assert_eq!(host.layer_count(), 4);

            let circle = host.layer(layers.circle).unwrap();
            assert_eq!(circle.stroke_color, Color::TRANSPARENT);
            assert_eq!(circle.stroke_end, 1.0);
            assert_eq!(circle.z_position, 0.0);

            for (slot, layer) in SlotId::ALL.into_iter().zip(trails) {
                let layer = host.layer(layer).unwrap();
                assert_eq!(layer.stroke_color, Color::DARK_GRAY);
                assert_eq!(layer.stroke_end, 0.0);
                assert_eq!(layer.line_width, 3.0);
                let expected_z = if slot == SlotId::A { 1.0 } else { 0.0 };
                assert_eq!(layer.z_position, expected_z);
            }

            let dot_layer = host.layer(dot).unwrap();
            assert_eq!(dot_layer.z_position, DOT_Z_POSITION);
            assert_eq!(dot_layer.fill_color, Color::DARK_GRAY);
            assert!(dot_layer.position.approx_eq(spinner.geometry().path.start_point(), 1e-4));
            assert_eq!(spinner.phase(), CyclePhase::Idle);
            assert!(!host.has_pending_work());
        }

        #[test]
        fn test_spinner_color_follows_first_trail_color() {
            let config = SpinnerConfig::default()
                .with_spinner_color(Color::WHITE)
                .with_trail_colors([Color::RED, Color::GREEN]);
            let mut host = timeline(&config);
            let spinner = SpinnerAnimator::setup(config, &mut host).unwrap();
            assert_eq!(spinner.config().spinner_color, Color::RED);
            assert_eq!(spinner.dot_color(), Some(Color::RED));
        }

        #[test]
        fn test_spinner_color_kept_without_update() {
            let config = SpinnerConfig::default()
                .with_spinner_color(Color::WHITE)
                .with_trail_colors([Color::RED])
                .update_spinner_color(false);
            let mut host = timeline(&config);
            let spinner = SpinnerAnimator::setup(config, &mut host).unwrap();
            assert_eq!(spinner.dot_color(), Some(Color::WHITE));
        }

        #[test]
        fn test_thick_stroke_disables_dot() {
            let config = SpinnerConfig::new(40.0).with_thickness(8.0);
            let mut host = timeline(&config);
            let spinner = SpinnerAnimator::setup(config, &mut host).unwrap();
            assert!(!spinner.config().show_spinner);
            assert_eq!(spinner.layers().dot, None);
            assert_eq!(spinner.dot_color(), None);
            assert_eq!(host.layer_count(), 3);
        }

        #[test]
        fn test_no_trails() {
            let config = SpinnerConfig::default()
                .show_trail_colors(false)
                .with_trail_colors([]);
            let mut host = timeline(&config);
            let spinner = SpinnerAnimator::setup(config, &mut host).unwrap();
            assert_eq!(spinner.layers().trails, None);
            assert_eq!(spinner.current_color(), None);
            assert_eq!(host.layer_count(), 2);
        }

        #[test]
        fn test_invalid_config_creates_nothing() {
            let config = SpinnerConfig::new(0.0);
            let mut host = timeline(&SpinnerConfig::default());
            let err = SpinnerAnimator::setup(config, &mut host).unwrap_err();
            assert!(matches!(
                err,
                SpinnerError::InvalidConfiguration {
                    field: "dimension",
                    ..
                }
            ));
            assert_eq!(host.layer_count(), 0);
        }
    }

    mod cycle {
        use super::*;
        use pretty_assertions::assert_eq;

        fn started(config: SpinnerConfig) -> (SpinnerAnimator, Timeline) {
            let mut host = timeline(&config);
            let mut spinner = SpinnerAnimator::setup(config, &mut host).unwrap();
            spinner.start_animating(&mut host);
            (spinner, host)
        }

        #[test]
        fn test_start_attaches_rotation_and_first_trail() {
            let (spinner, host) = started(SpinnerConfig::default());
            let layers = spinner.layers();
            assert!(host.has_animation(layers.dot.unwrap(), DOT_ROTATION_KEY));
            assert!(host.has_animation(layers.trail(SlotId::A).unwrap(), TRAIL_KEYS[0]));
            assert!(!host.has_animation(layers.trail(SlotId::B).unwrap(), TRAIL_KEYS[1]));
            assert_eq!(spinner.phase(), CyclePhase::Running(SlotId::A));
        }

        #[test]
        fn test_completion_freezes_and_swaps() {
            let config = SpinnerConfig::default()
                .with_trail_colors([Color::RED, Color::BLUE])
                .animate_color_change(false);
            let (mut spinner, mut host) = started(config);
            let a = spinner.layers().trail(SlotId::A).unwrap();
            let b = spinner.layers().trail(SlotId::B).unwrap();

            assert_eq!(spinner.advance(&mut host, Duration::from_secs(1)), 1);

            let frozen = host.layer(a).unwrap();
            assert_eq!(frozen.stroke_end, 1.0);
            assert_eq!(frozen.stroke_color, Color::RED);
            assert_eq!(frozen.z_position, 0.0);
            assert!(!host.has_animation(a, TRAIL_KEYS[0]));

            let next = host.layer(b).unwrap();
            assert_eq!(next.stroke_color, Color::BLUE);
            assert_eq!(next.z_position, 1.0);
            assert!(host.has_animation(b, TRAIL_KEYS[1]));

            assert_eq!(spinner.phase(), CyclePhase::Running(SlotId::B));
            assert_eq!(spinner.cycle().slot(SlotId::B).z_order, ZOrder::Front);
            assert_eq!(spinner.current_color(), Some(Color::BLUE));
            assert_eq!(spinner.dot_color(), Some(Color::BLUE));
        }

        #[test]
        fn test_stale_completion_ignored() {
            let (mut spinner, mut host) = started(SpinnerConfig::default());
            let b = spinner.layers().trail(SlotId::B).unwrap();
            let handled = spinner.handle_event(
                &mut host,
                HostEvent::AnimationFinished {
                    layer: b,
                    key: TRAIL_KEYS[1],
                },
            );
            assert!(!handled);
            assert_eq!(spinner.cycle().completed_cycles(), 0);
            assert_eq!(spinner.phase(), CyclePhase::Running(SlotId::A));
        }

        #[test]
        fn test_foreign_commit_ignored() {
            let (mut spinner, mut host) = started(SpinnerConfig::default());
            let handled = spinner.handle_event(
                &mut host,
                HostEvent::Deferred(Deferred::CommitColor {
                    layer: LayerId(99),
                    property: ColorProperty::Fill,
                    key: DOT_COLOR_KEY,
                    color: Color::RED,
                }),
            );
            assert!(!handled);
        }

        #[test]
        fn test_animated_change_commits_after_quarter_duration() {
            let config = SpinnerConfig::default().with_trail_colors([Color::RED, Color::BLUE]);
            let (mut spinner, mut host) = started(config);
            let b = spinner.layers().trail(SlotId::B).unwrap();
            let dot = spinner.layers().dot.unwrap();

            spinner.advance(&mut host, Duration::from_secs(1));
            assert_eq!(host.layer(b).unwrap().stroke_color, Color::RED);
            assert!(host.has_animation(b, TRAIL_COLOR_KEYS[1]));
            assert!(host.has_animation(dot, DOT_COLOR_KEY));
            assert_eq!(spinner.dot_color(), Some(Color::RED));

            assert_eq!(spinner.advance(&mut host, Duration::from_millis(250)), 2);
            assert_eq!(host.layer(b).unwrap().stroke_color, Color::BLUE);
            assert_eq!(host.layer(dot).unwrap().fill_color, Color::BLUE);
            assert!(!host.has_animation(b, TRAIL_COLOR_KEYS[1]));
            assert!(!host.has_animation(dot, DOT_COLOR_KEY));
            assert_eq!(spinner.cycle().slot(SlotId::B).color, Color::BLUE);
            assert_eq!(spinner.dot_color(), Some(Color::BLUE));
        }

        #[test]
        fn test_dot_rotation_restarted_each_cycle() {
            let (mut spinner, mut host) = started(SpinnerConfig::default());
            let dot = spinner.layers().dot.unwrap();
            spinner.advance(&mut host, Duration::from_secs(1));
            assert!(host.has_animation(dot, DOT_ROTATION_KEY));
            let start = spinner.geometry().path.start_point();
            assert!(host.presentation(dot).unwrap().position.approx_eq(start, 1e-3));
        }
    }
}
