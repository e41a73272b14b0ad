//! Spinner configuration.
//!
//! A [`SpinnerConfig`] is assembled by the host before [`setup`] and is never
//! mutated by the caller afterwards. It can be built in code with the `with_*`
//! methods or loaded from TOML:
//!
//! ```toml
//! dimension = 120.0
//! direction = "counter_clockwise"
//! trail_colors = ["red", "#00FF00", "blue"]
//! thickness = 4.0
//! duration = 0.8
//! animate_color_change = false
//! ```
//!
//! [`setup`]: crate::animator::SpinnerAnimator::setup

use std::time::Duration;

use halo_core::Color;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpinnerError};

/// Default width and height of the spinner.
pub const DEFAULT_DIMENSION: f32 = 40.0;

/// Default stroke width of the circle and trails.
pub const DEFAULT_THICKNESS: f32 = 3.0;

/// Default duration of one trail cycle and one dot revolution.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(1);

/// Rotational sense of the dot and the trails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Sweeps clockwise on screen.
    #[default]
    Clockwise,
    /// Sweeps counter-clockwise on screen.
    CounterClockwise,
}

impl Direction {
    /// Maps the toolkit-style `clockwiseDirection` flag to a direction.
    pub fn from_clockwise(clockwise: bool) -> Self {
        if clockwise {
            Self::Clockwise
        } else {
            Self::CounterClockwise
        }
    }

    /// Returns `true` for [`Direction::Clockwise`].
    pub fn is_clockwise(self) -> bool {
        self == Self::Clockwise
    }
}

/// Configuration of a single spinner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinnerConfig {
    /// Width and height of the spinner's square frame.
    pub dimension: f32,
    /// Rotational sense of the dot and trails.
    pub direction: Direction,
    /// Trail colors, shown one full cycle each and then wrapped around.
    pub trail_colors: Vec<Color>,
    /// Stroke width of the circle and trails.
    pub thickness: f32,
    /// Length of one trail cycle and one dot revolution.
    #[serde(with = "duration_secs")]
    pub duration: Duration,
    /// Stroke color of the base circle.
    pub circle_color: Color,
    /// Fill color of the dot.
    pub spinner_color: Color,
    /// Draw the alternating trail layers.
    pub show_trail_colors: bool,
    /// Cross-fade between trail colors instead of switching instantly.
    pub animate_color_change: bool,
    /// Draw the dot sweeping around the circle.
    pub show_spinner: bool,
    /// Keep the dot's fill in sync with the current trail color.
    pub update_spinner_color: bool,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl SpinnerConfig {
    /// Creates a configuration with every property at its default value.
    pub fn new(dimension: f32) -> Self {
        Self {
            dimension,
            direction: Direction::Clockwise,
            trail_colors: vec![Color::DARK_GRAY, Color::LIGHT_GRAY],
            thickness: DEFAULT_THICKNESS,
            duration: DEFAULT_DURATION,
            circle_color: Color::TRANSPARENT,
            spinner_color: Color::DARK_GRAY,
            show_trail_colors: true,
            animate_color_change: true,
            show_spinner: true,
            update_spinner_color: true,
        }
    }

    /// Parses and validates a TOML configuration document.
    ///
    /// Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values the geometry and color cycle cannot work with.
    ///
    /// Thickness only has to be finite: an oversized stroke
    /// disables the dot during setup.
    pub fn validate(&self) -> Result<()> {
        if !self.dimension.is_finite() || self.dimension <= 0.0 {
            return Err(SpinnerError::invalid_configuration(
                "dimension",
                format!("must be a positive finite number, got {}", self.dimension),
            ));
        }

        if !self.thickness.is_finite() {
            return Err(SpinnerError::invalid_configuration(
                "thickness",
                format!("must be a finite number, got {}", self.thickness),
            ));
        }

        if self.duration.is_zero() {
            return Err(SpinnerError::invalid_configuration(
                "duration",
                "must be greater than zero",
            ));
        }

        if self.show_trail_colors && self.trail_colors.is_empty() {
            return Err(SpinnerError::invalid_configuration(
                "trail_colors",
                "at least one color is required while trail colors are shown",
            ));
        }

        Ok(())
    }

    /// Set the dimension.
    pub fn with_dimension(mut self, dimension: f32) -> Self {
        self.dimension = dimension;
        self
    }

    /// Set the rotational direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the trail colors.
    pub fn with_trail_colors(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.trail_colors = colors.into_iter().collect();
        self
    }

    /// Set the stroke width.
    pub fn with_thickness(mut self, thickness: f32) -> Self {
        self.thickness = thickness;
        self
    }

    /// Set the cycle duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the base circle color.
    pub fn with_circle_color(mut self, color: Color) -> Self {
        self.circle_color = color;
        self
    }

    /// Set the dot color.
    pub fn with_spinner_color(mut self, color: Color) -> Self {
        self.spinner_color = color;
        self
    }

    /// Show or hide the trail layers.
    pub fn show_trail_colors(mut self, show: bool) -> Self {
        self.show_trail_colors = show;
        self
    }

    /// Enable or disable the color cross-fade.
    pub fn animate_color_change(mut self, animate: bool) -> Self {
        self.animate_color_change = animate;
        self
    }

    /// Show or hide the dot.
    pub fn show_spinner(mut self, show: bool) -> Self {
        self.show_spinner = show;
        self
    }

    /// Enable or disable syncing the dot color with the trail color.
    pub fn update_spinner_color(mut self, update: bool) -> Self {
        self.update_spinner_color = update;
        self
    }
}

/// Serializes a [`Duration`] as fractional seconds.
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SpinnerConfig::default();
        assert_eq!(config.dimension, 40.0);
        assert_eq!(config.direction, Direction::Clockwise);
        assert_eq!(config.trail_colors, vec![Color::DARK_GRAY, Color::LIGHT_GRAY]);
        assert_eq!(config.thickness, 3.0);
        assert_eq!(config.duration, Duration::from_secs(1));
        assert_eq!(config.circle_color, Color::TRANSPARENT);
        assert_eq!(config.spinner_color, Color::DARK_GRAY);
        assert!(config.show_trail_colors);
        assert!(config.animate_color_change);
        assert!(config.show_spinner);
        assert!(config.update_spinner_color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = SpinnerConfig::new(80.0)
            .with_direction(Direction::from_clockwise(false))
            .with_trail_colors([Color::RED, Color::BLUE])
            .with_thickness(5.0)
            .with_duration(Duration::from_millis(500))
            .animate_color_change(false)
            .show_spinner(false);
        assert_eq!(config.direction, Direction::CounterClockwise);
        assert_eq!(config.trail_colors.len(), 2);
        assert_eq!(config.thickness, 5.0);
        assert_eq!(config.duration, Duration::from_millis(500));
        assert!(!config.animate_color_change);
        assert!(!config.show_spinner);
    }

    #[test]
    fn test_validate_rejects_bad_dimension() {
        for dimension in [0.0, -10.0, f32::NAN, f32::INFINITY] {
            let err = SpinnerConfig::new(dimension).validate().unwrap_err();
            assert_eq!(err.field(), Some("dimension"));
        }
    }

    #[test]
    fn test_validate_rejects_non_finite_thickness() {
        for thickness in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let err = SpinnerConfig::new(40.0)
                .with_thickness(thickness)
                .validate()
                .unwrap_err();
            assert_eq!(err.field(), Some("thickness"));
        }
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        let err = SpinnerConfig::default()
            .with_duration(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), Some("duration"));
    }

    #[test]
    fn test_validate_empty_trail_colors() {
        let config = SpinnerConfig::default().with_trail_colors([]);
        let err = config.clone().validate().unwrap_err();
        assert_eq!(err.field(), Some("trail_colors"));
        assert!(err.to_string().contains("trail_colors"));

        // Without trails the list is never indexed.
        assert!(config.show_trail_colors(false).validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_oversized_thickness() {
        let config = SpinnerConfig::new(40.0).with_thickness(100.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_str() {
        let config = SpinnerConfig::from_toml_str(
            r##"
dimension = 120.0
direction = "counter_clockwise"
trail_colors = ["red", "#00FF00", "blue"]
duration = 0.8
animate_color_change = false
"##,
        )
        .unwrap();
        assert_eq!(config.dimension, 120.0);
        assert_eq!(config.direction, Direction::CounterClockwise);
        assert_eq!(config.trail_colors, vec![Color::RED, Color::GREEN, Color::BLUE]);
        assert_eq!(config.duration, Duration::from_millis(800));
        assert!(!config.animate_color_change);
        // untouched keys keep defaults
        assert_eq!(config.thickness, 3.0);
        assert!(config.show_spinner);
    }

    #[test]
    fn test_from_toml_str_errors() {
        assert!(matches!(
            SpinnerConfig::from_toml_str("trail_colors = [\"nope\"]"),
            Err(SpinnerError::Parse(_))
        ));
        assert!(matches!(
            SpinnerConfig::from_toml_str("duration = -1.0"),
            Err(SpinnerError::Parse(_))
        ));
        assert!(matches!(
            SpinnerConfig::from_toml_str("trail_colors = []"),
            Err(SpinnerError::InvalidConfiguration {
                field: "trail_colors",
                ..
            })
        ));
    }

    #[test]
    fn test_toml_roundtrip_keeps_values() {
        let config = SpinnerConfig::new(64.0)
            .with_trail_colors([Color::RED, Color::BLUE])
            .with_direction(Direction::CounterClockwise);
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("\"#FF0000\""));
        let parsed = SpinnerConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.dimension, 64.0);
        assert_eq!(parsed.direction, Direction::CounterClockwise);
        assert_eq!(parsed.trail_colors, config.trail_colors);
        assert_eq!(parsed.duration, config.duration);
        assert!(parsed.spinner_color.approx_eq(&config.spinner_color, 0.01));
    }
}
