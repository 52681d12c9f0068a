//! Configuration types for Lifeline diagram rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! TOML or any other serde format. Every field is optional; missing fields
//! take the defaults listed on [`LayoutConfig`].
//!
//! # Example
//!
//! ```
//! # use lifeline::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().swimlane_width(), 200.0);
//! assert_eq!(config.layout().activity_offset(), 10.0);
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Dimensions used by the layout engine, in SVG user units.
///
/// | Key | Default |
/// |---|---|
/// | `header_height` | 50 |
/// | `swimlane_step` | 25 |
/// | `swimlane_width` | 200 |
/// | `label_height` | 20 |
/// | `activity_width` | 20 |
/// | `arrow_tip_size` | 10 |
/// | `message_font_size` | 12 |
/// | `message_baseline_offset` | 3 |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Height of the band holding the actor headers.
    header_height: f32,
    /// Vertical distance covered by one tick of the logical clock.
    swimlane_step: f32,
    /// Horizontal space given to every actor.
    swimlane_width: f32,
    label_height: f32,
    activity_width: f32,
    arrow_tip_size: f32,
    message_font_size: f32,
    /// Gap between a message line and the baseline of its label.
    message_baseline_offset: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_height: 50.0,
            swimlane_step: 25.0,
            swimlane_width: 200.0,
            label_height: 20.0,
            activity_width: 20.0,
            arrow_tip_size: 10.0,
            message_font_size: 12.0,
            message_baseline_offset: 3.0,
        }
    }
}

impl LayoutConfig {
    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    pub fn swimlane_step(&self) -> f32 {
        self.swimlane_step
    }

    pub fn swimlane_width(&self) -> f32 {
        self.swimlane_width
    }

    pub fn label_height(&self) -> f32 {
        self.label_height
    }

    /// Width of an actor header, half the swimlane width.
    pub fn label_width(&self) -> f32 {
        self.swimlane_width / 2.0
    }

    pub fn activity_width(&self) -> f32 {
        self.activity_width
    }

    /// Horizontal shift per nesting layer, half the activity width.
    pub fn activity_offset(&self) -> f32 {
        self.activity_width / 2.0
    }

    pub fn arrow_tip_size(&self) -> f32 {
        self.arrow_tip_size
    }

    pub fn message_font_size(&self) -> f32 {
        self.message_font_size
    }

    pub fn message_baseline_offset(&self) -> f32 {
        self.message_baseline_offset
    }

    /// Sets the swimlane width.
    pub fn with_swimlane_width(mut self, width: f32) -> Self {
        self.swimlane_width = width;
        self
    }

    /// Sets the vertical distance per tick.
    pub fn with_swimlane_step(mut self, step: f32) -> Self {
        self.swimlane_step = step;
        self
    }

    /// Checks that every dimension is finite and usable.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending key. Sizes must be
    /// strictly positive; the baseline offset may be zero.
    pub fn validate(&self) -> Result<(), String> {
        let sizes = [
            ("header_height", self.header_height),
            ("swimlane_step", self.swimlane_step),
            ("swimlane_width", self.swimlane_width),
            ("label_height", self.label_height),
            ("activity_width", self.activity_width),
            ("arrow_tip_size", self.arrow_tip_size),
            ("message_font_size", self.message_font_size),
        ];
        for (key, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!(
                    "Invalid layout config: `{key}` must be a positive number, got {value}"
                ));
            }
        }

        let offset = self.message_baseline_offset;
        if !offset.is_finite() || offset < 0.0 {
            return Err(format!(
                "Invalid layout config: `message_baseline_offset` must not be negative, got {offset}"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let layout = LayoutConfig::default();
        assert_approx_eq!(f32, layout.header_height(), 50.0);
        assert_approx_eq!(f32, layout.swimlane_step(), 25.0);
        assert_approx_eq!(f32, layout.label_width(), 100.0);
        assert_approx_eq!(f32, layout.activity_offset(), 10.0);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [layout]
            swimlane_width = 300
            arrow_tip_size = 6.5
            "#,
        )
        .unwrap();

        assert_approx_eq!(f32, config.layout().swimlane_width(), 300.0);
        assert_approx_eq!(f32, config.layout().label_width(), 150.0);
        assert_approx_eq!(f32, config.layout().arrow_tip_size(), 6.5);
        assert_approx_eq!(f32, config.layout().header_height(), 50.0);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_unknown_layout_key_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[layout]\nswimlane_widht = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_sizes() {
        let layout = LayoutConfig::default().with_swimlane_step(0.0);
        let err = layout.validate().unwrap_err();
        assert!(err.contains("swimlane_step"), "unexpected message: {err}");

        let layout = LayoutConfig::default().with_swimlane_width(f32::NAN);
        assert!(layout.validate().is_err());
    }
}
