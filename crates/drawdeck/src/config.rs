//! Configuration types for drawdeck conversions.
//!
//! This module provides configuration structures that control how diagrams
//! are resolved and exported. All types implement [`serde::Deserialize`] for
//! loading from external sources, and every field has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`RoutingConfig`] - Connector routing decisions.
//! - [`StyleConfig`] - Default paint and text size for cells that do not set them.
//! - [`LabelConfig`] - Minimum edge label box size.
//! - [`ExportConfig`] - Slide spacing in exported documents.
//!
//! # Example
//!
//! ```
//! # use drawdeck::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.routing().straight_tolerance(), 10.0);
//! assert!(config.style().fill_color().is_ok());
//! ```

use serde::Deserialize;

use drawdeck_core::color::Color;

/// Top-level configuration combining all sections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Routing configuration section.
    #[serde(default)]
    routing: RoutingConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Label configuration section.
    #[serde(default)]
    label: LabelConfig,

    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        routing: RoutingConfig,
        style: StyleConfig,
        label: LabelConfig,
        export: ExportConfig,
    ) -> Self {
        Self {
            routing,
            style,
            label,
            export,
        }
    }

    /// Returns the routing configuration.
    pub fn routing(&self) -> &RoutingConfig {
        &self.routing
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the label configuration.
    pub fn label(&self) -> &LabelConfig {
        &self.label
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Checks every value that is parsed lazily.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        self.style.fill_color()?;
        self.style.stroke_color()?;
        self.style.background_color()?;

        let numbers = [
            ("routing.straight_tolerance", self.routing.straight_tolerance),
            ("style.stroke_width", self.style.stroke_width),
            ("style.font_size", self.style.font_size),
            ("label.min_width", self.label.min_width),
            ("label.min_height", self.label.min_height),
            ("export.slide_gap", self.export.slide_gap),
            ("export.margin", self.export.margin),
        ];
        for (name, value) in numbers {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("`{name}` must be a non-negative number, got {value}"));
            }
        }
        Ok(())
    }
}

/// Connector routing configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Largest cross-axis offset, in pixels, at which an orthogonal connector
    /// between aligned sites is drawn straight.
    straight_tolerance: f32,
}

impl RoutingConfig {
    pub fn new(straight_tolerance: f32) -> Self {
        Self { straight_tolerance }
    }

    pub fn straight_tolerance(&self) -> f32 {
        self.straight_tolerance
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            straight_tolerance: 10.0,
        }
    }
}

/// Defaults applied to cells whose style leaves a value out.
///
/// Colors are kept as strings and parsed on access so that a bad value is
/// reported with the name of its setting.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Shape fill color when `fillColor` is missing or `default`.
    fill_color: Option<String>,
    /// Shape and connector stroke color when `strokeColor` is missing or `default`.
    stroke_color: Option<String>,
    /// Stroke width when `strokeWidth` is missing.
    stroke_width: f32,
    /// Text size when neither the markup nor `fontSize` sets one.
    font_size: f32,
    /// Slide background color. Exported slides are transparent when unset.
    background_color: Option<String>,
}

impl StyleConfig {
    /// Returns the default fill [`Color`], white unless configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn fill_color(&self) -> Result<Color, String> {
        parse_color("fill_color", self.fill_color.as_deref(), Color::white())
    }

    /// Returns the default stroke [`Color`], black unless configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn stroke_color(&self) -> Result<Color, String> {
        parse_color("stroke_color", self.stroke_color.as_deref(), Color::default())
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            fill_color: None,
            stroke_color: None,
            stroke_width: 1.0,
            font_size: 12.0,
            background_color: None,
        }
    }
}

fn parse_color(name: &str, value: Option<&str>, default: Color) -> Result<Color, String> {
    match value {
        Some(value) => {
            Color::new(value).map_err(|err| format!("Invalid {name} in config: {err}"))
        }
        None => Ok(default),
    }
}

/// Edge label box sizing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    min_width: f32,
    min_height: f32,
}

impl LabelConfig {
    pub fn new(min_width: f32, min_height: f32) -> Self {
        Self {
            min_width,
            min_height,
        }
    }

    /// Smallest label box width in pixels.
    pub fn min_width(&self) -> f32 {
        self.min_width
    }

    /// Smallest label box height in pixels.
    pub fn min_height(&self) -> f32 {
        self.min_height
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            min_width: 40.0,
            min_height: 20.0,
        }
    }
}

/// Layout of exported documents.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Vertical space between stacked slides.
    slide_gap: f32,
    /// Space around each slide's content.
    margin: f32,
}

impl ExportConfig {
    pub fn new(slide_gap: f32, margin: f32) -> Self {
        Self { slide_gap, margin }
    }

    pub fn slide_gap(&self) -> f32 {
        self.slide_gap
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            slide_gap: 40.0,
            margin: 50.0,
        }
    }
}
