//! Rendering parameters for the biplot.

use crate::color::{Color, Palette};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Options for [`crate::layout_biplot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiplotOptions {
    /// How many feature arrows to draw.
    /// Default: 10 (clamped to the feature count at layout time)
    pub top_n: usize,

    /// Coverage of the confidence ellipse, in (0, 1).
    /// Default: 0.95
    pub confidence: f64,

    /// Padding added on each side, as a fraction of the larger axis range.
    /// Default: 0.2
    pub margin_fraction: f64,

    /// Color arrows by feature group instead of one color per feature.
    /// Default: true
    pub use_groups: bool,

    /// Colors pinned to specific groups.
    pub preferred_colors: BTreeMap<String, Color>,

    /// Colors handed out to unpinned groups.
    /// Default: tab20
    pub palette: Palette,
}

impl Default for BiplotOptions {
    fn default() -> Self {
        Self {
            top_n: 10,
            confidence: 0.95,
            margin_fraction: 0.2,
            use_groups: true,
            preferred_colors: BTreeMap::new(),
            palette: Palette::tab20(),
        }
    }
}

impl BiplotOptions {
    pub fn builder() -> BiplotOptionsBuilder {
        BiplotOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.top_n == 0 {
            return Err(ConfigValidationError::InvalidTopN(self.top_n));
        }

        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(ConfigValidationError::InvalidConfidence(self.confidence));
        }

        if !self.margin_fraction.is_finite() || self.margin_fraction < 0.0 {
            return Err(ConfigValidationError::InvalidMargin(self.margin_fraction));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid top_n: {0} (must be at least 1)")]
    InvalidTopN(usize),

    #[error("Invalid confidence level: {0} (must be strictly between 0 and 1)")]
    InvalidConfidence(f64),

    #[error("Invalid margin fraction: {0} (must be finite and non-negative)")]
    InvalidMargin(f64),
}

/// Builder for [`BiplotOptions`].
#[derive(Debug, Default)]
pub struct BiplotOptionsBuilder {
    options: BiplotOptionsOverrides,
}

#[derive(Debug, Default)]
struct BiplotOptionsOverrides {
    top_n: Option<usize>,
    confidence: Option<f64>,
    margin_fraction: Option<f64>,
    use_groups: Option<bool>,
    preferred_colors: BTreeMap<String, Color>,
    palette: Option<Palette>,
}

impl BiplotOptionsBuilder {
    pub fn top_n(mut self, n: usize) -> Self {
        self.options.top_n = Some(n);
        self
    }

    pub fn confidence(mut self, level: f64) -> Self {
        self.options.confidence = Some(level);
        self
    }

    pub fn margin_fraction(mut self, fraction: f64) -> Self {
        self.options.margin_fraction = Some(fraction);
        self
    }

    pub fn use_groups(mut self, enabled: bool) -> Self {
        self.options.use_groups = Some(enabled);
        self
    }

    /// Pin `color` to `group`.
    pub fn prefer_color(mut self, group: impl Into<String>, color: Color) -> Self {
        self.options.preferred_colors.insert(group.into(), color);
        self
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.options.palette = Some(palette);
        self
    }

    /// Build the options.
    ///
    /// Returns validated `BiplotOptions` or an error if validation fails.
    pub fn build(self) -> Result<BiplotOptions, ConfigValidationError> {
        let defaults = BiplotOptions::default();
        let o = self.options;
        let options = BiplotOptions {
            top_n: o.top_n.unwrap_or(defaults.top_n),
            confidence: o.confidence.unwrap_or(defaults.confidence),
            margin_fraction: o.margin_fraction.unwrap_or(defaults.margin_fraction),
            use_groups: o.use_groups.unwrap_or(defaults.use_groups),
            preferred_colors: o.preferred_colors,
            palette: o.palette.unwrap_or(defaults.palette),
        };

        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let options = BiplotOptions::default();
        assert_eq!(options.top_n, 10);
        assert_eq!(options.confidence, 0.95);
        assert_eq!(options.margin_fraction, 0.2);
        assert!(options.use_groups);
        assert_eq!(options.palette, Palette::tab20());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let options = BiplotOptions::builder()
            .top_n(5)
            .confidence(0.99)
            .use_groups(false)
            .prefer_color("Texture", Color::new(0, 0, 0))
            .build()
            .unwrap();

        assert_eq!(options.top_n, 5);
        assert_eq!(options.confidence, 0.99);
        assert!(!options.use_groups);
        assert_eq!(
            options.preferred_colors.get("Texture"),
            Some(&Color::new(0, 0, 0))
        );
    }

    #[test]
    fn test_validation_failures() {
        assert_eq!(
            BiplotOptions::builder().top_n(0).build(),
            Err(ConfigValidationError::InvalidTopN(0))
        );
        assert!(BiplotOptions::builder().confidence(1.0).build().is_err());
        assert!(BiplotOptions::builder().confidence(0.0).build().is_err());
        assert!(BiplotOptions::builder().confidence(f64::NAN).build().is_err());
        assert!(
            BiplotOptions::builder()
                .margin_fraction(-0.1)
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_deserialize_partial_json() {
        let options: BiplotOptions = serde_json::from_str(r#"{"top_n": 3}"#).unwrap();
        assert_eq!(options.top_n, 3);
        assert_eq!(options.confidence, 0.95);
    }
}
