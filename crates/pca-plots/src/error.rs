//! Error types for plot construction.

use pca_core::{ErrorKind, PcaError};
use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

use crate::config::ConfigValidationError;

/// The main error type for the plotting crate.
#[derive(Error, Debug)]
pub enum PlotError {
    /// A parameter is outside its valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Plot options failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    /// More groups need generated colors than the palette holds.
    #[error("{requested} groups need a color but the palette only has {available}")]
    Capacity { requested: usize, available: usize },

    /// A color string could not be parsed.
    #[error("Invalid color '{0}' (expected #rrggbb)")]
    InvalidColor(String),

    /// A required column is absent from a mapping table.
    #[error("Column '{0}' not found in mapping table")]
    MissingColumn(String),

    /// A plot was requested before any analysis ran.
    #[error("No analysis result available")]
    NoResult,

    /// Analysis engine error.
    #[error(transparent)]
    Analysis(#[from] PcaError),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl PlotError {
    /// Category of this error, shared with the analysis engine.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter(_)
            | Self::InvalidConfig(_)
            | Self::InvalidColor(_)
            | Self::MissingColumn(_)
            | Self::Polars(_) => ErrorKind::Configuration,
            Self::Capacity { .. } => ErrorKind::Capacity,
            Self::NoResult => ErrorKind::InsufficientData,
            Self::Analysis(e) => e.kind(),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidParameter(_) => "INVALID_PARAMETER",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Capacity { .. } => "PALETTE_CAPACITY",
            Self::InvalidColor(_) => "INVALID_COLOR",
            Self::MissingColumn(_) => "MISSING_COLUMN",
            Self::NoResult => "NO_RESULT",
            Self::Analysis(e) => e.error_code(),
            Self::Polars(_) => "POLARS_ERROR",
        }
    }
}

impl Serialize for PlotError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("PlotError", 3)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for plotting operations.
pub type Result<T> = std::result::Result<T, PlotError>;
