//! Error types for the PCA analysis engine.
//!
//! Every failure is returned to the immediate caller as a [`PcaError`]. The
//! [`ErrorKind`] taxonomy is shared with the plotting crate so a frontend can
//! branch on the category of a failure without matching on every variant.
//!
//! Errors are serializable as `{ code, kind, message }` so they can be forwarded to
//! a UI layer unchanged.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::fmt;
use thiserror::Error;

use crate::config::ConfigValidationError;

/// Broad category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Requested columns are absent or a parameter is out of range.
    Configuration,
    /// Not enough numeric columns or rows to compute what was asked for.
    InsufficientData,
    /// The data cannot be standardized or factored (zero variance,
    /// non-finite values, SVD failure).
    Degenerate,
    /// More distinct colors were requested than the palette holds.
    Capacity,
    /// A failure inside [`crate::analyze`], wrapping one of the other kinds.
    Analysis,
}

/// Stages of the analysis pipeline, used to label wrapped failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    Validation,
    ColumnSelection,
    NumericExtraction,
    Standardization,
    Decomposition,
}

impl AnalysisStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Validation => "option validation",
            Self::ColumnSelection => "column selection",
            Self::NumericExtraction => "numeric extraction",
            Self::Standardization => "standardization",
            Self::Decomposition => "decomposition",
        }
    }
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The main error type for the analysis engine.
#[derive(Error, Debug)]
pub enum PcaError {
    /// User-requested columns were not present in the table.
    #[error("Requested columns not found in table: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A parameter is outside its valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Analysis options failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    /// Not enough data to continue.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Column with zero variance.
    #[error("Column '{0}' has zero variance and cannot be standardized")]
    DegenerateColumn(String),

    /// Column still holding NaN (missing or infinite) values.
    #[error("Column '{column}' contains {count} missing or non-finite value(s)")]
    NonFiniteValues { column: String, count: usize },

    /// The SVD routine did not produce the requested factors.
    #[error("Decomposition failed: {0}")]
    Decomposition(String),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// A stage of [`crate::analyze`] failed.
    #[error("Analysis failed during {stage}: {source}")]
    Analysis {
        stage: AnalysisStage,
        #[source]
        source: Box<PcaError>,
    },
}

impl PcaError {
    /// Wrap this error as a failure of the given analysis stage.
    ///
    /// Already-wrapped errors are returned unchanged so the pipeline never
    /// nests one analysis failure inside another.
    pub fn in_stage(self, stage: AnalysisStage) -> Self {
        match self {
            wrapped @ PcaError::Analysis { .. } => wrapped,
            other => PcaError::Analysis {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// Category of this error. Wrapped errors report [`ErrorKind::Analysis`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingColumns(_)
            | Self::InvalidParameter(_)
            | Self::InvalidConfig(_)
            | Self::Polars(_) => ErrorKind::Configuration,
            Self::InsufficientData(_) => ErrorKind::InsufficientData,
            Self::DegenerateColumn(_)
            | Self::NonFiniteValues { .. }
            | Self::Decomposition(_) => ErrorKind::Degenerate,
            Self::Analysis { .. } => ErrorKind::Analysis,
        }
    }

    /// Category of the underlying cause, looking through an analysis wrapper.
    pub fn root_kind(&self) -> ErrorKind {
        self.root_cause().kind()
    }

    /// The innermost error.
    pub fn root_cause(&self) -> &PcaError {
        match self {
            Self::Analysis { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingColumns(_) => "MISSING_COLUMNS",
            Self::InvalidParameter(_) => "INVALID_PARAMETER",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::InsufficientData(_) => "INSUFFICIENT_DATA",
            Self::DegenerateColumn(_) => "DEGENERATE_COLUMN",
            Self::NonFiniteValues { .. } => "NON_FINITE_VALUES",
            Self::Decomposition(_) => "DECOMPOSITION_FAILED",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Analysis { source, .. } => source.error_code(),
        }
    }
}

impl Serialize for PcaError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("PcaError", 3)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, PcaError>;

/// Extension trait for tagging a failed step with its pipeline stage.
pub trait ResultExt<T> {
    fn stage(self, stage: AnalysisStage) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn stage(self, stage: AnalysisStage) -> Result<T> {
        self.map_err(|e| e.in_stage(stage))
    }
}
