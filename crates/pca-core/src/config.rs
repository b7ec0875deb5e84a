//! Configuration types for the analysis pipeline.
//!
//! [`AnalysisOptions`] carries everything [`crate::analyze`] needs besides the
//! table itself. Use [`AnalysisOptions::builder()`] for a validated value.

use serde::{Deserialize, Serialize};

/// Columns that describe where and when a sample was taken rather than what
/// was measured. These are dropped whenever present.
pub const DEFAULT_METADATA_COLUMNS: [&str; 10] = [
    "SampleID",
    "Sample_ID",
    "Date",
    "Year",
    "Site",
    "Plot",
    "Transect",
    "Latitude",
    "Longitude",
    "Observer",
];

/// Options for one analysis run.
///
/// # Example
///
/// ```rust,ignore
/// use pca_core::AnalysisOptions;
///
/// let options = AnalysisOptions::builder()
///     .n_components(3)
///     .drop_column("label")
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Columns the user asked to exclude. Every entry must exist in the table.
    pub columns_to_drop: Vec<String>,

    /// Known non-feature columns, removed when present.
    /// Default: [`DEFAULT_METADATA_COLUMNS`]
    pub default_columns_to_drop: Vec<String>,

    /// Number of principal components to keep.
    /// Default: 2
    pub n_components: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            columns_to_drop: Vec::new(),
            default_columns_to_drop: default_metadata_columns(),
            n_components: 2,
        }
    }
}

fn default_metadata_columns() -> Vec<String> {
    DEFAULT_METADATA_COLUMNS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl AnalysisOptions {
    /// Create a new options builder.
    pub fn builder() -> AnalysisOptionsBuilder {
        AnalysisOptionsBuilder::default()
    }

    /// Validate the options without looking at any table.
    ///
    /// Checks that depend on the data (missing columns, component count
    /// versus retained features) happen inside the pipeline.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.n_components == 0 {
            return Err(ConfigValidationError::InvalidComponentCount(
                self.n_components,
            ));
        }

        if let Some(name) = self
            .columns_to_drop
            .iter()
            .find(|name| name.trim().is_empty())
        {
            return Err(ConfigValidationError::EmptyColumnName(name.clone()));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid component count: {0} (must be at least 1)")]
    InvalidComponentCount(usize),

    #[error("Invalid column name '{0}' in drop list (must not be blank)")]
    EmptyColumnName(String),
}

/// Builder for [`AnalysisOptions`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisOptionsBuilder {
    columns_to_drop: Vec<String>,
    default_columns_to_drop: Option<Vec<String>>,
    n_components: Option<usize>,
}

impl AnalysisOptionsBuilder {
    /// Add a column to the user drop list.
    pub fn drop_column(mut self, name: impl Into<String>) -> Self {
        self.columns_to_drop.push(name.into());
        self
    }

    /// Replace the user drop list.
    pub fn columns_to_drop<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns_to_drop = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the default (metadata) drop list.
    pub fn default_columns_to_drop<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_columns_to_drop = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set the number of principal components to keep.
    pub fn n_components(mut self, n: usize) -> Self {
        self.n_components = Some(n);
        self
    }

    /// Build the options.
    ///
    /// Returns validated `AnalysisOptions` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisOptions, ConfigValidationError> {
        let options = AnalysisOptions {
            columns_to_drop: self.columns_to_drop,
            default_columns_to_drop: self
                .default_columns_to_drop
                .unwrap_or_else(default_metadata_columns),
            n_components: self.n_components.unwrap_or(2),
        };

        options.validate()?;
        Ok(options)
    }
}
