//! PCA Analysis Engine
//!
//! Principal Component Analysis for tabular survey data held in a polars
//! [`DataFrame`](polars::prelude::DataFrame).
//!
//! # Overview
//!
//! - **Column selection**: user and default (metadata) drop lists
//! - **Numeric extraction**: keep numeric columns, infinities become NaN
//! - **Standardization**: zero mean, unit population variance per column
//! - **Decomposition**: deterministic SVD with a fixed component sign convention
//!
//! Every step is a pure function of its inputs; nothing here keeps state
//! between calls.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pca_core::{analyze, AnalysisOptions};
//! use polars::prelude::*;
//!
//! let df = CsvReadOptions::default()
//!     .try_into_reader_with_file_path(Some("survey.csv".into()))?
//!     .finish()?;
//!
//! let options = AnalysisOptions::builder()
//!     .n_components(3)
//!     .drop_column("label")
//!     .build()?;
//!
//! let result = analyze(&df, &options)?;
//! println!("Explained variance: {:?}", result.explained_variance_ratio);
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;
pub mod utils;

pub use config::{
    AnalysisOptions, AnalysisOptionsBuilder, ConfigValidationError, DEFAULT_METADATA_COLUMNS,
};
pub use error::{AnalysisStage, ErrorKind, PcaError, ResultExt};
pub use pipeline::{analyze, decompose, extract_numeric, select_columns, standardize};
pub use types::{ColumnSelection, NumericTable, PcaResult, StandardizedTable, TableShapes};
pub use utils::{is_numeric_dtype, normalize_feature_name};
