//! Data carried between pipeline stages and the final [`PcaResult`].

use nalgebra::DMatrix;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Output of [`crate::select_columns`].
#[derive(Debug, Clone)]
pub struct ColumnSelection {
    /// Copy of the input table without the dropped columns.
    pub table: DataFrame,
    /// Columns that were actually removed, in table order.
    pub dropped: Vec<String>,
}

/// Numeric columns of a table as an N×M matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericTable {
    pub feature_names: Vec<String>,
    /// Rows are samples, columns follow `feature_names`. Missing values are NaN.
    pub data: DMatrix<f64>,
    /// Non-numeric columns that were left out.
    pub excluded_columns: Vec<String>,
    /// How many nulls and infinities were turned into NaN.
    pub replaced_values: usize,
}

impl NumericTable {
    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }
}

/// Zero-mean, unit-variance (population) copy of a [`NumericTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct StandardizedTable {
    pub feature_names: Vec<String>,
    pub data: DMatrix<f64>,
    pub means: Vec<f64>,
    pub std_devs: Vec<f64>,
}

impl StandardizedTable {
    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }
}

/// Table shapes recorded along the pipeline, as `(rows, columns)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableShapes {
    pub original: (usize, usize),
    pub selected: (usize, usize),
    pub numeric: (usize, usize),
    pub standardized: (usize, usize),
}

/// Immutable result of one analysis run.
///
/// `N` is the number of samples, `M` the number of retained features and `K`
/// the number of components.
///
/// Components follow a fixed sign convention: in every row of `components`
/// the entry with the largest magnitude is positive (the first one wins a
/// tie). Other libraries may report the same axes with opposite signs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcaResult {
    /// N×K sample scores.
    pub transformed_data: DMatrix<f64>,
    /// K×M unit-norm principal axes.
    pub components: DMatrix<f64>,
    /// M×K, the transpose of `components`.
    pub loadings: DMatrix<f64>,
    /// Raw eigenvalues of the sample covariance, `s² / (N - 1)`.
    pub explained_variance: Vec<f64>,
    /// Fraction of the total variance captured by each component.
    pub explained_variance_ratio: Vec<f64>,
    pub singular_values: Vec<f64>,
    /// M names, aligned with `loadings` rows and `components` columns.
    pub feature_names: Vec<String>,
    /// N×M matrix that was decomposed.
    pub standardized_data: DMatrix<f64>,
    pub means: Vec<f64>,
    pub std_devs: Vec<f64>,
    pub shapes: TableShapes,
    /// Columns removed by the user or default drop lists.
    pub dropped_columns: Vec<String>,
    /// Non-numeric columns left out of the analysis.
    pub excluded_columns: Vec<String>,
}

impl PcaResult {
    pub fn n_samples(&self) -> usize {
        self.transformed_data.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn n_components(&self) -> usize {
        self.explained_variance_ratio.len()
    }

    /// Index of a feature by exact name.
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.feature_names.iter().position(|f| f == name)
    }

    /// Running sum of `explained_variance_ratio`.
    pub fn cumulative_variance_ratio(&self) -> Vec<f64> {
        self.explained_variance_ratio
            .iter()
            .scan(0.0, |acc, r| {
                *acc += r;
                Some(*acc)
            })
            .collect()
    }

    /// Share of the total variance captured by all retained components.
    pub fn total_explained_ratio(&self) -> f64 {
        self.explained_variance_ratio.iter().sum()
    }
}

static_assertions::assert_impl_all!(PcaResult: Send, Sync);
