//! Numeric column extraction.

use crate::error::{PcaError, Result};
use crate::types::NumericTable;
use crate::utils::{is_numeric_dtype, series_to_f64_with_nan};
use nalgebra::DMatrix;
use polars::prelude::*;
use tracing::debug;

/// Keep the integer and float columns of `table` as an `f64` matrix.
///
/// Non-numeric columns are recorded in `excluded_columns`. Nulls and
/// infinities become NaN. Fails with [`PcaError::InsufficientData`] when no
/// numeric column is left.
pub fn extract_numeric(table: &DataFrame) -> Result<NumericTable> {
    let n_rows = table.height();
    let mut feature_names = Vec::new();
    let mut excluded_columns = Vec::new();
    let mut values: Vec<f64> = Vec::with_capacity(n_rows * table.width());
    let mut replaced_values = 0;

    for column in table.get_columns() {
        if !is_numeric_dtype(column.dtype()) {
            excluded_columns.push(column.name().to_string());
            continue;
        }

        let (column_values, replaced) = series_to_f64_with_nan(column.as_materialized_series())?;
        replaced_values += replaced;
        values.extend(column_values);
        feature_names.push(column.name().to_string());
    }

    if feature_names.is_empty() {
        return Err(PcaError::InsufficientData(format!(
            "no numeric columns remain after filtering ({} non-numeric column(s) excluded)",
            excluded_columns.len()
        )));
    }

    debug!(
        "Extracted {} numeric column(s), excluded {:?}, replaced {} missing/infinite value(s)",
        feature_names.len(),
        excluded_columns,
        replaced_values
    );

    // Columns were appended one after another, which is nalgebra's storage order.
    let data = DMatrix::from_vec(n_rows, feature_names.len(), values);

    Ok(NumericTable {
        feature_names,
        data,
        excluded_columns,
        replaced_values,
    })
}
