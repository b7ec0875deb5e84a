//! Column standardization (population standard deviation).

use crate::error::{PcaError, Result};
use crate::types::{NumericTable, StandardizedTable};
use tracing::debug;

/// Scale every column to zero mean and unit variance.
///
/// Uses the population standard deviation (ddof = 0). A constant column, or
/// one whose spread is within rounding of its mean, fails with
/// [`PcaError::DegenerateColumn`]; a column still holding NaN fails with
/// [`PcaError::NonFiniteValues`].
pub fn standardize(numeric: &NumericTable) -> Result<StandardizedTable> {
    let (n_rows, n_cols) = numeric.shape();
    if n_rows < 2 {
        return Err(PcaError::InsufficientData(format!(
            "at least 2 rows are required to standardize, got {n_rows}"
        )));
    }

    let n = n_rows as f64;
    let mut data = numeric.data.clone();
    let mut means = Vec::with_capacity(n_cols);
    let mut std_devs = Vec::with_capacity(n_cols);

    for (name, mut column) in numeric.feature_names.iter().zip(data.column_iter_mut()) {
        let nan_count = column.iter().filter(|v| v.is_nan()).count();
        if nan_count > 0 {
            return Err(PcaError::NonFiniteValues {
                column: name.clone(),
                count: nan_count,
            });
        }

        let first = column[0];
        if column.iter().all(|&v| v == first) {
            return Err(PcaError::DegenerateColumn(name.clone()));
        }

        let mean = column.iter().sum::<f64>() / n;
        let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();

        // Spread at the level of the mean's summation error is noise.
        if std_dev <= n * f64::EPSILON * mean.abs() {
            return Err(PcaError::DegenerateColumn(name.clone()));
        }

        for value in column.iter_mut() {
            *value = (*value - mean) / std_dev;
        }
        means.push(mean);
        std_devs.push(std_dev);
    }

    debug!("Standardized {} x {} matrix", n_rows, n_cols);

    Ok(StandardizedTable {
        feature_names: numeric.feature_names.clone(),
        data,
        means,
        std_devs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    fn numeric(names: &[&str], rows: usize, column_major: Vec<f64>) -> NumericTable {
        NumericTable {
            feature_names: names.iter().map(|s| s.to_string()).collect(),
            data: DMatrix::from_vec(rows, names.len(), column_major),
            excluded_columns: Vec::new(),
            replaced_values: 0,
        }
    }

    #[test]
    fn test_columns_have_zero_mean_unit_variance() {
        let table = numeric(
            &["ph", "carbon"],
            4,
            vec![5.5, 6.0, 6.5, 8.0, 100.0, 250.0, 175.0, 30.0],
        );
        let standardized = standardize(&table).unwrap();

        for column in standardized.data.column_iter() {
            let mean = column.iter().sum::<f64>() / 4.0;
            let std = (column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / 4.0).sqrt();
            assert_relative_eq!(mean, 0.0, epsilon = 1e-12);
            assert_relative_eq!(std, 1.0, epsilon = 1e-12);
        }
        assert_eq!(standardized.feature_names, vec!["ph", "carbon"]);
        assert_relative_eq!(standardized.means[0], 6.5, epsilon = 1e-12);
    }

    #[test]
    fn test_population_standard_deviation() {
        // Values 1, 3: mean 2, population std 1.
        let table = numeric(&["x"], 2, vec![1.0, 3.0]);
        let standardized = standardize(&table).unwrap();

        assert_relative_eq!(standardized.std_devs[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(standardized.data[(0, 0)], -1.0, epsilon = 1e-12);
        assert_relative_eq!(standardized.data[(1, 0)], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_variance_column_is_rejected() {
        let table = numeric(&["ph", "depth"], 3, vec![5.0, 6.0, 7.0, 0.1, 0.1, 0.1]);
        let error = standardize(&table).unwrap_err();

        match error {
            PcaError::DegenerateColumn(column) => assert_eq!(column, "depth"),
            other => panic!("expected DegenerateColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_long_constant_columns_are_rejected() {
        for (rows, value) in [(50, 2.9), (200, 0.7), (500, 6.3), (1000, 0.1)] {
            let ph: Vec<f64> = (0..rows).map(|i| 5.0 + (i % 7) as f64 * 0.3).collect();
            let mut values = ph;
            values.extend(std::iter::repeat_n(value, rows));
            let table = numeric(&["ph", "irrigated"], rows, values);

            match standardize(&table).unwrap_err() {
                PcaError::DegenerateColumn(column) => assert_eq!(column, "irrigated"),
                other => panic!("expected DegenerateColumn for {rows} rows, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_near_constant_noise_is_rejected() {
        // One ulp of spread around a large mean.
        let base = 1.0e6_f64;
        let bumped = f64::from_bits(base.to_bits() + 1);
        let mut values = vec![base; 99];
        values.push(bumped);
        let table = numeric(&["elevation"], 100, values);

        assert!(matches!(
            standardize(&table).unwrap_err(),
            PcaError::DegenerateColumn(_)
        ));
    }

    #[test]
    fn test_small_magnitude_column_is_kept() {
        let table = numeric(&["depth"], 4, vec![1e-17, 2e-17, 3e-17, 4e-17]);
        let standardized = standardize(&table).unwrap();

        let column = standardized.data.column(0);
        let mean = column.iter().sum::<f64>() / 4.0;
        let std = (column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / 4.0).sqrt();
        assert_relative_eq!(mean, 0.0, epsilon = 1e-12);
        assert_relative_eq!(std, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nan_column_is_rejected() {
        let table = numeric(&["ph"], 3, vec![5.0, f64::NAN, 7.0]);
        let error = standardize(&table).unwrap_err();
        assert!(matches!(
            error,
            PcaError::NonFiniteValues { count: 1, .. }
        ));
    }

    #[test]
    fn test_single_row_is_rejected() {
        let table = numeric(&["ph"], 1, vec![5.0]);
        assert!(matches!(
            standardize(&table).unwrap_err(),
            PcaError::InsufficientData(_)
        ));
    }
}
