//! Shared helpers for working with polars tables.

use polars::prelude::*;

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Column names of a DataFrame, in order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Canonical form of a feature name for group lookups: trimmed and lower-cased.
pub fn normalize_feature_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Read a numeric Series as `f64`, turning nulls and infinities into NaN.
///
/// Returns the values and how many of them were replaced.
pub fn series_to_f64_with_nan(series: &Series) -> PolarsResult<(Vec<f64>, usize)> {
    let float_series = series.cast(&DataType::Float64)?;
    let mut replaced = 0;
    let values = float_series
        .f64()?
        .into_iter()
        .map(|v| match v {
            Some(val) if val.is_finite() => val,
            Some(val) if val.is_nan() => val,
            _ => {
                replaced += 1;
                f64::NAN
            }
        })
        .collect();
    Ok((values, replaced))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float32));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_normalize_feature_name() {
        assert_eq!(normalize_feature_name("  Soil_pH "), "soil_ph");
        assert_eq!(normalize_feature_name("N"), "n");
    }

    #[test]
    fn test_series_to_f64_with_nan() {
        let series = Series::new(
            "yield".into(),
            &[Some(1.5), None, Some(f64::INFINITY), Some(f64::NEG_INFINITY), Some(3.0)],
        );
        let (values, replaced) = series_to_f64_with_nan(&series).unwrap();

        assert_eq!(replaced, 3);
        assert_eq!(values[0], 1.5);
        assert!(values[1].is_nan());
        assert!(values[2].is_nan());
        assert!(values[3].is_nan());
        assert_eq!(values[4], 3.0);
    }

    #[test]
    fn test_series_to_f64_casts_integers() {
        let series = Series::new("count".into(), &[1i64, 2, 3]);
        let (values, replaced) = series_to_f64_with_nan(&series).unwrap();
        assert_eq!(replaced, 0);
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }
}
