//! Feature arrow selection and scaling.

use crate::error::{PlotError, Result};
use crate::ranking::rank_descending;
use nalgebra::DMatrix;

/// Indices of the `n` features with the longest (PC1, PC2) loading vectors,
/// longest first. Equal lengths keep column order.
///
/// `loadings` is features × components and needs at least two components.
pub fn select_top_features(loadings: &DMatrix<f64>, n: usize) -> Result<Vec<usize>> {
    let (n_features, n_components) = loadings.shape();
    if n_components < 2 {
        return Err(PlotError::InvalidParameter(format!(
            "biplot needs at least 2 components, got {n_components}"
        )));
    }
    if n == 0 || n > n_features {
        return Err(PlotError::InvalidParameter(format!(
            "top feature count must be between 1 and {n_features}, got {n}"
        )));
    }

    let magnitudes: Vec<f64> = loadings
        .row_iter()
        .map(|row| row[0].hypot(row[1]))
        .collect();

    let mut order = rank_descending(&magnitudes);
    order.truncate(n);
    Ok(order)
}

/// Scale the first `k` loading columns by `sqrt(explained_variance[j])`.
///
/// `explained_variance` holds eigenvalues, not ratios. Returns a
/// features × `k` matrix.
pub fn scale_loadings(
    loadings: &DMatrix<f64>,
    explained_variance: &[f64],
    k: usize,
) -> Result<DMatrix<f64>> {
    let available = loadings.ncols().min(explained_variance.len());
    if k == 0 || k > available {
        return Err(PlotError::InvalidParameter(format!(
            "cannot scale {k} loading column(s), only {available} available"
        )));
    }
    if let Some(bad) = explained_variance[..k]
        .iter()
        .find(|v| !v.is_finite() || **v < 0.0)
    {
        return Err(PlotError::InvalidParameter(format!(
            "explained variance must be finite and non-negative, got {bad}"
        )));
    }

    let scale: Vec<f64> = explained_variance[..k].iter().map(|v| v.sqrt()).collect();
    Ok(DMatrix::from_fn(loadings.nrows(), k, |i, j| {
        loadings[(i, j)] * scale[j]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_top_features_by_magnitude() {
        let loadings = DMatrix::from_row_slice(3, 2, &[3.0, 4.0, 0.0, 0.0, 1.0, 1.0]);
        assert_eq!(select_top_features(&loadings, 2).unwrap(), vec![0, 2]);
    }

    #[test]
    fn test_top_features_ties_keep_column_order() {
        let loadings = DMatrix::from_row_slice(3, 2, &[0.0, 1.0, 0.6, 0.8, -1.0, 0.0]);
        assert_eq!(select_top_features(&loadings, 3).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_top_features_only_uses_first_two_components() {
        let loadings =
            DMatrix::from_row_slice(2, 3, &[0.1, 0.1, 9.0, 0.5, 0.5, 0.0]);
        assert_eq!(select_top_features(&loadings, 1).unwrap(), vec![1]);
    }

    #[test]
    fn test_top_features_bad_count() {
        let loadings = DMatrix::from_row_slice(3, 2, &[3.0, 4.0, 0.0, 0.0, 1.0, 1.0]);
        assert!(matches!(
            select_top_features(&loadings, 0),
            Err(PlotError::InvalidParameter(_))
        ));
        assert!(select_top_features(&loadings, 4).is_err());

        let one_component = DMatrix::from_row_slice(2, 1, &[1.0, 2.0]);
        assert!(select_top_features(&one_component, 1).is_err());
    }

    #[test]
    fn test_scale_uses_raw_variance() {
        let loadings = DMatrix::from_row_slice(2, 3, &[1.0, 0.5, 7.0, -1.0, 2.0, 7.0]);
        let scaled = scale_loadings(&loadings, &[4.0, 9.0, 1.0], 2).unwrap();

        assert_eq!(scaled.shape(), (2, 2));
        assert_relative_eq!(scaled[(0, 0)], 2.0);
        assert_relative_eq!(scaled[(0, 1)], 1.5);
        assert_relative_eq!(scaled[(1, 0)], -2.0);
        assert_relative_eq!(scaled[(1, 1)], 6.0);
    }

    #[test]
    fn test_scale_rejects_bad_input() {
        let loadings = DMatrix::from_row_slice(1, 2, &[1.0, 1.0]);
        assert!(scale_loadings(&loadings, &[1.0, 1.0], 3).is_err());
        assert!(scale_loadings(&loadings, &[1.0], 2).is_err());
        assert!(scale_loadings(&loadings, &[1.0, -1.0], 2).is_err());
        assert!(scale_loadings(&loadings, &[1.0, 1.0], 0).is_err());
    }
}
