//! SVD-based principal component decomposition.

use crate::error::{PcaError, Result};
use crate::types::{PcaResult, StandardizedTable, TableShapes};
use nalgebra::{DMatrix, SVD};
use tracing::debug;

/// Decompose a standardized table into `n_components` principal components.
///
/// The thin SVD `X = U S Vᵀ` of the standardized matrix gives the principal
/// axes as rows of `Vᵀ`, ordered by descending singular value. Each axis is
/// flipped so its largest-magnitude entry is positive.
///
/// Shape bookkeeping is filled from the standardized table alone;
/// [`crate::analyze`] replaces it with the full pipeline history.
pub fn decompose(table: &StandardizedTable, n_components: usize) -> Result<PcaResult> {
    let (n_samples, n_features) = table.shape();

    if n_components == 0 {
        return Err(PcaError::InvalidParameter(
            "n_components must be at least 1".to_string(),
        ));
    }
    if n_components > n_features {
        return Err(PcaError::InvalidParameter(format!(
            "n_components ({n_components}) exceeds the number of features ({n_features})"
        )));
    }
    if n_samples < 2 {
        return Err(PcaError::InsufficientData(format!(
            "at least 2 samples are required, got {n_samples}"
        )));
    }
    if n_components > n_samples {
        return Err(PcaError::InsufficientData(format!(
            "n_components ({n_components}) exceeds the number of samples ({n_samples})"
        )));
    }

    let svd = SVD::try_new(table.data.clone(), false, true, f64::EPSILON, 0)
        .ok_or_else(|| PcaError::Decomposition("SVD did not converge".to_string()))?;
    let v_t = svd
        .v_t
        .ok_or_else(|| PcaError::Decomposition("SVD did not compute V^T".to_string()))?;
    let singular = svd.singular_values;

    let mut order: Vec<usize> = (0..singular.len()).collect();
    order.sort_by(|&a, &b| singular[b].total_cmp(&singular[a]));

    let mut components =
        DMatrix::from_fn(n_components, n_features, |i, j| v_t[(order[i], j)]);
    for mut row in components.row_iter_mut() {
        let mut pivot = 0.0_f64;
        for &value in row.iter() {
            if value.abs() > pivot.abs() {
                pivot = value;
            }
        }
        if pivot < 0.0 {
            row.neg_mut();
        }
    }

    let dof = (n_samples - 1) as f64;
    let all_variance: Vec<f64> = order.iter().map(|&i| singular[i].powi(2) / dof).collect();
    let total_variance: f64 = all_variance.iter().sum();
    if total_variance <= 0.0 || !total_variance.is_finite() {
        return Err(PcaError::Decomposition(format!(
            "total variance is {total_variance}"
        )));
    }

    let explained_variance = all_variance[..n_components].to_vec();
    let explained_variance_ratio: Vec<f64> = explained_variance
        .iter()
        .map(|v| v / total_variance)
        .collect();
    let singular_values = order[..n_components].iter().map(|&i| singular[i]).collect();

    let transformed_data = &table.data * components.transpose();
    let loadings = components.transpose();

    debug!(
        "Decomposed {} x {} matrix into {} component(s), explained variance ratio {:?}",
        n_samples, n_features, n_components, explained_variance_ratio
    );

    let shape = table.shape();
    Ok(PcaResult {
        transformed_data,
        components,
        loadings,
        explained_variance,
        explained_variance_ratio,
        singular_values,
        feature_names: table.feature_names.clone(),
        standardized_data: table.data.clone(),
        means: table.means.clone(),
        std_devs: table.std_devs.clone(),
        shapes: TableShapes {
            original: shape,
            selected: shape,
            numeric: shape,
            standardized: shape,
        },
        dropped_columns: Vec::new(),
        excluded_columns: Vec::new(),
    })
}
