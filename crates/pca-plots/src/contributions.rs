//! Top features of a single component.

use crate::error::{PlotError, Result};
use crate::ranking::rank_descending;
use pca_core::PcaResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub feature_index: usize,
    pub feature_name: String,
    /// Signed loading on the component.
    pub loading: f64,
    /// Squared loading over the component's total squared loading.
    pub share: f64,
}

/// The `n` features with the largest |loading| on `component` (0-based),
/// largest first. Equal magnitudes keep column order; `n` is capped at the
/// feature count.
pub fn top_features_for_component(
    result: &PcaResult,
    component: usize,
    n: usize,
) -> Result<Vec<FeatureContribution>> {
    if component >= result.n_components() {
        return Err(PlotError::InvalidParameter(format!(
            "component {component} out of range, result has {}",
            result.n_components()
        )));
    }
    if n == 0 {
        return Err(PlotError::InvalidParameter(
            "feature count must be at least 1".to_string(),
        ));
    }

    let column = result.loadings.column(component);
    let magnitudes: Vec<f64> = column.iter().map(|v| v.abs()).collect();
    let mass: f64 = column.iter().map(|v| v * v).sum();

    Ok(rank_descending(&magnitudes)
        .into_iter()
        .take(n)
        .map(|i| FeatureContribution {
            feature_index: i,
            feature_name: result.feature_names[i].clone(),
            loading: column[i],
            share: if mass > 0.0 { column[i] * column[i] / mass } else { 0.0 },
        })
        .collect())
}
