//! Loadings heatmap data.

use crate::error::Result;
use crate::ranking::component_label;
use nalgebra::DMatrix;
use pca_core::PcaResult;
use serde::{Deserialize, Serialize};

use crate::biplot::select_top_features;

/// Features × components grid of loadings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingsHeatmap {
    pub feature_names: Vec<String>,
    pub component_labels: Vec<String>,
    /// One row per entry of `feature_names`.
    pub values: DMatrix<f64>,
    /// Largest |loading|; the color scale spans `[-value_limit, value_limit]`.
    pub value_limit: f64,
}

/// Heatmap of all features, or of the `top_n` features with the longest
/// (PC1, PC2) loadings in rank order. `top_n` above the feature count is
/// capped.
pub fn loadings_heatmap(result: &PcaResult, top_n: Option<usize>) -> Result<LoadingsHeatmap> {
    let rows: Vec<usize> = match top_n {
        Some(n) => select_top_features(&result.loadings, n.min(result.n_features()))?,
        None => (0..result.n_features()).collect(),
    };

    let k = result.n_components();
    let values = DMatrix::from_fn(rows.len(), k, |i, j| result.loadings[(rows[i], j)]);
    let value_limit = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));

    Ok(LoadingsHeatmap {
        feature_names: rows
            .iter()
            .map(|&i| result.feature_names[i].clone())
            .collect(),
        component_labels: (0..k).map(component_label).collect(),
        values,
        value_limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlotError;
    use pca_core::{AnalysisOptions, analyze};
    use polars::prelude::*;
    use pretty_assertions::assert_eq;

    fn result() -> PcaResult {
        let df = df![
            "ph" => [6.1, 6.8, 7.2, 5.9, 6.5, 7.0],
            "clay" => [22.0, 30.0, 18.5, 25.0, 28.0, 19.0],
            "sand" => [60.0, 48.0, 66.0, 55.0, 50.0, 64.0],
        ]
        .unwrap();
        analyze(&df, &AnalysisOptions::default()).unwrap()
    }

    #[test]
    fn test_full_heatmap() {
        let result = result();
        let heatmap = loadings_heatmap(&result, None).unwrap();

        assert_eq!(heatmap.feature_names, result.feature_names);
        assert_eq!(heatmap.component_labels, vec!["PC1", "PC2"]);
        assert_eq!(heatmap.values, result.loadings);
        assert!(heatmap.values.iter().all(|v| v.abs() <= heatmap.value_limit));
        assert!(heatmap.values.iter().any(|v| v.abs() == heatmap.value_limit));
    }

    #[test]
    fn test_top_n_rows_follow_rank() {
        let result = result();
        let heatmap = loadings_heatmap(&result, Some(2)).unwrap();
        let expected: Vec<String> = select_top_features(&result.loadings, 2)
            .unwrap()
            .into_iter()
            .map(|i| result.feature_names[i].clone())
            .collect();

        assert_eq!(heatmap.values.nrows(), 2);
        assert_eq!(heatmap.feature_names, expected);
        assert_eq!(loadings_heatmap(&result, Some(50)).unwrap().values.nrows(), 3);
    }

    #[test]
    fn test_zero_rows_is_rejected() {
        assert!(matches!(
            loadings_heatmap(&result(), Some(0)),
            Err(PlotError::InvalidParameter(_))
        ));
    }
}
