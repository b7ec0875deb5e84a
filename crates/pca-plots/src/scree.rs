//! Scree plot data.

use crate::ranking::component_label;
use pca_core::PcaResult;
use serde::{Deserialize, Serialize};

/// Per-component variance series for a scree chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeData {
    /// `PC1`..`PCk`
    pub labels: Vec<String>,
    pub explained_variance_ratio: Vec<f64>,
    /// Ratios × 100, for bar annotations.
    pub percentages: Vec<f64>,
    /// Running total of the ratios; non-decreasing.
    pub cumulative_ratio: Vec<f64>,
}

impl ScreeData {
    /// Smallest number of components whose cumulative ratio reaches
    /// `threshold`, or `None` when the kept components fall short.
    pub fn components_for_variance(&self, threshold: f64) -> Option<usize> {
        self.cumulative_ratio
            .iter()
            .position(|&c| c >= threshold)
            .map(|i| i + 1)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

pub fn scree_data(result: &PcaResult) -> ScreeData {
    let ratios = result.explained_variance_ratio.clone();
    ScreeData {
        labels: (0..ratios.len()).map(component_label).collect(),
        percentages: ratios.iter().map(|r| r * 100.0).collect(),
        cumulative_ratio: result.cumulative_variance_ratio(),
        explained_variance_ratio: ratios,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pca_core::{AnalysisOptions, analyze};
    use polars::prelude::*;
    use pretty_assertions::assert_eq;

    fn result() -> PcaResult {
        let df = df![
            "a" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            "b" => [2.1, 3.9, 6.2, 8.1, 9.8, 12.2],
            "c" => [5.0, 3.0, 4.0, 1.0, 2.0, 0.5],
        ]
        .unwrap();
        let options = AnalysisOptions::builder().n_components(3).build().unwrap();
        analyze(&df, &options).unwrap()
    }

    #[test]
    fn test_scree_series() {
        let scree = scree_data(&result());

        assert_eq!(scree.labels, vec!["PC1", "PC2", "PC3"]);
        assert!(scree.cumulative_ratio.windows(2).all(|w| w[0] <= w[1]));
        assert_relative_eq!(scree.cumulative_ratio[2], 1.0, epsilon = 1e-10);
        for (p, r) in scree.percentages.iter().zip(&scree.explained_variance_ratio) {
            assert_relative_eq!(*p, r * 100.0);
        }
    }

    #[test]
    fn test_components_for_variance() {
        let scree = scree_data(&result());

        assert_eq!(scree.components_for_variance(0.0), Some(1));
        assert_eq!(scree.components_for_variance(0.999_999), Some(3));
        assert_eq!(scree.components_for_variance(1.5), None);
    }
}
