//! The analysis pipeline.
//!
//! ```text
//! DataFrame ─► select_columns ─► extract_numeric ─► standardize ─► decompose ─► PcaResult
//! ```
//!
//! Each step is a public function so callers can run them individually.
//! [`analyze`] runs them in order and wraps the first failure in
//! [`PcaError::Analysis`] with the stage it came from.

mod decompose;
mod numeric;
mod selection;
mod standardize;

pub use decompose::decompose;
pub use numeric::extract_numeric;
pub use selection::select_columns;
pub use standardize::standardize;

use crate::config::AnalysisOptions;
use crate::error::{AnalysisStage, PcaError, Result, ResultExt};
use crate::types::{PcaResult, TableShapes};
use polars::prelude::*;
use tracing::debug;

/// Run the full pipeline on `table`.
///
/// The table is never modified. On success the result carries the shape of
/// the table after every stage plus the dropped and excluded column names.
pub fn analyze(table: &DataFrame, options: &AnalysisOptions) -> Result<PcaResult> {
    options
        .validate()
        .map_err(PcaError::from)
        .stage(AnalysisStage::Validation)?;

    let original = table.shape();
    debug!(
        "Starting analysis on {} x {} table with {} component(s)",
        original.0, original.1, options.n_components
    );

    let selection = select_columns(
        table,
        &options.columns_to_drop,
        &options.default_columns_to_drop,
    )
    .stage(AnalysisStage::ColumnSelection)?;
    let numeric = extract_numeric(&selection.table).stage(AnalysisStage::NumericExtraction)?;
    let standardized = standardize(&numeric).stage(AnalysisStage::Standardization)?;
    let mut result =
        decompose(&standardized, options.n_components).stage(AnalysisStage::Decomposition)?;

    result.shapes = TableShapes {
        original,
        selected: selection.table.shape(),
        numeric: numeric.shape(),
        standardized: standardized.shape(),
    };
    result.dropped_columns = selection.dropped;
    result.excluded_columns = numeric.excluded_columns;

    debug!(
        "Analysis complete: {} feature(s), {:.1}% of variance retained",
        result.n_features(),
        result.total_explained_ratio() * 100.0
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn plot_frame() -> DataFrame {
        df![
            "Site" => ["n1", "n2", "s1", "s2", "e1"],
            "ph" => [5.9, 6.4, 7.1, 6.8, 6.0],
            "carbon" => [2.1, 2.4, 1.2, 1.5, 2.0],
            "clay" => [18.0, 22.0, 35.0, 30.0, 20.0],
            "crop" => ["maize", "maize", "wheat", "wheat", "oat"],
        ]
        .unwrap()
    }

    #[test]
    fn test_analyze_records_diagnostics() {
        let options = AnalysisOptions::builder().n_components(2).build().unwrap();
        let result = analyze(&plot_frame(), &options).unwrap();

        assert_eq!(result.feature_names, vec!["ph", "carbon", "clay"]);
        assert_eq!(result.dropped_columns, vec!["Site"]);
        assert_eq!(result.excluded_columns, vec!["crop"]);
        assert_eq!(
            result.shapes,
            TableShapes {
                original: (5, 5),
                selected: (5, 4),
                numeric: (5, 3),
                standardized: (5, 3),
            }
        );
    }

    #[test]
    fn test_analyze_wraps_stage_errors() {
        let options = AnalysisOptions::builder()
            .drop_column("nonexistent")
            .build()
            .unwrap();
        let error = analyze(&plot_frame(), &options).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Analysis);
        assert_eq!(error.root_kind(), ErrorKind::Configuration);
        match error {
            PcaError::Analysis { stage, source } => {
                assert_eq!(stage, AnalysisStage::ColumnSelection);
                assert!(source.to_string().contains("nonexistent"));
            }
            other => panic!("expected analysis wrapper, got {other:?}"),
        }
    }

    #[test]
    fn test_analyze_rejects_invalid_options() {
        let options = AnalysisOptions {
            n_components: 0,
            ..AnalysisOptions::default()
        };
        let error = analyze(&plot_frame(), &options).unwrap_err();
        assert!(matches!(
            error,
            PcaError::Analysis {
                stage: AnalysisStage::Validation,
                ..
            }
        ));
    }

    #[test]
    fn test_analyze_component_count_above_features() {
        let options = AnalysisOptions::builder().n_components(4).build().unwrap();
        let error = analyze(&plot_frame(), &options).unwrap_err();
        assert_eq!(error.root_kind(), ErrorKind::Configuration);
        assert_eq!(error.error_code(), "INVALID_PARAMETER");
    }
}
