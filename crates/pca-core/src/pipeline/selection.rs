//! Column selection: user and default drop lists.

use crate::error::{PcaError, Result};
use crate::types::ColumnSelection;
use crate::utils::column_names;
use polars::prelude::*;
use std::collections::HashSet;
use tracing::debug;

/// Remove the requested columns from a copy of `table`.
///
/// Every name in `drop_cols` must exist (exact match); missing ones fail with
/// [`PcaError::MissingColumns`] listing exactly those names in request order.
/// Names in `default_drop_cols` are matched case-insensitively and skipped
/// silently when absent.
pub fn select_columns<S, D>(
    table: &DataFrame,
    drop_cols: &[S],
    default_drop_cols: &[D],
) -> Result<ColumnSelection>
where
    S: AsRef<str>,
    D: AsRef<str>,
{
    let names = column_names(table);
    let present: HashSet<&str> = names.iter().map(String::as_str).collect();

    let mut missing: Vec<String> = Vec::new();
    for name in drop_cols.iter().map(|name| name.as_ref()) {
        if !present.contains(name) && !missing.iter().any(|m| m == name) {
            missing.push(name.to_string());
        }
    }
    if !missing.is_empty() {
        return Err(PcaError::MissingColumns(missing));
    }

    let user: HashSet<&str> = drop_cols.iter().map(|name| name.as_ref()).collect();
    let defaults: HashSet<String> = default_drop_cols
        .iter()
        .map(|name| name.as_ref().trim().to_lowercase())
        .collect();

    let (dropped, kept): (Vec<String>, Vec<String>) = names
        .into_iter()
        .partition(|name| user.contains(name.as_str()) || defaults.contains(&name.to_lowercase()));

    debug!(
        "Dropping {} column(s), keeping {}: {:?}",
        dropped.len(),
        kept.len(),
        dropped
    );

    let table = table.select(kept)?;
    Ok(ColumnSelection { table, dropped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn survey_frame() -> DataFrame {
        df![
            "SampleID" => ["s1", "s2", "s3"],
            "ph" => [6.1, 6.8, 7.2],
            "nitrogen" => [12.0, 15.5, 9.3],
            "label" => ["wet", "dry", "wet"],
        ]
        .unwrap()
    }

    #[test]
    fn test_drops_user_and_default_columns() {
        let df = survey_frame();
        let selection = select_columns(&df, &["label"], &["sampleid", "Latitude"]).unwrap();

        assert_eq!(selection.dropped, vec!["SampleID", "label"]);
        assert_eq!(column_names(&selection.table), vec!["ph", "nitrogen"]);
        // Input is untouched.
        assert_eq!(df.width(), 4);
    }

    #[test]
    fn test_missing_user_column_is_an_error() {
        let df = survey_frame();
        let error = select_columns(&df, &["nonexistent"], &[] as &[&str]).unwrap_err();

        match error {
            PcaError::MissingColumns(columns) => assert_eq!(columns, vec!["nonexistent"]),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_columns_listed_once_in_request_order() {
        let df = survey_frame();
        let error = select_columns(&df, &["zinc", "label", "copper", "zinc"], &[] as &[&str])
            .unwrap_err();

        match error {
            PcaError::MissingColumns(columns) => assert_eq!(columns, vec!["zinc", "copper"]),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_user_drop_is_case_sensitive() {
        let df = survey_frame();
        let error = select_columns(&df, &["Label"], &[] as &[&str]).unwrap_err();
        assert!(matches!(error, PcaError::MissingColumns(_)));
    }

    #[test]
    fn test_no_drops_keeps_everything() {
        let df = survey_frame();
        let selection = select_columns(&df, &[] as &[&str], &[] as &[&str]).unwrap();
        assert!(selection.dropped.is_empty());
        assert_eq!(selection.table.shape(), df.shape());
    }
}
