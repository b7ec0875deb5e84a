//! Explicit session state for an interactive front end.
//!
//! [`SessionState`] holds the current options, the last successful analysis
//! and the feature group map. Each successful [`SessionState::run_analysis`]
//! replaces the stored result as a whole; a failed run leaves it untouched.

use crate::biplot::{BiplotLayout, layout_biplot};
use crate::config::BiplotOptions;
use crate::contributions::{FeatureContribution, top_features_for_component};
use crate::error::{PlotError, Result};
use crate::grouping::FeatureGroupMap;
use crate::heatmap::{LoadingsHeatmap, loadings_heatmap};
use crate::scree::{ScreeData, scree_data};
use chrono::{DateTime, Utc};
use pca_core::{AnalysisOptions, PcaResult, analyze};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A finished analysis together with the options that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub result: PcaResult,
    pub options: AnalysisOptions,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub analysis_options: AnalysisOptions,
    pub biplot_options: BiplotOptions,
    record: Option<AnalysisRecord>,
    group_map: Option<FeatureGroupMap>,
}

impl SessionState {
    pub fn new(analysis_options: AnalysisOptions, biplot_options: BiplotOptions) -> Self {
        Self {
            analysis_options,
            biplot_options,
            record: None,
            group_map: None,
        }
    }

    /// Analyze `table` with the current options and store the result.
    pub fn run_analysis(&mut self, table: &DataFrame) -> Result<&PcaResult> {
        let result = analyze(table, &self.analysis_options)?;
        debug!(
            "Session analysis replaced (previous result: {})",
            self.record.is_some()
        );

        let record = self.record.insert(AnalysisRecord {
            result,
            options: self.analysis_options.clone(),
            completed_at: Utc::now(),
        });
        Ok(&record.result)
    }

    pub fn result(&self) -> Option<&PcaResult> {
        self.record.as_ref().map(|r| &r.result)
    }

    pub fn record(&self) -> Option<&AnalysisRecord> {
        self.record.as_ref()
    }

    pub fn clear_result(&mut self) {
        self.record = None;
    }

    pub fn group_map(&self) -> Option<&FeatureGroupMap> {
        self.group_map.as_ref()
    }

    pub fn set_group_map(&mut self, map: FeatureGroupMap) {
        self.group_map = Some(map);
    }

    /// Replace the group map with one read from a `Feature`/`Group` table.
    /// On error the current map is kept.
    pub fn load_group_map(&mut self, table: &DataFrame) -> Result<&FeatureGroupMap> {
        let map = FeatureGroupMap::from_dataframe(table)?;
        Ok(&*self.group_map.insert(map))
    }

    pub fn clear_group_map(&mut self) {
        self.group_map = None;
    }

    fn require_result(&self) -> Result<&PcaResult> {
        self.result().ok_or(PlotError::NoResult)
    }

    pub fn biplot(&self) -> Result<BiplotLayout> {
        layout_biplot(
            self.require_result()?,
            self.group_map.as_ref(),
            &self.biplot_options,
        )
    }

    pub fn scree(&self) -> Result<ScreeData> {
        Ok(scree_data(self.require_result()?))
    }

    pub fn heatmap(&self, top_n: Option<usize>) -> Result<LoadingsHeatmap> {
        loadings_heatmap(self.require_result()?, top_n)
    }

    pub fn top_features(&self, component: usize, n: usize) -> Result<Vec<FeatureContribution>> {
        top_features_for_component(self.require_result()?, component, n)
    }
}
