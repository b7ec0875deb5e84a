//! Feature → group mapping used to color biplot arrows.

use crate::error::{PlotError, Result};
use pca_core::normalize_feature_name;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Header of the feature column in a mapping table.
pub const FEATURE_COLUMN: &str = "Feature";
/// Header of the group column in a mapping table.
pub const GROUP_COLUMN: &str = "Group";
/// Appended to an unmapped feature's name when it would collide with a group.
pub const UNGROUPED_SUFFIX: &str = " (ungrouped)";

/// Maps normalized feature names (trimmed, lower-cased) to group labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureGroupMap {
    groups: BTreeMap<String, String>,
}

impl FeatureGroupMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from `(feature, group)` pairs. Later pairs win; pairs with a
    /// blank feature or group are skipped.
    pub fn from_pairs<I, F, G>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, G)>,
        F: AsRef<str>,
        G: AsRef<str>,
    {
        let mut map = Self::new();
        for (feature, group) in pairs {
            map.insert(feature.as_ref(), group.as_ref());
        }
        map
    }

    /// Read a two-column `Feature`/`Group` table. Header matching ignores case
    /// and surrounding whitespace.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let feature = find_column(df, FEATURE_COLUMN)?;
        let group = find_column(df, GROUP_COLUMN)?;

        let features = feature.cast(&DataType::String)?;
        let groups = group.cast(&DataType::String)?;

        let pairs = features
            .str()?
            .into_iter()
            .zip(groups.str()?.into_iter())
            .filter_map(|(f, g)| Some((f?, g?)));
        let map = Self::from_pairs(pairs);

        debug!(
            "Loaded {} feature group mapping(s) from {} row(s)",
            map.len(),
            df.height()
        );
        Ok(map)
    }

    /// Insert or replace one mapping. Returns false when either side is blank.
    pub fn insert(&mut self, feature: &str, group: &str) -> bool {
        let key = normalize_feature_name(feature);
        let group = group.trim();
        if key.is_empty() || group.is_empty() {
            return false;
        }
        self.groups.insert(key, group.to_string());
        true
    }

    /// Group of a feature, if mapped.
    pub fn group_for(&self, feature: &str) -> Option<&str> {
        self.groups
            .get(&normalize_feature_name(feature))
            .map(String::as_str)
    }

    /// Group label for every feature, falling back to the feature's own
    /// (trimmed) name when unmapped. An unmapped feature whose name equals a
    /// mapped group label gets `"<name> (ungrouped)"` so it keeps a legend
    /// entry of its own. The map itself is left unchanged.
    pub fn resolve<S: AsRef<str>>(&self, features: &[S]) -> Vec<String> {
        let labels: HashSet<&str> = self.groups.values().map(String::as_str).collect();
        features
            .iter()
            .map(|f| {
                let feature = f.as_ref();
                match self.group_for(feature) {
                    Some(group) => group.to_string(),
                    None => {
                        let name = feature.trim();
                        if labels.contains(name) {
                            format!("{name}{UNGROUPED_SUFFIX}")
                        } else {
                            name.to_string()
                        }
                    }
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.groups.iter().map(|(f, g)| (f.as_str(), g.as_str()))
    }
}

fn find_column<'a>(df: &'a DataFrame, wanted: &str) -> Result<&'a Series> {
    df.get_columns()
        .iter()
        .find(|c| c.name().trim().eq_ignore_ascii_case(wanted))
        .map(|c| c.as_materialized_series())
        .ok_or_else(|| PlotError::MissingColumn(wanted.to_string()))
}
