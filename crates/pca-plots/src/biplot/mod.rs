//! Biplot layout.
//!
//! [`layout_biplot`] turns a [`PcaResult`] into everything a renderer needs:
//! sample scores, the top feature arrows with their colors, a group legend,
//! the confidence ellipse and the axis limits.
//!
//! ```text
//! select_top_features → scale_loadings → assign_colors
//!     → confidence_ellipse → axis_bounds
//! ```

pub mod geometry;
pub mod loadings;

pub use geometry::{
    AxisBounds, ConfidenceEllipse, axis_bounds, confidence_ellipse, confidence_ellipse_size,
};
pub use loadings::{scale_loadings, select_top_features};

use crate::color::{Color, ColorAssignment, assign_colors};
use crate::config::BiplotOptions;
use crate::error::{PlotError, Result};
use crate::grouping::FeatureGroupMap;
use crate::ranking::component_axis_label;
use pca_core::PcaResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One feature arrow from the origin to `tip`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiplotArrow {
    /// Column of the feature in the analysis result.
    pub feature_index: usize,
    pub feature_name: String,
    pub group: String,
    /// Unscaled (PC1, PC2) loading.
    pub loading: [f64; 2],
    /// Loading scaled by the square root of each component's variance.
    pub tip: [f64; 2],
    pub color: Color,
}

/// Render-ready biplot geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiplotLayout {
    /// Sample scores on (PC1, PC2).
    pub scores: Vec<[f64; 2]>,
    /// Feature indices in arrow order (longest loading first).
    pub top_features: Vec<usize>,
    pub arrows: Vec<BiplotArrow>,
    pub legend: ColorAssignment,
    pub ellipse: ConfidenceEllipse,
    pub bounds: AxisBounds,
    /// Axis titles, e.g. `PC1 (42.5%)`.
    pub axis_labels: [String; 2],
    pub explained_variance_ratio: [f64; 2],
    /// Whether arrows are colored by feature group.
    pub grouped: bool,
}

static_assertions::assert_impl_all!(BiplotLayout: Send, Sync);

/// Compute the biplot of the first two components of `result`.
///
/// Arrows are colored by group when `group_map` is given and
/// `options.use_groups` is set; unmapped features form their own group.
/// Otherwise every arrow is its own group. `options.top_n` is capped at the
/// feature count. The first failing step aborts the layout.
pub fn layout_biplot(
    result: &PcaResult,
    group_map: Option<&FeatureGroupMap>,
    options: &BiplotOptions,
) -> Result<BiplotLayout> {
    options.validate()?;

    if result.n_components() < 2 {
        return Err(PlotError::InvalidParameter(format!(
            "biplot needs at least 2 components, result has {}",
            result.n_components()
        )));
    }

    let top_n = options.top_n.min(result.n_features());
    let top_features = select_top_features(&result.loadings, top_n)?;
    let scaled = scale_loadings(&result.loadings, &result.explained_variance, 2)?;

    let names: Vec<&str> = top_features
        .iter()
        .map(|&i| result.feature_names[i].as_str())
        .collect();

    let (groups, grouped) = match group_map {
        Some(map) if options.use_groups => (map.resolve(&names), true),
        _ => (names.iter().map(|n| n.trim().to_string()).collect(), false),
    };

    let legend = assign_colors(&groups, &options.palette, Some(&options.preferred_colors))?;

    let arrows = top_features
        .iter()
        .zip(groups)
        .map(|(&i, group)| -> Result<BiplotArrow> {
            let color = legend.get(&group).ok_or_else(|| {
                PlotError::InvalidParameter(format!("no color assigned to group '{group}'"))
            })?;
            Ok(BiplotArrow {
                feature_index: i,
                feature_name: result.feature_names[i].clone(),
                group,
                loading: [result.loadings[(i, 0)], result.loadings[(i, 1)]],
                tip: [scaled[(i, 0)], scaled[(i, 1)]],
                color,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let scores: Vec<[f64; 2]> = result
        .transformed_data
        .row_iter()
        .map(|row| [row[0], row[1]])
        .collect();

    let ellipse = confidence_ellipse(&scores, options.confidence)?;

    let extent: Vec<[f64; 2]> = scores
        .iter()
        .copied()
        .chain(arrows.iter().map(|a| a.tip))
        .collect();
    let bounds = axis_bounds(&extent, options.margin_fraction)?;

    let ratio = [
        result.explained_variance_ratio[0],
        result.explained_variance_ratio[1],
    ];

    debug!(
        "Biplot layout: {} scores, {} arrows, {} legend group(s), grouped = {}",
        scores.len(),
        arrows.len(),
        legend.len(),
        grouped
    );

    Ok(BiplotLayout {
        scores,
        top_features,
        arrows,
        legend,
        ellipse,
        bounds,
        axis_labels: [
            component_axis_label(0, ratio[0]),
            component_axis_label(1, ratio[1]),
        ],
        explained_variance_ratio: ratio,
        grouped,
    })
}
