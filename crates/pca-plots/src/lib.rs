//! Biplot Engine
//!
//! Turns a [`pca_core::PcaResult`] into render-ready plot data. Nothing here
//! draws; every function returns plain serializable values.
//!
//! # Overview
//!
//! - **Biplot**: top feature arrows, variance-scaled tips, group colors,
//!   confidence ellipse and axis bounds ([`layout_biplot`])
//! - **Scree**: per-component and cumulative explained variance ([`scree_data`])
//! - **Loadings heatmap**: features × components grid ([`loadings_heatmap`])
//! - **Top features**: largest contributions to one component
//!   ([`top_features_for_component`])
//! - **Session**: explicit state for interactive front ends ([`SessionState`])
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pca_core::{analyze, AnalysisOptions};
//! use pca_plots::{layout_biplot, BiplotOptions, FeatureGroupMap};
//!
//! let result = analyze(&df, &AnalysisOptions::default())?;
//! let groups = FeatureGroupMap::from_dataframe(&mapping)?;
//! let layout = layout_biplot(&result, Some(&groups), &BiplotOptions::default())?;
//!
//! for arrow in &layout.arrows {
//!     println!("{} -> {:?} ({})", arrow.feature_name, arrow.tip, arrow.color);
//! }
//! ```

pub mod biplot;
pub mod color;
pub mod config;
pub mod contributions;
pub mod error;
pub mod grouping;
pub mod heatmap;
mod ranking;
pub mod scree;
pub mod session;

pub use biplot::{
    AxisBounds, BiplotArrow, BiplotLayout, ConfidenceEllipse, axis_bounds, confidence_ellipse,
    confidence_ellipse_size, layout_biplot, scale_loadings, select_top_features,
};
pub use color::{Color, ColorAssignment, LegendEntry, MAX_PALETTE_COLORS, Palette, assign_colors};
pub use config::{BiplotOptions, BiplotOptionsBuilder, ConfigValidationError};
pub use contributions::{FeatureContribution, top_features_for_component};
pub use error::{PlotError, Result};
pub use grouping::FeatureGroupMap;
pub use heatmap::{LoadingsHeatmap, loadings_heatmap};
pub use ranking::component_label;
pub use scree::{ScreeData, scree_data};
pub use session::{AnalysisRecord, SessionState};
