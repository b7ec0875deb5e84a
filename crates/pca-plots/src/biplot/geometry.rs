//! Confidence ellipse and axis limits.

use crate::error::{PlotError, Result};
use nalgebra::{Matrix2, SymmetricEigen};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// An ellipse ready to draw: full axis lengths, rotation of the width axis
/// from +x in degrees, within (-90, 90].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceEllipse {
    pub center: [f64; 2],
    pub width: f64,
    pub height: f64,
    pub angle_degrees: f64,
}

/// Visible plot region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl AxisBounds {
    pub fn contains(&self, point: [f64; 2]) -> bool {
        (self.x_min..=self.x_max).contains(&point[0])
            && (self.y_min..=self.y_max).contains(&point[1])
    }
}

fn chi_squared_2_quantile(confidence: f64) -> Result<f64> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(PlotError::InvalidParameter(format!(
            "confidence must be strictly between 0 and 1, got {confidence}"
        )));
    }
    let distribution =
        ChiSquared::new(2.0).map_err(|e| PlotError::InvalidParameter(e.to_string()))?;
    Ok(distribution.inverse_cdf(confidence))
}

/// Ellipse axis lengths for variances `eigvals` along x and y:
/// `2 * sqrt(λ * q)` where `q` is the χ²(2) quantile at `confidence`.
///
/// This is a visual reference region, not an outlier test.
pub fn confidence_ellipse_size(eigvals: [f64; 2], confidence: f64) -> Result<(f64, f64)> {
    if eigvals.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(PlotError::InvalidParameter(format!(
            "ellipse eigenvalues must be finite and non-negative, got {eigvals:?}"
        )));
    }
    let q = chi_squared_2_quantile(confidence)?;
    Ok((2.0 * (eigvals[0] * q).sqrt(), 2.0 * (eigvals[1] * q).sqrt()))
}

/// Confidence ellipse of a 2D point cloud from its sample covariance.
pub fn confidence_ellipse(points: &[[f64; 2]], confidence: f64) -> Result<ConfidenceEllipse> {
    if points.len() < 2 {
        return Err(PlotError::InvalidParameter(format!(
            "confidence ellipse needs at least 2 points, got {}",
            points.len()
        )));
    }
    ensure_finite(points)?;

    let n = points.len() as f64;
    let cx = points.iter().map(|p| p[0]).sum::<f64>() / n;
    let cy = points.iter().map(|p| p[1]).sum::<f64>() / n;

    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for p in points {
        let dx = p[0] - cx;
        let dy = p[1] - cy;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }
    let covariance = Matrix2::new(sxx, sxy, sxy, syy) / (n - 1.0);

    let eigen = SymmetricEigen::new(covariance);
    let (major, minor) = if eigen.eigenvalues[0] >= eigen.eigenvalues[1] {
        (0, 1)
    } else {
        (1, 0)
    };
    // Round-off can leave a flat cloud with a tiny negative eigenvalue.
    let eigvals = [
        eigen.eigenvalues[major].max(0.0),
        eigen.eigenvalues[minor].max(0.0),
    ];
    let (width, height) = confidence_ellipse_size(eigvals, confidence)?;

    let axis = eigen.eigenvectors.column(major);
    let mut angle_degrees = axis[1].atan2(axis[0]).to_degrees();
    if angle_degrees > 90.0 {
        angle_degrees -= 180.0;
    } else if angle_degrees <= -90.0 {
        angle_degrees += 180.0;
    }

    Ok(ConfidenceEllipse {
        center: [cx, cy],
        width,
        height,
        angle_degrees,
    })
}

/// Tight bounds of `points`, padded on every side by `margin_fraction` times
/// the larger of the two ranges. A single point gets a unit range.
pub fn axis_bounds(points: &[[f64; 2]], margin_fraction: f64) -> Result<AxisBounds> {
    if points.is_empty() {
        return Err(PlotError::InvalidParameter(
            "cannot compute axis bounds of an empty point set".to_string(),
        ));
    }
    if !margin_fraction.is_finite() || margin_fraction < 0.0 {
        return Err(PlotError::InvalidParameter(format!(
            "margin fraction must be finite and non-negative, got {margin_fraction}"
        )));
    }
    ensure_finite(points)?;

    let fold = |axis: usize| {
        points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p[axis]), hi.max(p[axis]))
        })
    };
    let (x_min, x_max) = fold(0);
    let (y_min, y_max) = fold(1);

    let mut range = (x_max - x_min).max(y_max - y_min);
    if range == 0.0 {
        range = 1.0;
    }
    let pad = margin_fraction * range;

    Ok(AxisBounds {
        x_min: x_min - pad,
        x_max: x_max + pad,
        y_min: y_min - pad,
        y_max: y_max + pad,
    })
}

fn ensure_finite(points: &[[f64; 2]]) -> Result<()> {
    match points.iter().position(|p| !p[0].is_finite() || !p[1].is_finite()) {
        Some(i) => Err(PlotError::InvalidParameter(format!(
            "point {i} has a non-finite coordinate"
        ))),
        None => Ok(()),
    }
}
