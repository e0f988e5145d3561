//! Repeat-run statistics
//!
//! Thin wrappers over `statrs` so the averaging code reads in domain terms.
//! Standard deviations are population values (divide by N): a speed group
//! is the complete set of repeats, not a sample of a larger population.

use statrs::statistics::Statistics;

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().mean()
}

/// Population standard deviation. Returns 0.0 for an empty slice.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().population_std_dev()
}

/// Ordinary least-squares line through (x, y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub intercept: f64,
    pub slope: f64,
    pub r_squared: f64,
}

/// Fit y = intercept + slope × x by ordinary least squares.
///
/// Returns `None` when fewer than two pairs are given or when x has no
/// spread. R² is clamped to 0..1 and is 1.0 when y has no spread.
pub fn linear_regression(x: &[f64], y: &[f64]) -> Option<LinearFit> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let x_mean = mean(x);
    let y_mean = mean(y);

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut ss_tot = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        sum_xy += (xi - x_mean) * (yi - y_mean);
        sum_xx += (xi - x_mean) * (xi - x_mean);
        ss_tot += (yi - y_mean) * (yi - y_mean);
    }

    if sum_xx.abs() < 1e-30 {
        return None;
    }

    let slope = sum_xy / sum_xx;
    let intercept = y_mean - slope * x_mean;

    let ss_res: f64 = x
        .iter()
        .zip(y)
        .map(|(&xi, &yi)| {
            let predicted = intercept + slope * xi;
            (yi - predicted) * (yi - predicted)
        })
        .sum();

    let r_squared = if ss_tot.abs() < 1e-30 {
        1.0
    } else {
        (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
    };

    Some(LinearFit {
        intercept,
        slope,
        r_squared,
    })
}
