use serde::Serialize;

use crate::data::model::{NormalizedRecord, NumericField};

/// Ordinary-least-squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegressionResult {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl RegressionResult {
    /// False when the fit is degenerate (empty input or constant x), in
    /// which case slope and intercept are not finite.
    pub fn is_defined(&self) -> bool {
        self.slope.is_finite() && self.intercept.is_finite()
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// OLS over one (x, y) field pair across all `records`.
pub fn linear_regression(
    records: &[NormalizedRecord],
    x: NumericField,
    y: NumericField,
) -> RegressionResult {
    fit_line(&x.values(records), &y.values(records))
}

/// OLS over paired slices. Degenerate inputs are not guarded: a zero slope
/// denominator yields non-finite results, see [`RegressionResult::is_defined`].
pub fn fit_line(xs: &[f64], ys: &[f64]) -> RegressionResult {
    let n = xs.len().min(ys.len());
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let nf = n as f64;

    let sum_x: f64 = xs.iter().sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_xy: f64 = xs.iter().zip(ys).map(|(x, y)| x * y).sum();
    let sum_x2: f64 = xs.iter().map(|x| x * x).sum();

    let slope = (nf * sum_xy - sum_x * sum_y) / (nf * sum_x2 - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / nf;

    let y_mean = sum_y / nf;
    let total_ss: f64 = ys.iter().map(|y| (y - y_mean).powi(2)).sum();
    let residual_ss: f64 = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (y - (slope * x + intercept)).powi(2))
        .sum();

    RegressionResult {
        slope,
        intercept,
        r_squared: 1.0 - residual_ss / total_ss,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    #[test]
    fn exact_line_fits_perfectly() {
        let fit = fit_line(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
        assert!((fit.slope - 2.0).abs() < 1e-9);
        assert!(fit.intercept.abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
        assert!(fit.is_defined());
        assert!((fit.predict(10.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn noisy_fit_has_partial_r_squared() {
        let fit = fit_line(&[1.0, 2.0, 3.0, 4.0], &[1.0, 3.0, 2.0, 4.0]);
        assert!((fit.slope - 0.8).abs() < 1e-9);
        assert!((fit.intercept - 0.5).abs() < 1e-9);
        assert!((fit.r_squared - 0.64).abs() < 1e-9);
    }

    #[test]
    fn constant_x_is_undefined() {
        let fit = fit_line(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]);
        assert!(!fit.is_defined());
        assert!(!fit_line(&[], &[]).is_defined());
    }

    #[test]
    fn regression_over_record_fields() {
        let records: Vec<_> = (1..=4)
            .map(|i| {
                let mut r = record(50_000.0 + 5_000.0 * i as f64);
                r.work_experience = i as f64;
                r
            })
            .collect();
        let fit = linear_regression(
            &records,
            NumericField::WorkExperience,
            NumericField::SalaryAt30,
        );
        assert!((fit.slope - 5_000.0).abs() < 1e-6);
        assert!((fit.intercept - 50_000.0).abs() < 1e-6);
    }
}
