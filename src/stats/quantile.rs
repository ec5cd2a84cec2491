use serde::Serialize;

use super::grouping::first_seen_groups;
use crate::data::model::{CategoricalField, NormalizedRecord, NumericField};

/// Whisker reach, in multiples of the IQR.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Type-7 quantile of ascending-sorted values: index `p * (n - 1)`,
/// linearly interpolated between the bracketing elements.
///
/// Returns NaN for an empty slice. `p` is clamped to `[0, 1]`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Five-number summary plus outliers for one box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotSummary {
    pub group: &'static str,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_min: f64,
    pub whisker_max: f64,
    /// Values strictly outside the whiskers, ascending.
    pub outliers: Vec<f64>,
    /// Every value of the group, ascending.
    pub values: Vec<f64>,
    pub mean: f64,
}

impl BoxPlotSummary {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Box summary of a single group's values (any order).
pub fn box_plot_summary(group: &'static str, values: &[f64]) -> BoxPlotSummary {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile_sorted(&sorted, 0.25);
    let median = quantile_sorted(&sorted, 0.5);
    let q3 = quantile_sorted(&sorted, 0.75);
    let iqr = q3 - q1;

    let (min, max) = match (sorted.first(), sorted.last()) {
        (Some(&min), Some(&max)) => (min, max),
        _ => (f64::NAN, f64::NAN),
    };
    let whisker_min = min.max(q1 - WHISKER_IQR_FACTOR * iqr);
    let whisker_max = max.min(q3 + WHISKER_IQR_FACTOR * iqr);

    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < whisker_min || *v > whisker_max)
        .collect();
    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;

    BoxPlotSummary {
        group,
        q1,
        median,
        q3,
        whisker_min,
        whisker_max,
        outliers,
        values: sorted,
        mean,
    }
}

/// One box per observed label of `group_field`, in first-seen order.
pub fn box_plot_summaries(
    records: &[NormalizedRecord],
    group_field: CategoricalField,
    value_field: NumericField,
) -> Vec<BoxPlotSummary> {
    first_seen_groups(records, group_field, |_, record| value_field.value(record))
        .into_iter()
        .map(|(key, values)| box_plot_summary(key, &values))
        .collect()
}
