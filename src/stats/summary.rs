use serde::Serialize;

use super::grouping::first_seen_groups;
use crate::data::model::{CategoricalField, NormalizedRecord, NumericField};

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// How the `median` of [`SummaryStatistics`] is picked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MedianMethod {
    /// Element at index `floor(n / 2)` of the sorted values. For even `n`
    /// this is the upper of the two middle elements.
    #[default]
    MiddleIndex,
    /// Average of the two middle elements for even `n`.
    Interpolated,
}

/// Descriptive statistics of one numeric field. All values are NaN when
/// computed over an empty sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl SummaryStatistics {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Summary statistics of `field` using [`MedianMethod::MiddleIndex`].
pub fn compute_summary_statistics(
    records: &[NormalizedRecord],
    field: NumericField,
) -> SummaryStatistics {
    compute_summary_statistics_with(records, field, MedianMethod::default())
}

pub fn compute_summary_statistics_with(
    records: &[NormalizedRecord],
    field: NumericField,
    method: MedianMethod,
) -> SummaryStatistics {
    let values = field.values(records);
    summarize(&values, method)
}

/// Summary statistics of a raw value slice.
pub fn summarize(values: &[f64], method: MedianMethod) -> SummaryStatistics {
    let count = values.len();
    if count == 0 {
        return SummaryStatistics {
            count,
            mean: f64::NAN,
            median: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
        };
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = count / 2;
    let median = match method {
        MedianMethod::MiddleIndex => sorted[mid],
        MedianMethod::Interpolated if count % 2 == 0 => (sorted[mid - 1] + sorted[mid]) / 2.0,
        MedianMethod::Interpolated => sorted[mid],
    };

    SummaryStatistics {
        count,
        mean: mean(values),
        median,
        min: sorted[0],
        max: sorted[count - 1],
    }
}

/// Arithmetic mean; NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Records sharing one category label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub key: &'static str,
    pub count: usize,
    /// Mean `Salary_at_30` over the group.
    pub avg_salary: f64,
    /// Indices into the record slice the grouping was computed over.
    pub members: Vec<usize>,
}

impl GroupSummary {
    /// Resolve member indices against the slice passed to [`group_by`].
    pub fn records<'a>(
        &'a self,
        records: &'a [NormalizedRecord],
    ) -> impl Iterator<Item = &'a NormalizedRecord> + 'a {
        self.members.iter().filter_map(move |&i| records.get(i))
    }
}

/// Group `records` by a categorical field, in first-seen order of the labels.
pub fn group_by(records: &[NormalizedRecord], field: CategoricalField) -> Vec<GroupSummary> {
    first_seen_groups(records, field, |i, _| i)
        .into_iter()
        .map(|(key, members)| {
            let salaries: Vec<f64> = members.iter().map(|&i| records[i].salary_at_30).collect();
            GroupSummary {
                key,
                count: members.len(),
                avg_salary: mean(&salaries),
                members,
            }
        })
        .collect()
}
