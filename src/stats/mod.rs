/// Statistics core: pure functions over a slice of normalized records.
///
/// Every function takes the records explicitly and returns a fresh value;
/// nothing is cached. Undefined results follow one policy per module:
/// * `summary`     – NaN for empty input
/// * `correlation` – 0.0 for zero variance, NaN for non-finite input
/// * `regression`  – non-finite slope/intercept, see `RegressionResult::is_defined`
/// * `quantile`    – NaN for empty input

pub mod correlation;
mod grouping;
pub mod quantile;
pub mod regression;
pub mod summary;

pub use correlation::{
    correlation_matrix, pearson_correlation, CorrelationMatrix, CorrelationStrength,
};
pub use quantile::{box_plot_summaries, box_plot_summary, quantile_sorted, BoxPlotSummary};
pub use regression::{fit_line, linear_regression, RegressionResult};
pub use summary::{
    compute_summary_statistics, compute_summary_statistics_with, group_by, GroupSummary,
    MedianMethod, SummaryStatistics,
};
