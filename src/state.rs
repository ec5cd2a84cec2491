use std::collections::BTreeSet;

use salary_story::data::filter::{filtered_indices, init_filter_state, FilterState};
use salary_story::layout::parallel_coordinates;
use salary_story::stats::{
    box_plot_summaries, compute_summary_statistics_with, correlation_matrix, group_by,
    linear_regression, BoxPlotSummary, CorrelationMatrix, GroupSummary, MedianMethod,
    RegressionResult, SummaryStatistics,
};
use salary_story::{CategoricalField, NormalizedRecord, NumericField, SalaryDataset};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Derived data shown by the charts
// ---------------------------------------------------------------------------

/// Which chart the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    BoxPlot,
    Scatter,
    Heatmap,
    Parallel,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Overview, Tab::BoxPlot, Tab::Scatter, Tab::Heatmap, Tab::Parallel];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::BoxPlot => "Box plot",
            Tab::Scatter => "Scatter",
            Tab::Heatmap => "Heatmap",
            Tab::Parallel => "Parallel",
        }
    }
}

/// Everything the renderers draw, recomputed in full from the visible records.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub visible: Vec<NormalizedRecord>,
    pub salary: SummaryStatistics,
    pub by_education: Vec<GroupSummary>,
    pub by_industry: Vec<GroupSummary>,
    pub boxes: Vec<BoxPlotSummary>,
    pub regression: RegressionResult,
    pub correlations: CorrelationMatrix,
    pub parallel: Vec<Vec<f64>>,
}

impl ChartData {
    fn compute(visible: Vec<NormalizedRecord>, settings: &ViewSettings) -> Self {
        let mut boxes = box_plot_summaries(&visible, settings.group_field, NumericField::SalaryAt30);
        boxes.sort_by(|a, b| a.group.cmp(b.group));

        ChartData {
            salary: compute_summary_statistics_with(
                &visible,
                NumericField::SalaryAt30,
                settings.median_method,
            ),
            by_education: group_by(&visible, CategoricalField::Education),
            by_industry: group_by(&visible, CategoricalField::Industry),
            boxes,
            regression: linear_regression(&visible, settings.scatter_x, settings.scatter_y),
            correlations: correlation_matrix(&visible),
            parallel: parallel_coordinates(&visible, &NumericField::ALL),
            visible,
        }
    }
}

/// User-selectable chart parameters.
#[derive(Debug, Clone)]
pub struct ViewSettings {
    pub tab: Tab,
    pub group_field: CategoricalField,
    pub color_field: CategoricalField,
    pub scatter_x: NumericField,
    pub scatter_y: NumericField,
    pub median_method: MedianMethod,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            tab: Tab::Overview,
            group_field: CategoricalField::Education,
            color_field: CategoricalField::Education,
            scatter_x: NumericField::WorkExperience,
            scatter_y: NumericField::SalaryAt30,
            median_method: MedianMethod::MiddleIndex,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<SalaryDataset>,

    /// Per-field filter selections.
    pub filters: FilterState,

    /// Indices of records passing the current filters.
    pub visible_indices: Vec<usize>,

    pub settings: ViewSettings,

    /// Active colour map, follows `settings.color_field`.
    pub color_map: ColorMap,

    /// Derived chart data; None when there is nothing to compute over.
    pub charts: Option<ChartData>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let settings = ViewSettings::default();
        Self {
            dataset: None,
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            color_map: ColorMap::new(settings.color_field),
            settings,
            charts: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, initialise filters and charts.
    pub fn set_dataset(&mut self, dataset: SalaryDataset) {
        self.filters = init_filter_state(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Drop the current dataset after a failed load so nothing stale is shown.
    pub fn set_load_error(&mut self, message: String) {
        self.dataset = None;
        self.filters.clear();
        self.visible_indices.clear();
        self.charts = None;
        self.status_message = Some(message);
    }

    /// Recompute `visible_indices` after a filter change, then the charts.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.filters);
        }
        self.refresh();
    }

    /// Recompute every chart from the visible records.
    pub fn refresh(&mut self) {
        self.charts = self.dataset.as_ref().and_then(|ds| {
            if self.visible_indices.is_empty() {
                return None;
            }
            let visible: Vec<NormalizedRecord> = self
                .visible_indices
                .iter()
                .filter_map(|&i| ds.records.get(i).cloned())
                .collect();
            Some(ChartData::compute(visible, &self.settings))
        });
    }

    pub fn set_color_field(&mut self, field: CategoricalField) {
        self.settings.color_field = field;
        self.color_map = ColorMap::new(field);
    }

    /// Toggle a single label in a field's filter.
    pub fn toggle_filter_value(&mut self, field: CategoricalField, label: &'static str) {
        let selected = self.filters.entry(field).or_default();
        if !selected.remove(label) {
            selected.insert(label);
        }
        self.refilter();
    }

    /// Select all observed labels of a field.
    pub fn select_all(&mut self, field: CategoricalField) {
        if let Some(ds) = &self.dataset {
            if let Some(all) = ds.category_values.get(&field) {
                self.filters.insert(field, all.clone());
                self.refilter();
            }
        }
    }

    /// Deselect all labels of a field.
    pub fn select_none(&mut self, field: CategoricalField) {
        self.filters.insert(field, BTreeSet::new());
        self.refilter();
    }
}
