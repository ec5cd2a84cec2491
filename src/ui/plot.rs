use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Stroke, Ui, Vec2};
use egui_plot::{
    BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, MarkerShape, Plot, PlotPoints, Points,
};

use salary_story::layout::extent;
use salary_story::stats::CorrelationStrength;
use salary_story::NumericField;

use crate::color::{diverging, diverging_text, ColorMap};
use crate::state::{AppState, ChartData, ViewSettings};

// ---------------------------------------------------------------------------
// Empty state
// ---------------------------------------------------------------------------

/// Shown instead of a chart when there is nothing to compute over.
pub fn no_data(ui: &mut Ui, state: &AppState) {
    let message = match (&state.dataset, &state.status_message) {
        (None, Some(_)) => "No data: the last file could not be loaded",
        (None, None) => "Open a file to explore salaries  (File → Open…)",
        (Some(_), _) => "No records match the current filters",
    };
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading(message);
    });
}

/// Axis labels for categorical positions 0, 1, 2, …
fn index_formatter(labels: Vec<&'static str>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).map(|l| l.to_string()).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

/// Salary distribution per group of `settings.group_field`.
pub fn box_plot(ui: &mut Ui, charts: &ChartData, settings: &ViewSettings) {
    let colors = ColorMap::new(settings.group_field);
    let labels: Vec<&'static str> = charts.boxes.iter().map(|b| b.group).collect();

    Plot::new("box_plot")
        .legend(Legend::default())
        .x_axis_label(settings.group_field.label())
        .y_axis_label(NumericField::SalaryAt30.label())
        .x_axis_formatter(index_formatter(labels))
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (i, summary) in charts.boxes.iter().enumerate() {
                let x = i as f64;
                let color = colors.color_for(summary.group);

                let elem = BoxElem::new(
                    x,
                    BoxSpread::new(
                        summary.whisker_min,
                        summary.q1,
                        summary.median,
                        summary.q3,
                        summary.whisker_max,
                    ),
                )
                .name(summary.group)
                .box_width(0.5)
                .whisker_width(0.4)
                .fill(color.gamma_multiply(0.6))
                .stroke(Stroke::new(1.5, color));

                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(summary.group).color(color));

                if !summary.outliers.is_empty() {
                    let outliers: PlotPoints = summary.outliers.iter().map(|&v| [x, v]).collect();
                    plot_ui.points(
                        Points::new(outliers)
                            .name(summary.group)
                            .color(color)
                            .radius(3.0),
                    );
                }

                plot_ui.points(
                    Points::new(vec![[x, summary.mean]])
                        .name(format!("{} mean", summary.group))
                        .shape(MarkerShape::Diamond)
                        .color(Color32::WHITE)
                        .radius(4.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter plot with regression line
// ---------------------------------------------------------------------------

pub fn scatter_plot(ui: &mut Ui, charts: &ChartData, settings: &ViewSettings, colors: &ColorMap) {
    let (x_field, y_field) = (settings.scatter_x, settings.scatter_y);

    // One series per colour label so the legend lists categories.
    let mut series: BTreeMap<&'static str, Vec<[f64; 2]>> = BTreeMap::new();
    for record in &charts.visible {
        series
            .entry(colors.field.value(record))
            .or_default()
            .push([x_field.value(record), y_field.value(record)]);
    }

    let x_extent = extent(charts.visible.iter().map(|r| x_field.value(r)));
    let fit = charts.regression;

    Plot::new("scatter_plot")
        .legend(Legend::default())
        .x_axis_label(x_field.label())
        .y_axis_label(y_field.label())
        .label_formatter(move |name, value| {
            let head = if name.is_empty() { String::new() } else { format!("{name}\n") };
            format!(
                "{head}{}: {:.2}\n{}: {:.2}",
                x_field.label(),
                value.x,
                y_field.label(),
                value.y
            )
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (label, points) in series {
                plot_ui.points(
                    Points::new(points)
                        .name(label)
                        .color(colors.color_for(label))
                        .radius(2.5),
                );
            }

            if let (true, Some((lo, hi))) = (fit.is_defined(), x_extent) {
                let line = Line::new(vec![[lo, fit.predict(lo)], [hi, fit.predict(hi)]])
                    .name(format!("OLS fit (R² = {:.3})", fit.r_squared))
                    .color(Color32::from_rgb(0xf5, 0x9e, 0x0b))
                    .width(2.0);
                plot_ui.line(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

pub fn correlation_heatmap(ui: &mut Ui, charts: &ChartData) {
    let matrix = &charts.correlations;
    let labels = matrix.labels();
    let n = labels.len().max(1) as f32;
    let cell = ((ui.available_width() - 120.0) / n).clamp(40.0, 110.0);

    egui::Grid::new("correlation_heatmap")
        .spacing([2.0, 2.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for label in &labels {
                ui.label(RichText::new(*label).strong());
            }
            ui.end_row();

            for (i, row_label) in labels.iter().enumerate() {
                ui.label(RichText::new(*row_label).strong());
                for (j, col_label) in labels.iter().enumerate() {
                    let r = matrix.values[i][j];
                    let (rect, response) = ui.allocate_exact_size(Vec2::splat(cell), Sense::hover());
                    let painter = ui.painter();
                    painter.rect_filled(rect, 2.0, diverging(r));
                    painter.text(
                        rect.center(),
                        Align2::CENTER_CENTER,
                        format!("{r:.2}"),
                        FontId::proportional(13.0),
                        diverging_text(r),
                    );
                    response.on_hover_text(format!(
                        "{row_label} vs {col_label}\nCorrelation: {r:.3}\nStrength: {}",
                        CorrelationStrength::from_coefficient(r)
                    ));
                }
                ui.end_row();
            }
        });

    ui.add_space(8.0);
    ui.horizontal(|ui: &mut Ui| {
        ui.label("−1");
        for step in 0..=20 {
            let r = -1.0 + step as f64 * 0.1;
            let (rect, _) = ui.allocate_exact_size(Vec2::new(12.0, 12.0), Sense::hover());
            ui.painter().rect_filled(rect, 0.0, diverging(r));
        }
        ui.label("+1");
    });
}

// ---------------------------------------------------------------------------
// Parallel coordinates
// ---------------------------------------------------------------------------

pub fn parallel_plot(ui: &mut Ui, charts: &ChartData, colors: &ColorMap) {
    ui.horizontal(|ui: &mut Ui| {
        for (label, color) in colors.legend_entries() {
            ui.label(RichText::new(format!("■ {label}")).color(color));
        }
    });

    let labels: Vec<&'static str> = NumericField::ALL.iter().map(|f| f.label()).collect();

    Plot::new("parallel_plot")
        .x_axis_formatter(index_formatter(labels))
        .y_axis_label("scaled value")
        .show_y(false)
        .include_y(0.0)
        .include_y(1.0)
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (record, line) in charts.visible.iter().zip(&charts.parallel) {
                let color = colors.color_for(colors.field.value(record));
                let points: PlotPoints = line
                    .iter()
                    .enumerate()
                    .map(|(k, &y)| [k as f64, y])
                    .collect();
                plot_ui.line(Line::new(points).color(color.gamma_multiply(0.5)).width(1.0));
            }
            for k in 0..NumericField::ALL.len() {
                let x = k as f64;
                plot_ui.line(
                    Line::new(vec![[x, 0.0], [x, 1.0]])
                        .color(Color32::LIGHT_GRAY)
                        .width(1.5),
                );
            }
        });
}
