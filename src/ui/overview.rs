use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use salary_story::stats::{GroupSummary, SummaryStatistics};

use crate::state::ChartData;

/// Salary headline numbers and per-group tables.
pub fn overview(ui: &mut Ui, charts: &ChartData) {
    stat_cards(ui, &charts.salary);
    ui.add_space(12.0);

    ui.columns(2, |cols| {
        cols[0].push_id("education_groups", |ui| {
            group_table(ui, "Education", &charts.by_education);
        });
        cols[1].push_id("industry_groups", |ui| {
            group_table(ui, "Industry", &charts.by_industry);
        });
    });
}

fn stat_cards(ui: &mut Ui, stats: &SummaryStatistics) {
    ui.horizontal(|ui: &mut Ui| {
        card(ui, "Professionals", stats.count.to_string());
        card(ui, "Avg Salary", money(stats.mean));
        card(ui, "Median", money(stats.median));
        card(ui, "Highest", money(stats.max));
        card(ui, "Lowest", money(stats.min));
    });
}

fn card(ui: &mut Ui, title: &str, value: String) {
    egui::Frame::group(ui.style())
        .inner_margin(10.0)
        .show(ui, |ui: &mut Ui| {
            ui.vertical(|ui: &mut Ui| {
                ui.label(RichText::new(value).size(22.0).strong());
                ui.label(title);
            });
        });
}

fn group_table(ui: &mut Ui, title: &str, groups: &[GroupSummary]) {
    ui.strong(title);
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Group");
            });
            header.col(|ui| {
                ui.strong("Count");
            });
            header.col(|ui| {
                ui.strong("Avg salary");
            });
        })
        .body(|mut body| {
            for group in groups {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(group.key);
                    });
                    row.col(|ui| {
                        ui.label(group.count.to_string());
                    });
                    row.col(|ui| {
                        ui.label(money(group.avg_salary));
                    });
                });
            }
        });
}

/// `$1,234,567` style, or `–` for an undefined value.
pub fn money(value: f64) -> String {
    if !value.is_finite() {
        return "–".to_string();
    }
    let rounded = value.round().abs() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < -0.5 { "-" } else { "" };
    format!("{sign}${grouped}")
}
