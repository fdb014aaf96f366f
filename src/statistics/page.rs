//! Statistics report screen

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use eframe::egui;
use tracing::debug;

use super::columns::{ColumnSelection, ALL_COLUMNS};
use super::filter::{custom_range, Period};
use super::report::{StatisticsReport, TableBody};
use crate::i18n::translate;

const DATE_FORMAT: &str = "%Y-%m-%d";
const SHIMMER_CELL: egui::Vec2 = egui::vec2(96.0, 14.0);

/// Request raised by the page
#[derive(Debug, Clone, PartialEq)]
pub enum PageAction {
    /// Load statistics for this range
    Submit { from: DateTime<Utc>, to: DateTime<Utc> },
    /// Column selection changed; persist these keys
    ColumnsChanged(Vec<String>),
}

/// Filter, column selector and report table
#[derive(Debug)]
pub struct StatisticsPage {
    period: Period,
    custom_from: String,
    custom_to: String,
    range_error: bool,
    columns: ColumnSelection,
    report: StatisticsReport,
}

impl StatisticsPage {
    /// Creates the page with a preselected period and persisted columns
    pub fn new(period: Period, column_keys: &[String]) -> Self {
        Self {
            period,
            custom_from: String::new(),
            custom_to: String::new(),
            range_error: false,
            columns: ColumnSelection::from_keys(column_keys),
            report: StatisticsReport::new(),
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn set_period(&mut self, period: Period) {
        self.period = period;
    }

    /// Sets the custom range text fields
    pub fn set_custom_range(&mut self, from: &str, to: &str) {
        self.custom_from = from.to_string();
        self.custom_to = to.to_string();
    }

    pub fn columns(&self) -> &ColumnSelection {
        &self.columns
    }

    pub fn report(&self) -> &StatisticsReport {
        &self.report
    }

    pub fn report_mut(&mut self) -> &mut StatisticsReport {
        &mut self.report
    }

    /// Range to request for the current filter, as seen from `now`
    ///
    /// Returns `None` when the custom dates are missing, malformed or
    /// reversed.
    pub fn selected_range<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let range = match self.period {
            Period::Custom => {
                let from = NaiveDate::parse_from_str(self.custom_from.trim(), DATE_FORMAT).ok();
                let to = NaiveDate::parse_from_str(self.custom_to.trim(), DATE_FORMAT).ok();
                from.zip(to)
                    .and_then(|(from, to)| custom_range(&now.timezone(), from, to))
            }
            period => period.resolve(now),
        };
        self.range_error = range.is_none();
        range
    }

    /// Draws the page
    pub fn show(&mut self, ui: &mut egui::Ui, hours12: bool, offset: FixedOffset) -> Vec<PageAction> {
        let mut actions = Vec::new();

        ui.heading(translate("statisticsTitle"));
        ui.add_space(8.0);
        self.filter_bar(ui, &mut actions);
        if self.range_error {
            ui.colored_label(ui.visuals().error_fg_color, translate("reportInvalidRange"));
        }
        ui.separator();

        let table = self.report.table(&self.columns, hours12, offset, translate);
        egui::ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
            egui::Grid::new("statistics_table")
                .num_columns(table.header.len())
                .striped(true)
                .spacing([24.0, 6.0])
                .show(ui, |ui| {
                    for title in &table.header {
                        ui.label(egui::RichText::new(title).strong());
                    }
                    ui.end_row();

                    match &table.body {
                        TableBody::Shimmer { rows, columns } => {
                            for _ in 0..*rows {
                                for _ in 0..*columns {
                                    shimmer_cell(ui);
                                }
                                ui.end_row();
                            }
                        }
                        TableBody::Rows(rows) => {
                            for row in rows {
                                for value in row {
                                    ui.label(value.as_str());
                                }
                                ui.end_row();
                            }
                        }
                    }
                });

            if matches!(&table.body, TableBody::Rows(rows) if rows.is_empty()) {
                ui.weak(translate("reportNoData"));
            }
        });

        actions
    }

    fn filter_bar(&mut self, ui: &mut egui::Ui, actions: &mut Vec<PageAction>) {
        ui.horizontal(|ui| {
            egui::ComboBox::from_label(translate("reportPeriod"))
                .selected_text(translate(self.period.label_key()))
                .show_ui(ui, |ui| {
                    for period in Period::ALL {
                        ui.selectable_value(&mut self.period, period, translate(period.label_key()));
                    }
                });

            if self.period == Period::Custom {
                ui.label(translate("reportFrom"));
                ui.add(
                    egui::TextEdit::singleline(&mut self.custom_from)
                        .hint_text("YYYY-MM-DD")
                        .desired_width(96.0),
                );
                ui.label(translate("reportTo"));
                ui.add(
                    egui::TextEdit::singleline(&mut self.custom_to)
                        .hint_text("YYYY-MM-DD")
                        .desired_width(96.0),
                );
            }

            ui.menu_button(translate("sharedColumns"), |ui| {
                for column in ALL_COLUMNS {
                    let mut checked = self.columns.contains(column);
                    if ui.checkbox(&mut checked, translate(column.label_key())).changed() {
                        self.columns.toggle(column);
                        debug!("Statistics columns: {:?}", self.columns.keys());
                        actions.push(PageAction::ColumnsChanged(self.columns.keys()));
                    }
                }
            });

            if ui.button(translate("sharedShow")).clicked() {
                if let Some((from, to)) = self.selected_range(&chrono::Local::now()) {
                    actions.push(PageAction::Submit { from, to });
                }
            }
        });
    }
}

fn shimmer_cell(ui: &mut egui::Ui) {
    let (rect, _) = ui.allocate_exact_size(SHIMMER_CELL, egui::Sense::hover());
    let time = ui.input(|i| i.time);
    let phase = ((time * 2.0).sin() * 0.5 + 0.5) as f32;
    let base = ui.visuals().widgets.inactive.bg_fill;
    let color = base.linear_multiply(0.5 + 0.5 * phase);
    ui.painter().rect_filled(rect, egui::Rounding::same(4.0), color);
    ui.ctx().request_repaint();
}
