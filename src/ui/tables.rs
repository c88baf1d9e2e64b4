use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use super::plot::ranking_chart;
use crate::analysis::dispatch::{AnalysisResult, Payload};
use crate::color::dataset_color;
use crate::report::Tabular;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – statistics plus every active analysis
// ---------------------------------------------------------------------------

pub fn results_view(ui: &mut Ui, state: &AppState) {
    ui.heading("Metabolites Overview");
    ui.add_space(6.0);

    if state.results.is_empty() {
        ui.label(RichText::new("Nothing to show.").color(Color32::GRAY));
        return;
    }

    for (idx, result) in state.results.iter().enumerate() {
        ui.push_id(idx, |ui: &mut Ui| result_block(ui, idx, result));
        ui.add_space(12.0);
    }
}

fn result_block(ui: &mut Ui, idx: usize, result: &AnalysisResult) {
    ui.label(RichText::new(&result.heading).size(16.0).strong());
    ui.add_space(4.0);
    result_table(ui, &Tabular::from_payload(&result.payload));

    let color = result
        .action
        .map(|a| dataset_color(a.dataset))
        .unwrap_or(Color32::LIGHT_BLUE);
    let chart_id = format!("ranking_{idx}");
    match &result.payload {
        Payload::Ranking(entries) => {
            ui.add_space(4.0);
            ranking_chart(ui, &chart_id, entries, color);
        }
        Payload::Counts { entries, .. } => {
            let as_f64: Vec<(String, f64)> = entries
                .iter()
                .map(|(value, n)| (value.clone(), *n as f64))
                .collect();
            ui.add_space(4.0);
            ranking_chart(ui, &chart_id, &as_f64, color);
        }
        Payload::Summary(_) | Payload::Sums(_) => {}
    }
}

/// Striped table with the first column left-aligned and the rest as numbers.
pub fn result_table(ui: &mut Ui, table: &Tabular) {
    let n_cols = table.columns.len();
    if n_cols == 0 {
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(140.0))
        .columns(Column::auto().at_least(90.0), n_cols - 1)
        .header(20.0, |mut header| {
            for name in &table.columns {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for row in &table.rows {
                body.row(18.0, |mut table_row| {
                    for (i, cell) in row.iter().enumerate() {
                        table_row.col(|ui| {
                            if i == 0 {
                                ui.label(cell);
                            } else {
                                ui.monospace(cell);
                            }
                        });
                    }
                });
            }
        });
}
