use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::analysis::dispatch::Action;
use crate::data::model::Dataset;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter checkboxes and analysis buttons
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Filter by Type Strain");
            ui.separator();

            let mut filter = state.filter;
            ui.checkbox(&mut filter.show_type_strain, "Show Type Strain (1)");
            ui.checkbox(&mut filter.show_non_type_strain, "Show Non-Type Strain (0)");
            state.set_filter(filter);

            ui.add_space(8.0);
            ui.heading("Select Analysis");
            ui.separator();

            let top_n = state.session.config.top_n;
            for action in Action::all() {
                let label = action.button_label(top_n);
                if ui
                    .add_sized(
                        [ui.available_width(), 22.0],
                        egui::SelectableLabel::new(state.is_active(action), label),
                    )
                    .clicked()
                {
                    state.toggle_action(action);
                }
            }

            ui.add_space(4.0);
            if ui.small_button("Clear").clicked() {
                state.clear_actions();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data directory…").clicked() {
                open_directory_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let counts: Vec<String> = Dataset::ALL
            .iter()
            .map(|&d| format!("{} {}", state.session.table(d).len(), d.short_name()))
            .collect();
        ui.label(format!("records: {}", counts.join(" / ")));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Directory dialog
// ---------------------------------------------------------------------------

pub fn open_directory_dialog(state: &mut AppState) {
    let dir = rfd::FileDialog::new()
        .set_title("Open directory with prod.csv, util.csv and anti.csv")
        .pick_folder();

    if let Some(path) = dir {
        state.reload_from_dir(&path);
    }
}
