use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Plot};

// ---------------------------------------------------------------------------
// Ranking bar chart
// ---------------------------------------------------------------------------

/// Horizontal bars for a top-N ranking, first entry on top.
pub fn ranking_chart(ui: &mut Ui, id: &str, entries: &[(String, f64)], color: Color32) {
    if entries.is_empty() {
        return;
    }

    let n = entries.len();
    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            Bar::new((n - i) as f64, *value)
                .name(label)
                .fill(color)
                .width(0.7)
        })
        .collect();

    let chart = BarChart::new(bars).horizontal().color(color);

    Plot::new(id)
        .height(24.0 * n as f32 + 40.0)
        .show_y(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}
