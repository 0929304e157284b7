use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, HLine, Plot};

use eligibility_processor::data::model::ELIGIBILITY_THRESHOLD;
use eligibility_processor::data::score::Eligibility;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Grade chart (bottom panel)
// ---------------------------------------------------------------------------

/// One bar per candidate in Index Number order, with the threshold line.
pub fn grade_chart(ui: &mut Ui, state: &AppState) {
    let Some(scored) = state.session.scored() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("Grades appear here after submitting subject parameters.");
        });
        return;
    };

    let colors = state.colors;
    let charts: Vec<BarChart> = [Eligibility::Eligible, Eligibility::NotEligible]
        .into_iter()
        .map(|eligibility| {
            let bars: Vec<Bar> = scored
                .records
                .iter()
                .enumerate()
                .filter(|(_, r)| r.eligibility == eligibility)
                .map(|(i, r)| Bar::new(i as f64, r.grade).name(r.key.to_string()).width(0.8))
                .collect();
            BarChart::new(bars)
                .name(eligibility.label())
                .color(colors.color_for(eligibility))
        })
        .collect();

    Plot::new("grade_chart")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Candidate (by Index Number)")
        .y_axis_label("Grade")
        .include_y(0.0)
        .include_y(100.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
            plot_ui.hline(HLine::new(ELIGIBILITY_THRESHOLD).name("Threshold"));
        });
}
