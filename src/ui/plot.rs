use eframe::egui::Ui;
use egui_plot::{Legend, MarkerShape, Plot, PlotBounds, PlotPoints, Points};

use crate::color::PlotColors;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the scatter plot and pick the nearest point on a primary click.
pub fn scatter_plot(ui: &mut Ui, state: &mut AppState, colors: &PlotColors) {
    if !state.index().is_ready() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Load the sample or open a spreadsheet to plot it");
        });
        return;
    }

    let fit = state.take_fit_request();
    let scene = state.scene();

    let response = Plot::new("scatter_plot")
        .legend(Legend::default())
        .x_axis_label("X")
        .y_axis_label("Y")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if let Some(b) = fit {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [b.xmin, b.ymin],
                    [b.xmax, b.ymax],
                ));
            }

            plot_ui.points(
                Points::new(PlotPoints::from(scene.series.clone()))
                    .name("data")
                    .shape(MarkerShape::Circle)
                    .radius(3.0)
                    .color(colors.series),
            );

            if let Some(p) = scene.highlight {
                plot_ui.points(
                    Points::new(PlotPoints::from(vec![p]))
                        .name("selection")
                        .shape(MarkerShape::Circle)
                        .filled(false)
                        .radius(7.0)
                        .color(colors.highlight),
                );
            }

            plot_ui.pointer_coordinate()
        });

    if response.response.clicked() {
        if let Some(pos) = response.inner {
            state.pick(pos.x, pos.y);
        }
    }
}
