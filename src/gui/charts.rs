use super::ShelterApp;
use crate::theme;
use eframe::egui;
use egui_plot::{Bar, BarChart, Plot};
use refugio::records::Distribution;

const PLOT_HEIGHT: f32 = 220.0;
const BAR_WIDTH: f64 = 0.7;

pub fn render_charts_window(app: &mut ShelterApp, ctx: &egui::Context) {
    let Some(dists) = &app.charts else {
        return;
    };

    let mut open = true;
    egui::Window::new("📊 Gráficos")
        .open(&mut open)
        .default_size([720.0, 640.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                for dist in dists {
                    render_distribution(ui, dist);
                    ui.add_space(theme::SPACING_LARGE);
                }
            });
        });

    if !open {
        app.charts = None;
    }
}

fn render_distribution(ui: &mut egui::Ui, dist: &Distribution) {
    ui.heading(dist.title.as_str());

    if dist.counts.is_empty() {
        ui.label("—");
        return;
    }

    let bars: Vec<Bar> = dist
        .counts
        .iter()
        .enumerate()
        .map(|(i, (label, count))| {
            Bar::new(i as f64, *count as f64)
                .width(BAR_WIDTH)
                .name(label)
                .fill(theme::category_color(i))
        })
        .collect();

    let chart = BarChart::new(dist.column.as_str(), bars).element_formatter(Box::new(
        |bar, _| format!("{}\nCantidad: {}", bar.name, bar.value),
    ));

    let labels: Vec<String> = dist.counts.iter().map(|(label, _)| label.clone()).collect();

    Plot::new(format!("chart_{}", dist.column))
        .height(PLOT_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .include_y(0.0)
        .include_y(dist.max_count() as f64 * 1.1)
        .y_axis_label("Cantidad")
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));

    if dist.missing > 0 {
        ui.weak(format!("{} registros sin dato", dist.missing));
    }
}

/// Axis label for a bar position; blank between bars.
fn category_label(labels: &[String], x: f64) -> String {
    let rounded = x.round();
    if rounded < 0.0 || (x - rounded).abs() > 1e-6 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}
