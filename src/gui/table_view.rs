use super::ShelterApp;
use eframe::egui;
use egui_extras::{Column, TableBuilder};

const HEADER_HEIGHT: f32 = 24.0;
const ROW_HEIGHT: f32 = 20.0;

pub fn render_table(app: &ShelterApp, ui: &mut egui::Ui) {
    let Some(view) = app.current_view() else {
        ui.centered_and_justified(|ui| {
            ui.label("Cargue un archivo CSV para ver los registros.");
        });
        return;
    };

    let total = app.table.as_ref().map_or(0, |t| t.row_count());
    let status = if app.selection.is_active() {
        format!("{} de {total} registros", view.len())
    } else {
        format!("{total} registros")
    };
    ui.label(egui::RichText::new(status).weak());
    ui.separator();

    egui::ScrollArea::horizontal().show(ui, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(
                Column::initial(140.0).at_least(60.0).clip(true),
                view.columns().len(),
            )
            .min_scrolled_height(0.0)
            .header(HEADER_HEIGHT, |mut header| {
                for name in view.columns() {
                    header.col(|ui| {
                        ui.strong(name.as_str());
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, view.len(), |mut row| {
                    let Some(cells) = view.row(row.index()) else {
                        return;
                    };
                    for cell in cells {
                        row.col(|ui| {
                            if cell.is_missing() {
                                ui.weak("—");
                            } else {
                                ui.label(cell.to_string());
                            }
                        });
                    }
                });
            });
    });
}
