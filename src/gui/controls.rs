use super::ShelterApp;
use eframe::egui;

const COMBO_WIDTH: f32 = 180.0;

pub fn render_controls(app: &mut ShelterApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        if ui.button("📂 Cargar CSV").clicked() {
            app.pick_and_load();
        }

        ui.add_enabled_ui(app.table.is_some(), |ui| {
            render_column_combo(app, ui);
            render_value_combo(app, ui);

            if ui.button("📊 Gráficos").clicked() {
                app.open_charts();
            }
            if ui.button("💾 Guardar limpio").clicked() {
                app.pick_and_save();
            }
        });

        if let Some(path) = &app.source {
            ui.separator();
            ui.label(egui::RichText::new(path.display().to_string()).weak());
        }
    });
}

fn render_column_combo(app: &mut ShelterApp, ui: &mut egui::Ui) {
    let mut picked = None;
    let current = app.selection.column().unwrap_or("Filtrar por...").to_owned();

    egui::ComboBox::from_id_salt("filter_column")
        .width(COMBO_WIDTH)
        .selected_text(current)
        .show_ui(ui, |ui| {
            let columns = app.table.as_ref().map(|t| t.columns()).unwrap_or_default();
            for column in columns {
                let selected = app.selection.column() == Some(column.as_str());
                if ui.selectable_label(selected, column.as_str()).clicked() && !selected {
                    picked = Some(column.clone());
                }
            }
        });

    if let Some(column) = picked {
        app.select_column(column);
    }
}

fn render_value_combo(app: &mut ShelterApp, ui: &mut egui::Ui) {
    let mut picked = None;
    let current = match (app.selection.column(), app.selection.value()) {
        (_, Some(value)) => value.to_owned(),
        (Some(_), None) => "Seleccione valor...".to_owned(),
        (None, None) => String::new(),
    };

    ui.add_enabled_ui(app.selection.column().is_some(), |ui| {
        egui::ComboBox::from_id_salt("filter_value")
            .width(COMBO_WIDTH)
            .selected_text(current)
            .show_ui(ui, |ui| {
                for value in &app.value_options {
                    let selected = app.selection.value() == Some(value.as_str());
                    if ui.selectable_label(selected, value.as_str()).clicked() && !selected {
                        picked = Some(value.clone());
                    }
                }
            });
    });

    if let Some(value) = picked {
        app.select_value(value);
    }
}
