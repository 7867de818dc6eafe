//! Desktop presenter: a single window with the load/filter/chart/save
//! controls on top and the current view of the table below.
//!
//! All work runs synchronously on the event thread. A failed load or save
//! leaves the previously loaded table on screen and reports the error in a
//! blocking dialog.

mod charts;
mod controls;
mod table_view;

use crate::theme;
use eframe::egui;
use refugio::config::{AppConfig, WINDOW_TITLE};
use refugio::records::{self, Distribution, FilterSelection, RecordTable, RowSelection, View};
use std::path::{Path, PathBuf};

/// Opens the main window and blocks until it is closed.
pub fn run(config: &AppConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([config.window.width, config.window.height]),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(ShelterApp::new(cc)))),
    )
}

/// Blocking message shown over the window until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error { title: String, message: String },
    Info { title: String, message: String },
}

impl Notice {
    fn error(title: &str, message: impl Into<String>) -> Self {
        Self::Error {
            title: title.to_owned(),
            message: message.into(),
        }
    }

    fn info(title: &str, message: impl Into<String>) -> Self {
        Self::Info {
            title: title.to_owned(),
            message: message.into(),
        }
    }

    fn title(&self) -> &str {
        match self {
            Self::Error { title, .. } | Self::Info { title, .. } => title,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Error { message, .. } | Self::Info { message, .. } => message,
        }
    }
}

#[derive(Default)]
pub struct ShelterApp {
    table: Option<RecordTable>,
    source: Option<PathBuf>,
    selection: FilterSelection,
    value_options: Vec<String>,
    /// Rows matching the active filter; `None` shows the whole table
    visible: Option<RowSelection>,
    charts: Option<Vec<Distribution>>,
    notice: Option<Notice>,
}

impl ShelterApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        theme::apply_dark_theme(&cc.egui_ctx);
        Self::default()
    }

    fn current_view(&self) -> Option<View<'_>> {
        let table = self.table.as_ref()?;
        Some(match &self.visible {
            Some(rows) => rows.view(table),
            None => View::all(table),
        })
    }

    fn pick_and_load(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.load_path(path);
        }
    }

    /// Loads and cleans `path`, replacing the current table only on success.
    fn load_path(&mut self, path: PathBuf) {
        match records::load(&path).and_then(records::clean) {
            Ok(table) => {
                self.table = Some(table);
                self.source = Some(path);
                self.selection.clear();
                self.value_options.clear();
                self.visible = None;
                self.charts = None;
            }
            Err(e) => {
                tracing::error!(path = %path.display(), "Load failed: {e}");
                self.notice = Some(Notice::error(
                    "Error",
                    format!("No se pudo cargar el CSV:\n{}", e.user_message()),
                ));
            }
        }
    }

    fn select_column(&mut self, column: String) {
        let Some(table) = &self.table else {
            return;
        };
        match records::distinct_values(table, &column) {
            Ok(values) => {
                self.value_options = values;
                self.selection.select_column(column);
                self.visible = None;
            }
            Err(e) => self.notice = Some(Notice::error("Error", e.user_message())),
        }
    }

    fn select_value(&mut self, value: String) {
        let Some(table) = &self.table else {
            return;
        };
        self.selection.select_value(value);
        match self.selection.apply(table) {
            Ok(rows) => self.visible = rows,
            Err(e) => self.notice = Some(Notice::error("Error", e.user_message())),
        }
    }

    fn open_charts(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        match records::chart_distributions(table) {
            Ok(dists) => self.charts = Some(dists),
            Err(e) => self.notice = Some(Notice::error("Error", e.user_message())),
        }
    }

    fn pick_and_save(&mut self) {
        if self.table.is_none() {
            return;
        }
        let suggested = self
            .source
            .as_deref()
            .and_then(Path::file_stem)
            .map(|stem| format!("{}_limpio.csv", stem.to_string_lossy()))
            .unwrap_or_else(|| "limpio.csv".to_owned());

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(suggested)
            .save_file()
        {
            self.save_to(&with_csv_extension(path));
        }
    }

    /// Writes the full cleaned table (never the filtered view).
    fn save_to(&mut self, path: &Path) {
        let Some(table) = &self.table else {
            return;
        };
        self.notice = Some(match records::save(table, path) {
            Ok(()) => Notice::info("✅ Guardado", "Archivo limpio guardado correctamente."),
            Err(e) => {
                tracing::error!(path = %path.display(), "Save failed: {e}");
                Notice::error("Error al guardar", e.user_message())
            }
        });
    }

    fn render_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else {
            return;
        };

        let mut dismissed = false;
        let response = egui::Modal::new(egui::Id::new("notice_modal")).show(ctx, |ui| {
            ui.set_width(380.0);
            ui.heading(notice.title());
            ui.add_space(theme::SPACING_SMALL);
            match notice {
                Notice::Error { message, .. } => {
                    ui.colored_label(ui.visuals().error_fg_color, message.as_str());
                }
                Notice::Info { .. } => {
                    ui.label(notice.message());
                }
            }
            ui.add_space(theme::SPACING_MEDIUM);
            if ui.button("Aceptar").clicked() {
                dismissed = true;
            }
        });

        if dismissed || response.should_close() {
            self.notice = None;
        }
    }
}

fn with_csv_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("csv")
    }
}

impl eframe::App for ShelterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls")
            .frame(theme::top_bar_frame())
            .show(ctx, |ui| controls::render_controls(self, ui));

        egui::CentralPanel::default().show(ctx, |ui| table_view::render_table(self, ui));

        charts::render_charts_window(self, ctx);
        self.render_notice(ctx);
    }
}
