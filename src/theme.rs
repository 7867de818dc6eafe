use eframe::egui;
use egui::{Color32, CornerRadius, Margin, Stroke};

pub const BACKGROUND: Color32 = Color32::from_rgb(46, 46, 46);
pub const WIDGET_FILL: Color32 = Color32::from_rgb(68, 68, 68);
pub const WIDGET_HOVER: Color32 = Color32::from_rgb(85, 85, 85);
pub const ACCENT_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

// Spacing constants
pub const SPACING_SMALL: f32 = 8.0;
pub const SPACING_MEDIUM: f32 = 12.0;
pub const SPACING_LARGE: f32 = 20.0;

pub const PANEL_MARGIN: i8 = 10;

// Plotly's default qualitative palette, one color per category
const CATEGORY_PALETTE: [Color32; 10] = [
    Color32::from_rgb(99, 110, 250),
    Color32::from_rgb(239, 85, 59),
    Color32::from_rgb(0, 204, 150),
    Color32::from_rgb(171, 99, 250),
    Color32::from_rgb(255, 161, 90),
    Color32::from_rgb(25, 211, 243),
    Color32::from_rgb(255, 102, 146),
    Color32::from_rgb(182, 232, 128),
    Color32::from_rgb(255, 151, 255),
    Color32::from_rgb(254, 203, 82),
];

pub fn apply_dark_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();

    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = BACKGROUND;

    visuals.widgets.inactive.bg_fill = WIDGET_FILL;
    visuals.widgets.inactive.weak_bg_fill = WIDGET_FILL;
    visuals.widgets.inactive.corner_radius = CornerRadius::same(4);

    visuals.widgets.hovered.bg_fill = WIDGET_HOVER;
    visuals.widgets.hovered.weak_bg_fill = WIDGET_HOVER;
    visuals.widgets.hovered.corner_radius = CornerRadius::same(4);

    visuals.widgets.active.bg_fill = ACCENT_COLOR;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.selection.bg_fill = ACCENT_COLOR.linear_multiply(0.4);

    visuals.window_corner_radius = CornerRadius::same(8);
    visuals.faint_bg_color = Color32::from_rgb(52, 52, 52);
    visuals.extreme_bg_color = Color32::from_rgb(30, 30, 30);

    ctx.set_visuals(visuals);
}

pub fn top_bar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BACKGROUND)
        .inner_margin(Margin::same(PANEL_MARGIN))
}

pub fn category_color(index: usize) -> Color32 {
    CATEGORY_PALETTE
        .get(index % CATEGORY_PALETTE.len())
        .copied()
        .unwrap_or(ACCENT_COLOR)
}
