use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::model::BarStatus;

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_CHART: Color32 = Color32::from_rgb(255, 255, 255);
pub const BG_PANEL: Color32 = Color32::from_rgb(246, 247, 249);
pub const BG_HEADER: Color32 = Color32::from_rgb(236, 239, 243);
pub const BG_ROW_ALT: Color32 = Color32::from_rgb(249, 250, 251);
pub const BG_ROW_HOVER: Color32 = Color32::from_rgba_premultiplied(52, 152, 219, 24);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(221, 225, 230);
pub const GRID_LINE: Color32 = Color32::from_rgb(232, 235, 239);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(44, 62, 80);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(100, 112, 125);
pub const TEXT_DIM: Color32 = Color32::from_rgb(150, 160, 170);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(255, 255, 255);

pub const ACCENT: Color32 = Color32::from_rgb(52, 152, 219);
pub const CONNECTOR: Color32 = Color32::from_rgb(85, 85, 85);
pub const PROGRESS_OVERLAY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 45);

// Bar fills by status.
pub const BAR_COMPLETE: Color32 = Color32::from_rgb(0x27, 0xae, 0x60);
pub const BAR_OVERDUE: Color32 = Color32::from_rgb(0xe7, 0x4c, 0x3c);
pub const BAR_LEVEL_1: Color32 = Color32::from_rgb(0x7f, 0x8c, 0x8d);
pub const BAR_LEVEL_2: Color32 = Color32::from_rgb(0x34, 0x98, 0xdb);
pub const BAR_LEVEL_DEEP: Color32 = Color32::from_rgb(0x85, 0xc1, 0xe9);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const BAR_ROUNDING: f32 = 3.0;
pub const SEPARATOR_WIDTH: f32 = 5.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;
pub const DIALOG_WIDTH: f32 = 360.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_row() -> FontId {
    FontId::proportional(12.5)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.0)
}

pub fn font_tick() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_status() -> FontId {
    FontId::proportional(11.0)
}

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

pub fn bar_color(status: BarStatus) -> Color32 {
    match status {
        BarStatus::Complete => BAR_COMPLETE,
        BarStatus::Overdue => BAR_OVERDUE,
        BarStatus::Level(level) if level <= 1 => BAR_LEVEL_1,
        BarStatus::Level(2) => BAR_LEVEL_2,
        BarStatus::Level(_) => BAR_LEVEL_DEEP,
    }
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::light();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_CHART;
    visuals.extreme_bg_color = BG_CHART;
    visuals.faint_bg_color = BG_ROW_ALT;

    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = BG_ROW_HOVER;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(6.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
