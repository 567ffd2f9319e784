use egui::style::WidgetVisuals;
use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use staff_timeline::model::ProjectColor;
use staff_timeline::timeline::Severity;

// Palette: slate background with a teal accent

pub const BG_DARK: Color32 = Color32::from_rgb(21, 24, 30);
pub const BG_PANEL: Color32 = Color32::from_rgb(27, 31, 38);
pub const BG_HEADER: Color32 = Color32::from_rgb(33, 38, 47);
pub const BG_ROW_ODD: Color32 = Color32::from_rgb(24, 28, 35);
pub const BG_INPUT: Color32 = Color32::from_rgb(17, 20, 25);
pub const BG_WEEKEND: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 40);
pub const BG_HOLIDAY: Color32 = Color32::from_rgba_premultiplied(60, 20, 20, 60);
pub const BG_DROP_TARGET: Color32 = Color32::from_rgba_premultiplied(30, 80, 90, 70);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(46, 53, 64);
pub const GRID_LINE: Color32 = Color32::from_rgb(40, 46, 56);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(226, 231, 238);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(150, 160, 174);
pub const TEXT_DIM: Color32 = Color32::from_rgb(98, 107, 120);
pub const TEXT_ON_BAR: Color32 = Color32::WHITE;
pub const TEXT_ON_BAR_DARK: Color32 = BG_DARK;

pub const ACCENT: Color32 = Color32::from_rgb(56, 178, 172);
pub const TODAY_LINE: Color32 = Color32::from_rgb(236, 84, 84);
pub const HANDLE_COLOR: Color32 = Color32::WHITE;
pub const ERROR: Color32 = Color32::from_rgb(240, 95, 95);

pub const UTIL_NONE: Color32 = TEXT_DIM;
pub const UTIL_NORMAL: Color32 = Color32::from_rgb(72, 187, 120);
pub const UTIL_HIGH: Color32 = Color32::from_rgb(236, 201, 75);
pub const UTIL_CRITICAL: Color32 = Color32::from_rgb(240, 75, 75);

pub const HEADER_HEIGHT: f32 = 44.0;
pub const NAME_COLUMN_WIDTH: f32 = 250.0;
pub const HANDLE_WIDTH: f32 = 7.0;
pub const BAR_ROUNDING: f32 = 4.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;

const WIDGET_ROUNDING: f32 = 3.0;

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

pub fn project_color(color: ProjectColor) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

/// Readable text colour on top of a project's bar.
pub fn text_on(color: ProjectColor) -> Color32 {
    if color.wants_dark_text() {
        TEXT_ON_BAR_DARK
    } else {
        TEXT_ON_BAR
    }
}

pub fn severity_color(severity: Severity) -> Color32 {
    match severity {
        Severity::None => UTIL_NONE,
        Severity::Normal => UTIL_NORMAL,
        Severity::High => UTIL_HIGH,
        Severity::Critical => UTIL_CRITICAL,
    }
}

fn restyle(widget: &mut WidgetVisuals, fill: Color32, border: Color32, text: Stroke) {
    widget.bg_fill = fill;
    widget.weak_bg_fill = fill;
    widget.bg_stroke = Stroke::new(1.0, border);
    widget.fg_stroke = text;
    widget.rounding = Rounding::same(WIDGET_ROUNDING);
}

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals {
        override_text_color: Some(TEXT_PRIMARY),
        panel_fill: BG_PANEL,
        window_fill: BG_PANEL,
        extreme_bg_color: BG_INPUT,
        window_rounding: Rounding::same(6.0),
        window_stroke: Stroke::new(1.0, BORDER_SUBTLE),
        striped: false,
        ..Visuals::dark()
    };

    let w = &mut visuals.widgets;
    restyle(&mut w.noninteractive, BG_PANEL, BORDER_SUBTLE, Stroke::new(1.0, TEXT_SECONDARY));
    restyle(&mut w.inactive, Color32::from_rgb(38, 44, 54), BORDER_SUBTLE, Stroke::new(1.0, TEXT_PRIMARY));
    restyle(&mut w.hovered, Color32::from_rgb(47, 55, 67), ACCENT, Stroke::new(1.0, TEXT_PRIMARY));
    restyle(&mut w.active, Color32::from_rgb(56, 65, 78), ACCENT, Stroke::new(2.0, Color32::WHITE));
    restyle(&mut w.open, Color32::from_rgb(47, 55, 67), BORDER_SUBTLE, Stroke::new(1.0, TEXT_PRIMARY));

    visuals.selection.bg_fill = ACCENT.gamma_multiply(0.35);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    ctx.set_visuals(visuals);
    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(6.0, 4.0);
        style.spacing.button_padding = egui::vec2(7.0, 3.0);
    });
}
