use egui::{Color32, FontId, Rounding, Stroke, Visuals};
use sprint_timeline::{NotificationKind, SprintStatus, TaskPriority, TaskStatus};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_HEADER: Color32 = Color32::from_rgb(34, 37, 48);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 45);
pub const BG_DROP_TARGET: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 60);
pub const BG_OFF_WINDOW: Color32 = Color32::from_rgba_premultiplied(240, 75, 75, 18);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(90, 140, 220);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(24, 24, 32);

pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);
pub const ARROW: Color32 = Color32::from_rgb(120, 170, 240);
pub const GRID_LINE: Color32 = Color32::from_rgb(44, 46, 58);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const ROW_HEIGHT: f32 = 64.0;
pub const ROW_GAP: f32 = 12.0;
pub const BAR_HEIGHT: f32 = 48.0;
pub const HEADER_HEIGHT: f32 = 32.0;
pub const BAR_MIN_WIDTH: f32 = 150.0;
pub const BAR_ROUNDING: f32 = 8.0;
pub const TIMELINE_MIN_WIDTH: f32 = 900.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;
pub const SIDE_PANEL_WIDTH: f32 = 340.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_bar() -> FontId {
    FontId::proportional(12.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(10.0)
}

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

// ── Typed color tables ───────────────────────────────────────────────────────

/// Bar fill for a task status.
pub fn status_color(status: TaskStatus) -> Color32 {
    match status {
        TaskStatus::ToDo => Color32::from_rgb(229, 231, 235),
        TaskStatus::InProgress => Color32::from_rgb(191, 219, 254),
        TaskStatus::InReview => Color32::from_rgb(254, 240, 138),
        TaskStatus::Done => Color32::from_rgb(187, 247, 208),
    }
}

pub fn priority_color(priority: TaskPriority) -> Color32 {
    match priority {
        TaskPriority::Low => Color32::from_rgb(140, 145, 160),
        TaskPriority::Medium => Color32::from_rgb(250, 173, 20),
        TaskPriority::High => Color32::from_rgb(245, 80, 80),
    }
}

pub fn sprint_status_color(status: SprintStatus) -> Color32 {
    match status {
        SprintStatus::Planning => Color32::from_rgb(140, 145, 160),
        SprintStatus::Active => Color32::from_rgb(80, 140, 220),
        SprintStatus::Completed => Color32::from_rgb(82, 196, 26),
    }
}

pub fn notification_color(kind: NotificationKind) -> Color32 {
    match kind {
        NotificationKind::Info => TEXT_SECONDARY,
        NotificationKind::Success => Color32::from_rgb(82, 196, 26),
        NotificationKind::Warning => Color32::from_rgb(250, 173, 20),
        NotificationKind::Error => Color32::from_rgb(245, 80, 80),
    }
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context, dark_mode: bool) {
    if !dark_mode {
        ctx.set_visuals(Visuals::light());
        return;
    }
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = Color32::from_rgb(20, 20, 28);

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(42, 44, 56);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(52, 54, 68);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_fill = Color32::from_rgb(60, 62, 76);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.striped = false;

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
