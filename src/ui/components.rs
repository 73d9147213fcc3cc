//! Shared UI components.

use eframe::egui::{self, Color32, CornerRadius, Margin, Response, RichText, Sense, StrokeKind, Ui};

use crate::feedback::{ConfirmRequest, Decision, NoticeLevel, Notices};
use crate::models::Role;

/// Render a clickable dashboard card with dynamic size.
///
/// Returns the response which can be checked for `.clicked()`.
pub fn dashboard_card(ui: &mut Ui, title: &str, description: &str, icon: &str, size: egui::Vec2) -> Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());

    if ui.is_rect_visible(rect) {
        let visuals = ui.style().interact(&response);
        let scale = size.x / 200.0;

        ui.painter().rect_filled(rect, 8.0, visuals.bg_fill);
        ui.painter()
            .rect_stroke(rect, 8.0, visuals.bg_stroke, StrokeKind::Outside);

        ui.painter().text(
            egui::pos2(rect.center().x, rect.top() + size.y * 0.25),
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(36.0 * scale),
            visuals.text_color(),
        );
        ui.painter().text(
            egui::pos2(rect.center().x, rect.center().y + size.y * 0.07),
            egui::Align2::CENTER_CENTER,
            title,
            egui::FontId::proportional(18.0 * scale),
            visuals.text_color(),
        );
        ui.painter().text(
            egui::pos2(rect.center().x, rect.bottom() - size.y * 0.17),
            egui::Align2::CENTER_CENTER,
            description,
            egui::FontId::proportional(12.0 * scale),
            ui.visuals().weak_text_color(),
        );
    }

    response
}

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
    pub const INFO: Color32 = Color32::from_rgb(120, 170, 255);
}

/// Badge fill and text color per role. Unlisted roles use the last row.
const ROLE_STYLES: [(&str, Color32, Color32); 4] = [
    ("admin", Color32::from_rgb(254, 226, 226), Color32::from_rgb(153, 27, 27)),
    ("minister", Color32::from_rgb(219, 234, 254), Color32::from_rgb(30, 64, 175)),
    ("lector", Color32::from_rgb(220, 252, 231), Color32::from_rgb(22, 101, 52)),
    ("", Color32::from_rgb(243, 244, 246), Color32::from_rgb(31, 41, 55)),
];

/// Badge colors for a role.
pub fn role_colors(role: &Role) -> (Color32, Color32) {
    let label = role.as_str();
    let (_, fill, text) = ROLE_STYLES
        .iter()
        .find(|(name, _, _)| *name == label)
        .unwrap_or(&ROLE_STYLES[ROLE_STYLES.len() - 1]);
    (*fill, *text)
}

/// Small pill showing a role label.
pub fn role_badge(ui: &mut Ui, role: &Role) {
    let (fill, text) = role_colors(role);
    egui::Frame::new()
        .fill(fill)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(role.as_str()).color(text).size(11.0));
        });
}

pub fn notice_color(level: NoticeLevel) -> Color32 {
    match level {
        NoticeLevel::Info => colors::INFO,
        NoticeLevel::Success => colors::SUCCESS,
        NoticeLevel::Warning => colors::WARNING,
        NoticeLevel::Error => colors::ERROR,
    }
}

/// Render a back button that returns true when clicked.
pub fn back_button(ui: &mut Ui) -> bool {
    ui.button(RichText::new("< Back to Dashboard").size(14.0)).clicked()
}

/// Render a panel header with title and a short description.
pub fn panel_header(ui: &mut Ui, title: &str, description: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.label(RichText::new(description).weak());
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}

/// Button with a phosphor icon in front of the label.
pub fn icon_button(ui: &mut Ui, enabled: bool, icon: &str, label: &str) -> Response {
    ui.add_enabled(enabled, egui::Button::new(format!("{icon}  {label}")))
}

/// Centered modal asking a yes/no question.
///
/// Returns the decision once the user clicks a button.
pub fn confirm_dialog<T>(ctx: &egui::Context, request: &ConfirmRequest<T>) -> Option<Decision> {
    let mut decision = None;

    egui::Window::new(request.title.as_str())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(request.message.as_str());
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    decision = Some(Decision::Cancel);
                }
                let confirm = RichText::new(request.confirm_label.as_str()).color(colors::ERROR);
                if ui.button(confirm).clicked() {
                    decision = Some(Decision::Confirm);
                }
            });
        });

    decision
}

/// Stack of transient notices in the bottom-right corner.
pub fn toasts(ctx: &egui::Context, notices: &mut Notices) {
    if notices.is_empty() {
        return;
    }

    let mut dismissed = None;
    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -40.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for (index, notice) in notices.iter().enumerate() {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.colored_label(notice_color(notice.level), notice.message.as_str());
                        if ui.small_button("x").clicked() {
                            dismissed = Some(index);
                        }
                    });
                });
                ui.add_space(4.0);
            }
        });

    if let Some(index) = dismissed {
        notices.dismiss(index);
    }
}
