//! Dashboard panel with parish overview, navigation cards and recent activity.

use eframe::egui::{self, Color32, CornerRadius, Margin, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{GEAR, SCROLL};

use super::app::{App, Panel};
use super::components::{dashboard_card, notice_color};
use crate::models::Role;

/// Show the dashboard panel.
///
/// Returns `Some(panel)` if navigation is requested.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    let mut next_panel = None;

    ui.vertical_centered(|ui| {
        ui.add_space(30.0);

        // Header
        ui.label(RichText::new("Parish Admin").size(32.0).strong());
        ui.add_space(5.0);
        let subtitle = match &app.settings.parish {
            Some(parish) => format!("{} · {}, {}", parish.name, parish.city, parish.state),
            None if app.settings.loading => "Loading parish...".to_string(),
            None => "No parish selected".to_string(),
        };
        ui.label(RichText::new(subtitle).size(14.0).weak());

        ui.add_space(30.0);

        // Stat cards row
        ui.horizontal(|ui| {
            let available = ui.available_width();
            let start_offset = ((available - 340.0) / 2.0).max(0.0);
            ui.add_space(start_offset);

            stat_card(
                ui,
                "Members",
                &app.settings.members.len().to_string(),
                "People in this parish",
            );
            let admins = app
                .settings
                .members
                .iter()
                .filter(|m| m.has_role(&Role::Admin))
                .count();
            stat_card(ui, "Admins", &admins.to_string(), "Can manage settings");
        });

        ui.add_space(30.0);

        // Navigation cards row
        let available = ui.available_width();
        let num_cards = 2.0;
        let spacing = 30.0;
        let total_spacing = spacing * (num_cards - 1.0);
        let card_width = ((available - total_spacing) / num_cards).clamp(150.0, 250.0);
        let card_height = card_width * 0.75;
        let card_size = egui::vec2(card_width, card_height);
        let total_width = card_width * num_cards + total_spacing;
        let start_offset = ((available - total_width) / 2.0).max(0.0);

        ui.horizontal(|ui| {
            ui.add_space(start_offset);

            if dashboard_card(ui, "Parish Settings", "Details, members & invites", GEAR, card_size).clicked() {
                next_panel = Some(Panel::ParishSettings);
            }

            ui.add_space(spacing);

            if dashboard_card(ui, "New Petition", "Prepare petitions for Mass", SCROLL, card_size).clicked() {
                next_panel = Some(Panel::NewPetition);
            }
        });

        ui.add_space(30.0);
    });

    // Recent activity
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::symmetric(10, 0))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.label(RichText::new("Recent Activity").strong());
            ui.add_space(10.0);

            ScrollArea::vertical().max_height(150.0).show(ui, |ui| {
                if app.notices.is_empty() {
                    ui.label(RichText::new("No recent activity").weak());
                } else {
                    for notice in app.notices.iter().rev().take(10) {
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(notice.timestamp.format("%H:%M:%S").to_string())
                                    .small()
                                    .color(Color32::DARK_GRAY),
                            );
                            ui.label(RichText::new(&notice.message).color(notice_color(notice.level)));
                        });
                    }
                }
            });
        });

    next_panel
}

/// Render a stat card with title, value, and subtitle.
fn stat_card(ui: &mut Ui, title: &str, value: &str, subtitle: &str) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::same(5))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(140.0);

            ui.vertical(|ui| {
                ui.label(RichText::new(title).small());
                ui.label(RichText::new(value).heading().strong());
                ui.label(RichText::new(subtitle).small().weak());
            });
        });
}
