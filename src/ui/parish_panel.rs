//! Parish settings panel: parish details, member roster and invitations.

use eframe::egui::{self, Align, Layout, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{
    ARROWS_CLOCKWISE, CHURCH, DOTS_THREE_VERTICAL, ENVELOPE, FLOPPY_DISK, GEAR, TRASH, USER_GEAR, USERS,
};

use super::components::{back_button, colors, confirm_dialog, icon_button, panel_header, role_badge};
use crate::models::{ParishMember, Role, RolePreset};
use crate::parish_settings::{ParishSettings, SettingsTab};

/// Show the parish settings panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(settings: &mut ParishSettings, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);
    panel_header(
        ui,
        "Parish Settings",
        "Manage your parish information, members, and administrative settings",
    );

    if let Some(request) = &settings.pending_removal
        && let Some(decision) = confirm_dialog(ui.ctx(), request)
    {
        settings.resolve_remove(decision);
    }

    if settings.loading && settings.parish.is_none() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading parish settings...");
        });
        return go_back;
    }

    if settings.parish.is_none() {
        show_no_parish(ui);
        return go_back;
    }

    ui.horizontal(|ui| {
        let members_label = format!("{USERS}  Members ({})", settings.members.len());
        ui.selectable_value(&mut settings.tab, SettingsTab::Settings, format!("{GEAR}  Parish Settings"));
        ui.selectable_value(&mut settings.tab, SettingsTab::Members, members_label);
        ui.selectable_value(&mut settings.tab, SettingsTab::Invite, format!("{ENVELOPE}  Invite Member"));

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if icon_button(ui, !settings.loading, ARROWS_CLOCKWISE, "Refresh").clicked() {
                settings.load();
            }
        });
    });

    ui.separator();
    ui.add_space(10.0);

    ScrollArea::vertical().id_salt("parish_scroll").show(ui, |ui| match settings.tab {
        SettingsTab::Settings => show_settings_tab(settings, ui),
        SettingsTab::Members => show_members_tab(settings, ui),
        SettingsTab::Invite => show_invite_tab(settings, ui),
    });

    go_back
}

fn show_no_parish(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(RichText::new(CHURCH).size(48.0).weak());
        ui.add_space(10.0);
        ui.label(RichText::new("No Parish Selected").size(18.0).strong());
        ui.label(RichText::new("Please select a parish to manage its settings.").weak());
    });
}

fn show_settings_tab(settings: &mut ParishSettings, ui: &mut Ui) {
    ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
        let label = if settings.saving { "Saving..." } else { "Save Changes" };
        if icon_button(ui, !settings.saving, FLOPPY_DISK, label).clicked() {
            settings.save();
        }
    });

    ui.add_space(10.0);

    ui.group(|ui| {
        ui.heading(format!("{CHURCH}  Parish Information"));
        ui.add_space(5.0);

        egui::Grid::new("parish_form_grid")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                ui.label("Parish Name: *");
                ui.add(
                    egui::TextEdit::singleline(&mut settings.form.name)
                        .desired_width(360.0)
                        .hint_text("St. Mary's Catholic Church"),
                );
                ui.end_row();

                ui.label("City: *");
                ui.add(
                    egui::TextEdit::singleline(&mut settings.form.city)
                        .desired_width(240.0)
                        .hint_text("New York"),
                );
                ui.end_row();

                ui.label("State: *");
                ui.add(
                    egui::TextEdit::singleline(&mut settings.form.state)
                        .desired_width(120.0)
                        .hint_text("NY"),
                );
                ui.end_row();
            });
    });

    ui.add_space(15.0);

    if let Some(parish) = &settings.parish {
        ui.group(|ui| {
            ui.heading("Parish Details");
            ui.add_space(5.0);

            egui::Grid::new("parish_details_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Parish ID").weak());
                    ui.label(RichText::new(parish.id.as_str()).monospace());
                    ui.end_row();

                    ui.label(RichText::new("Created").weak());
                    ui.label(parish.created_at.format("%Y-%m-%d").to_string());
                    ui.end_row();
                });
        });
    }
}

fn show_members_tab(settings: &mut ParishSettings, ui: &mut Ui) {
    ui.heading(format!("{USERS}  Parish Members"));
    ui.add_space(10.0);

    if settings.loading_members {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading members...");
        });
        return;
    }

    if settings.members.is_empty() {
        ui.label(RichText::new("No members found").weak());
        return;
    }

    let mut role_change: Option<(ParishMember, RolePreset)> = None;
    let mut removal: Option<ParishMember> = None;

    for member in &settings.members {
        let busy = settings.busy_members.contains(&member.user_id);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(member.display_name()).strong());
                    ui.label(RichText::new(member.subtitle()).weak());
                    ui.horizontal(|ui| {
                        for role in &member.roles {
                            role_badge(ui, role);
                        }
                    });
                });

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if busy {
                        ui.spinner();
                        return;
                    }
                    ui.menu_button(DOTS_THREE_VERTICAL, |ui| {
                        for preset in [RolePreset::MakeAdmin, RolePreset::MakeMember] {
                            let enabled = !preset.is_disabled_for(&member.roles);
                            if icon_button(ui, enabled, USER_GEAR, preset.label()).clicked() {
                                role_change = Some((member.clone(), preset));
                                ui.close();
                            }
                        }
                        let remove = RichText::new(format!("{TRASH}  Remove")).color(colors::ERROR);
                        if ui.button(remove).clicked() {
                            removal = Some(member.clone());
                            ui.close();
                        }
                    });
                });
            });
        });
        ui.add_space(6.0);
    }

    if let Some((member, preset)) = role_change {
        settings.update_role(&member, preset);
    }
    if let Some(member) = removal {
        settings.request_remove(&member);
    }
}

fn show_invite_tab(settings: &mut ParishSettings, ui: &mut Ui) {
    ui.group(|ui| {
        ui.heading(format!("{ENVELOPE}  Invite New Member"));
        ui.add_space(5.0);

        egui::Grid::new("invite_grid")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                ui.label("Email Address: *");
                ui.add(
                    egui::TextEdit::singleline(&mut settings.invite.email)
                        .desired_width(300.0)
                        .hint_text("member@example.com"),
                );
                ui.end_row();

                ui.label("Initial Role:");
                egui::ComboBox::from_id_salt("invite_role")
                    .width(160.0)
                    .selected_text(settings.invite.role.display_name())
                    .show_ui(ui, |ui| {
                        for role in Role::INVITABLE {
                            let label = role.display_name();
                            ui.selectable_value(&mut settings.invite.role, role, label);
                        }
                    });
                ui.end_row();
            });

        ui.add_space(10.0);

        let label = if settings.inviting { "Inviting..." } else { "Send Invitation" };
        if icon_button(ui, !settings.inviting, ENVELOPE, label).clicked() {
            settings.invite();
        }
    });

    ui.add_space(15.0);

    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(egui::Margin::same(12))
        .corner_radius(egui::CornerRadius::same(6))
        .show(ui, |ui| {
            ui.label(RichText::new("How it works:").strong());
            ui.label(RichText::new("• If the email belongs to an existing user, they'll be added immediately").weak());
            ui.label(RichText::new("• If the email is new, an invitation will be sent (feature coming soon)").weak());
            ui.label(RichText::new("• Only parish admins can invite new members").weak());
        });
}
