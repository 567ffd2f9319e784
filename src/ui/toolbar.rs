use egui::{menu, RichText, Ui};
use egui_phosphor::regular;

use staff_timeline::model::ZoomMode;

use crate::app::PlannerApp;
use crate::ui::theme;

/// Render the top menu bar with window navigation.
pub fn show_toolbar(app: &mut PlannerApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  Open Data File...").clicked() {
                app.open_data_file();
                ui.close_menu();
            }
            if ui.button("  Open Data Folder").clicked() {
                app.open_data_folder();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Export Utilization CSV...").clicked() {
                app.export_utilization();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Timeline Scale").small().weak());
            for zoom in ZoomMode::ALL {
                if ui.radio(app.view.zoom() == zoom, zoom.label()).clicked() {
                    app.set_view(app.view.set_zoom_mode(zoom));
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui.button("  Reload").clicked() {
                app.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if ui
            .button(regular::ARROW_LEFT)
            .on_hover_text("Previous period")
            .clicked()
        {
            app.set_view(app.view.scroll_back());
        }
        if ui.button("Today").clicked() {
            app.set_view(app.view.go_to_today(app.today));
        }
        if ui
            .button(regular::ARROW_RIGHT)
            .on_hover_text("Next period")
            .clicked()
        {
            app.set_view(app.view.scroll_forward());
        }

        let mut jump = app.view.anchor();
        if ui
            .add(egui_extras::DatePickerButton::new(&mut jump).id_salt("timeline_jump"))
            .changed()
        {
            app.set_view(app.view.set_anchor(jump));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(format!(
                    "{} – {}",
                    app.view.window_start().format("%d %b %Y"),
                    app.view.window_end().format("%d %b %Y"),
                ))
                .size(11.0)
                .weak(),
            );
        });
    });
}
