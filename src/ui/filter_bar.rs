use egui::{RichText, Ui};
use egui_phosphor::regular;

use staff_timeline::model::{TimelineViewState, TEAMS};

use crate::ui::theme;

/// Team toggles and the name search box. Returns the new view state when the filter changed.
pub fn show_filter_bar(view: &TimelineViewState, ui: &mut Ui) -> Option<TimelineViewState> {
    let mut next = None;
    ui.horizontal_wrapped(|ui| {
        ui.label(
            RichText::new("Teams")
                .font(theme::font_sub())
                .color(theme::TEXT_SECONDARY),
        );
        for (tag, label) in TEAMS {
            let on = view.teams().contains(*tag);
            if ui.selectable_label(on, *label).clicked() {
                next = Some(view.toggle_team(tag));
            }
        }
        if !view.teams().is_empty() && ui.small_button("Clear").clicked() {
            next = Some(view.set_team_filter(Vec::<String>::new()));
        }

        ui.separator();

        ui.label(RichText::new(regular::MAGNIFYING_GLASS).color(theme::TEXT_DIM));
        let mut search = view.search().to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut search)
                .hint_text("Search employees")
                .desired_width(180.0),
        );
        if response.changed() {
            next = Some(view.set_search(search));
        }
    });
    next
}
