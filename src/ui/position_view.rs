//! Full listing of one position

use eframe::egui;

use crate::api::Position;
use crate::format::FormatContext;
use crate::i18n::translate;
use crate::status::StatusItem;

/// Every carried property, then every attribute the properties do not shadow
pub fn detail_items(position: &Position) -> Vec<StatusItem> {
    position
        .property_keys()
        .map(|key| -> &str { key })
        .chain(
            position
                .attributes
                .keys()
                .map(String::as_str)
                .filter(|key| !position.has_property(key)),
        )
        .filter_map(|key| StatusItem::for_key(key, position))
        .collect()
}

/// Draws the detail table; returns true when the user wants to go back
pub fn show_position(ui: &mut egui::Ui, position: Option<&Position>, format: &FormatContext) -> bool {
    let back = ui.button(format!("⬅ {}", translate("sharedBack"))).clicked();
    ui.separator();

    let Some(position) = position else {
        ui.weak(translate("sharedLoading"));
        return back;
    };

    egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        egui::Grid::new(("position_details", position.id))
            .num_columns(3)
            .striped(true)
            .spacing([24.0, 4.0])
            .show(ui, |ui| {
                for item in detail_items(position) {
                    ui.label(item.field.label());
                    ui.monospace(item.field.key());
                    ui.label(item.value(position, format));
                    ui.end_row();
                }
            });
    });

    back
}
