//! Floating status card for the selected device
//!
//! The card is an egui window, so it can be dragged anywhere; it starts
//! in the bottom-right corner. It never touches shared state directly:
//! everything the user asks for comes back as [`CardAction`]s.

use eframe::egui;
use tracing::info;

use super::items::visible_items;
use super::links::{apple_maps_url, google_maps_url, street_view_url};
use super::menu::{menu_actions, MenuAction, MenuEvent, MenuState};
use crate::api::Position;
use crate::format::FormatContext;
use crate::i18n::translate;
use crate::store::SessionSnapshot;
use crate::ui::Route;

const CARD_WIDTH: f32 = 720.0;
const CARD_ROUNDING: f32 = 20.0;
const MEDIA_HEIGHT: f32 = 140.0;
const GRID_COLUMNS: usize = 6;

/// Placeholder header buttons; they only log for now
const PLACEHOLDER_BUTTONS: [&str; 4] = ["sharedGeofence", "sharedShare", "sharedMaintenance", "sharedWallet"];

/// Something the user asked the card to do
#[derive(Debug, Clone, PartialEq)]
pub enum CardAction {
    /// Close the card
    Close,
    /// Switch to another screen
    Navigate(Route),
    /// Create a geofence around this position
    CreateGeofence(Position),
    /// Open an external link in the browser
    OpenUrl(String),
    /// Ask for confirmation, then remove the device
    Remove(i64),
}

/// Everything the card reads but does not own
pub struct CardContext<'a> {
    pub snapshot: &'a SessionSnapshot,
    /// Comma-separated field keys
    pub position_items: &'a str,
    pub format: &'a FormatContext,
    /// Decoded device image, if the device has one
    pub image: Option<&'a egui::TextureHandle>,
}

/// Status card widget state
#[derive(Debug, Default)]
pub struct StatusCard {
    menu: MenuState,
    more_button: Option<egui::Rect>,
    /// Distance from the bottom-right corner
    offset: f32,
}

/// Maps a menu entry to the action it triggers
pub fn card_action(action: MenuAction, device_id: i64, position: &Position) -> CardAction {
    match action {
        MenuAction::ShowDetails => CardAction::Navigate(Route::PositionDetails(position.id)),
        MenuAction::CreateGeofence => CardAction::CreateGeofence(position.clone()),
        MenuAction::GoogleMaps => CardAction::OpenUrl(google_maps_url(position)),
        MenuAction::AppleMaps => CardAction::OpenUrl(apple_maps_url(position)),
        MenuAction::StreetView => CardAction::OpenUrl(street_view_url(position)),
        MenuAction::Share => CardAction::Navigate(Route::DeviceShare(device_id)),
        MenuAction::Remove => CardAction::Remove(device_id),
    }
}

/// Decodes raw image bytes into something egui can upload
pub fn decode_device_image(bytes: &[u8]) -> Result<egui::ColorImage, image::ImageError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}

impl StatusCard {
    /// Creates a card placed `offset` points from the bottom-right corner
    pub fn new(offset: f32) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    /// Current menu state
    pub fn menu(&self) -> MenuState {
        self.menu
    }

    /// Draws the card; renders nothing until the device is loaded
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        device_id: i64,
        position: Option<&Position>,
        cx: &CardContext<'_>,
    ) -> Vec<CardAction> {
        let mut actions = Vec::new();
        let Some(device) = cx.snapshot.device(device_id) else {
            self.menu = MenuState::Closed;
            return actions;
        };

        let screen = ctx.screen_rect();
        let frame = egui::Frame::window(&ctx.style()).rounding(egui::Rounding::same(CARD_ROUNDING));

        egui::Window::new(device.name.as_str())
            .id(egui::Id::new(("status_card", device_id)))
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .frame(frame)
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .default_pos(screen.right_bottom() - egui::vec2(self.offset, self.offset))
            .default_width(CARD_WIDTH)
            .show(ctx, |ui| {
                match cx.image {
                    Some(texture) => Self::media_header(ui, texture, &mut actions),
                    None => self.title_header(ui, &device.name, position, cx.snapshot, &mut actions),
                }
                ui.separator();
                if let Some(position) = position {
                    Self::field_grid(ui, position, cx);
                }
            });

        self.show_menu(ctx, device_id, position, cx.snapshot, &mut actions);
        actions
    }

    /// Device image with a single close control on top
    fn media_header(ui: &mut egui::Ui, texture: &egui::TextureHandle, actions: &mut Vec<CardAction>) {
        let size = egui::vec2(ui.available_width().max(CARD_WIDTH), MEDIA_HEIGHT);
        let response = ui.add(egui::Image::new(texture).fit_to_exact_size(size));

        let close = egui::Rect::from_min_size(
            response.rect.right_top() + egui::vec2(-28.0, 4.0),
            egui::vec2(24.0, 24.0),
        );
        if ui.put(close, egui::Button::new("✕").small()).clicked() {
            actions.push(CardAction::Close);
        }
    }

    fn title_header(
        &mut self,
        ui: &mut egui::Ui,
        name: &str,
        position: Option<&Position>,
        snapshot: &SessionSnapshot,
        actions: &mut Vec<CardAction>,
    ) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(name).strong());
            ui.add_space(ui.available_width() * 0.25);

            for key in PLACEHOLDER_BUTTONS {
                let enabled = key != "sharedShare" || !snapshot.share_disabled();
                if ui.add_enabled(enabled, egui::Button::new(translate(key))).clicked() {
                    info!("{} clicked", translate(key));
                }
            }

            let more = ui.add_enabled(position.is_some(), egui::Button::new(translate("sharedMore")));
            self.more_button = Some(more.rect);
            if more.clicked() {
                self.menu = self.menu.transition(MenuEvent::Toggle(more.rect.left_bottom()));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("✕").clicked() {
                    actions.push(CardAction::Close);
                }
            });
        });
    }

    fn field_grid(ui: &mut egui::Ui, position: &Position, cx: &CardContext<'_>) {
        let items = visible_items(cx.position_items, position);

        egui::Grid::new(("status_card_fields", position.device_id))
            .num_columns(GRID_COLUMNS)
            .spacing([16.0, 2.0])
            .show(ui, |ui| {
                for (index, item) in items.iter().enumerate() {
                    ui.vertical(|ui| {
                        ui.horizontal(|ui| {
                            if let Some(icon) = item.field.icon() {
                                ui.label(icon);
                            }
                            ui.label(item.field.label());
                        });
                        ui.label(egui::RichText::new(item.value(position, cx.format)).weak());
                    });
                    if (index + 1) % GRID_COLUMNS == 0 {
                        ui.end_row();
                    }
                }
            });
    }

    fn show_menu(
        &mut self,
        ctx: &egui::Context,
        device_id: i64,
        position: Option<&Position>,
        snapshot: &SessionSnapshot,
        actions: &mut Vec<CardAction>,
    ) {
        let MenuState::Open { anchor } = self.menu else {
            return;
        };
        let Some(position) = position else {
            self.menu = self.menu.transition(MenuEvent::Dismiss);
            return;
        };

        let entries = menu_actions(
            snapshot.share_disabled(),
            snapshot.user.temporary,
            snapshot.device_readonly(),
        );
        let mut selected = None;

        let area = egui::Area::new(egui::Id::new(("status_card_menu", device_id)))
            .order(egui::Order::Foreground)
            .fixed_pos(anchor)
            .show(ctx, |ui| {
                egui::Frame::menu(ui.style()).show(ui, |ui| {
                    for entry in entries {
                        let label = if entry.is_link() {
                            format!("{} ↗", entry)
                        } else {
                            entry.to_string()
                        };
                        let text = egui::RichText::new(label);
                        let text = if entry == MenuAction::ShowDetails {
                            text.color(ui.visuals().hyperlink_color)
                        } else {
                            text
                        };
                        if ui.button(text).clicked() {
                            selected = Some(entry);
                        }
                    }
                });
            });

        if let Some(entry) = selected {
            self.menu = self.menu.transition(MenuEvent::Select);
            actions.push(card_action(entry, device_id, position));
            return;
        }

        let clicked_outside = ctx.input(|i| {
            i.pointer.any_click()
                && i.pointer.interact_pos().map_or(false, |pos| {
                    !area.response.rect.contains(pos)
                        && !self.more_button.map_or(false, |rect| rect.contains(pos))
                })
        });
        if clicked_outside || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.menu = self.menu.transition(MenuEvent::Dismiss);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn position() -> Position {
        let mut position = Position::new(42, 7, 10.0, 20.0);
        position.course = 180.0;
        position
    }

    #[test]
    fn test_menu_entries_map_to_actions() {
        let position = position();
        assert_eq!(
            card_action(MenuAction::ShowDetails, 7, &position),
            CardAction::Navigate(Route::PositionDetails(42))
        );
        assert_eq!(
            card_action(MenuAction::Share, 7, &position),
            CardAction::Navigate(Route::DeviceShare(7))
        );
        assert_eq!(
            card_action(MenuAction::CreateGeofence, 7, &position),
            CardAction::CreateGeofence(position.clone())
        );
        assert_eq!(
            card_action(MenuAction::StreetView, 7, &position),
            CardAction::OpenUrl(street_view_url(&position))
        );
        assert_eq!(card_action(MenuAction::Remove, 7, &position), CardAction::Remove(7));
    }

    #[test]
    fn test_card_starts_closed() {
        let card = StatusCard::new(8.0);
        assert_eq!(card.menu(), MenuState::Closed);
    }

    #[test]
    fn test_decode_device_image() {
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(image::RgbaImage::new(3, 2))
            .write_to(&mut bytes, image::ImageOutputFormat::Png)
            .unwrap();

        let decoded = decode_device_image(bytes.get_ref()).unwrap();
        assert_eq!(decoded.size, [3, 2]);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_device_image(b"not an image").is_err());
    }
}
