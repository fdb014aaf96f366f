//! Confirm-then-delete dialog for a device

use eframe::egui;
use tracing::info;

use crate::api::TrackerApi;
use crate::error::ApiResult;
use crate::i18n::translate;
use crate::store::{StoreEvent, StoreSender};

/// Response from the remove dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveResponse {
    /// User confirmed removal of this device
    Confirmed(i64),
    /// User cancelled
    Cancelled,
}

/// Remove dialog state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemoveDialog {
    #[default]
    Closed,
    Confirming {
        device_id: i64,
    },
}

impl RemoveDialog {
    /// Opens the dialog for a device
    pub fn open(device_id: i64) -> Self {
        RemoveDialog::Confirming { device_id }
    }

    /// Show the dialog window; returns the user's choice once made
    pub fn show(&mut self, ctx: &egui::Context) -> Option<RemoveResponse> {
        let RemoveDialog::Confirming { device_id } = *self else {
            return None;
        };
        let mut response = None;

        egui::Window::new(translate("sharedRemove"))
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(translate("sharedRemoveConfirm"));
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    let remove = egui::Button::new(
                        egui::RichText::new(translate("sharedRemove")).color(ui.visuals().error_fg_color),
                    );
                    if ui.add(remove).clicked() {
                        response = Some(RemoveResponse::Confirmed(device_id));
                    }
                    if ui.button(translate("sharedCancel")).clicked() {
                        response = Some(RemoveResponse::Cancelled);
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            response = Some(RemoveResponse::Cancelled);
        }
        if response.is_some() {
            *self = RemoveDialog::Closed;
        }
        response
    }
}

/// Deletes the device, then refreshes the device list
///
/// # Errors
///
/// Returns the backend error of whichever call failed first
pub async fn remove_device<A: TrackerApi>(api: &A, device_id: i64, store: &StoreSender) -> ApiResult<()> {
    api.delete_device(device_id).await?;
    info!("Removed device {}", device_id);
    refresh_devices(api, store).await
}

/// Re-fetches `/api/devices` and publishes the new list
///
/// # Errors
///
/// Returns the backend error if the list cannot be fetched
pub async fn refresh_devices<A: TrackerApi>(api: &A, store: &StoreSender) -> ApiResult<()> {
    let devices = api.devices().await?;
    // Receiver is gone only when the app is shutting down
    let _ = store.send(StoreEvent::DevicesRefreshed(devices));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::api::Device;
    use crate::store::Store;
    use serde_json::json;

    fn device(id: i64) -> Device {
        serde_json::from_value(json!({ "id": id, "name": "d", "uniqueId": id.to_string() })).unwrap()
    }

    #[test]
    fn test_remove_refreshes_store() {
        let api = FakeApi::with(|s| s.devices = vec![device(1), device(2)]);
        let mut store = Store::new();

        tokio_test::block_on(remove_device(&api, 1, &store.sender())).unwrap();
        store.drain();

        let snapshot = store.snapshot();
        assert!(snapshot.device(1).is_none());
        assert!(snapshot.device(2).is_some());
        assert_eq!(
            api.calls(),
            vec!["DELETE /api/devices/1".to_string(), "GET /api/devices".to_string()]
        );
    }

    #[test]
    fn test_refresh_failure_surfaces_body() {
        let api = FakeApi::with(|s| s.fail_devices = Some("Session expired".into()));
        let mut store = Store::new();

        let err = tokio_test::block_on(refresh_devices(&api, &store.sender())).unwrap_err();
        assert_eq!(err.to_string(), "Session expired");
        assert!(!store.drain());
    }

    #[test]
    fn test_dialog_state() {
        assert_eq!(RemoveDialog::default(), RemoveDialog::Closed);
        assert_eq!(RemoveDialog::open(4), RemoveDialog::Confirming { device_id: 4 });
    }
}
