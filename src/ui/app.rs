//! Main application window
//!
//! Owns the store and every screen. Network calls run on the tokio
//! runtime and report back through an [`AppMessage`] channel that is
//! drained at the start of each frame.

use std::collections::HashMap;
use std::future::Future;

use chrono::{FixedOffset, Local};
use eframe::egui;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, StatisticsRecord, TrackerApi};
use crate::config::{Config, PreferenceStore, Preferences};
use crate::error::{ApiResult, Result, TrackerDeskError};
use crate::format::FormatContext;
use crate::i18n::translate;
use crate::statistics::{fetch_statistics, PageAction, StatisticsPage};
use crate::status::card::decode_device_image;
use crate::status::{
    create_geofence_for_position, remove_device, CardAction, CardContext, OrphanPolicy, RemoveDialog,
    RemoveResponse, StatusCard,
};
use crate::store::{load_session, SessionSnapshot, Store};
use crate::ui::notification::Notifications;
use crate::ui::position_view::show_position;
use crate::ui::Route;

const TITLE: &str = "Tracker Desk";

/// Results delivered from background tasks
pub enum AppMessage {
    /// A request failed; show its text
    Error(String),
    /// Switch screens after a task completed
    Navigate(Route),
    /// Device image download finished
    DeviceImage {
        device_id: i64,
        image: Option<egui::ColorImage>,
    },
    /// Statistics submission completed
    Statistics(ApiResult<Vec<StatisticsRecord>>),
}

enum DeviceImage {
    Loading,
    Ready(egui::TextureHandle),
    Unavailable,
}

/// Tracker Desk main window
pub struct TrackerDeskApp {
    runtime: Handle,
    api: ApiClient,
    store: Store,
    preference_store: PreferenceStore,
    preferences: Preferences,
    route: Route,
    selected_device: Option<i64>,
    card: StatusCard,
    card_offset: f32,
    remove_dialog: RemoveDialog,
    statistics: StatisticsPage,
    notifications: Notifications,
    images: HashMap<i64, DeviceImage>,
    message_tx: mpsc::UnboundedSender<AppMessage>,
    message_rx: mpsc::UnboundedReceiver<AppMessage>,
    window_size: [f32; 2],
}

fn local_offset() -> FixedOffset {
    *Local::now().offset()
}

impl TrackerDeskApp {
    /// Creates the application; nothing is fetched until [`run`](Self::run)
    pub fn new(runtime: Handle, api: ApiClient, config: &Config, preference_store: PreferenceStore) -> Self {
        let preferences = preference_store.load();
        let (message_tx, message_rx) = mpsc::unbounded_channel();

        Self {
            runtime,
            api,
            store: Store::new(),
            statistics: StatisticsPage::new(config.ui.default_period, &preferences.statistics_columns),
            preference_store,
            preferences,
            route: Route::default(),
            selected_device: None,
            card: StatusCard::new(config.ui.card_offset),
            card_offset: config.ui.card_offset,
            remove_dialog: RemoveDialog::default(),
            notifications: Notifications::default(),
            images: HashMap::new(),
            message_tx,
            message_rx,
            window_size: [config.ui.window_width, config.ui.window_height],
        }
    }

    /// Opens the window and blocks until it is closed
    pub fn run(self) -> Result<()> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(self.window_size)
                .with_title(TITLE),
            ..Default::default()
        };

        eframe::run_native(
            TITLE,
            options,
            Box::new(move |cc| {
                let app = self;
                app.reload(&cc.egui_ctx);
                Box::new(app)
            }),
        )
        .map_err(|e| TrackerDeskError::Window(e.to_string()))
    }

    /// Runs `task` on the runtime and queues its message, if any
    fn spawn<F>(&self, ctx: &egui::Context, task: F)
    where
        F: Future<Output = Option<AppMessage>> + Send + 'static,
    {
        let tx = self.message_tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            if let Some(message) = task.await {
                // Receiver is gone only after the window closed
                let _ = tx.send(message);
            }
            ctx.request_repaint();
        });
    }

    fn reload(&self, ctx: &egui::Context) {
        let api = self.api.clone();
        let store = self.store.sender();
        self.spawn(ctx, async move {
            load_session(&api, &store)
                .await
                .err()
                .map(|e| AppMessage::Error(e.to_string()))
        });
    }

    fn navigate(&mut self, route: Route) {
        info!("Navigating to {}", route);
        self.route = route;
    }

    fn select_device(&mut self, device_id: i64) {
        if self.selected_device != Some(device_id) {
            debug!("Selected device {}", device_id);
            self.selected_device = Some(device_id);
            self.card = StatusCard::new(self.card_offset);
        }
    }

    fn process_messages(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        while let Ok(message) = self.message_rx.try_recv() {
            match message {
                AppMessage::Error(text) => self.notifications.push(text, now),
                AppMessage::Navigate(route) => self.navigate(route),
                AppMessage::DeviceImage { device_id, image } => {
                    let slot = match image {
                        Some(image) => DeviceImage::Ready(ctx.load_texture(
                            format!("device_image_{}", device_id),
                            image,
                            egui::TextureOptions::LINEAR,
                        )),
                        None => DeviceImage::Unavailable,
                    };
                    self.images.insert(device_id, slot);
                }
                AppMessage::Statistics(result) => {
                    if let Some(text) = self.statistics.report_mut().finish(result) {
                        self.notifications.push(text, now);
                    }
                }
            }
        }
    }

    /// Starts the image download the first time a device is shown
    fn ensure_image(&mut self, ctx: &egui::Context, snapshot: &SessionSnapshot, device_id: i64) {
        if self.images.contains_key(&device_id) {
            return;
        }
        let Some(device) = snapshot.device(device_id) else {
            return;
        };
        let Some(name) = device.image() else {
            return;
        };

        self.images.insert(device_id, DeviceImage::Loading);
        let api = self.api.clone();
        let unique_id = device.unique_id.clone();
        let name = name.to_string();

        self.spawn(ctx, async move {
            let image = match api.media(&unique_id, &name).await {
                Ok(bytes) => decode_device_image(&bytes)
                    .map_err(|e| warn!("Could not decode image of device {}: {}", device_id, e))
                    .ok(),
                Err(e) => {
                    warn!("Could not fetch image of device {}: {}", device_id, e);
                    None
                }
            };
            Some(AppMessage::DeviceImage { device_id, image })
        });
    }

    fn top_bar(&mut self, ctx: &egui::Context) {
        let mut reload = false;
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .selectable_label(self.route == Route::Devices, translate("sharedDevices"))
                    .clicked()
                {
                    self.navigate(Route::Devices);
                }
                if ui
                    .selectable_label(self.route == Route::Statistics, translate("statisticsTitle"))
                    .clicked()
                {
                    self.navigate(Route::Statistics);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    reload = ui.button(translate("sharedRefresh")).clicked();
                });
            });
        });
        if reload {
            self.reload(ctx);
        }
    }

    fn device_list(&mut self, ctx: &egui::Context, snapshot: &SessionSnapshot) {
        let mut selected = None;
        egui::SidePanel::left("device_list")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading(translate("sharedDevices"));
                ui.separator();
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for device in snapshot.devices.values() {
                        let active = self.selected_device == Some(device.id);
                        let mut response = ui.selectable_label(active, device.name.as_str());
                        if let Some(status) = &device.status {
                            response = response.on_hover_text(status.as_str());
                        }
                        if response.clicked() {
                            selected = Some(device.id);
                        }
                    }
                });
            });
        if let Some(device_id) = selected {
            self.select_device(device_id);
        }
    }

    fn status_card(&mut self, ctx: &egui::Context, snapshot: &SessionSnapshot, format: &FormatContext) {
        let Some(device_id) = self.selected_device else {
            return;
        };
        self.ensure_image(ctx, snapshot, device_id);

        let position_items = snapshot.position_items(self.preferences.position_items.as_deref());
        let image = match self.images.get(&device_id) {
            Some(DeviceImage::Ready(texture)) => Some(texture),
            _ => None,
        };
        let cx = CardContext {
            snapshot,
            position_items: &position_items,
            format,
            image,
        };
        let actions = self.card.show(ctx, device_id, snapshot.position(device_id), &cx);

        for action in actions {
            self.handle_card_action(ctx, action);
        }
    }

    fn handle_card_action(&mut self, ctx: &egui::Context, action: CardAction) {
        match action {
            CardAction::Close => self.selected_device = None,
            CardAction::Navigate(route) => self.navigate(route),
            CardAction::CreateGeofence(position) => {
                let api = self.api.clone();
                self.spawn(ctx, async move {
                    let name = translate("sharedGeofence");
                    let message = match create_geofence_for_position(&api, name, &position, OrphanPolicy::Keep).await {
                        Ok(geofence) => AppMessage::Navigate(Route::GeofenceSettings(geofence.id)),
                        Err(e) => AppMessage::Error(e.to_string()),
                    };
                    Some(message)
                });
            }
            CardAction::OpenUrl(url) => {
                debug!("Opening {}", url);
                ctx.open_url(egui::OpenUrl::new_tab(url));
            }
            CardAction::Remove(device_id) => self.remove_dialog = RemoveDialog::open(device_id),
        }
    }

    fn handle_page_action(&mut self, ctx: &egui::Context, action: PageAction) {
        match action {
            PageAction::Submit { from, to } => {
                self.statistics.report_mut().begin();
                let api = self.api.clone();
                self.spawn(ctx, async move {
                    Some(AppMessage::Statistics(fetch_statistics(&api, from, to).await))
                });
            }
            PageAction::ColumnsChanged(keys) => {
                self.preferences.statistics_columns = keys;
                if let Err(e) = self.preference_store.save(&self.preferences) {
                    warn!("Failed to save preferences: {}", e);
                    self.notifications.push(e.to_string(), ctx.input(|i| i.time));
                }
            }
        }
    }

    fn confirm_removal(&mut self, ctx: &egui::Context) {
        match self.remove_dialog.show(ctx) {
            Some(RemoveResponse::Confirmed(device_id)) => {
                if self.selected_device == Some(device_id) {
                    self.selected_device = None;
                }
                let api = self.api.clone();
                let store = self.store.sender();
                self.spawn(ctx, async move {
                    remove_device(&api, device_id, &store)
                        .await
                        .err()
                        .map(|e| AppMessage::Error(e.to_string()))
                });
            }
            Some(RemoveResponse::Cancelled) => debug!("Removal cancelled"),
            None => {}
        }
    }

    /// Screens reached from the card that live outside this client
    fn linked_screen(&mut self, ctx: &egui::Context, route: Route) {
        let mut back = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            back = ui.button(format!("⬅ {}", translate("sharedBack"))).clicked();
            ui.separator();
            let title = match route {
                Route::GeofenceSettings(_) => translate("sharedGeofence"),
                _ => translate("deviceShare"),
            };
            ui.heading(title);
            ui.monospace(route.path());
        });
        if back {
            self.navigate(Route::Devices);
        }
    }
}

impl eframe::App for TrackerDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_messages(ctx);
        if self.store.drain() {
            ctx.request_repaint();
        }

        let snapshot = self.store.snapshot();
        let offset = local_offset();
        let format = snapshot.format_context(offset);

        self.top_bar(ctx);
        self.notifications.show(ctx);

        match self.route {
            Route::Devices => {
                self.device_list(ctx, &snapshot);
                egui::CentralPanel::default().show(ctx, |ui| {
                    if self.selected_device.is_none() {
                        ui.centered_and_justified(|ui| {
                            ui.weak(translate("deviceSelect"));
                        });
                    }
                });
                self.status_card(ctx, &snapshot, &format);
            }
            Route::PositionDetails(position_id) => {
                let back = egui::CentralPanel::default()
                    .show(ctx, |ui| show_position(ui, snapshot.position_by_id(position_id), &format))
                    .inner;
                if back {
                    self.navigate(Route::Devices);
                }
            }
            Route::Statistics => {
                let hours12 = snapshot.twelve_hour_format();
                let actions = egui::CentralPanel::default()
                    .show(ctx, |ui| self.statistics.show(ui, hours12, offset))
                    .inner;
                for action in actions {
                    self.handle_page_action(ctx, action);
                }
            }
            route @ (Route::GeofenceSettings(_) | Route::DeviceShare(_)) => self.linked_screen(ctx, route),
        }

        self.confirm_removal(ctx);
    }
}
