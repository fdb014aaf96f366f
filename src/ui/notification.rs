//! Error notification strip
//!
//! Shows the most recent backend error along the bottom of the window.

use eframe::egui;

/// Seconds a message stays up unless dismissed earlier
pub const NOTIFICATION_TIMEOUT: f64 = 8.0;

#[derive(Debug, Clone, PartialEq)]
struct Notification {
    message: String,
    shown_at: f64,
}

/// Latest-error-wins notification slot
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    current: Option<Notification>,
}

impl Notifications {
    /// Replaces the current message; `now` is the egui input time
    pub fn push(&mut self, message: impl Into<String>, now: f64) {
        self.current = Some(Notification {
            message: message.into(),
            shown_at: now,
        });
    }

    /// Message currently on screen
    pub fn message(&self) -> Option<&str> {
        self.current.as_ref().map(|n| n.message.as_str())
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Drops the message once it has been up for the timeout
    pub fn expire(&mut self, now: f64) {
        if self
            .current
            .as_ref()
            .map_or(false, |n| now - n.shown_at >= NOTIFICATION_TIMEOUT)
        {
            self.current = None;
        }
    }

    /// Draws the strip as a bottom panel
    pub fn show(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        self.expire(now);
        let Some(message) = self.message().map(str::to_string) else {
            return;
        };

        let mut dismissed = false;
        egui::TopBottomPanel::bottom("notification_strip").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(ui.visuals().error_fg_color, "⚠");
                ui.label(message.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    dismissed = ui.small_button("✕").clicked();
                });
            });
        });

        if dismissed {
            self.dismiss();
        } else {
            ctx.request_repaint_after(std::time::Duration::from_secs(1));
        }
    }
}
