//! Desktop user interface
//!
//! The main window, its screens and the error notification strip.

pub mod app;
pub mod notification;
pub mod position_view;
pub mod route;

pub use app::{AppMessage, TrackerDeskApp};
pub use notification::Notifications;
pub use route::Route;
