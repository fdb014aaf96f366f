//! Tracker Desk - desktop client for a GPS tracking server
//!
//! This library provides:
//! - A typed REST client for the tracking server
//! - The session store shared by all screens
//! - The device status card and its actions
//! - The server usage statistics report
//! - Configuration, preferences and logging
//!
//! # Examples
//!
//! ```no_run
//! use tracker_desk::{api::ApiClient, config::ConfigManager, logging};
//!
//! logging::init_logging(logging::LogLevel::Info);
//!
//! let config_manager = ConfigManager::new().unwrap();
//! let config = config_manager.load_or_create_default().unwrap();
//! let client = ApiClient::new(&config.server).unwrap();
//!
//! println!("Talking to {}", client.base_url());
//! ```

#![warn(clippy::all)]

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod i18n;
pub mod logging;
pub mod statistics;
pub mod status;
pub mod store;
pub mod ui;

// Re-export commonly used types at crate root
pub use error::{Result, TrackerDeskError};
