//! # Library Logger UI
//!
//! This library provides the page runtime for the Library Logger attendance
//! application: the header clock, toast notifications, the JSON API client,
//! timestamp formatting, modal overlays, dashboard polling, form validation
//! and debouncing. Pages are modelled headlessly by [`page::Page`], so every
//! piece can be driven and inspected without a browser.
//!
//! ## Getting Started
//!
//! ```no_run
//! use library_logger_ui::{
//!     api::ApiClient, config::Config, dashboard::DashboardLoader, page::Page, runtime::Runtime,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), library_logger_ui::error::LibraryLoggerError> {
//!     let config = Config::load(None)?;
//!     let page = Arc::new(
//!         Page::new("/dashboard")
//!             .with_datetime()
//!             .with_toast_container(config.toast_timing()),
//!     );
//!     let api = ApiClient::new(&config.api_base()?, page.clone());
//!     let loader = Arc::new(DashboardLoader::new(api));
//!
//!     let runtime = Runtime::boot(page, &config, Some(loader));
//!     tokio::signal::ctrl_c().await?;
//!     runtime.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - `config`: JSON5 configuration and the clock style setting
//! - `error`: the crate's error type
//! - `page`: the headless page and its element helpers
//! - `clock`, `format`: time rendering
//! - `toast`, `modal`, `validation`: page elements
//! - `api`, `dashboard`, `poller`: server data and periodic refresh
//! - `debounce`: call-rate limiting
//! - `runtime`: the page-load boot sequence

pub mod error;

/// Configuration management module
///
/// Loads the runtime settings from a JSON5 file. Every setting has a default
/// matching the stock Library Logger pages.
pub mod config;

/// Header clock rendering
pub mod clock;

/// ISO-8601 timestamp formatting
pub mod format;

/// Toast notifications and the [`toast::Notifier`] seam
pub mod toast;

/// Modal overlay registry and page events
pub mod modal;

/// Form fields and validation rules
pub mod validation;

/// Headless page model
pub mod page;

/// JSON API client
pub mod api;

/// Periodic dashboard refresh
pub mod poller;

/// Dashboard stats model and loader
pub mod dashboard;

pub mod debounce;

/// Boot sequence tying the page, clock and poller together
pub mod runtime;
