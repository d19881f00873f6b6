//! # Library Logger UI console
//!
//! Headless runner for the Library Logger page runtime. It boots a page
//! against a running Library Logger server, keeps the clock ticking and, on
//! dashboard pages, polls the stats endpoint until interrupted.
//!
//! - First argument: page path (defaults to "/dashboard")
//! - Second argument: path to configuration file (defaults to "config.json5")
//!
//! ## Example Usage
//!
//! ```bash
//! # Poll the dashboard of the server configured in config.json5
//! cargo run
//!
//! # Boot the students page with a custom configuration
//! cargo run /students library.json5
//! ```
//!
//! Log levels can be controlled through the `RUST_LOG` environment variable.

use library_logger_ui::api::ApiClient;
use library_logger_ui::config::Config;
use library_logger_ui::dashboard::DashboardLoader;
use library_logger_ui::error::LibraryLoggerError;
use library_logger_ui::page::Page;
use library_logger_ui::poller::DashboardRefresh;
use library_logger_ui::runtime::Runtime;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), LibraryLoggerError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let page_path = env::args().nth(1).unwrap_or_else(|| "/dashboard".to_string());
    let config_file_path = env::args().nth(2).map(PathBuf::from);

    let config = Config::load(config_file_path.as_deref())?;
    tracing::debug!("Booting page {page_path} against {}", config.base_url);

    let page = Arc::new(
        Page::new(page_path)
            .with_datetime()
            .with_toast_container(config.toast_timing()),
    );
    let api = ApiClient::new(&config.api_base()?, page.clone());
    let loader = Arc::new(DashboardLoader::new(api));
    let hook: Arc<dyn DashboardRefresh> = loader.clone();

    let runtime = Runtime::boot(page, &config, Some(hook));
    if runtime.poller().is_running() {
        loader.load().await;
    }

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| LibraryLoggerError::Generic(format!("Failed to listen for Ctrl-C: {e}")))?;

    runtime.shutdown().await;
    Ok(())
}
