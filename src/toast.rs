//! Transient toast notifications.
//!
//! A toast is appended to the page's container, stays visible for
//! [`ToastTiming::visible`], plays its exit animation for
//! [`ToastTiming::exit`] and is then removed.

use askama::Template;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, error, warn};

/// Anything that can surface a short message to the user.
///
/// The API client reports failures through this seam so it never needs to
/// know whether a page actually has a toast container.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, message: &str, kind: ToastKind);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    #[default]
    Info,
    Entry,
    Exit,
}

impl ToastKind {
    /// Parse a kind name, falling back to `Info` for anything unknown
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "success" => ToastKind::Success,
            "error" => ToastKind::Error,
            "entry" => ToastKind::Entry,
            "exit" => ToastKind::Exit,
            _ => ToastKind::Info,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
            ToastKind::Entry => "entry",
            ToastKind::Exit => "exit",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "✅",
            ToastKind::Error => "❌",
            ToastKind::Info => "ℹ️",
            ToastKind::Entry => "🟢",
            ToastKind::Exit => "🟡",
        }
    }
}

impl std::fmt::Display for ToastKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    /// Exit animation running; removal follows
    Leaving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTiming {
    pub visible: Duration,
    pub exit: Duration,
}

impl Default for ToastTiming {
    fn default() -> Self {
        Self {
            visible: Duration::from_millis(5000),
            exit: Duration::from_millis(300),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub message: String,
    pub kind: ToastKind,
    pub phase: ToastPhase,
}

impl Toast {
    #[must_use]
    pub fn icon(&self) -> &'static str {
        self.kind.icon()
    }

    /// CSS classes of the notification element
    #[must_use]
    pub fn class_name(&self) -> String {
        format!("toast {}", self.kind)
    }

    #[must_use]
    pub fn is_leaving(&self) -> bool {
        self.phase == ToastPhase::Leaving
    }
}

#[derive(Template)]
#[template(path = "toast_stack.html")]
struct ToastStackTemplate<'a> {
    toasts: &'a [Toast],
    exit_ms: u128,
}

/// The page's toast container
pub struct ToastStack {
    entries: RwLock<Vec<Toast>>,
    next_id: AtomicU64,
    timing: ToastTiming,
}

impl ToastStack {
    #[must_use]
    pub fn new(timing: ToastTiming) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            timing,
        }
    }

    /// Append a toast and schedule its dismissal. Returns the toast id.
    ///
    /// Dismissal needs a tokio runtime; without one the toast stays until the
    /// stack is dropped.
    pub fn push(self: &Arc<Self>, title: &str, message: &str, kind: ToastKind) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let toast = Toast {
            id,
            title: title.to_string(),
            message: message.to_string(),
            kind,
            phase: ToastPhase::Visible,
        };

        match self.entries.write() {
            Ok(mut entries) => entries.push(toast),
            Err(e) => {
                error!("Failed to acquire toast write lock: {e}");
                return id;
            }
        }
        debug!("Toast {id} shown: kind={kind}, title={title:?}");

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let stack = Arc::clone(self);
                handle.spawn(async move { stack.dismiss_after_timeout(id).await });
            }
            Err(_) => warn!("No async runtime; toast {id} will not auto-dismiss"),
        }

        id
    }

    async fn dismiss_after_timeout(&self, id: u64) {
        tokio::time::sleep(self.timing.visible).await;
        self.set_phase(id, ToastPhase::Leaving);

        tokio::time::sleep(self.timing.exit).await;
        self.remove(id);
        debug!("Toast {id} removed");
    }

    fn set_phase(&self, id: u64, phase: ToastPhase) {
        match self.entries.write() {
            Ok(mut entries) => {
                if let Some(toast) = entries.iter_mut().find(|t| t.id == id) {
                    toast.phase = phase;
                }
            }
            Err(e) => error!("Failed to acquire toast write lock: {e}"),
        }
    }

    /// Remove a toast immediately. Returns whether it was present.
    pub fn remove(&self, id: u64) -> bool {
        match self.entries.write() {
            Ok(mut entries) => {
                let before = entries.len();
                entries.retain(|t| t.id != id);
                entries.len() != before
            }
            Err(e) => {
                error!("Failed to acquire toast write lock: {e}");
                false
            }
        }
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<Toast> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.iter().find(|t| t.id == id).cloned())
    }

    /// Current toasts, oldest first
    #[must_use]
    pub fn snapshot(&self) -> Vec<Toast> {
        self.entries
            .read()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the container contents as HTML
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render
    pub fn render(&self) -> crate::error::Result<String> {
        let toasts = self.snapshot();
        let template = ToastStackTemplate {
            toasts: &toasts,
            exit_ms: self.timing.exit.as_millis(),
        };
        Ok(template.render()?)
    }
}

impl Notifier for Arc<ToastStack> {
    fn notify(&self, title: &str, message: &str, kind: ToastKind) {
        self.push(title, message, kind);
    }
}
