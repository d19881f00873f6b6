//! Modal overlays and the page events that dismiss them.

use std::collections::BTreeMap;
use std::sync::RwLock;
use tracing::{debug, error};

/// Key name that closes every open overlay
pub const ESCAPE_KEY: &str = "Escape";

/// A user interaction delivered to the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// Click whose innermost target has the given element id
    Click { target: String },
    KeyDown { key: String },
}

impl PageEvent {
    pub fn click(target: impl Into<String>) -> Self {
        PageEvent::Click {
            target: target.into(),
        }
    }

    pub fn key_down(key: impl Into<String>) -> Self {
        PageEvent::KeyDown { key: key.into() }
    }
}

/// Registry of the page's modal overlays, keyed by element id.
///
/// Each overlay is either active (shown) or not. Ids that were never
/// registered are ignored by every operation.
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    overlays: RwLock<BTreeMap<String, bool>>,
}

impl OverlayRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an inactive overlay. Re-registering keeps the current state.
    pub fn register(&self, id: impl Into<String>) {
        match self.overlays.write() {
            Ok(mut overlays) => {
                overlays.entry(id.into()).or_insert(false);
            }
            Err(e) => error!("Failed to acquire overlay write lock: {e}"),
        }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.overlays
            .read()
            .map(|overlays| overlays.contains_key(id))
            .unwrap_or(false)
    }

    pub fn open(&self, id: &str) {
        self.set_active(id, true);
    }

    pub fn close(&self, id: &str) {
        self.set_active(id, false);
    }

    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.overlays
            .read()
            .map(|overlays| overlays.get(id).copied().unwrap_or(false))
            .unwrap_or(false)
    }

    /// Ids of the overlays currently shown
    #[must_use]
    pub fn active_ids(&self) -> Vec<String> {
        self.overlays
            .read()
            .map(|overlays| {
                overlays
                    .iter()
                    .filter(|(_, active)| **active)
                    .map(|(id, _)| id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn close_all(&self) {
        match self.overlays.write() {
            Ok(mut overlays) => {
                for (id, active) in overlays.iter_mut().filter(|(_, active)| **active) {
                    debug!("Closing overlay {id}");
                    *active = false;
                }
            }
            Err(e) => error!("Failed to acquire overlay write lock: {e}"),
        }
    }

    /// Apply the dismissal rules for a page event.
    ///
    /// A click landing on an overlay's own background closes that overlay;
    /// clicks on anything inside it never reach here with the overlay id as
    /// target. Escape closes every active overlay.
    pub fn handle_event(&self, event: &PageEvent) {
        match event {
            PageEvent::Click { target } => {
                if self.contains(target) {
                    self.close(target);
                }
            }
            PageEvent::KeyDown { key } if key == ESCAPE_KEY => self.close_all(),
            PageEvent::KeyDown { .. } => {}
        }
    }

    fn set_active(&self, id: &str, active: bool) {
        match self.overlays.write() {
            Ok(mut overlays) => {
                if let Some(state) = overlays.get_mut(id) {
                    *state = active;
                    debug!("Overlay {id} active={active}");
                }
            }
            Err(e) => error!("Failed to acquire overlay write lock: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> OverlayRegistry {
        let registry = OverlayRegistry::new();
        registry.register("add-student-modal");
        registry.register("edit-student-modal");
        registry
    }

    #[test]
    fn test_open_and_close() {
        let registry = registry();
        assert!(!registry.is_active("add-student-modal"));

        registry.open("add-student-modal");
        assert!(registry.is_active("add-student-modal"));
        assert!(!registry.is_active("edit-student-modal"));

        registry.close("add-student-modal");
        assert!(!registry.is_active("add-student-modal"));
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let registry = registry();
        registry.open("missing-modal");
        assert!(!registry.is_active("missing-modal"));
        assert!(!registry.contains("missing-modal"));
        assert!(registry.active_ids().is_empty());
    }

    #[test]
    fn test_register_keeps_state() {
        let registry = registry();
        registry.open("add-student-modal");
        registry.register("add-student-modal");
        assert!(registry.is_active("add-student-modal"));
    }

    #[test]
    fn test_background_click_closes_only_that_overlay() {
        let registry = registry();
        registry.open("add-student-modal");
        registry.open("edit-student-modal");

        registry.handle_event(&PageEvent::click("add-student-modal"));

        assert!(!registry.is_active("add-student-modal"));
        assert!(registry.is_active("edit-student-modal"));
    }

    #[test]
    fn test_click_elsewhere_keeps_overlay() {
        let registry = registry();
        registry.open("add-student-modal");

        registry.handle_event(&PageEvent::click("student-name-input"));

        assert!(registry.is_active("add-student-modal"));
    }

    #[test]
    fn test_escape_closes_all() {
        let registry = registry();
        registry.open("add-student-modal");
        registry.open("edit-student-modal");

        registry.handle_event(&PageEvent::key_down("Enter"));
        assert_eq!(registry.active_ids().len(), 2);

        registry.handle_event(&PageEvent::key_down(ESCAPE_KEY));
        assert!(registry.active_ids().is_empty());
    }
}
