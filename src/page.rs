//! Headless model of a Library Logger page.
//!
//! A page may or may not carry each of the elements the runtime writes to:
//! the `datetime` header slot, the toast container, modal overlays and forms.
//! Every operation aimed at an element the page lacks is a silent no-op.

use crate::modal::{OverlayRegistry, PageEvent};
use crate::toast::{Notifier, ToastKind, ToastStack, ToastTiming};
use crate::validation::{Form, ValidationRules};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, error};

pub struct Page {
    path: String,
    datetime: Option<RwLock<String>>,
    toasts: Option<Arc<ToastStack>>,
    overlays: OverlayRegistry,
    forms: RwLock<HashMap<String, Form>>,
}

impl Page {
    /// A bare page at `path` with none of the optional elements
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            datetime: None,
            toasts: None,
            overlays: OverlayRegistry::new(),
            forms: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn with_datetime(mut self) -> Self {
        self.datetime = Some(RwLock::new(String::new()));
        self
    }

    #[must_use]
    pub fn with_toast_container(mut self, timing: ToastTiming) -> Self {
        self.toasts = Some(Arc::new(ToastStack::new(timing)));
        self
    }

    #[must_use]
    pub fn with_overlay(self, id: impl Into<String>) -> Self {
        self.overlays.register(id);
        self
    }

    #[must_use]
    pub fn with_form(self, form: Form) -> Self {
        self.insert_form(form);
        self
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Current text of the `datetime` slot, if the page has one
    #[must_use]
    pub fn datetime_text(&self) -> Option<String> {
        self.datetime
            .as_ref()
            .and_then(|slot| slot.read().ok().map(|text| text.clone()))
    }

    /// Overwrite the `datetime` slot. Returns false if the page has none.
    pub fn set_datetime_text(&self, text: &str) -> bool {
        let Some(slot) = &self.datetime else {
            return false;
        };
        match slot.write() {
            Ok(mut current) => {
                *current = text.to_string();
                true
            }
            Err(e) => {
                error!("Failed to acquire datetime write lock: {e}");
                false
            }
        }
    }

    #[must_use]
    pub fn toasts(&self) -> Option<&Arc<ToastStack>> {
        self.toasts.as_ref()
    }

    #[must_use]
    pub fn overlays(&self) -> &OverlayRegistry {
        &self.overlays
    }

    pub fn insert_form(&self, form: Form) {
        match self.forms.write() {
            Ok(mut forms) => {
                forms.insert(form.id.clone(), form);
            }
            Err(e) => error!("Failed to acquire forms write lock: {e}"),
        }
    }

    /// Snapshot of a form's fields and error annotations
    #[must_use]
    pub fn form(&self, id: &str) -> Option<Form> {
        self.forms.read().ok().and_then(|forms| forms.get(id).cloned())
    }

    /// Type into a form field. Returns false if the form or field is missing.
    pub fn set_field_value(&self, form_id: &str, field: &str, value: &str) -> bool {
        match self.forms.write() {
            Ok(mut forms) => forms
                .get_mut(form_id)
                .is_some_and(|form| form.set_value(field, value)),
            Err(e) => {
                error!("Failed to acquire forms write lock: {e}");
                false
            }
        }
    }

    /// Deliver a click or key event to the page
    pub fn dispatch(&self, event: &PageEvent) {
        debug!("Page event on {}: {event:?}", self.path);
        self.overlays.handle_event(event);
    }
}

/// Show a toast in the page's container; no-op without a container.
pub fn show_toast(page: &Page, title: &str, message: &str, kind: ToastKind) {
    match page.toasts() {
        Some(stack) => {
            stack.push(title, message, kind);
        }
        None => debug!("No toast container on {}; dropping toast {title:?}", page.path()),
    }
}

pub fn open_modal(page: &Page, id: &str) {
    page.overlays().open(id);
}

pub fn close_modal(page: &Page, id: &str) {
    page.overlays().close(id);
}

/// Validate the form with id `form_id` against `rules`.
///
/// Returns false when the page has no such form.
pub fn validate_form(page: &Page, form_id: &str, rules: &ValidationRules) -> bool {
    match page.forms.write() {
        Ok(mut forms) => match forms.get_mut(form_id) {
            Some(form) => form.validate(rules),
            None => {
                debug!("No form {form_id} on {}", page.path());
                false
            }
        },
        Err(e) => {
            error!("Failed to acquire forms write lock: {e}");
            false
        }
    }
}

impl Notifier for Page {
    fn notify(&self, title: &str, message: &str, kind: ToastKind) {
        show_toast(self, title, message, kind);
    }
}
