//! View model of the contact page: the form controls, the submit button, the
//! toast slot and pending blocking alerts. A host renders it; everything in
//! the crate mutates it through [`SharedPage`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{FormField, FormInput};
use crate::notifications::{Toast, ToastId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFormFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Subject => self.subject = value,
            FormField::Message => self.message = value,
        }
    }

    pub fn read(&self) -> FormInput {
        FormInput::new(&self.name, &self.email, &self.subject, &self.message)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Presentation of the submit control.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonState {
    pub label: String,
    pub spinner: bool,
    pub disabled: bool,
    pub opacity: f32,
    pub background: Option<String>,
}

impl Default for ButtonState {
    fn default() -> Self {
        Self {
            label: "Send Message".into(),
            spinner: false,
            disabled: false,
            opacity: 1.0,
            background: None,
        }
    }
}

impl ButtonState {
    /// Switches to the sending presentation and returns the state it replaced.
    pub fn begin_sending(&mut self) -> ButtonState {
        let sending = ButtonState {
            label: "Sending...".into(),
            spinner: true,
            disabled: true,
            opacity: 0.8,
            background: self.background.clone(),
        };
        std::mem::replace(self, sending)
    }
}

#[derive(Debug, Default)]
pub struct ContactPage {
    pub form: ContactFormFields,
    pub submit_button: ButtonState,
    toast: Option<Toast>,
    toasts_shown: usize,
    alerts: Vec<String>,
}

impl ContactPage {
    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Number of toasts mounted since the page was created.
    pub fn toasts_shown(&self) -> usize {
        self.toasts_shown
    }

    /// Mounts `toast`, returning the one it displaced.
    pub(crate) fn mount_toast(&mut self, toast: Toast) -> Option<Toast> {
        self.toasts_shown += 1;
        self.toast.replace(toast)
    }

    /// The mounted toast, if it is the one identified by `id`.
    pub(crate) fn toast_mut(&mut self, id: ToastId) -> Option<&mut Toast> {
        self.toast.as_mut().filter(|t| t.id() == id)
    }

    pub(crate) fn unmount_toast(&mut self, id: ToastId) -> Option<Toast> {
        if self.toast.as_ref().is_some_and(|t| t.id() == id) {
            self.toast.take()
        } else {
            None
        }
    }

    /// Queues a blocking alert for the host to display.
    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SharedPage(Arc<Mutex<ContactPage>>);

impl SharedPage {
    pub fn new(page: ContactPage) -> Self {
        Self(Arc::new(Mutex::new(page)))
    }

    /// A callback that panicked while holding the page must not lock the form forever.
    pub fn lock(&self) -> MutexGuard<'_, ContactPage> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
