use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::page::SharedPage;
use crate::scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(Uuid);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "fa-check-circle",
            Self::Error => "fa-exclamation-circle",
        }
    }

    /// Background of the overlay.
    pub fn accent(&self) -> &'static str {
        match self {
            Self::Success => "#10b981",
            Self::Error => "#3b82f6",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    /// Playing the exit transition, removed once it ends.
    Leaving,
}

#[derive(Debug, Clone)]
pub struct Toast {
    id: ToastId,
    kind: ToastKind,
    message: String,
    phase: ToastPhase,
}

impl Toast {
    fn new(kind: ToastKind, message: String) -> Self {
        Self {
            id: ToastId(Uuid::new_v4()),
            kind,
            message,
            phase: ToastPhase::Visible,
        }
    }

    pub fn id(&self) -> ToastId {
        self.id
    }

    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn phase(&self) -> ToastPhase {
        self.phase
    }
}

/// Shows one dismissible toast at a time on the page.
#[derive(Clone)]
pub struct NotificationPresenter {
    page: SharedPage,
    scheduler: Arc<dyn Scheduler>,
    display_for: Duration,
    exit_transition: Duration,
}

impl NotificationPresenter {
    pub fn new(
        page: SharedPage,
        scheduler: Arc<dyn Scheduler>,
        display_for: Duration,
        exit_transition: Duration,
    ) -> Self {
        Self {
            page,
            scheduler,
            display_for,
            exit_transition,
        }
    }

    /// Replaces whatever toast is mounted and arms its auto-dismiss timer.
    #[tracing::instrument(name = "Show notification", skip(self, message))]
    pub fn show(&self, message: impl Into<String>, kind: ToastKind) -> ToastId {
        let toast = Toast::new(kind, message.into());
        let id = toast.id();

        if let Some(previous) = self.page.lock().mount_toast(toast) {
            tracing::debug!(previous = %previous.id(), "Discarded the notification on screen");
        }

        let presenter = self.clone();
        self.scheduler
            .schedule(self.display_for, Box::new(move || presenter.dismiss(id)));
        id
    }

    /// Starts the exit transition of toast `id`. Does nothing if that toast is
    /// already leaving, was replaced or is gone.
    pub fn dismiss(&self, id: ToastId) {
        {
            let mut page = self.page.lock();
            let Some(toast) = page.toast_mut(id) else {
                return;
            };
            if toast.phase == ToastPhase::Leaving {
                return;
            }
            toast.phase = ToastPhase::Leaving;
        }

        let page = self.page.clone();
        self.scheduler.schedule(
            self.exit_transition,
            Box::new(move || {
                page.lock().unmount_toast(id);
            }),
        );
    }
}
