use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::domain::{ContactRequest, InputError, SubmissionOutcome, TemplateParams};
use crate::email_client::EmailClient;
use crate::notifications::{NotificationPresenter, ToastKind};
use crate::page::{ButtonState, SharedPage};
use crate::scheduler::Scheduler;

pub const SUCCESS_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";
pub const BUSY_MESSAGE: &str = "Your message is still being sent. Please wait a moment.";

pub fn failure_message(fallback_contact: &str) -> String {
    format!(
        "Failed to send message. Please try again or contact me directly at {fallback_contact}"
    )
}

#[derive(Debug, Clone)]
pub struct SubmissionSettings {
    pub service_id: String,
    pub template_id: String,
    pub fallback_contact: String,
    pub button_restore_delay: Duration,
}

#[derive(Debug)]
pub enum Submission {
    /// Validation failed; nothing was sent.
    Rejected(InputError),
    /// A previous submission has not finished yet; nothing was sent.
    Busy,
    /// The message is on its way. The handle resolves once the page reflects the outcome.
    Dispatched(JoinHandle<SubmissionOutcome>),
}

// Who holds the form between an accepted submit and the button restore.
const IDLE: u8 = 0;
const DISPATCHING: u8 = 1;
const RESTORING: u8 = 2;

/// Handles submits of one contact form.
#[derive(Clone)]
pub struct ContactFormHandler {
    page: SharedPage,
    email_client: EmailClient,
    notifications: NotificationPresenter,
    scheduler: Arc<dyn Scheduler>,
    settings: Arc<SubmissionSettings>,
    phase: Arc<AtomicU8>,
}

impl ContactFormHandler {
    pub fn new(
        page: SharedPage,
        email_client: EmailClient,
        notifications: NotificationPresenter,
        scheduler: Arc<dyn Scheduler>,
        settings: SubmissionSettings,
    ) -> Self {
        Self {
            page,
            email_client,
            notifications,
            scheduler,
            settings: Arc::new(settings),
            phase: Arc::new(AtomicU8::new(IDLE)),
        }
    }

    /// True from an accepted submit until its button has been restored.
    pub fn is_in_flight(&self) -> bool {
        self.phase.load(Ordering::Acquire) != IDLE
    }

    /// Must be called from within a tokio runtime: the dispatch runs on a spawned task.
    #[tracing::instrument(name = "Submit contact form", skip(self))]
    pub fn submit(&self) -> Submission {
        if let Err(phase) =
            self.phase
                .compare_exchange(IDLE, DISPATCHING, Ordering::AcqRel, Ordering::Acquire)
        {
            if phase == DISPATCHING {
                tracing::warn!("Ignoring submit while a previous message is still being sent");
                self.page.lock().alert(BUSY_MESSAGE);
            } else {
                // Nothing is being sent, the button is only waiting to come back.
                tracing::debug!("Ignoring submit until the submit button is restored");
            }
            return Submission::Busy;
        }

        let (snapshot, input) = {
            let mut page = self.page.lock();
            let snapshot = page.submit_button.begin_sending();
            (snapshot, page.form.read())
        };

        let request = match ContactRequest::try_from(input) {
            Ok(request) => request,
            Err(e) => {
                tracing::info!(error.message = %e, error.details = ?e, "Contact form rejected");
                self.page.lock().alert(e.to_string());
                self.restore_button(snapshot);
                return Submission::Rejected(e);
            }
        };
        let params = TemplateParams::from(&request);

        let handler = self.clone();
        let handle = tokio::spawn(
            async move {
                let outcome: SubmissionOutcome = handler
                    .email_client
                    .send(
                        &handler.settings.service_id,
                        &handler.settings.template_id,
                        &params,
                    )
                    .await
                    .map_err(|e| {
                        tracing::error!(
                            error.cause_chain = ?e,
                            error.message = %e,
                            "Failed to send contact message"
                        );
                        e
                    })
                    .into();
                handler.complete(&outcome, snapshot);
                outcome
            }
            .in_current_span(),
        );
        Submission::Dispatched(handle)
    }

    fn complete(&self, outcome: &SubmissionOutcome, snapshot: ButtonState) {
        match outcome {
            SubmissionOutcome::Success => {
                tracing::info!("Contact message sent");
                self.notifications.show(SUCCESS_MESSAGE, ToastKind::Success);
                self.page.lock().form.clear();
            }
            SubmissionOutcome::Failure { .. } => {
                self.notifications.show(
                    failure_message(&self.settings.fallback_contact),
                    ToastKind::Error,
                );
            }
        }
        self.restore_button(snapshot);
    }

    /// Puts `snapshot` back on the submit button after the restore delay and
    /// accepts submits again.
    fn restore_button(&self, snapshot: ButtonState) {
        self.phase.store(RESTORING, Ordering::Release);
        let page = self.page.clone();
        let phase = self.phase.clone();
        self.scheduler.schedule(
            self.settings.button_restore_delay,
            Box::new(move || {
                page.lock().submit_button = snapshot;
                phase.store(IDLE, Ordering::Release);
            }),
        );
    }
}
