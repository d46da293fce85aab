use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::page::SharedPage;

pub const SERVICE_ERROR_MESSAGE: &str =
    "There was an error with the email service. Please try again later or contact me directly.";

/// An out-of-band failure reported by the email service integration.
#[derive(Debug, Clone)]
pub struct ServiceErrorEvent {
    pub detail: String,
}

/// Process-wide channel for [`ServiceErrorEvent`]s.
#[derive(Clone)]
pub struct ServiceErrorSignal {
    sender: broadcast::Sender<ServiceErrorEvent>,
}

impl ServiceErrorSignal {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServiceErrorEvent> {
        self.sender.subscribe()
    }

    /// Returns how many listeners received the event.
    pub fn emit(&self, detail: impl Into<String>) -> usize {
        self.sender
            .send(ServiceErrorEvent {
                detail: detail.into(),
            })
            .unwrap_or(0)
    }
}

/// Raises the service error alert on `page` for every event until the signal is dropped.
pub fn spawn_service_error_listener(
    mut receiver: broadcast::Receiver<ServiceErrorEvent>,
    page: SharedPage,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    tracing::error!(error.detail = %event.detail, "Email service reported an error");
                    page.lock().alert(SERVICE_ERROR_MESSAGE);
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Missed email service error events");
                    page.lock().alert(SERVICE_ERROR_MESSAGE);
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
