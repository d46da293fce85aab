use std::sync::Arc;

use anyhow::Context;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::configuration::Settings;
use crate::notifications::NotificationPresenter;
use crate::page::SharedPage;
use crate::scheduler::{Scheduler, TokioScheduler};
use crate::service_errors::{ServiceErrorSignal, spawn_service_error_listener};
use crate::submission::ContactFormHandler;

/// The contact page with its handler, wired once at startup.
pub struct Application {
    page: SharedPage,
    handler: ContactFormHandler,
    notifications: NotificationPresenter,
    service_errors: ServiceErrorSignal,
    service_error_listener: JoinHandle<()>,
}

impl Application {
    #[tracing::instrument(name = "Build contact form application", skip_all)]
    pub async fn build(
        configuration: Settings,
        scheduler: Arc<dyn Scheduler>,
    ) -> Result<Self, anyhow::Error> {
        let email_client = configuration
            .email_client
            .client()
            .context("Failed to initialise the email service client")?;

        let page = SharedPage::default();
        let notifications = NotificationPresenter::new(
            page.clone(),
            scheduler.clone(),
            configuration.contact_form.notification_display(),
            configuration.contact_form.notification_exit(),
        );
        let handler = ContactFormHandler::new(
            page.clone(),
            email_client,
            notifications.clone(),
            scheduler,
            configuration.submission(),
        );

        let service_errors = ServiceErrorSignal::new(16);
        let service_error_listener =
            spawn_service_error_listener(service_errors.subscribe(), page.clone());

        tracing::info!("Contact form ready");
        Ok(Self {
            page,
            handler,
            notifications,
            service_errors,
            service_error_listener,
        })
    }

    /// Builds the application on real timers of the current tokio runtime.
    pub async fn build_with_tokio_timers(configuration: Settings) -> Result<Self, anyhow::Error> {
        let scheduler = Arc::new(TokioScheduler::new(Handle::current()));
        Self::build(configuration, scheduler).await
    }

    pub fn page(&self) -> &SharedPage {
        &self.page
    }

    pub fn handler(&self) -> &ContactFormHandler {
        &self.handler
    }

    pub fn notifications(&self) -> &NotificationPresenter {
        &self.notifications
    }

    pub fn service_errors(&self) -> &ServiceErrorSignal {
        &self.service_errors
    }
}

impl Drop for Application {
    fn drop(&mut self) {
        self.service_error_listener.abort();
    }
}
