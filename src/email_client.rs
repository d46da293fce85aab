use std::fmt::Debug;
use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

use crate::domain::TemplateParams;
use crate::util::error_chain_fmt;

/// Client for the EmailJS REST API.
#[derive(Clone)]
pub struct EmailClient {
    http_client: Client,
    endpoint: reqwest::Url,
    public_key: String,
    access_token: Option<Secret<String>>,
}

impl EmailClient {
    pub fn new(
        base_url: &str,
        public_key: String,
        access_token: Option<Secret<String>>,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        let endpoint = reqwest::Url::parse(base_url)
            .with_context(|| format!("Invalid email service base url: {base_url}"))?
            .join("api/v1.0/email/send")
            .context("Failed to build the email service send endpoint")?;
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the email service http client")?;
        Ok(Self {
            http_client,
            endpoint,
            public_key,
            access_token,
        })
    }

    #[tracing::instrument(
        name = "Send contact message to the email service",
        skip(self, params)
    )]
    pub async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
    ) -> Result<(), DispatchError> {
        let body = SendEmailRequest {
            service_id,
            template_id,
            user_id: &self.public_key,
            template_params: params,
            access_token: self.access_token.as_ref().map(|t| t.expose_secret().as_str()),
        };
        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DispatchError::Rejected {
                status: status.as_u16(),
                text,
            });
        }
        Ok(())
    }
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
}

#[derive(thiserror::Error)]
pub enum DispatchError {
    #[error("The email service rejected the message ({status}): {text}")]
    Rejected { status: u16, text: String },
    #[error("Failed to reach the email service")]
    Transport(#[from] reqwest::Error),
}

impl Debug for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
