use std::time::Duration;

use anyhow::Context;
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::email_client::EmailClient;
use crate::submission::SubmissionSettings;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub email_client: EmailClientSettings,
    pub contact_form: ContactFormSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub access_token: Option<Secret<String>>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn client(&self) -> Result<EmailClient, anyhow::Error> {
        EmailClient::new(
            &self.base_url,
            self.public_key.clone(),
            self.access_token.clone(),
            self.timeout(),
        )
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct ContactFormSettings {
    pub fallback_contact: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub button_restore_delay_milliseconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub notification_display_milliseconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub notification_exit_milliseconds: u64,
}

impl ContactFormSettings {
    pub fn notification_display(&self) -> Duration {
        Duration::from_millis(self.notification_display_milliseconds)
    }

    pub fn notification_exit(&self) -> Duration {
        Duration::from_millis(self.notification_exit_milliseconds)
    }
}

impl Settings {
    pub fn submission(&self) -> SubmissionSettings {
        SubmissionSettings {
            service_id: self.email_client.service_id.clone(),
            template_id: self.email_client.template_id.clone(),
            fallback_contact: self.contact_form.fallback_contact.clone(),
            button_restore_delay: Duration::from_millis(
                self.contact_form.button_restore_delay_milliseconds,
            ),
        }
    }
}

pub fn get_configuration() -> Result<Settings, anyhow::Error> {
    let base_path = std::env::current_dir().context("Failed to determine the current directory")?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("Failed to load configuration sources")?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize configuration")
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}
