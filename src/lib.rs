pub mod configuration;
pub mod domain;
pub mod email_client;
pub mod notifications;
pub mod page;
pub mod scheduler;
pub mod service_errors;
pub mod startup;
pub mod submission;
pub mod telemetry;
mod util;
