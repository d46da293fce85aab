use serde::Serialize;

use crate::domain::ContactRequest;

/// Variables of the remote email template. `address` and `phone` exist in the
/// template but are not collected by the form, so they are always sent empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub first_name: String,
    pub last_name: String,
    pub problem: String,
    pub address: String,
    pub mail: String,
    pub phone: String,
    pub msg: String,
}

impl From<&ContactRequest> for TemplateParams {
    fn from(request: &ContactRequest) -> Self {
        Self {
            first_name: request.name.first_name().to_string(),
            last_name: request.name.last_name(),
            problem: request.subject.clone(),
            address: String::new(),
            mail: request.email.clone(),
            phone: String::new(),
            msg: request.message.clone(),
        }
    }
}
