mod contact_name;
mod form_input;
mod submission_outcome;
mod template_params;

pub use contact_name::ContactName;
pub use form_input::{ContactRequest, FormField, FormInput, InputError};
pub use submission_outcome::SubmissionOutcome;
pub use template_params::TemplateParams;
