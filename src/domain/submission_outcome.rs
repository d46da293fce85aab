use crate::email_client::DispatchError;

/// How a dispatched contact message ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    Failure { reason: String },
}

impl From<Result<(), DispatchError>> for SubmissionOutcome {
    fn from(result: Result<(), DispatchError>) -> Self {
        match result {
            Ok(()) => Self::Success,
            Err(e) => Self::Failure {
                reason: e.to_string(),
            },
        }
    }
}
