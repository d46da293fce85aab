use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use validator::Validate;

use crate::domain::ContactName;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

impl FormField {
    /// Form order, which is also the order completeness is checked in.
    pub const ALL: [FormField; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// Identifier of the matching control in the contact form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please fill in all fields before submitting.")]
    MissingField(FormField),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

// Browsers also treat a byte order mark as whitespace when trimming.
fn trim_field(value: &str) -> String {
    value
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_string()
}

/// The four contact form values as read at submit time, trimmed.
#[derive(Debug, Clone, Validate)]
pub struct FormInput {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1), regex(path = *EMAIL_SHAPE))]
    pub email: String,
    #[validate(length(min = 1))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub message: String,
}

impl FormInput {
    pub fn new(
        name: impl AsRef<str>,
        email: impl AsRef<str>,
        subject: impl AsRef<str>,
        message: impl AsRef<str>,
    ) -> Self {
        Self {
            name: trim_field(name.as_ref()),
            email: trim_field(email.as_ref()),
            subject: trim_field(subject.as_ref()),
            message: trim_field(message.as_ref()),
        }
    }

    fn check(&self) -> Result<(), InputError> {
        let Err(errors) = self.validate() else {
            return Ok(());
        };
        let field_errors = errors.field_errors();

        // Completeness wins over email shape.
        for field in FormField::ALL {
            let missing = field_errors
                .get(field.as_str())
                .is_some_and(|errs| errs.iter().any(|e| e.code == "length"));
            if missing {
                return Err(InputError::MissingField(field));
            }
        }
        Err(InputError::InvalidEmail)
    }
}

/// A contact request that passed both validation gates.
#[derive(Debug, Clone)]
pub struct ContactRequest {
    pub name: ContactName,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl TryFrom<FormInput> for ContactRequest {
    type Error = InputError;

    fn try_from(input: FormInput) -> Result<Self, Self::Error> {
        input.check()?;
        Ok(Self {
            name: ContactName::parse(input.name)
                .map_err(|_| InputError::MissingField(FormField::Name))?,
            email: input.email,
            subject: input.subject,
            message: input.message,
        })
    }
}
