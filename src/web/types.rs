//! The records this application stores and the payloads it accepts.
//! Includes the structs that need to be validated, their parsing implementations and tests for those.

use chrono::{DateTime, Utc};
use derive_more::Deref;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;
use uuid::Uuid;
use validator::ValidateEmail;

/// Maximum length of an email address, in graphemes.
const MAX_EMAIL_LEN: usize = 256;

// ###################################
// ->   DESERIALIZABLE PAYLOADS
// ###################################
/// Deserializable status check. Fields are present but not yet validated.
#[derive(Debug, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

/// Deserializable contact form.
#[derive(Debug, Deserialize)]
pub struct ContactFormCreate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    pub reason: String,
    pub message: String,
}

/// Deserializable newsletter signup.
#[derive(Debug, Deserialize)]
pub struct NewsletterSignupCreate {
    pub email: String,
}

// ###################################
// ->   RECORDS
// ###################################
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactForm {
    pub id: String,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub reason: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsletterSignup {
    pub id: String,
    pub email: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    pub const COLLECTION: &'static str = "status_checks";
}

impl ContactForm {
    pub const COLLECTION: &'static str = "contacts";
}

impl NewsletterSignup {
    pub const COLLECTION: &'static str = "newsletter_signups";
}

/// Random UUID v4 rendered as hyphenated text.
fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

impl TryFrom<StatusCheckCreate> for StatusCheck {
    type Error = DataParsingError;

    fn try_from(input: StatusCheckCreate) -> Result<Self, Self::Error> {
        let client_name = RequiredText::parse("client_name", input.client_name)?;

        Ok(StatusCheck {
            id: generate_id(),
            client_name: client_name.into(),
            timestamp: Utc::now(),
        })
    }
}

impl TryFrom<ContactFormCreate> for ContactForm {
    type Error = DataParsingError;

    fn try_from(input: ContactFormCreate) -> Result<Self, Self::Error> {
        let name = RequiredText::parse("name", input.name)?;
        let email = ValidEmail::parse(input.email)?;
        let reason = RequiredText::parse("reason", input.reason)?;
        let message = RequiredText::parse("message", input.message)?;
        // The site form posts an empty string for an unfilled company.
        let company = input
            .company
            .filter(|company| !company.is_empty())
            .map(|company| RequiredText::parse("company", company))
            .transpose()?;

        Ok(ContactForm {
            id: generate_id(),
            name: name.into(),
            email: email.into(),
            company: company.map(Into::into),
            reason: reason.into(),
            message: message.into(),
            timestamp: Utc::now(),
        })
    }
}

impl TryFrom<NewsletterSignupCreate> for NewsletterSignup {
    type Error = DataParsingError;

    fn try_from(input: NewsletterSignupCreate) -> Result<Self, Self::Error> {
        let email = ValidEmail::parse(input.email)?;

        Ok(NewsletterSignup {
            id: generate_id(),
            email: email.into(),
            timestamp: Utc::now(),
        })
    }
}

// ###################################
// ->   VALIDATED FIELDS
// ###################################
/// Validated Email
#[derive(Debug, Clone, Deref)]
pub struct ValidEmail(String);

impl AsRef<str> for ValidEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ValidEmail> for String {
    fn from(value: ValidEmail) -> Self {
        value.0
    }
}

impl ValidEmail {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref();

        if value.graphemes(true).count() > MAX_EMAIL_LEN {
            return Err(DataParsingError::EmailTooLong);
        }

        if value.validate_email() {
            Ok(ValidEmail(value.to_owned()))
        } else {
            Err(DataParsingError::EmailInvalid(value.to_owned()))
        }
    }
}

/// A text field that must not be empty.
#[derive(Debug, Clone, Deref)]
pub struct RequiredText(String);

impl From<RequiredText> for String {
    fn from(value: RequiredText) -> Self {
        value.0
    }
}

impl RequiredText {
    pub fn parse(field: &'static str, value: String) -> Result<Self, DataParsingError> {
        if value.is_empty() {
            return Err(DataParsingError::FieldEmpty(field));
        }

        Ok(RequiredText(value))
    }
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("field '{0}' must not be empty")]
    FieldEmpty(&'static str),

    #[error("field 'email' is not a valid email address: {0}")]
    EmailInvalid(String),
    #[error("field 'email' is too long")]
    EmailTooLong,
}
