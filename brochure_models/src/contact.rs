use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::macros::{id, nutype_string};

id!(SubmissionId);

/// Untrusted contact form input, exactly as the client sent it.
///
/// No key or value type is guaranteed. Documents that are not JSON objects
/// are treated as an empty submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawContactSubmission(pub Map<String, Value>);

impl RawContactSubmission {
    pub fn get(&self, field: SubmissionField) -> Option<&Value> {
        self.0.get(field.as_str())
    }

    pub fn insert(&mut self, field: SubmissionField, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.as_str().into(), value.into())
    }

    pub fn remove(&mut self, field: SubmissionField) -> Option<Value> {
        self.0.remove(field.as_str())
    }
}

impl From<Value> for RawContactSubmission {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

/// A contact form submission that passed validation and was sanitized.
///
/// Validation runs on the raw input, so sanitizing can still leave fields
/// that would not pass it again: a name or message made only of `<` and `>`
/// ends up empty, and an email can lose its shape by having angle brackets
/// removed or by being truncated to [`ContactEmail::MAX_LENGTH`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub message: ContactMessage,
    pub services: Vec<String>,
    pub company: ContactCompany,
    pub phone: ContactPhone,
    pub submitted_at: DateTime<Utc>,
    pub source_address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactSubmissionReceipt {
    pub id: SubmissionId,
    pub submitted_at: DateTime<Utc>,
}

nutype_string!(ContactName(validate(len_char_max = 100)));
nutype_string!(ContactEmail(validate(len_char_max = 255)));
nutype_string!(ContactMessage(validate(len_char_max = 2000)));
nutype_string!(ContactCompany(validate(len_char_max = 200)));
nutype_string!(ContactPhone(validate(len_char_max = 20)));

impl ContactName {
    pub const MAX_LENGTH: usize = 100;
}

impl ContactEmail {
    pub const MAX_LENGTH: usize = 255;
}

impl ContactMessage {
    pub const MAX_LENGTH: usize = 2000;
}

impl ContactCompany {
    pub const MAX_LENGTH: usize = 200;
}

impl ContactPhone {
    pub const MAX_LENGTH: usize = 20;
}

/// The fields of a contact form submission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionField {
    Name,
    Email,
    Message,
    Services,
    Company,
    Phone,
}

impl SubmissionField {
    pub const REQUIRED: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    /// The key of this field in the raw submission.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
            Self::Services => "services",
            Self::Company => "company",
            Self::Phone => "phone",
        }
    }

    /// Human readable name, used in client facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Message => "Message",
            Self::Services => "Services",
            Self::Company => "Company",
            Self::Phone => "Phone",
        }
    }

    /// The maximum number of characters a sanitized value of this field may
    /// have. `services` entries are not bounded.
    pub fn max_length(self) -> Option<usize> {
        match self {
            Self::Name => Some(ContactName::MAX_LENGTH),
            Self::Email => Some(ContactEmail::MAX_LENGTH),
            Self::Message => Some(ContactMessage::MAX_LENGTH),
            Self::Services => None,
            Self::Company => Some(ContactCompany::MAX_LENGTH),
            Self::Phone => Some(ContactPhone::MAX_LENGTH),
        }
    }
}

impl std::fmt::Display for SubmissionField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
