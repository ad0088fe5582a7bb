use std::sync::LazyLock;

use brochure_core_contact_contracts::{SubmissionRejection, SubmissionValidator};
use brochure_models::contact::{
    ContactCompany, ContactEmail, ContactMessage, ContactName, ContactPhone, ContactSubmission,
    RawContactSubmission, SubmissionField,
};
use brochure_shared_contracts::time::TimeService;
use regex::Regex;
use serde_json::Value;

/// Coarse `local@domain.tld` shape. Anything RFC 5321 allows should pass.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Debug, Clone, Default)]
pub struct SubmissionValidatorImpl<Time> {
    pub time: Time,
}

impl<Time> SubmissionValidator for SubmissionValidatorImpl<Time>
where
    Time: TimeService,
{
    fn validate(
        &self,
        raw: &RawContactSubmission,
        source_address: String,
    ) -> Result<ContactSubmission, SubmissionRejection> {
        let text = move |field| {
            raw.get(field)
                .and_then(Value::as_str)
                .filter(|value| !value.trim().is_empty())
        };
        let email = raw
            .get(SubmissionField::Email)
            .filter(|value| !is_falsy(value));

        let (name, email, message) = match (
            text(SubmissionField::Name),
            email,
            text(SubmissionField::Message),
        ) {
            (Some(name), Some(email), Some(message)) => (name, email, message),
            (name, email, message) => {
                let missing = SubmissionField::REQUIRED
                    .into_iter()
                    .zip([name.is_none(), email.is_none(), message.is_none()])
                    .filter_map(|(field, missing)| missing.then_some(field))
                    .collect();
                return Err(SubmissionRejection::MissingRequiredFields(missing));
            }
        };

        // a present email of the wrong type is malformed, not missing
        let email = email
            .as_str()
            .filter(|email| is_valid_email(email))
            .ok_or(SubmissionRejection::InvalidEmailFormat)?;

        // limits apply to the raw input, before trimming
        for (field, value, max_length) in [
            (SubmissionField::Name, name, ContactName::MAX_LENGTH),
            (SubmissionField::Message, message, ContactMessage::MAX_LENGTH),
        ] {
            if value.chars().count() > max_length {
                return Err(SubmissionRejection::FieldTooLong { field, max_length });
            }
        }

        let optional = |field: SubmissionField, max_length| {
            raw.get(field)
                .map(|value| sanitize(value, max_length))
                .unwrap_or_default()
        };

        let services: Vec<String> = match raw.get(SubmissionField::Services) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(Into::into)
                .collect(),
            _ => Vec::new(),
        };

        Ok(ContactSubmission {
            name: bounded(
                SubmissionField::Name,
                sanitize_str(name, ContactName::MAX_LENGTH),
            )?,
            email: bounded(
                SubmissionField::Email,
                sanitize_str(email, ContactEmail::MAX_LENGTH),
            )?,
            message: bounded(
                SubmissionField::Message,
                sanitize_str(message, ContactMessage::MAX_LENGTH),
            )?,
            services,
            company: bounded(
                SubmissionField::Company,
                optional(SubmissionField::Company, ContactCompany::MAX_LENGTH),
            )?,
            phone: bounded(
                SubmissionField::Phone,
                optional(SubmissionField::Phone, ContactPhone::MAX_LENGTH),
            )?,
            submitted_at: self.time.now(),
            source_address,
        })
    }
}

/// Returns whether `email` looks like `local@domain.tld`.
///
/// This is a syntactic sanity check only. It accepts many addresses that
/// cannot receive mail and never rejects a well formed one.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Sanitizes an untrusted value. Anything but a string becomes the empty
/// string, see [`sanitize_str`].
pub fn sanitize(value: &Value, max_length: usize) -> String {
    value
        .as_str()
        .map(|value| sanitize_str(value, max_length))
        .unwrap_or_default()
}

/// Trims `value`, truncates it to `max_length` characters and removes all
/// `<` and `>`.
///
/// This does not escape anything. The result must still be encoded for
/// whatever context it ends up in.
pub fn sanitize_str(value: &str, max_length: usize) -> String {
    value
        .trim()
        .chars()
        .take(max_length)
        .filter(|c| !matches!(c, '<' | '>'))
        .collect()
}

/// `null`, `false`, `0` and `""`.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(value) => !value,
        Value::Number(value) => value.as_f64() == Some(0.0),
        Value::String(value) => value.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn bounded<T: TryFrom<String>>(
    field: SubmissionField,
    value: String,
) -> Result<T, SubmissionRejection> {
    T::try_from(value).map_err(|_| SubmissionRejection::FieldTooLong {
        field,
        max_length: field.max_length().unwrap_or_default(),
    })
}
