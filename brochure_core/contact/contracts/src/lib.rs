use std::{collections::BTreeMap, future::Future};

use brochure_models::contact::{
    ContactSubmission, ContactSubmissionReceipt, RawContactSubmission, SubmissionField,
};
use serde::Serialize;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validate a contact form submission and hand it off for processing.
    ///
    /// `source_address` is the address of the client as observed by the
    /// transport layer.
    fn submit(
        &self,
        raw: RawContactSubmission,
        source_address: String,
    ) -> impl Future<Output = Result<ContactSubmissionReceipt, ContactSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error(transparent)]
    Rejected(#[from] SubmissionRejection),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Turns untrusted contact form input into a [`ContactSubmission`].
///
/// Validation is all or nothing: either every rule passes and the sanitized
/// submission is returned, or nothing is sanitized and the first failing
/// rule is reported.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SubmissionValidator: Send + Sync + 'static {
    fn validate(
        &self,
        raw: &RawContactSubmission,
        source_address: String,
    ) -> Result<ContactSubmission, SubmissionRejection>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionRejection {
    /// Contains every required field that was absent or empty, in field
    /// order.
    #[error("Missing required fields")]
    MissingRequiredFields(Vec<SubmissionField>),
    #[error("Invalid email format")]
    InvalidEmailFormat,
    #[error("{} too long (max {max_length} characters)", .field.label())]
    FieldTooLong {
        field: SubmissionField,
        max_length: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectionReason {
    MissingRequiredField,
    InvalidEmailFormat,
    FieldTooLong,
}

impl RejectionReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingRequiredField => "missing-required-field",
            Self::InvalidEmailFormat => "invalid-email-format",
            Self::FieldTooLong => "field-too-long",
        }
    }
}

impl SubmissionRejection {
    pub fn reason(&self) -> RejectionReason {
        match self {
            Self::MissingRequiredFields(_) => RejectionReason::MissingRequiredField,
            Self::InvalidEmailFormat => RejectionReason::InvalidEmailFormat,
            Self::FieldTooLong { .. } => RejectionReason::FieldTooLong,
        }
    }

    /// Client facing complaint for each offending field.
    pub fn details(&self) -> BTreeMap<SubmissionField, String> {
        match self {
            Self::MissingRequiredFields(fields) => fields
                .iter()
                .map(|&field| (field, format!("{} is required", field.label())))
                .collect(),
            Self::InvalidEmailFormat => [(
                SubmissionField::Email,
                "Please provide a valid email address".into(),
            )]
            .into(),
            Self::FieldTooLong { field, .. } => [(*field, self.to_string())].into(),
        }
    }
}

#[cfg(feature = "mock")]
impl MockSubmissionValidator {
    pub fn with_validate(
        mut self,
        raw: RawContactSubmission,
        source_address: String,
        result: Result<ContactSubmission, SubmissionRejection>,
    ) -> Self {
        self.expect_validate()
            .once()
            .with(
                mockall::predicate::eq(raw),
                mockall::predicate::eq(source_address),
            )
            .return_once(move |_, _| result);
        self
    }
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        raw: RawContactSubmission,
        source_address: String,
        result: Result<ContactSubmissionReceipt, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(
                mockall::predicate::eq(raw),
                mockall::predicate::eq(source_address),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(result)));
        self
    }
}
