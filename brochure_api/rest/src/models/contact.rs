use brochure_models::contact::{ContactSubmissionReceipt, SubmissionId};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const SUBMITTED_MESSAGE: &str =
    "Thank you for your inquiry. We will respond within 24 hours.";

#[derive(Debug, Serialize)]
pub struct ApiContactSubmitted {
    pub success: bool,
    pub message: &'static str,
    pub data: ApiContactReceipt,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactReceipt {
    /// Reference for follow up questions
    pub submission_id: SubmissionId,
    /// Time the submission was accepted
    pub timestamp: DateTime<Utc>,
}

impl From<ContactSubmissionReceipt> for ApiContactSubmitted {
    fn from(value: ContactSubmissionReceipt) -> Self {
        Self {
            success: true,
            message: SUBMITTED_MESSAGE,
            data: ApiContactReceipt {
                submission_id: value.id,
                timestamp: value.submitted_at,
            },
        }
    }
}
