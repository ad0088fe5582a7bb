use brochure_core_contact_contracts::{
    ContactFeatureService, ContactSubmitError, SubmissionValidator,
};
use brochure_models::contact::{ContactSubmissionReceipt, RawContactSubmission, SubmissionId};
use brochure_shared_contracts::id::IdService;
use tracing::{debug, info};

pub mod validate;

#[derive(Debug, Clone, Default)]
pub struct ContactFeatureServiceImpl<Id, Validator> {
    pub id: Id,
    pub validator: Validator,
}

impl<Id, Validator> ContactFeatureService for ContactFeatureServiceImpl<Id, Validator>
where
    Id: IdService,
    Validator: SubmissionValidator,
{
    async fn submit(
        &self,
        raw: RawContactSubmission,
        source_address: String,
    ) -> Result<ContactSubmissionReceipt, ContactSubmitError> {
        let submission = self
            .validator
            .validate(&raw, source_address)
            .inspect_err(|err| {
                debug!(reason = err.reason().as_str(), "rejected contact form submission: {err}")
            })?;

        let id = self.id.generate::<SubmissionId>();

        // The log is the only record of a submission.
        info!(
            %id,
            name = %submission.name,
            email = %submission.email,
            company = %submission.company,
            services = ?submission.services,
            source_address = %submission.source_address,
            submitted_at = %submission.submitted_at,
            "contact form submission received"
        );

        Ok(ContactSubmissionReceipt {
            id,
            submitted_at: submission.submitted_at,
        })
    }
}
