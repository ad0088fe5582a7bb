use std::{
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use brochure_core_contact_contracts::{SubmissionRejection, SubmissionValidator};
use brochure_models::contact::{ContactSubmission, RawContactSubmission};
use clap::Args;
use serde_json::{json, Value};

use crate::environment;

/// Check a contact form submission without starting the server
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// JSON file containing the submission, `-` reads from stdin
    file: PathBuf,
    /// Address recorded as the source of the submission
    #[arg(long, default_value = "127.0.0.1")]
    source_address: String,
}

impl ValidateCommand {
    pub fn invoke(self) -> anyhow::Result<()> {
        let content = if self.file == Path::new("-") {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read submission from stdin")?;
            content
        } else {
            std::fs::read_to_string(&self.file).with_context(|| {
                format!("Failed to read submission at {}", self.file.display())
            })?
        };

        match validate_json(&content, self.source_address)? {
            Ok(submission) => {
                println!("{}", serde_json::to_string_pretty(&submission)?);
                Ok(())
            }
            Err(rejection) => {
                println!("{}", serde_json::to_string_pretty(&report(&rejection))?);
                bail!("Submission rejected: {rejection}");
            }
        }
    }
}

/// Runs `content` through the submission validator. The outer error is
/// reserved for content that is not JSON at all.
pub fn validate_json(
    content: &str,
    source_address: String,
) -> anyhow::Result<Result<ContactSubmission, SubmissionRejection>> {
    let payload = serde_json::from_str::<Value>(content).context("Failed to parse submission")?;
    let raw = RawContactSubmission::from(payload);
    Ok(environment::validator().validate(&raw, source_address))
}

fn report(rejection: &SubmissionRejection) -> Value {
    json!({
        "code": rejection.reason(),
        "error": rejection.to_string(),
        "details": rejection.details(),
    })
}
