//! Wire shapes for the form relay API.
//!
//! Field names follow the relay's snake_case JSON contract.

use serde::{Deserialize, Serialize};

use crate::domain::contact_submission::format_submission_time;
use crate::domain::ports::RelaySubmission;

#[derive(Debug, Serialize)]
pub(super) struct RelayRequestDto<'a> {
    pub(super) access_key: &'a str,
    pub(super) name: &'a str,
    pub(super) email: &'a str,
    pub(super) phone: &'a str,
    pub(super) company: &'a str,
    pub(super) message: &'a str,
    pub(super) subject: &'a str,
    pub(super) from_name: &'a str,
    pub(super) submission_time: String,
    pub(super) source: &'a str,
}

impl<'a> RelayRequestDto<'a> {
    pub(super) fn new(access_key: &'a str, submission: &'a RelaySubmission) -> Self {
        Self {
            access_key,
            name: &submission.name,
            email: &submission.email,
            phone: &submission.phone,
            company: &submission.company,
            message: &submission.message,
            subject: &submission.subject,
            from_name: &submission.from_name,
            submission_time: format_submission_time(submission.submitted_at),
            source: &submission.source,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RelayResponseDto {
    #[serde(default)]
    pub(super) success: bool,
    #[serde(default)]
    pub(super) message: Option<String>,
}
