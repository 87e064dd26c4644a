use std::collections::BTreeMap;
use thiserror::Error;

/// Field name to human-readable message, as produced by a channel builder.
pub type FieldErrors = BTreeMap<String, String>;

/// Conditions that block a submission from starting.
///
/// Server rejections and transport failures are not represented here: the
/// session must stay interactive after any outcome, so those surface as a
/// failed [`TransferOutcome`](crate::dto::outcomes::TransferOutcome) instead.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Validation errors")]
    Validation(FieldErrors),

    #[error("Please login again")]
    Unauthenticated,

    #[error("A transfer is already in progress")]
    SubmissionInProgress,

    #[error("No transfer is awaiting confirmation")]
    NoPendingConfirmation,

    #[error("No transfer channel is selected")]
    NoActiveChannel,
}

impl TransferError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            TransferError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
