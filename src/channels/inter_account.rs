use validator::Validate;

use super::{parse_amount, validate_amount, PayloadBuilder};
use crate::dto::requests::InitiateTransferRequest;

/// Phase 1 of a ZenoPay-to-ZenoPay transfer. The PIN is collected by a
/// separate form after the server issues a transfer reference.
#[derive(Debug, Clone, Default, Validate)]
pub struct InterAccountForm {
    #[validate(length(min = 1, message = "Recipient account is required"))]
    pub recipient_account_id: String,

    #[validate(custom = "validate_amount")]
    pub amount: String,

    #[validate(length(max = 255, message = "Note must be at most 255 characters"))]
    pub note: Option<String>,
}

impl PayloadBuilder for InterAccountForm {
    type Payload = InitiateTransferRequest;

    fn payload(&self) -> InitiateTransferRequest {
        InitiateTransferRequest {
            recipient_account_id: self.recipient_account_id.trim().to_string(),
            amount: parse_amount(&self.amount),
            note: self
                .note
                .as_deref()
                .map(str::trim)
                .filter(|note| !note.is_empty())
                .map(String::from),
        }
    }
}

/// Phase 2 input. The transfer reference is held by the coordinator, never
/// edited by the user; only the PIN is collected here.
#[derive(Debug, Clone, Default, Validate)]
pub struct ConfirmPinForm {
    #[validate(length(equal = 4, message = "PIN must be exactly 4 characters"))]
    pub pin: String,
}
