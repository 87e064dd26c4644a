use validator::{Validate, ValidationError};

use super::{parse_amount, validate_amount, PayloadBuilder, MSISDN_RE, PIN_RE};
use crate::dto::requests::{UtilityCode, UtilityPaymentRequest, FLOAT_SOURCE_ACCOUNT};
use crate::utils::reference;

/// Utility bill payment. Shares the cash-in wire shape but the biller code
/// comes from the supported catalogue instead of being fixed.
#[derive(Debug, Clone, Validate)]
pub struct UtilityPaymentForm {
    pub transaction_id: String,

    #[validate(custom = "validate_utility_code")]
    pub utility_code: String,

    #[validate(length(min = 1, message = "Reference number is required"))]
    pub utility_ref: String,

    #[validate(custom = "validate_amount")]
    pub amount: String,

    #[validate(regex(path = "PIN_RE", message = "PIN must be exactly 4 digits"))]
    pub pin: String,

    #[validate(regex(path = "MSISDN_RE", message = "Enter a valid phone number"))]
    pub msisdn: String,
}

impl Default for UtilityPaymentForm {
    fn default() -> UtilityPaymentForm {
        UtilityPaymentForm {
            transaction_id: reference::generate(),
            utility_code: String::new(),
            utility_ref: String::new(),
            amount: String::new(),
            pin: String::new(),
            msisdn: String::new(),
        }
    }
}

impl PayloadBuilder for UtilityPaymentForm {
    type Payload = UtilityPaymentRequest;

    fn payload(&self) -> UtilityPaymentRequest {
        UtilityPaymentRequest {
            transid: self.transaction_id.clone(),
            utilitycode: self.utility_code.trim().to_uppercase(),
            utilityref: self.utility_ref.trim().to_string(),
            amount: parse_amount(&self.amount),
            pin: self.pin.clone(),
            msisdn: self.msisdn.trim().to_string(),
            source_account: String::from(FLOAT_SOURCE_ACCOUNT),
        }
    }
}

fn validate_utility_code(code: &str) -> Result<(), ValidationError> {
    if UtilityCode::from_code(code).is_some() {
        Ok(())
    } else {
        let mut error = ValidationError::new("utility_code");
        error.message = Some("Select a supported biller".into());
        Err(error)
    }
}
