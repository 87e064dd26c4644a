use validator::Validate;

use super::{parse_amount, validate_amount, PayloadBuilder, MSISDN_RE, PIN_RE};
use crate::dto::requests::{MobileMoneyRequest, CASHIN_UTILITY_CODE, FLOAT_SOURCE_ACCOUNT};
use crate::utils::reference;

/// Mobile money payout (cash-in). The client reference is generated when the
/// form is created, so every fresh form carries a fresh `transid`.
#[derive(Debug, Clone, Validate)]
pub struct MobileMoneyForm {
    pub transaction_id: String,

    #[validate(regex(path = "MSISDN_RE", message = "Enter a valid phone number"))]
    pub msisdn: String,

    #[validate(length(min = 1, message = "Recipient reference is required"))]
    pub utility_ref: String,

    #[validate(custom = "validate_amount")]
    pub amount: String,

    #[validate(regex(path = "PIN_RE", message = "PIN must be exactly 4 digits"))]
    pub pin: String,
}

impl Default for MobileMoneyForm {
    fn default() -> MobileMoneyForm {
        MobileMoneyForm {
            transaction_id: reference::generate(),
            msisdn: String::new(),
            utility_ref: String::new(),
            amount: String::new(),
            pin: String::new(),
        }
    }
}

impl PayloadBuilder for MobileMoneyForm {
    type Payload = MobileMoneyRequest;

    fn payload(&self) -> MobileMoneyRequest {
        MobileMoneyRequest {
            transid: self.transaction_id.clone(),
            utilitycode: String::from(CASHIN_UTILITY_CODE),
            utilityref: self.utility_ref.trim().to_string(),
            amount: parse_amount(&self.amount),
            pin: self.pin.clone(),
            msisdn: self.msisdn.trim().to_string(),
            source_account: String::from(FLOAT_SOURCE_ACCOUNT),
        }
    }
}
