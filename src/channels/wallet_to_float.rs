use validator::Validate;

use super::{parse_amount, validate_amount, PayloadBuilder, PIN_RE};
use crate::dto::requests::{WalletToFloatRequest, WALLET_TO_FLOAT_DIRECTION};

/// Rebalancing from the merchant wallet into the float account.
#[derive(Debug, Clone, Default, Validate)]
pub struct WalletToFloatForm {
    #[validate(custom = "validate_amount")]
    pub amount: String,

    #[validate(regex(path = "PIN_RE", message = "PIN must be exactly 4 digits"))]
    pub pin: String,
}

impl PayloadBuilder for WalletToFloatForm {
    type Payload = WalletToFloatRequest;

    fn payload(&self) -> WalletToFloatRequest {
        WalletToFloatRequest {
            amount: parse_amount(&self.amount),
            pin: self.pin.clone(),
            direction: String::from(WALLET_TO_FLOAT_DIRECTION),
        }
    }
}
