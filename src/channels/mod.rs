use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::dto::requests::WireRequest;
use crate::error::FieldErrors;

pub mod bank;
pub mod inter_account;
pub mod mobile_money;
pub mod utility;
pub mod wallet_to_float;

pub use bank::BankTransferForm;
pub use inter_account::{ConfirmPinForm, InterAccountForm};
pub use mobile_money::MobileMoneyForm;
pub use utility::UtilityPaymentForm;
pub use wallet_to_float::WalletToFloatForm;

pub(crate) static PIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}$").expect("valid PIN pattern"));

pub(crate) static MSISDN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?\d{9,15}$").expect("valid msisdn pattern"));

/// One builder per channel: declarative field validation plus a pure
/// transform into the channel's wire payload. Builders never touch the
/// network; `payload` is only called after `validated` passes and does not
/// re-validate.
pub trait PayloadBuilder: Validate {
    type Payload: WireRequest;

    fn payload(&self) -> Self::Payload;

    fn validated(&self) -> Result<(), FieldErrors> {
        self.validate().map_err(collect_field_errors)
    }
}

/// Required everywhere: the amount must parse as a decimal and be strictly
/// positive. Violations never reach the network layer.
pub(crate) fn validate_amount(raw: &str) -> Result<(), ValidationError> {
    match raw.trim().parse::<Decimal>() {
        Ok(amount) if amount > Decimal::ZERO => Ok(()),
        Ok(_) => Err(amount_error("Amount must be greater than zero")),
        Err(_) => Err(amount_error("Amount must be a valid number")),
    }
}

fn amount_error(message: &'static str) -> ValidationError {
    let mut error = ValidationError::new("amount");
    error.message = Some(message.into());
    error
}

/// Validation has already proven the parse succeeds by the time a payload is
/// built, so the transform stays infallible.
pub(crate) fn parse_amount(raw: &str) -> Decimal {
    raw.trim().parse().unwrap_or_default()
}

pub(crate) fn collect_field_errors(errors: ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| {
            let message = field_errors
                .iter()
                .find_map(|error| error.message.as_ref().map(|message| message.to_string()))
                .unwrap_or_else(|| format!("{field} is invalid"));
            (field.to_string(), message)
        })
        .collect()
}
