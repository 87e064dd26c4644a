use once_cell::sync::Lazy;
use regex::Regex;
use validator::Validate;

use super::{parse_amount, validate_amount, PayloadBuilder};
use crate::dto::requests::BankTransferRequest;

static ACCOUNT_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10,20}$").expect("valid account number pattern"));

static RECIPIENT_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("valid recipient name pattern"));

/// Bank payout form. The destination goes over the wire as the colon-joined
/// composite `"<swift code>:<account number>"`.
#[derive(Debug, Clone, Default, Validate)]
pub struct BankTransferForm {
    #[validate(custom = "validate_amount")]
    pub amount: String,

    #[validate(length(min = 1, message = "Swift code is required"))]
    pub swift_code: String,

    #[validate(regex(
        path = "ACCOUNT_NUMBER_RE",
        message = "Account number must be 10 to 20 digits"
    ))]
    pub account_number: String,

    #[validate(length(max = 100, message = "Narration must be at most 100 characters"))]
    pub narration: String,

    #[validate(regex(
        path = "RECIPIENT_NAME_RE",
        message = "Recipient name may only contain letters and spaces"
    ))]
    pub recipient_names: String,
}

impl PayloadBuilder for BankTransferForm {
    type Payload = BankTransferRequest;

    fn payload(&self) -> BankTransferRequest {
        BankTransferRequest {
            amount: parse_amount(&self.amount),
            msisdn: format!(
                "{}:{}",
                self.swift_code.trim(),
                self.account_number.trim()
            ),
            narration: self.narration.clone(),
            recipient_names: self.recipient_names.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> BankTransferForm {
        BankTransferForm {
            amount: String::from("50000"),
            swift_code: String::from("CORUTZTZ"),
            account_number: String::from("1234567890"),
            narration: String::from("Invoice 44"),
            recipient_names: String::from("John Doe"),
        }
    }

    #[test]
    fn accepts_a_complete_form() {
        assert!(valid_form().validated().is_ok());
    }

    #[test]
    fn account_number_length_boundaries() {
        let mut form = valid_form();

        form.account_number = "1".repeat(9);
        assert!(form.validated().is_err());

        form.account_number = "1".repeat(10);
        assert!(form.validated().is_ok());

        form.account_number = "1".repeat(20);
        assert!(form.validated().is_ok());

        form.account_number = "1".repeat(21);
        assert!(form.validated().is_err());

        form.account_number = String::from("12345abcde");
        assert!(form.validated().is_err());
    }

    #[test]
    fn recipient_name_rejects_digits_and_punctuation() {
        let mut form = valid_form();

        form.recipient_names = String::from("John Doe Jr");
        assert!(form.validated().is_ok());

        form.recipient_names = String::from("John D0e");
        assert!(form.validated().is_err());

        form.recipient_names = String::from("John-Doe");
        assert!(form.validated().is_err());
    }

    #[test]
    fn narration_is_capped_at_100_characters() {
        let mut form = valid_form();

        form.narration = "x".repeat(100);
        assert!(form.validated().is_ok());

        form.narration = "x".repeat(101);
        let errors = form.validated().unwrap_err();
        assert!(errors.contains_key("narration"));
    }

    #[test]
    fn non_positive_amount_is_field_scoped() {
        let mut form = valid_form();
        form.amount = String::from("-100");

        let errors = form.validated().unwrap_err();
        assert_eq!(
            errors.get("amount").map(String::as_str),
            Some("Amount must be greater than zero")
        );
    }

    #[test]
    fn payload_joins_swift_and_account_with_a_colon() {
        let payload = valid_form().payload();
        assert_eq!(payload.msisdn, "CORUTZTZ:1234567890");
        assert_eq!(payload.amount, "50000".parse().unwrap());
        assert_eq!(payload.recipient_names, "John Doe");
    }
}
