#![allow(dead_code)]

use std::sync::Arc;

use zenopay_transfers::channels::BankTransferForm;
use zenopay_transfers::utils::config::ApiConfig;
use zenopay_transfers::{CredentialProvider, TransferEngine};

pub const TEST_TOKEN: &str = "test-token";

pub struct TestCredentials(pub Option<&'static str>);

impl CredentialProvider for TestCredentials {
    fn bearer_token(&self) -> Option<String> {
        self.0.map(String::from)
    }
}

pub fn engine_for(base_url: &str) -> TransferEngine {
    TransferEngine::new(
        ApiConfig::new(base_url),
        Arc::new(TestCredentials(Some(TEST_TOKEN))),
    )
}

pub fn engine_without_credentials(base_url: &str) -> TransferEngine {
    TransferEngine::new(ApiConfig::new(base_url), Arc::new(TestCredentials(None)))
}

pub fn bank_form() -> BankTransferForm {
    BankTransferForm {
        amount: String::from("50000"),
        swift_code: String::from("CORUTZTZ"),
        account_number: String::from("1234567890"),
        narration: String::from("Invoice 44"),
        recipient_names: String::from("John Doe"),
    }
}
