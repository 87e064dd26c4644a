use serde::Deserialize;
use serde_json::Value;

/// Terminal classification of one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// The server accepted the transfer but returned no readable receipt;
    /// renderers show a "processing" state rather than a full receipt.
    Pending,
    Success,
    Failed,
}

/// What a screen gets back from the submission engine.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    pub status: OutcomeStatus,
    pub message: String,
    pub receipt: Option<TransferReceipt>,
}

impl TransferOutcome {
    pub fn success(receipt: TransferReceipt) -> TransferOutcome {
        let message = receipt
            .message
            .clone()
            .unwrap_or_else(|| String::from("Transfer completed successfully"));
        TransferOutcome {
            status: OutcomeStatus::Success,
            message,
            receipt: Some(receipt),
        }
    }

    pub fn pending() -> TransferOutcome {
        TransferOutcome {
            status: OutcomeStatus::Pending,
            message: String::from("Transfer received and is being processed"),
            receipt: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> TransferOutcome {
        TransferOutcome {
            status: OutcomeStatus::Failed,
            message: message.into(),
            receipt: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }

    pub fn is_failed(&self) -> bool {
        self.status == OutcomeStatus::Failed
    }

    /// Server messages may embed newlines meant to render as separate lines.
    pub fn message_lines(&self) -> std::str::Lines<'_> {
        self.message.lines()
    }

    pub fn transfer_reference(&self) -> Option<&str> {
        self.receipt.as_ref()?.transfer_reference.as_deref()
    }
}

/// Receipt fields echoed verbatim from the server. Every field is optional:
/// the engine never assumes a shape, and monetary values stay as raw JSON so
/// they are displayed as sent, never recomputed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransferReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub transfer_reference: Option<String>,
    #[serde(default, alias = "balance")]
    pub new_balance: Option<Value>,
    #[serde(default, alias = "charges")]
    pub fee: Option<Value>,
}
