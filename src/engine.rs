use std::sync::Arc;

use reqwest::{header, Client};
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::channels::PayloadBuilder;
use crate::credentials::CredentialProvider;
use crate::dto::outcomes::{OutcomeStatus, TransferOutcome, TransferReceipt};
use crate::dto::requests::WireRequest;
use crate::error::TransferError;
use crate::session::{Phase, TransferSession};
use crate::utils::config::ApiConfig;

/// Shown whenever the server gives us nothing better to say.
pub const FALLBACK_FAILURE_MESSAGE: &str =
    "Cannot complete the transfer at this time, Please try again later or contact support";

/// Executes channel submissions against the payments API. One engine is
/// shared across sessions; the single-flight guard lives on each session.
pub struct TransferEngine {
    http: Client,
    config: ApiConfig,
    credentials: Arc<dyn CredentialProvider>,
}

impl TransferEngine {
    pub fn new(config: ApiConfig, credentials: Arc<dyn CredentialProvider>) -> TransferEngine {
        TransferEngine {
            http: Client::new(),
            config,
            credentials,
        }
    }

    /// Validates a channel form and submits its payload. Validation failures
    /// never reach the network.
    pub async fn submit_form<F: PayloadBuilder>(
        &self,
        session: &TransferSession,
        form: &F,
    ) -> Result<TransferOutcome, TransferError> {
        form.validated().map_err(TransferError::Validation)?;
        self.submit(session, &form.payload()).await
    }

    /// Single-phase submission: the session lands in `Complete` on success
    /// (including a receipt-less pending success) or `Error` on failure.
    pub async fn submit<R: WireRequest>(
        &self,
        session: &TransferSession,
        request: &R,
    ) -> Result<TransferOutcome, TransferError> {
        self.dispatch(session, request, Phase::Complete, Phase::Error)
            .await
    }

    #[instrument(
        skip(self, session, request),
        fields(channel = %session.channel(), path = request.path())
    )]
    pub(crate) async fn dispatch<R: WireRequest>(
        &self,
        session: &TransferSession,
        request: &R,
        on_success: Phase,
        on_failure: Phase,
    ) -> Result<TransferOutcome, TransferError> {
        let guard = session.begin_submission()?;

        let Some(token) = self.credentials.bearer_token() else {
            drop(guard);
            return Err(TransferError::Unauthenticated);
        };

        let outcome = self.call(request, &token).await;
        let phase = if outcome.status == OutcomeStatus::Failed {
            on_failure
        } else {
            on_success
        };
        session.finish(phase, outcome.clone());
        drop(guard);

        Ok(outcome)
    }

    async fn call<R: WireRequest>(&self, request: &R, token: &str) -> TransferOutcome {
        let url = format!("{}{}", self.config.base_url, request.path());

        let response = self
            .http
            .post(&url)
            .json(request)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                error!("Transfer request failed before a response arrived ===> {}", err);
                return TransferOutcome::failed(FALLBACK_FAILURE_MESSAGE);
            }
        };

        let status = response.status();
        let body = response.json::<Value>().await.ok();

        if status.is_success() {
            match body.and_then(|value| serde_json::from_value::<TransferReceipt>(value).ok()) {
                Some(receipt) => TransferOutcome::success(receipt),
                None => {
                    info!("Transfer accepted without a readable receipt");
                    TransferOutcome::pending()
                }
            }
        } else {
            let message = body
                .as_ref()
                .map(failure_message)
                .unwrap_or_else(|| String::from(FALLBACK_FAILURE_MESSAGE));
            error!("Transfer rejected by server ({}) ===> {}", status, message);
            TransferOutcome::failed(message)
        }
    }
}

/// Picks the message to surface from an error body: an explicit `message`
/// field wins, then the first field-level error value, then the fallback.
pub(crate) fn failure_message(body: &Value) -> String {
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return message.to_string();
    }

    if let Some(fields) = body.as_object() {
        let first = fields
            .iter()
            .filter(|(field, _)| field.as_str() != "status")
            .find_map(|(_, value)| first_field_error(value));
        if let Some(message) = first {
            return message;
        }
    }

    String::from(FALLBACK_FAILURE_MESSAGE)
}

fn first_field_error(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => items.iter().find_map(first_field_error),
        Value::Object(fields) => fields.values().find_map(first_field_error),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn explicit_message_wins() {
        let body = json!({ "message": "invalid pin", "pin": ["PIN mismatch"] });
        assert_eq!(failure_message(&body), "invalid pin");
    }

    #[test]
    fn first_field_error_is_used_when_no_message() {
        let body = json!({ "amount": ["Amount exceeds your float balance"] });
        assert_eq!(failure_message(&body), "Amount exceeds your float balance");

        let body = json!({ "errors": { "msisdn": ["Unknown subscriber"] } });
        assert_eq!(failure_message(&body), "Unknown subscriber");

        let body = json!({ "status": "error", "narration": "Narration too long" });
        assert_eq!(failure_message(&body), "Narration too long");
    }

    #[test]
    fn unusable_bodies_fall_back_to_the_generic_message() {
        assert_eq!(failure_message(&json!({})), FALLBACK_FAILURE_MESSAGE);
        assert_eq!(failure_message(&json!(42)), FALLBACK_FAILURE_MESSAGE);
        assert_eq!(
            failure_message(&json!({ "code": 17 })),
            FALLBACK_FAILURE_MESSAGE
        );
    }
}
