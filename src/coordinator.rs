use std::sync::{Arc, Mutex};

use tracing::{info, instrument};

use crate::channels::{collect_field_errors, ConfirmPinForm, InterAccountForm, PayloadBuilder};
use crate::dto::outcomes::{OutcomeStatus, TransferOutcome};
use crate::dto::requests::ConfirmTransferRequest;
use crate::engine::TransferEngine;
use crate::error::TransferError;
use crate::session::{Phase, TransferSession};
use validator::Validate;

/// Two-phase transfer states. The server-issued transfer reference is a
/// scarce handle: once `AwaitingPin` holds one it is carried forward
/// unchanged until the server confirms or rejects it. The client never
/// regenerates it and never imposes its own expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinatorState {
    Idle,
    Initiating,
    AwaitingPin { transfer_reference: String },
    Confirming { transfer_reference: String },
    Confirmed,
}

impl CoordinatorState {
    pub fn transfer_reference(&self) -> Option<&str> {
        match self {
            CoordinatorState::AwaitingPin { transfer_reference }
            | CoordinatorState::Confirming { transfer_reference } => Some(transfer_reference),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CoordinatorState::Confirmed)
    }
}

/// Drives a ZenoPay-to-ZenoPay transfer through initiate and PIN-confirm.
/// Both phases go through the session's single-flight guard, so a redundant
/// call while either request is outstanding is rejected without touching the
/// network.
pub struct TransferCoordinator {
    engine: Arc<TransferEngine>,
    session: Arc<TransferSession>,
    state: Mutex<CoordinatorState>,
}

impl TransferCoordinator {
    pub fn new(engine: Arc<TransferEngine>, session: Arc<TransferSession>) -> TransferCoordinator {
        TransferCoordinator {
            engine,
            session,
            state: Mutex::new(CoordinatorState::Idle),
        }
    }

    pub fn state(&self) -> CoordinatorState {
        self.state.lock().unwrap().clone()
    }

    pub fn session(&self) -> &Arc<TransferSession> {
        &self.session
    }

    /// Phase 1. On success the coordinator holds the server-issued transfer
    /// reference and the session waits for the PIN; on failure it returns to
    /// `Idle` with the form still editable.
    #[instrument(skip(self, form))]
    pub async fn initiate(&self, form: &InterAccountForm) -> Result<TransferOutcome, TransferError> {
        form.validated().map_err(TransferError::Validation)?;

        let previous = {
            let mut state = self.state.lock().unwrap();
            if matches!(
                *state,
                CoordinatorState::Initiating | CoordinatorState::Confirming { .. }
            ) {
                return Err(TransferError::SubmissionInProgress);
            }
            std::mem::replace(&mut *state, CoordinatorState::Initiating)
        };

        let result = self
            .engine
            .dispatch(
                &self.session,
                &form.payload(),
                Phase::AwaitingConfirmation,
                Phase::Input,
            )
            .await;

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                *self.state.lock().unwrap() = previous;
                return Err(err);
            }
        };

        let (next, outcome) = if outcome.is_failed() {
            (CoordinatorState::Idle, outcome)
        } else if let Some(transfer_reference) = outcome.transfer_reference() {
            info!(transfer_reference = %transfer_reference, "Transfer initiated, awaiting PIN");
            (
                CoordinatorState::AwaitingPin {
                    transfer_reference: transfer_reference.to_string(),
                },
                outcome,
            )
        } else {
            // Accepted but no handle to confirm against: surface a degraded
            // "processing" success and leave the form available again.
            let pending = TransferOutcome::pending();
            self.session.finish(Phase::Input, pending.clone());
            (CoordinatorState::Idle, pending)
        };

        *self.state.lock().unwrap() = next;
        Ok(outcome)
    }

    /// Phase 2. A failed confirmation keeps the reference and returns to
    /// `AwaitingPin`, so the user can retry the PIN without restarting
    /// phase 1.
    #[instrument(skip(self, pin))]
    pub async fn confirm(&self, pin: &str) -> Result<TransferOutcome, TransferError> {
        let transfer_reference = {
            let state = self.state.lock().unwrap();
            match &*state {
                CoordinatorState::Initiating | CoordinatorState::Confirming { .. } => {
                    return Err(TransferError::SubmissionInProgress)
                }
                CoordinatorState::AwaitingPin { transfer_reference } => transfer_reference.clone(),
                _ => return Err(TransferError::NoPendingConfirmation),
            }
        };

        let form = ConfirmPinForm {
            pin: pin.to_string(),
        };
        form.validate()
            .map_err(|errors| TransferError::Validation(collect_field_errors(errors)))?;

        *self.state.lock().unwrap() = CoordinatorState::Confirming {
            transfer_reference: transfer_reference.clone(),
        };

        let request = ConfirmTransferRequest {
            transfer_reference: transfer_reference.clone(),
            pin: form.pin,
        };
        let result = self
            .engine
            .dispatch(
                &self.session,
                &request,
                Phase::Complete,
                Phase::AwaitingConfirmation,
            )
            .await;

        match result {
            Ok(outcome) => {
                let next = if outcome.status == OutcomeStatus::Failed {
                    CoordinatorState::AwaitingPin { transfer_reference }
                } else {
                    info!("Transfer confirmed");
                    CoordinatorState::Confirmed
                };
                *self.state.lock().unwrap() = next;
                Ok(outcome)
            }
            Err(err) => {
                *self.state.lock().unwrap() =
                    CoordinatorState::AwaitingPin { transfer_reference };
                Err(err)
            }
        }
    }

    /// Back to `Idle` for a fresh transfer. No server side effects.
    pub fn reset(&self) {
        *self.state.lock().unwrap() = CoordinatorState::Idle;
    }
}
