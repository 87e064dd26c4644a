use std::sync::Arc;

use tracing::debug;

use crate::channels::{
    BankTransferForm, InterAccountForm, MobileMoneyForm, UtilityPaymentForm, WalletToFloatForm,
};
use crate::coordinator::TransferCoordinator;
use crate::dto::outcomes::TransferOutcome;
use crate::dto::Channel;
use crate::engine::TransferEngine;
use crate::error::TransferError;
use crate::session::{Phase, TransferSession};

/// What the console is showing for the transfers area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Selection,
    Form(Channel),
    Receipt(Channel),
}

/// The active channel's input form. Created with defaults on selection and
/// replaced with defaults again after a successful single-phase transfer, so
/// a repeat payment never inherits a stale amount or PIN.
#[derive(Debug, Clone)]
pub enum ActiveForm {
    Bank(BankTransferForm),
    Mobile(MobileMoneyForm),
    Zenopay(InterAccountForm),
    WalletToFloat(WalletToFloatForm),
    Utility(UtilityPaymentForm),
}

impl ActiveForm {
    pub fn for_channel(channel: Channel) -> ActiveForm {
        match channel {
            Channel::Bank => ActiveForm::Bank(BankTransferForm::default()),
            Channel::Mobile => ActiveForm::Mobile(MobileMoneyForm::default()),
            Channel::Zenopay => ActiveForm::Zenopay(InterAccountForm::default()),
            Channel::WalletToFloat => {
                ActiveForm::WalletToFloat(WalletToFloatForm::default())
            }
            Channel::Utility => ActiveForm::Utility(UtilityPaymentForm::default()),
        }
    }
}

/// Top-level selector for the transfers area: owns channel selection, screen
/// navigation and the per-screen session, and delegates submissions to the
/// engine or the two-phase coordinator.
pub struct TransferScreenController {
    engine: Arc<TransferEngine>,
    screen: Screen,
    session: Option<Arc<TransferSession>>,
    form: Option<ActiveForm>,
    coordinator: Option<TransferCoordinator>,
}

impl TransferScreenController {
    pub fn new(engine: Arc<TransferEngine>) -> TransferScreenController {
        TransferScreenController {
            engine,
            screen: Screen::Selection,
            session: None,
            form: None,
            coordinator: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&Arc<TransferSession>> {
        self.session.as_ref()
    }

    pub fn form(&self) -> Option<&ActiveForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut ActiveForm> {
        self.form.as_mut()
    }

    pub fn coordinator(&self) -> Option<&TransferCoordinator> {
        self.coordinator.as_ref()
    }

    /// Opens a channel form with a fresh session. Any previous session is
    /// dropped here: an in-flight submission for it completes silently, and
    /// `apply_outcome` refuses to apply its result to the new screen.
    pub fn select(&mut self, channel: Channel) -> Arc<TransferSession> {
        let session = Arc::new(TransferSession::new(channel));
        self.session = Some(session.clone());
        self.form = Some(ActiveForm::for_channel(channel));
        self.coordinator = match channel {
            Channel::Zenopay => Some(TransferCoordinator::new(
                self.engine.clone(),
                session.clone(),
            )),
            _ => None,
        };
        self.screen = Screen::Form(channel);
        session
    }

    /// Back to channel selection. No server side effects.
    pub fn go_back(&mut self) {
        self.screen = Screen::Selection;
        self.session = None;
        self.form = None;
        self.coordinator = None;
    }

    /// Submits the active form. For the ZenoPay channel this runs phase 1;
    /// the PIN confirmation goes through [`confirm_pin`](Self::confirm_pin).
    pub async fn submit(&mut self) -> Result<TransferOutcome, TransferError> {
        let session = self
            .session
            .clone()
            .ok_or(TransferError::NoActiveChannel)?;
        let form = self.form.clone().ok_or(TransferError::NoActiveChannel)?;

        let outcome = match &form {
            ActiveForm::Bank(form) => self.engine.submit_form(&session, form).await?,
            ActiveForm::Mobile(form) => self.engine.submit_form(&session, form).await?,
            ActiveForm::WalletToFloat(form) => self.engine.submit_form(&session, form).await?,
            ActiveForm::Utility(form) => self.engine.submit_form(&session, form).await?,
            ActiveForm::Zenopay(form) => {
                let coordinator = self
                    .coordinator
                    .as_ref()
                    .ok_or(TransferError::NoActiveChannel)?;
                coordinator.initiate(form).await?
            }
        };

        self.apply_outcome(&session, &outcome);
        Ok(outcome)
    }

    /// Phase 2 of a ZenoPay transfer.
    pub async fn confirm_pin(&mut self, pin: &str) -> Result<TransferOutcome, TransferError> {
        let session = self
            .session
            .clone()
            .ok_or(TransferError::NoActiveChannel)?;
        let outcome = {
            let coordinator = self
                .coordinator
                .as_ref()
                .ok_or(TransferError::NoActiveChannel)?;
            coordinator.confirm(pin).await?
        };

        self.apply_outcome(&session, &outcome);
        Ok(outcome)
    }

    /// Applies an outcome to the screen, unless the user has navigated away:
    /// an outcome for a session that is no longer mounted is discarded.
    /// Returns whether the outcome was applied.
    pub fn apply_outcome(
        &mut self,
        session: &Arc<TransferSession>,
        outcome: &TransferOutcome,
    ) -> bool {
        let mounted = match &self.session {
            Some(current) => Arc::ptr_eq(current, session),
            None => false,
        };
        if !mounted {
            debug!(status = ?outcome.status, "Discarding outcome for an unmounted session");
            return false;
        }

        if session.phase() == Phase::Complete {
            let channel = session.channel();
            self.form = Some(ActiveForm::for_channel(channel));
            self.screen = Screen::Receipt(channel);
        }
        true
    }
}
