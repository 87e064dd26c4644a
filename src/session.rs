use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use uuid::Uuid;

use crate::dto::outcomes::TransferOutcome;
use crate::dto::Channel;
use crate::error::TransferError;

/// Where a transfer screen is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Input,
    Submitting,
    AwaitingConfirmation,
    Complete,
    Error,
}

impl Phase {
    /// Every phase except `Submitting` accepts user input; a session must
    /// never be left in `Submitting` after an outcome lands.
    pub fn is_interactive(&self) -> bool {
        !matches!(self, Phase::Submitting)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Complete)
    }
}

#[derive(Debug)]
struct SessionState {
    phase: Phase,
    idempotency_key: Option<Uuid>,
    last_outcome: Option<TransferOutcome>,
}

/// Per-screen-instance transfer state. Exclusively owned by the screen that
/// created it; the engine and coordinator are the only writers. Independent
/// sessions share nothing and may run concurrently.
#[derive(Debug)]
pub struct TransferSession {
    channel: Channel,
    in_flight: AtomicBool,
    inner: Mutex<SessionState>,
}

impl TransferSession {
    pub fn new(channel: Channel) -> TransferSession {
        TransferSession {
            channel,
            in_flight: AtomicBool::new(false),
            inner: Mutex::new(SessionState {
                phase: Phase::Input,
                idempotency_key: None,
                last_outcome: None,
            }),
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn phase(&self) -> Phase {
        self.inner.lock().unwrap().phase
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Key recorded for the current or most recent attempt. Bookkeeping for
    /// support lookups, not a dedup key; the server owns true idempotency.
    pub fn idempotency_key(&self) -> Option<Uuid> {
        self.inner.lock().unwrap().idempotency_key
    }

    pub fn last_outcome(&self) -> Option<TransferOutcome> {
        self.inner.lock().unwrap().last_outcome.clone()
    }

    /// Claims the single-flight slot. While the returned guard is alive any
    /// further claim fails synchronously with `SubmissionInProgress` and no
    /// network call is made.
    pub(crate) fn begin_submission(&self) -> Result<SubmissionGuard<'_>, TransferError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| TransferError::SubmissionInProgress)?;

        let mut state = self.inner.lock().unwrap();
        state.phase = Phase::Submitting;
        state.idempotency_key = Some(Uuid::new_v4());

        Ok(SubmissionGuard { session: self })
    }

    pub(crate) fn finish(&self, phase: Phase, outcome: TransferOutcome) {
        let mut state = self.inner.lock().unwrap();
        state.phase = phase;
        state.last_outcome = Some(outcome);
    }
}

/// Releases the single-flight slot on drop, whatever path the submission
/// took. If nothing recorded a final phase, the session falls back to
/// `Error` so it is never stuck in `Submitting`.
pub(crate) struct SubmissionGuard<'a> {
    session: &'a TransferSession,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        {
            let mut state = self.session.inner.lock().unwrap();
            if state.phase == Phase::Submitting {
                state.phase = Phase::Error;
            }
        }
        self.session.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_is_rejected_while_first_is_held() {
        let session = TransferSession::new(Channel::Bank);
        let guard = session.begin_submission().unwrap();
        assert!(session.is_in_flight());
        assert_eq!(session.phase(), Phase::Submitting);

        assert!(matches!(
            session.begin_submission(),
            Err(TransferError::SubmissionInProgress)
        ));

        session.finish(Phase::Complete, TransferOutcome::pending());
        drop(guard);

        assert!(!session.is_in_flight());
        assert_eq!(session.phase(), Phase::Complete);
        assert!(session.begin_submission().is_ok());
    }

    #[test]
    fn dropping_the_guard_without_an_outcome_leaves_an_interactive_phase() {
        let session = TransferSession::new(Channel::Mobile);
        let guard = session.begin_submission().unwrap();
        drop(guard);

        assert!(!session.is_in_flight());
        assert_eq!(session.phase(), Phase::Error);
        assert!(session.phase().is_interactive());
    }

    #[test]
    fn each_attempt_records_a_fresh_idempotency_key() {
        let session = TransferSession::new(Channel::Utility);

        let guard = session.begin_submission().unwrap();
        let first = session.idempotency_key().unwrap();
        drop(guard);

        let guard = session.begin_submission().unwrap();
        let second = session.idempotency_key().unwrap();
        drop(guard);

        assert_ne!(first, second);
    }

    #[test]
    fn interactive_phases() {
        assert!(Phase::Input.is_interactive());
        assert!(Phase::AwaitingConfirmation.is_interactive());
        assert!(Phase::Complete.is_interactive());
        assert!(Phase::Error.is_interactive());
        assert!(!Phase::Submitting.is_interactive());
    }
}
