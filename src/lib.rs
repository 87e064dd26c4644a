//! Transfer orchestration core for the ZenoPay merchant console.
//!
//! The UI layer owns rendering and routing; this crate owns the protocol:
//! channel payload building and validation, single-flight submission against
//! the remote payments API, the two-phase PIN confirmation flow, and the
//! screen/session state machine that keeps the console consistent with
//! asynchronous outcomes.

pub mod channels;
pub mod controller;
pub mod coordinator;
pub mod credentials;
pub mod dto;
pub mod engine;
pub mod error;
pub mod session;
pub mod utils;

pub use controller::{ActiveForm, Screen, TransferScreenController};
pub use coordinator::{CoordinatorState, TransferCoordinator};
pub use credentials::{CredentialProvider, SessionStorage, StaticToken, StoredSessionCredentials};
pub use dto::outcomes::{OutcomeStatus, TransferOutcome, TransferReceipt};
pub use dto::Channel;
pub use engine::{TransferEngine, FALLBACK_FAILURE_MESSAGE};
pub use error::{FieldErrors, TransferError};
pub use session::{Phase, TransferSession};
