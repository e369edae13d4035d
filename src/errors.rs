//! Typed error hierarchy for the webhook service.
//!
//! Two top-level enums cover the two failure surfaces:
//! - `WebhookError` — everything that can abort a webhook request
//! - `PublishError` — a failed step of the GitHub publish transaction

use std::fmt;

use thiserror::Error;

/// Errors that abort a webhook request.
///
/// All variants map to a `400` response carrying the error's string form;
/// the request/response contract has no finer-grained status taxonomy.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Request body is not a valid webhook form: {0}")]
    InvalidForm(String),

    #[error("Invalid payload JSON: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("Payload must be a message, got {kind:?}")]
    NotAMessage { kind: String },

    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// The five sequential steps of a publish transaction, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStep {
    ResolveRef,
    FetchIndex,
    CreateTree,
    CreateCommit,
    UpdateRef,
}

impl PublishStep {
    /// 1-based position of this step in the transaction.
    pub fn number(self) -> u8 {
        match self {
            PublishStep::ResolveRef => 1,
            PublishStep::FetchIndex => 2,
            PublishStep::CreateTree => 3,
            PublishStep::CreateCommit => 4,
            PublishStep::UpdateRef => 5,
        }
    }
}

impl fmt::Display for PublishStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PublishStep::ResolveRef => "resolve-ref",
            PublishStep::FetchIndex => "fetch-index",
            PublishStep::CreateTree => "create-tree",
            PublishStep::CreateCommit => "create-commit",
            PublishStep::UpdateRef => "update-ref",
        };
        write!(f, "{}", name)
    }
}

/// A publish transaction aborted at a named step.
///
/// Steps already performed are not rolled back; a failure at `update-ref`
/// leaves an orphaned commit behind on the remote.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Publish failed at step {} ({step}): {source}", .step.number())]
    Step {
        step: PublishStep,
        #[source]
        source: anyhow::Error,
    },
}

impl PublishError {
    /// The step the transaction reached before failing.
    pub fn step(&self) -> PublishStep {
        match self {
            PublishError::Step { step, .. } => *step,
        }
    }
}
