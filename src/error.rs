use thiserror::Error;

/// Classification of session-check failures.
///
/// Every variant collapses to the same externally visible outcome: the stored
/// record (if any) is discarded and the browser is sent to the auth page.
/// None of these are surfaced to the user, and none escape the validator.
#[derive(Error, Debug)]
pub enum GuardError {
    #[error("no session record stored")]
    MissingSession,

    #[error("session record is not valid JSON: {0}")]
    CorruptSession(#[from] serde_json::Error),

    #[error("session expired or not authenticated")]
    ExpiredSession,

    #[error("storage error: {0}")]
    Storage(String),
}
