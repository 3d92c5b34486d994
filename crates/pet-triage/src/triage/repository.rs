use serde::Serialize;

use super::domain::SessionId;
use super::session::{TriageNotification, TriageSession};

/// Storage abstraction so the service can be exercised without a real session store.
///
/// `update` must refuse with [`RepositoryError::Conflict`] unless the stored copy is exactly one
/// revision behind the incoming session, so that two writers starting from the same copy cannot
/// both win.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, session: TriageSession) -> Result<TriageSession, RepositoryError>;
    fn update(&self, session: TriageSession) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<TriageSession>, RepositoryError>;
}

/// Revision check shared by the stores: `stored` is the copy currently held for the session.
pub fn ensure_next_revision(
    stored: Option<&TriageSession>,
    incoming: &TriageSession,
) -> Result<(), RepositoryError> {
    let stored = stored.ok_or(RepositoryError::NotFound)?;
    if stored.revision() + 1 == incoming.revision() {
        Ok(())
    } else {
        Err(RepositoryError::Conflict)
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session was changed by another request")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for session notifications (alerting, the diagnosis service, audit logs).
pub trait TriageNotifier: Send + Sync {
    fn publish(&self, envelope: NotificationEnvelope) -> Result<(), NotifyError>;
}

/// A notification tagged with the session and pet it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationEnvelope {
    pub session_id: SessionId,
    pub pet_id: u64,
    pub notification: TriageNotification,
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
