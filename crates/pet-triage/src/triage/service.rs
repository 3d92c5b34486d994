use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{Clock, SessionId, Subject, SystemClock, TransitionBlocked};
use super::prompt::Prompt;
use super::repository::{
    NotificationEnvelope, NotifyError, RepositoryError, SessionRepository, TriageNotifier,
};
use super::session::{SessionView, TriageAction, TriageSession};

/// Service composing the session store, the notification hook and the clock.
pub struct TriageService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    clock: Arc<dyn Clock>,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("triage-{id:06}"))
}

impl<R, N> TriageService<R, N>
where
    R: SessionRepository + 'static,
    N: TriageNotifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self::with_clock(repository, notifier, Arc::new(SystemClock))
    }

    pub fn with_clock(repository: Arc<R>, notifier: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            notifier,
            clock,
        }
    }

    /// Open a session for a pet and persist it.
    pub fn start(&self, subject: Subject) -> Result<SessionView, TriageServiceError> {
        let session = TriageSession::new(next_session_id(), subject);
        let stored = self.repository.insert(session)?;
        info!(
            session_id = %stored.id(),
            pet_id = stored.subject().id,
            species = %stored.subject().species,
            "triage session started"
        );
        Ok(stored.view())
    }

    /// Apply an owner action, persist the new state and forward any notifications.
    ///
    /// Two requests racing on the same session both start from the same revision; the store
    /// accepts only the first write and the loser gets [`RepositoryError::Conflict`] without
    /// publishing anything.
    pub fn dispatch(
        &self,
        session_id: &SessionId,
        action: TriageAction,
    ) -> Result<SessionView, TriageServiceError> {
        let mut session = self
            .repository
            .fetch(session_id)?
            .ok_or(RepositoryError::NotFound)?;

        let action_name = action.name();
        if let Err(blocked) = session.dispatch(action, self.clock.now()) {
            debug!(%session_id, action = action_name, %blocked, "triage action refused");
            return Err(blocked.into());
        }

        let notifications = session.drain_notifications();
        let view = session.view();
        let pet_id = session.subject().id;
        if let Err(err) = self.repository.update(session) {
            debug!(%session_id, action = action_name, %err, "triage action not saved");
            return Err(err.into());
        }

        for notification in notifications {
            self.notifier.publish(NotificationEnvelope {
                session_id: session_id.clone(),
                pet_id,
                notification,
            })?;
        }

        Ok(view)
    }

    /// Hand out the prompt queued under `ticket` once the typing delay elapsed. Returns
    /// `None` when a later step already replaced it.
    pub fn release_prompt(
        &self,
        session_id: &SessionId,
        ticket: u64,
    ) -> Result<Option<Prompt>, TriageServiceError> {
        let mut session = self
            .repository
            .fetch(session_id)?
            .ok_or(RepositoryError::NotFound)?;

        let prompt = session.release_prompt(ticket);
        if prompt.is_none() {
            debug!(%session_id, ticket, "stale prompt ticket ignored");
            return Ok(None);
        }
        match self.repository.update(session) {
            Ok(()) => Ok(prompt),
            Err(RepositoryError::Conflict) => {
                debug!(%session_id, ticket, "prompt superseded by a concurrent action");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Fetch the current view of a session.
    pub fn get(&self, session_id: &SessionId) -> Result<SessionView, TriageServiceError> {
        let session = self
            .repository
            .fetch(session_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(session.view())
    }
}

/// Error raised by the triage service.
#[derive(Debug, thiserror::Error)]
pub enum TriageServiceError {
    #[error(transparent)]
    Blocked(#[from] TransitionBlocked),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
