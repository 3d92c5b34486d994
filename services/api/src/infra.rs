use metrics_exporter_prometheus::PrometheusHandle;
use pet_triage::triage::{
    ensure_next_revision, NotificationEnvelope, NotifyError, RepositoryError, SessionId,
    SessionRepository, TriageNotification, TriageNotifier, TriageSession,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Finished (submitted or cancelled) sessions kept readable before the oldest is dropped.
pub(crate) const FINISHED_SESSIONS_KEPT: usize = 256;

#[derive(Clone)]
pub(crate) struct InMemorySessionRepository {
    store: Arc<Mutex<SessionStore>>,
}

#[derive(Default)]
struct SessionStore {
    sessions: HashMap<SessionId, TriageSession>,
    finished: VecDeque<SessionId>,
    finished_limit: usize,
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::with_finished_limit(FINISHED_SESSIONS_KEPT)
    }
}

impl InMemorySessionRepository {
    pub(crate) fn with_finished_limit(finished_limit: usize) -> Self {
        Self {
            store: Arc::new(Mutex::new(SessionStore {
                finished_limit,
                ..SessionStore::default()
            })),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.store
            .lock()
            .expect("repository mutex poisoned")
            .sessions
            .len()
    }
}

impl SessionStore {
    fn retire_finished(&mut self, id: &SessionId) {
        self.finished.push_back(id.clone());
        while self.finished.len() > self.finished_limit {
            if let Some(oldest) = self.finished.pop_front() {
                self.sessions.remove(&oldest);
                debug!(session_id = %oldest, "finished session evicted");
            }
        }
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, session: TriageSession) -> Result<TriageSession, RepositoryError> {
        let mut guard = self.store.lock().expect("repository mutex poisoned");
        if guard.sessions.contains_key(session.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.sessions.insert(session.id().clone(), session.clone());
        Ok(session)
    }

    fn update(&self, session: TriageSession) -> Result<(), RepositoryError> {
        let mut guard = self.store.lock().expect("repository mutex poisoned");
        let was_finished = guard
            .sessions
            .get(session.id())
            .map(TriageSession::is_terminal)
            .unwrap_or(false);
        ensure_next_revision(guard.sessions.get(session.id()), &session)?;

        let id = session.id().clone();
        let finished = session.is_terminal();
        guard.sessions.insert(id.clone(), session);
        if finished && !was_finished {
            guard.retire_finished(&id);
        }
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<TriageSession>, RepositoryError> {
        let guard = self.store.lock().expect("repository mutex poisoned");
        Ok(guard.sessions.get(id).cloned())
    }
}

/// Logs every notification by kind and keeps nothing. Stands in for the alerting hook and the
/// diagnosis service until real transports exist.
#[derive(Default, Clone, Copy)]
pub(crate) struct LoggingNotifier;

impl TriageNotifier for LoggingNotifier {
    fn publish(&self, envelope: NotificationEnvelope) -> Result<(), NotifyError> {
        match &envelope.notification {
            TriageNotification::EmergencyDetected(snapshot) => warn!(
                session_id = %envelope.session_id,
                pet_id = envelope.pet_id,
                critical = snapshot.critical_symptoms.len(),
                "emergency alert raised"
            ),
            TriageNotification::AssessmentCompleted(payload) => info!(
                session_id = %envelope.session_id,
                pet_id = envelope.pet_id,
                symptom_count = payload.symptom_count,
                "assessment forwarded to diagnosis"
            ),
            TriageNotification::SessionCancelled => info!(
                session_id = %envelope.session_id,
                pet_id = envelope.pet_id,
                "triage session abandoned"
            ),
        }
        Ok(())
    }
}

/// Logs like [`LoggingNotifier`] and also keeps every envelope, for the demo transcript.
#[derive(Default, Clone)]
pub(crate) struct RecordingNotifier {
    events: Arc<Mutex<Vec<NotificationEnvelope>>>,
}

impl TriageNotifier for RecordingNotifier {
    fn publish(&self, envelope: NotificationEnvelope) -> Result<(), NotifyError> {
        LoggingNotifier.publish(envelope.clone())?;
        let mut guard = self.events.lock().expect("notifier mutex poisoned");
        guard.push(envelope);
        Ok(())
    }
}

impl RecordingNotifier {
    pub(crate) fn events(&self) -> Vec<NotificationEnvelope> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}
