use std::collections::HashMap;
use std::sync::{Arc, Barrier, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::triage::catalog::{
    AlertnessOption, CriticalSymptom, DurationBucket, MainConcern, PerfusionOption, Progression,
    RespirationOption, Severity,
};
use crate::triage::domain::{FixedClock, SessionId, Subject};
use crate::triage::questionnaire::QuestionnaireEvent;
use crate::triage::repository::{
    ensure_next_revision, NotificationEnvelope, NotifyError, RepositoryError, SessionRepository,
    TriageNotifier,
};
use crate::triage::screening::ScreeningEvent;
use crate::triage::service::TriageService;
use crate::triage::session::{TriageAction, TriageSession};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(now()))
}

pub(super) fn mochi() -> Subject {
    Subject {
        id: 42,
        name: "Mochi".to_string(),
        species: "cat".to_string(),
        breed: Some("Domestic Shorthair".to_string()),
        age: Some(4.0),
    }
}

pub(super) fn kiwi() -> Subject {
    Subject {
        id: 7,
        name: "Kiwi".to_string(),
        species: "bird".to_string(),
        breed: None,
        age: None,
    }
}

pub(super) fn screening(event: ScreeningEvent) -> TriageAction {
    TriageAction::Screening(event)
}

pub(super) fn questionnaire(event: QuestionnaireEvent) -> TriageAction {
    TriageAction::Questionnaire(event)
}

/// Complaint plus RAP answers; the screening stays on the vitals step.
pub(super) fn vitals_actions(
    complaint: &str,
    respiration: RespirationOption,
    alertness: AlertnessOption,
    perfusion: PerfusionOption,
) -> Vec<TriageAction> {
    vec![
        screening(ScreeningEvent::EnterComplaint {
            text: complaint.to_string(),
        }),
        screening(ScreeningEvent::SubmitComplaint),
        screening(ScreeningEvent::SelectRespiration {
            option: respiration,
        }),
        screening(ScreeningEvent::SelectAlertness { option: alertness }),
        screening(ScreeningEvent::SelectPerfusion { option: perfusion }),
    ]
}

/// A calm screening that lands on the questionnaire.
pub(super) fn calm_screening() -> Vec<TriageAction> {
    let mut actions = vitals_actions(
        "  vomiting since yesterday  ",
        RespirationOption::Normal,
        AlertnessOption::Normal,
        PerfusionOption::Normal,
    );
    actions.push(screening(ScreeningEvent::CompleteScreening));
    actions
}

/// A screening tripped by a single critical symptom, acknowledged by the owner.
pub(super) fn emergency_screening() -> Vec<TriageAction> {
    let mut actions = vitals_actions(
        "found chewing a lily",
        RespirationOption::Normal,
        AlertnessOption::Normal,
        PerfusionOption::Normal,
    );
    actions.push(screening(ScreeningEvent::SetCriticalSymptom {
        symptom: CriticalSymptom::SuspectedPoisoning,
        checked: true,
    }));
    actions.push(screening(ScreeningEvent::CompleteScreening));
    actions.push(screening(ScreeningEvent::ContinueAssessment));
    actions
}

/// Digestive questionnaire with two primary symptoms and one overlapping extra.
pub(super) fn digestive_questionnaire() -> Vec<TriageAction> {
    vec![
        questionnaire(QuestionnaireEvent::SelectConcern {
            concern: MainConcern::Digestive,
        }),
        questionnaire(QuestionnaireEvent::Continue),
        questionnaire(QuestionnaireEvent::SetPrimarySymptom {
            key: "vomiting".to_string(),
            selected: true,
        }),
        questionnaire(QuestionnaireEvent::SetPrimarySymptom {
            key: "diarrhea".to_string(),
            selected: true,
        }),
        questionnaire(QuestionnaireEvent::Continue),
        questionnaire(QuestionnaireEvent::SelectSeverity {
            severity: Severity::Moderate,
        }),
        questionnaire(QuestionnaireEvent::Continue),
        questionnaire(QuestionnaireEvent::SelectDuration {
            duration: DurationBucket::OneToThreeDays,
        }),
        questionnaire(QuestionnaireEvent::Continue),
        questionnaire(QuestionnaireEvent::SelectProgression {
            progression: Progression::StayingSame,
        }),
        questionnaire(QuestionnaireEvent::Continue),
        questionnaire(QuestionnaireEvent::SetAdditionalSymptom {
            key: "vomiting".to_string(),
            selected: true,
        }),
        questionnaire(QuestionnaireEvent::SetAdditionalSymptom {
            key: "lethargy".to_string(),
            selected: true,
        }),
        questionnaire(QuestionnaireEvent::FinishAdditional),
    ]
}

pub(super) fn drive(session: &mut TriageSession, actions: Vec<TriageAction>) {
    for action in actions {
        let name = action.name();
        session
            .dispatch(action, now())
            .unwrap_or_else(|err| panic!("{name} should be accepted: {err}"));
    }
}

pub(super) fn new_session(subject: Subject) -> TriageSession {
    TriageSession::new(SessionId("triage-test".to_string()), subject)
}

pub(super) fn build_service() -> (
    TriageService<MemorySessions, MemoryNotifier>,
    Arc<MemorySessions>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemorySessions::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = TriageService::with_clock(repository.clone(), notifier.clone(), clock());
    (service, repository, notifier)
}

#[derive(Default, Clone)]
pub(super) struct MemorySessions {
    pub(super) sessions: Arc<Mutex<HashMap<SessionId, TriageSession>>>,
    fetch_gate: Arc<Mutex<Option<Arc<Barrier>>>>,
}

impl MemorySessions {
    /// Make every `fetch` wait until `parties` callers are reading at once.
    pub(super) fn hold_fetches(&self, parties: usize) {
        let barrier = Arc::new(Barrier::new(parties));
        *self.fetch_gate.lock().expect("gate mutex poisoned") = Some(barrier);
    }

    pub(super) fn release_fetches(&self) {
        *self.fetch_gate.lock().expect("gate mutex poisoned") = None;
    }
}

impl SessionRepository for MemorySessions {
    fn insert(&self, session: TriageSession) -> Result<TriageSession, RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        if guard.contains_key(session.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id().clone(), session.clone());
        Ok(session)
    }

    fn update(&self, session: TriageSession) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        ensure_next_revision(guard.get(session.id()), &session)?;
        guard.insert(session.id().clone(), session);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<TriageSession>, RepositoryError> {
        let stored = self
            .sessions
            .lock()
            .expect("repository mutex poisoned")
            .get(id)
            .cloned();
        let gate = self.fetch_gate.lock().expect("gate mutex poisoned").clone();
        if let Some(barrier) = gate {
            barrier.wait();
        }
        Ok(stored)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    envelopes: Arc<Mutex<Vec<NotificationEnvelope>>>,
}

impl MemoryNotifier {
    pub(super) fn envelopes(&self) -> Vec<NotificationEnvelope> {
        self.envelopes.lock().expect("notifier mutex poisoned").clone()
    }

    pub(super) fn names(&self) -> Vec<&'static str> {
        self.envelopes()
            .iter()
            .map(|envelope| envelope.notification.name())
            .collect()
    }
}

impl TriageNotifier for MemoryNotifier {
    fn publish(&self, envelope: NotificationEnvelope) -> Result<(), NotifyError> {
        self.envelopes
            .lock()
            .expect("notifier mutex poisoned")
            .push(envelope);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _session: TriageSession) -> Result<TriageSession, RepositoryError> {
        Err(RepositoryError::Unavailable("session store offline".to_string()))
    }

    fn update(&self, _session: TriageSession) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("session store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<TriageSession>, RepositoryError> {
        Err(RepositoryError::Unavailable("session store offline".to_string()))
    }
}

pub(super) struct OfflineNotifier;

impl TriageNotifier for OfflineNotifier {
    fn publish(&self, _envelope: NotificationEnvelope) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("diagnosis service offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
