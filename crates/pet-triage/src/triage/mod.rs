//! Pet triage conversation: emergency screening followed by a structured symptom
//! questionnaire that yields the assessment payload for the diagnosis service.

pub mod catalog;
pub mod domain;
pub mod export;
pub mod payload;
pub mod prompt;
pub mod questionnaire;
pub mod repository;
pub mod router;
pub mod rules;
pub mod screening;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use catalog::{
    AlertnessOption, CatalogView, CriticalSymptom, DurationBucket, MainConcern, PerfusionOption,
    Progression, RapOption, RespirationOption, Severity, SpeciesCategory,
};
pub use domain::{
    Clock, EmergencySnapshot, FixedClock, ScreeningResult, SessionId, Subject, SymptomSelection,
    SystemClock, TransitionBlocked, Vitals,
};
pub use payload::{build_payload, AssessmentPayload, EmergencyData, EmergencyScreen};
pub use prompt::{Prompt, PromptSlot, TypingTimer};
pub use questionnaire::{QuestionnaireEvent, QuestionnaireState, QuestionnaireStep};
pub use repository::{
    ensure_next_revision, NotificationEnvelope, NotifyError, RepositoryError, SessionRepository,
    TriageNotifier,
};
pub use router::triage_router;
pub use rules::evaluate_emergency;
pub use screening::{ScreeningEvent, ScreeningState, ScreeningStep};
pub use service::{TriageService, TriageServiceError};
pub use session::{SessionStep, SessionView, TriageAction, TriageNotification, TriageSession};
