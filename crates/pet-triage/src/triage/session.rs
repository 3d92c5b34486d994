use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::catalog::{symptom_label, SymptomGroup};
use super::domain::{EmergencySnapshot, ScreeningResult, SessionId, Subject, TransitionBlocked};
use super::payload::{build_payload, AssessmentPayload};
use super::prompt::{PendingPrompt, Prompt, PromptSlot};
use super::questionnaire::{self, QuestionnaireEvent, QuestionnaireState, QuestionnaireStep};
use super::screening::{self, ScreeningEvent, ScreeningState, ScreeningStep};

/// Everything the owner (or a replay) can ask the session to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "event", rename_all = "snake_case")]
pub enum TriageAction {
    Screening(ScreeningEvent),
    Questionnaire(QuestionnaireEvent),
    /// Full reset back to the chief complaint; both phases are discarded.
    Restart,
    /// Abandon the session without emitting a payload.
    Cancel,
}

impl TriageAction {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Screening(event) => event.name(),
            Self::Questionnaire(event) => event.name(),
            Self::Restart => "restart",
            Self::Cancel => "cancel",
        }
    }
}

/// Outbound messages queued by the session for collaborators to consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum TriageNotification {
    EmergencyDetected(EmergencySnapshot),
    AssessmentCompleted(AssessmentPayload),
    SessionCancelled,
}

impl TriageNotification {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::EmergencyDetected(_) => "emergency_detected",
            Self::AssessmentCompleted(_) => "assessment_completed",
            Self::SessionCancelled => "session_cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "step", rename_all = "snake_case")]
pub enum SessionStep {
    Screening(ScreeningStep),
    Questionnaire(QuestionnaireStep),
    Submitted,
    Cancelled,
}

impl SessionStep {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Screening(step) => step.label(),
            Self::Questionnaire(step) => step.label(),
            Self::Submitted => "submitted",
            Self::Cancelled => "cancelled",
        }
    }

    pub const fn index(self) -> Option<u8> {
        match self {
            Self::Questionnaire(step) => step.index(),
            _ => None,
        }
    }

    const fn prompt_key(self) -> Option<&'static str> {
        match self {
            Self::Screening(ScreeningStep::ChiefComplaint) => Some("chief_complaint"),
            Self::Screening(ScreeningStep::VitalsCheck) => Some("vitals_check"),
            Self::Screening(ScreeningStep::EmergencyWarning) => Some("emergency_warning"),
            Self::Questionnaire(QuestionnaireStep::Concern) => Some("concern"),
            Self::Questionnaire(QuestionnaireStep::PrimarySymptoms) => Some("primary_symptoms"),
            Self::Questionnaire(QuestionnaireStep::Severity) => Some("severity"),
            Self::Questionnaire(QuestionnaireStep::Duration) => Some("duration"),
            Self::Questionnaire(QuestionnaireStep::Progression) => Some("progression"),
            Self::Questionnaire(QuestionnaireStep::AdditionalSymptoms) => {
                Some("additional_symptoms")
            }
            Self::Questionnaire(QuestionnaireStep::Summary) => Some("summary"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
enum Stage {
    Screening(ScreeningState),
    Questionnaire {
        screening: ScreeningResult,
        state: QuestionnaireState,
    },
    Submitted {
        screening: ScreeningResult,
        state: QuestionnaireState,
        payload: AssessmentPayload,
    },
    Cancelled,
}

impl Stage {
    fn step(&self) -> SessionStep {
        match self {
            Stage::Screening(state) => SessionStep::Screening(state.step()),
            Stage::Questionnaire { state, .. } => SessionStep::Questionnaire(state.step()),
            Stage::Submitted { .. } => SessionStep::Submitted,
            Stage::Cancelled => SessionStep::Cancelled,
        }
    }
}

/// One owner's pass through screening and questionnaire for a single pet.
///
/// The session only moves in response to [`TriageAction`]s. Outbound messages are
/// queued and handed out by [`TriageSession::drain_notifications`].
#[derive(Debug, Clone)]
pub struct TriageSession {
    id: SessionId,
    subject: Subject,
    stage: Stage,
    revision: u64,
    // Survives restarts. A session raises at most one emergency alert, even when the owner
    // restarts and reports the same signs again.
    emergency_notified: bool,
    outbox: Vec<TriageNotification>,
    prompts: PromptSlot,
}

impl TriageSession {
    pub fn new(id: SessionId, subject: Subject) -> Self {
        let mut session = Self {
            id,
            subject,
            stage: Stage::Screening(ScreeningState::new()),
            revision: 0,
            emergency_notified: false,
            outbox: Vec::new(),
            prompts: PromptSlot::default(),
        };
        session.schedule_prompt();
        session
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Bumped by every accepted action and released prompt. Stores compare it to reject
    /// writes based on an outdated copy.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn step(&self) -> SessionStep {
        self.stage.step()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.stage, Stage::Submitted { .. } | Stage::Cancelled)
    }

    pub fn screening(&self) -> Option<&ScreeningState> {
        match &self.stage {
            Stage::Screening(state) => Some(state),
            _ => None,
        }
    }

    pub fn screening_result(&self) -> Option<&ScreeningResult> {
        match &self.stage {
            Stage::Questionnaire { screening, .. } | Stage::Submitted { screening, .. } => {
                Some(screening)
            }
            _ => None,
        }
    }

    pub fn questionnaire(&self) -> Option<&QuestionnaireState> {
        match &self.stage {
            Stage::Questionnaire { state, .. } | Stage::Submitted { state, .. } => Some(state),
            _ => None,
        }
    }

    pub fn payload(&self) -> Option<&AssessmentPayload> {
        match &self.stage {
            Stage::Submitted { payload, .. } => Some(payload),
            _ => None,
        }
    }

    pub fn pending_prompt(&self) -> Option<&PendingPrompt> {
        self.prompts.pending()
    }

    /// Releases the delayed prompt for `ticket`; stale tickets yield nothing.
    pub fn release_prompt(&mut self, ticket: u64) -> Option<Prompt> {
        let prompt = self.prompts.release(ticket)?;
        self.revision += 1;
        Some(prompt)
    }

    pub fn drain_notifications(&mut self) -> Vec<TriageNotification> {
        std::mem::take(&mut self.outbox)
    }

    pub fn available_actions(&self) -> Vec<&'static str> {
        let mut actions = match &self.stage {
            Stage::Screening(state) => state.available_actions(),
            Stage::Questionnaire { state, .. } => state.available_actions(),
            Stage::Submitted { .. } | Stage::Cancelled => return Vec::new(),
        };
        actions.push("restart");
        actions.push("cancel");
        actions
    }

    /// Applies one action. A refused action leaves the session untouched.
    pub fn dispatch(
        &mut self,
        action: TriageAction,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionBlocked> {
        let step_before = self.stage.step();
        let restarting = matches!(action, TriageAction::Restart);

        let next = match (&self.stage, action) {
            (Stage::Submitted { .. }, _) => return Err(TransitionBlocked::Terminal("submitted")),
            (Stage::Cancelled, _) => return Err(TransitionBlocked::Terminal("cancelled")),
            (_, TriageAction::Restart) => {
                info!(session_id = %self.id, "triage session restarted");
                Stage::Screening(ScreeningState::new())
            }
            (_, TriageAction::Cancel) => {
                info!(
                    session_id = %self.id,
                    step = step_before.label(),
                    "triage session cancelled"
                );
                self.outbox.push(TriageNotification::SessionCancelled);
                Stage::Cancelled
            }
            (Stage::Screening(state), TriageAction::Screening(event)) => {
                let transition = screening::transition(state, event, now)?;
                if let Some(snapshot) = transition.emergency {
                    if !self.emergency_notified {
                        self.emergency_notified = true;
                        warn!(
                            session_id = %self.id,
                            pet_id = self.subject.id,
                            critical = snapshot.critical_symptoms.len(),
                            "emergency detected during screening"
                        );
                        self.outbox
                            .push(TriageNotification::EmergencyDetected(snapshot));
                    }
                }

                match transition.state.result().cloned() {
                    Some(result) => Stage::Questionnaire {
                        screening: result,
                        state: QuestionnaireState::new(self.subject.species.clone()),
                    },
                    None => Stage::Screening(transition.state),
                }
            }
            (Stage::Questionnaire { screening, state }, TriageAction::Questionnaire(event)) => {
                let next = questionnaire::transition(state, event)?;
                if next.step() == QuestionnaireStep::Submitted {
                    let payload = build_payload(
                        &self.subject,
                        Some(screening),
                        next.concern(),
                        next.symptoms(),
                        next.severity(),
                        next.duration(),
                        next.progression(),
                    );
                    info!(
                        session_id = %self.id,
                        pet_id = payload.pet_id,
                        symptom_count = payload.symptom_count,
                        emergency = screening.is_emergency,
                        "assessment submitted"
                    );
                    self.outbox
                        .push(TriageNotification::AssessmentCompleted(payload.clone()));
                    Stage::Submitted {
                        screening: screening.clone(),
                        state: next,
                        payload,
                    }
                } else {
                    Stage::Questionnaire {
                        screening: screening.clone(),
                        state: next,
                    }
                }
            }
            (stage, action) => {
                return Err(TransitionBlocked::NotAvailable {
                    step: stage.step().label(),
                    action: action.name(),
                })
            }
        };

        self.stage = next;
        self.revision += 1;

        if restarting || self.stage.step() != step_before {
            self.schedule_prompt();
        }

        Ok(())
    }

    fn schedule_prompt(&mut self) {
        self.prompts.cancel();
        if let Some(prompt) = self.prompt_for_step() {
            self.prompts.schedule(prompt);
        }
    }

    fn prompt_for_step(&self) -> Option<Prompt> {
        let step = self.stage.step();
        let key = step.prompt_key()?;
        let name = &self.subject.name;
        let emergency = self
            .screening_result()
            .map(|result| result.is_emergency)
            .unwrap_or(false);

        let text = match step {
            SessionStep::Screening(ScreeningStep::ChiefComplaint) => {
                format!("Hi! I'm here to help check on {name}. What's going on today?")
            }
            SessionStep::Screening(ScreeningStep::VitalsCheck) => format!(
                "Thanks. Let's quickly check {name}'s breathing, alertness and gum color, and tick any urgent signs you see."
            ),
            SessionStep::Screening(ScreeningStep::EmergencyWarning) => format!(
                "These signs suggest {name} may need emergency care. Please contact your nearest emergency vet now. You can keep going to share more details."
            ),
            SessionStep::Questionnaire(QuestionnaireStep::Concern) if emergency => format!(
                "While you arrange care, tell me which area worries you most about {name}."
            ),
            SessionStep::Questionnaire(QuestionnaireStep::Concern) => format!(
                "No emergency signs so far. Which area best describes {name}'s problem?"
            ),
            SessionStep::Questionnaire(QuestionnaireStep::PrimarySymptoms) => {
                "Which of these symptoms have you noticed?".to_string()
            }
            SessionStep::Questionnaire(QuestionnaireStep::Severity) => {
                "How severe would you say it is?".to_string()
            }
            SessionStep::Questionnaire(QuestionnaireStep::Duration) => {
                "How long has this been going on?".to_string()
            }
            SessionStep::Questionnaire(QuestionnaireStep::Progression) => {
                "Is it getting better, worse, or staying about the same?".to_string()
            }
            SessionStep::Questionnaire(QuestionnaireStep::AdditionalSymptoms) => {
                "Anything else you've noticed? This part is optional.".to_string()
            }
            SessionStep::Questionnaire(QuestionnaireStep::Summary) => {
                format!("Here's what you told me about {name}. Submit when it looks right.")
            }
            _ => return None,
        };

        Some(Prompt { key, text })
    }

    pub fn view(&self) -> SessionView {
        let step = self.stage.step();
        let questionnaire = self.questionnaire().cloned();
        let additional_groups = match step {
            SessionStep::Questionnaire(QuestionnaireStep::AdditionalSymptoms) => questionnaire
                .as_ref()
                .map(QuestionnaireState::additional_groups),
            _ => None,
        };
        let summary = match (self.screening_result(), self.questionnaire()) {
            (Some(result), Some(state))
                if matches!(
                    state.step(),
                    QuestionnaireStep::Summary | QuestionnaireStep::Submitted
                ) =>
            {
                Some(SummaryView::new(&self.subject, result, state))
            }
            _ => None,
        };

        SessionView {
            session_id: self.id.clone(),
            subject: self.subject.clone(),
            step,
            step_index: step.index(),
            available_actions: self.available_actions(),
            screening: self.screening().cloned(),
            screening_result: self.screening_result().cloned(),
            questionnaire,
            additional_groups,
            summary,
            payload: self.payload().cloned(),
            pending_prompt: self.prompts.pending().cloned(),
        }
    }
}

/// Read-only recap shown before submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub pet_name: String,
    pub chief_complaint: String,
    pub is_emergency: bool,
    pub concern: Option<&'static str>,
    pub symptoms: Vec<&'static str>,
    pub additional_symptoms: Vec<&'static str>,
    pub severity: Option<&'static str>,
    pub duration: Option<&'static str>,
    pub progression: Option<&'static str>,
}

impl SummaryView {
    fn new(subject: &Subject, result: &ScreeningResult, state: &QuestionnaireState) -> Self {
        let labels = |keys: &std::collections::BTreeSet<String>| -> Vec<&'static str> {
            keys.iter().filter_map(|key| symptom_label(key)).collect()
        };

        Self {
            pet_name: subject.name.clone(),
            chief_complaint: result.chief_complaint.clone(),
            is_emergency: result.is_emergency,
            concern: state.concern().map(|concern| concern.label()),
            symptoms: labels(&state.symptoms().primary),
            additional_symptoms: labels(&state.symptoms().additional),
            severity: state.severity().map(|severity| severity.label()),
            duration: state.duration().map(|duration| duration.label()),
            progression: state.progression().map(|progression| progression.label()),
        }
    }
}

/// Serializable snapshot of a session for presentation layers.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub subject: Subject,
    pub step: SessionStep,
    pub step_index: Option<u8>,
    pub available_actions: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screening: Option<ScreeningState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screening_result: Option<ScreeningResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questionnaire: Option<QuestionnaireState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_groups: Option<Vec<SymptomGroup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<AssessmentPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_prompt: Option<PendingPrompt>,
}
