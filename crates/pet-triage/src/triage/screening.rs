//! Phase one: chief complaint, RAP vitals and the critical-symptom checklist.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{AlertnessOption, CriticalSymptom, PerfusionOption, RespirationOption};
use super::domain::{EmergencySnapshot, ScreeningResult, TransitionBlocked, VitalsDraft};
use super::rules;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningStep {
    #[default]
    ChiefComplaint,
    VitalsCheck,
    EmergencyWarning,
    Completed,
}

impl ScreeningStep {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ChiefComplaint => "chief complaint",
            Self::VitalsCheck => "vitals check",
            Self::EmergencyWarning => "emergency warning",
            Self::Completed => "screening completed",
        }
    }
}

/// Owner input accepted while screening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScreeningEvent {
    EnterComplaint { text: String },
    SubmitComplaint,
    SelectRespiration { option: RespirationOption },
    SelectAlertness { option: AlertnessOption },
    SelectPerfusion { option: PerfusionOption },
    SetCriticalSymptom { symptom: CriticalSymptom, checked: bool },
    CompleteScreening,
    ContinueAssessment,
}

impl ScreeningEvent {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::EnterComplaint { .. } => "enter_complaint",
            Self::SubmitComplaint => "submit_complaint",
            Self::SelectRespiration { .. } => "select_respiration",
            Self::SelectAlertness { .. } => "select_alertness",
            Self::SelectPerfusion { .. } => "select_perfusion",
            Self::SetCriticalSymptom { .. } => "set_critical_symptom",
            Self::CompleteScreening => "complete_screening",
            Self::ContinueAssessment => "continue_assessment",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScreeningState {
    step: ScreeningStep,
    chief_complaint: String,
    vitals: VitalsDraft,
    critical_symptoms: BTreeSet<CriticalSymptom>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_emergency: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<ScreeningResult>,
}

impl ScreeningState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> ScreeningStep {
        self.step
    }

    pub fn chief_complaint(&self) -> &str {
        &self.chief_complaint
    }

    pub fn vitals(&self) -> &VitalsDraft {
        &self.vitals
    }

    pub fn critical_symptoms(&self) -> &BTreeSet<CriticalSymptom> {
        &self.critical_symptoms
    }

    /// Set once the evaluator has run; never recomputed afterwards.
    pub fn is_emergency(&self) -> Option<bool> {
        self.is_emergency
    }

    pub fn result(&self) -> Option<&ScreeningResult> {
        self.result.as_ref()
    }

    pub fn can_submit_complaint(&self) -> bool {
        self.step == ScreeningStep::ChiefComplaint && !self.chief_complaint.trim().is_empty()
    }

    pub fn can_complete(&self) -> bool {
        self.step == ScreeningStep::VitalsCheck && self.vitals.is_complete()
    }

    /// Action names currently enabled, for presentation layers to render.
    pub fn available_actions(&self) -> Vec<&'static str> {
        match self.step {
            ScreeningStep::ChiefComplaint => {
                let mut actions = vec!["enter_complaint"];
                if self.can_submit_complaint() {
                    actions.push("submit_complaint");
                }
                actions
            }
            ScreeningStep::VitalsCheck => {
                let mut actions = vec![
                    "select_respiration",
                    "select_alertness",
                    "select_perfusion",
                    "set_critical_symptom",
                ];
                if self.can_complete() {
                    actions.push("complete_screening");
                }
                actions
            }
            ScreeningStep::EmergencyWarning => vec!["continue_assessment"],
            ScreeningStep::Completed => Vec::new(),
        }
    }
}

/// Result of a successful screening transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningTransition {
    pub state: ScreeningState,
    /// Present only on the transition where the evaluator first flagged an emergency.
    pub emergency: Option<EmergencySnapshot>,
}

impl From<ScreeningState> for ScreeningTransition {
    fn from(state: ScreeningState) -> Self {
        Self {
            state,
            emergency: None,
        }
    }
}

fn not_available(state: &ScreeningState, event: &ScreeningEvent) -> TransitionBlocked {
    TransitionBlocked::NotAvailable {
        step: state.step.label(),
        action: event.name(),
    }
}

/// Applies one event to the screening state. `now` stamps the result when the
/// screening completes.
pub fn transition(
    state: &ScreeningState,
    event: ScreeningEvent,
    now: DateTime<Utc>,
) -> Result<ScreeningTransition, TransitionBlocked> {
    let mut next = state.clone();

    match (state.step, event) {
        (ScreeningStep::ChiefComplaint, ScreeningEvent::EnterComplaint { text }) => {
            next.chief_complaint = text;
            Ok(next.into())
        }
        (ScreeningStep::ChiefComplaint, ScreeningEvent::SubmitComplaint) => {
            let trimmed = state.chief_complaint.trim();
            if trimmed.is_empty() {
                return Err(TransitionBlocked::Incomplete {
                    step: ScreeningStep::ChiefComplaint.label(),
                    missing: "describe what is going on",
                });
            }
            next.chief_complaint = trimmed.to_string();
            next.step = ScreeningStep::VitalsCheck;
            Ok(next.into())
        }
        (ScreeningStep::VitalsCheck, ScreeningEvent::SelectRespiration { option }) => {
            next.vitals.respiration = Some(option);
            Ok(next.into())
        }
        (ScreeningStep::VitalsCheck, ScreeningEvent::SelectAlertness { option }) => {
            next.vitals.alertness = Some(option);
            Ok(next.into())
        }
        (ScreeningStep::VitalsCheck, ScreeningEvent::SelectPerfusion { option }) => {
            next.vitals.perfusion = Some(option);
            Ok(next.into())
        }
        (ScreeningStep::VitalsCheck, ScreeningEvent::SetCriticalSymptom { symptom, checked }) => {
            if checked {
                next.critical_symptoms.insert(symptom);
            } else {
                next.critical_symptoms.remove(&symptom);
            }
            Ok(next.into())
        }
        (ScreeningStep::VitalsCheck, ScreeningEvent::CompleteScreening) => {
            let vitals = state
                .vitals
                .complete()
                .ok_or(TransitionBlocked::Incomplete {
                    step: ScreeningStep::VitalsCheck.label(),
                    missing: "respiration, alertness and perfusion must all be answered",
                })?;

            let signals = rules::collect_signals(&vitals, &state.critical_symptoms);
            let is_emergency = signals.is_emergency();
            next.is_emergency = Some(is_emergency);

            let result = ScreeningResult {
                chief_complaint: state.chief_complaint.clone(),
                vitals,
                critical_symptoms: state.critical_symptoms.clone(),
                is_emergency,
                timestamp: now,
            };

            if is_emergency {
                tracing::debug!(
                    respiration = signals.respiration,
                    alertness = signals.alertness,
                    perfusion = signals.perfusion,
                    critical = signals.critical_count,
                    "screening flagged an emergency"
                );
                let snapshot = result.snapshot();
                next.step = ScreeningStep::EmergencyWarning;
                Ok(ScreeningTransition {
                    state: next,
                    emergency: Some(snapshot),
                })
            } else {
                next.step = ScreeningStep::Completed;
                next.result = Some(result);
                Ok(next.into())
            }
        }
        (ScreeningStep::EmergencyWarning, ScreeningEvent::ContinueAssessment) => {
            let vitals = state
                .vitals
                .complete()
                .ok_or(TransitionBlocked::Incomplete {
                    step: ScreeningStep::EmergencyWarning.label(),
                    missing: "vitals missing from emergency screening",
                })?;
            next.step = ScreeningStep::Completed;
            next.result = Some(ScreeningResult {
                chief_complaint: state.chief_complaint.clone(),
                vitals,
                critical_symptoms: state.critical_symptoms.clone(),
                is_emergency: true,
                timestamp: now,
            });
            Ok(next.into())
        }
        (_, event) => Err(not_available(state, &event)),
    }
}
