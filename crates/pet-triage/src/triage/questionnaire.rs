//! Phase two: the structured symptom questionnaire.
//!
//! Steps advance strictly forward. Every single-choice step records the owner's pick
//! (reselecting overwrites it) and only `continue` moves on, which stays disabled until
//! the step's field is filled. The extras step finishes through `skip` or `finish`.

use serde::{Deserialize, Serialize};

use super::catalog::{
    additional_symptom_groups, offers_additional_symptom, DurationBucket, MainConcern,
    Progression, Severity, SymptomGroup,
};
use super::domain::{SymptomSelection, TransitionBlocked};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionnaireStep {
    #[default]
    Concern,
    PrimarySymptoms,
    Severity,
    Duration,
    Progression,
    AdditionalSymptoms,
    Summary,
    Submitted,
}

impl QuestionnaireStep {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Concern => "main concern",
            Self::PrimarySymptoms => "symptom selection",
            Self::Severity => "severity",
            Self::Duration => "duration",
            Self::Progression => "progression",
            Self::AdditionalSymptoms => "additional symptoms",
            Self::Summary => "summary",
            Self::Submitted => "submitted",
        }
    }

    /// Position shown to the owner. Duration and progression share step four; the
    /// summary sits outside the numbered steps.
    pub const fn index(self) -> Option<u8> {
        match self {
            Self::Concern => Some(1),
            Self::PrimarySymptoms => Some(2),
            Self::Severity => Some(3),
            Self::Duration | Self::Progression => Some(4),
            Self::AdditionalSymptoms => Some(5),
            Self::Summary | Self::Submitted => None,
        }
    }
}

/// Owner input accepted while answering the questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionnaireEvent {
    SelectConcern { concern: MainConcern },
    SetPrimarySymptom { key: String, selected: bool },
    SelectSeverity { severity: Severity },
    SelectDuration { duration: DurationBucket },
    SelectProgression { progression: Progression },
    SetAdditionalSymptom { key: String, selected: bool },
    Continue,
    SkipAdditional,
    FinishAdditional,
    Submit,
}

impl QuestionnaireEvent {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SelectConcern { .. } => "select_concern",
            Self::SetPrimarySymptom { .. } => "set_primary_symptom",
            Self::SelectSeverity { .. } => "select_severity",
            Self::SelectDuration { .. } => "select_duration",
            Self::SelectProgression { .. } => "select_progression",
            Self::SetAdditionalSymptom { .. } => "set_additional_symptom",
            Self::Continue => "continue",
            Self::SkipAdditional => "skip_additional",
            Self::FinishAdditional => "finish_additional",
            Self::Submit => "submit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionnaireState {
    step: QuestionnaireStep,
    species: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    concern: Option<MainConcern>,
    symptoms: SymptomSelection,
    #[serde(skip_serializing_if = "Option::is_none")]
    severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<DurationBucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    progression: Option<Progression>,
}

impl QuestionnaireState {
    pub fn new(species: impl Into<String>) -> Self {
        Self {
            step: QuestionnaireStep::Concern,
            species: species.into(),
            concern: None,
            symptoms: SymptomSelection::default(),
            severity: None,
            duration: None,
            progression: None,
        }
    }

    pub fn step(&self) -> QuestionnaireStep {
        self.step
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn concern(&self) -> Option<MainConcern> {
        self.concern
    }

    pub fn symptoms(&self) -> &SymptomSelection {
        &self.symptoms
    }

    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }

    pub fn duration(&self) -> Option<DurationBucket> {
        self.duration
    }

    pub fn progression(&self) -> Option<Progression> {
        self.progression
    }

    /// Optional symptom groups offered for this subject's species.
    pub fn additional_groups(&self) -> Vec<SymptomGroup> {
        additional_symptom_groups(&self.species)
    }

    /// Whether every mandatory field is filled, so a payload may be built.
    pub fn is_ready(&self) -> bool {
        self.concern.is_some()
            && !self.symptoms.primary.is_empty()
            && self.severity.is_some()
            && self.duration.is_some()
            && self.progression.is_some()
    }

    fn missing_for_step(&self) -> Option<&'static str> {
        match self.step {
            QuestionnaireStep::Concern if self.concern.is_none() => Some("choose a main concern"),
            QuestionnaireStep::PrimarySymptoms if self.symptoms.primary.is_empty() => {
                Some("select at least one symptom")
            }
            QuestionnaireStep::Severity if self.severity.is_none() => Some("choose a severity"),
            QuestionnaireStep::Duration if self.duration.is_none() => Some("choose a duration"),
            QuestionnaireStep::Progression if self.progression.is_none() => {
                Some("choose how it is progressing")
            }
            _ => None,
        }
    }

    pub fn can_continue(&self) -> bool {
        self.continue_target().is_some() && self.missing_for_step().is_none()
    }

    fn continue_target(&self) -> Option<QuestionnaireStep> {
        match self.step {
            QuestionnaireStep::Concern => Some(QuestionnaireStep::PrimarySymptoms),
            QuestionnaireStep::PrimarySymptoms => Some(QuestionnaireStep::Severity),
            QuestionnaireStep::Severity => Some(QuestionnaireStep::Duration),
            QuestionnaireStep::Duration => Some(QuestionnaireStep::Progression),
            QuestionnaireStep::Progression => Some(QuestionnaireStep::AdditionalSymptoms),
            _ => None,
        }
    }

    pub fn available_actions(&self) -> Vec<&'static str> {
        let mut actions = match self.step {
            QuestionnaireStep::Concern => vec!["select_concern"],
            QuestionnaireStep::PrimarySymptoms => vec!["set_primary_symptom"],
            QuestionnaireStep::Severity => vec!["select_severity"],
            QuestionnaireStep::Duration => vec!["select_duration"],
            QuestionnaireStep::Progression => vec!["select_progression"],
            QuestionnaireStep::AdditionalSymptoms => {
                vec!["set_additional_symptom", "skip_additional", "finish_additional"]
            }
            QuestionnaireStep::Summary => vec!["submit"],
            QuestionnaireStep::Submitted => Vec::new(),
        };
        if self.can_continue() {
            actions.push("continue");
        }
        actions
    }
}

fn not_available(state: &QuestionnaireState, event: &QuestionnaireEvent) -> TransitionBlocked {
    TransitionBlocked::NotAvailable {
        step: state.step.label(),
        action: event.name(),
    }
}

/// Applies one event to the questionnaire. `Submit` only marks the questionnaire as
/// submitted; building the payload is left to the caller.
pub fn transition(
    state: &QuestionnaireState,
    event: QuestionnaireEvent,
) -> Result<QuestionnaireState, TransitionBlocked> {
    let mut next = state.clone();

    match (state.step, event) {
        (QuestionnaireStep::Concern, QuestionnaireEvent::SelectConcern { concern }) => {
            next.concern = Some(concern);
        }
        (
            QuestionnaireStep::PrimarySymptoms,
            QuestionnaireEvent::SetPrimarySymptom { key, selected },
        ) => {
            let offered = state
                .concern
                .map(|concern| concern.offers_symptom(&key))
                .unwrap_or(false);
            if !offered {
                return Err(TransitionBlocked::UnknownOption {
                    step: state.step.label(),
                    key,
                });
            }
            if selected {
                next.symptoms.primary.insert(key);
            } else {
                next.symptoms.primary.remove(&key);
            }
        }
        (QuestionnaireStep::Severity, QuestionnaireEvent::SelectSeverity { severity }) => {
            next.severity = Some(severity);
        }
        (QuestionnaireStep::Duration, QuestionnaireEvent::SelectDuration { duration }) => {
            next.duration = Some(duration);
        }
        (
            QuestionnaireStep::Progression,
            QuestionnaireEvent::SelectProgression { progression },
        ) => {
            next.progression = Some(progression);
        }
        (
            QuestionnaireStep::AdditionalSymptoms,
            QuestionnaireEvent::SetAdditionalSymptom { key, selected },
        ) => {
            if !offers_additional_symptom(&state.species, &key) {
                return Err(TransitionBlocked::UnknownOption {
                    step: state.step.label(),
                    key,
                });
            }
            if selected {
                next.symptoms.additional.insert(key);
            } else {
                next.symptoms.additional.remove(&key);
            }
        }
        (QuestionnaireStep::AdditionalSymptoms, QuestionnaireEvent::SkipAdditional) => {
            next.symptoms.additional.clear();
            next.step = QuestionnaireStep::Summary;
        }
        (QuestionnaireStep::AdditionalSymptoms, QuestionnaireEvent::FinishAdditional) => {
            next.step = QuestionnaireStep::Summary;
        }
        (QuestionnaireStep::Summary, QuestionnaireEvent::Submit) => {
            if !state.is_ready() {
                return Err(TransitionBlocked::Incomplete {
                    step: state.step.label(),
                    missing: "assessment is missing required answers",
                });
            }
            next.step = QuestionnaireStep::Submitted;
        }
        (_, QuestionnaireEvent::Continue) => {
            let target = state.continue_target().ok_or(TransitionBlocked::NotAvailable {
                step: state.step.label(),
                action: "continue",
            })?;
            if let Some(missing) = state.missing_for_step() {
                return Err(TransitionBlocked::Incomplete {
                    step: state.step.label(),
                    missing,
                });
            }
            next.step = target;
        }
        (_, event) => return Err(not_available(state, &event)),
    }

    Ok(next)
}
