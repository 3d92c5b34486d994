use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{AlertnessOption, CriticalSymptom, PerfusionOption, RespirationOption};

/// Identifier wrapper for triage sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The pet being assessed. Supplied once when the session starts and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: u64,
    pub name: String,
    pub species: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f32>,
}

/// RAP answers captured so far; each axis is overwritten on reselection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VitalsDraft {
    pub respiration: Option<RespirationOption>,
    pub alertness: Option<AlertnessOption>,
    pub perfusion: Option<PerfusionOption>,
}

impl VitalsDraft {
    pub fn complete(&self) -> Option<Vitals> {
        Some(Vitals {
            respiration: self.respiration?,
            alertness: self.alertness?,
            perfusion: self.perfusion?,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.complete().is_some()
    }
}

/// A full set of RAP answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Vitals {
    pub respiration: RespirationOption,
    pub alertness: AlertnessOption,
    pub perfusion: PerfusionOption,
}

/// Raw evidence forwarded when an emergency is first detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencySnapshot {
    pub respiration: RespirationOption,
    pub alertness: AlertnessOption,
    pub perfusion: PerfusionOption,
    pub critical_symptoms: Vec<CriticalSymptom>,
}

/// Outcome of phase one. Produced once per screening run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreeningResult {
    pub chief_complaint: String,
    pub vitals: Vitals,
    pub critical_symptoms: BTreeSet<CriticalSymptom>,
    pub is_emergency: bool,
    pub timestamp: DateTime<Utc>,
}

impl ScreeningResult {
    pub fn snapshot(&self) -> EmergencySnapshot {
        EmergencySnapshot {
            respiration: self.vitals.respiration,
            alertness: self.vitals.alertness,
            perfusion: self.vitals.perfusion,
            critical_symptoms: self.critical_symptoms.iter().copied().collect(),
        }
    }
}

/// Primary symptoms (scoped to the concern) plus optional extras.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymptomSelection {
    pub primary: BTreeSet<String>,
    pub additional: BTreeSet<String>,
}

impl SymptomSelection {
    /// Union of primary and additional keys; duplicates collapse.
    pub fn merged(&self) -> BTreeSet<String> {
        self.primary.union(&self.additional).cloned().collect()
    }
}

/// Time source so screening timestamps can be pinned in tests and replays.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Why an action was refused. A refused action never changes session state; the
/// presentation layer is expected to have disabled it already.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionBlocked {
    #[error("{action} is not available during {step}")]
    NotAvailable {
        step: &'static str,
        action: &'static str,
    },
    #[error("{step} is incomplete: {missing}")]
    Incomplete {
        step: &'static str,
        missing: &'static str,
    },
    #[error("'{key}' is not offered during {step}")]
    UnknownOption { step: &'static str, key: String },
    #[error("session is {0} and accepts no further actions")]
    Terminal(&'static str),
}
