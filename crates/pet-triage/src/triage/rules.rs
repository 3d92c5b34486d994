use std::collections::BTreeSet;

use super::catalog::{CriticalSymptom, RapOption};
use super::domain::Vitals;

/// Which inputs tripped the emergency flag. Kept for logging only; the decision
/// itself is the plain OR of every signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct EmergencySignals {
    pub respiration: bool,
    pub alertness: bool,
    pub perfusion: bool,
    pub critical_count: usize,
}

impl EmergencySignals {
    pub fn is_emergency(&self) -> bool {
        self.respiration || self.alertness || self.perfusion || self.critical_count > 0
    }
}

pub(crate) fn collect_signals(
    vitals: &Vitals,
    critical_symptoms: &BTreeSet<CriticalSymptom>,
) -> EmergencySignals {
    EmergencySignals {
        respiration: vitals.respiration.is_emergency(),
        alertness: vitals.alertness.is_emergency(),
        perfusion: vitals.perfusion.is_emergency(),
        critical_count: critical_symptoms.len(),
    }
}

/// A single emergency-tagged vital or a single critical symptom is enough.
pub fn evaluate_emergency(vitals: &Vitals, critical_symptoms: &BTreeSet<CriticalSymptom>) -> bool {
    collect_signals(vitals, critical_symptoms).is_emergency()
}
