use chrono::{DateTime, Utc};
use serde::Serialize;

use super::catalog::{
    AlertnessOption, CriticalSymptom, DurationBucket, MainConcern, PerfusionOption,
    Progression, RespirationOption, Severity,
};
use super::domain::{ScreeningResult, Subject, SymptomSelection};

/// Canonical assessment record handed to the diagnosis service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentPayload {
    pub pet_id: u64,
    pub pet_name: String,
    pub species: String,
    pub urgency: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<DurationBucket>,
    pub duration_days: Option<f64>,
    pub symptoms_list: Vec<String>,
    pub symptoms_text: String,
    pub symptom_count: usize,
    pub main_concern: Option<String>,
    pub vtl_category: Option<String>,
    pub severity: Option<Severity>,
    pub progression: Option<Progression>,
    pub emergency_data: Option<EmergencyData>,
}

/// The screening evidence, carried verbatim so the diagnosis service sees more than
/// the boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyData {
    pub chief_complaint: String,
    pub emergency_screen: EmergencyScreen,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyScreen {
    pub respiration: Option<RespirationOption>,
    pub alertness: Option<AlertnessOption>,
    pub perfusion: Option<PerfusionOption>,
    pub critical_symptoms: Vec<CriticalSymptom>,
    pub is_emergency: bool,
}

impl From<&ScreeningResult> for EmergencyData {
    fn from(result: &ScreeningResult) -> Self {
        Self {
            chief_complaint: result.chief_complaint.clone(),
            emergency_screen: EmergencyScreen {
                respiration: Some(result.vitals.respiration),
                alertness: Some(result.vitals.alertness),
                perfusion: Some(result.vitals.perfusion),
                critical_symptoms: result.critical_symptoms.iter().copied().collect(),
                is_emergency: result.is_emergency,
            },
            timestamp: result.timestamp,
        }
    }
}

/// Uppercases the first letter and leaves the rest untouched.
pub(crate) fn capitalize_species(species: &str) -> String {
    let trimmed = species.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Merges both phases into the assessment record.
///
/// The questionnaire refuses to submit with missing answers, so the fallbacks here
/// only matter for callers assembling payloads by hand: severity falls back to mild,
/// while a missing duration stays null instead of implying "under 24 hours".
pub fn build_payload(
    subject: &Subject,
    screening: Option<&ScreeningResult>,
    concern: Option<MainConcern>,
    symptoms: &SymptomSelection,
    severity: Option<Severity>,
    duration: Option<DurationBucket>,
    progression: Option<Progression>,
) -> AssessmentPayload {
    let symptoms_list: Vec<String> = symptoms.merged().into_iter().collect();
    let symptoms_text = symptoms_list.join(", ");
    let symptom_count = symptoms_list.len();

    AssessmentPayload {
        pet_id: subject.id,
        pet_name: subject.name.clone(),
        species: capitalize_species(&subject.species),
        urgency: severity.unwrap_or(Severity::Mild),
        duration,
        duration_days: duration.map(DurationBucket::days),
        symptoms_list,
        symptoms_text,
        symptom_count,
        main_concern: concern.map(|concern| concern.label().to_string()),
        vtl_category: concern.map(|concern| concern.vtl_category().to_string()),
        severity,
        progression,
        emergency_data: screening.map(EmergencyData::from),
    }
}
