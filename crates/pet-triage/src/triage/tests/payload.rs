use std::collections::BTreeSet;

use super::common::{mochi, now};
use crate::triage::catalog::{
    AlertnessOption, CriticalSymptom, DurationBucket, MainConcern, PerfusionOption, Progression,
    RespirationOption, Severity,
};
use crate::triage::domain::{ScreeningResult, SymptomSelection, Vitals};
use crate::triage::payload::{build_payload, capitalize_species};

fn selection(primary: &[&str], additional: &[&str]) -> SymptomSelection {
    SymptomSelection {
        primary: primary.iter().map(|key| key.to_string()).collect(),
        additional: additional.iter().map(|key| key.to_string()).collect(),
    }
}

#[test]
fn overlapping_symptoms_are_counted_once() {
    let payload = build_payload(
        &mochi(),
        None,
        Some(MainConcern::Digestive),
        &selection(&["vomiting", "diarrhea"], &["vomiting", "lethargy"]),
        Some(Severity::Severe),
        Some(DurationBucket::FourToSevenDays),
        Some(Progression::GettingWorse),
    );
    assert_eq!(payload.symptom_count, 3);
    assert_eq!(payload.symptoms_list.len(), 3);
    assert_eq!(payload.duration_days, Some(5.0));
    assert!(payload.emergency_data.is_none());
}

#[test]
fn missing_answers_fall_back_without_inventing_a_duration() {
    let payload = build_payload(
        &mochi(),
        None,
        None,
        &SymptomSelection::default(),
        None,
        None,
        None,
    );
    assert_eq!(payload.urgency, Severity::Mild);
    assert_eq!(payload.duration_days, None);
    assert_eq!(payload.symptoms_text, "");
    assert!(payload.main_concern.is_none());

    let json = serde_json::to_value(&payload).expect("payload serializes");
    assert!(json["duration_days"].is_null());
    assert!(json.get("duration").is_none());
}

#[test]
fn screening_evidence_is_carried_verbatim() {
    let result = ScreeningResult {
        chief_complaint: "swollen belly".to_string(),
        vitals: Vitals {
            respiration: RespirationOption::Rapid,
            alertness: AlertnessOption::Quiet,
            perfusion: PerfusionOption::Pale,
        },
        critical_symptoms: BTreeSet::from([CriticalSymptom::BloatedAbdomen]),
        is_emergency: true,
        timestamp: now(),
    };
    let payload = build_payload(
        &mochi(),
        Some(&result),
        Some(MainConcern::Digestive),
        &selection(&["abdominal_pain"], &[]),
        Some(Severity::Severe),
        Some(DurationBucket::UnderOneDay),
        Some(Progression::GettingWorse),
    );

    let json = serde_json::to_value(&payload).expect("payload serializes");
    let screen = &json["emergency_data"]["emergencyScreen"];
    assert_eq!(json["emergency_data"]["chiefComplaint"], "swollen belly");
    assert_eq!(screen["perfusion"], "pale");
    assert_eq!(screen["criticalSymptoms"][0], "bloated_abdomen");
    assert_eq!(screen["isEmergency"], true);
    assert_eq!(json["duration"], "lt_24h");
    assert_eq!(json["main_concern"], "Digestive Issues");
}

#[test]
fn species_is_capitalized() {
    assert_eq!(capitalize_species("guinea pig"), "Guinea pig");
    assert_eq!(capitalize_species(" dog"), "Dog");
    assert_eq!(capitalize_species(""), "");
}
