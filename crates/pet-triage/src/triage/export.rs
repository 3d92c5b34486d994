use std::io::Write;

use serde::Serialize;

use super::catalog::{
    additional_symptom_groups, AlertnessOption, CriticalSymptom, MainConcern, PerfusionOption,
    RapOption, RespirationOption, SymptomGroupKind,
};

/// One flattened catalog entry as written to CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogRow {
    pub group: String,
    pub key: &'static str,
    pub label: &'static str,
    pub emergency: bool,
}

fn rap_rows<O: RapOption>(group: &str, options: impl IntoIterator<Item = O>) -> Vec<CatalogRow> {
    options
        .into_iter()
        .map(|option| CatalogRow {
            group: group.to_string(),
            key: option.key(),
            label: option.label(),
            emergency: option.is_emergency(),
        })
        .collect()
}

/// Flattens the screening options, concern symptoms and the additional groups for
/// `species` into rows.
pub fn catalog_rows(species: &str) -> Vec<CatalogRow> {
    let mut rows = rap_rows("respiration", RespirationOption::ordered());
    rows.extend(rap_rows("alertness", AlertnessOption::ordered()));
    rows.extend(rap_rows("perfusion", PerfusionOption::ordered()));
    rows.extend(CriticalSymptom::ordered().into_iter().map(|symptom| CatalogRow {
        group: "critical".to_string(),
        key: symptom.key(),
        label: symptom.label(),
        emergency: true,
    }));

    for concern in MainConcern::ordered() {
        rows.extend(concern.primary_symptoms().iter().map(|entry| CatalogRow {
            group: format!("concern:{}", concern.key()),
            key: entry.key,
            label: entry.label,
            emergency: false,
        }));
    }

    for group in additional_symptom_groups(species) {
        let name = match group.kind {
            SymptomGroupKind::General => "additional:general".to_string(),
            SymptomGroupKind::Species(category) => format!("additional:{}", category.key()),
        };
        rows.extend(group.symptoms.iter().map(|entry| CatalogRow {
            group: name.clone(),
            key: entry.key,
            label: entry.label,
            emergency: false,
        }));
    }

    rows
}

/// Writes the catalog as CSV with a header row.
pub fn write_catalog_csv<W: Write>(writer: W, species: &str) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in catalog_rows(species) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
