use super::definition::{Stage, StageSet};
use crate::error::DatasetError;
use log::debug;
use serde_json::Value;
use std::fs;

type StageRow = (&'static str, f64, &'static str);

const SPRING_25: [StageRow; 7] = [
    ("discovery", 156.0, "Discovery/Dev"),
    ("started", 91.0, "App Started"),
    ("submitted", 86.0, "App Submitted"),
    ("complete", 75.0, "App Complete"),
    ("offered", 67.0, "Admission Offered"),
    ("accepted", 65.0, "Admission Accepted"),
    ("enrolled", 60.0, "Enrolled"),
];

const FALL_25: [StageRow; 7] = [
    ("discovery", 180.0, "Discovery/Dev"),
    ("started", 120.0, "App Started"),
    ("submitted", 105.0, "App Submitted"),
    ("complete", 95.0, "App Complete"),
    ("offered", 85.0, "Admission Offered"),
    ("accepted", 78.0, "Admission Accepted"),
    ("enrolled", 70.0, "Enrolled"),
];

const WINTER_25: [StageRow; 7] = [
    ("discovery", 130.0, "Discovery/Dev"),
    ("started", 85.0, "App Started"),
    ("submitted", 75.0, "App Submitted"),
    ("complete", 65.0, "App Complete"),
    ("offered", 55.0, "Admission Offered"),
    ("accepted", 50.0, "Admission Accepted"),
    ("enrolled", 45.0, "Enrolled"),
];

/// Key of the dataset used when a caller supplies no stages.
pub const DEFAULT_DATASET_KEY: &str = "spring25";

/// A named, selectable stage set, e.g. one admissions period.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub key: String,
    pub label: String,
    pub stages: StageSet,
}

/// The preset datasets a dashboard can switch between.
#[derive(Debug, Clone)]
pub struct DatasetCatalog {
    datasets: Vec<Dataset>,
}

impl DatasetCatalog {
    /// The built-in admissions periods.
    pub fn presets() -> Self {
        let presets: [(&str, &str, &[StageRow]); 3] = [
            ("spring25", "Spring '25", &SPRING_25),
            ("fall25", "Fall '25", &FALL_25),
            ("winter25", "Winter '25", &WINTER_25),
        ];

        Self {
            datasets: presets
                .into_iter()
                .map(|(key, label, rows)| Dataset {
                    key: key.to_string(),
                    label: label.to_string(),
                    stages: StageSet::from_triples(rows.iter().copied()),
                })
                .collect(),
        }
    }

    pub fn new(datasets: Vec<Dataset>) -> Self {
        Self { datasets }
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    /// Selects a dataset by key.
    pub fn get(&self, key: &str) -> Result<&Dataset, DatasetError> {
        self.datasets
            .iter()
            .find(|d| d.key == key)
            .ok_or_else(|| DatasetError::UnknownDataset(key.to_string()))
    }

    /// Returns `(key, label)` pairs in catalog order, for period pickers.
    pub fn options(&self) -> Vec<(&str, &str)> {
        self.datasets
            .iter()
            .map(|d| (d.key.as_str(), d.label.as_str()))
            .collect()
    }
}

/// The stage set substituted when the caller passes none.
pub fn default_stages() -> StageSet {
    StageSet::from_triples(SPRING_25.iter().copied())
}

/// Parses a stage set from JSON text.
///
/// Two shapes are accepted:
/// - an array of `{ "key"?, "value"?, "name"? }` records, in funnel order;
/// - an object whose entries are `"key": { "value", "name" }`, in document order.
///
/// Missing fields are not an error: a missing value becomes NaN, a missing name
/// becomes an empty string, and a missing key in the array form becomes `stage-<index>`.
pub fn parse_stages(json: &str) -> Result<StageSet, DatasetError> {
    let root: Value = serde_json::from_str(json)?;
    let stages = match root {
        Value::Array(records) => records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let fallback_key = format!("stage-{}", index);
                let key = record
                    .get("key")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or(fallback_key);
                stage_from_record(key, record)
            })
            .collect::<Result<Vec<_>, _>>()?,
        Value::Object(entries) => entries
            .iter()
            .map(|(key, record)| stage_from_record(key.clone(), record))
            .collect::<Result<Vec<_>, _>>()?,
        other => {
            return Err(DatasetError::UnexpectedShape {
                found: json_kind(&other).to_string(),
            });
        }
    };

    debug!("Parsed {} stage(s) from JSON", stages.len());
    Ok(StageSet::new(stages))
}

/// Reads and parses a stage set from a JSON file.
pub fn load_stages(path: &str) -> Result<StageSet, DatasetError> {
    let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_stages(&content)
}

fn stage_from_record(key: String, record: &Value) -> Result<Stage, DatasetError> {
    if !record.is_object() {
        return Err(DatasetError::MalformedStage {
            key,
            found: json_kind(record).to_string(),
        });
    }

    let value = record
        .get("value")
        .and_then(Value::as_f64)
        .unwrap_or(f64::NAN);
    let name = record
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(Stage { key, value, name })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
