//! Tests for stage parsing, preset datasets and custom conversions.
mod common;
use common::*;
use funnelflow::funnel::DEFAULT_DATASET_KEY;
use funnelflow::prelude::*;

#[test]
fn test_object_form_keeps_document_order() {
    let stages = parse_stages(VALID_STAGES_OBJECT_JSON).expect("valid stage JSON");
    assert_eq!(stages, valid_stages());
}

#[test]
fn test_object_form_order_is_not_alphabetical() {
    let json = r#"{ "zeta": { "value": 3, "name": "Z" }, "alpha": { "value": 1, "name": "A" } }"#;
    let stages = parse_stages(json).unwrap();
    let keys: Vec<_> = stages.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, vec!["zeta", "alpha"]);
}

#[test]
fn test_array_form_fills_missing_keys() {
    let stages = parse_stages(VALID_STAGES_ARRAY_JSON).unwrap();
    assert_eq!(stages.len(), 4);
    assert_eq!(stages.stages()[2].key, "stage-2");
    assert_eq!(stages.get("complete").unwrap().value, 40.0);
}

#[test]
fn test_incomplete_records_degrade_instead_of_failing() {
    let json = r#"{
        "discovery": { "value": 100 },
        "started": { "name": "Started" }
    }"#;
    let stages = parse_stages(json).unwrap();
    assert_eq!(stages.stages()[0].name, "");
    assert!(stages.stages()[1].value.is_nan());

    let graph = build_flow_graph(Some(&stages));
    assert_eq!(graph.nodes.len(), 3);
    assert!(graph.lost_node().unwrap().value.is_nan());
}

#[test]
fn test_empty_object_is_an_empty_set() {
    let stages = parse_stages("{}").unwrap();
    assert!(stages.is_empty());
}

#[test]
fn test_rejects_unexpected_shapes() {
    match parse_stages("42") {
        Err(DatasetError::UnexpectedShape { found }) => assert_eq!(found, "a number"),
        other => panic!("Expected UnexpectedShape, got {:?}", other),
    }
    match parse_stages(r#"{ "discovery": 100 }"#) {
        Err(DatasetError::MalformedStage { key, .. }) => assert_eq!(key, "discovery"),
        other => panic!("Expected MalformedStage, got {:?}", other),
    }
    assert!(matches!(
        parse_stages("{ not json"),
        Err(DatasetError::JsonParseError(_))
    ));
}

#[test]
fn test_preset_catalog() {
    let catalog = DatasetCatalog::presets();
    let options = catalog.options();
    assert_eq!(
        options,
        vec![
            ("spring25", "Spring '25"),
            ("fall25", "Fall '25"),
            ("winter25", "Winter '25"),
        ]
    );

    let fall = catalog.get("fall25").unwrap();
    assert_eq!(fall.stages.len(), 7);
    assert_eq!(fall.stages.first().unwrap().value, 180.0);
    assert_eq!(fall.stages.last().unwrap().name, "Enrolled");

    let spring = catalog.get(DEFAULT_DATASET_KEY).unwrap();
    assert_eq!(spring.stages, default_stages());
}

#[test]
fn test_unknown_dataset() {
    let catalog = DatasetCatalog::presets();
    match catalog.get("summer26") {
        Err(DatasetError::UnknownDataset(key)) => assert_eq!(key, "summer26"),
        other => panic!("Expected UnknownDataset, got {:?}", other),
    }
}

#[test]
fn test_switching_datasets_changes_the_graph() {
    let catalog = DatasetCatalog::presets();
    let lost: Vec<f64> = catalog
        .datasets()
        .iter()
        .map(|d| build_flow_graph(Some(&d.stages)).lost_node().unwrap().value)
        .collect();
    assert_eq!(lost, vec![96.0, 110.0, 85.0]);
}

struct ReportRow {
    step: &'static str,
    leads: u32,
}

struct Report {
    rows: Vec<ReportRow>,
}

impl IntoStages for Report {
    fn into_stages(self) -> std::result::Result<StageSet, StageConversionError> {
        if self.rows.is_empty() {
            return Err(StageConversionError::ValidationError(
                "report has no rows".to_string(),
            ));
        }
        Ok(self
            .rows
            .into_iter()
            .map(|row| Stage::new(row.step.to_lowercase(), f64::from(row.leads), row.step))
            .collect())
    }
}

#[test]
fn test_custom_format_conversion() {
    let report = Report {
        rows: vec![
            ReportRow { step: "Visit", leads: 50 },
            ReportRow { step: "Signup", leads: 20 },
        ],
    };
    let stages = report.into_stages().unwrap();
    assert_eq!(stages.get("signup").unwrap().name, "Signup");

    let graph = build_flow_graph(Some(&stages));
    assert_eq!(
        graph.edge("Visit", "Signup", EdgeKind::Main).unwrap().label_text.as_deref(),
        Some("40.0%")
    );

    let empty = Report { rows: vec![] };
    assert!(empty.into_stages().is_err());
}
