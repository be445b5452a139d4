//! Common test fixtures: stage sets covering the usual funnel shapes.
use funnelflow::prelude::*;

/// Moderate, even drop-off. Total lost is 60.
#[allow(dead_code)]
pub fn valid_stages() -> StageSet {
    StageSet::from_triples([
        ("discovery", 100.0, "Discovery"),
        ("started", 80.0, "Started"),
        ("submitted", 60.0, "Submitted"),
        ("complete", 40.0, "Complete"),
    ])
}

/// Eight stages.
#[allow(dead_code)]
pub fn extended_stages() -> StageSet {
    StageSet::from_triples([
        ("discovery", 200.0, "Discovery"),
        ("interested", 180.0, "Interested"),
        ("applied", 150.0, "Applied"),
        ("qualified", 120.0, "Qualified"),
        ("interviewed", 90.0, "Interviewed"),
        ("offered", 70.0, "Offered"),
        ("accepted", 50.0, "Accepted"),
        ("enrolled", 40.0, "Enrolled"),
    ])
}

#[allow(dead_code)]
pub fn high_retention_stages() -> StageSet {
    StageSet::from_triples([
        ("discovery", 100.0, "Discovery"),
        ("started", 95.0, "Started"),
        ("submitted", 92.0, "Submitted"),
        ("complete", 90.0, "Complete"),
    ])
}

#[allow(dead_code)]
pub fn low_retention_stages() -> StageSet {
    StageSet::from_triples([
        ("discovery", 100.0, "Discovery"),
        ("started", 40.0, "Started"),
        ("submitted", 15.0, "Submitted"),
        ("complete", 5.0, "Complete"),
    ])
}

/// Same drop-off ratios as `valid_stages`, scaled by `factor`.
#[allow(dead_code)]
pub fn scaled_stages(factor: f64) -> StageSet {
    StageSet::from_triples([
        ("discovery", 10.0 * factor, "Discovery"),
        ("started", 7.5 * factor, "Started"),
        ("submitted", 5.0 * factor, "Submitted"),
        ("complete", 2.5 * factor, "Complete"),
    ])
}

#[allow(dead_code)]
pub fn identical_stages(value: f64) -> StageSet {
    StageSet::from_triples([
        ("discovery", value, "Discovery"),
        ("started", value, "Started"),
        ("submitted", value, "Submitted"),
        ("complete", value, "Complete"),
    ])
}

#[allow(dead_code)]
pub fn zero_tail_stages() -> StageSet {
    StageSet::from_triples([
        ("discovery", 100.0, "Discovery"),
        ("started", 0.0, "Started"),
        ("submitted", 0.0, "Submitted"),
        ("complete", 0.0, "Complete"),
    ])
}

#[allow(dead_code)]
pub fn negative_stages() -> StageSet {
    StageSet::from_triples([("discovery", -10.0, "Discovery"), ("started", -5.0, "Started")])
}

/// Stage JSON in the keyed-object form, in funnel order.
#[allow(dead_code)]
pub const VALID_STAGES_OBJECT_JSON: &str = r#"{
    "discovery": { "value": 100, "name": "Discovery" },
    "started": { "value": 80, "name": "Started" },
    "submitted": { "value": 60, "name": "Submitted" },
    "complete": { "value": 40, "name": "Complete" }
}"#;

/// Stage JSON in the array form, one record missing its key.
#[allow(dead_code)]
pub const VALID_STAGES_ARRAY_JSON: &str = r#"[
    { "key": "discovery", "value": 100, "name": "Discovery" },
    { "key": "started", "value": 80, "name": "Started" },
    { "value": 60, "name": "Submitted" },
    { "key": "complete", "value": 40, "name": "Complete" }
]"#;

/// Returns the weights of all edges of `kind`, in output order.
#[allow(dead_code)]
pub fn weights(graph: &FlowGraph, kind: EdgeKind) -> Vec<f64> {
    graph
        .edges
        .iter()
        .filter(|e| e.kind == kind)
        .map(|e| e.weight)
        .collect()
}
