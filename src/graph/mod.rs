//! The Sankey-ready flow graph and its builder.
//!
//! Field names on [`FlowNode`] and [`FlowEdge`] are the wire contract with chart
//! renderers (`id`, `column`, `from`, `to`, `weight`, `labelText`, `color`) and
//! serialize in camelCase.

use ahash::AHashMap;
use serde::{Deserialize, Deserializer, Serialize};

mod artifact;
pub mod builder;

pub use artifact::GraphArtifact;
pub use builder::{FlowGraphBuilder, GraphOptions, LinearGradient, LossPolicy, Palette, build_flow_graph};

/// Id and display name of the synthetic sink node unless overridden.
pub const DEFAULT_LOST_LABEL: &str = "Lost";

/// Key given to the synthetic sink node.
pub const LOST_NODE_KEY: &str = "lost";

/// A node in the flow graph: one funnel stage, or the synthetic "Lost" sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    /// Join key for edges. Equal to the stage's display name.
    pub id: String,
    pub name: String,
    /// Key of the stage this node came from.
    pub key: String,
    #[serde(deserialize_with = "nan_from_null")]
    pub value: f64,
    /// Column the renderer places the node in. Stage nodes use their position in
    /// the funnel; the sink shares the last stage's column.
    pub column: usize,
    pub is_synthetic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EdgeKind {
    /// Leads that progressed to the next stage.
    Main,
    /// Leads dropped between two stages, flowing into the sink.
    Loss,
}

/// Fill for an edge: a plain color string or a gradient object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeColor {
    Solid(String),
    Gradient(LinearGradient),
}

/// A weighted, directed edge between two nodes, referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdge {
    pub from: String,
    pub to: String,
    #[serde(deserialize_with = "nan_from_null")]
    pub weight: f64,
    pub kind: EdgeKind,
    /// Conversion percentage, present on main edges only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<EdgeColor>,
}

/// Nodes and edges ready to hand to a Sankey renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    /// Starts configuring a graph build. `None` selects the default dataset.
    pub fn builder(stages: Option<&crate::funnel::StageSet>) -> FlowGraphBuilder<'_> {
        FlowGraphBuilder::new(stages)
    }

    /// The synthetic sink node.
    pub fn lost_node(&self) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.is_synthetic)
    }

    /// Nodes that correspond to caller stages, in funnel order.
    pub fn stage_nodes(&self) -> impl Iterator<Item = &FlowNode> {
        self.nodes.iter().filter(|n| !n.is_synthetic)
    }

    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn main_edges(&self) -> impl Iterator<Item = &FlowEdge> {
        self.edges.iter().filter(|e| e.kind == EdgeKind::Main)
    }

    pub fn loss_edges(&self) -> impl Iterator<Item = &FlowEdge> {
        self.edges.iter().filter(|e| e.kind == EdgeKind::Loss)
    }

    /// Finds the edge of `kind` leaving `from` and entering `to`.
    pub fn edge(&self, from: &str, to: &str, kind: EdgeKind) -> Option<&FlowEdge> {
        self.edges
            .iter()
            .find(|e| e.kind == kind && e.from == from && e.to == to)
    }

    /// Node ids that occur more than once. Edges join on id, so any entry here
    /// makes the graph ambiguous for a renderer.
    pub fn duplicate_ids(&self) -> Vec<String> {
        duplicates(self.nodes.iter().map(|n| n.id.as_str()))
    }

    /// Serializes the graph in the renderer wire shape.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// JSON has no NaN; serde_json writes it as `null`, so read `null` back as NaN.
fn nan_from_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Returns every name seen more than once, in order of first appearance.
pub(crate) fn duplicates<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut counts: AHashMap<&str, usize> = AHashMap::new();
    let mut order = Vec::new();
    for name in names {
        let count = counts.entry(name).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(name.to_string());
        }
    }
    order
}
