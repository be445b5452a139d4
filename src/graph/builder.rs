use super::{
    DEFAULT_LOST_LABEL, EdgeColor, EdgeKind, FlowEdge, FlowGraph, FlowNode, LOST_NODE_KEY,
    duplicates,
};
use crate::error::DatasetError;
use crate::format::conversion_label;
use crate::funnel::{Stage, StageSet, default_stages};
use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Controls which loss edges are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LossPolicy {
    /// One loss edge per adjacent pair, weighted by the signed drop.
    #[default]
    Signed,
    /// Only pairs whose drop is strictly positive get a loss edge.
    PositiveOnly,
}

/// A left-to-right gradient fill in the renderer's gradient format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearGradient {
    pub linear_gradient: GradientVector,
    pub stops: Vec<(f64, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientVector {
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
}

impl LinearGradient {
    /// A horizontal gradient from `start` to `end`.
    pub fn horizontal(start: &str, end: &str) -> Self {
        Self {
            linear_gradient: GradientVector {
                x1: 0.0,
                x2: 1.0,
                y1: 0.0,
                y2: 0.0,
            },
            stops: vec![(0.0, start.to_string()), (1.0, end.to_string())],
        }
    }
}

/// Colors attached to nodes and edges when a palette is configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub stage_node: String,
    pub lost_node: String,
    pub main_edge: LinearGradient,
    pub loss_edge: String,
}

impl Palette {
    /// The teal/gray scheme of the admissions dashboard.
    pub fn dashboard() -> Self {
        Self {
            stage_node: "#57b9b3".to_string(),
            lost_node: "#D9D9D9".to_string(),
            main_edge: LinearGradient::horizontal("#dbfefc", "#ffffff"),
            loss_edge: "#F2F2F2".to_string(),
        }
    }
}

/// Every knob of a graph build, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphOptions {
    pub lost_label: String,
    pub palette: Option<Palette>,
    pub loss_policy: LossPolicy,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            lost_label: DEFAULT_LOST_LABEL.to_string(),
            palette: None,
            loss_policy: LossPolicy::Signed,
        }
    }
}

impl GraphOptions {
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        serde_json::from_str(json).map_err(|e| DatasetError::OptionsParseError(e.to_string()))
    }
}

/// Configures and runs the stage-list to flow-graph transformation.
///
/// Building is pure: the same stages and options always produce the same graph,
/// and no input makes it fail. Degenerate input (zero upstream counts, rising
/// counts, NaN values) produces degenerate numbers rather than errors.
pub struct FlowGraphBuilder<'a> {
    stages: Cow<'a, StageSet>,
    options: GraphOptions,
}

impl<'a> FlowGraphBuilder<'a> {
    pub fn new(stages: Option<&'a StageSet>) -> Self {
        let stages = match stages {
            Some(stages) => Cow::Borrowed(stages),
            None => {
                debug!("No stages supplied, using the default dataset");
                Cow::Owned(default_stages())
            }
        };
        Self {
            stages,
            options: GraphOptions::default(),
        }
    }

    pub fn with_lost_label(mut self, label: impl Into<String>) -> Self {
        self.options.lost_label = label.into();
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.options.palette = Some(palette);
        self
    }

    pub fn with_loss_policy(mut self, policy: LossPolicy) -> Self {
        self.options.loss_policy = policy;
        self
    }

    pub fn with_options(mut self, options: GraphOptions) -> Self {
        self.options = options;
        self
    }

    pub fn stages(&self) -> &StageSet {
        &self.stages
    }

    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    pub fn build(&self) -> FlowGraph {
        let stages = self.stages.stages();
        let lost_label = self.options.lost_label.as_str();
        let palette = self.options.palette.as_ref();

        warn_on_ambiguous_names(stages, lost_label);

        let pairs: Vec<(&Stage, &Stage)> = stages.iter().tuple_windows().collect();
        let total = total_lost(stages);

        let mut nodes = Vec::with_capacity(stages.len() + 1);
        nodes.extend(stages.iter().enumerate().map(|(column, stage)| FlowNode {
            id: stage.name.clone(),
            name: stage.name.clone(),
            key: stage.key.clone(),
            value: stage.value,
            column,
            is_synthetic: false,
            color: palette.map(|p| p.stage_node.clone()),
        }));
        nodes.push(FlowNode {
            id: lost_label.to_string(),
            name: lost_label.to_string(),
            key: LOST_NODE_KEY.to_string(),
            value: total,
            column: stages.len().saturating_sub(1),
            is_synthetic: true,
            color: palette.map(|p| p.lost_node.clone()),
        });

        let mut edges = Vec::with_capacity(pairs.len() * 2);
        edges.extend(pairs.iter().map(|(current, next)| FlowEdge {
            from: current.name.clone(),
            to: next.name.clone(),
            weight: next.value,
            kind: EdgeKind::Main,
            label_text: Some(conversion_label(current.value, next.value)),
            color: palette.map(|p| EdgeColor::Gradient(p.main_edge.clone())),
        }));
        // Loss edges are listed from the bottom of the funnel up.
        edges.extend(
            pairs
                .iter()
                .rev()
                .map(|(current, next)| (current, current.value - next.value))
                .filter(|(_, lost)| self.keeps_loss_edge(*lost))
                .map(|(current, lost)| FlowEdge {
                    from: current.name.clone(),
                    to: lost_label.to_string(),
                    weight: lost,
                    kind: EdgeKind::Loss,
                    label_text: None,
                    color: palette.map(|p| EdgeColor::Solid(p.loss_edge.clone())),
                }),
        );

        debug!(
            "Built flow graph: {} node(s), {} edge(s), total lost {}",
            nodes.len(),
            edges.len(),
            total
        );

        FlowGraph { nodes, edges }
    }

    fn keeps_loss_edge(&self, lost: f64) -> bool {
        match self.options.loss_policy {
            LossPolicy::Signed => true,
            LossPolicy::PositiveOnly => lost > 0.0,
        }
    }
}

/// Builds the flow graph for `stages` with default options.
/// `None` selects the default dataset.
pub fn build_flow_graph(stages: Option<&StageSet>) -> FlowGraph {
    FlowGraphBuilder::new(stages).build()
}

/// Sum of every adjacent drop. Rising counts subtract from the total.
pub(crate) fn total_lost(stages: &[Stage]) -> f64 {
    stages
        .iter()
        .tuple_windows()
        .fold(0.0, |sum, (current, next)| sum + current.value - next.value)
}

fn warn_on_ambiguous_names(stages: &[Stage], lost_label: &str) {
    for problem in ambiguities(stages, lost_label) {
        warn!("{}", problem);
    }
}

/// Stage names or keys that make the built graph ambiguous.
fn ambiguities(stages: &[Stage], lost_label: &str) -> Vec<String> {
    let mut problems = Vec::new();
    let repeated = duplicates(stages.iter().map(|s| s.name.as_str()));
    if !repeated.is_empty() {
        problems.push(format!(
            "Stage names {:?} appear more than once; edges joined by name will be ambiguous",
            repeated
        ));
    }
    if stages.iter().any(|s| s.name == lost_label) {
        problems.push(format!(
            "A stage is named '{}', which collides with the loss sink node",
            lost_label
        ));
    }
    if stages.iter().any(|s| s.key == LOST_NODE_KEY) {
        problems.push(format!(
            "A stage uses the key '{}', which is reserved for the loss sink node",
            LOST_NODE_KEY
        ));
    }
    problems
}
