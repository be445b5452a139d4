//! Prelude module for convenient imports
//!
//! Re-exports the types most callers need to load stages and build graphs.
//!
//! # Example
//!
//! ```rust,no_run
//! use funnelflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let stages = load_stages("path/to/stages.json")?;
//! let graph = build_flow_graph(Some(&stages));
//! let summary = FunnelSummary::from_stages(&stages);
//!
//! println!("{} nodes, {} edges", graph.nodes.len(), graph.edges.len());
//! println!("{}", summary);
//! # Ok(())
//! # }
//! ```

// Stage model and datasets
pub use crate::funnel::{
    Dataset, DatasetCatalog, IntoStages, Stage, StageSet, default_stages, load_stages,
    parse_stages,
};

// Graph building
pub use crate::graph::{
    EdgeColor, EdgeKind, FlowEdge, FlowGraph, FlowGraphBuilder, FlowNode, GraphArtifact,
    GraphOptions, LinearGradient, LossPolicy, Palette, build_flow_graph,
};

// Labels and metrics
pub use crate::format::{format_fixed1, format_percentage};
pub use crate::metrics::{FunnelSummary, StepMetrics};

// Error types
pub use crate::error::{ArtifactError, DatasetError, StageConversionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
