//! # funnelflow - Funnel to Sankey Flow Graphs
//!
//! **funnelflow** turns an ordered list of funnel stage counts (discovery, application
//! started, submitted, ... enrolled) into the node and edge lists a Sankey renderer
//! consumes. Every stage becomes a node, each adjacent pair of stages contributes a
//! main edge (the leads that moved on, labelled with the conversion percentage) and a
//! loss edge (the leads that dropped out) into a synthetic "Lost" sink node.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Stages**: Parse stage JSON with [`funnel::parse_stages`], pick a preset
//!     from [`funnel::DatasetCatalog`], or implement [`funnel::IntoStages`] for your own format.
//! 2.  **Build**: Call [`graph::build_flow_graph`], or configure a build with
//!     `FlowGraph::builder(..)` (sink label, palette, loss policy).
//! 3.  **Render**: Serialize the [`graph::FlowGraph`] and hand it to the chart.
//!
//! Building never fails. Zero, negative or rising counts produce degenerate numbers
//! (`Infinity%` labels, negative losses) rather than errors.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use funnelflow::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let stages = StageSet::from_triples([
//!         ("discovery", 100.0, "Discovery"),
//!         ("started", 80.0, "Started"),
//!         ("submitted", 60.0, "Submitted"),
//!     ]);
//!
//!     let graph = FlowGraph::builder(Some(&stages))
//!         .with_palette(Palette::dashboard())
//!         .build();
//!
//!     for edge in graph.main_edges() {
//!         println!("{} -> {}: {:?}", edge.from, edge.to, edge.label_text);
//!     }
//!     println!("{}", graph.to_json_pretty()?);
//!
//!     // No stages at all falls back to the default dataset.
//!     let default_graph = build_flow_graph(None);
//!     println!("Lost: {:?}", default_graph.lost_node().map(|n| n.value));
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod format;
pub mod funnel;
pub mod graph;
pub mod metrics;
pub mod prelude;
