use crate::format::format_percentage;
use crate::funnel::StageSet;
use crate::graph::builder::total_lost;
use itertools::Itertools;
use serde::Serialize;
use std::fmt;

/// Movement between two adjacent stages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepMetrics {
    pub from: String,
    pub to: String,
    /// `100 * to / from`; non-finite when the upstream count is zero.
    pub conversion: f64,
    /// Signed drop, `from - to`.
    pub lost: f64,
}

/// Headline numbers for a funnel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelSummary {
    pub total_lost: f64,
    /// `100 * last / first`, absent with fewer than two stages.
    pub overall_conversion: Option<f64>,
    pub steps: Vec<StepMetrics>,
}

impl FunnelSummary {
    pub fn from_stages(stages: &StageSet) -> Self {
        let steps: Vec<StepMetrics> = stages
            .iter()
            .tuple_windows()
            .map(|(current, next)| StepMetrics {
                from: current.name.clone(),
                to: next.name.clone(),
                conversion: next.value / current.value * 100.0,
                lost: current.value - next.value,
            })
            .collect();

        let overall_conversion = match (stages.first(), stages.last()) {
            (Some(first), Some(last)) if stages.len() > 1 => Some(last.value / first.value * 100.0),
            _ => None,
        };

        Self {
            total_lost: total_lost(stages.stages()),
            overall_conversion,
            steps,
        }
    }

    /// The step that dropped the most leads. NaN drops are never selected.
    pub fn largest_drop(&self) -> Option<&StepMetrics> {
        self.steps
            .iter()
            .filter(|s| !s.lost.is_nan())
            .max_by(|a, b| a.lost.total_cmp(&b.lost))
    }
}

impl fmt::Display for FunnelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total lost: {}", self.total_lost)?;
        match self.overall_conversion {
            Some(pct) => writeln!(f, "Overall conversion: {}", format_percentage(pct))?,
            None => writeln!(f, "Overall conversion: n/a")?,
        }
        for step in &self.steps {
            writeln!(
                f,
                "  {} -> {}: {} ({} lost)",
                step.from,
                step.to,
                format_percentage(step.conversion),
                step.lost
            )?;
        }
        if let Some(step) = self.largest_drop() {
            write!(f, "Largest drop: {} -> {} ({})", step.from, step.to, step.lost)?;
        }
        Ok(())
    }
}
