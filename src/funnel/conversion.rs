use super::definition::StageSet;
use crate::error::StageConversionError;

/// A trait for custom data models that can be converted into a `StageSet`.
///
/// Dashboards usually keep their funnel data in their own shape (CRM exports,
/// per-period report rows, ...). Implementing this trait provides the single
/// translation point into the ordered stage list the graph builder consumes.
///
/// # Example
///
/// ```rust,no_run
/// use funnelflow::prelude::*;
/// use funnelflow::error::StageConversionError;
///
/// struct ReportRow { step: String, leads: u32 }
/// struct Report { rows: Vec<ReportRow> }
///
/// impl IntoStages for Report {
///     fn into_stages(self) -> std::result::Result<StageSet, StageConversionError> {
///         if self.rows.is_empty() {
///             return Err(StageConversionError::ValidationError("report has no rows".into()));
///         }
///         Ok(self
///             .rows
///             .into_iter()
///             .enumerate()
///             .map(|(i, row)| Stage::new(format!("step-{}", i), row.leads as f64, row.step))
///             .collect())
///     }
/// }
/// ```
pub trait IntoStages {
    /// Consumes the object and converts it into an ordered stage list.
    fn into_stages(self) -> Result<StageSet, StageConversionError>;
}

impl IntoStages for StageSet {
    fn into_stages(self) -> Result<StageSet, StageConversionError> {
        Ok(self)
    }
}
