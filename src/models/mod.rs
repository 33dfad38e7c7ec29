mod base;
mod click;
mod kind;
mod label;
mod performance;
mod placement;
mod shared_set;

use std::fmt;
use std::hash::Hash;

use serde::Serialize;

use crate::error::{AdRowsError, Result};
use crate::fields::Binding;

pub(crate) use base::{date_columns, performance_columns, report_columns};
pub use base::{DateSegments, Performance, Report};
pub use click::{CallMetricsCallDetails, ClickPerformance};
pub use kind::{ReportKind, RowVisitor, ALL_REPORTS};
pub use label::Label;
pub use performance::{
    AccountPerformance, AdGroupPerformance, AdPerformance, BudgetPerformance,
    CampaignPerformance, KeywordsPerformance,
};
pub use placement::{AutomaticPlacements, GeoPerformance, UrlPerformance};
pub use shared_set::{CampaignSharedSet, SharedSet, SharedSetCriteria};

/// The derived storage identity of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowId {
    pub value: String,
    /// False when one or more key parts were absent and skipped. Such ids
    /// can collide with rows that differ only in the missing dimension.
    pub complete: bool,
}

impl RowId {
    /// Account id followed by every present key part, joined with `-`.
    pub fn derive(account_id: Option<i64>, parts: Vec<Option<String>>) -> Result<Self> {
        let account_id = account_id.ok_or(AdRowsError::MissingAccountId)?;
        let mut value = account_id.to_string();
        let mut complete = true;
        for part in parts {
            match part {
                Some(part) => {
                    value.push('-');
                    value.push_str(&part);
                }
                None => complete = false,
            }
        }
        Ok(Self { value, complete })
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

pub(crate) fn key<T: ToString>(value: &Option<T>) -> Option<String> {
    value.as_ref().map(ToString::to_string)
}

/// One row of one report type.
pub trait ReportRow:
    Default + Clone + PartialEq + Eq + Hash + fmt::Debug + Serialize + 'static
{
    const KIND: ReportKind;

    /// Every column of the row type, in storage order.
    fn bindings() -> Vec<Binding<Self>>;

    fn report(&self) -> &Report;

    fn report_mut(&mut self) -> &mut Report;

    /// Dimension values that follow the account id in the row id.
    fn key_parts(&self) -> Vec<Option<String>>;

    fn row_id(&self) -> Result<RowId> {
        RowId::derive(self.report().account_id, self.key_parts())
    }

    fn assign_row_id(&mut self) -> Result<RowId> {
        let id = self.row_id()?;
        self.report_mut().row_id = Some(id.value.clone());
        Ok(id)
    }
}
