use serde::Serialize;

use super::{key, report_columns, Report, ReportKind, ReportRow};
use crate::fields::{bind, Binding};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Label {
    #[serde(flatten)]
    pub report: Report,
    pub label_id: Option<i64>,
    pub label_name: Option<String>,
}

impl ReportRow for Label {
    const KIND: ReportKind = ReportKind::Label;

    fn bindings() -> Vec<Binding<Self>> {
        let mut columns = report_columns!();
        columns.extend([
            bind!("Label ID", "LabelId" => label_id),
            bind!("Label", "LabelName" => label_name),
        ]);
        columns
    }

    fn report(&self) -> &Report {
        &self.report
    }

    fn report_mut(&mut self) -> &mut Report {
        &mut self.report
    }

    fn key_parts(&self) -> Vec<Option<String>> {
        vec![key(&self.label_id)]
    }
}
