use serde::Serialize;

use super::{key, report_columns, Report, ReportKind, ReportRow};
use crate::fields::{bind, Binding};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SharedSet {
    #[serde(flatten)]
    pub report: Report,
    pub shared_set_id: Option<i64>,
    pub name: Option<String>,
    pub shared_set_type: Option<String>,
    pub status: Option<String>,
    pub member_count: Option<i64>,
    pub reference_count: Option<i64>,
}

impl ReportRow for SharedSet {
    const KIND: ReportKind = ReportKind::SharedSet;

    fn bindings() -> Vec<Binding<Self>> {
        let mut columns = report_columns!();
        columns.extend([
            bind!("Shared set ID", "SharedSetId" => shared_set_id),
            bind!("Shared set name", "Name" => name),
            bind!("Shared set type", "Type" => shared_set_type),
            bind!("Shared set state", "Status" => status),
            bind!("Member count", "MemberCount" => member_count),
            bind!("Reference count", "ReferenceCount" => reference_count),
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
        vec![key(&self.shared_set_id)]
    }
}

/// Association of a shared set with a campaign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CampaignSharedSet {
    #[serde(flatten)]
    pub report: Report,
    pub campaign_id: Option<i64>,
    pub campaign_name: Option<String>,
    pub shared_set_id: Option<i64>,
    pub shared_set_name: Option<String>,
    pub shared_set_type: Option<String>,
    pub status: Option<String>,
}

impl ReportRow for CampaignSharedSet {
    const KIND: ReportKind = ReportKind::CampaignSharedSet;

    fn bindings() -> Vec<Binding<Self>> {
        let mut columns = report_columns!();
        columns.extend([
            bind!("Campaign ID", "CampaignId" => campaign_id),
            bind!("Campaign", "CampaignName" => campaign_name),
            bind!("Shared set ID", "SharedSetId" => shared_set_id),
            bind!("Shared set name", "SharedSetName" => shared_set_name),
            bind!("Shared set type", "SharedSetType" => shared_set_type),
            bind!("Status", "Status" => status),
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
        vec![key(&self.campaign_id), key(&self.shared_set_id)]
    }
}

/// One criterion (keyword or placement) inside a shared set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SharedSetCriteria {
    #[serde(flatten)]
    pub report: Report,
    pub shared_set_id: Option<i64>,
    pub criterion_id: Option<i64>,
    pub criteria: Option<String>,
    pub criteria_type: Option<String>,
    pub keyword_match_type: Option<String>,
}

impl ReportRow for SharedSetCriteria {
    const KIND: ReportKind = ReportKind::SharedSetCriteria;

    fn bindings() -> Vec<Binding<Self>> {
        let mut columns = report_columns!();
        columns.extend([
            bind!("Shared set ID", "SharedSetId" => shared_set_id),
            bind!("Criterion ID", "Id" => criterion_id),
            bind!("Criterion", "Criteria" => criteria),
            bind!("Criteria type", "CriteriaType" => criteria_type),
            bind!("Match type", "KeywordMatchType" => keyword_match_type),
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
        vec![key(&self.shared_set_id), key(&self.criterion_id)]
    }
}
