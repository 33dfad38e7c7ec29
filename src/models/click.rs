use serde::Serialize;

use super::{date_columns, key, report_columns, DateSegments, Report, ReportKind, ReportRow};
use crate::fields::{bind, Binding};

/// One click, identified by its Google click id. Only available for
/// single-day downloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ClickPerformance {
    #[serde(flatten)]
    pub report: Report,
    #[serde(flatten)]
    pub date: DateSegments,
    pub campaign_id: Option<i64>,
    pub ad_group_id: Option<i64>,
    pub creative_id: Option<i64>,
    pub criteria_id: Option<i64>,
    pub gcl_id: Option<String>,
    pub click_type: Option<String>,
    pub device: Option<String>,
    pub ad_network_type: Option<String>,
    pub page: Option<i64>,
    pub slot: Option<String>,
    pub keyword_match_type: Option<String>,
    pub aoi_most_specific_target_id: Option<i64>,
    pub lop_most_specific_target_id: Option<i64>,
    pub clicks: Option<i64>,
}

impl ReportRow for ClickPerformance {
    const KIND: ReportKind = ReportKind::ClickPerformance;

    fn bindings() -> Vec<Binding<Self>> {
        let mut columns = report_columns!();
        columns.extend(date_columns!());
        columns.extend([
            bind!("Campaign ID", "CampaignId" => campaign_id),
            bind!("Ad group ID", "AdGroupId" => ad_group_id),
            bind!("Ad ID", "CreativeId" => creative_id),
            bind!("Keyword ID", "CriteriaId" => criteria_id),
            bind!("Google Click ID", "GclId" => gcl_id),
            bind!("Click type", "ClickType" => click_type),
            bind!("Device", "Device" => device),
            bind!("Network", "AdNetworkType1" => ad_network_type),
            bind!("Page", "Page" => page),
            bind!("Top vs. Other", "Slot" => slot),
            bind!("Match type", "KeywordMatchType" => keyword_match_type),
            bind!("Most specific location target (Location of interest)", "AoiMostSpecificTargetId" => aoi_most_specific_target_id),
            bind!("Most specific location target (User location)", "LopMostSpecificTargetId" => lop_most_specific_target_id),
            bind!("Clicks", "Clicks" => clicks),
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
        vec![
            self.date.label(&self.report),
            key(&self.campaign_id),
            key(&self.ad_group_id),
            self.gcl_id.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CallMetricsCallDetails {
    #[serde(flatten)]
    pub report: Report,
    #[serde(flatten)]
    pub date: DateSegments,
    pub campaign_id: Option<i64>,
    pub campaign_name: Option<String>,
    pub ad_group_id: Option<i64>,
    pub ad_group_name: Option<String>,
    pub caller_country_calling_code: Option<String>,
    pub caller_national_designated_code: Option<String>,
    pub call_duration: Option<i64>,
    pub call_start_time: Option<String>,
    pub call_end_time: Option<String>,
    pub call_status: Option<String>,
    pub call_type: Option<String>,
}

impl ReportRow for CallMetricsCallDetails {
    const KIND: ReportKind = ReportKind::CallMetrics;

    fn bindings() -> Vec<Binding<Self>> {
        let mut columns = report_columns!();
        columns.extend(date_columns!());
        columns.extend([
            bind!("Campaign ID", "CampaignId" => campaign_id),
            bind!("Campaign", "CampaignName" => campaign_name),
            bind!("Ad group ID", "AdGroupId" => ad_group_id),
            bind!("Ad group", "AdGroupName" => ad_group_name),
            bind!("Caller country code", "CallerCountryCallingCode" => caller_country_calling_code),
            bind!("Caller area code", "CallerNationalDesignatedCode" => caller_national_designated_code),
            bind!("Duration (seconds)", "CallDuration" => call_duration),
            bind!("Start time", "CallStartTime" => call_start_time),
            bind!("End time", "CallEndTime" => call_end_time),
            bind!("Status", "CallStatus" => call_status),
            bind!("Call type", "CallType" => call_type),
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
        vec![
            key(&self.campaign_id),
            key(&self.ad_group_id),
            self.date.label(&self.report),
            self.call_start_time.clone(),
            self.caller_national_designated_code.clone(),
        ]
    }
}
