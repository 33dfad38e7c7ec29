use super::{
    AccountPerformance, AdGroupPerformance, AdPerformance, AutomaticPlacements, BudgetPerformance,
    CallMetricsCallDetails, CampaignPerformance, CampaignSharedSet, ClickPerformance,
    GeoPerformance, KeywordsPerformance, Label, ReportRow, SharedSet, SharedSetCriteria,
    UrlPerformance,
};

// ---------------------------------------------------------------------------
// Report kinds: enum dispatch to the concrete row types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Account,
    Campaign,
    AdGroup,
    Ad,
    Keywords,
    ClickPerformance,
    CallMetrics,
    SharedSet,
    CampaignSharedSet,
    SharedSetCriteria,
    Url,
    AutomaticPlacements,
    Geo,
    Budget,
    Label,
}

/// Receives the concrete row type behind a [`ReportKind`].
pub trait RowVisitor {
    type Output;

    fn visit<T: ReportRow>(self) -> Self::Output;
}

impl ReportKind {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Campaign => "campaign",
            Self::AdGroup => "ad_group",
            Self::Ad => "ad",
            Self::Keywords => "keywords",
            Self::ClickPerformance => "click_performance",
            Self::CallMetrics => "call_metrics",
            Self::SharedSet => "shared_set",
            Self::CampaignSharedSet => "campaign_shared_set",
            Self::SharedSetCriteria => "shared_set_criteria",
            Self::Url => "url",
            Self::AutomaticPlacements => "automatic_placements",
            Self::Geo => "geo",
            Self::Budget => "budget",
            Self::Label => "label",
        }
    }

    /// Report definition type as named by the reporting API.
    pub fn report_type(&self) -> &'static str {
        match self {
            Self::Account => "ACCOUNT_PERFORMANCE_REPORT",
            Self::Campaign => "CAMPAIGN_PERFORMANCE_REPORT",
            Self::AdGroup => "ADGROUP_PERFORMANCE_REPORT",
            Self::Ad => "AD_PERFORMANCE_REPORT",
            Self::Keywords => "KEYWORDS_PERFORMANCE_REPORT",
            Self::ClickPerformance => "CLICK_PERFORMANCE_REPORT",
            Self::CallMetrics => "CALL_METRICS_CALL_DETAILS_REPORT",
            Self::SharedSet => "SHARED_SET_REPORT",
            Self::CampaignSharedSet => "CAMPAIGN_SHARED_SET_REPORT",
            Self::SharedSetCriteria => "SHARED_SET_CRITERIA_REPORT",
            Self::Url => "URL_PERFORMANCE_REPORT",
            Self::AutomaticPlacements => "AUTOMATIC_PLACEMENTS_PERFORMANCE_REPORT",
            Self::Geo => "GEO_PERFORMANCE_REPORT",
            Self::Budget => "BUDGET_PERFORMANCE_REPORT",
            Self::Label => "LABEL_REPORT",
        }
    }

    /// Storage table name.
    pub fn table(&self) -> String {
        format!("report_{}", self.key())
    }

    /// Whether the report only accepts single-day date ranges.
    pub fn single_day(&self) -> bool {
        matches!(self, Self::ClickPerformance)
    }

    pub fn accept<V: RowVisitor>(self, visitor: V) -> V::Output {
        match self {
            Self::Account => visitor.visit::<AccountPerformance>(),
            Self::Campaign => visitor.visit::<CampaignPerformance>(),
            Self::AdGroup => visitor.visit::<AdGroupPerformance>(),
            Self::Ad => visitor.visit::<AdPerformance>(),
            Self::Keywords => visitor.visit::<KeywordsPerformance>(),
            Self::ClickPerformance => visitor.visit::<ClickPerformance>(),
            Self::CallMetrics => visitor.visit::<CallMetricsCallDetails>(),
            Self::SharedSet => visitor.visit::<SharedSet>(),
            Self::CampaignSharedSet => visitor.visit::<CampaignSharedSet>(),
            Self::SharedSetCriteria => visitor.visit::<SharedSetCriteria>(),
            Self::Url => visitor.visit::<UrlPerformance>(),
            Self::AutomaticPlacements => visitor.visit::<AutomaticPlacements>(),
            Self::Geo => visitor.visit::<GeoPerformance>(),
            Self::Budget => visitor.visit::<BudgetPerformance>(),
            Self::Label => visitor.visit::<Label>(),
        }
    }

    pub fn from_key(key: &str) -> Option<ReportKind> {
        ALL_REPORTS.iter().find(|k| k.key() == key).copied()
    }

    pub fn from_report_type(report_type: &str) -> Option<ReportKind> {
        ALL_REPORTS
            .iter()
            .find(|k| k.report_type() == report_type)
            .copied()
    }
}

pub const ALL_REPORTS: &[ReportKind] = &[
    ReportKind::Account,
    ReportKind::Campaign,
    ReportKind::AdGroup,
    ReportKind::Ad,
    ReportKind::Keywords,
    ReportKind::ClickPerformance,
    ReportKind::CallMetrics,
    ReportKind::SharedSet,
    ReportKind::CampaignSharedSet,
    ReportKind::SharedSetCriteria,
    ReportKind::Url,
    ReportKind::AutomaticPlacements,
    ReportKind::Geo,
    ReportKind::Budget,
    ReportKind::Label,
];

#[cfg(test)]
mod tests {
    use super::*;

    struct KindOf;

    impl RowVisitor for KindOf {
        type Output = ReportKind;

        fn visit<T: ReportRow>(self) -> ReportKind {
            T::KIND
        }
    }

    #[test]
    fn test_dispatch_matches_kind() {
        for kind in ALL_REPORTS {
            assert_eq!(kind.accept(KindOf), *kind);
        }
    }

    #[test]
    fn test_lookup_by_key_and_report_type() {
        assert_eq!(ReportKind::from_key("click_performance"), Some(ReportKind::ClickPerformance));
        assert_eq!(ReportKind::from_key("nope"), None);
        assert_eq!(
            ReportKind::from_report_type("SHARED_SET_REPORT"),
            Some(ReportKind::SharedSet)
        );
        for kind in ALL_REPORTS {
            assert_eq!(ReportKind::from_key(kind.key()), Some(*kind));
            assert_eq!(ReportKind::from_report_type(kind.report_type()), Some(*kind));
        }
    }

    #[test]
    fn test_tables() {
        assert_eq!(ReportKind::CallMetrics.table(), "report_call_metrics");
        assert_eq!(ALL_REPORTS.len(), 15);
    }
}
