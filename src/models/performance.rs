use serde::Serialize;

use super::{
    date_columns, key, performance_columns, report_columns, DateSegments, Performance, Report,
    ReportKind, ReportRow,
};
use crate::fields::{bind, Binding, Money, Percent};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct AccountPerformance {
    #[serde(flatten)]
    pub report: Report,
    #[serde(flatten)]
    pub date: DateSegments,
    #[serde(flatten)]
    pub performance: Performance,
    pub hour_of_day: Option<i64>,
    pub search_impression_share: Option<Percent>,
    pub search_budget_lost_impression_share: Option<Percent>,
    pub search_rank_lost_impression_share: Option<Percent>,
}

impl ReportRow for AccountPerformance {
    const KIND: ReportKind = ReportKind::Account;

    fn bindings() -> Vec<Binding<Self>> {
        let mut columns = report_columns!();
        columns.extend(date_columns!());
        columns.extend(performance_columns!());
        columns.extend([
            bind!("Hour of day", "HourOfDay" => hour_of_day),
            bind!("Search Impr. share", "SearchImpressionShare" => search_impression_share),
            bind!("Search Lost IS (budget)", "SearchBudgetLostImpressionShare" => search_budget_lost_impression_share),
            bind!("Search Lost IS (rank)", "SearchRankLostImpressionShare" => search_rank_lost_impression_share),
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
        let mut parts = vec![self.date.label(&self.report)];
        parts.extend(self.performance.key_parts());
        parts.push(key(&self.hour_of_day));
        parts
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CampaignPerformance {
    #[serde(flatten)]
    pub report: Report,
    #[serde(flatten)]
    pub date: DateSegments,
    #[serde(flatten)]
    pub performance: Performance,
    pub campaign_id: Option<i64>,
    pub campaign_name: Option<String>,
    pub campaign_status: Option<String>,
    pub budget: Option<Money>,
    pub bidding_strategy_type: Option<String>,
    pub advertising_channel_type: Option<String>,
    pub search_impression_share: Option<Percent>,
    pub search_rank_lost_impression_share: Option<Percent>,
}

impl ReportRow for CampaignPerformance {
    const KIND: ReportKind = ReportKind::Campaign;

    fn bindings() -> Vec<Binding<Self>> {
        let mut columns = report_columns!();
        columns.extend(date_columns!());
        columns.extend(performance_columns!());
        columns.extend([
            bind!("Campaign ID", "CampaignId" => campaign_id),
            bind!("Campaign", "CampaignName" => campaign_name),
            bind!("Campaign state", "CampaignStatus" => campaign_status),
            bind!("Budget", "Amount" => budget),
            bind!("Bid Strategy Type", "BiddingStrategyType" => bidding_strategy_type),
            bind!("Advertising Channel", "AdvertisingChannelType" => advertising_channel_type),
            bind!("Search Impr. share", "SearchImpressionShare" => search_impression_share),
            bind!("Search Lost IS (rank)", "SearchRankLostImpressionShare" => search_rank_lost_impression_share),
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
        let mut parts = vec![key(&self.campaign_id), self.date.label(&self.report)];
        parts.extend(self.performance.key_parts());
        parts
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct AdGroupPerformance {
    #[serde(flatten)]
    pub report: Report,
    #[serde(flatten)]
    pub date: DateSegments,
    #[serde(flatten)]
    pub performance: Performance,
    pub campaign_id: Option<i64>,
    pub campaign_name: Option<String>,
    pub ad_group_id: Option<i64>,
    pub ad_group_name: Option<String>,
    pub ad_group_status: Option<String>,
    pub cpc_bid: Option<Money>,
}

impl ReportRow for AdGroupPerformance {
    const KIND: ReportKind = ReportKind::AdGroup;

    fn bindings() -> Vec<Binding<Self>> {
        let mut columns = report_columns!();
        columns.extend(date_columns!());
        columns.extend(performance_columns!());
        columns.extend([
            bind!("Campaign ID", "CampaignId" => campaign_id),
            bind!("Campaign", "CampaignName" => campaign_name),
            bind!("Ad group ID", "AdGroupId" => ad_group_id),
            bind!("Ad group", "AdGroupName" => ad_group_name),
            bind!("Ad group state", "AdGroupStatus" => ad_group_status),
            bind!("Default max. CPC", "CpcBid" => cpc_bid),
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
        let mut parts = vec![
            key(&self.campaign_id),
            key(&self.ad_group_id),
            self.date.label(&self.report),
        ];
        parts.extend(self.performance.key_parts());
        parts
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct AdPerformance {
    #[serde(flatten)]
    pub report: Report,
    #[serde(flatten)]
    pub date: DateSegments,
    #[serde(flatten)]
    pub performance: Performance,
    pub campaign_id: Option<i64>,
    pub ad_group_id: Option<i64>,
    pub ad_id: Option<i64>,
    pub ad_type: Option<String>,
    pub status: Option<String>,
    pub headline_part1: Option<String>,
    pub headline_part2: Option<String>,
    pub description: Option<String>,
    pub creative_final_urls: Option<String>,
    pub display_url: Option<String>,
}

impl ReportRow for AdPerformance {
    const KIND: ReportKind = ReportKind::Ad;

    fn bindings() -> Vec<Binding<Self>> {
        let mut columns = report_columns!();
        columns.extend(date_columns!());
        columns.extend(performance_columns!());
        columns.extend([
            bind!("Campaign ID", "CampaignId" => campaign_id),
            bind!("Ad group ID", "AdGroupId" => ad_group_id),
            bind!("Ad ID", "Id" => ad_id),
            bind!("Ad type", "AdType" => ad_type),
            bind!("Ad state", "Status" => status),
            bind!("Headline 1", "HeadlinePart1" => headline_part1),
            bind!("Headline 2", "HeadlinePart2" => headline_part2),
            bind!("Description", "Description" => description),
            bind!("Final URL", "CreativeFinalUrls" => creative_final_urls),
            bind!("Display URL", "DisplayUrl" => display_url),
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
        let mut parts = vec![
            key(&self.campaign_id),
            key(&self.ad_group_id),
            key(&self.ad_id),
            self.date.label(&self.report),
        ];
        parts.extend(self.performance.key_parts());
        parts
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct KeywordsPerformance {
    #[serde(flatten)]
    pub report: Report,
    #[serde(flatten)]
    pub date: DateSegments,
    #[serde(flatten)]
    pub performance: Performance,
    pub campaign_id: Option<i64>,
    pub ad_group_id: Option<i64>,
    pub criterion_id: Option<i64>,
    pub criteria: Option<String>,
    pub keyword_match_type: Option<String>,
    pub status: Option<String>,
    pub quality_score: Option<i64>,
    pub cpc_bid: Option<Money>,
    pub first_page_cpc: Option<Money>,
    pub is_negative: Option<bool>,
}

impl ReportRow for KeywordsPerformance {
    const KIND: ReportKind = ReportKind::Keywords;

    fn bindings() -> Vec<Binding<Self>> {
        let mut columns = report_columns!();
        columns.extend(date_columns!());
        columns.extend(performance_columns!());
        columns.extend([
            bind!("Campaign ID", "CampaignId" => campaign_id),
            bind!("Ad group ID", "AdGroupId" => ad_group_id),
            bind!("Keyword ID", "Id" => criterion_id),
            bind!("Keyword", "Criteria" => criteria),
            bind!("Match type", "KeywordMatchType" => keyword_match_type),
            bind!("Keyword state", "Status" => status),
            bind!("Quality score", "QualityScore" => quality_score),
            bind!("Max. CPC", "CpcBid" => cpc_bid),
            bind!("First page CPC", "FirstPageCpc" => first_page_cpc),
            bind!("Is negative", "IsNegative" => is_negative),
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
        let mut parts = vec![
            key(&self.campaign_id),
            key(&self.ad_group_id),
            key(&self.criterion_id),
            self.date.label(&self.report),
        ];
        parts.extend(self.performance.key_parts());
        parts
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct BudgetPerformance {
    #[serde(flatten)]
    pub report: Report,
    #[serde(flatten)]
    pub date: DateSegments,
    #[serde(flatten)]
    pub performance: Performance,
    pub budget_id: Option<i64>,
    pub budget_name: Option<String>,
    pub amount: Option<Money>,
    pub delivery_method: Option<String>,
    pub is_budget_explicitly_shared: Option<bool>,
    pub associated_campaign_id: Option<i64>,
    pub budget_status: Option<String>,
}

impl ReportRow for BudgetPerformance {
    const KIND: ReportKind = ReportKind::Budget;

    fn bindings() -> Vec<Binding<Self>> {
        let mut columns = report_columns!();
        columns.extend(date_columns!());
        columns.extend(performance_columns!());
        columns.extend([
            bind!("Budget ID", "BudgetId" => budget_id),
            bind!("Budget Name", "BudgetName" => budget_name),
            bind!("Budget", "Amount" => amount),
            bind!("Delivery method", "DeliveryMethod" => delivery_method),
            bind!("Explicitly shared", "IsBudgetExplicitlyShared" => is_budget_explicitly_shared),
            bind!("Campaign ID", "AssociatedCampaignId" => associated_campaign_id),
            bind!("Budget state", "BudgetStatus" => budget_status),
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
        let mut parts = vec![
            key(&self.budget_id),
            key(&self.associated_campaign_id),
            self.date.label(&self.report),
        ];
        parts.extend(self.performance.key_parts());
        parts
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::*;

    fn campaign_row() -> CampaignPerformance {
        let mut row = CampaignPerformance::default();
        row.report.account_id = Some(1234567890);
        row.campaign_id = Some(42);
        row.date.day = Some("2024-03-01".to_string());
        row.performance.ad_network_type = Some("Search Network".to_string());
        row.performance.ad_network_type2 = Some("Google search".to_string());
        row.performance.device = Some("Computers".to_string());
        row
    }

    #[test]
    fn test_campaign_row_id_order() {
        let id = campaign_row().row_id().unwrap();
        assert_eq!(
            id.value,
            "1234567890-42-2024-03-01-Search Network-Google search-Computers"
        );
        assert!(id.complete);
    }

    fn segments() -> (DateSegments, Performance) {
        let date = DateSegments {
            day: Some("2024-03-01".to_string()),
            ..Default::default()
        };
        let performance = Performance {
            ad_network_type: Some("Search Network".to_string()),
            ad_network_type2: Some("Search partners".to_string()),
            device: Some("Tablets".to_string()),
            ..Default::default()
        };
        (date, performance)
    }

    #[test]
    fn test_ad_group_row_id_order() {
        let mut row = AdGroupPerformance::default();
        (row.date, row.performance) = segments();
        row.report.account_id = Some(1);
        row.campaign_id = Some(2);
        row.ad_group_id = Some(3);
        assert_eq!(
            row.row_id().unwrap().value,
            "1-2-3-2024-03-01-Search Network-Search partners-Tablets"
        );
    }

    #[test]
    fn test_ad_row_id_order() {
        let mut row = AdPerformance::default();
        (row.date, row.performance) = segments();
        row.report.account_id = Some(1);
        row.campaign_id = Some(2);
        row.ad_group_id = Some(3);
        row.ad_id = Some(4);
        assert_eq!(
            row.row_id().unwrap().value,
            "1-2-3-4-2024-03-01-Search Network-Search partners-Tablets"
        );
    }

    #[test]
    fn test_keywords_row_id_order() {
        let mut row = KeywordsPerformance::default();
        (row.date, row.performance) = segments();
        row.report.account_id = Some(1);
        row.campaign_id = Some(2);
        row.ad_group_id = Some(3);
        row.criterion_id = Some(5);
        let id = row.row_id().unwrap();
        assert_eq!(id.value, "1-2-3-5-2024-03-01-Search Network-Search partners-Tablets");
        assert!(id.complete);
    }

    #[test]
    fn test_account_row_id_uses_range_label_and_hour() {
        let mut row = AccountPerformance::default();
        row.report.account_id = Some(9);
        row.report.date_start = Some("2024-01-01".to_string());
        row.report.date_end = Some("2024-01-07".to_string());
        row.hour_of_day = Some(13);
        let id = row.row_id().unwrap();
        assert_eq!(id.value, "9-2024-01-01-2024-01-07-13");
        assert!(!id.complete);
    }

    #[test]
    fn test_budget_row_id() {
        let mut row = BudgetPerformance::default();
        row.report.account_id = Some(5);
        row.budget_id = Some(77);
        row.associated_campaign_id = Some(42);
        row.date.month = Some("2024-02-01".to_string());
        assert_eq!(row.row_id().unwrap().value, "5-77-42-2024-02-01");
    }

    #[test]
    fn test_equality_includes_base_fields() {
        let a = campaign_row();
        let mut b = campaign_row();
        assert_eq!(a, b);

        b.report.currency_code = Some("EUR".to_string());
        assert_ne!(a, b);

        let mut c = campaign_row();
        c.performance.cost = Some(Money(Decimal::from_str("1.5").unwrap()));
        assert_ne!(a, c);
    }

    #[test]
    fn test_equal_rows_hash_equal() {
        let mut set = HashSet::new();
        let mut a = campaign_row();
        a.budget = Some(Money(Decimal::from_str("10.0").unwrap()));
        let mut b = campaign_row();
        b.budget = Some(Money(Decimal::from_str("10").unwrap()));
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_keyword_bindings_parse_cells() {
        let bindings = KeywordsPerformance::bindings();
        let mut row = KeywordsPerformance::default();
        for (header, raw) in [
            ("Keyword", "running shoes"),
            ("Max. CPC", "1500000"),
            ("Is negative", "false"),
            ("Quality score", "7"),
            ("CTR", "3.25%"),
        ] {
            let b = bindings.iter().find(|b| b.matches_header(header)).unwrap();
            (b.parse)(&mut row, raw).unwrap();
        }
        assert_eq!(row.criteria.as_deref(), Some("running shoes"));
        assert_eq!(row.cpc_bid, Some(Money(Decimal::from_str("1.5").unwrap())));
        assert_eq!(row.is_negative, Some(false));
        assert_eq!(row.quality_score, Some(7));
        assert_eq!(row.performance.ctr, Some(Percent(Decimal::from_str("3.25").unwrap())));
    }

    #[test]
    fn test_serializes_flat_document() {
        let mut row = campaign_row();
        row.performance.ctr = Some(Percent(Decimal::from_str("2.5").unwrap()));
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["account_id"], 1234567890);
        assert_eq!(json["campaign_id"], 42);
        assert_eq!(json["day"], "2024-03-01");
        assert_eq!(json["ctr"], "2.50%");
        assert!(json.get("report").is_none());
    }
}
