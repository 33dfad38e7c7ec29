use serde::Serialize;

use super::{
    date_columns, key, performance_columns, report_columns, DateSegments, Performance, Report,
    ReportKind, ReportRow,
};
use crate::fields::{bind, Binding};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct UrlPerformance {
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
    pub url: Option<String>,
    pub display_name: Option<String>,
    pub criteria_parameters: Option<String>,
    pub is_auto_optimized: Option<bool>,
    pub is_bid_on_path: Option<bool>,
    pub is_path_excluded: Option<bool>,
}

impl ReportRow for UrlPerformance {
    const KIND: ReportKind = ReportKind::Url;

    fn bindings() -> Vec<Binding<Self>> {
        let mut columns = report_columns!();
        columns.extend(date_columns!());
        columns.extend(performance_columns!());
        columns.extend([
            bind!("Campaign ID", "CampaignId" => campaign_id),
            bind!("Campaign", "CampaignName" => campaign_name),
            bind!("Ad group ID", "AdGroupId" => ad_group_id),
            bind!("Ad group", "AdGroupName" => ad_group_name),
            bind!("URL", "Url" => url),
            bind!("Domain", "DisplayName" => display_name),
            bind!("Criteria parameters", "CriteriaParameters" => criteria_parameters),
            bind!("Targeting expansion", "IsAutoOptimized" => is_auto_optimized),
            bind!("Added", "IsBidOnPath" => is_bid_on_path),
            bind!("Excluded", "IsPathExcluded" => is_path_excluded),
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
            self.url.clone(),
            self.date.label(&self.report),
        ];
        parts.extend(self.performance.key_parts());
        parts
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct AutomaticPlacements {
    #[serde(flatten)]
    pub report: Report,
    #[serde(flatten)]
    pub date: DateSegments,
    #[serde(flatten)]
    pub performance: Performance,
    pub campaign_id: Option<i64>,
    pub ad_group_id: Option<i64>,
    pub domain: Option<String>,
    pub display_name: Option<String>,
    pub criteria_parameters: Option<String>,
    pub is_path_excluded: Option<bool>,
}

impl ReportRow for AutomaticPlacements {
    const KIND: ReportKind = ReportKind::AutomaticPlacements;

    fn bindings() -> Vec<Binding<Self>> {
        let mut columns = report_columns!();
        columns.extend(date_columns!());
        columns.extend(performance_columns!());
        columns.extend([
            bind!("Campaign ID", "CampaignId" => campaign_id),
            bind!("Ad group ID", "AdGroupId" => ad_group_id),
            bind!("Domain", "Domain" => domain),
            bind!("Placement", "DisplayName" => display_name),
            bind!("Criteria parameters", "CriteriaParameters" => criteria_parameters),
            bind!("Excluded", "IsPathExcluded" => is_path_excluded),
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
            self.domain.clone(),
            self.date.label(&self.report),
        ];
        parts.extend(self.performance.key_parts());
        parts
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct GeoPerformance {
    #[serde(flatten)]
    pub report: Report,
    #[serde(flatten)]
    pub date: DateSegments,
    #[serde(flatten)]
    pub performance: Performance,
    pub campaign_id: Option<i64>,
    pub ad_group_id: Option<i64>,
    pub country_criteria_id: Option<i64>,
    pub region_criteria_id: Option<i64>,
    pub metro_criteria_id: Option<i64>,
    pub city_criteria_id: Option<i64>,
    pub most_specific_criteria_id: Option<i64>,
    pub location_type: Option<String>,
    pub is_targeting_location: Option<bool>,
}

impl ReportRow for GeoPerformance {
    const KIND: ReportKind = ReportKind::Geo;

    fn bindings() -> Vec<Binding<Self>> {
        let mut columns = report_columns!();
        columns.extend(date_columns!());
        columns.extend(performance_columns!());
        columns.extend([
            bind!("Campaign ID", "CampaignId" => campaign_id),
            bind!("Ad group ID", "AdGroupId" => ad_group_id),
            bind!("Country/Territory", "CountryCriteriaId" => country_criteria_id),
            bind!("Region", "RegionCriteriaId" => region_criteria_id),
            bind!("Metro area", "MetroCriteriaId" => metro_criteria_id),
            bind!("City", "CityCriteriaId" => city_criteria_id),
            bind!("Most specific location", "MostSpecificCriteriaId" => most_specific_criteria_id),
            bind!("Location type", "LocationType" => location_type),
            bind!("Is targetable", "IsTargetingLocation" => is_targeting_location),
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
            key(&self.country_criteria_id),
            key(&self.region_criteria_id),
            key(&self.metro_criteria_id),
            key(&self.city_criteria_id),
            self.location_type.clone(),
            self.date.label(&self.report),
        ];
        parts.extend(self.performance.key_parts());
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_row_id() {
        let mut row = UrlPerformance::default();
        row.report.account_id = Some(1);
        row.campaign_id = Some(2);
        row.ad_group_id = Some(3);
        row.url = Some("example.com/shoes".to_string());
        row.date.day = Some("2024-06-01".to_string());
        row.performance.ad_network_type = Some("Display Network".to_string());
        row.performance.ad_network_type2 = Some("Display Network".to_string());
        row.performance.device = Some("Mobile devices with full browsers".to_string());
        let id = row.row_id().unwrap();
        assert_eq!(
            id.value,
            "1-2-3-example.com/shoes-2024-06-01-Display Network-Display Network-Mobile devices with full browsers"
        );
        assert!(id.complete);
    }

    #[test]
    fn test_automatic_placements_row_id_order() {
        let mut row = AutomaticPlacements::default();
        row.report.account_id = Some(1);
        row.campaign_id = Some(2);
        row.ad_group_id = Some(3);
        row.domain = Some("news.example.com".to_string());
        row.date.week = Some("2024-06-03".to_string());
        row.performance.ad_network_type = Some("Display Network".to_string());
        row.performance.ad_network_type2 = Some("Display Network".to_string());
        row.performance.device = Some("Computers".to_string());
        let id = row.row_id().unwrap();
        assert_eq!(
            id.value,
            "1-2-3-news.example.com-2024-06-03-Display Network-Display Network-Computers"
        );
        assert!(id.complete);
    }

    #[test]
    fn test_geo_row_id_skips_missing_levels() {
        let mut row = GeoPerformance::default();
        row.report.account_id = Some(1);
        row.campaign_id = Some(2);
        row.ad_group_id = Some(3);
        row.country_criteria_id = Some(2840);
        row.city_criteria_id = Some(1014221);
        row.location_type = Some("Physical location".to_string());
        row.date.year = Some(2024);
        let id = row.row_id().unwrap();
        assert_eq!(id.value, "1-2-3-2840-1014221-Physical location-2024");
        assert!(!id.complete);
    }

    #[test]
    fn test_placement_excluded_flag_binding() {
        let bindings = AutomaticPlacements::bindings();
        let b = bindings.iter().find(|b| b.matches_header("Excluded")).unwrap();
        let mut row = AutomaticPlacements::default();
        (b.parse)(&mut row, "true").unwrap();
        assert_eq!(row.is_path_excluded, Some(true));
        assert_eq!(b.column, "is_path_excluded");
    }
}
