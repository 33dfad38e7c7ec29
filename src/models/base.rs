use serde::Serialize;

use crate::fields::{Amount, Money, Percent};

/// Account context shared by every report row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Report {
    pub row_id: Option<String>,
    pub top_account_id: Option<i64>,
    pub account_id: Option<i64>,
    pub account_descriptive_name: Option<String>,
    pub currency_code: Option<String>,
    pub time_zone: Option<String>,
    pub date_range_type: Option<String>,
    pub date_start: Option<String>,
    pub date_end: Option<String>,
}

/// Date segmentation of a date-segmented report row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DateSegments {
    pub day: Option<String>,
    pub day_of_week: Option<String>,
    pub week: Option<String>,
    pub month: Option<String>,
    pub month_of_year: Option<String>,
    pub quarter: Option<String>,
    pub year: Option<i64>,
}

impl DateSegments {
    /// The most specific date segment on the row, falling back to the
    /// requested date range of the download.
    pub fn label(&self, report: &Report) -> Option<String> {
        if let Some(day) = &self.day {
            return Some(day.clone());
        }
        if let Some(week) = &self.week {
            return Some(week.clone());
        }
        if let Some(month) = &self.month {
            return Some(month.clone());
        }
        if let Some(quarter) = &self.quarter {
            return Some(quarter.clone());
        }
        if let Some(year) = self.year {
            return Some(year.to_string());
        }
        match (&report.date_start, &report.date_end) {
            (Some(start), Some(end)) => Some(format!("{start}-{end}")),
            _ => None,
        }
    }
}

/// Network and device segments plus the common performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Performance {
    pub ad_network_type: Option<String>,
    pub ad_network_type2: Option<String>,
    pub device: Option<String>,
    pub impressions: Option<i64>,
    pub clicks: Option<i64>,
    pub interactions: Option<i64>,
    pub cost: Option<Money>,
    pub ctr: Option<Percent>,
    pub average_cpc: Option<Money>,
    pub average_cpm: Option<Money>,
    pub average_position: Option<Amount>,
    pub conversions: Option<Amount>,
    pub conversion_rate: Option<Percent>,
    pub cost_per_conversion: Option<Money>,
    pub conversion_value: Option<Amount>,
}

impl Performance {
    pub fn key_parts(&self) -> [Option<String>; 3] {
        [
            self.ad_network_type.clone(),
            self.ad_network_type2.clone(),
            self.device.clone(),
        ]
    }
}

// Column groups. Each expands to a `Vec<Binding<Self>>` and expects the
// implementing row type to hold the group under the conventional field name
// (`report`, `date`, `performance`).

macro_rules! report_columns {
    () => {
        vec![
            $crate::fields::bind!(stored row_id: report.row_id),
            $crate::fields::bind!(stored top_account_id: report.top_account_id),
            $crate::fields::bind!("Customer ID", "ExternalCustomerId" => account_id: report.account_id),
            $crate::fields::bind!("Account", "AccountDescriptiveName" => account_descriptive_name: report.account_descriptive_name),
            $crate::fields::bind!("Currency", "AccountCurrencyCode" => currency_code: report.currency_code),
            $crate::fields::bind!("Time zone", "AccountTimeZone" => time_zone: report.time_zone),
            $crate::fields::bind!(stored date_range_type: report.date_range_type),
            $crate::fields::bind!(stored date_start: report.date_start),
            $crate::fields::bind!(stored date_end: report.date_end),
        ]
    };
}

macro_rules! date_columns {
    () => {
        vec![
            $crate::fields::bind!("Day", "Date" => day: date.day),
            $crate::fields::bind!("Day of week", "DayOfWeek" => day_of_week: date.day_of_week),
            $crate::fields::bind!("Week", "Week" => week: date.week),
            $crate::fields::bind!("Month", "Month" => month: date.month),
            $crate::fields::bind!("Month of Year", "MonthOfYear" => month_of_year: date.month_of_year),
            $crate::fields::bind!("Quarter", "Quarter" => quarter: date.quarter),
            $crate::fields::bind!("Year", "Year" => year: date.year),
        ]
    };
}

macro_rules! performance_columns {
    () => {
        vec![
            $crate::fields::bind!("Network", "AdNetworkType1" => ad_network_type: performance.ad_network_type),
            $crate::fields::bind!("Network (with search partners)", "AdNetworkType2" => ad_network_type2: performance.ad_network_type2),
            $crate::fields::bind!("Device", "Device" => device: performance.device),
            $crate::fields::bind!("Impressions", "Impressions" => impressions: performance.impressions),
            $crate::fields::bind!("Clicks", "Clicks" => clicks: performance.clicks),
            $crate::fields::bind!("Interactions", "Interactions" => interactions: performance.interactions),
            $crate::fields::bind!("Cost", "Cost" => cost: performance.cost),
            $crate::fields::bind!("CTR", "Ctr" => ctr: performance.ctr),
            $crate::fields::bind!("Avg. CPC", "AverageCpc" => average_cpc: performance.average_cpc),
            $crate::fields::bind!("Avg. CPM", "AverageCpm" => average_cpm: performance.average_cpm),
            $crate::fields::bind!("Avg. position", "AveragePosition" => average_position: performance.average_position),
            $crate::fields::bind!("Conversions", "Conversions" => conversions: performance.conversions),
            $crate::fields::bind!("Conv. rate", "ConversionRate" => conversion_rate: performance.conversion_rate),
            $crate::fields::bind!("Cost / conv.", "CostPerConversion" => cost_per_conversion: performance.cost_per_conversion),
            $crate::fields::bind!("Total conv. value", "ConversionValue" => conversion_value: performance.conversion_value),
        ]
    };
}

pub(crate) use {date_columns, performance_columns, report_columns};
