use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{AdRowsError, Result};
use crate::models::{ReportKind, ReportRow};

const PREDEFINED: &[&str] = &[
    "TODAY",
    "YESTERDAY",
    "LAST_7_DAYS",
    "LAST_14_DAYS",
    "LAST_30_DAYS",
    "LAST_WEEK",
    "LAST_BUSINESS_WEEK",
    "THIS_MONTH",
    "LAST_MONTH",
    "THIS_WEEK_SUN_TODAY",
    "THIS_WEEK_MON_TODAY",
    "LAST_WEEK_SUN_SAT",
    "ALL_TIME",
];

/// The DURING part of a report query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    Predefined(&'static str),
    Custom { start: NaiveDate, end: NaiveDate },
}

impl Default for DateRange {
    fn default() -> Self {
        Self::Predefined("ALL_TIME")
    }
}

fn parse_day(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y%m%d")
        .map_err(|_| AdRowsError::DateRange(format!("'{}' is not a YYYYMMDD date", raw.trim())))
}

impl FromStr for DateRange {
    type Err = AdRowsError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some((start, end)) = s.split_once(',') {
            let start = parse_day(start)?;
            let end = parse_day(end)?;
            if start > end {
                return Err(AdRowsError::DateRange(format!("{s} ends before it starts")));
            }
            return Ok(Self::Custom { start, end });
        }
        let upper = s.to_ascii_uppercase();
        PREDEFINED
            .iter()
            .find(|name| **name == upper)
            .copied()
            .map(Self::Predefined)
            .ok_or_else(|| AdRowsError::DateRange(format!("unknown range '{s}'")))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predefined(name) => f.write_str(name),
            Self::Custom { start, end } => {
                write!(f, "{},{}", start.format("%Y%m%d"), end.format("%Y%m%d"))
            }
        }
    }
}

impl DateRange {
    /// Value stored in a row's `date_range_type` column.
    pub fn range_type(&self) -> &'static str {
        match self {
            Self::Predefined(name) => name,
            Self::Custom { .. } => "CUSTOM_DATE",
        }
    }

    pub fn is_single_day(&self) -> bool {
        match self {
            Self::Predefined(name) => matches!(*name, "TODAY" | "YESTERDAY"),
            Self::Custom { start, end } => start == end,
        }
    }

    pub fn validate_for(&self, kind: ReportKind) -> Result<()> {
        if kind.single_day() && !self.is_single_day() {
            return Err(AdRowsError::DateRange(format!(
                "{} only accepts a single day, got {self}",
                kind.report_type()
            )));
        }
        Ok(())
    }
}

/// AWQL selecting every reportable field of `T`.
pub fn build_query<T: ReportRow>(range: &DateRange) -> Result<String> {
    range.validate_for(T::KIND)?;
    let fields: Vec<&str> = T::bindings().iter().filter_map(|b| b.field).collect();
    let mut query = format!("SELECT {} FROM {}", fields.join(", "), T::KIND.report_type());
    if *range != DateRange::Predefined("ALL_TIME") {
        query.push_str(&format!(" DURING {range}"));
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClickPerformance, Label};

    #[test]
    fn test_parse_predefined_ranges() {
        assert_eq!("last_7_days".parse::<DateRange>().unwrap(), DateRange::Predefined("LAST_7_DAYS"));
        assert_eq!(" YESTERDAY ".parse::<DateRange>().unwrap(), DateRange::Predefined("YESTERDAY"));
        assert!("LAST_YEAR".parse::<DateRange>().is_err());
    }

    #[test]
    fn test_parse_custom_range() {
        let range: DateRange = "20240101,20240131".parse().unwrap();
        assert_eq!(range.to_string(), "20240101,20240131");
        assert_eq!(range.range_type(), "CUSTOM_DATE");
        assert!(!range.is_single_day());

        assert!("20240131,20240101".parse::<DateRange>().is_err());
        assert!("2024-01-01,20240131".parse::<DateRange>().is_err());
    }

    #[test]
    fn test_build_query_selects_field_names() {
        let query = build_query::<Label>(&DateRange::default()).unwrap();
        assert!(query.starts_with("SELECT ExternalCustomerId"));
        assert!(query.contains("LabelId, LabelName"));
        assert!(query.ends_with("FROM LABEL_REPORT"));
        assert!(!query.contains("row_id"));

        let query = build_query::<Label>(&"LAST_MONTH".parse().unwrap()).unwrap();
        assert!(query.ends_with("FROM LABEL_REPORT DURING LAST_MONTH"));
    }

    #[test]
    fn test_click_report_requires_single_day() {
        assert!(build_query::<ClickPerformance>(&DateRange::Predefined("YESTERDAY")).is_ok());
        let day: DateRange = "20240502,20240502".parse().unwrap();
        let query = build_query::<ClickPerformance>(&day).unwrap();
        assert!(query.ends_with("DURING 20240502,20240502"));

        let err = build_query::<ClickPerformance>(&DateRange::Predefined("LAST_7_DAYS")).unwrap_err();
        assert!(matches!(err, AdRowsError::DateRange(_)));
        assert!(build_query::<ClickPerformance>(&DateRange::default()).is_err());
    }
}
