use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use rusqlite::Connection;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::db::{create_table, is_duplicate_file, record_import, upsert_rows, ImportRecord};
use crate::error::{AdRowsError, Result};
use crate::fields::Binding;
use crate::models::{ReportKind, ReportRow, RowVisitor};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Title row of a report download: `CAMPAIGN_PERFORMANCE_REPORT (Jan 1, 2024-Jan 31, 2024)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTitle {
    pub kind: Option<ReportKind>,
    pub date_range_type: Option<String>,
    pub date_start: Option<String>,
    pub date_end: Option<String>,
}

fn title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Z0-9_]+_REPORT)(?:\s*\((.*)\))?$").expect("valid regex"))
}

fn parse_title_date(raw: &str) -> Option<String> {
    NaiveDate::parse_from_str(raw.trim(), "%b %d, %Y")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

pub fn parse_title(raw: &str) -> Option<ReportTitle> {
    let caps = title_regex().captures(raw.trim())?;
    let kind = ReportKind::from_report_type(&caps[1]);
    let range = caps.get(2).map(|m| m.as_str().trim());

    let mut title = ReportTitle {
        kind,
        date_range_type: None,
        date_start: None,
        date_end: None,
    };
    match range {
        Some(r) if r.eq_ignore_ascii_case("all time") => {
            title.date_range_type = Some("ALL_TIME".to_string());
        }
        Some(r) => {
            if let Some((start, end)) = r.split_once('-') {
                title.date_start = parse_title_date(start);
                title.date_end = parse_title_date(end);
                if title.date_start.is_some() && title.date_end.is_some() {
                    title.date_range_type = Some("CUSTOM_DATE".to_string());
                }
            }
        }
        None => {}
    }
    Some(title)
}

fn compute_checksum(file_path: &Path) -> Result<String> {
    let data = std::fs::read(file_path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

fn open_reader(file_path: &Path) -> Result<csv::Reader<std::io::BufReader<std::fs::File>>> {
    let file = std::fs::File::open(file_path)?;
    Ok(csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file)))
}

/// Report kind named by the title row, if the file has one.
pub fn detect(file_path: &Path) -> Option<ReportKind> {
    read_title(file_path)?.kind
}

/// Title row of the file: the first non-blank record, if it is one.
fn read_title(file_path: &Path) -> Option<ReportTitle> {
    let mut rdr = open_reader(file_path).ok()?;
    let record = rdr
        .records()
        .filter_map(|r| r.ok())
        .find(|r| !is_blank_row(r))?;
    parse_title(&record_text(&record))
}

/// Title rows are often unquoted, so the date range splits into cells.
fn record_text(record: &csv::StringRecord) -> String {
    record.iter().collect::<Vec<_>>().join(",")
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Values that come from how a report was requested rather than from its
/// cells.
#[derive(Debug, Clone, Default)]
pub struct ImportContext {
    pub top_account_id: Option<i64>,
    /// Used for rows whose file has no Customer ID column.
    pub account_id: Option<i64>,
    pub date_range_type: Option<String>,
    /// Reject header cells no binding knows about.
    pub strict_headers: bool,
}

pub struct ParsedReport<T> {
    pub rows: Vec<T>,
    pub title: Option<ReportTitle>,
    pub unknown_columns: Vec<String>,
    /// Rows whose id skipped one or more absent key parts.
    pub incomplete_ids: usize,
    /// Rows that replaced an earlier row with the same id in this file.
    pub collisions: usize,
}

/// The footer row that totals the report: first cell exactly `Total`.
fn is_summary_row(record: &csv::StringRecord) -> bool {
    record.get(0).map(|c| c.trim() == "Total").unwrap_or(false)
}

fn is_blank_row(record: &csv::StringRecord) -> bool {
    record.iter().all(|c| c.trim().is_empty())
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn map_header<T: ReportRow>(
    record: &csv::StringRecord,
    bindings: &[Binding<T>],
) -> (Vec<Option<usize>>, Vec<String>) {
    let mut mapping = Vec::with_capacity(record.len());
    let mut unknown = Vec::new();
    for cell in record.iter() {
        let idx = bindings.iter().position(|b| b.matches_header(cell));
        if idx.is_none() && !cell.trim().is_empty() {
            unknown.push(cell.trim().to_string());
        }
        mapping.push(idx);
    }
    (mapping, unknown)
}

pub fn parse_report<T: ReportRow>(file_path: &Path, ctx: &ImportContext) -> Result<ParsedReport<T>> {
    let bindings = T::bindings();
    let mut rdr = open_reader(file_path)?;

    let mut title: Option<ReportTitle> = None;
    let mut mapping: Option<Vec<Option<usize>>> = None;
    let mut unknown_columns = Vec::new();
    let mut rows: Vec<T> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();
    let mut incomplete_ids = 0usize;
    let mut collisions = 0usize;

    for result in rdr.records() {
        let record = result?;
        if is_blank_row(&record) {
            continue;
        }

        if mapping.is_none() {
            if title.is_none() {
                if let Some(t) = parse_title(&record_text(&record)) {
                    debug!(?t, "report title");
                    title = Some(t);
                    continue;
                }
            }
            let (candidate, unknown) = map_header(&record, &bindings);
            if candidate.iter().any(Option::is_some) {
                if !unknown.is_empty() {
                    if ctx.strict_headers {
                        return Err(AdRowsError::UnknownColumn {
                            report: T::KIND.report_type(),
                            column: unknown[0].clone(),
                        });
                    }
                    warn!(report = T::KIND.key(), columns = ?unknown, "ignoring unknown columns");
                }
                unknown_columns = unknown;
                mapping = Some(candidate);
            }
            continue;
        }
        let Some(columns) = mapping.as_ref() else {
            continue;
        };

        if is_summary_row(&record) {
            continue;
        }

        let line = line_of(&record);
        let mut row = T::default();
        for (cell, idx) in record.iter().zip(columns.iter()) {
            let Some(idx) = idx else { continue };
            let binding = &bindings[*idx];
            (binding.parse)(&mut row, cell).map_err(|e| AdRowsError::Cell {
                line,
                column: binding.header.unwrap_or(binding.column).to_string(),
                source: Box::new(e),
            })?;
        }

        apply_context(&mut row, ctx, title.as_ref());
        let id = row.assign_row_id().map_err(|e| AdRowsError::Line {
            line,
            source: Box::new(e),
        })?;
        if !id.complete {
            incomplete_ids += 1;
        }
        match index_by_id.get(&id.value) {
            Some(&existing) => {
                warn!(report = T::KIND.key(), row_id = %id, line, "duplicate row id; keeping the later row");
                collisions += 1;
                rows[existing] = row;
            }
            None => {
                index_by_id.insert(id.value, rows.len());
                rows.push(row);
            }
        }
    }

    if mapping.is_none() {
        return Err(AdRowsError::MissingHeader(file_path.display().to_string()));
    }
    if incomplete_ids > 0 {
        warn!(
            report = T::KIND.key(),
            rows = incomplete_ids,
            "row ids built with missing key parts may not be unique"
        );
    }

    Ok(ParsedReport {
        rows,
        title,
        unknown_columns,
        incomplete_ids,
        collisions,
    })
}

fn apply_context<T: ReportRow>(row: &mut T, ctx: &ImportContext, title: Option<&ReportTitle>) {
    let report = row.report_mut();
    if report.account_id.is_none() {
        report.account_id = ctx.account_id;
    }
    if report.top_account_id.is_none() {
        report.top_account_id = ctx.top_account_id.or(report.account_id);
    }
    if let Some(title) = title {
        report.date_start = title.date_start.clone();
        report.date_end = title.date_end.clone();
        report.date_range_type = title.date_range_type.clone();
    }
    if ctx.date_range_type.is_some() {
        report.date_range_type = ctx.date_range_type.clone();
    }
}

// ---------------------------------------------------------------------------
// import_file
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ImportResult {
    pub kind: ReportKind,
    pub inserted: usize,
    pub updated: usize,
    pub incomplete_ids: usize,
    pub collisions: usize,
    pub unknown_columns: Vec<String>,
    pub duplicate_file: bool,
}

struct ImportRows<'a> {
    conn: &'a Connection,
    file_path: &'a Path,
    ctx: &'a ImportContext,
    checksum: String,
}

impl RowVisitor for ImportRows<'_> {
    type Output = Result<ImportResult>;

    fn visit<T: ReportRow>(self) -> Result<ImportResult> {
        let parsed = parse_report::<T>(self.file_path, self.ctx)?;
        create_table::<T>(self.conn)?;
        let upserted = upsert_rows(self.conn, &parsed.rows)?;

        let title = parsed.title.as_ref();
        record_import(
            self.conn,
            &ImportRecord {
                filename: self
                    .file_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("")
                    .to_string(),
                report: T::KIND.key().to_string(),
                record_count: parsed.rows.len() as i64,
                date_range_start: title.and_then(|t| t.date_start.clone()),
                date_range_end: title.and_then(|t| t.date_end.clone()),
                checksum: self.checksum,
            },
        )?;

        info!(
            report = T::KIND.key(),
            inserted = upserted.inserted,
            updated = upserted.replaced,
            "import complete"
        );
        Ok(ImportResult {
            kind: T::KIND,
            inserted: upserted.inserted,
            updated: upserted.replaced,
            incomplete_ids: parsed.incomplete_ids,
            collisions: parsed.collisions,
            unknown_columns: parsed.unknown_columns,
            duplicate_file: false,
        })
    }
}

pub fn import_file(
    conn: &Connection,
    file_path: &Path,
    report_key: Option<&str>,
    ctx: &ImportContext,
) -> Result<ImportResult> {
    let titled = read_title(file_path).and_then(|t| t.kind);
    let kind = match report_key {
        Some(key) => {
            let kind = ReportKind::from_key(key).ok_or_else(|| AdRowsError::UnknownReport(key.to_string()))?;
            match titled {
                Some(found) if found != kind => {
                    return Err(AdRowsError::ReportMismatch {
                        requested: kind.report_type(),
                        found: found.report_type(),
                    });
                }
                _ => kind,
            }
        }
        None => titled.ok_or_else(|| AdRowsError::UndetectedReport(file_path.display().to_string()))?,
    };

    let checksum = compute_checksum(file_path)?;
    if is_duplicate_file(conn, &checksum, kind.key())? {
        info!(report = kind.key(), file = %file_path.display(), "file already imported");
        return Ok(ImportResult {
            kind,
            inserted: 0,
            updated: 0,
            incomplete_ids: 0,
            collisions: 0,
            unknown_columns: Vec::new(),
            duplicate_file: true,
        });
    }

    kind.accept(ImportRows {
        conn,
        file_path,
        ctx,
        checksum,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::*;
    use crate::db::{count_rows, get_connection, init_db, load_rows};
    use crate::fields::{Money, Percent};
    use crate::models::{CampaignPerformance, ClickPerformance, Label, SharedSet};

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    const CAMPAIGN_CSV: &str = "\
CAMPAIGN_PERFORMANCE_REPORT (Jan 1, 2024-Jan 31, 2024)
Customer ID,Campaign ID,Campaign,Day,Device,Clicks,Cost,CTR,Avg. position
123-456-7890,42,Brand,2024-01-15,Computers,\"1,024\",2500000,3.50%,1.2
1234567890,42,Brand,2024-01-16,Computers,10,0, --, --
Total, --, --, --, --,1034,2500000,3.40%, --
";

    #[test]
    fn test_parse_title() {
        let t = parse_title("CAMPAIGN_PERFORMANCE_REPORT (Jan 1, 2024-Jan 31, 2024)").unwrap();
        assert_eq!(t.kind, Some(ReportKind::Campaign));
        assert_eq!(t.date_start.as_deref(), Some("2024-01-01"));
        assert_eq!(t.date_end.as_deref(), Some("2024-01-31"));
        assert_eq!(t.date_range_type.as_deref(), Some("CUSTOM_DATE"));

        let t = parse_title("LABEL_REPORT (All Time)").unwrap();
        assert_eq!(t.kind, Some(ReportKind::Label));
        assert_eq!(t.date_range_type.as_deref(), Some("ALL_TIME"));
        assert_eq!(t.date_start, None);

        let t = parse_title("SOMETHING_ELSE_REPORT").unwrap();
        assert_eq!(t.kind, None);

        assert!(parse_title("Customer ID").is_none());
    }

    #[test]
    fn test_detect_from_title_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "c.csv", CAMPAIGN_CSV);
        assert_eq!(detect(&path), Some(ReportKind::Campaign));

        let plain = write_file(dir.path(), "p.csv", "Customer ID,Label ID\n1,2\n");
        assert_eq!(detect(&plain), None);
    }

    #[test]
    fn test_bad_cell_reports_line_and_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "c.csv", &CAMPAIGN_CSV.replace("\"1,024\"", "many"));
        let err = parse_report::<CampaignPerformance>(&path, &ImportContext::default()).err().unwrap();
        match err {
            AdRowsError::Cell { line, column, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, "Clicks");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_campaign_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "c.csv", CAMPAIGN_CSV);
        let parsed = parse_report::<CampaignPerformance>(&path, &ImportContext::default()).unwrap();
        assert_eq!(parsed.rows.len(), 2);
        assert!(parsed.unknown_columns.is_empty());

        let first = &parsed.rows[0];
        assert_eq!(first.report.row_id.as_deref(), Some("1234567890-42-2024-01-15-Computers"));
        assert_eq!(first.report.date_start.as_deref(), Some("2024-01-01"));
        assert_eq!(first.report.top_account_id, Some(1234567890));
        assert_eq!(first.performance.clicks, Some(1024));
        assert_eq!(first.performance.cost, Some(Money(Decimal::from_str("2.5").unwrap())));
        assert_eq!(first.performance.ctr, Some(Percent(Decimal::from_str("3.5").unwrap())));

        let second = &parsed.rows[1];
        assert_eq!(second.performance.ctr, None);
        assert_eq!(second.performance.average_position, None);
        // network segments are absent from this download
        assert_eq!(parsed.incomplete_ids, 2);
    }

    #[test]
    fn test_header_accepts_field_names_and_reports_unknown_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "s.csv",
            "ExternalCustomerId,SharedSetId,Name,Flavor\n5,900,Blocked terms,vanilla\n",
        );
        let parsed = parse_report::<SharedSet>(&path, &ImportContext::default()).unwrap();
        assert_eq!(parsed.unknown_columns, vec!["Flavor".to_string()]);
        assert_eq!(parsed.rows[0].name.as_deref(), Some("Blocked terms"));
        assert_eq!(parsed.rows[0].report.row_id.as_deref(), Some("5-900"));

        let strict = ImportContext {
            strict_headers: true,
            ..Default::default()
        };
        let err = parse_report::<SharedSet>(&path, &strict).err().unwrap();
        assert!(matches!(err, AdRowsError::UnknownColumn { .. }));
    }

    #[test]
    fn test_context_supplies_missing_account() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "s.csv", "Shared set ID,Shared set name\n900,Blocked\n");

        let err = parse_report::<SharedSet>(&path, &ImportContext::default()).err().unwrap();
        assert!(matches!(err, AdRowsError::Line { line: 2, .. }));

        let ctx = ImportContext {
            account_id: Some(77),
            top_account_id: Some(1),
            date_range_type: Some("LAST_7_DAYS".to_string()),
            ..Default::default()
        };
        let parsed = parse_report::<SharedSet>(&path, &ctx).unwrap();
        let row = &parsed.rows[0];
        assert_eq!(row.report.account_id, Some(77));
        assert_eq!(row.report.top_account_id, Some(1));
        assert_eq!(row.report.date_range_type.as_deref(), Some("LAST_7_DAYS"));
        assert_eq!(row.report.row_id.as_deref(), Some("77-900"));
    }

    #[test]
    fn test_duplicate_row_ids_keep_later_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "clicks.csv",
            "Customer ID,Day,Campaign ID,Ad group ID,Page\n\
             1,2024-05-02,10,20,1\n\
             1,2024-05-02,10,20,2\n",
        );
        let parsed = parse_report::<ClickPerformance>(&path, &ImportContext::default()).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.collisions, 1);
        assert_eq!(parsed.rows[0].page, Some(2));
    }

    #[test]
    fn test_missing_header_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "x.csv", "a,b,c\n1,2,3\n");
        let err = parse_report::<SharedSet>(&path, &ImportContext::default()).err().unwrap();
        assert!(matches!(err, AdRowsError::MissingHeader(_)));
    }

    #[test]
    fn test_import_file_stores_rows() {
        let (dir, conn) = test_db();
        let path = write_file(dir.path(), "c.csv", CAMPAIGN_CSV);
        let result = import_file(&conn, &path, None, &ImportContext::default()).unwrap();
        assert_eq!(result.kind, ReportKind::Campaign);
        assert_eq!(result.inserted, 2);
        assert!(!result.duplicate_file);

        let rows = load_rows::<CampaignPerformance>(&conn, None, None).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].campaign_name.as_deref(), Some("Brand"));

        let count: i64 = conn.query_row("SELECT count(*) FROM imports", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_import_file_detects_file_duplicate() {
        let (dir, conn) = test_db();
        let path = write_file(dir.path(), "l.csv", "Customer ID,Label ID,Label\n1,2,Sale\n");
        let r1 = import_file(&conn, &path, Some("label"), &ImportContext::default()).unwrap();
        assert_eq!(r1.inserted, 1);
        let r2 = import_file(&conn, &path, Some("label"), &ImportContext::default()).unwrap();
        assert!(r2.duplicate_file);
        assert_eq!(r2.inserted, 0);
    }

    #[test]
    fn test_reimport_updates_existing_rows() {
        let (dir, conn) = test_db();
        let first = write_file(dir.path(), "l1.csv", "Customer ID,Label ID,Label\n1,2,Sale\n");
        import_file(&conn, &first, Some("label"), &ImportContext::default()).unwrap();
        let second = write_file(
            dir.path(),
            "l2.csv",
            "Customer ID,Label ID,Label\n1,2,Clearance\n1,3,New\n",
        );
        let result = import_file(&conn, &second, Some("label"), &ImportContext::default()).unwrap();
        assert_eq!(result.inserted, 1);
        assert_eq!(result.updated, 1);
    }

    #[test]
    fn test_detect_skips_leading_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "c.csv", &format!("\n,,\n{CAMPAIGN_CSV}"));
        assert_eq!(detect(&path), Some(ReportKind::Campaign));
    }

    #[test]
    fn test_only_exact_total_row_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "l.csv",
            "Label,Label ID,Customer ID\nTotal Sale,7,1\nSpring,8,1\nTotal, --, --\n",
        );
        let parsed = parse_report::<Label>(&path, &ImportContext::default()).unwrap();
        let names: Vec<_> = parsed.rows.iter().map(|r| r.label_name.as_deref()).collect();
        assert_eq!(names, vec![Some("Total Sale"), Some("Spring")]);
    }

    #[test]
    fn test_dashed_non_customer_id_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "c.csv",
            "Customer ID,Campaign ID,Day\n1,2024-01-15,2024-01-15\n",
        );
        let err = parse_report::<CampaignPerformance>(&path, &ImportContext::default()).err().unwrap();
        match err {
            AdRowsError::Cell { column, source, .. } => {
                assert_eq!(column, "Campaign ID");
                assert!(matches!(*source, AdRowsError::InvalidValue { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_requested_report_must_match_title() {
        let (dir, conn) = test_db();
        let path = write_file(dir.path(), "c.csv", CAMPAIGN_CSV);
        let err = import_file(&conn, &path, Some("label"), &ImportContext::default()).unwrap_err();
        match err {
            AdRowsError::ReportMismatch { requested, found } => {
                assert_eq!(requested, "LABEL_REPORT");
                assert_eq!(found, "CAMPAIGN_PERFORMANCE_REPORT");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(count_rows(&conn, ReportKind::Label).unwrap(), 0);

        let result = import_file(&conn, &path, Some("campaign"), &ImportContext::default()).unwrap();
        assert_eq!(result.inserted, 2);
    }

    #[test]
    fn test_import_requires_known_report() {
        let (dir, conn) = test_db();
        let path = write_file(dir.path(), "l.csv", "Customer ID,Label ID\n1,2\n");
        let err = import_file(&conn, &path, Some("nope"), &ImportContext::default()).unwrap_err();
        assert!(matches!(err, AdRowsError::UnknownReport(_)));
        let err = import_file(&conn, &path, None, &ImportContext::default()).unwrap_err();
        assert!(matches!(err, AdRowsError::UndetectedReport(_)));
    }
}
