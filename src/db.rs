use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use tracing::debug;

use crate::error::Result;
use crate::models::{ReportKind, ReportRow, RowVisitor, ALL_REPORTS};

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS imports (
    id INTEGER PRIMARY KEY,
    filename TEXT NOT NULL,
    report TEXT NOT NULL,
    import_date TEXT DEFAULT (datetime('now')),
    record_count INTEGER,
    date_range_start TEXT,
    date_range_end TEXT,
    checksum TEXT
);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

struct CreateTable<'a>(&'a Connection);

impl RowVisitor for CreateTable<'_> {
    type Output = Result<()>;

    fn visit<T: ReportRow>(self) -> Result<()> {
        create_table::<T>(self.0)
    }
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    for kind in ALL_REPORTS {
        kind.accept(CreateTable(conn))?;
    }
    Ok(())
}

/// One table per report type, one column per binding. `row_id` is the key.
pub fn create_table<T: ReportRow>(conn: &Connection) -> Result<()> {
    let probe = T::default();
    let columns: Vec<String> = T::bindings()
        .iter()
        .map(|b| {
            if b.column == "row_id" {
                "row_id TEXT PRIMARY KEY".to_string()
            } else {
                format!("{} {}", b.column, (b.sql_type)(&probe))
            }
        })
        .collect();
    let sql = format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
        T::KIND.table(),
        columns.join(",\n    ")
    );
    conn.execute_batch(&sql)?;
    Ok(())
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpsertResult {
    pub inserted: usize,
    pub replaced: usize,
}

/// Store rows by row id. A row whose id is already stored replaces it.
pub fn upsert_rows<T: ReportRow>(conn: &Connection, rows: &[T]) -> Result<UpsertResult> {
    let bindings = T::bindings();
    let table = T::KIND.table();
    let column_list: Vec<&str> = bindings.iter().map(|b| b.column).collect();
    let placeholders: Vec<String> = (1..=bindings.len()).map(|i| format!("?{i}")).collect();

    let tx = conn.unchecked_transaction()?;
    let mut result = UpsertResult::default();
    {
        let mut exists = tx.prepare(&format!("SELECT 1 FROM {table} WHERE row_id = ?1"))?;
        let mut insert = tx.prepare(&format!(
            "INSERT OR REPLACE INTO {table} ({}) VALUES ({})",
            column_list.join(", "),
            placeholders.join(", ")
        ))?;

        for row in rows {
            let row_id = row.report().row_id.clone();
            let found = exists
                .query_row(params![row_id], |_| Ok(()))
                .optional()?
                .is_some();
            let values: Vec<Value> = bindings.iter().map(|b| (b.to_sql)(row)).collect();
            insert.execute(params_from_iter(values))?;
            if found {
                result.replaced += 1;
            } else {
                result.inserted += 1;
            }
        }
    }
    tx.commit()?;

    debug!(
        table = %table,
        inserted = result.inserted,
        replaced = result.replaced,
        "upserted rows"
    );
    Ok(result)
}

/// Stored rows ordered by row id, optionally narrowed to one account.
pub fn load_rows<T: ReportRow>(
    conn: &Connection,
    account_id: Option<i64>,
    limit: Option<usize>,
) -> Result<Vec<T>> {
    let bindings = T::bindings();
    let column_list: Vec<&str> = bindings.iter().map(|b| b.column).collect();
    let mut sql = format!("SELECT {} FROM {}", column_list.join(", "), T::KIND.table());
    if account_id.is_some() {
        sql.push_str(" WHERE account_id = ?1");
    }
    sql.push_str(" ORDER BY row_id");
    if let Some(limit) = limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut query = match account_id {
        Some(id) => stmt.query(params![id])?,
        None => stmt.query([])?,
    };

    let mut rows = Vec::new();
    while let Some(record) = query.next()? {
        let mut row = T::default();
        for (i, binding) in bindings.iter().enumerate() {
            let value: Value = record.get(i)?;
            (binding.from_sql)(&mut row, value)?;
        }
        rows.push(row);
    }
    Ok(rows)
}

pub fn count_rows(conn: &Connection, kind: ReportKind) -> Result<i64> {
    let count = conn.query_row(&format!("SELECT count(*) FROM {}", kind.table()), [], |r| r.get(0))?;
    Ok(count)
}

pub fn is_duplicate_file(conn: &Connection, checksum: &str, report: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT count(*) FROM imports WHERE checksum = ?1 AND report = ?2",
        params![checksum, report],
        |r| r.get(0),
    )?;
    Ok(count > 0)
}

pub struct ImportRecord {
    pub filename: String,
    pub report: String,
    pub record_count: i64,
    pub date_range_start: Option<String>,
    pub date_range_end: Option<String>,
    pub checksum: String,
}

pub fn record_import(conn: &Connection, record: &ImportRecord) -> Result<i64> {
    conn.execute(
        "INSERT INTO imports (filename, report, record_count, date_range_start, date_range_end, checksum)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            record.filename,
            record.report,
            record.record_count,
            record.date_range_start,
            record.date_range_end,
            record.checksum,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub filename: String,
    pub report: String,
    pub import_date: String,
    pub record_count: i64,
}

/// Most recent imports first.
pub fn recent_imports(conn: &Connection, limit: usize) -> Result<Vec<ImportSummary>> {
    let mut stmt = conn.prepare(
        "SELECT filename, report, import_date, COALESCE(record_count, 0)
         FROM imports ORDER BY id DESC LIMIT ?1",
    )?;
    let rows = stmt
        .query_map(params![limit as i64], |r| {
            Ok(ImportSummary {
                filename: r.get(0)?,
                report: r.get(1)?,
                import_date: r.get(2)?,
                record_count: r.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
