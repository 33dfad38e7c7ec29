use std::fs::File;
use std::io::{BufWriter, Write};

use rusqlite::Connection;

use super::report_kind;
use crate::db::{get_connection, init_db, load_rows};
use crate::error::Result;
use crate::models::{ReportRow, RowVisitor};
use crate::settings::db_path;

struct WriteRows<'a, W: Write> {
    conn: &'a Connection,
    account: Option<i64>,
    out: W,
}

impl<W: Write> RowVisitor for WriteRows<'_, W> {
    type Output = Result<usize>;

    fn visit<T: ReportRow>(mut self) -> Result<usize> {
        let rows = load_rows::<T>(self.conn, self.account, None)?;
        for row in &rows {
            serde_json::to_writer(&mut self.out, row)?;
            self.out.write_all(b"\n")?;
        }
        self.out.flush()?;
        Ok(rows.len())
    }
}

/// One JSON object per stored row.
pub fn run(report: &str, account: Option<i64>, output: Option<String>) -> Result<()> {
    let kind = report_kind(report)?;
    let conn = get_connection(&db_path())?;
    init_db(&conn)?;

    match output {
        Some(path) => {
            let out = BufWriter::new(File::create(&path)?);
            let count = kind.accept(WriteRows {
                conn: &conn,
                account,
                out,
            })?;
            eprintln!("Exported {count} rows to {path}");
        }
        None => {
            let stdout = std::io::stdout();
            kind.accept(WriteRows {
                conn: &conn,
                account,
                out: stdout.lock(),
            })?;
        }
    }
    Ok(())
}
