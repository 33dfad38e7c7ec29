use comfy_table::{Cell, Table};
use rusqlite::Connection;

use super::report_kind;
use crate::db::{count_rows, get_connection, init_db, load_rows};
use crate::error::Result;
use crate::models::{ReportRow, RowVisitor};
use crate::settings::db_path;

struct RenderRows<'a> {
    conn: &'a Connection,
    account: Option<i64>,
    limit: usize,
}

impl RowVisitor for RenderRows<'_> {
    type Output = Result<Option<Table>>;

    fn visit<T: ReportRow>(self) -> Result<Option<Table>> {
        let rows = load_rows::<T>(self.conn, self.account, Some(self.limit))?;
        if rows.is_empty() {
            return Ok(None);
        }

        // Columns empty in every shown row are left out.
        let bindings: Vec<_> = T::bindings()
            .into_iter()
            .filter(|b| rows.iter().any(|r| (b.display)(r).is_some()))
            .collect();

        let mut table = Table::new();
        table.set_header(bindings.iter().map(|b| b.header.unwrap_or(b.column)).collect::<Vec<_>>());
        for row in &rows {
            table.add_row(
                bindings
                    .iter()
                    .map(|b| Cell::new((b.display)(row).unwrap_or_default()))
                    .collect::<Vec<_>>(),
            );
        }
        Ok(Some(table))
    }
}

pub fn run(report: &str, account: Option<i64>, limit: usize) -> Result<()> {
    let kind = report_kind(report)?;
    let conn = get_connection(&db_path())?;
    init_db(&conn)?;

    let table = kind.accept(RenderRows {
        conn: &conn,
        account,
        limit,
    })?;
    match table {
        Some(table) => {
            let total = count_rows(&conn, kind)?;
            println!("{} ({total} stored)\n{table}", kind.report_type());
        }
        None => println!("No {} rows stored.", kind.report_type()),
    }
    Ok(())
}
