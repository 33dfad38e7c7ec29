use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::models::{ReportRow, RowVisitor, ALL_REPORTS};

struct ColumnCount;

impl RowVisitor for ColumnCount {
    type Output = usize;

    fn visit<T: ReportRow>(self) -> usize {
        T::bindings().len()
    }
}

pub fn run() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Key", "Report Type", "Table", "Columns"]);
    for kind in ALL_REPORTS {
        table.add_row(vec![
            Cell::new(kind.key()),
            Cell::new(kind.report_type()),
            Cell::new(kind.table()),
            Cell::new(kind.accept(ColumnCount)),
        ]);
    }
    println!("Reports\n{table}");
    Ok(())
}
