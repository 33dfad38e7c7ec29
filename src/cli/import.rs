use std::path::PathBuf;

use colored::Colorize;

use crate::awql::DateRange;
use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::importer::{import_file, ImportContext};
use crate::settings::{db_path, load_settings};

pub fn run(
    file: &str,
    report: Option<&str>,
    top_account: Option<i64>,
    account: Option<i64>,
    during: Option<&str>,
) -> Result<()> {
    let settings = load_settings();
    let date_range_type = during
        .map(|d| d.parse::<DateRange>())
        .transpose()?
        .map(|r| r.range_type().to_string());
    let ctx = ImportContext {
        top_account_id: top_account.or(settings.top_account_id),
        account_id: account,
        date_range_type,
        strict_headers: settings.strict_headers,
    };

    let conn = get_connection(&db_path())?;
    init_db(&conn)?;

    let result = import_file(&conn, &PathBuf::from(file), report, &ctx)?;
    if result.duplicate_file {
        println!("This file has already been imported (duplicate checksum).");
        return Ok(());
    }

    println!(
        "{}: {} inserted, {} updated",
        result.kind.report_type(),
        result.inserted,
        result.updated
    );
    if !result.unknown_columns.is_empty() {
        println!(
            "{}",
            format!("Ignored columns: {}", result.unknown_columns.join(", ")).yellow()
        );
    }
    if result.collisions > 0 {
        println!(
            "{}",
            format!("{} rows shared a row id with an earlier row and replaced it", result.collisions).yellow()
        );
    }
    if result.incomplete_ids > 0 {
        println!(
            "{}",
            format!("{} rows have ids built from incomplete key columns", result.incomplete_ids).yellow()
        );
    }
    Ok(())
}
