use colored::Colorize;

use crate::db::{count_rows, get_connection, recent_imports};
use crate::error::Result;
use crate::models::ALL_REPORTS;
use crate::settings::{load_settings, DB_FILE};

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let db_path = data_dir.join(DB_FILE);

    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if !db_path.exists() {
        println!();
        println!("Database not found. Run `adrows init` to set up.");
        return Ok(());
    }

    let conn = get_connection(&db_path)?;
    println!();
    let mut total = 0;
    for kind in ALL_REPORTS {
        let count = count_rows(&conn, *kind)?;
        if count > 0 {
            println!("{:<24} {count}", kind.key());
            total += count;
        }
    }
    if total == 0 {
        println!("{}", "No report rows stored.".dimmed());
    }

    let imports: i64 = conn.query_row("SELECT count(*) FROM imports", [], |r| r.get(0))?;
    println!();
    println!("Imports:    {imports}");
    for import in recent_imports(&conn, 5)? {
        println!(
            "  {}  {:<20} {:>6} rows  {}",
            import.import_date.dimmed(),
            import.report,
            import.record_count,
            import.filename
        );
    }
    Ok(())
}
