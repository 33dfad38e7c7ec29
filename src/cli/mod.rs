pub mod export;
pub mod import;
pub mod init;
pub mod query;
pub mod reports;
pub mod show;
pub mod status;

use clap::{Parser, Subcommand};

use crate::error::{AdRowsError, Result};
use crate::models::ReportKind;

pub(crate) fn report_kind(key: &str) -> Result<ReportKind> {
    ReportKind::from_key(key)
        .or_else(|| ReportKind::from_report_type(&key.to_ascii_uppercase()))
        .ok_or_else(|| AdRowsError::UnknownReport(key.to_string()))
}

#[derive(Parser)]
#[command(name = "adrows", about = "Import, store and query advertising report rows.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and initialize the database.
    Init {
        /// Path for report data (default: ~/Documents/adrows)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Import a downloaded report CSV file.
    Import {
        /// Path to the report file
        file: String,
        /// Report key (e.g. campaign); detected from the title row when omitted
        #[arg(long)]
        report: Option<String>,
        /// Manager account id stamped on every row
        #[arg(long = "top-account")]
        top_account: Option<i64>,
        /// Account id for files without a Customer ID column
        #[arg(long)]
        account: Option<i64>,
        /// Date range the report was requested for (e.g. LAST_7_DAYS)
        #[arg(long)]
        during: Option<String>,
    },
    /// List supported report types.
    Reports,
    /// Show stored rows of one report type.
    Show {
        /// Report key or report type
        report: String,
        /// Only rows of this account id
        #[arg(long)]
        account: Option<i64>,
        /// Maximum number of rows
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Export stored rows as JSON lines.
    Export {
        /// Report key or report type
        report: String,
        /// Only rows of this account id
        #[arg(long)]
        account: Option<i64>,
        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<String>,
    },
    /// Print the AWQL query that downloads a report type.
    Query {
        /// Report key or report type
        report: String,
        /// Predefined range or YYYYMMDD,YYYYMMDD
        #[arg(long, default_value = "ALL_TIME")]
        during: String,
    },
    /// Show the current database and row counts.
    Status,
}
