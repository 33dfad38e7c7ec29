use super::report_kind;
use crate::awql::{build_query, DateRange};
use crate::error::Result;
use crate::models::{ReportRow, RowVisitor};

struct Query(DateRange);

impl RowVisitor for Query {
    type Output = Result<String>;

    fn visit<T: ReportRow>(self) -> Result<String> {
        build_query::<T>(&self.0)
    }
}

pub fn run(report: &str, during: &str) -> Result<()> {
    let kind = report_kind(report)?;
    let range: DateRange = during.parse()?;
    println!("{}", kind.accept(Query(range))?);
    Ok(())
}
