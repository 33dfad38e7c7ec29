use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rusqlite::types::Value;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::error::{AdRowsError, Result};
use crate::fmt::{format_percent, format_readable, is_null_cell, micros_to_units, money, parse_decimal};

// ---------------------------------------------------------------------------
// Field value types
// ---------------------------------------------------------------------------

/// A value that can sit in a report row field.
///
/// Every row field is an `Option<F>`; a null report cell becomes `None`.
pub trait FieldType: Sized {
    const SQL_TYPE: &'static str;

    fn parse_cell(raw: &str) -> Result<Option<Self>>;
    fn to_sql(&self) -> Value;
    fn from_sql(value: Value) -> Result<Self>;
    /// Rendering for terminal tables.
    fn display(&self) -> String;
}

fn customer_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{3}-\d{3}-\d{4}$").expect("valid regex"))
}

impl FieldType for i64 {
    const SQL_TYPE: &'static str = "INTEGER";

    fn parse_cell(raw: &str) -> Result<Option<Self>> {
        if is_null_cell(raw) {
            return Ok(None);
        }
        let mut s = raw.trim().replace(',', "");
        // customer ids are displayed as 123-456-7890
        if customer_id_regex().is_match(&s) {
            s.retain(|c| c != '-');
        }
        s.parse()
            .map(Some)
            .map_err(|_| AdRowsError::invalid(raw, "an integer"))
    }

    fn to_sql(&self) -> Value {
        Value::Integer(*self)
    }

    fn from_sql(value: Value) -> Result<Self> {
        match value {
            Value::Integer(i) => Ok(i),
            Value::Text(s) => s.parse().map_err(|_| AdRowsError::invalid(&s, "an integer")),
            other => Err(AdRowsError::invalid(&format!("{other:?}"), "an integer")),
        }
    }

    fn display(&self) -> String {
        self.to_string()
    }
}

impl FieldType for String {
    const SQL_TYPE: &'static str = "TEXT";

    fn parse_cell(raw: &str) -> Result<Option<Self>> {
        if is_null_cell(raw) {
            return Ok(None);
        }
        Ok(Some(raw.trim().to_string()))
    }

    fn to_sql(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_sql(value: Value) -> Result<Self> {
        match value {
            Value::Text(s) => Ok(s),
            Value::Integer(i) => Ok(i.to_string()),
            Value::Real(f) => Ok(f.to_string()),
            other => Err(AdRowsError::invalid(&format!("{other:?}"), "text")),
        }
    }

    fn display(&self) -> String {
        self.clone()
    }
}

impl FieldType for bool {
    const SQL_TYPE: &'static str = "INTEGER";

    fn parse_cell(raw: &str) -> Result<Option<Self>> {
        if is_null_cell(raw) {
            return Ok(None);
        }
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" => Ok(Some(false)),
            _ => Err(AdRowsError::invalid(raw, "true or false")),
        }
    }

    fn to_sql(&self) -> Value {
        Value::Integer(i64::from(*self))
    }

    fn from_sql(value: Value) -> Result<Self> {
        match value {
            Value::Integer(i) => Ok(i != 0),
            other => Err(AdRowsError::invalid(&format!("{other:?}"), "a boolean")),
        }
    }

    fn display(&self) -> String {
        self.to_string()
    }
}

// ---------------------------------------------------------------------------
// Decimal newtypes
// ---------------------------------------------------------------------------

fn decimal_from_sql(value: Value) -> Result<Decimal> {
    match value {
        Value::Text(s) => Decimal::from_str(&s).map_err(|_| AdRowsError::invalid(&s, "a decimal number")),
        Value::Integer(i) => Ok(Decimal::from(i)),
        other => Err(AdRowsError::invalid(&format!("{other:?}"), "a decimal number")),
    }
}

macro_rules! decimal_field {
    ($name:ident) => {
        impl From<Decimal> for $name {
            fn from(value: Decimal) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = AdRowsError;

            fn from_str(s: &str) -> Result<Self> {
                parse_decimal(s)?
                    .map(Self)
                    .ok_or_else(|| AdRowsError::invalid(s, "a decimal number"))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }
    };
}

/// A plain decimal quantity such as an average position or conversion count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Amount(pub Decimal);

/// A currency amount in account units. Report cells carry micros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Money(pub Decimal);

/// A ratio expressed in percent: `Percent(12.5)` is `12.50%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Percent(pub Decimal);

decimal_field!(Amount);
decimal_field!(Money);
decimal_field!(Percent);

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_readable(self.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_readable(self.0))
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_percent(self.0))
    }
}

impl FieldType for Amount {
    const SQL_TYPE: &'static str = "TEXT";

    fn parse_cell(raw: &str) -> Result<Option<Self>> {
        Ok(parse_decimal(raw)?.map(Self))
    }

    fn to_sql(&self) -> Value {
        Value::Text(self.0.normalize().to_string())
    }

    fn from_sql(value: Value) -> Result<Self> {
        decimal_from_sql(value).map(Self)
    }

    fn display(&self) -> String {
        self.to_string()
    }
}

impl FieldType for Money {
    const SQL_TYPE: &'static str = "TEXT";

    /// Integer cells are micros; a cell with a decimal point is already in
    /// account units.
    fn parse_cell(raw: &str) -> Result<Option<Self>> {
        let Some(value) = parse_decimal(raw)? else {
            return Ok(None);
        };
        if raw.contains('.') {
            Ok(Some(Self(value)))
        } else {
            Ok(Some(Self(micros_to_units(value))))
        }
    }

    fn to_sql(&self) -> Value {
        Value::Text(self.0.normalize().to_string())
    }

    fn from_sql(value: Value) -> Result<Self> {
        decimal_from_sql(value).map(Self)
    }

    fn display(&self) -> String {
        money(self.0)
    }
}

impl FieldType for Percent {
    const SQL_TYPE: &'static str = "TEXT";

    fn parse_cell(raw: &str) -> Result<Option<Self>> {
        Ok(parse_decimal(raw)?.map(Self))
    }

    fn to_sql(&self) -> Value {
        Value::Text(self.0.normalize().to_string())
    }

    fn from_sql(value: Value) -> Result<Self> {
        decimal_from_sql(value).map(Self)
    }

    fn display(&self) -> String {
        self.to_string()
    }
}

// ---------------------------------------------------------------------------
// Bindings
// ---------------------------------------------------------------------------

/// One column of a report row type: where it comes from in a report file,
/// where it goes in storage, and how to move a value between the two.
pub struct Binding<T> {
    /// Column title in downloaded report files. `None` for columns filled
    /// from the import context.
    pub header: Option<&'static str>,
    /// Report field name, used in AWQL and accepted as a header alias.
    pub field: Option<&'static str>,
    pub column: &'static str,
    pub parse: fn(&mut T, &str) -> Result<()>,
    pub to_sql: fn(&T) -> Value,
    pub from_sql: fn(&mut T, Value) -> Result<()>,
    pub display: fn(&T) -> Option<String>,
    pub sql_type: fn(&T) -> &'static str,
}

impl<T> Binding<T> {
    pub fn matches_header(&self, name: &str) -> bool {
        let name = name.trim();
        self.header == Some(name) || self.field == Some(name)
    }
}

pub fn parse_into<F: FieldType>(slot: &mut Option<F>, raw: &str) -> Result<()> {
    *slot = F::parse_cell(raw)?;
    Ok(())
}

pub fn to_sql<F: FieldType>(slot: &Option<F>) -> Value {
    slot.as_ref().map_or(Value::Null, F::to_sql)
}

pub fn from_sql<F: FieldType>(slot: &mut Option<F>, value: Value) -> Result<()> {
    *slot = match value {
        Value::Null => None,
        value => Some(F::from_sql(value)?),
    };
    Ok(())
}

pub fn display<F: FieldType>(slot: &Option<F>) -> Option<String> {
    slot.as_ref().map(F::display)
}

pub fn sql_type<F: FieldType>(_slot: &Option<F>) -> &'static str {
    F::SQL_TYPE
}

/// Build a [`Binding`] for a field of `Self`.
///
/// `bind!("Campaign ID", "CampaignId" => campaign_id)` binds a top-level
/// field; `bind!("Day", "Date" => day: date.day)` binds a nested one;
/// `bind!(stored date_start: report.date_start)` is a storage-only column.
macro_rules! bind {
    ($header:literal, $field:literal => $column:ident : $($path:ident).+) => {
        $crate::fields::bind!(@make Some($header), Some($field), $column, $($path).+)
    };
    ($header:literal, $field:literal => $column:ident) => {
        $crate::fields::bind!(@make Some($header), Some($field), $column, $column)
    };
    (stored $column:ident : $($path:ident).+) => {
        $crate::fields::bind!(@make None, None, $column, $($path).+)
    };
    (@make $header:expr, $field:expr, $column:ident, $($path:ident).+) => {
        $crate::fields::Binding::<Self> {
            header: $header,
            field: $field,
            column: stringify!($column),
            parse: |row: &mut Self, raw: &str| $crate::fields::parse_into(&mut row.$($path).+, raw),
            to_sql: |row: &Self| $crate::fields::to_sql(&row.$($path).+),
            from_sql: |row: &mut Self, value: ::rusqlite::types::Value| {
                $crate::fields::from_sql(&mut row.$($path).+, value)
            },
            display: |row: &Self| $crate::fields::display(&row.$($path).+),
            sql_type: |row: &Self| $crate::fields::sql_type(&row.$($path).+),
        }
    };
}

pub(crate) use bind;
