//! Data models for the Dation service

use crate::error::{DationError, Result};
use chrono::{DateTime, FixedOffset};
use dationsoap::{Mapping, Value};

/// Driving school, as returned by `WS_Rijschool_Info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrivingSchoolInfo {
    pub id: i64,
    pub name: String,
    /// Endpoint of the school's own SOAP service (also its XML namespace)
    pub web_service_url: String,
}

/// Student session, as returned by `WS_Rijschool_Login_Leerling`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginInfo {
    pub session_id: String,
    pub student_id: i64,
}

/// Course package a student is enrolled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseInfo {
    pub id: i64,
    pub type_name: String,
    pub category: String,
}

/// Planned agenda item (lesson, exam...) of a course
#[derive(Debug, Clone, PartialEq)]
pub struct AgendaItem {
    pub id: i64,
    pub name: String,
    pub instructor: String,
    pub start_time: DateTime<FixedOffset>,
    pub stop_time: DateTime<FixedOffset>,
    pub comment: String,
    pub course_info: CourseInfo,
}

/// Postal address of a driving school
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    /// House number including its addition (e.g. "12a")
    pub housenumber: String,
    pub zipcode: String,
    pub city: String,
}

impl Address {
    /// Single-line form: `<street> <housenumber>, <zipcode> <city>`
    pub fn one_line(&self) -> String {
        format!(
            "{} {}, {} {}",
            self.street, self.housenumber, self.zipcode, self.city
        )
    }
}

/// Everything needed to render a student's calendar
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub address: Address,
    pub items: Vec<AgendaItem>,
}

// ============================================================================
// Typed access to extracted values
// ============================================================================

pub(crate) fn value<'a>(map: &'a Mapping, field: &str) -> Result<&'a Value> {
    map.get(field)
        .ok_or_else(|| DationError::MissingValue(field.to_string()))
}

pub(crate) fn text(map: &Mapping, field: &str) -> Result<String> {
    let v = value(map, field)?;
    v.as_text()
        .map(str::to_string)
        .ok_or_else(|| DationError::unexpected_value(field, "text", v.kind_name()))
}

/// Text or integer rendered as text; some numbers come back as either
pub(crate) fn display(map: &Mapping, field: &str) -> Result<String> {
    match value(map, field)? {
        Value::Text(s) => Ok(s.clone()),
        Value::Integer(n) => Ok(n.to_string()),
        other => Err(DationError::unexpected_value(
            field,
            "text or integer",
            other.kind_name(),
        )),
    }
}

pub(crate) fn integer(map: &Mapping, field: &str) -> Result<i64> {
    let v = value(map, field)?;
    v.as_integer()
        .ok_or_else(|| DationError::unexpected_value(field, "integer", v.kind_name()))
}

pub(crate) fn timestamp(map: &Mapping, field: &str) -> Result<DateTime<FixedOffset>> {
    let v = value(map, field)?;
    v.as_timestamp()
        .copied()
        .ok_or_else(|| DationError::unexpected_value(field, "timestamp", v.kind_name()))
}

pub(crate) fn mapping<'a>(map: &'a Mapping, field: &str) -> Result<&'a Mapping> {
    let v = value(map, field)?;
    v.as_mapping()
        .ok_or_else(|| DationError::unexpected_value(field, "mapping", v.kind_name()))
}

pub(crate) fn sequence<'a>(map: &'a Mapping, field: &str) -> Result<&'a [Mapping]> {
    let v = value(map, field)?;
    v.as_sequence()
        .ok_or_else(|| DationError::unexpected_value(field, "sequence", v.kind_name()))
}
