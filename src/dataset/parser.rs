//! Dataset Parser
//!
//! Turns the staged CSV dataset into course fields. Every cell is read as
//! text, so columns the source encodes as numbers (a numeric `Country`, say)
//! come through as strings instead of failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::error::{CatalogError, Result};
use crate::store::CourseFields;

const UNIVERSITY: &str = "University";
const CITY: &str = "City";
const COUNTRY: &str = "Country";
const COURSE_NAME: &str = "CourseName";
const COURSE_DESCRIPTION: &str = "CourseDescription";
const START_DATE: &str = "StartDate";
const END_DATE: &str = "EndDate";
const PRICE: &str = "Price";
const CURRENCY: &str = "Currency";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Column positions resolved from the header row.
struct Columns {
    university: usize,
    city: usize,
    country: usize,
    course_name: usize,
    course_description: Option<usize>,
    start_date: usize,
    end_date: usize,
    price: usize,
    currency: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);
        let required = |name: &str| {
            position(name)
                .ok_or_else(|| CatalogError::Load(format!("missing column '{}'", name)))
        };

        Ok(Self {
            university: required(UNIVERSITY)?,
            city: required(CITY)?,
            country: required(COUNTRY)?,
            course_name: required(COURSE_NAME)?,
            course_description: position(COURSE_DESCRIPTION),
            start_date: required(START_DATE)?,
            end_date: required(END_DATE)?,
            price: required(PRICE)?,
            currency: required(CURRENCY)?,
        })
    }
}

/// Parses CSV bytes into course fields, one per data row.
///
/// Fails on the first malformed row, naming its 1-based position.
pub fn parse_courses(data: &[u8]) -> Result<Vec<CourseFields>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let columns = Columns::resolve(reader.headers()?)?;

    let mut courses = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record.map_err(|e| CatalogError::Load(format!("row {}: {}", row, e)))?;
        let course = parse_row(&columns, &record)
            .map_err(|msg| CatalogError::Load(format!("row {}: {}", row, msg)))?;
        courses.push(course);
    }
    Ok(courses)
}

fn parse_row(columns: &Columns, record: &StringRecord) -> std::result::Result<CourseFields, String> {
    let text = |idx: usize| record.get(idx).unwrap_or("").to_string();

    Ok(CourseFields {
        university: text(columns.university),
        city: text(columns.city),
        country: text(columns.country),
        course_name: text(columns.course_name),
        course_description: columns
            .course_description
            .map(text)
            .filter(|s| !s.is_empty()),
        start_date: parse_date(START_DATE, &text(columns.start_date))?,
        end_date: parse_date(END_DATE, &text(columns.end_date))?,
        price: parse_price(&text(columns.price))?,
        currency: text(columns.currency),
    })
}

/// Accepts plain dates in a few common layouts and timestamps (date part kept).
pub(crate) fn parse_date(column: &str, value: &str) -> std::result::Result<NaiveDate, String> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(datetime.date());
        }
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|_| format!("invalid {} '{}'", column, value))
}

fn parse_price(value: &str) -> std::result::Result<f64, String> {
    // Tolerate a leading currency symbol such as "$12.50".
    let numeric = value.trim_start_matches(|c: char| !c.is_ascii_digit() && c != '-' && c != '.');
    match numeric.replace(',', "").parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(price),
        _ => Err(format!("invalid {} '{}'", PRICE, value)),
    }
}
