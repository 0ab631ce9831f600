//! Display helpers for user cards.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const NO_EMAIL: &str = "No Email";
pub const NOT_AVAILABLE: &str = "N/A";

/// Native rendering, matching the `en-US` default of `toLocaleDateString`.
#[cfg(not(target_arch = "wasm32"))]
const DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Role badges in server order; blank segments are dropped.
pub fn split_roles(roles: &str) -> Vec<String> {
    roles
        .split(',')
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(str::to_string)
        .collect()
}

/// Date part of an ISO-8601 timestamp in the browser's locale. Blank input
/// yields `None`; unparseable input is shown as-is.
pub fn format_date(raw: &str) -> Option<String> {
    format_date_with(raw, locale_date)
}

fn format_date_with(raw: &str, localize: impl Fn(&str) -> Option<String>) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    Some(localize(trimmed).unwrap_or_else(|| trimmed.to_string()))
}

#[cfg(target_arch = "wasm32")]
fn locale_date(raw: &str) -> Option<String> {
    use chrono::Datelike;
    use wasm_bindgen::JsValue;

    let mut date = js_sys::Date::new(&JsValue::from_str(raw));
    if date.get_time().is_nan() {
        // Engines disagree on the space-separated form; rebuild it from parts.
        let day = parse_date(raw)?;
        date = js_sys::Date::new_with_year_month_day(
            u32::try_from(day.year()).ok()?,
            i32::try_from(day.month0()).ok()?,
            i32::try_from(day.day()).ok()?,
        );
    }

    Some(date.to_locale_date_string("default", &JsValue::UNDEFINED).into())
}

#[cfg(not(target_arch = "wasm32"))]
fn locale_date(raw: &str) -> Option<String> {
    parse_date(raw).map(|date| date.format(DATE_FORMAT).to_string())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

/// Trimmed value, or `placeholder` when missing or blank.
pub fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(placeholder)
        .to_string()
}
