//! Built-in plain processors.
//!
//! Text processors work on strings and recurse into lists; other values
//! pass through untouched. Conversion processors treat an empty string as
//! "no value" and return null.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::ProcessorRegistry;
use crate::value::Value;

/// Date formats accepted by the `date` processor, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y", "%Y%m%d"];

/// Date-time formats accepted by the `date` processor after RFC 3339.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

pub(super) fn register_builtins(registry: &mut ProcessorRegistry) {
    registry.register("trim", |v| Ok(map_text(v, &|s: &str| s.trim().to_string())));
    registry.register("uppercase", |v| Ok(map_text(v, &str::to_uppercase)));
    registry.register("lowercase", |v| Ok(map_text(v, &str::to_lowercase)));
    registry.register("collapse_whitespace", |v| {
        Ok(map_text(v, &|s: &str| s.split_whitespace().collect::<Vec<_>>().join(" ")))
    });
    registry.register("int", to_int);
    registry.register("float", to_float);
    registry.register("bool", to_bool);
    registry.register("date", to_date);
    registry.register("null_if_empty", |v| {
        Ok(if v.is_blank() { Value::Null } else { v })
    });
    registry.register("text", |v| Ok(Value::String(v.to_text())));
}

/// Apply a string function to a string, or to every string in a list.
fn map_text(value: Value, f: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(f(&s)),
        Value::List(items) => Value::List(items.into_iter().map(|v| map_text(v, f)).collect()),
        other => other,
    }
}

/// Trimmed text of a scalar, `None` when it is empty. Errors on non-scalars.
fn scalar_text(value: &Value, target: &str) -> Result<Option<String>, String> {
    if !value.is_scalar() {
        return Err(format!("cannot convert {} to {target}", value.type_name()));
    }
    let text = value.to_text();
    let text = text.trim();
    Ok((!text.is_empty()).then(|| text.to_string()))
}

fn to_int(value: Value) -> Result<Value, String> {
    if let Some(i) = value.as_int() {
        return Ok(Value::Int(i));
    }
    match value {
        Value::Bool(b) => Ok(Value::Int(i64::from(b))),
        other => match scalar_text(&other, "integer")? {
            None => Ok(Value::Null),
            Some(text) => text
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| format!("cannot convert '{text}' to integer")),
        },
    }
}

fn to_float(value: Value) -> Result<Value, String> {
    if let Some(f) = value.as_float() {
        return Ok(Value::Float(f));
    }
    match scalar_text(&value, "float")? {
        None => Ok(Value::Null),
        Some(text) => text
            .replace(',', ".")
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| format!("cannot convert '{text}' to float")),
    }
}

fn to_bool(value: Value) -> Result<Value, String> {
    if let Some(b) = value.as_bool() {
        return Ok(Value::Bool(b));
    }
    match value {
        Value::Int(i) => Ok(Value::Bool(i != 0)),
        other => match scalar_text(&other, "boolean")? {
            None => Ok(Value::Bool(false)),
            Some(text) => match text.to_lowercase().as_str() {
                "1" | "true" | "yes" | "y" | "on" | "ja" | "j" => Ok(Value::Bool(true)),
                "0" | "false" | "no" | "n" | "off" | "nee" => Ok(Value::Bool(false)),
                _ => Err(format!("cannot convert '{text}' to boolean")),
            },
        },
    }
}

fn to_date(value: Value) -> Result<Value, String> {
    let Some(text) = scalar_text(&value, "date")? else {
        return Ok(Value::Null);
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&text) {
        return Ok(Value::String(dt.date_naive().format("%Y-%m-%d").to_string()));
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&text, format) {
            return Ok(Value::String(dt.date().format("%Y-%m-%d").to_string()));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&text, format) {
            return Ok(Value::String(date.format("%Y-%m-%d").to_string()));
        }
    }

    Err(format!("cannot parse '{text}' as a date"))
}
