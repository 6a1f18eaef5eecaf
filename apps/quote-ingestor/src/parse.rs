//! Conversion of raw provider payloads into canonical records.
//!
//! Parsing is all-or-nothing per symbol: one malformed timestamp or numeric
//! field discards the whole symbol's batch for the run, so a symbol is
//! stored completely or not at all.

use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::StockRecord;
use crate::provider::RawTimeSeries;

/// Exact timestamp layout used by the provider. Entries that do not match
/// are rejected, never leniently parsed.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const FIELD_OPEN: &str = "1. open";
const FIELD_HIGH: &str = "2. high";
const FIELD_LOW: &str = "3. low";
const FIELD_CLOSE: &str = "4. close";
const FIELD_VOLUME: &str = "5. volume";

/// Record parsing failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Timestamp did not match the exact provider layout.
    #[error("invalid timestamp {value:?}")]
    Timestamp {
        /// The offending timestamp string.
        value: String,
    },

    /// Numeric field present but not parsable.
    #[error("invalid value {value:?} for field {field:?} at {timestamp}")]
    Number {
        /// Timestamp of the entry carrying the field.
        timestamp: String,
        /// Field key within the entry.
        field: &'static str,
        /// The offending value, rendered as text.
        value: String,
    },

    /// Entry was not a field object.
    #[error("malformed entry at {timestamp}")]
    Entry {
        /// Timestamp of the malformed entry.
        timestamp: String,
    },
}

/// Convert one symbol's raw series into canonical records.
///
/// Price and volume fields absent from an entry default to zero. Output
/// preserves the provider's entry order, which is not necessarily
/// chronological.
///
/// # Errors
///
/// Returns a [`ParseError`] on the first malformed timestamp, numeric
/// value, or entry shape; nothing from the series survives.
pub fn parse_series(series: &RawTimeSeries) -> Result<Vec<StockRecord>, ParseError> {
    let mut records = Vec::with_capacity(series.entries.len());

    for (timestamp, entry) in &series.entries {
        let parsed = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).map_err(|_| {
            ParseError::Timestamp {
                value: timestamp.clone(),
            }
        })?;

        let fields = entry.as_object().ok_or_else(|| ParseError::Entry {
            timestamp: timestamp.clone(),
        })?;

        records.push(StockRecord {
            symbol: series.symbol.clone(),
            timestamp: parsed,
            open: float_field(timestamp, fields, FIELD_OPEN)?,
            high: float_field(timestamp, fields, FIELD_HIGH)?,
            low: float_field(timestamp, fields, FIELD_LOW)?,
            close: float_field(timestamp, fields, FIELD_CLOSE)?,
            volume: int_field(timestamp, fields, FIELD_VOLUME)?,
        });
    }

    Ok(records)
}

/// Coerce a price field to `f64`, defaulting to zero when absent.
fn float_field(
    timestamp: &str,
    fields: &Map<String, Value>,
    field: &'static str,
) -> Result<f64, ParseError> {
    match fields.get(field) {
        None => Ok(0.0),
        Some(Value::String(raw)) => raw.trim().parse().map_err(|_| ParseError::Number {
            timestamp: timestamp.to_string(),
            field,
            value: raw.clone(),
        }),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| ParseError::Number {
            timestamp: timestamp.to_string(),
            field,
            value: n.to_string(),
        }),
        Some(other) => Err(ParseError::Number {
            timestamp: timestamp.to_string(),
            field,
            value: other.to_string(),
        }),
    }
}

/// Coerce a volume field to `i64`, defaulting to zero when absent.
fn int_field(
    timestamp: &str,
    fields: &Map<String, Value>,
    field: &'static str,
) -> Result<i64, ParseError> {
    match fields.get(field) {
        None => Ok(0),
        Some(Value::String(raw)) => raw.trim().parse().map_err(|_| ParseError::Number {
            timestamp: timestamp.to_string(),
            field,
            value: raw.clone(),
        }),
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| ParseError::Number {
            timestamp: timestamp.to_string(),
            field,
            value: n.to_string(),
        }),
        Some(other) => Err(ParseError::Number {
            timestamp: timestamp.to_string(),
            field,
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series_from(value: serde_json::Value) -> RawTimeSeries {
        let entries = match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        };
        RawTimeSeries {
            symbol: "AAPL".to_string(),
            entries,
        }
    }

    fn hour(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn parses_well_formed_entries() {
        let series = series_from(serde_json::json!({
            "2026-08-06 15:00:00": {
                "1. open": "210.50",
                "2. high": "212.00",
                "3. low": "209.75",
                "4. close": "211.30",
                "5. volume": "1043900"
            },
            "2026-08-06 16:00:00": {
                "1. open": "211.30",
                "2. high": "211.90",
                "3. low": "210.10",
                "4. close": "210.55",
                "5. volume": "988100"
            }
        }));

        let records = parse_series(&series).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].symbol, "AAPL");
        assert_eq!(records[0].timestamp, hour(6, 15));
        assert_eq!(records[0].open, 210.50);
        assert_eq!(records[0].volume, 1_043_900);
        assert_eq!(records[1].close, 210.55);
    }

    #[test]
    fn preserves_source_order() {
        // Deliberately non-chronological source order.
        let series = series_from(serde_json::json!({
            "2026-08-06 16:00:00": { "1. open": "2.0" },
            "2026-08-06 15:00:00": { "1. open": "1.0" }
        }));

        let records = parse_series(&series).unwrap();
        assert_eq!(records[0].timestamp, hour(6, 16));
        assert_eq!(records[1].timestamp, hour(6, 15));
    }

    #[test]
    fn absent_fields_default_to_zero() {
        let series = series_from(serde_json::json!({
            "2026-08-06 15:00:00": { "4. close": "211.30" }
        }));

        let records = parse_series(&series).unwrap();
        assert_eq!(records[0].open, 0.0);
        assert_eq!(records[0].high, 0.0);
        assert_eq!(records[0].low, 0.0);
        assert_eq!(records[0].close, 211.30);
        assert_eq!(records[0].volume, 0);
    }

    #[test]
    fn bad_timestamp_discards_whole_series() {
        let series = series_from(serde_json::json!({
            "2026-08-06 15:00:00": { "1. open": "210.50" },
            "08/06/2026 16:00": { "1. open": "211.30" }
        }));

        let err = parse_series(&series).unwrap_err();
        assert!(matches!(err, ParseError::Timestamp { .. }));
    }

    #[test]
    fn bad_number_discards_whole_series() {
        let series = series_from(serde_json::json!({
            "2026-08-06 15:00:00": { "1. open": "210.50" },
            "2026-08-06 16:00:00": { "1. open": "not-a-price" }
        }));

        let err = parse_series(&series).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Number {
                field: "1. open",
                ..
            }
        ));
    }

    #[test]
    fn non_object_entry_is_rejected() {
        let series = series_from(serde_json::json!({
            "2026-08-06 15:00:00": "not-an-object"
        }));

        let err = parse_series(&series).unwrap_err();
        assert!(matches!(err, ParseError::Entry { .. }));
    }

    #[test]
    fn date_only_timestamp_is_rejected() {
        let series = series_from(serde_json::json!({
            "2026-08-06": { "1. open": "210.50" }
        }));

        assert!(parse_series(&series).is_err());
    }

    #[test]
    fn numeric_json_values_are_accepted() {
        let series = series_from(serde_json::json!({
            "2026-08-06 15:00:00": { "1. open": 210.5, "5. volume": 1200 }
        }));

        let records = parse_series(&series).unwrap();
        assert_eq!(records[0].open, 210.5);
        assert_eq!(records[0].volume, 1200);
    }
}
