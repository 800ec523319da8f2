//! Daily ridership rows.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One day of line-level boardings, keyed by ridership column
/// (`rail_lrt_kj`, `rail_monorail`, ...).
///
/// The published data comes from CSV, so counts may be numbers or numeric
/// strings; anything unparseable reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RidershipRecord {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(flatten)]
    pub columns: HashMap<String, Value>,
}

impl RidershipRecord {
    /// Builder-style column setter.
    pub fn with_column(mut self, column: impl Into<String>, daily: u64) -> Self {
        self.columns.insert(column.into(), Value::from(daily));
        self
    }

    /// Daily boardings for a column, truncated to whole passengers.
    pub fn daily(&self, column: &str) -> u64 {
        let value = match self.columns.get(column) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match value {
            Some(v) if v.is_finite() && v > 0.0 => v.trunc() as u64,
            _ => 0,
        }
    }

    /// Built-in figures used when no ridership file is available.
    pub fn fallback() -> Self {
        Self {
            date: None,
            columns: HashMap::new(),
        }
        .with_column("rail_lrt_ampang", 50_000)
        .with_column("rail_mrt_kajang", 80_000)
        .with_column("rail_lrt_kj", 60_000)
        .with_column("rail_monorail", 30_000)
        .with_column("rail_mrt_pjy", 70_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_csv_style_row() {
        let row: RidershipRecord = serde_json::from_str(
            r#"{"date": "2025-06-30", "rail_lrt_kj": "245112", "rail_monorail": 52010.7, "bus_rkl": ""}"#,
        )
        .unwrap();

        assert_eq!(row.date.as_deref(), Some("2025-06-30"));
        assert_eq!(row.daily("rail_lrt_kj"), 245_112);
        assert_eq!(row.daily("rail_monorail"), 52_010);
        assert_eq!(row.daily("bus_rkl"), 0);
        assert_eq!(row.daily("rail_ets"), 0);
    }

    #[test]
    fn junk_reads_as_zero() {
        let row: RidershipRecord =
            serde_json::from_str(r#"{"a": "n/a", "b": null, "c": -5, "d": true}"#).unwrap();
        for column in ["a", "b", "c", "d"] {
            assert_eq!(row.daily(column), 0, "{column}");
        }
    }

    #[test]
    fn fallback_row() {
        let row = RidershipRecord::fallback();
        assert_eq!(row.daily("rail_lrt_ampang"), 50_000);
        assert_eq!(row.daily("rail_mrt_kajang"), 80_000);
        assert_eq!(row.daily("rail_lrt_kj"), 60_000);
        assert_eq!(row.daily("rail_monorail"), 30_000);
        assert_eq!(row.daily("rail_mrt_pjy"), 70_000);
    }
}
