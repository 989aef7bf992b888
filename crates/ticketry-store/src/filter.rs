//! Transaction filtering API for selective iteration.

use crate::error::StoreError;
use crate::traits::StoreReader;
use crate::TxJson;
use ticketry_canonical::{Digest, Identity, Timestamp};

/// Trait for filtering transaction entries during iteration.
pub trait TxFilter {
    /// Returns true if the entry matches the filter criteria.
    fn matches(&self, entry: &TxJson) -> bool;
}

impl<F: TxFilter + ?Sized> TxFilter for Box<F> {
    fn matches(&self, entry: &TxJson) -> bool {
        (**self).matches(entry)
    }
}

/// Filter by call kind (e.g. `"add_venue"`, `"login"`).
#[derive(Debug, Clone)]
pub struct CallKindFilter {
    /// Call kind to match.
    pub kind: String,
}

impl TxFilter for CallKindFilter {
    fn matches(&self, entry: &TxJson) -> bool {
        entry
            .get("call")
            .and_then(|call| call.get("call"))
            .and_then(|v| v.as_str())
            .map(|s| s == self.kind)
            .unwrap_or(false)
    }
}

/// Filter by caller identity.
#[derive(Debug, Clone)]
pub struct CallerFilter {
    /// Caller to match.
    pub caller: Identity,
}

impl TxFilter for CallerFilter {
    fn matches(&self, entry: &TxJson) -> bool {
        entry
            .get("caller")
            .and_then(|v| v.as_str())
            .and_then(|s| Identity::parse(s).ok())
            .map(|caller| caller == self.caller)
            .unwrap_or(false)
    }
}

/// Filter by height range.
#[derive(Debug, Clone, Default)]
pub struct HeightRangeFilter {
    /// Lowest height to include (inclusive).
    pub from: Option<u64>,
    /// Highest height to include (inclusive).
    pub to: Option<u64>,
}

impl TxFilter for HeightRangeFilter {
    fn matches(&self, entry: &TxJson) -> bool {
        let Some(height) = entry.get("height").and_then(|v| v.as_u64()) else {
            return false;
        };
        self.from.map_or(true, |from| height >= from) && self.to.map_or(true, |to| height <= to)
    }
}

/// Filter by recording time.
#[derive(Debug, Clone, Default)]
pub struct TimeRangeFilter {
    /// Include entries recorded at or after this timestamp.
    pub after: Option<Timestamp>,
    /// Include entries recorded at or before this timestamp.
    pub before: Option<Timestamp>,
}

impl TxFilter for TimeRangeFilter {
    fn matches(&self, entry: &TxJson) -> bool {
        let Some(recorded_at) = entry.get("recorded_at").and_then(|v| v.as_str()) else {
            return false;
        };

        if let Some(ref after) = self.after {
            if recorded_at < after.as_ref() {
                return false;
            }
        }
        if let Some(ref before) = self.before {
            if recorded_at > before.as_ref() {
                return false;
            }
        }
        true
    }
}

/// Filter by transaction ID (exact match).
#[derive(Debug, Clone)]
pub struct TxIdFilter {
    /// Transaction ID to match.
    pub tx_id: Digest,
}

impl TxFilter for TxIdFilter {
    fn matches(&self, entry: &TxJson) -> bool {
        entry
            .get("tx_id")
            .and_then(|v| serde_json::from_value::<Digest>(v.clone()).ok())
            .map(|tx_id| tx_id == self.tx_id)
            .unwrap_or(false)
    }
}

/// Composite filter: all filters must match (AND).
pub struct AndFilter {
    /// Filters to combine with AND logic.
    pub filters: Vec<Box<dyn TxFilter>>,
}

impl TxFilter for AndFilter {
    fn matches(&self, entry: &TxJson) -> bool {
        self.filters.iter().all(|f| f.matches(entry))
    }
}

/// Composite filter: any filter must match (OR).
pub struct OrFilter {
    /// Filters to combine with OR logic.
    pub filters: Vec<Box<dyn TxFilter>>,
}

impl TxFilter for OrFilter {
    fn matches(&self, entry: &TxJson) -> bool {
        self.filters.iter().any(|f| f.matches(entry))
    }
}

/// Reader that filters entries from an underlying reader.
pub struct FilteredReader<R: StoreReader, F: TxFilter> {
    reader: R,
    filter: F,
}

impl<R: StoreReader, F: TxFilter> FilteredReader<R, F> {
    /// Creates a new filtered reader.
    pub fn new(reader: R, filter: F) -> Self {
        Self { reader, filter }
    }
}

impl<R: StoreReader, F: TxFilter> StoreReader for FilteredReader<R, F> {
    fn read_next(&mut self) -> Result<Option<TxJson>, StoreError> {
        loop {
            match self.reader.read_next()? {
                None => return Ok(None),
                Some(entry) if self.filter.matches(&entry) => return Ok(Some(entry)),
                Some(_) => continue,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(height: u64, kind: &str, recorded_at: &str) -> TxJson {
        json!({
            "height": height,
            "caller": "0x0A0A0A0A0A0A0A0A0A0A0A0A0A0A0A0A0A0A0A0A",
            "recorded_at": recorded_at,
            "call": {"call": kind}
        })
    }

    #[test]
    fn caller_filter_ignores_case() {
        let filter = CallerFilter {
            caller: Identity::from_bytes([0x0a; 20]),
        };
        assert!(filter.matches(&entry(1, "login", "2024-01-01T00:00:00Z")));
    }

    #[test]
    fn height_range_is_inclusive() {
        let filter = HeightRangeFilter {
            from: Some(2),
            to: Some(3),
        };
        assert!(!filter.matches(&entry(1, "login", "2024-01-01T00:00:00Z")));
        assert!(filter.matches(&entry(2, "login", "2024-01-01T00:00:00Z")));
        assert!(filter.matches(&entry(3, "login", "2024-01-01T00:00:00Z")));
        assert!(!filter.matches(&entry(4, "login", "2024-01-01T00:00:00Z")));
    }

    #[test]
    fn combinators() {
        let and = AndFilter {
            filters: vec![
                Box::new(CallKindFilter {
                    kind: "add_venue".into(),
                }),
                Box::new(TimeRangeFilter {
                    after: Some(Timestamp::parse("2024-06-01T00:00:00Z").unwrap()),
                    before: None,
                }),
            ],
        };
        assert!(and.matches(&entry(1, "add_venue", "2024-07-01T00:00:00Z")));
        assert!(!and.matches(&entry(1, "add_venue", "2024-05-01T00:00:00Z")));

        let or = OrFilter {
            filters: vec![
                Box::new(CallKindFilter {
                    kind: "add_venue".into(),
                }),
                Box::new(CallKindFilter {
                    kind: "remove_venue".into(),
                }),
            ],
        };
        assert!(or.matches(&entry(1, "remove_venue", "2024-05-01T00:00:00Z")));
        assert!(!or.matches(&entry(1, "login", "2024-05-01T00:00:00Z")));
    }
}
