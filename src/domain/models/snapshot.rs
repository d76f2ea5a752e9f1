use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One member-level entry inside a snapshot's `data`.
///
/// Decoding is loose: unknown fields are ignored, missing fields fall back to
/// zero or empty, and strings/numbers are accepted interchangeably.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub currency: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub web: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub month: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub bet_amt: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub valid_amount: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub member_wl: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub member_comm: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub member_total: f64,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub prefix: Option<String>,
}

/// The `data` field of a snapshot document: either a single record or an
/// ordered list of records.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SnapshotData {
    Many(Vec<SnapshotRecord>),
    One(SnapshotRecord),
}

impl SnapshotData {
    /// Decode a raw `data` value. Anything that is neither an object nor a
    /// list of objects yields `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(_) => Self::deserialize(value).ok(),
            Value::Array(items) if items.iter().all(Value::is_object) => {
                Self::deserialize(value).ok()
            }
            _ => None,
        }
    }

    /// Flatten into the ordered candidate list.
    pub fn into_candidates(self) -> Vec<SnapshotRecord> {
        match self {
            Self::Many(records) => records,
            Self::One(record) => vec![record],
        }
    }
}

/// A stored snapshot document, viewed through the fields the lookup cares
/// about. Everything else in the document is left untouched in the store.
#[derive(Debug, Clone, Default)]
pub struct SnapshotDocument {
    pub client_name: Option<String>,
    pub data: Option<SnapshotData>,
}

impl SnapshotDocument {
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self {
            client_name: text("client_name"),
            data: value.get("data").and_then(SnapshotData::from_value),
        }
    }

    /// Candidate records in stored order; empty when `data` is absent or
    /// undecodable.
    pub fn candidates(self) -> Vec<SnapshotRecord> {
        self.data
            .map(SnapshotData::into_candidates)
            .unwrap_or_default()
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_text(&Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_text(&Value::deserialize(deserializer)?))
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        // Relaxed extended JSON wraps wide numerics, e.g. {"$numberDecimal": "1.5"}
        Value::Object(map) if map.len() == 1 => map
            .values()
            .next()
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default(),
        _ => 0.0,
    })
}

/// Render a scalar as text. Used for record fields and lookup request fields
/// alike, so `5` and `"5"` are interchangeable.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_single_object_data_yields_one_candidate() {
        let doc = SnapshotDocument::from_value(&json!({
            "client_name": "WEB1",
            "data": {"username": "alice", "currency": "THB", "betAmt": 12.5}
        }));

        let candidates = doc.candidates();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].username, "alice");
        assert_eq!(candidates[0].currency, "THB");
        assert_eq!(candidates[0].bet_amt, 12.5);
        assert_eq!(candidates[0].member_total, 0.0);
        assert!(candidates[0].prefix.is_none());
    }

    #[test]
    fn test_array_data_preserves_order() {
        let doc = SnapshotDocument::from_value(&json!({
            "data": [{"username": "a"}, {"username": "b"}, {"username": "c"}]
        }));

        let names: Vec<_> = doc.candidates().into_iter().map(|r| r.username).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_missing_or_empty_data_has_no_candidates() {
        assert!(SnapshotDocument::from_value(&json!({"client_name": "x"}))
            .candidates()
            .is_empty());
        assert!(SnapshotDocument::from_value(&json!({"data": []}))
            .candidates()
            .is_empty());
        assert!(SnapshotDocument::from_value(&json!({"data": "oops"}))
            .candidates()
            .is_empty());
        assert!(SnapshotDocument::from_value(&json!({"data": [{"username": "a"}, 1]}))
            .candidates()
            .is_empty());
    }

    #[test]
    fn test_loose_field_decoding() {
        let record: SnapshotRecord = serde_json::from_value(json!({
            "username": 42,
            "month": 1,
            "year": "2026",
            "betAmt": "-10.25",
            "validAmount": {"$numberDecimal": "99.5"},
            "memberWl": null,
            "unknown": [1, 2, 3],
            "prefix": "pp"
        }))
        .unwrap();

        assert_eq!(record.username, "42");
        assert_eq!(record.month, "1");
        assert_eq!(record.year, "2026");
        assert_eq!(record.bet_amt, -10.25);
        assert_eq!(record.valid_amount, 99.5);
        assert_eq!(record.member_wl, 0.0);
        assert_eq!(record.prefix.as_deref(), Some("pp"));
    }
}
