use bson::oid::ObjectId;
use serde_json::{json, Map, Value};

pub const ID_FIELD: &str = "_id";
pub const OID_KEY: &str = "$oid";

/// Hex string of an identifier written either as a plain string or as an
/// extended-JSON reference (`{"$oid": "..."}`). Validity is not checked.
pub fn id_hex(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) if map.len() == 1 => map.get(OID_KEY).and_then(Value::as_str),
        _ => None,
    }
}

/// Rewrite the filter's `_id` into the store's native ObjectId form
/// (`{"$oid": "<hex>"}`). Values that do not parse are left as given.
pub fn normalize_id_filter(mut filter: Map<String, Value>) -> Map<String, Value> {
    let Some(value) = filter.get(ID_FIELD) else {
        return filter;
    };

    let parsed = id_hex(value).and_then(|hex| ObjectId::parse_str(hex).ok());
    if let Some(oid) = parsed {
        filter.insert(ID_FIELD.to_string(), json!({ OID_KEY: oid.to_hex() }));
    }

    filter
}
