use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub inserted_id: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
    /// Identifier of the document created by an upsert, if any.
    pub upserted: Option<Value>,
}

impl UpdateOutcome {
    pub fn unmatched() -> Self {
        Self {
            matched: 0,
            modified: 0,
            upserted: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    pub deleted: u64,
}

/// Payload returned by the win/lose lookup for the selected record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinloseSummary {
    pub username: String,
    pub prefix: Option<String>,
    pub currency: String,
    pub bet_amt: f64,
    pub valid_amount: f64,
    pub member_wl: f64,
    pub member_comm: f64,
    pub member_total: f64,
}

impl From<super::SnapshotRecord> for WinloseSummary {
    fn from(record: super::SnapshotRecord) -> Self {
        Self {
            username: record.username,
            prefix: record.prefix,
            currency: record.currency,
            bet_amt: record.bet_amt,
            valid_amount: record.valid_amount,
            member_wl: record.member_wl,
            member_comm: record.member_comm,
            member_total: record.member_total,
        }
    }
}
