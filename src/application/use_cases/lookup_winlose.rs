use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use super::timeout::bounded;
use crate::application::SnapshotStore;
use crate::domain::{
    build_lookup_filter, resolve_record, DomainError, LookupRequest, SnapshotDocument,
    WinloseSummary,
};

/// Finds the best-matching snapshot record for a win/lose lookup.
pub struct LookupWinloseUseCase {
    store: Arc<dyn SnapshotStore>,
    timeout: Duration,
}

impl LookupWinloseUseCase {
    pub fn new(store: Arc<dyn SnapshotStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub async fn execute(&self, request: &LookupRequest) -> Result<WinloseSummary, DomainError> {
        let filter = build_lookup_filter(request);
        debug!("Lookup filter: {}", filter);

        let document = bounded("find_one", self.timeout, self.store.find_one(&filter))
            .await?
            .ok_or_else(|| DomainError::not_found("Record not found"))?;

        let document = SnapshotDocument::from_value(&document);
        if let Some(client) = document.client_name.as_deref() {
            debug!("Matched snapshot for client {}", client);
        }

        let record = resolve_record(document.candidates(), request)?;
        info!(
            username = %record.username,
            currency = %record.currency,
            "Resolved win/lose record"
        );

        Ok(record.into())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::connector::InMemorySnapshotStore;

    fn use_case(documents: Vec<serde_json::Value>) -> LookupWinloseUseCase {
        let store = InMemorySnapshotStore::with_documents(documents);
        LookupWinloseUseCase::new(Arc::new(store), Duration::from_secs(1))
    }

    #[tokio::test]
    async fn test_lookup_unpadded_month_matches_padded_document() {
        let use_case = use_case(vec![json!({
            "client_name": "WEB1",
            "month": "05",
            "year": "2026",
            "data": {"username": "alice", "currency": "THB", "memberTotal": 3.5}
        })]);

        let summary = use_case
            .execute(&LookupRequest::default().with_month("5").with_year("2026"))
            .await
            .unwrap();

        assert_eq!(summary.username, "alice");
        assert_eq!(summary.member_total, 3.5);
    }

    #[tokio::test]
    async fn test_lookup_without_data_is_not_found() {
        let use_case = use_case(vec![json!({"client_name": "WEB1", "month": "1", "data": []})]);

        let err = use_case
            .execute(&LookupRequest::default().with_month("1"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_lookup_no_document_is_not_found() {
        let use_case = use_case(Vec::new());

        let err = use_case
            .execute(&LookupRequest::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
