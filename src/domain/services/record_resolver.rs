use tracing::debug;

use crate::domain::{DomainError, LookupRequest, SnapshotRecord};

fn matches_request(candidate: &SnapshotRecord, request: &LookupRequest) -> bool {
    if let Some(username) = request.username.as_deref() {
        if candidate.username != username {
            return false;
        }
    }

    if let Some(currency) = request.refinement_currency() {
        if candidate.currency != currency {
            return false;
        }
    }

    // A record without `web` is considered to belong to any site.
    if let Some(web) = request.web.as_deref() {
        if !candidate.web.is_empty() && candidate.web != web {
            return false;
        }
    }

    true
}

/// Pick the record to report from a matched document's candidates.
///
/// The first candidate satisfying every active predicate wins; if none does,
/// the first candidate is returned. Fails only when there are no candidates.
pub fn resolve_record(
    candidates: Vec<SnapshotRecord>,
    request: &LookupRequest,
) -> Result<SnapshotRecord, DomainError> {
    let position = candidates
        .iter()
        .position(|candidate| matches_request(candidate, request));

    let index = match position {
        Some(index) => index,
        None => {
            debug!(
                "No candidate out of {} matched the request, using the first",
                candidates.len()
            );
            0
        }
    };

    candidates
        .into_iter()
        .nth(index)
        .ok_or_else(|| DomainError::not_found("Record not found"))
}
