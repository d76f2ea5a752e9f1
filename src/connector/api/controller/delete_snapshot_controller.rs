use axum::Json;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::connector::api::error::{ApiError, ApiResult};
use crate::domain::DeleteOutcome;

use super::super::Container;
use super::envelope::{parse_object, Envelope};

#[derive(Debug, Deserialize)]
struct DeleteRequest {
    #[serde(default)]
    filter: Map<String, Value>,
}

pub struct DeleteSnapshotController<'a> {
    container: &'a Container,
}

impl<'a> DeleteSnapshotController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn delete(&self, body: &[u8]) -> ApiResult<Json<Envelope<DeleteOutcome>>> {
        let request: DeleteRequest = serde_json::from_value(Value::Object(parse_object(body)?))
            .map_err(|e| ApiError::BadRequest(format!("Invalid delete request: {}", e)))?;

        let use_case = self.container.delete_use_case().await?;
        let outcome = use_case.execute(request.filter).await?;

        Ok(Json(Envelope::success(outcome)))
    }
}
