use axum::Json;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::connector::api::error::{ApiError, ApiResult};
use crate::domain::UpdateOutcome;

use super::super::Container;
use super::envelope::{parse_object, Envelope};

#[derive(Debug, Deserialize)]
struct UpdateRequest {
    #[serde(default)]
    filter: Map<String, Value>,
    #[serde(default)]
    update: Map<String, Value>,
    #[serde(default)]
    upsert: bool,
}

pub struct UpdateSnapshotController<'a> {
    container: &'a Container,
}

impl<'a> UpdateSnapshotController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn update(&self, body: &[u8]) -> ApiResult<Json<Envelope<UpdateOutcome>>> {
        let request: UpdateRequest = serde_json::from_value(Value::Object(parse_object(body)?))
            .map_err(|e| ApiError::BadRequest(format!("Invalid update request: {}", e)))?;

        let use_case = self.container.update_use_case().await?;
        let outcome = use_case
            .execute(request.filter, request.update, request.upsert)
            .await?;

        Ok(Json(Envelope::success(outcome)))
    }
}
