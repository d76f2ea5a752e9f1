use axum::Json;
use serde_json::Value;

use crate::connector::api::error::ApiResult;

use super::super::Container;

pub struct SnapshotAllController<'a> {
    container: &'a Container,
}

impl<'a> SnapshotAllController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Every document, unwrapped and unpaginated.
    pub async fn list(&self) -> ApiResult<Json<Vec<Value>>> {
        let use_case = self.container.list_use_case().await?;
        Ok(Json(use_case.execute().await?))
    }
}
