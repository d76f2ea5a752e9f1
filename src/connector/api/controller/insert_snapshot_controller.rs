use axum::Json;

use crate::connector::api::error::ApiResult;
use crate::domain::InsertOutcome;

use super::super::Container;
use super::envelope::{parse_object, Envelope};

pub struct InsertSnapshotController<'a> {
    container: &'a Container,
}

impl<'a> InsertSnapshotController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn insert(&self, body: &[u8]) -> ApiResult<Json<Envelope<InsertOutcome>>> {
        let document = parse_object(body)?;

        let use_case = self.container.insert_use_case().await?;
        let outcome = use_case.execute(document).await?;

        Ok(Json(Envelope::success(outcome)))
    }
}
