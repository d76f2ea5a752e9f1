use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::connector::api::error::ApiResult;
use crate::domain::{LookupRequest, WinloseSummary};

use super::super::Container;
use super::envelope::{parse_object, Envelope};

#[derive(Debug, Serialize)]
pub struct WinloseBody {
    pub data: WinloseSummary,
}

pub struct WinloseController<'a> {
    container: &'a Container,
}

impl<'a> WinloseController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn lookup(&self, body: &[u8]) -> ApiResult<Json<Envelope<WinloseBody>>> {
        let request = LookupRequest::from_json(&parse_object(body)?);
        info!(?request, "Received win/lose request");

        let use_case = self.container.lookup_use_case().await?;
        let summary = use_case.execute(&request).await?;

        Ok(Json(Envelope::success(WinloseBody { data: summary })))
    }
}
