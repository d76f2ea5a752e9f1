use serde::Serialize;
use serde_json::{Map, Value};

use super::super::error::ApiError;

pub const SUCCESS_CODE: i32 = 0;
pub const SUCCESS_MSG: &str = "SUCCESS";

/// `{code: 0, msg: "SUCCESS", ...body}`
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub code: i32,
    pub msg: &'static str,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(body: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            msg: SUCCESS_MSG,
            body,
        }
    }
}

/// Decode a request body that must be a JSON object.
pub(crate) fn parse_object(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
        Err(_) => Err(ApiError::invalid_json()),
    }
}
