use actix_web::{
    error::{JsonPayloadError, PathError},
    http::StatusCode,
    HttpRequest, HttpResponse, ResponseError,
};
use thiserror::Error;

use crate::models::{ErrorDetail, ValidationErrorBody, ValidationIssue};
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Record not found")]
    NotFound,

    #[error("{msg}")]
    Validation {
        kind: &'static str,
        loc: Vec<String>,
        msg: String,
    },
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(index) => {
                tracing::debug!(index, "record index out of range");
                ApiError::NotFound
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            ApiError::NotFound => response.json(ErrorDetail {
                detail: self.to_string(),
            }),
            ApiError::Validation { kind, loc, msg } => response.json(ValidationErrorBody {
                detail: vec![ValidationIssue {
                    kind: *kind,
                    loc: loc.clone(),
                    msg: msg.clone(),
                }],
            }),
        }
    }
}

/// Turns any body decoding failure into a 422.
pub fn json_error_handler(err: JsonPayloadError, request: &HttpRequest) -> actix_web::Error {
    tracing::warn!(path = request.path(), error = %err, "rejected request body");
    let kind = match &err {
        JsonPayloadError::ContentType => "content_type",
        JsonPayloadError::Deserialize(e) if e.is_data() => "type_error",
        JsonPayloadError::Deserialize(e) if e.is_eof() => "missing",
        _ => "json_invalid",
    };
    ApiError::Validation {
        kind,
        loc: vec!["body".to_string()],
        msg: err.to_string(),
    }
    .into()
}

pub fn path_error_handler(err: PathError, request: &HttpRequest) -> actix_web::Error {
    tracing::warn!(path = request.path(), error = %err, "rejected path parameter");
    ApiError::Validation {
        kind: "int_parsing",
        loc: vec!["path".to_string(), "id".to_string()],
        msg: err.to_string(),
    }
    .into()
}

#[cfg(test)]
mod test {
    use actix_web::body::to_bytes;
    use serde_json::{json, Value};

    use super::*;

    #[actix_web::test]
    async fn not_found_renders_detail() {
        let err = ApiError::from(StoreError::NotFound(7));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({"detail": "Record not found"}));
    }

    #[actix_web::test]
    async fn validation_renders_issue_list() {
        let err = ApiError::Validation {
            kind: "missing",
            loc: vec!["body".to_string()],
            msg: "missing field `age`".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            json!({"detail": [{"type": "missing", "loc": ["body"], "msg": "missing field `age`"}]})
        );
    }
}
