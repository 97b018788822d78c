use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mealplanner_shared::Error;
use serde_json::json;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// HTTP face of the domain error
#[derive(Debug)]
pub struct ApiError(pub Error);

pub type ApiResult<T> = Result<T, ApiError>;

impl<E> From<E> for ApiError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self(Error::Unauthorized(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::Validate(_) | Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn error_message(err: &ValidationError) -> String {
    err.message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| err.code.to_string())
}

/// Flattens nested errors into keys like `ingredients[0].quantity`
fn collect_field_errors(
    prefix: Option<&str>,
    errors: &ValidationErrors,
    fields: &mut BTreeMap<String, Vec<String>>,
) {
    for (field, kind) in errors.errors() {
        let key = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(errors) => {
                fields
                    .entry(key)
                    .or_default()
                    .extend(errors.iter().map(error_message));
            }
            ValidationErrorsKind::Struct(errors) => {
                collect_field_errors(Some(&key), errors, fields);
            }
            ValidationErrorsKind::List(items) => {
                for (index, errors) in items {
                    collect_field_errors(Some(&format!("{key}[{index}]")), errors, fields);
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self.0 {
            Error::Validate(errors) => {
                let mut fields = BTreeMap::new();
                collect_field_errors(None, &errors, &mut fields);

                tracing::warn!(errors = ?fields, "validation failed");

                json!({
                    "success": false,
                    "message": "Validation failed",
                    "errors": fields,
                })
            }
            Error::Unknown(err) => {
                tracing::error!("Internal error: {err:?}");

                json!({ "success": false, "message": "Internal server error" })
            }
            err => json!({ "success": false, "message": err.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Input {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
    }

    #[derive(Validate)]
    struct Line {
        #[validate(range(exclusive_min = 0.0))]
        quantity: f64,
    }

    #[derive(Validate)]
    struct Order {
        #[validate(nested)]
        customer: Input,
        #[validate(nested)]
        lines: Vec<Line>,
    }

    async fn body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let cases = [
            (Error::BadRequest("bad".to_owned()), StatusCode::BAD_REQUEST),
            (Error::Unauthorized("who".to_owned()), StatusCode::UNAUTHORIZED),
            (Error::Forbidden, StatusCode::FORBIDDEN),
            (Error::not_found("Recipe"), StatusCode::NOT_FOUND),
            (Error::Conflict("again".to_owned()), StatusCode::CONFLICT),
        ];

        for (err, status) in cases {
            let message = err.to_string();
            let response = ApiError(err).into_response();
            assert_eq!(response.status(), status);

            let body = body(response).await;
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], message);
        }
    }

    #[tokio::test]
    async fn test_validation_errors_listed_by_field() {
        let err = Input {
            name: String::new(),
        }
        .validate()
        .unwrap_err();

        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body(response).await;
        assert_eq!(body["errors"]["name"][0], "Name is required");
    }

    #[tokio::test]
    async fn test_nested_validation_errors_keep_their_path() {
        let err = Order {
            customer: Input {
                name: String::new(),
            },
            lines: vec![Line { quantity: 1.0 }, Line { quantity: 0.0 }],
        }
        .validate()
        .unwrap_err();

        let body = body(ApiError::from(err).into_response()).await;
        assert_eq!(body["errors"]["customer.name"][0], "Name is required");
        assert_eq!(body["errors"]["lines[1].quantity"][0], "range");
        assert!(body["errors"].get("lines[0].quantity").is_none());
    }

    #[tokio::test]
    async fn test_unknown_error_is_hidden() {
        let response = ApiError(Error::Unknown(anyhow::anyhow!("disk on fire"))).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body(response).await;
        assert_eq!(body["message"], "Internal server error");
    }
}
