use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::error_response;

/// JSON request body whose rejections use the shared `validation_error` shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = InvalidBody;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| JsonBody(value))
            .map_err(InvalidBody)
    }
}

/// Body that is missing, not JSON, or does not match the expected shape. Always a 400.
#[derive(Debug)]
pub struct InvalidBody(pub JsonRejection);

impl IntoResponse for InvalidBody {
    fn into_response(self) -> Response {
        let message = self.0.body_text();
        debug!(%message, "rejected request body");
        error_response(StatusCode::BAD_REQUEST, "validation_error", message)
    }
}
