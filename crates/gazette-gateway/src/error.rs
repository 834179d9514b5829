// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps [`GazetteError`] onto HTTP status codes and a `{error}` body.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gazette_core::GazetteError;
use serde::Serialize;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// A handler error. Wraps the domain error so `?` works in handlers.
#[derive(Debug)]
pub struct ApiError(pub GazetteError);

impl From<GazetteError> for ApiError {
    fn from(err: GazetteError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(GazetteError::InvalidRequest(rejection.body_text()))
    }
}

/// JSON request body. Unlike [`Json`], a body that fails to parse is
/// answered with 400 and the usual `{error}` object.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            GazetteError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GazetteError::PersonaNotFound(_) => StatusCode::NOT_FOUND,
            GazetteError::PersonaExists(_) => StatusCode::CONFLICT,
            e if e.is_upstream() => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// A feature whose hosted service has no credentials configured.
    pub fn not_configured(feature: &str) -> Self {
        Self(GazetteError::Config(format!("{feature} is not configured")))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.0, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self.0, "request rejected");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
