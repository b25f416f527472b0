use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kennel_core::errors::{ErrorKind, KennelError};

#[derive(Debug)]
pub struct KennelAxumError(pub anyhow::Error);

impl From<anyhow::Error> for KennelAxumError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

impl From<KennelError> for KennelAxumError {
    fn from(e: KennelError) -> Self {
        Self(e.into_anyhow())
    }
}

impl IntoResponse for KennelAxumError {
    fn into_response(self) -> Response {
        // Look through context layers first; anything that is not a
        // KennelError becomes a General (500).
        let known = KennelError::from_anyhow(&self.0).map(KennelError::sanitize_for_client);
        let safe = match known {
            Some(safe) => safe,
            None => KennelError::normalize(self.0).sanitize_for_client(),
        };

        if safe.kind == ErrorKind::General {
            tracing::error!(error = %safe, "request failed");
        } else {
            tracing::debug!(error = %safe, "request rejected");
        }

        let status = StatusCode::from_u16(safe.code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(safe.to_json())).into_response()
    }
}
