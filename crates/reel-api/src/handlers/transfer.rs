//! Transfer endpoint

use crate::middleware::RequestId;
use crate::services::TransferResponse;
use crate::state::AppState;
use axum::{
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use bytes::Bytes;
use std::sync::Arc;
use tracing::Instrument;

/// Process one video: download `bucket/file`, run the processor and upload
/// the result to the derived key.
///
/// Bodies without a JSON content type are treated as an absent payload and
/// rejected with 400, like a missing or unparseable body. A body that cannot
/// be read (over the size limit, for instance) is answered with the
/// rejection's own status in the same JSON shape.
pub async fn process_video(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> TransferResponse {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return body_rejected(&request_id, rejection),
    };
    let payload = is_json_content_type(&headers).then_some(body.as_ref());
    let span = tracing::info_span!("transfer", request_id = %request_id);

    state.coordinator.handle(payload).instrument(span).await
}

fn body_rejected(request_id: &RequestId, rejection: BytesRejection) -> TransferResponse {
    let status = rejection.status();
    tracing::debug!(
        request_id = %request_id,
        status = status.as_u16(),
        error = %rejection.body_text(),
        "Request body rejected"
    );
    TransferResponse::rejected(
        status.as_u16(),
        format!("Request body rejected: {}", rejection.body_text()),
    )
}

impl IntoResponse for TransferResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.result)).into_response()
    }
}

/// `application/json` or any `application/*+json` type, parameters ignored.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
