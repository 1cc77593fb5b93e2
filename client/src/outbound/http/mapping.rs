//! Shared reqwest error mapping for the catalogue HTTP adapters.

use reqwest::StatusCode;

use crate::domain::ports::RemoteSourceError;

pub(super) fn map_transport_error(error: &reqwest::Error) -> RemoteSourceError {
    if error.is_timeout() {
        RemoteSourceError::timeout(error.to_string())
    } else if error.is_decode() {
        RemoteSourceError::decode(error.to_string())
    } else {
        RemoteSourceError::transport(error.to_string())
    }
}

pub(super) fn map_status_error(status: StatusCode, body: &[u8]) -> RemoteSourceError {
    let message = status_message(status, body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            RemoteSourceError::unauthorized(message)
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            RemoteSourceError::timeout(message)
        }
        _ if status.is_client_error() => RemoteSourceError::invalid_request(message),
        _ => RemoteSourceError::transport(message),
    }
}

pub(super) fn status_message(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    }
}

pub(super) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network status mapping.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::unauthorized(StatusCode::UNAUTHORIZED)]
    #[case::forbidden(StatusCode::FORBIDDEN)]
    fn auth_statuses_map_to_unauthorized(#[case] status: StatusCode) {
        let error = map_status_error(status, b"");
        assert!(matches!(error, RemoteSourceError::Unauthorized { .. }));
    }

    #[rstest]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT)]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT)]
    fn timeout_statuses_map_to_timeout(#[case] status: StatusCode) {
        let error = map_status_error(status, b"");
        assert!(matches!(error, RemoteSourceError::Timeout { .. }));
    }

    #[rstest]
    fn other_client_errors_are_request_rejections() {
        let error = map_status_error(StatusCode::BAD_REQUEST, b"{\"error\":\"pageSize\"}");
        assert!(matches!(error, RemoteSourceError::InvalidRequest { .. }));
        assert_eq!(
            error.to_string(),
            "remote source rejected request: status 400: {\"error\":\"pageSize\"}"
        );
    }

    #[rstest]
    fn server_errors_are_transport_failures() {
        let error = map_status_error(StatusCode::BAD_GATEWAY, b"");
        assert_eq!(
            error,
            RemoteSourceError::transport("status 502")
        );
    }

    #[rstest]
    fn previews_are_compacted_and_truncated() {
        let body = format!("  line one\n\tline two {}", "x".repeat(200));
        let preview = body_preview(body.as_bytes());
        assert!(preview.starts_with("line one line two x"));
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }
}
