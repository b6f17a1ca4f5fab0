//! Multipart extraction for the upload endpoint

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use plume_core::{AppError, UploadCandidate};

use crate::constants::UPLOAD_FIELD_NAME;

/// Pull the single `file` field out of a multipart form.
///
/// Any other shape (no file field, a second file field, an unexpected field,
/// an unreadable stream) is rejected as `InvalidFile`. A missing filename or
/// content type becomes an empty string and fails in the pipeline. A body cut
/// off by the request size limit is `PayloadTooLarge`, the same 413 the limit
/// layer answers when the length is declared up front.
pub async fn extract_multipart_file(mut multipart: Multipart) -> Result<UploadCandidate, AppError> {
    let mut candidate: Option<UploadCandidate> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| read_error("failed to read form", e))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name != UPLOAD_FIELD_NAME {
            return Err(AppError::InvalidFile(format!(
                "multipart: unexpected field {:?}",
                field_name
            )));
        }

        if candidate.is_some() {
            return Err(AppError::InvalidFile(
                "multipart: more than one file field".to_string(),
            ));
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| read_error("failed to read file", e))?;

        candidate = Some(UploadCandidate::new(data.to_vec(), filename, content_type));
    }

    candidate.ok_or_else(|| AppError::InvalidFile("multipart: no file field".to_string()))
}

fn read_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("multipart: {}: {}", context, err.body_text()))
    } else {
        AppError::InvalidFile(format!("multipart: {}: {}", context, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::Request;

    const BOUNDARY: &str = "plume-test-boundary";

    fn part(name: &str, filename: &str, content_type: &str, data: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n{data}\r\n"
        )
    }

    async fn multipart(parts: &[String]) -> Multipart {
        let body = format!("{}--{BOUNDARY}--\r\n", parts.concat());
        let request = Request::builder()
            .method("POST")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        Multipart::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_extracts_single_file() {
        let form = multipart(&[part("file", "photo.png", "image/png", "abc")]).await;

        let candidate = extract_multipart_file(form).await.unwrap();
        assert_eq!(candidate.declared_name(), "photo.png");
        assert_eq!(candidate.declared_mime_type(), "image/png");
        assert_eq!(candidate.raw_bytes(), b"abc");
    }

    #[tokio::test]
    async fn test_rejects_two_file_fields() {
        let form = multipart(&[
            part("file", "a.png", "image/png", "a"),
            part("file", "b.png", "image/png", "b"),
        ])
        .await;

        let err = extract_multipart_file(form).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidFile(_)));
    }

    #[tokio::test]
    async fn test_rejects_unexpected_field() {
        let form = multipart(&[part("avatar", "a.png", "image/png", "a")]).await;

        let err = extract_multipart_file(form).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidFile(_)));
    }

    #[tokio::test]
    async fn test_rejects_empty_form() {
        let form = multipart(&[]).await;

        let err = extract_multipart_file(form).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidFile(_)));
    }

    #[tokio::test]
    async fn test_body_over_limit_is_payload_too_large() {
        // Past axum's default 2 MiB extractor limit, with no Content-Length.
        let data = "a".repeat(3 * 1024 * 1024);
        let form = multipart(&[part("file", "a.png", "image/png", &data)]).await;

        let err = extract_multipart_file(form).await.unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
    }
}
