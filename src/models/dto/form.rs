use std::collections::HashMap;

use actix_multipart::Multipart;
use actix_web::web::BytesMut;
use futures::TryStreamExt;
use serde::Serialize;

use crate::{
    errors::{AppError, AppResult},
    services::data_uri::DataUri,
};

/// A file received in a multipart submission, or inlined as a `data:` URI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: None,
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Raw form fields as submitted by the browser, before any validation.
#[derive(Clone, Debug, Default)]
pub struct SubmittedForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl SubmittedForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_file(mut self, name: impl Into<String>, file: UploadedFile) -> Self {
        self.files.insert(name.into(), file);
        self
    }

    /// Text value of a field, or an empty string when absent.
    pub fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    /// Trimmed text value, `None` when absent or blank.
    pub fn optional_text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// A non-empty uploaded file. Zero-byte uploads are what browsers send for an
    /// untouched file input, so they count as absent.
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name).filter(|f| !f.is_empty())
    }

    /// Stores a text field. Values written as `data:<mime>;base64,...` are decoded
    /// and stored as files instead.
    pub fn insert_field(&mut self, name: String, value: String) -> AppResult<()> {
        if value.trim_start().starts_with("data:") {
            let uri = DataUri::parse(&value)?;
            self.files.insert(
                name,
                UploadedFile {
                    file_name: None,
                    content_type: uri.mime_type,
                    bytes: uri.bytes,
                },
            );
        } else {
            self.fields.insert(name, value);
        }
        Ok(())
    }

    /// Drains a multipart payload into memory. `max_total_bytes` bounds the sum of
    /// all field bodies, not each one.
    pub async fn from_multipart(mut payload: Multipart, max_total_bytes: usize) -> AppResult<Self> {
        let mut form = SubmittedForm::new();
        let mut total_bytes = 0usize;

        while let Some(mut field) = payload.try_next().await? {
            let (name, file_name) = match field.content_disposition() {
                Some(cd) => (
                    cd.get_name().map(str::to_string),
                    cd.get_filename().map(str::to_string),
                ),
                None => (None, None),
            };
            let Some(name) = name else {
                continue;
            };
            let content_type = field.content_type().map(|m| m.essence_str().to_string());

            let mut buffer = BytesMut::new();
            while let Some(chunk) = field.try_next().await? {
                total_bytes += chunk.len();
                if total_bytes > max_total_bytes {
                    return Err(AppError::ValidationError(format!(
                        "The submission exceeds the {} byte limit.",
                        max_total_bytes
                    )));
                }
                buffer.extend_from_slice(&chunk);
            }

            if file_name.is_some() {
                form.files.insert(
                    name,
                    UploadedFile {
                        file_name,
                        content_type: content_type
                            .unwrap_or_else(|| "application/octet-stream".to_string()),
                        bytes: buffer.to_vec(),
                    },
                );
            } else {
                let value = String::from_utf8(buffer.to_vec()).map_err(|_| {
                    AppError::ValidationError(format!("Field '{}' is not valid UTF-8.", name))
                })?;
                form.insert_field(name, value)?;
            }
        }

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{
        error::PayloadError,
        http::header::{self, HeaderMap, HeaderValue},
        web::Bytes,
    };

    const BOUNDARY: &str = "form-test-boundary";

    fn multipart(fields: &[(&str, &str)]) -> Multipart {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            ));
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(&format!("multipart/form-data; boundary={}", BOUNDARY))
                .expect("valid content type"),
        );
        let stream = futures::stream::iter(vec![Ok::<_, PayloadError>(Bytes::from(body))]);
        Multipart::new(&headers, stream)
    }

    #[actix_web::test]
    async fn multipart_fields_are_collected() {
        let form = SubmittedForm::from_multipart(
            multipart(&[("subject", "Droit"), ("topic", "Le contrat")]),
            1024,
        )
        .await
        .expect("form should be read");

        assert_eq!(form.text("subject"), "Droit");
        assert_eq!(form.text("topic"), "Le contrat");
    }

    #[actix_web::test]
    async fn upload_limit_covers_the_whole_submission() {
        let first = "a".repeat(60);
        let second = "b".repeat(60);

        let result =
            SubmittedForm::from_multipart(multipart(&[("topic", first.as_str()), ("question", second.as_str())]), 100)
                .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn data_uri_field_becomes_a_file() {
        let mut form = SubmittedForm::new();
        form.insert_field(
            "lessonImage".to_string(),
            "data:image/png;base64,aGVsbG8=".to_string(),
        )
        .expect("data URI should decode");

        let file = form.file("lessonImage").expect("file should be stored");
        assert_eq!(file.content_type, "image/png");
        assert_eq!(file.bytes, b"hello".to_vec());
        assert_eq!(form.optional_text("lessonImage"), None);
    }

    #[test]
    fn malformed_data_uri_field_is_rejected() {
        let mut form = SubmittedForm::new();
        let result = form.insert_field("lessonImage".to_string(), "data:image/png;base64,@@".to_string());
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn uploaded_file_serializes_without_bytes() {
        let value = serde_json::to_value(UploadedFile::new("image/png", vec![1, 2, 3]))
            .expect("file metadata should serialize");
        assert_eq!(value["contentType"], "image/png");
        assert!(value.get("bytes").is_none());
    }

    #[test]
    fn blank_text_is_treated_as_missing() {
        let form = SubmittedForm::new()
            .with_field("topic", "   ")
            .with_field("subject", " Droit ");

        assert_eq!(form.optional_text("topic"), None);
        assert_eq!(form.optional_text("subject"), Some("Droit".to_string()));
        assert_eq!(form.text("missing"), "");
    }

    #[test]
    fn empty_upload_is_treated_as_missing() {
        let form = SubmittedForm::new()
            .with_file("lessonImage", UploadedFile::new("image/png", vec![]))
            .with_file("exerciseImage", UploadedFile::new("image/png", vec![1, 2, 3]));

        assert!(form.file("lessonImage").is_none());
        assert!(form.file("exerciseImage").is_some());
    }

    #[test]
    fn image_detection_uses_mime_prefix() {
        assert!(UploadedFile::new("image/jpeg", vec![1]).is_image());
        assert!(!UploadedFile::new("application/pdf", vec![1]).is_image());
    }
}
