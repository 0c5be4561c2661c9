//! OCR client — turns an uploaded résumé PDF into plain text via a remote
//! document-to-text service (OCR.space protocol).

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;

/// Upload ceiling of the free OCR tier.
pub const MAX_UPLOAD_BYTES: usize = 1024 * 1024;
pub const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Please choose a PDF file.")]
    MissingFile,

    #[error("Only PDF files are supported (got '{0}').")]
    UnsupportedType(String),

    #[error("File too large ({size} bytes). Free OCR tier supports up to 1 MB.")]
    TooLarge { size: usize },

    #[error("OCR service is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OCR API returned HTTP {status}")]
    Status { status: u16 },

    #[error("OCR processing error: {0}")]
    Processing(String),

    #[error("No text could be extracted from the PDF. The file may be image-based or empty.")]
    NoText,
}

/// A résumé file received from the upload surface.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ResumeUpload {
    /// Rejects non-PDF and oversized files before anything is sent.
    pub fn validate(&self) -> Result<(), OcrError> {
        let content_type = self.content_type.as_deref().unwrap_or("");
        if content_type != PDF_MIME {
            return Err(OcrError::UnsupportedType(content_type.to_string()));
        }
        if self.bytes.len() > MAX_UPLOAD_BYTES {
            warn!(
                "Upload '{}' is {} bytes, exceeds 1 MB limit",
                self.file_name,
                self.bytes.len()
            );
            return Err(OcrError::TooLarge {
                size: self.bytes.len(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OcrResponse {
    #[serde(default)]
    is_errored_on_processing: bool,
    #[serde(default)]
    error_message: Option<Value>,
    #[serde(rename = "OCRExitCode", default)]
    ocr_exit_code: Option<Value>,
    #[serde(default)]
    parsed_results: Vec<ParsedResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParsedResult {
    #[serde(default)]
    parsed_text: String,
}

impl OcrResponse {
    fn error_text(&self) -> String {
        let joined = match &self.error_message {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        };
        if joined.is_empty() {
            "Unknown processing error".to_string()
        } else {
            joined
        }
    }

    fn exit_code(&self) -> Option<i64> {
        match &self.ocr_exit_code {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.parse().ok(),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct OcrClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl OcrClient {
    pub fn new(api_key: String, endpoint: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.ocr_api_key.clone(), config.ocr_api_url.clone())
    }

    /// Validates the upload, sends it for OCR and returns the extracted text.
    pub async fn extract_text(&self, upload: &ResumeUpload) -> Result<String, OcrError> {
        upload.validate()?;
        if self.api_key.is_empty() {
            return Err(OcrError::NotConfigured);
        }

        info!(
            "Starting OCR upload for '{}' ({} bytes)",
            upload.file_name,
            upload.bytes.len()
        );

        let file = Part::bytes(upload.bytes.to_vec())
            .file_name(upload.file_name.clone())
            .mime_str(PDF_MIME)?;
        let form = Form::new()
            .text("apikey", self.api_key.clone())
            .text("language", "eng")
            .text("isOverlayRequired", "false")
            .text("filetype", "PDF")
            .part("file", file);

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        debug!("OCR API response status: {status}");
        if !status.is_success() {
            return Err(OcrError::Status {
                status: status.as_u16(),
            });
        }

        let body: OcrResponse = response.json().await?;
        if body.is_errored_on_processing {
            return Err(OcrError::Processing(body.error_text()));
        }
        if let Some(code) = body.exit_code().filter(|c| *c != 1) {
            warn!("OCR exit code: {code}");
        }

        let text = body
            .parsed_results
            .into_iter()
            .next()
            .map(|r| r.parsed_text)
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(OcrError::NoText);
        }

        info!("OCR extracted {} chars", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    fn pdf(len: usize) -> ResumeUpload {
        ResumeUpload {
            file_name: "resume.pdf".to_string(),
            content_type: Some(PDF_MIME.to_string()),
            bytes: Bytes::from(vec![b'%'; len]),
        }
    }

    fn client_for(server: &MockServer) -> OcrClient {
        OcrClient::new("ocr-key".to_string(), format!("{}/parse/image", server.uri()))
    }

    #[test]
    fn test_validate_rejects_non_pdf() {
        let mut upload = pdf(10);
        upload.content_type = Some("image/png".to_string());
        assert!(matches!(upload.validate(), Err(OcrError::UnsupportedType(t)) if t == "image/png"));
        upload.content_type = None;
        assert!(matches!(upload.validate(), Err(OcrError::UnsupportedType(_))));
    }

    #[test]
    fn test_validate_size_boundary() {
        assert!(pdf(MAX_UPLOAD_BYTES).validate().is_ok());
        assert!(matches!(
            pdf(MAX_UPLOAD_BYTES + 1).validate(),
            Err(OcrError::TooLarge { size }) if size == MAX_UPLOAD_BYTES + 1
        ));
    }

    #[tokio::test]
    async fn test_oversized_upload_never_reaches_service() {
        let server = MockServer::start().await;
        Mock::given(matchers::any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = client_for(&server).extract_text(&pdf(MAX_UPLOAD_BYTES + 1)).await;
        assert!(matches!(result, Err(OcrError::TooLarge { .. })));
    }

    #[tokio::test]
    async fn test_extracts_parsed_text() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/parse/image"))
            .and(matchers::body_string_contains("name=\"language\""))
            .and(matchers::body_string_contains("ocr-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ParsedResults": [{"ParsedText": "Ada Lovelace\nada@example.com"}],
                "OCRExitCode": 1,
                "IsErroredOnProcessing": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server).extract_text(&pdf(64)).await.unwrap();
        assert_eq!(text, "Ada Lovelace\nada@example.com");
    }

    #[tokio::test]
    async fn test_partial_exit_code_still_returns_text() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ParsedResults": [{"ParsedText": "Grace Hopper"}],
                "OCRExitCode": 2,
                "IsErroredOnProcessing": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server).extract_text(&pdf(64)).await.unwrap();
        assert_eq!(text, "Grace Hopper");
    }

    #[tokio::test]
    async fn test_processing_error_joins_messages() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "IsErroredOnProcessing": true,
                "ErrorMessage": ["Bad PDF", "Page 1 unreadable"],
                "OCRExitCode": 3
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).extract_text(&pdf(64)).await.unwrap_err();
        assert_eq!(err.to_string(), "OCR processing error: Bad PDF, Page 1 unreadable");
    }

    #[tokio::test]
    async fn test_http_failure_status() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = client_for(&server).extract_text(&pdf(64)).await.unwrap_err();
        assert!(matches!(err, OcrError::Status { status: 403 }));
    }

    #[tokio::test]
    async fn test_empty_text_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ParsedResults": [{"ParsedText": "  \r\n"}],
                "OCRExitCode": 1
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).extract_text(&pdf(64)).await.unwrap_err();
        assert!(matches!(err, OcrError::NoText));
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let client = OcrClient::new(String::new(), "http://127.0.0.1:9".to_string());
        let err = client.extract_text(&pdf(8)).await.unwrap_err();
        assert!(matches!(err, OcrError::NotConfigured));
    }
}
