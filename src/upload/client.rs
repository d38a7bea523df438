use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};

use super::types::{DecodedImage, ErrorBody, UploadError, UploadResult};

/// Fixed fallback when the service rejects a request without a message.
pub const GENERIC_UPLOAD_ERROR: &str = "Erro ao processar arquivo";

/// HTTP client for the frame extraction service.
#[derive(Clone)]
pub struct ExtractorClient {
    base_url: String,
}

impl ExtractorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.base_url)
    }

    pub fn static_url(&self, path: &str) -> String {
        format!("{}/static/{}", self.base_url, path)
    }

    pub fn archive_url(&self, token: &str) -> String {
        format!("{}/download/{}", self.base_url, token)
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }

    /// Posts the GIF as multipart form data and parses the frame listing.
    /// The `frame_name` part is only sent when the user provided one.
    pub async fn extract_frames(
        &self,
        file_path: &Path,
        file_name: &str,
        frame_name: Option<String>,
    ) -> Result<UploadResult, UploadError> {
        let bytes = std::fs::read(file_path)?;

        let mut form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));
        if let Some(frame_name) = frame_name {
            form = form.text("frame_name", frame_name);
        }

        let client = reqwest::Client::new();
        let response = client.post(self.upload_url()).multipart(form).send().await?;

        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            serde_json::from_slice(&body).map_err(|_| UploadError::InvalidBody)
        } else {
            Err(UploadError::Server(server_error_message(&body)))
        }
    }

    /// Fetches one frame's static asset bytes.
    pub async fn fetch_frame(&self, path: &str) -> Result<Vec<u8>, UploadError> {
        let client = reqwest::Client::new();
        let response = client.get(self.static_url(path)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Server(format!(
                "Falha ao carregar o frame (status {})",
                status
            )));
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// One-shot availability probe against the service's health endpoint.
    pub fn probe_health(&self) -> bool {
        let client = match reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(3))
            .build()
        {
            Ok(client) => client,
            Err(_) => return false,
        };

        match client.get(self.health_url()).send() {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Resolves the user-facing message for a non-2xx response body.
pub fn server_error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(body) if !body.error.is_empty() => body.error,
        _ => GENERIC_UPLOAD_ERROR.to_string(),
    }
}

/// Trims the custom frame-name input; blank input means "omit the field".
pub fn normalized_frame_name(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Decodes fetched asset bytes into RGBA pixels for texture upload.
pub fn decode_rgba(bytes: &[u8]) -> Result<DecodedImage, String> {
    let image = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(DecodedImage {
        width: width as usize,
        height: height as usize,
        rgba: rgba.into_raw(),
    })
}
