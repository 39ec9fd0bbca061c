use base64::{engine::general_purpose::STANDARD, Engine as _};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    errors::{AppError, AppResult},
    models::dto::form::UploadedFile,
};

static DATA_URI_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:([A-Za-z0-9!#$&^_.+-]+/[A-Za-z0-9!#$&^_.+-]+);base64,([A-Za-z0-9+/=]*)$")
        .expect("DATA_URI_REGEX is a valid regex pattern")
});

/// An inline `data:<mimetype>;base64,<data>` payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DataUri {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn parse(value: &str) -> AppResult<Self> {
        let captures = DATA_URI_REGEX
            .captures(value.trim())
            .ok_or_else(|| AppError::ValidationError("Invalid data URI.".to_string()))?;

        let bytes = STANDARD
            .decode(&captures[2])
            .map_err(|e| AppError::ValidationError(format!("Invalid base64 payload: {}", e)))?;

        Ok(Self {
            mime_type: captures[1].to_string(),
            bytes,
        })
    }

    pub fn encode(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

impl From<&UploadedFile> for DataUri {
    fn from(file: &UploadedFile) -> Self {
        DataUri::new(file.content_type.clone(), file.bytes.clone())
    }
}

/// Converts an uploaded image to the data URI sent to the model.
pub fn image_to_data_uri(file: &UploadedFile) -> AppResult<String> {
    if !file.is_image() {
        return Err(AppError::ValidationError(format!(
            "Unsupported file type '{}', an image is expected.",
            file.content_type
        )));
    }
    Ok(DataUri::from(file).encode())
}
