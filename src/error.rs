use crate::invoice::InvoiceError;
use crate::loader::LoadError;
use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Everything a request handler can fail with.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("No file uploaded")]
    MissingFile,
    #[error("No file selected")]
    EmptyFilename,
    #[error("Invalid file type")]
    InvalidFileType,
    #[error("{0}")]
    Invoice(#[from] InvoiceError),
    #[error("{0}")]
    Upload(#[from] MultipartError),
    #[error("{0}")]
    Load(#[from] LoadError),
    #[error("Error: {0}")]
    Render(#[from] rust_xlsxwriter::XlsxError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFile
            | AppError::EmptyFilename
            | AppError::InvalidFileType
            | AppError::Invoice(_) => StatusCode::BAD_REQUEST,
            AppError::Upload(e) => e.status(),
            AppError::Load(_) | AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Plain-text error body, used by the invoice download.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Reply shape of the rate upload endpoint.
#[derive(Serialize, Debug)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// An [`AppError`] reported as `{"success": false, "error": ...}`.
#[derive(Debug)]
pub struct JsonError(pub AppError);

impl From<AppError> for JsonError {
    fn from(err: AppError) -> Self {
        JsonError(err)
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        let body = UploadResponse {
            success: false,
            count: None,
            error: Some(self.0.to_string()),
        };
        (self.0.status(), Json(body)).into_response()
    }
}
