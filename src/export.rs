//! Pure export transforms from a record slice to a downloadable artifact.
//!
//! Stateless by design: each format is a transform of an in-memory record
//! sequence into bytes plus a generated filename embedding the current date.

use chrono::Utc;
use thiserror::Error;

use crate::user::UserRecord;

/// Default basename for generated artifacts.
pub const DEFAULT_BASENAME: &str = "user_management_report";

/// Column headers shared by the tabular formats.
const HEADERS: [&str; 8] = [
    "id",
    "name",
    "email",
    "age",
    "gender",
    "createdAt",
    "updatedAt",
    "isActive",
];

/// Supported download formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Tab-delimited table with a spreadsheet content type.
    Spreadsheet,
    /// Comma-delimited text.
    Csv,
    /// Pretty-printed structured text.
    Json,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Spreadsheet => "xls",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    fn content_type(self) -> &'static str {
        match self {
            Self::Spreadsheet => "application/vnd.ms-excel",
            Self::Csv => "text/csv",
            Self::Json => "application/json",
        }
    }
}

/// Generated filename plus encoded bytes, ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Filename embedding the current date.
    pub filename: String,
    /// MIME type for the download.
    pub content_type: &'static str,
    /// Encoded payload.
    pub bytes: Vec<u8>,
}

/// Failure while encoding an artifact.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Delimited encoding failed.
    #[error("delimited encoding failed: {0}")]
    Delimited(#[from] csv::Error),
    /// JSON encoding failed.
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Renders `users` into an artifact for `format`.
pub fn render(users: &[UserRecord], format: ExportFormat) -> Result<ExportArtifact, ExportError> {
    let bytes = match format {
        ExportFormat::Spreadsheet => delimited(users, b'\t')?,
        ExportFormat::Csv => delimited(users, b',')?,
        ExportFormat::Json => serde_json::to_vec_pretty(users)?,
    };

    Ok(ExportArtifact {
        filename: filename(DEFAULT_BASENAME, format),
        content_type: format.content_type(),
        bytes,
    })
}

fn filename(basename: &str, format: ExportFormat) -> String {
    format!(
        "{basename}_{}.{}",
        Utc::now().format("%Y-%m-%d"),
        format.extension()
    )
}

fn delimited(users: &[UserRecord], delimiter: u8) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(HEADERS)?;
    for user in users {
        writer.write_record([
            user.id.to_string(),
            user.name.clone(),
            user.email.clone(),
            user.age.to_string(),
            user.gender.as_str().to_string(),
            user.created_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            user.updated_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            user.is_active.map(|a| a.to_string()).unwrap_or_default(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|err| ExportError::Delimited(csv::Error::from(err.into_error())))
}
