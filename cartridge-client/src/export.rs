//! Spreadsheet export trigger
//!
//! The server renders the workbook; the client fetches the bytes and writes
//! them unchanged to a timestamped file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use shared::models::{CartridgeStatus, OperationType};

use crate::ClientResult;
use crate::query::QueryString;

/// What to export, with its optional filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportRequest {
    Cartridges {
        status: Option<CartridgeStatus>,
        model: Option<String>,
    },
    Operations {
        operation_type: Option<OperationType>,
        start_date: Option<String>,
        end_date: Option<String>,
    },
    Users,
    Locations,
    All,
}

impl ExportRequest {
    /// Endpoint segment under `/api/export`
    pub fn resource(&self) -> &'static str {
        match self {
            ExportRequest::Cartridges { .. } => "cartridges",
            ExportRequest::Operations { .. } => "operations",
            ExportRequest::Users => "users",
            ExportRequest::Locations => "locations",
            ExportRequest::All => "all",
        }
    }

    /// Filename prefix
    pub fn prefix(&self) -> &'static str {
        match self {
            ExportRequest::All => "cartridge_accounting",
            other => other.resource(),
        }
    }

    /// Genitive noun used in "Отчёт … успешно экспортирован"
    pub fn label(&self) -> &'static str {
        match self {
            ExportRequest::Cartridges { .. } => "картриджей",
            ExportRequest::Operations { .. } => "операций",
            ExportRequest::Users => "пользователей",
            ExportRequest::Locations => "объектов",
            ExportRequest::All => "всех данных",
        }
    }

    /// Only the non-empty filters
    pub fn query(&self) -> QueryString {
        let mut q = QueryString::new();
        match self {
            ExportRequest::Cartridges { status, model } => {
                q.push_opt("status", status.map(|s| s.as_str()))
                    .push_opt("model", model.as_deref());
            }
            ExportRequest::Operations {
                operation_type,
                start_date,
                end_date,
            } => {
                q.push_opt("type", operation_type.map(|t| t.as_str()))
                    .push_opt("startDate", start_date.as_deref())
                    .push_opt("endDate", end_date.as_deref());
            }
            ExportRequest::Users | ExportRequest::Locations | ExportRequest::All => {}
        }
        q
    }

    /// Request path including the query
    pub fn path(&self) -> String {
        self.query()
            .to_path(&format!("/api/export/{}", self.resource()))
    }

    /// `<prefix>_<YYYY-MM-DDTHH-MM-SS>.xlsx` for the given instant
    pub fn file_name_at(&self, at: DateTime<Utc>) -> String {
        format!("{}_{}.xlsx", self.prefix(), at.format("%Y-%m-%dT%H-%M-%S"))
    }
}

/// Write exported bytes into `dir`, returning the created file's path
pub fn save_export(
    dir: &Path,
    request: &ExportRequest,
    bytes: &[u8],
    at: DateTime<Utc>,
) -> ClientResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(request.file_name_at(at));
    fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "export saved");
    Ok(path)
}
