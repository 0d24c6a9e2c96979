//! `/api/export`

use std::path::{Path, PathBuf};

use crate::ClientResult;
use crate::export::{ExportRequest, save_export};
use crate::http::{HttpClient, NetworkHttpClient};

pub struct ExportApi<'a> {
    http: &'a NetworkHttpClient,
}

impl<'a> ExportApi<'a> {
    pub(crate) fn new(http: &'a NetworkHttpClient) -> Self {
        Self { http }
    }

    /// Download the workbook bytes
    pub async fn fetch(&self, request: &ExportRequest) -> ClientResult<Vec<u8>> {
        self.http.get_bytes(&request.path()).await
    }

    /// Download and save into `dir`
    pub async fn download(&self, request: &ExportRequest, dir: &Path) -> ClientResult<PathBuf> {
        let bytes = self.fetch(request).await?;
        save_export(dir, request, &bytes, chrono::Utc::now())
    }
}
