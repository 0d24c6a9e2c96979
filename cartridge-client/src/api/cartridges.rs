//! `/api/cartridges`

use shared::Page;
use shared::models::{Cartridge, CartridgeRequest, CartridgeStatus};

use super::ListBody;
use crate::ClientResult;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::query::{QueryString, segment};

const BASE: &str = "/api/cartridges";

/// Server-side search parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartridgeSearch {
    pub model: Option<String>,
    pub serial_number: Option<String>,
}

impl CartridgeSearch {
    pub(crate) fn to_query(&self) -> QueryString {
        let mut q = QueryString::new();
        q.push_opt("model", self.model.as_deref())
            .push_opt("serialNumber", self.serial_number.as_deref());
        q
    }
}

pub struct CartridgesApi<'a> {
    http: &'a NetworkHttpClient,
}

impl<'a> CartridgesApi<'a> {
    pub(crate) fn new(http: &'a NetworkHttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, page: u32, size: u32) -> ClientResult<Page<Cartridge>> {
        let mut q = QueryString::new();
        q.page(page, size);
        self.http.get(&q.to_path(BASE)).await
    }

    pub async fn get(&self, id: &str) -> ClientResult<Cartridge> {
        self.http.get(&segment(BASE, id)).await
    }

    pub async fn by_serial(&self, serial_number: &str) -> ClientResult<Cartridge> {
        self.http
            .get(&segment(&format!("{}/serial", BASE), serial_number))
            .await
    }

    pub async fn create(&self, req: &CartridgeRequest) -> ClientResult<Cartridge> {
        self.http.post(BASE, req).await
    }

    pub async fn update(&self, id: &str, req: &CartridgeRequest) -> ClientResult<Cartridge> {
        self.http.put(&segment(BASE, id), req).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&segment(BASE, id)).await
    }

    pub async fn search(
        &self,
        search: &CartridgeSearch,
        page: u32,
        size: u32,
    ) -> ClientResult<Page<Cartridge>> {
        let mut q = search.to_query();
        q.page(page, size);
        self.http.get(&q.to_path(&format!("{}/search", BASE))).await
    }

    pub async fn by_status(&self, status: CartridgeStatus) -> ClientResult<Vec<Cartridge>> {
        let path = segment(&format!("{}/status", BASE), status.as_str());
        let body: ListBody<Cartridge> = self.http.get(&path).await?;
        Ok(body.into_vec())
    }

    pub async fn by_location(&self, location_id: &str) -> ClientResult<Vec<Cartridge>> {
        let path = segment(&format!("{}/location", BASE), location_id);
        let body: ListBody<Cartridge> = self.http.get(&path).await?;
        Ok(body.into_vec())
    }

    pub async fn count_by_status(&self, status: CartridgeStatus) -> ClientResult<u64> {
        let path = segment(&format!("{}/count/status", BASE), status.as_str());
        self.http.get(&path).await
    }
}
