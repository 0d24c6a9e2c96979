//! `/api/locations`

use shared::Page;
use shared::models::{Location, LocationRequest};

use super::ListBody;
use crate::ClientResult;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::query::{QueryString, segment};

const BASE: &str = "/api/locations";

/// Server-side search parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationSearch {
    pub name: Option<String>,
    pub address: Option<String>,
}

impl LocationSearch {
    pub(crate) fn to_query(&self) -> QueryString {
        let mut q = QueryString::new();
        q.push_opt("name", self.name.as_deref())
            .push_opt("address", self.address.as_deref());
        q
    }
}

pub struct LocationsApi<'a> {
    http: &'a NetworkHttpClient,
}

impl<'a> LocationsApi<'a> {
    pub(crate) fn new(http: &'a NetworkHttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, page: u32, size: u32) -> ClientResult<Page<Location>> {
        let mut q = QueryString::new();
        q.page(page, size);
        self.http.get(&q.to_path(BASE)).await
    }

    pub async fn get(&self, id: &str) -> ClientResult<Location> {
        self.http.get(&segment(BASE, id)).await
    }

    pub async fn create(&self, req: &LocationRequest) -> ClientResult<Location> {
        self.http.post(BASE, req).await
    }

    pub async fn update(&self, id: &str, req: &LocationRequest) -> ClientResult<Location> {
        self.http.put(&segment(BASE, id), req).await
    }

    /// Refused with [`shared::ErrorCode::LocationHasCartridges`] while cartridges are attached
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&segment(BASE, id)).await
    }

    pub async fn search(
        &self,
        search: &LocationSearch,
        page: u32,
        size: u32,
    ) -> ClientResult<Page<Location>> {
        let mut q = search.to_query();
        q.page(page, size);
        self.http.get(&q.to_path(&format!("{}/search", BASE))).await
    }

    pub async fn active(&self) -> ClientResult<Vec<Location>> {
        let body: ListBody<Location> = self.http.get(&format!("{}/active", BASE)).await?;
        Ok(body.into_vec())
    }

    pub async fn set_active(&self, id: &str, active: bool) -> ClientResult<()> {
        let mut q = QueryString::new();
        q.push_display("active", active);
        let path = format!("{}/status", segment(BASE, id));
        self.http.patch(&q.to_path(&path)).await
    }
}
