//! `/api/operations`
//!
//! Operations are append-only: there is no update or delete.

use shared::Page;
use shared::models::{Operation, OperationRequest, OperationType};

use super::ListBody;
use crate::ClientResult;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::query::{QueryString, segment};

const BASE: &str = "/api/operations";

/// Server-side search parameters
///
/// Dates are passed through as ISO date-time strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationSearch {
    pub operation_type: Option<OperationType>,
    pub cartridge_id: Option<String>,
    pub location_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl OperationSearch {
    pub(crate) fn to_query(&self) -> QueryString {
        let mut q = QueryString::new();
        q.push_opt("type", self.operation_type.map(|t| t.as_str()))
            .push_opt("cartridgeId", self.cartridge_id.as_deref())
            .push_opt("locationId", self.location_id.as_deref())
            .push_opt("startDate", self.start_date.as_deref())
            .push_opt("endDate", self.end_date.as_deref());
        q
    }
}

pub struct OperationsApi<'a> {
    http: &'a NetworkHttpClient,
}

impl<'a> OperationsApi<'a> {
    pub(crate) fn new(http: &'a NetworkHttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, page: u32, size: u32) -> ClientResult<Page<Operation>> {
        let mut q = QueryString::new();
        q.page(page, size);
        self.http.get(&q.to_path(BASE)).await
    }

    pub async fn get(&self, id: &str) -> ClientResult<Operation> {
        self.http.get(&segment(BASE, id)).await
    }

    pub async fn create(&self, req: &OperationRequest) -> ClientResult<Operation> {
        self.http.post(BASE, req).await
    }

    pub async fn by_cartridge(&self, cartridge_id: &str) -> ClientResult<Vec<Operation>> {
        self.list_at(segment(&format!("{}/cartridge", BASE), cartridge_id))
            .await
    }

    pub async fn by_location(&self, location_id: &str) -> ClientResult<Vec<Operation>> {
        self.list_at(segment(&format!("{}/location", BASE), location_id))
            .await
    }

    pub async fn by_type(&self, operation_type: OperationType) -> ClientResult<Vec<Operation>> {
        self.list_at(segment(&format!("{}/type", BASE), operation_type.as_str()))
            .await
    }

    pub async fn by_user(&self, user_id: &str) -> ClientResult<Vec<Operation>> {
        self.list_at(segment(&format!("{}/user", BASE), user_id))
            .await
    }

    pub async fn by_date(&self, start_date: &str, end_date: &str) -> ClientResult<Vec<Operation>> {
        let mut q = QueryString::new();
        q.push("startDate", start_date).push("endDate", end_date);
        self.list_at(q.to_path(&format!("{}/date", BASE))).await
    }

    pub async fn search(
        &self,
        search: &OperationSearch,
        page: u32,
        size: u32,
    ) -> ClientResult<Page<Operation>> {
        let mut q = search.to_query();
        q.page(page, size);
        self.http.get(&q.to_path(&format!("{}/search", BASE))).await
    }

    async fn list_at(&self, path: String) -> ClientResult<Vec<Operation>> {
        let body: ListBody<Operation> = self.http.get(&path).await?;
        Ok(body.into_vec())
    }
}
