//! Typed endpoints of the accounting REST API
//!
//! [`ApiClient`] hands out one borrowed handle per resource; each handle
//! builds paths and queries and delegates transport to [`HttpClient`].

mod auth;
mod cartridges;
mod dashboard;
mod export;
mod locations;
mod operations;
mod users;

pub use auth::AuthApi;
pub use cartridges::{CartridgeSearch, CartridgesApi};
pub use dashboard::{DashboardApi, StatusCounts};
pub use export::ExportApi;
pub use locations::{LocationSearch, LocationsApi};
pub use operations::{OperationSearch, OperationsApi};
pub use users::UsersApi;

use serde::Deserialize;
use shared::Page;

use crate::http::{HttpClient, NetworkHttpClient};

/// Typed API client
///
/// Clones share the transport and its bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: NetworkHttpClient,
}

impl ApiClient {
    pub fn new(http: NetworkHttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &NetworkHttpClient {
        &self.http
    }

    pub fn token(&self) -> Option<String> {
        self.http.token()
    }

    pub fn set_token(&self, token: Option<String>) {
        self.http.set_token(token);
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.http)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(&self.http)
    }

    pub fn cartridges(&self) -> CartridgesApi<'_> {
        CartridgesApi::new(&self.http)
    }

    pub fn locations(&self) -> LocationsApi<'_> {
        LocationsApi::new(&self.http)
    }

    pub fn operations(&self) -> OperationsApi<'_> {
        OperationsApi::new(&self.http)
    }

    pub fn export(&self) -> ExportApi<'_> {
        ExportApi::new(&self.http)
    }

    pub fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi::new(&self.http)
    }
}

/// Body of the unpaged list endpoints.
///
/// Some of them answer with a page envelope instead of a bare array; both
/// are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListBody<T> {
    List(Vec<T>),
    Page(Page<T>),
}

impl<T> ListBody<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            ListBody::List(items) => items,
            ListBody::Page(page) => page.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_body_accepts_both_shapes() {
        let body: ListBody<u32> = serde_json::from_str("[1,2,3]").unwrap();
        assert_eq!(body.into_vec(), vec![1, 2, 3]);

        let body: ListBody<u32> = serde_json::from_str(
            r#"{"content":[4],"totalElements":1,"totalPages":1,"size":10,"number":0}"#,
        )
        .unwrap();
        assert_eq!(body.into_vec(), vec![4]);
    }
}
