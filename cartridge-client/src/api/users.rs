//! `/api/users`

use shared::Page;
use shared::models::{CreateUserRequest, UpdateUserRequest, User};

use crate::ClientResult;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::query::{QueryString, segment};

const BASE: &str = "/api/users";

pub struct UsersApi<'a> {
    http: &'a NetworkHttpClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(http: &'a NetworkHttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, page: u32, size: u32) -> ClientResult<Page<User>> {
        let mut q = QueryString::new();
        q.page(page, size);
        self.http.get(&q.to_path(BASE)).await
    }

    pub async fn get(&self, id: &str) -> ClientResult<User> {
        self.http.get(&segment(BASE, id)).await
    }

    pub async fn create(&self, req: &CreateUserRequest) -> ClientResult<User> {
        self.http.post(BASE, req).await
    }

    pub async fn update(&self, id: &str, req: &UpdateUserRequest) -> ClientResult<User> {
        self.http.put(&segment(BASE, id), req).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&segment(BASE, id)).await
    }

    pub async fn set_enabled(&self, id: &str, enabled: bool) -> ClientResult<()> {
        let mut q = QueryString::new();
        q.push_display("enabled", enabled);
        let path = format!("{}/status", segment(BASE, id));
        self.http.patch(&q.to_path(&path)).await
    }

    pub async fn change_password(&self, id: &str, new_password: &str) -> ClientResult<()> {
        let mut q = QueryString::new();
        q.push("newPassword", new_password);
        let path = format!("{}/password", segment(BASE, id));
        self.http.patch(&q.to_path(&path)).await
    }

    pub async fn exists(&self, username: &str) -> ClientResult<bool> {
        self.http
            .get(&segment(&format!("{}/exists", BASE), username))
            .await
    }
}
