//! List/filter/paginate/mutate controller shared by every resource page
//!
//! A page is fetched with a fixed size of 10. Filters narrow the page that
//! is already loaded unless server filtering is switched on and the
//! resource has a search endpoint. Every mutation is followed by a re-fetch
//! of the current page.

use async_trait::async_trait;
use shared::Page;
use shared::models::{
    Cartridge, CartridgeStatus, Location, Operation, OperationType, PAGE_SIZE, Role, User,
};

use crate::api::{ApiClient, CartridgeSearch, LocationSearch, OperationSearch};
use crate::{ClientError, ClientResult};

/// Page-local filter over one resource's items
pub trait ListFilter<T>: Default + Clone + Send + Sync {
    /// No criteria set
    fn is_empty(&self) -> bool;
    fn matches(&self, item: &T) -> bool;
}

/// A listable resource
#[async_trait]
pub trait ListResource: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;
    type Filter: ListFilter<Self::Item> + 'static;

    /// Console route of the list page
    const ROUTE: &'static str;
    /// Alert shown when the page cannot be loaded
    const LOAD_FAILED: &'static str;
    /// Whether [`ListResource::search_page`] forwards filters to the server
    const SERVER_FILTER: bool = false;

    async fn fetch_page(api: &ApiClient, page: u32, size: u32) -> ClientResult<Page<Self::Item>>;

    async fn search_page(
        api: &ApiClient,
        _filter: &Self::Filter,
        page: u32,
        size: u32,
    ) -> ClientResult<Page<Self::Item>> {
        Self::fetch_page(api, page, size).await
    }
}

/// A resource whose items can be deleted
#[async_trait]
pub trait DeletableResource: ListResource {
    /// Alert shown when a delete fails without a server message
    const DELETE_FAILED: &'static str;

    fn id_of(item: &Self::Item) -> &str;

    async fn delete(api: &ApiClient, id: &str) -> ClientResult<()>;
}

/// Controller state for one list page
pub struct ListController<R: ListResource> {
    api: ApiClient,
    page: u32,
    items: Vec<R::Item>,
    total_elements: u64,
    total_pages: u32,
    filter: R::Filter,
    server_filters: bool,
}

impl<R: ListResource> ListController<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            page: 0,
            items: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            filter: R::Filter::default(),
            server_filters: false,
        }
    }

    /// Forward filters to the search endpoint when the resource has one
    pub fn server_filters(mut self, enabled: bool) -> Self {
        self.server_filters = enabled;
        self
    }

    pub fn with_filter(mut self, filter: R::Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Start on a 1-based page number without fetching; 0 is treated as 1
    pub fn starting_at(mut self, display_page: u32) -> Self {
        self.page = display_page.saturating_sub(1);
        self
    }

    pub fn set_filter(&mut self, filter: R::Filter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> &R::Filter {
        &self.filter
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    fn uses_server_filter(&self) -> bool {
        self.server_filters && R::SERVER_FILTER && !self.filter.is_empty()
    }

    /// Fetch the current page
    pub async fn load(&mut self) -> ClientResult<()> {
        let page = if self.uses_server_filter() {
            R::search_page(&self.api, &self.filter, self.page, PAGE_SIZE).await?
        } else {
            R::fetch_page(&self.api, self.page, PAGE_SIZE).await?
        };
        tracing::debug!(
            route = R::ROUTE,
            page = self.page,
            items = page.content.len(),
            total = page.total_elements,
            "page loaded"
        );
        self.total_elements = page.total_elements;
        self.total_pages = page.total_pages;
        self.items = page.content;
        Ok(())
    }

    /// 0-based page index as sent on the wire
    pub fn page(&self) -> u32 {
        self.page
    }

    /// 1-based page number shown to the operator
    pub fn display_page(&self) -> u32 {
        self.page + 1
    }

    pub async fn go_to_page(&mut self, page: u32) -> ClientResult<()> {
        self.page = page;
        self.load().await
    }

    /// Jump to a 1-based page number; 0 is treated as 1
    pub async fn go_to_display_page(&mut self, display_page: u32) -> ClientResult<()> {
        self.go_to_page(display_page.saturating_sub(1)).await
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub async fn next_page(&mut self) -> ClientResult<bool> {
        if !self.has_next() {
            return Ok(false);
        }
        self.go_to_page(self.page + 1).await?;
        Ok(true)
    }

    pub async fn previous_page(&mut self) -> ClientResult<bool> {
        if !self.has_previous() {
            return Ok(false);
        }
        self.go_to_page(self.page - 1).await?;
        Ok(true)
    }

    /// Everything on the loaded page
    pub fn items(&self) -> &[R::Item] {
        &self.items
    }

    /// Loaded page narrowed by the filter
    pub fn visible(&self) -> Vec<&R::Item> {
        self.items
            .iter()
            .filter(|item| self.filter.matches(item))
            .collect()
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Re-fetch after a mutation, stepping back a page if this one emptied
    pub async fn refresh(&mut self) -> ClientResult<()> {
        self.load().await?;
        if self.items.is_empty() && self.page > 0 {
            self.page -= 1;
            self.load().await?;
        }
        Ok(())
    }

    /// Run a mutation, then re-fetch the current page
    ///
    /// Only a failed mutation is an `Err`. A failed re-fetch is reported in
    /// [`Mutation::refresh_error`] and leaves the previous page in place.
    pub async fn mutate<T, F, Fut>(&mut self, op: F) -> ClientResult<Mutation<T>>
    where
        F: FnOnce(ApiClient) -> Fut,
        Fut: std::future::Future<Output = ClientResult<T>>,
    {
        let value = op(self.api.clone()).await?;
        let refresh_error = match self.refresh().await {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(route = R::ROUTE, error = %e, "re-fetch after mutation failed");
                Some(e)
            }
        };
        Ok(Mutation {
            value,
            refresh_error,
        })
    }
}

/// A mutation that went through, plus the outcome of the re-fetch after it
#[derive(Debug)]
pub struct Mutation<T> {
    pub value: T,
    pub refresh_error: Option<ClientError>,
}

impl<T> Mutation<T> {
    pub fn into_value(self) -> T {
        self.value
    }
}

impl<R: DeletableResource> ListController<R> {
    /// Find a loaded item by id
    pub fn find(&self, id: &str) -> Option<&R::Item> {
        self.items.iter().find(|item| R::id_of(item) == id)
    }

    /// Delete by id, then re-fetch
    pub async fn delete(&mut self, id: &str) -> ClientResult<Mutation<()>> {
        let id = id.to_string();
        self.mutate(|api| async move { R::delete(&api, &id).await })
            .await
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// Matches when the criterion is unset or is a case-insensitive substring of `field`
fn text_matches(criterion: &Option<String>, field: Option<&str>) -> bool {
    match criterion.as_deref().map(str::trim) {
        None | Some("") => true,
        Some(needle) => field.is_some_and(|f| contains_ci(f, needle)),
    }
}

// ========== Users ==========

/// Users list page
pub struct Users;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Substring of username or full name
    pub query: Option<String>,
    pub role: Option<Role>,
}

impl ListFilter<User> for UserFilter {
    fn is_empty(&self) -> bool {
        blank(&self.query) && self.role.is_none()
    }

    fn matches(&self, user: &User) -> bool {
        let text = text_matches(&self.query, Some(user.username.as_str()))
            || text_matches(&self.query, Some(user.full_name.as_str()));
        text && self.role.is_none_or(|r| r == user.role)
    }
}

#[async_trait]
impl ListResource for Users {
    type Item = User;
    type Filter = UserFilter;

    const ROUTE: &'static str = "/users";
    const LOAD_FAILED: &'static str = "Ошибка загрузки пользователей";

    async fn fetch_page(api: &ApiClient, page: u32, size: u32) -> ClientResult<Page<User>> {
        api.users().list(page, size).await
    }
}

#[async_trait]
impl DeletableResource for Users {
    const DELETE_FAILED: &'static str = "Ошибка при удалении пользователя";

    fn id_of(item: &User) -> &str {
        &item.id
    }

    async fn delete(api: &ApiClient, id: &str) -> ClientResult<()> {
        api.users().delete(id).await
    }
}

// ========== Cartridges ==========

/// Cartridges list page
pub struct Cartridges;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartridgeFilter {
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub status: Option<CartridgeStatus>,
}

impl ListFilter<Cartridge> for CartridgeFilter {
    fn is_empty(&self) -> bool {
        blank(&self.model) && blank(&self.serial_number) && self.status.is_none()
    }

    fn matches(&self, c: &Cartridge) -> bool {
        text_matches(&self.model, Some(c.model.as_str()))
            && text_matches(&self.serial_number, c.serial_number.as_deref())
            && self.status.is_none_or(|s| s == c.status)
    }
}

#[async_trait]
impl ListResource for Cartridges {
    type Item = Cartridge;
    type Filter = CartridgeFilter;

    const ROUTE: &'static str = "/cartridges";
    const LOAD_FAILED: &'static str = "Ошибка загрузки картриджей";
    const SERVER_FILTER: bool = true;

    async fn fetch_page(api: &ApiClient, page: u32, size: u32) -> ClientResult<Page<Cartridge>> {
        api.cartridges().list(page, size).await
    }

    async fn search_page(
        api: &ApiClient,
        filter: &CartridgeFilter,
        page: u32,
        size: u32,
    ) -> ClientResult<Page<Cartridge>> {
        let search = CartridgeSearch {
            model: filter.model.clone(),
            serial_number: filter.serial_number.clone(),
        };
        api.cartridges().search(&search, page, size).await
    }
}

#[async_trait]
impl DeletableResource for Cartridges {
    const DELETE_FAILED: &'static str = "Ошибка при удалении картриджа";

    fn id_of(item: &Cartridge) -> &str {
        &item.id
    }

    async fn delete(api: &ApiClient, id: &str) -> ClientResult<()> {
        api.cartridges().delete(id).await
    }
}

// ========== Locations ==========

/// Locations list page
pub struct Locations;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationFilter {
    pub name: Option<String>,
    pub address: Option<String>,
}

impl ListFilter<Location> for LocationFilter {
    fn is_empty(&self) -> bool {
        blank(&self.name) && blank(&self.address)
    }

    fn matches(&self, l: &Location) -> bool {
        text_matches(&self.name, Some(l.name.as_str())) && text_matches(&self.address, Some(l.address.as_str()))
    }
}

#[async_trait]
impl ListResource for Locations {
    type Item = Location;
    type Filter = LocationFilter;

    const ROUTE: &'static str = "/locations";
    const LOAD_FAILED: &'static str = "Ошибка загрузки объектов";
    const SERVER_FILTER: bool = true;

    async fn fetch_page(api: &ApiClient, page: u32, size: u32) -> ClientResult<Page<Location>> {
        api.locations().list(page, size).await
    }

    async fn search_page(
        api: &ApiClient,
        filter: &LocationFilter,
        page: u32,
        size: u32,
    ) -> ClientResult<Page<Location>> {
        let search = LocationSearch {
            name: filter.name.clone(),
            address: filter.address.clone(),
        };
        api.locations().search(&search, page, size).await
    }
}

#[async_trait]
impl DeletableResource for Locations {
    const DELETE_FAILED: &'static str = "Ошибка удаления объекта";

    fn id_of(item: &Location) -> &str {
        &item.id
    }

    async fn delete(api: &ApiClient, id: &str) -> ClientResult<()> {
        api.locations().delete(id).await
    }
}

// ========== Operations ==========

/// Operations list page
pub struct Operations;

/// Dates apply only when forwarded to the server
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationFilter {
    pub operation_type: Option<OperationType>,
    pub cartridge_id: Option<String>,
    pub location_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ListFilter<Operation> for OperationFilter {
    fn is_empty(&self) -> bool {
        self.operation_type.is_none()
            && blank(&self.cartridge_id)
            && blank(&self.location_id)
            && blank(&self.start_date)
            && blank(&self.end_date)
    }

    fn matches(&self, op: &Operation) -> bool {
        let id_matches = |criterion: &Option<String>, field: Option<&str>| match criterion
            .as_deref()
            .map(str::trim)
        {
            None | Some("") => true,
            Some(id) => field == Some(id),
        };
        self.operation_type.is_none_or(|t| t == op.operation_type)
            && id_matches(&self.cartridge_id, Some(op.cartridge_id.as_str()))
            && id_matches(&self.location_id, op.location_id.as_deref())
    }
}

#[async_trait]
impl ListResource for Operations {
    type Item = Operation;
    type Filter = OperationFilter;

    const ROUTE: &'static str = "/operations";
    const LOAD_FAILED: &'static str = "Ошибка загрузки операций";
    const SERVER_FILTER: bool = true;

    async fn fetch_page(api: &ApiClient, page: u32, size: u32) -> ClientResult<Page<Operation>> {
        api.operations().list(page, size).await
    }

    async fn search_page(
        api: &ApiClient,
        filter: &OperationFilter,
        page: u32,
        size: u32,
    ) -> ClientResult<Page<Operation>> {
        let search = OperationSearch {
            operation_type: filter.operation_type,
            cartridge_id: filter.cartridge_id.clone(),
            location_id: filter.location_id.clone(),
            start_date: filter.start_date.clone(),
            end_date: filter.end_date.clone(),
        };
        api.operations().search(&search, page, size).await
    }
}

/// Load failure text for the inline alert
pub fn load_error<R: ListResource>(err: &ClientError) -> String {
    err.user_message(R::LOAD_FAILED)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, full_name: &str, role: Role) -> User {
        User {
            id: username.to_string(),
            username: username.to_string(),
            full_name: full_name.to_string(),
            role,
            enabled: true,
        }
    }

    fn cartridge(model: &str, status: CartridgeStatus) -> Cartridge {
        let json = serde_json::json!({
            "id": model,
            "model": model,
            "status": status,
        });
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_user_filter() {
        let ivanov = user("ivanov", "Иванов Иван", Role::Admin);
        let petrov = user("petrov", "Петров Пётр", Role::ObjectUser);

        let filter = UserFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&ivanov));

        let filter = UserFilter {
            query: Some("иван".into()),
            role: None,
        };
        assert!(filter.matches(&ivanov));
        assert!(!filter.matches(&petrov));

        let filter = UserFilter {
            query: Some("PET".into()),
            role: Some(Role::Admin),
        };
        assert!(!filter.matches(&petrov));
    }

    #[test]
    fn test_cartridge_filter() {
        let a = cartridge("HP CF285A", CartridgeStatus::InStock);
        let b = cartridge("Canon 725", CartridgeStatus::Refilling);

        let filter = CartridgeFilter {
            model: Some("cf285".into()),
            ..Default::default()
        };
        assert!(filter.matches(&a));
        assert!(!filter.matches(&b));

        let filter = CartridgeFilter {
            status: Some(CartridgeStatus::Refilling),
            model: Some("  ".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&a));
        assert!(filter.matches(&b));

        // serial filter rejects cartridges without a serial
        let filter = CartridgeFilter {
            serial_number: Some("SN".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&a));
    }

    #[test]
    fn test_operation_filter_ignores_dates_locally() {
        let op: Operation = serde_json::from_value(serde_json::json!({
            "id": "o1", "type": "ISSUE", "count": 1,
            "cartridgeId": "c1", "locationId": "l1"
        }))
        .unwrap();

        let filter = OperationFilter {
            start_date: Some("2030-01-01T00:00:00".into()),
            ..Default::default()
        };
        assert!(!filter.is_empty());
        assert!(filter.matches(&op));

        let filter = OperationFilter {
            operation_type: Some(OperationType::Issue),
            location_id: Some("l2".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&op));
    }

    #[test]
    fn test_location_filter() {
        let loc: Location = serde_json::from_value(serde_json::json!({
            "id": "l1", "name": "Главный склад", "address": "ул. Мира, 5", "active": true
        }))
        .unwrap();
        let filter = LocationFilter {
            name: Some("склад".into()),
            address: Some("мира".into()),
        };
        assert!(filter.matches(&loc));
        let filter = LocationFilter {
            address: Some("Ленина".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&loc));
    }
}
