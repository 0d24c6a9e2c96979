//! Delete confirmation dialog state

use crate::api::ApiClient;
use crate::listing::{DeletableResource, ListController, load_error};

/// Where a delete confirmation stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteState {
    /// Awaiting the operator's decision
    Pending,
    Deleted,
    /// Referential conflict; the destructive action is withdrawn
    Blocked(String),
    /// Any other failure; the operator may retry
    Failed(String),
}

/// Snapshot of the item about to be deleted plus the dialog state
pub struct DeleteConfirmation<R: DeletableResource> {
    item: R::Item,
    state: DeleteState,
    refresh_error: Option<String>,
}

impl<R: DeletableResource> DeleteConfirmation<R> {
    pub fn new(item: R::Item) -> Self {
        Self {
            item,
            state: DeleteState::Pending,
            refresh_error: None,
        }
    }

    pub fn item(&self) -> &R::Item {
        &self.item
    }

    pub fn id(&self) -> &str {
        R::id_of(&self.item)
    }

    pub fn state(&self) -> &DeleteState {
        &self.state
    }

    /// Alert for a page that could not be re-fetched after a successful delete
    pub fn refresh_error(&self) -> Option<&str> {
        self.refresh_error.as_deref()
    }

    /// `false` once blocked or deleted
    pub fn can_confirm(&self) -> bool {
        matches!(self.state, DeleteState::Pending | DeleteState::Failed(_))
    }

    /// Issue the delete
    pub async fn confirm(&mut self, api: &ApiClient) -> &DeleteState {
        if !self.can_confirm() {
            return &self.state;
        }
        let result = R::delete(api, R::id_of(&self.item)).await;
        self.state = Self::settle(result);
        &self.state
    }

    /// Issue the delete through a list controller so its page is re-fetched
    pub async fn confirm_in(&mut self, list: &mut ListController<R>) -> &DeleteState {
        if !self.can_confirm() {
            return &self.state;
        }
        let id = R::id_of(&self.item).to_string();
        match list.delete(&id).await {
            Ok(done) => {
                self.refresh_error = done.refresh_error.map(|e| load_error::<R>(&e));
                self.state = Self::settle(Ok(()));
            }
            Err(e) => self.state = Self::settle(Err(e)),
        }
        &self.state
    }

    fn settle(result: crate::ClientResult<()>) -> DeleteState {
        match result {
            Ok(()) => DeleteState::Deleted,
            Err(e) if e.is_delete_blocker() => {
                tracing::warn!(error = %e, "delete blocked by related records");
                DeleteState::Blocked(e.user_message(R::DELETE_FAILED))
            }
            Err(e) => {
                tracing::error!(error = %e, "delete failed");
                DeleteState::Failed(e.user_message(R::DELETE_FAILED))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::Locations;
    use shared::models::Location;

    fn location() -> Location {
        serde_json::from_value(serde_json::json!({
            "id": "l1", "name": "Склад", "address": "ул. Мира, 5", "active": true
        }))
        .unwrap()
    }

    #[test]
    fn test_pending_can_confirm() {
        let dialog = DeleteConfirmation::<Locations>::new(location());
        assert_eq!(dialog.state(), &DeleteState::Pending);
        assert!(dialog.can_confirm());
        assert_eq!(dialog.id(), "l1");
        assert_eq!(dialog.item().name, "Склад");
    }

    #[test]
    fn test_settle_outcomes() {
        let blocked = DeleteConfirmation::<Locations>::settle(Err(crate::ClientError::Api {
            code: shared::ErrorCode::LocationHasCartridges,
            status: 500,
            message: "имеет 2 связанных картриджей".into(),
        }));
        assert_eq!(blocked, DeleteState::Blocked("имеет 2 связанных картриджей".into()));

        let failed = DeleteConfirmation::<Locations>::settle(Err(crate::ClientError::Api {
            code: shared::ErrorCode::InternalError,
            status: 500,
            message: String::new(),
        }));
        assert_eq!(failed, DeleteState::Failed("Ошибка удаления объекта".into()));

        let mut dialog = DeleteConfirmation::<Locations>::new(location());
        dialog.state = blocked;
        assert!(!dialog.can_confirm());
        dialog.state = failed;
        assert!(dialog.can_confirm());
        dialog.state = DeleteState::Deleted;
        assert!(!dialog.can_confirm());
    }
}
