//! Dashboard counters

use futures::future::try_join_all;
use shared::models::CartridgeStatus;

use super::CartridgesApi;
use crate::ClientResult;
use crate::http::NetworkHttpClient;

/// Cartridge count per status, in [`CartridgeStatus::ALL`] order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCounts {
    pub counts: Vec<(CartridgeStatus, u64)>,
}

impl StatusCounts {
    pub fn get(&self, status: CartridgeStatus) -> u64 {
        self.counts
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

pub struct DashboardApi<'a> {
    http: &'a NetworkHttpClient,
}

impl<'a> DashboardApi<'a> {
    pub(crate) fn new(http: &'a NetworkHttpClient) -> Self {
        Self { http }
    }

    /// Fetch every status count concurrently; fails if any request fails
    pub async fn status_counts(&self) -> ClientResult<StatusCounts> {
        let cartridges = CartridgesApi::new(self.http);
        let requests = CartridgeStatus::ALL.into_iter().map(|status| {
            let cartridges = &cartridges;
            async move {
                let n = cartridges.count_by_status(status).await?;
                Ok::<_, crate::ClientError>((status, n))
            }
        });
        let counts = try_join_all(requests).await?;
        tracing::debug!(statuses = counts.len(), "dashboard counts loaded");
        Ok(StatusCounts { counts })
    }
}
