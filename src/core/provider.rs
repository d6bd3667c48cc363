//! Remote rate source abstraction

use crate::core::rate::ApiRateSnapshot;
use async_trait::async_trait;

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the current snapshot. `None` means the fetch failed, for any reason.
    async fn fetch_rates(&self) -> Option<ApiRateSnapshot>;
}
