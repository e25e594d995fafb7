//! Guest dataset source trait

use async_trait::async_trait;

use crate::{GuestRecord, Result};

/// Trait for guest dataset providers (local files, dataset hubs, etc.)
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Load every guest record, in dataset order
    async fn load(&self) -> Result<Vec<GuestRecord>>;

    /// Human readable description of where the records come from
    fn describe(&self) -> String;
}
