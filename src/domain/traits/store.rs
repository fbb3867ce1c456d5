use async_trait::async_trait;

use crate::application::errors::StoreError;
use crate::domain::entities::FullState;

/// BindingStore trait - abstraction for durable binding persistence
///
/// The registry is the single writer; implementations only need to make
/// each `save` all-or-nothing.
#[async_trait]
pub trait BindingStore: Send + Sync {
    /// Read the durable state. Returns an empty mapping when no prior
    /// state exists.
    async fn load(&self) -> Result<FullState, StoreError>;

    /// Replace the durable state with `state` atomically.
    async fn save(&self, state: &FullState) -> Result<(), StoreError>;
}
