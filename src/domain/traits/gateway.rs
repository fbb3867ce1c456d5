use async_trait::async_trait;

use crate::application::errors::GatewayError;

/// EffectGateway trait - abstraction for the platform adapter that
/// actually grants and revokes effects (roles) on actors.
///
/// Grant and revoke are expected to be idempotent at the platform layer,
/// so callers may retry safely; the core never retries on its own.
#[async_trait]
pub trait EffectGateway: Send + Sync {
    async fn grant_effect(&self, actor_id: &str, effect_id: &str) -> Result<(), GatewayError>;

    async fn revoke_effect(&self, actor_id: &str, effect_id: &str) -> Result<(), GatewayError>;
}
