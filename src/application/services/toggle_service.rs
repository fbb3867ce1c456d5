//! Toggle service - the boundary the platform glue calls into
//!
//! The glue (slash-command parsing, message editing, embeds) stays
//! outside; it hands this service identifiers and an `EffectGateway`
//! and renders whatever comes back.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::application::engine::{OutcomeReport, ToggleDecision, ToggleEngine};
use crate::application::errors::{RegistryError, ToggleError};
use crate::application::registry::Registry;
use crate::domain::entities::{Binding, ButtonStyle, EffectId, FullState, DEFAULT_LABEL};
use crate::domain::traits::{BindingStore, EffectGateway};

pub struct ToggleService {
    registry: Registry,
    store: Arc<dyn BindingStore>,
    default_label: String,
    default_style: Option<ButtonStyle>,
}

impl ToggleService {
    pub fn new(store: Arc<dyn BindingStore>, save_timeout: Duration) -> Self {
        Self {
            registry: Registry::new(store.clone(), save_timeout),
            store,
            default_label: DEFAULT_LABEL.to_string(),
            default_style: None,
        }
    }

    /// Override the label and style applied when an attach gives none.
    /// An unset style keeps the random pick.
    pub fn with_defaults(mut self, label: impl Into<String>, style: Option<ButtonStyle>) -> Self {
        self.default_label = label.into();
        self.default_style = style;
        self
    }

    /// Load durable state and rehydrate the registry. Returns the loaded
    /// state so the caller can re-register every known anchor with the
    /// platform gateway.
    ///
    /// A corrupt or unreadable state file is logged and treated as empty;
    /// startup never fails on it.
    pub async fn on_startup(&self) -> FullState {
        let state = match self.store.load().await {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Could not load persisted bindings, starting empty: {}", e);
                FullState::new()
            }
        };

        let anchors: usize = state.values().map(|a| a.len()).sum();
        tracing::info!(
            "Rehydrated {} scope(s), {} anchor(s)",
            state.len(),
            anchors
        );

        self.registry.rehydrate(state.clone()).await;
        state
    }

    /// Operator attaches a trigger to an anchor. Label defaults to the
    /// stock emoji and style to a random pick, matching what operators
    /// get when they leave the options out.
    pub async fn on_attach(
        &self,
        scope_id: impl Into<String>,
        anchor_id: impl Into<String>,
        trigger_id: impl Into<String>,
        effect_id: impl Into<String>,
        label: Option<String>,
        style: Option<ButtonStyle>,
    ) -> Result<Binding, ToggleError> {
        let binding = Binding::new(scope_id, anchor_id, trigger_id, effect_id)
            .with_label(label.unwrap_or_else(|| self.default_label.clone()))
            .with_style(
                style
                    .or(self.default_style)
                    .unwrap_or_else(ButtonStyle::random),
            );

        self.registry.add(binding.clone()).await?;
        tracing::info!(
            "Attached trigger {} -> effect {} on anchor {}",
            binding.trigger_id,
            binding.effect_id,
            binding.anchor_id
        );
        Ok(binding)
    }

    /// Operator detaches a trigger from an anchor, returning the removed
    /// binding for display.
    pub async fn on_detach(
        &self,
        scope_id: &str,
        anchor_id: &str,
        trigger_id: &str,
    ) -> Result<Binding, ToggleError> {
        let removed = self.registry.remove(scope_id, anchor_id, trigger_id).await?;
        tracing::info!(
            "Detached trigger {} from anchor {}",
            removed.trigger_id,
            removed.anchor_id
        );
        Ok(removed)
    }

    /// End user activated a trigger: look up its binding and decide
    /// grant-vs-revoke against the actor's current effects. `NotFound`
    /// means the trigger fired on an unknown pair and the caller reports
    /// a no-op.
    pub async fn on_trigger(
        &self,
        anchor_id: &str,
        trigger_id: &str,
        actor_effects: &HashSet<EffectId>,
    ) -> Result<ToggleDecision, ToggleError> {
        let binding = self
            .registry
            .lookup(anchor_id, trigger_id)
            .await
            .ok_or_else(|| RegistryError::NotFound {
                anchor_id: anchor_id.to_string(),
                trigger_id: trigger_id.to_string(),
            })?;
        Ok(ToggleEngine::decide(&binding.effect_id, actor_effects))
    }

    /// Full activation flow: decide, drive the gateway, report. Gateway
    /// failures land in the report for the caller to surface to the end
    /// user; they are never retried here.
    pub async fn trigger_and_apply(
        &self,
        anchor_id: &str,
        trigger_id: &str,
        actor_id: &str,
        actor_effects: &HashSet<EffectId>,
        gateway: &dyn EffectGateway,
    ) -> Result<OutcomeReport, ToggleError> {
        let binding = self
            .registry
            .lookup(anchor_id, trigger_id)
            .await
            .ok_or_else(|| RegistryError::NotFound {
                anchor_id: anchor_id.to_string(),
                trigger_id: trigger_id.to_string(),
            })?;

        let decision = ToggleEngine::decide(&binding.effect_id, actor_effects);
        let outcome = match decision {
            ToggleDecision::Grant => gateway.grant_effect(actor_id, &binding.effect_id).await,
            ToggleDecision::Revoke => gateway.revoke_effect(actor_id, &binding.effect_id).await,
        };
        Ok(ToggleEngine::apply(decision, outcome))
    }

    /// Bindings of one anchor in display order, for re-rendering.
    pub async fn bindings_for(&self, anchor_id: &str) -> Vec<Binding> {
        self.registry.list_by_anchor(anchor_id).await
    }

    /// Wait for all scheduled persists; call before shutdown.
    pub async fn flush(&self) {
        self.registry.flush().await;
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
