//! Durable toggle registry for chat-bot "button toggles role" plugins.
//!
//! Maps trigger identifiers (buttons) to effect identifiers (roles),
//! keyed by the anchor (message) they are attached to and the scope
//! (guild) that owns the anchor. The mapping is held in memory behind a
//! reader-writer lock and rewritten to a JSON file after every mutation,
//! so it survives restarts.
//!
//! Everything platform-specific stays outside: the glue implements
//! [`EffectGateway`] for grant/revoke and calls [`ToggleService`] from
//! its command and interaction handlers.
//!
//! ```no_run
//! # async fn demo() {
//! use std::sync::Arc;
//! use toggle_registry::{JsonFileStore, ToggleService};
//!
//! let store = Arc::new(JsonFileStore::new("reaction_roles.json"));
//! let service = ToggleService::new(store, std::time::Duration::from_secs(5));
//!
//! // Once at startup: rehydrate and re-register anchors with the gateway.
//! let state = service.on_startup().await;
//! for anchors in state.values() {
//!     for anchor_id in anchors.keys() {
//!         let _buttons = service.bindings_for(anchor_id).await;
//!     }
//! }
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::engine::{OutcomeReport, ToggleDecision, ToggleEngine};
pub use application::errors::{
    ConfigError, GatewayError, RegistryError, StoreError, ToggleError,
};
pub use application::registry::Registry;
pub use application::services::ToggleService;
pub use domain::entities::{
    ActorId, AnchorId, Binding, BindingKey, ButtonStyle, EffectId, FullState, ScopeId, TriggerId,
    DEFAULT_LABEL,
};
pub use domain::traits::{BindingStore, EffectGateway};
pub use infrastructure::config::Config;
pub use infrastructure::storage::JsonFileStore;

use std::sync::Arc;

/// Build a service wired according to `config`: file store at the
/// configured path, configured save timeout and attach defaults.
pub fn service_from_config(config: &Config) -> ToggleService {
    let store = Arc::new(JsonFileStore::new(config.store.path.clone()));
    ToggleService::new(store, config.save_timeout())
        .with_defaults(config.defaults.label.clone(), config.defaults.style)
}
