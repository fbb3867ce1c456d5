//! Domain entities - Core business objects with no external dependencies

pub mod binding;

pub use binding::{
    ActorId, AnchorId, Binding, BindingKey, ButtonStyle, EffectId, FullState, ScopeId, TriggerId,
    DEFAULT_LABEL,
};
