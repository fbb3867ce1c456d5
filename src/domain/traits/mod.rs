pub mod gateway;
pub mod store;

pub use gateway::EffectGateway;
pub use store::BindingStore;
