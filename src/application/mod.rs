//! Application layer - registry, toggle engine, boundary services

pub mod engine;
pub mod errors;
pub mod registry;
pub mod services;
