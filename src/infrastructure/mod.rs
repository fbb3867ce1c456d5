//! Infrastructure layer - storage and configuration

pub mod config;
pub mod storage;
