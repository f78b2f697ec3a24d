//! Command implementations

pub mod message;
pub mod search;
pub mod settings;
