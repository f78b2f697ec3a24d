//! Kernel module - infrastructure traits, adapters and test doubles.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

/// Default model for grounded market searches.
pub const GEMINI_2_5_FLASH: &str = "gemini-2.5-flash";

/// Sampling temperature used for searches unless configured otherwise.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub use deps::{AppDeps, FonnteAdapter, GeminiAdapter};
pub use test_dependencies::{MockMessageGateway, MockSearchModel, TestDependencies};
pub use traits::*;
