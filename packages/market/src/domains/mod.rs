pub mod markdown;
pub mod messaging;
pub mod search;
