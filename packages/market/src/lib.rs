// Aufmarket - market research core
//
// Finds potential buyers (leads) or first-hand suppliers with a grounded
// generative model, renders the returned markdown tables as selectable rows,
// exports them as CSV and drafts WhatsApp outreach for a selected row.
//
// Domain logic lives in domains/*; outside services are reached only through
// the traits in kernel/.

pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
