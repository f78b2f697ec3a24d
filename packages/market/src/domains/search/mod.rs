// Search domain - grounded market searches and "load more" follow-ups
//
// Responsibilities:
// - Build leads/suppliers prompts (location phrasing, radius widening, exclusions)
// - Call the search model through the kernel trait and normalize its reply
// - Refine follow-up requests from names already shown
// - Track loading state, merged results and the selected lead per session

pub mod errors;
pub mod machines;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod refiner;
pub mod session;

pub use errors::SearchError;
pub use machines::{LoadingState, SearchCommand, SearchEvent, SearchMachine};
pub use models::{
    Coordinates, GroundingSource, MapsSource, SearchMode, SearchRequest, SearchResponse,
    WebSource, MORE_RESULTS_HEADING,
};
pub use orchestrator::{SearchOrchestrator, NO_MATCHING_DATA};
pub use prompts::{build_prompt, PromptSet};
pub use refiner::{extract_seen_names, follow_up_request, MAX_EXCLUDED_NAMES};
pub use session::SearchSession;
