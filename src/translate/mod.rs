//! Translation requests: prompt construction, the completion service, and
//! recovery of JSON from its replies.

mod keywords;
mod prompt;
pub mod repair;
mod requester;
mod service;

pub use keywords::KeywordSet;
pub use prompt::{INPUT_MARKER, build_prompt};
pub use repair::{parse_with_repair, repair_json};
pub use requester::{parse_response, translate_batch};
pub use service::{CompletionService, OpenAiClient};
