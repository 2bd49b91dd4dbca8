pub mod openai_client;
pub mod prompt;
pub mod renderer;

pub use openai_client::{ChatBackend, ChatCompletionRequest, OpenAIClient};
pub use prompt::{build_itinerary_prompt, SYSTEM_PROMPT};
pub use renderer::{render_failure, render_hotels, render_itinerary};
