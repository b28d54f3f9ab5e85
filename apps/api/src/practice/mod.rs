pub mod critique;
pub mod handlers;
pub mod progress;
pub mod prompts;
