pub mod company_brief;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod tone;
