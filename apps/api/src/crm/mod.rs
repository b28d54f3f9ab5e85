pub mod leads;
pub mod meetings;
pub mod objections;
pub mod prompts;
