pub mod lead;
pub mod meeting;
pub mod objection;
pub mod pitch;
pub mod session;
pub mod user;
