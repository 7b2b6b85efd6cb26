pub mod agent;
pub mod errors;
pub mod ingestion;
pub mod mailbox;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod providers;
pub mod rules;
pub mod storage;
