pub mod actions;
pub mod cli;
pub mod config;
pub mod errors;
pub mod github;
pub mod models;
pub mod pipeline;
pub mod report;
