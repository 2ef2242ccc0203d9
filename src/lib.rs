pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod reporting;
