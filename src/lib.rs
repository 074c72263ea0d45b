pub mod cache;
pub mod client;
pub mod config;
pub mod graphql;
pub mod link;
pub mod runtime;
