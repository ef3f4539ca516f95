pub mod api;
pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
