pub mod client;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod server;
pub mod startup;
pub mod tools;
pub mod utils;
