pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;
