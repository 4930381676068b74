pub mod app_state;
pub mod auth;
pub mod client;
pub mod config;
pub mod cors;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;

#[cfg(test)]
pub mod test_utils;
