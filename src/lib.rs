pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
