pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod models;
pub mod reconcile;
pub mod repository;
pub mod state;
pub mod store;
pub mod sync;
pub mod utils;
