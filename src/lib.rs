pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod identity;
pub mod logging;
pub mod state;
pub mod types;
pub mod ui;
pub mod views;
