pub mod api;
pub mod components;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod lifecycle;
pub mod models;
pub mod notify;
pub mod overlay;
pub mod panel;
pub mod session;
pub mod timer;
