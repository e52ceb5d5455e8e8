pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod policy;
pub mod seed;
pub mod telemetry;
