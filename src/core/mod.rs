//! Core router functionality

pub mod config;
pub mod constants;
pub mod logging;
pub mod provider;
pub mod providers;
pub mod router;
