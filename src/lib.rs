//! Fraud Monitor - drift RCA and incident logging for a fraud classifier

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod logic;

pub use config::MonitorConfig;
pub use error::{MonitorError, MonitorResult};
