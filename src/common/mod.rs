//! Common utilities and shared components

pub mod config;
pub mod constants;
pub mod error;

pub use config::*;
pub use constants::*;
pub use error::*;
