//! HTTP inbound adapter exposing REST endpoints.

pub mod contact;
pub mod error;
pub mod health;
pub mod pages;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use error::ApiResult;
