//! HTTP inbound adapter exposing the account endpoints.

pub mod accounts;
pub mod auth;
pub mod error;
pub mod state;

pub use error::ApiResult;
pub use state::AppState;
