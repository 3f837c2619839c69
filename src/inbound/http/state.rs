//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the store port and stay testable with an isolated store per test run.

use std::sync::Arc;

use crate::domain::UserIdPolicy;
use crate::domain::ports::AccountStore;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AccountStore>,
    pub id_policy: UserIdPolicy,
}

impl AppState {
    /// Bundle a store with the identifier policy in force.
    pub fn new(store: Arc<dyn AccountStore>, id_policy: UserIdPolicy) -> Self {
        Self { store, id_policy }
    }
}
