//! HTTP application assembly.
//!
//! `build_app` is the single place routes are registered so the binary and
//! the integration tests serve exactly the same application.

pub mod config;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::inbound::http::{AppState, accounts};

pub use config::ServerConfig;

/// Assemble the actix application around the shared state.
pub fn build_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .service(accounts::banner)
        .service(accounts::signup)
        .service(accounts::get_user)
        .service(accounts::update_user)
        .service(accounts::close_account)
}
