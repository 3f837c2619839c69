//! Authentication helpers used by HTTP handlers.
//!
//! Keep the handlers focused on request/response mapping by concentrating
//! credential checks here. Every failure branch surfaces the identical 401
//! payload so clients cannot enumerate identifiers through error differences.

use actix_web::HttpRequest;
use actix_web::http::header;
use tracing::debug;

use crate::domain::ports::AccountStore;
use crate::domain::{Account, BasicCredentials, Error};

/// Wire message shared by every authentication failure.
const AUTH_FAILED: &str = "Authentication failed";

fn auth_failure() -> Error {
    Error::unauthorized(AUTH_FAILED)
}

/// Resolve the request's Basic credentials against the store.
///
/// Returns the matched account; a missing or malformed header, an unknown
/// identifier, and a wrong secret are all reported identically.
pub async fn authenticate(req: &HttpRequest, store: &dyn AccountStore) -> Result<Account, Error> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            debug!("authorization header missing or not ASCII");
            auth_failure()
        })?;

    let credentials = BasicCredentials::decode(header).map_err(|err| {
        debug!(error = %err, "credential decode failed");
        auth_failure()
    })?;

    let account = store.find(credentials.user_id()).await.ok_or_else(|| {
        debug!("credentials did not match a stored account");
        auth_failure()
    })?;
    if !account.secret_matches(credentials.secret()) {
        debug!("credentials did not match a stored account");
        return Err(auth_failure());
    }

    Ok(account)
}
