//! Account API handlers.
//!
//! ```text
//! POST  /signup           {"user_id":"...","password":"..."}
//! GET   /users/{user_id}  (Basic auth)
//! PATCH /users/{user_id}  (Basic auth) {"nickname":"...","comment":"..."}
//! POST  /close            (Basic auth)
//! GET   /                 plain-text service banner
//! ```

use actix_web::{HttpRequest, HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::ports::StoreError;
use crate::domain::{Account, Comment, Error, Nickname, ProfileUpdate, Secret, UserId};
use crate::inbound::http::auth::authenticate;
use crate::inbound::http::{ApiResult, AppState};

const SIGNUP_FAILED: &str = "Account creation failed";
const UPDATE_FAILED: &str = "User update failed";
const NOT_FOUND: &str = "No user found";
const BANNER: &str = "Account Authentication API Server";

/// Request body for `POST /signup`.
///
/// Fields are `Option` so "absent" and "empty" can both map to the required-
/// fields failure, matching the original contract where an empty string
/// counts as missing.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub user_id: Option<String>,
    pub password: Option<String>,
}

/// Request body for `PATCH /users/{user_id}`.
///
/// `user_id` and `password` are accepted by the deserializer only so their
/// presence can be rejected explicitly as not-updatable fields.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub user_id: Option<String>,
    pub password: Option<String>,
    pub nickname: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
struct SignupResponse {
    message: &'static str,
    user: SignupUser,
}

#[derive(Debug, Serialize)]
struct SignupUser {
    user_id: String,
    nickname: String,
}

#[derive(Debug, Serialize)]
struct UserResponse {
    message: &'static str,
    user: UserDetails,
}

#[derive(Debug, Serialize)]
struct UserDetails {
    user_id: String,
    nickname: String,
    comment: String,
}

#[derive(Debug, Serialize)]
struct UpdateResponse {
    message: &'static str,
    // Single-element sequence, matching the observed response shape.
    user: Vec<UpdatedProfile>,
}

#[derive(Debug, Serialize)]
struct UpdatedProfile {
    nickname: String,
    comment: String,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// Create an account. No authentication required.
#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let SignupRequest { user_id, password } = payload.into_inner();
    let (Some(user_id), Some(password)) = (
        user_id.filter(|v| !v.is_empty()),
        password.filter(|v| !v.is_empty()),
    ) else {
        return Err(
            Error::invalid_request(SIGNUP_FAILED).with_cause("Required user_id and password")
        );
    };

    let user_id = UserId::parse(&user_id, state.id_policy)
        .map_err(|_| Error::invalid_request(SIGNUP_FAILED).with_cause("Input length is incorrect"))?;
    let secret = Secret::parse(&password)
        .map_err(|_| Error::invalid_request(SIGNUP_FAILED).with_cause("Incorrect character pattern"))?;

    let account = Account::new(user_id, secret);
    let user = SignupUser {
        user_id: account.user_id().as_str().to_owned(),
        nickname: account.nickname().to_owned(),
    };
    if !state.store.insert_if_absent(account).await {
        return Err(
            Error::invalid_request(SIGNUP_FAILED).with_cause("Already same user_id is used")
        );
    }

    info!(user_id = %user.user_id, "account created");
    Ok(HttpResponse::Ok().json(SignupResponse {
        message: "Account successfully created",
        user,
    }))
}

/// Fetch an account's profile. Callers may only read their own record.
#[get("/users/{user_id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let caller = authenticate(&req, state.store.as_ref()).await?;
    let target = path.into_inner();

    // Existence before ownership: a missing target reads as 404 even when the
    // caller could never have read it.
    let account = state
        .store
        .find(&target)
        .await
        .ok_or_else(|| Error::not_found(NOT_FOUND))?;
    if caller.user_id().as_str() != target {
        return Err(Error::forbidden("No permission for reference"));
    }

    Ok(HttpResponse::Ok().json(UserResponse {
        message: "User details by user_id",
        user: UserDetails {
            user_id: account.user_id().as_str().to_owned(),
            nickname: account.nickname().to_owned(),
            comment: account.comment().to_owned(),
        },
    }))
}

/// Update nickname and/or comment. Callers may only update their own record.
#[patch("/users/{user_id}")]
pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
    payload: web::Json<UpdateRequest>,
) -> ApiResult<HttpResponse> {
    let caller = authenticate(&req, state.store.as_ref()).await?;
    let target = path.into_inner();

    if caller.user_id().as_str() != target {
        return Err(Error::forbidden("No permission for update"));
    }
    // Ownership already proved the caller exists, but a concurrent close can
    // remove the record between the two reads.
    if state.store.find(&target).await.is_none() {
        return Err(Error::not_found(NOT_FOUND));
    }

    let UpdateRequest {
        user_id,
        password,
        nickname,
        comment,
    } = payload.into_inner();
    if user_id.is_some() || password.is_some() {
        return Err(
            Error::invalid_request(UPDATE_FAILED).with_cause("Not updatable user_id and password")
        );
    }

    // Parse errors can only arise for supplied fields, so validating before
    // the required-field check cannot change which failure wins.
    let invalid =
        |_| Error::invalid_request(UPDATE_FAILED).with_cause("Invalid nickname or comment");
    let update = ProfileUpdate {
        nickname: nickname
            .as_deref()
            .map(Nickname::parse)
            .transpose()
            .map_err(invalid)?,
        comment: comment
            .as_deref()
            .map(Comment::parse)
            .transpose()
            .map_err(invalid)?,
    };
    if update.is_empty() {
        return Err(
            Error::invalid_request(UPDATE_FAILED).with_cause("Required nickname or comment")
        );
    }

    let updated = state
        .store
        .update_profile(&target, update)
        .await
        .map_err(|StoreError::NotFound| Error::not_found(NOT_FOUND))?;

    info!(user_id = %target, "profile updated");
    Ok(HttpResponse::Ok().json(UpdateResponse {
        message: "User successfully updated",
        user: vec![UpdatedProfile {
            nickname: updated.nickname().to_owned(),
            comment: updated.comment().to_owned(),
        }],
    }))
}

/// Delete the authenticated caller's account. There is no target parameter;
/// the operation can only ever act on the caller's own record.
#[post("/close")]
pub async fn close_account(state: web::Data<AppState>, req: HttpRequest) -> ApiResult<HttpResponse> {
    let caller = authenticate(&req, state.store.as_ref()).await?;

    if let Err(StoreError::NotFound) = state.store.remove(caller.user_id().as_str()).await {
        // A concurrent close already removed it; the outcome is the same.
        tracing::debug!(user_id = %caller.user_id(), "account was already removed");
    }

    info!(user_id = %caller.user_id(), "account closed");
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Account and user successfully removed",
    }))
}

/// Service banner on the root path.
///
/// Deliberately a 404: the root resource does not exist, the text only helps
/// humans identify the deployment.
#[get("/")]
pub async fn banner() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/plain; charset=utf-8")
        .body(BANNER)
}
