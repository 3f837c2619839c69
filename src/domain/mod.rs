//! Domain primitives and aggregates.
//!
//! Purpose: define the strongly typed account model, credential decoding, and
//! the store port used by the HTTP adapter. Keep types immutable and document
//! invariants in each type's Rustdoc; transport concerns stay out of here.
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic failure payload.
//! - Account and its field newtypes — validated account state.
//! - BasicCredentials — decoded HTTP Basic credential pair.
//! - ports::AccountStore — persistence port for handlers.

pub mod account;
pub mod credentials;
pub mod error;
pub mod ports;

pub use self::account::{
    Account, AccountValidationError, Comment, Nickname, ProfileUpdate, Secret, UserId,
    UserIdPolicy,
};
pub use self::credentials::{BasicCredentials, CredentialDecodeError};
pub use self::error::{Error, ErrorCode};
