//! Account data model and field validation.
//!
//! Each field has a validated newtype so handlers can only hand the store
//! values that already satisfy the format rules; the store never re-validates
//! and a failed validation can never leave a half-written record behind.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use zeroize::Zeroizing;

/// Maximum length of a nickname in Unicode scalar values.
pub const NICKNAME_MAX: usize = 30;
/// Maximum length of a comment in Unicode scalar values.
pub const COMMENT_MAX: usize = 100;

/// Validation errors returned by the field constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccountValidationError {
    /// Identifier is outside 6-20 characters or uses a disallowed character.
    #[error("user id must be 6-20 letters or digits")]
    InvalidUserId,
    /// Secret is outside 8-20 characters, non-printable, or contains
    /// whitespace.
    #[error("secret must be 8-20 printable ASCII characters without whitespace")]
    InvalidSecret,
    /// Nickname exceeds [`NICKNAME_MAX`] characters.
    #[error("nickname must be at most 30 characters")]
    NicknameTooLong,
    /// Nickname contains a control character.
    #[error("nickname must not contain control characters")]
    NicknameControlCharacters,
    /// Comment exceeds [`COMMENT_MAX`] characters.
    #[error("comment must be at most 100 characters")]
    CommentTooLong,
    /// Comment contains a control character.
    #[error("comment must not contain control characters")]
    CommentControlCharacters,
}

/// Identifier character-class policy.
///
/// One legacy deployment of this service additionally allowed hyphens in
/// identifiers; the flag keeps the two observed behaviours apart instead of
/// silently merging them. Default is the strict alphanumeric class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserIdPolicy {
    /// Admit `-` in identifiers alongside ASCII letters and digits.
    pub allow_hyphen: bool,
}

static USER_ID_RE: OnceLock<Regex> = OnceLock::new();
static USER_ID_HYPHEN_RE: OnceLock<Regex> = OnceLock::new();
static SECRET_RE: OnceLock<Regex> = OnceLock::new();

fn user_id_regex(policy: UserIdPolicy) -> &'static Regex {
    let (cell, pattern) = if policy.allow_hyphen {
        (&USER_ID_HYPHEN_RE, r"^[A-Za-z0-9-]{6,20}$")
    } else {
        (&USER_ID_RE, r"^[A-Za-z0-9]{6,20}$")
    };
    cell.get_or_init(|| {
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("user id regex failed to compile: {error}"))
    })
}

fn secret_regex() -> &'static Regex {
    SECRET_RE.get_or_init(|| {
        // Printable ASCII only; the whitespace exclusion is checked separately.
        Regex::new(r"^[\x21-\x7E]{8,20}$")
            .unwrap_or_else(|error| panic!("secret regex failed to compile: {error}"))
    })
}

/// Unique account handle.
///
/// ## Invariants
/// - 6-20 characters drawn from the class selected by [`UserIdPolicy`].
/// - Immutable once the account exists; update operations never touch it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] under the given policy.
    pub fn parse(raw: &str, policy: UserIdPolicy) -> Result<Self, AccountValidationError> {
        if user_id_regex(policy).is_match(raw) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(AccountValidationError::InvalidUserId)
        }
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account secret.
///
/// Never serialized into any response and never exposed through an accessor;
/// callers may only test a supplied string against it. Zeroized on drop.
#[derive(Clone)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    /// Validate and construct a [`Secret`].
    ///
    /// The printable-range regex already excludes 0x20, but whitespace is
    /// rejected explicitly as well so the rule survives any future widening
    /// of the range bound.
    pub fn parse(raw: &str) -> Result<Self, AccountValidationError> {
        if !secret_regex().is_match(raw) || raw.chars().any(char::is_whitespace) {
            return Err(AccountValidationError::InvalidSecret);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Exact string-equality check against a supplied secret.
    pub fn matches(&self, supplied: &str) -> bool {
        self.0.as_str() == supplied
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(..)")
    }
}

/// Mutable display name, up to [`NICKNAME_MAX`] characters.
///
/// An empty nickname is valid input: the store substitutes the account's
/// identifier when it is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nickname(String);

impl Nickname {
    /// Validate and construct a [`Nickname`].
    pub fn parse(raw: &str) -> Result<Self, AccountValidationError> {
        if raw.chars().count() > NICKNAME_MAX {
            return Err(AccountValidationError::NicknameTooLong);
        }
        if raw.chars().any(|c| c.is_ascii_control()) {
            return Err(AccountValidationError::NicknameControlCharacters);
        }
        Ok(Self(raw.to_owned()))
    }

    /// True when the caller supplied an empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the nickname as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Nickname> for String {
    fn from(value: Nickname) -> Self {
        value.0
    }
}

/// Mutable free-text field, up to [`COMMENT_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment(String);

impl Comment {
    /// Validate and construct a [`Comment`].
    pub fn parse(raw: &str) -> Result<Self, AccountValidationError> {
        if raw.chars().count() > COMMENT_MAX {
            return Err(AccountValidationError::CommentTooLong);
        }
        if raw.chars().any(|c| c.is_ascii_control()) {
            return Err(AccountValidationError::CommentControlCharacters);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Borrow the comment as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Comment> for String {
    fn from(value: Comment) -> Self {
        value.0
    }
}

/// Partial profile update: `None` means "leave the field unchanged".
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub nickname: Option<Nickname>,
    pub comment: Option<Comment>,
}

impl ProfileUpdate {
    /// True when neither field was supplied.
    pub fn is_empty(&self) -> bool {
        self.nickname.is_none() && self.comment.is_none()
    }
}

/// One stored account.
///
/// ## Invariants
/// - `user_id` uniquely keys the record and never changes.
/// - `secret` never changes and never appears in any serialized response.
/// - `nickname` defaults to the identifier, `comment` to the empty string;
///   each resets to its default when an update supplies an empty string.
#[derive(Debug, Clone)]
pub struct Account {
    user_id: UserId,
    secret: Secret,
    nickname: String,
    comment: String,
}

impl Account {
    /// Build a freshly created account with default profile fields.
    pub fn new(user_id: UserId, secret: Secret) -> Self {
        let nickname = user_id.as_str().to_owned();
        Self {
            user_id,
            secret,
            nickname,
            comment: String::new(),
        }
    }

    /// Replace both profile fields, used when seeding fixture data.
    pub fn with_profile(mut self, nickname: Nickname, comment: Comment) -> Self {
        self.nickname = nickname.into();
        self.comment = comment.into();
        self
    }

    /// Stable account identifier.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Current nickname.
    pub fn nickname(&self) -> &str {
        self.nickname.as_str()
    }

    /// Current comment.
    pub fn comment(&self) -> &str {
        self.comment.as_str()
    }

    /// Exact string-equality check against a supplied secret.
    pub fn secret_matches(&self, supplied: &str) -> bool {
        self.secret.matches(supplied)
    }

    /// Apply a partial update, substituting defaults for empty fields.
    ///
    /// Fields arrive pre-validated, so this cannot fail and cannot leave the
    /// record half-written.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(nickname) = update.nickname {
            self.nickname = if nickname.is_empty() {
                self.user_id.as_str().to_owned()
            } else {
                nickname.into()
            };
        }
        if let Some(comment) = update.comment {
            self.comment = comment.into();
        }
    }
}
