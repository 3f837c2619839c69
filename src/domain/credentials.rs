//! HTTP Basic credential decoding.
//!
//! Keep header parsing out of the handlers by exposing a pure decode function
//! that never panics and reports failures as typed variants. The caller folds
//! every variant into the same authentication failure so clients cannot tell
//! a malformed header apart from a wrong password.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;
use zeroize::Zeroizing;

/// Scheme prefix required by the authorization header, including the single
/// separating space. Case-sensitive.
const BASIC_SCHEME: &str = "Basic ";

/// Failures produced while decoding an authorization header value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CredentialDecodeError {
    /// The header does not start with the literal `Basic ` scheme.
    #[error("authorization scheme must be Basic")]
    MissingScheme,
    /// The payload after the scheme is not valid standard base64.
    #[error("credential payload is not valid base64")]
    InvalidBase64,
    /// The decoded payload is not valid UTF-8.
    #[error("decoded credentials are not valid UTF-8")]
    InvalidUtf8,
    /// The decoded payload lacks the `identifier:secret` separator.
    #[error("decoded credentials lack a colon separator")]
    MissingSeparator,
}

/// Transient credential pair extracted from one request.
///
/// ## Invariants
/// - Lives only for the duration of a single authentication check; never
///   stored.
/// - The secret half is zeroized on drop.
/// - Either half may be empty: syntactically acceptable, it simply will not
///   match any stored record.
#[cfg_attr(test, derive(Debug))]
pub struct BasicCredentials {
    user_id: String,
    secret: Zeroizing<String>,
}

impl BasicCredentials {
    /// Decode an `Authorization` header value of the form
    /// `Basic <base64(identifier:secret)>`.
    ///
    /// The secret is everything after the first colon, so secrets containing
    /// colons survive the round trip.
    ///
    /// # Examples
    /// ```
    /// use account_api::domain::BasicCredentials;
    ///
    /// let creds = BasicCredentials::decode("Basic VGFyb1lhbWFkYTpQYVNTd2Q0VFk=").unwrap();
    /// assert_eq!(creds.user_id(), "TaroYamada");
    /// assert_eq!(creds.secret(), "PaSSwd4TY");
    /// ```
    pub fn decode(header: &str) -> Result<Self, CredentialDecodeError> {
        let payload = header
            .strip_prefix(BASIC_SCHEME)
            .ok_or(CredentialDecodeError::MissingScheme)?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|_| CredentialDecodeError::InvalidBase64)?;
        let text = String::from_utf8(bytes).map_err(|_| CredentialDecodeError::InvalidUtf8)?;
        let (user_id, secret) = text
            .split_once(':')
            .ok_or(CredentialDecodeError::MissingSeparator)?;

        Ok(Self {
            user_id: user_id.to_owned(),
            secret: Zeroizing::new(secret.to_owned()),
        })
    }

    /// Identifier half, used for the store lookup.
    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }

    /// Secret half, compared against the stored record.
    pub fn secret(&self) -> &str {
        self.secret.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn encode(plain: &str) -> String {
        format!("Basic {}", STANDARD.encode(plain))
    }

    #[rstest]
    #[case("TaroYamada:PaSSwd4TY", "TaroYamada", "PaSSwd4TY")]
    #[case("alice:", "alice", "")]
    #[case(":secret99", "", "secret99")]
    #[case("bob:pa:ss:word", "bob", "pa:ss:word")]
    fn decodes_on_first_colon(#[case] plain: &str, #[case] user_id: &str, #[case] secret: &str) {
        let creds = BasicCredentials::decode(&encode(plain)).expect("valid header decodes");
        assert_eq!(creds.user_id(), user_id);
        assert_eq!(creds.secret(), secret);
    }

    #[rstest]
    #[case("Bearer abcdef", CredentialDecodeError::MissingScheme)]
    #[case("basic VGFybzpwdw==", CredentialDecodeError::MissingScheme)]
    #[case("Basic  VGFybzpwdw==", CredentialDecodeError::InvalidBase64)]
    #[case("Basic !!!not-base64!!!", CredentialDecodeError::InvalidBase64)]
    #[case("Basic VGFyb1lhbWFkYQ==", CredentialDecodeError::MissingSeparator)]
    fn rejects_malformed_headers(#[case] header: &str, #[case] expected: CredentialDecodeError) {
        let err = BasicCredentials::decode(header).expect_err("malformed header must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn rejects_non_utf8_payload() {
        let header = format!("Basic {}", STANDARD.encode([0xff, 0xfe, b':', b'x']));
        let err = BasicCredentials::decode(&header).expect_err("non-UTF-8 payload must fail");
        assert_eq!(err, CredentialDecodeError::InvalidUtf8);
    }
}
