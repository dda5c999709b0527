//! Issues and validates the signed, time-limited tokens that identify a user
//! on protected endpoints.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, models::Username};

/// How long issued tokens stay valid by default.
pub const DEFAULT_TOKEN_DURATION: Duration = Duration::hours(24);

/// The signing and verification keys for bearer tokens.
///
/// Both keys are derived from the same secret at startup and are immutable
/// afterwards.
#[derive(Clone)]
pub struct TokenKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenKeys {
    /// Derive the token keys from a secret string.
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }
}

/// The claims embedded in a token: the subject username plus the issue and
/// expiry timestamps (unix seconds).
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Issue a signed token asserting `username` for the next `valid_for` duration.
///
/// # Errors
///
/// Returns an [Error::TokenCreation] if the signing library fails, which
/// should not happen with a valid key.
pub fn issue_token(
    username: &Username,
    keys: &TokenKeys,
    valid_for: Duration,
) -> Result<String, Error> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        sub: username.to_string(),
        iat: now.unix_timestamp(),
        exp: (now + valid_for).unix_timestamp(),
    };

    encode(&Header::default(), &claims, &keys.encoding_key)
        .map_err(|error| Error::TokenCreation(error.to_string()))
}

/// Verify the signature and expiry of `token` and return the embedded subject.
///
/// # Errors
///
/// Returns [Error::InvalidToken] for every failure mode. A malformed token,
/// an expired token and a signature mismatch are indistinguishable to the
/// caller so that the response cannot be used as an oracle.
pub fn validate_token(token: &str, keys: &TokenKeys) -> Result<Username, Error> {
    decode::<Claims>(token, &keys.decoding_key, &Validation::default())
        .map(|data| Username::new_unchecked(&data.claims.sub))
        .map_err(|_| Error::InvalidToken)
}
