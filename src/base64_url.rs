//! Helpers for base64 urlsafe encoded data.

use alloc::{borrow::Cow, string::String, vec::Vec};
use core::{fmt, str::FromStr};

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Encodes bytes into an unpadded base64url segment
/// ([section 5 of RFC 4648]). The output never contains `=`, `+` or `/`.
///
/// [section 5 of RFC 4648]: <https://datatracker.ietf.org/doc/html/rfc4648#section-5>
pub(crate) fn encode(bytes: impl AsRef<[u8]>) -> String {
    Base64UrlUnpadded::encode_string(bytes.as_ref())
}

/// Decodes one incoming segment.
///
/// Tolerates the two forms the encoder never produces, trailing `=`
/// padding and the standard alphabet substitutions `+` for `-` and `/`
/// for `_`; every other deviation is rejected by the strict decoder
/// underneath.
pub(crate) fn decode(input: &str) -> Result<Vec<u8>> {
    let trimmed = input.trim_end_matches('=');
    let normalized: Cow<'_, str> = if trimmed.contains(['+', '/']) {
        trimmed
            .chars()
            .map(|c| match c {
                '+' => '-',
                '/' => '_',
                c => c,
            })
            .collect::<String>()
            .into()
    } else {
        trimmed.into()
    };

    Base64UrlUnpadded::decode_vec(&normalized)
        .map_err(|_| Error::MalformedInput("invalid base64url"))
}

/// A string known to hold canonical base64url: urlsafe alphabet, no
/// padding, a decodable length.
///
/// The only ways in are [`encode`](Self::encode), which produces
/// canonical text, and [`FromStr`], which validates candidate text by
/// running the strict decoder over it. A held value therefore always
/// decodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base64UrlString {
    encoded: String,
}

impl Base64UrlString {
    /// Encodes the given bytes.
    pub fn encode(bytes: impl AsRef<[u8]>) -> Self {
        Self {
            encoded: encode(bytes),
        }
    }

    /// Decodes the value back into raw bytes.
    ///
    /// # Errors
    ///
    /// Construction already validated the text, so a failure here means
    /// an invariant was broken.
    pub fn decode(&self) -> Result<Vec<u8>> {
        Base64UrlUnpadded::decode_vec(&self.encoded)
            .map_err(|_| Error::InternalInvariant("held base64url failed to decode"))
    }

    /// The underlying string slice.
    pub fn as_str(&self) -> &str {
        &self.encoded
    }
}

impl FromStr for Base64UrlString {
    type Err = Error;

    /// Strict parse: no padding, no standard-alphabet substitutions.
    fn from_str(s: &str) -> Result<Self> {
        Base64UrlUnpadded::decode_vec(s).map_err(|_| Error::MalformedInput("invalid base64url"))?;
        Ok(Self { encoded: s.into() })
    }
}

impl fmt::Display for Base64UrlString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl Serialize for Base64UrlString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.encoded)
    }
}
