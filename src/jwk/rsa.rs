//! Normalization of RSA key parameters from their JWK representation
//! ([section 6.3 of RFC 7518]).
//!
//! Callers hand over keys in loosely shaped JSON: each parameter may be a
//! base64url string, an unsigned integer (only sensible for `e`), or
//! colon-delimited hex such as `01:00:01`. Normalization coerces every
//! parameter to the canonical base64url form before the key material
//! reaches a [`CryptoProvider`](crate::crypto::CryptoProvider).
//!
//! [section 6.3 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-6.3>

use alloc::{format, vec::Vec};

use serde::Serialize;
use serde_json::Value;

use crate::{
    base64_url::Base64UrlString,
    bytes::strip_leading_zeros,
    error::{Error, Result},
};

/// The public half of an RSA key, every parameter in canonical base64url
/// form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RsaPublicParams {
    /// Modulus, section 6.3.1.1
    pub n: Base64UrlString,
    /// Public exponent, section 6.3.1.2
    pub e: Base64UrlString,
}

/// A full RSA private key in the first representation of [section 6.3.2 of
/// RFC 7518], CRT parameters included.
///
/// [section 6.3.2 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-6.3.2>
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RsaPrivateParams {
    /// The public members `n` and `e`
    #[serde(flatten)]
    pub public: RsaPublicParams,
    /// Private exponent, section 6.3.2.1
    pub d: Base64UrlString,
    /// First prime factor, section 6.3.2.2
    pub p: Base64UrlString,
    /// Second prime factor, section 6.3.2.3
    pub q: Base64UrlString,
    /// First factor CRT exponent, section 6.3.2.4
    pub dp: Base64UrlString,
    /// Second factor CRT exponent, section 6.3.2.5
    pub dq: Base64UrlString,
    /// First CRT coefficient, section 6.3.2.6
    pub qi: Base64UrlString,
}

impl RsaPublicParams {
    /// Normalizes the `{n, e}` member set from arbitrary JWK input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedKey`] if a required member is missing or
    /// cannot be coerced, or if a present `kty`/`alg` member names
    /// anything but an RSA-OAEP key.
    pub fn from_value(jwk: &Value) -> Result<Self> {
        check_consistency(jwk)?;
        Ok(Self {
            n: param(jwk, "n", false)?,
            e: param(jwk, "e", true)?,
        })
    }
}

impl RsaPrivateParams {
    /// Normalizes the `{n, e, d, p, q, dp, dq, qi}` member set from
    /// arbitrary JWK input.
    ///
    /// # Errors
    ///
    /// Same conditions as [`RsaPublicParams::from_value`], over the
    /// private member set.
    pub fn from_value(jwk: &Value) -> Result<Self> {
        check_consistency(jwk)?;
        Ok(Self {
            public: RsaPublicParams {
                n: param(jwk, "n", false)?,
                e: param(jwk, "e", true)?,
            },
            d: param(jwk, "d", false)?,
            p: param(jwk, "p", false)?,
            q: param(jwk, "q", false)?,
            dp: param(jwk, "dp", false)?,
            dq: param(jwk, "dq", false)?,
            qi: param(jwk, "qi", false)?,
        })
    }
}

/// `kty` and `alg` are optional, but when present they must agree with
/// what this codec imports. Every other extra member is tolerated.
fn check_consistency(jwk: &Value) -> Result<()> {
    if let Some(kty) = jwk.get("kty") {
        if kty.as_str() != Some("RSA") {
            return Err(Error::MalformedKey(format!("unexpected `kty`: {kty}")));
        }
    }
    if let Some(alg) = jwk.get("alg") {
        if alg.as_str() != Some("RSA-OAEP") {
            return Err(Error::MalformedKey(format!("unexpected `alg`: {alg}")));
        }
    }
    Ok(())
}

/// Coerces one parameter to base64url. A base64url string passes through,
/// colon-delimited hex and integers are converted to big-endian bytes with
/// leading zeros stripped.
fn param(jwk: &Value, name: &str, integer_allowed: bool) -> Result<Base64UrlString> {
    let value = jwk
        .get(name)
        .ok_or_else(|| Error::MalformedKey(format!("missing `{name}`")))?;

    match value {
        // ':' is outside the base64url alphabet, so the shapes cannot collide
        Value::String(s) if s.contains(':') => {
            let bytes = colon_hex(s)
                .ok_or_else(|| Error::MalformedKey(format!("`{name}` is not valid hex")))?;
            Ok(Base64UrlString::encode(strip_leading_zeros(&bytes)))
        }
        Value::String(s) => s
            .parse::<Base64UrlString>()
            .map_err(|_| Error::MalformedKey(format!("`{name}` is not base64url"))),
        Value::Number(num) if integer_allowed => {
            let int = num
                .as_u64()
                .ok_or_else(|| Error::MalformedKey(format!("`{name}` is not a valid integer")))?;
            Ok(Base64UrlString::encode(strip_leading_zeros(
                &int.to_be_bytes(),
            )))
        }
        _ => Err(Error::MalformedKey(format!(
            "unsupported shape for `{name}`"
        ))),
    }
}

fn colon_hex(s: &str) -> Option<Vec<u8>> {
    s.split(':')
        .map(|octet| u8::from_str_radix(octet, 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn exponent_shapes_normalize_identically() {
        let b64 = RsaPublicParams::from_value(&json!({"n": "AQAB", "e": "AQAB"})).unwrap();
        let int = RsaPublicParams::from_value(&json!({"n": "AQAB", "e": 65537})).unwrap();
        let hex = RsaPublicParams::from_value(&json!({"n": "AQAB", "e": "01:00:01"})).unwrap();
        assert_eq!(b64, int);
        assert_eq!(b64, hex);
        assert_eq!(b64.e.as_str(), "AQAB");
    }

    #[test]
    fn missing_members_are_malformed() {
        assert!(matches!(
            RsaPublicParams::from_value(&json!({"n": "AQAB"})),
            Err(Error::MalformedKey(_))
        ));
        assert!(matches!(
            RsaPrivateParams::from_value(&json!({"n": "AQAB", "e": "AQAB", "d": "AQAB"})),
            Err(Error::MalformedKey(_))
        ));
    }

    #[test]
    fn kty_and_alg_must_be_consistent() {
        assert!(matches!(
            RsaPublicParams::from_value(&json!({"kty": "EC", "n": "AQAB", "e": "AQAB"})),
            Err(Error::MalformedKey(_))
        ));
        assert!(matches!(
            RsaPublicParams::from_value(&json!({"alg": "RSA1_5", "n": "AQAB", "e": "AQAB"})),
            Err(Error::MalformedKey(_))
        ));
        assert!(RsaPublicParams::from_value(
            &json!({"kty": "RSA", "alg": "RSA-OAEP", "use": "enc", "n": "AQAB", "e": "AQAB"})
        )
        .is_ok());
    }

    #[test]
    fn integers_are_only_accepted_for_e() {
        assert!(matches!(
            RsaPublicParams::from_value(&json!({"n": 12345, "e": "AQAB"})),
            Err(Error::MalformedKey(_))
        ));
    }

    #[test]
    fn broken_hex_is_malformed() {
        assert!(matches!(
            RsaPublicParams::from_value(&json!({"n": "AQAB", "e": "01:zz:01"})),
            Err(Error::MalformedKey(_))
        ));
    }
}
