//! The protected JOSE header of a compact JWE, as defined in [section 4 of
//! RFC 7516].
//!
//! [section 4 of RFC 7516]: <https://datatracker.ietf.org/doc/html/rfc7516#section-4>

use alloc::string::String;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    error::{Error, Result},
    jwa::{ContentEncryptionAlgorithm, KeyManagementAlgorithm},
};

/// The protected header this codec emits and understands.
///
/// The encoder produces only `alg` and `enc`. The decoder ignores unknown
/// members but rejects `crit` outright: this codec implements no header
/// extensions, so a header that declares one as critical cannot be honored
/// ([section 4.1.13 of RFC 7516]).
///
/// [section 4.1.13 of RFC 7516]: <https://datatracker.ietf.org/doc/html/rfc7516#section-4.1.13>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JweHeader {
    /// `alg` parameter defined in section 4.1.1 of RFC 7516
    pub alg: KeyManagementAlgorithm,
    /// `enc` parameter defined in section 4.1.2 of RFC 7516
    pub enc: ContentEncryptionAlgorithm,
}

impl JweHeader {
    /// Serializes the header into its canonical textual form, the exact
    /// bytes that are base64url-encoded into the first segment and bound
    /// as additional authenticated data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InternalInvariant`] if serialization fails, which
    /// a two-member header cannot do in practice.
    pub fn to_json(self) -> Result<String> {
        serde_json::to_string(&self).map_err(|_| Error::InternalInvariant("header serialization"))
    }

    /// Parses and validates the decoded bytes of a protected header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] if the bytes are not a JSON
    /// object, `alg` or `enc` is missing, or `crit` is present, and
    /// [`Error::UnsupportedAlgorithm`] if either algorithm name falls
    /// outside the supported set.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let members: Map<String, Value> = serde_json::from_slice(bytes)
            .map_err(|_| Error::MalformedInput("protected header is not a JSON object"))?;

        if members.contains_key("crit") {
            return Err(Error::MalformedInput("the `crit` header is not supported"));
        }

        let alg = required_str(&members, "alg", "missing or non-string `alg` header")?;
        let enc = required_str(&members, "enc", "missing or non-string `enc` header")?;

        Ok(Self {
            alg: KeyManagementAlgorithm::from_name(alg)?,
            enc: ContentEncryptionAlgorithm::from_name(enc)?,
        })
    }
}

fn required_str<'a>(
    members: &'a Map<String, Value>,
    key: &str,
    missing: &'static str,
) -> Result<&'a str> {
    members
        .get(key)
        .and_then(Value::as_str)
        .ok_or(Error::MalformedInput(missing))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form_is_alg_then_enc() {
        let header = JweHeader {
            alg: KeyManagementAlgorithm::RsaOaep,
            enc: ContentEncryptionAlgorithm::A256Gcm,
        };
        assert_eq!(
            header.to_json().unwrap(),
            r#"{"alg":"RSA-OAEP","enc":"A256GCM"}"#
        );
    }

    #[test]
    fn parse_round_trip() {
        let header = JweHeader {
            alg: KeyManagementAlgorithm::A128Kw,
            enc: ContentEncryptionAlgorithm::A128CbcHs256,
        };
        let json = header.to_json().unwrap();
        assert_eq!(JweHeader::parse(json.as_bytes()).unwrap(), header);
    }

    #[test]
    fn unknown_members_are_ignored() {
        let parsed = JweHeader::parse(
            br#"{"alg":"A256KW","enc":"A256GCM","kid":"key-1","typ":"JOSE"}"#,
        )
        .unwrap();
        assert_eq!(parsed.alg, KeyManagementAlgorithm::A256Kw);
        assert_eq!(parsed.enc, ContentEncryptionAlgorithm::A256Gcm);
    }

    #[test]
    fn crit_is_rejected() {
        let err = JweHeader::parse(
            br#"{"alg":"RSA-OAEP","enc":"A256GCM","crit":["exp"],"exp":1363284000}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn missing_members_are_malformed() {
        assert!(matches!(
            JweHeader::parse(br#"{"enc":"A256GCM"}"#),
            Err(Error::MalformedInput(_))
        ));
        assert!(matches!(
            JweHeader::parse(br#"{"alg":"RSA-OAEP"}"#),
            Err(Error::MalformedInput(_))
        ));
        assert!(matches!(
            JweHeader::parse(b"[]"),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn unknown_algorithms_are_unsupported() {
        assert!(matches!(
            JweHeader::parse(br#"{"alg":"dir","enc":"A256GCM"}"#),
            Err(Error::UnsupportedAlgorithm(_))
        ));
        assert!(matches!(
            JweHeader::parse(br#"{"alg":"RSA-OAEP","enc":"A192GCM"}"#),
            Err(Error::UnsupportedAlgorithm(_))
        ));
    }
}
