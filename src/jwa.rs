//! The JSON Web Algorithms (JWA) this codec supports, as defined in
//! [RFC 7518]
//!
//! Two orthogonal families: key management algorithms (the `alg` header)
//! wrap the Content Encryption Key, and content encryption algorithms (the
//! `enc` header) protect the payload. The parameter records returned by
//! [`ContentEncryptionAlgorithm::spec`] are the single source of truth for
//! every key, IV and tag length used by the codec.
//!
//! [RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518>

use alloc::string::ToString;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

macro_rules! impl_alg_names {
    ($T:ty, [$($name:literal => $val:expr; $valp:pat,)*]) => {
        impl $T {
            /// The canonical name of this algorithm as it appears in a JWE
            /// header.
            pub const fn name(self) -> &'static str {
                match self {
                    $($valp => $name,)*
                }
            }

            /// Looks up an algorithm by its JWE header name.
            ///
            /// # Errors
            ///
            /// Returns [`Error::UnsupportedAlgorithm`] for any name outside
            /// the supported set.
            pub fn from_name(name: &str) -> Result<Self, Error> {
                Ok(match name {
                    $($name => $val,)*
                    _ => return Err(Error::UnsupportedAlgorithm(name.to_string())),
                })
            }
        }

        impl fmt::Display for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl Serialize for $T {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.name())
            }
        }

        impl<'de> Deserialize<'de> for $T {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let name = <&str as Deserialize>::deserialize(deserializer)?;
                Self::from_name(name).map_err(<D::Error as serde::de::Error>::custom)
            }
        }
    };
}

/// A JSON Web Algorithm for encrypting the Content Encryption Key (CEK),
/// covering the `alg` header parameter values from [section 4.1 of RFC
/// 7518] that this codec supports.
///
/// [section 4.1 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-4.1>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyManagementAlgorithm {
    /// Key Encryption with RSAES OAEP using default parameters (SHA-1 and
    /// MGF1 with SHA-1)
    RsaOaep,
    /// Key Encryption with RSAES OAEP using SHA-256 and MGF1 with SHA-256
    RsaOaep256,
    /// AES Key Wrap with default initial value using 128-bit key
    A128Kw,
    /// AES Key Wrap with default initial value using 256-bit key
    A256Kw,
}

impl_alg_names!(
    KeyManagementAlgorithm,
    [
        "RSA-OAEP" => Self::RsaOaep; Self::RsaOaep,
        "RSA-OAEP-256" => Self::RsaOaep256; Self::RsaOaep256,
        "A128KW" => Self::A128Kw; Self::A128Kw,
        "A256KW" => Self::A256Kw; Self::A256Kw,
    ]
);

/// A JSON Web Algorithm for content encryption of a JWE, covering the
/// `enc` header parameter values from [section 5.1 of RFC 7518] that this
/// codec supports.
///
/// [section 5.1 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-5.1>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentEncryptionAlgorithm {
    /// AES_128_CBC_HMAC_SHA_256 authenticated encryption as defined in
    /// [section 5.2.3]
    ///
    /// [section 5.2.3]: <https://datatracker.ietf.org/doc/html/rfc7518#section-5.2.3>
    A128CbcHs256,
    /// AES_256_CBC_HMAC_SHA_512 authenticated encryption as defined in
    /// [section 5.2.5]
    ///
    /// [section 5.2.5]: <https://datatracker.ietf.org/doc/html/rfc7518#section-5.2.5>
    A256CbcHs512,
    /// AES GCM using a 128-bit key
    A128Gcm,
    /// AES GCM using a 256-bit key
    A256Gcm,
}

impl_alg_names!(
    ContentEncryptionAlgorithm,
    [
        "A128CBC-HS256" => Self::A128CbcHs256; Self::A128CbcHs256,
        "A256CBC-HS512" => Self::A256CbcHs512; Self::A256CbcHs512,
        "A128GCM" => Self::A128Gcm; Self::A128Gcm,
        "A256GCM" => Self::A256Gcm; Self::A256Gcm,
    ]
);

/// The SHA-2 function driving the HMAC half of a composite suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HmacHash {
    /// HMAC using SHA-256
    Sha256,
    /// HMAC using SHA-512
    Sha512,
}

/// Parameters of the HMAC half of an `A*CBC-HS*` suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacParams {
    /// MAC key length in bytes; the leading bytes of the CEK.
    pub key_bytes: usize,
    /// The hash function used for HMAC.
    pub hash: HmacHash,
    /// The authentication tag keeps only this many leading bytes of the
    /// HMAC output.
    pub truncated_bytes: usize,
}

/// The numeric parameters of a content encryption algorithm.
///
/// AEAD suites carry a single key consumed whole by the primitive.
/// Composite suites split their CEK into a MAC half and an encryption
/// half, so their fields are structurally distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSpec {
    /// A single-key AEAD suite (AES-GCM).
    Aead {
        /// Content encryption key length in bytes.
        key_bytes: usize,
        /// IV length in bytes.
        iv_bytes: usize,
        /// Authentication tag length in bytes.
        tag_bytes: usize,
    },
    /// An AES-CBC plus HMAC composite suite.
    Composite {
        /// AES-CBC key length in bytes; the trailing bytes of the CEK.
        enc_key_bytes: usize,
        /// IV length in bytes.
        iv_bytes: usize,
        /// The HMAC half.
        mac: MacParams,
    },
}

impl ContentSpec {
    /// IV length in bytes.
    pub const fn iv_bytes(&self) -> usize {
        match *self {
            Self::Aead { iv_bytes, .. } | Self::Composite { iv_bytes, .. } => iv_bytes,
        }
    }

    /// Authentication tag length in bytes as it appears on the wire.
    pub const fn tag_bytes(&self) -> usize {
        match *self {
            Self::Aead { tag_bytes, .. } => tag_bytes,
            Self::Composite { mac, .. } => mac.truncated_bytes,
        }
    }

    /// Total CEK length in bytes.
    pub const fn cek_bytes(&self) -> usize {
        match *self {
            Self::Aead { key_bytes, .. } => key_bytes,
            Self::Composite {
                enc_key_bytes, mac, ..
            } => mac.key_bytes + enc_key_bytes,
        }
    }
}

impl ContentEncryptionAlgorithm {
    /// The parameter record of this algorithm.
    pub const fn spec(self) -> ContentSpec {
        match self {
            Self::A128CbcHs256 => ContentSpec::Composite {
                enc_key_bytes: 16,
                iv_bytes: 16,
                mac: MacParams {
                    key_bytes: 16,
                    hash: HmacHash::Sha256,
                    truncated_bytes: 16,
                },
            },
            Self::A256CbcHs512 => ContentSpec::Composite {
                enc_key_bytes: 32,
                iv_bytes: 16,
                mac: MacParams {
                    key_bytes: 32,
                    hash: HmacHash::Sha512,
                    truncated_bytes: 32,
                },
            },
            Self::A128Gcm => ContentSpec::Aead {
                key_bytes: 16,
                iv_bytes: 12,
                tag_bytes: 16,
            },
            Self::A256Gcm => ContentSpec::Aead {
                key_bytes: 32,
                iv_bytes: 12,
                tag_bytes: 16,
            },
        }
    }

    /// Total CEK length in bytes.
    pub const fn cek_bytes(self) -> usize {
        self.spec().cek_bytes()
    }
}
