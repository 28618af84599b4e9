//! The contract every cryptographic backend must satisfy.

use alloc::vec::Vec;
use core::fmt;

use zeroize::Zeroizing;

use crate::{
    error::Result,
    jwa::{HmacHash, KeyManagementAlgorithm},
    jwk::rsa::{RsaPrivateParams, RsaPublicParams},
};

/// One key usage, mirroring the operations vocabulary of the `key_ops` JWK
/// parameter ([section 4.3 of RFC 7517]).
///
/// [section 4.3 of RFC 7517]: <https://datatracker.ietf.org/doc/html/rfc7517#section-4.3>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyUsage {
    /// The key may encrypt another key
    Wrap,
    /// The key may decrypt another key
    Unwrap,
    /// The key may encrypt content
    Encrypt,
    /// The key may decrypt content
    Decrypt,
    /// The key may compute MACs
    Sign,
    /// The key may verify MACs
    Verify,
}

impl KeyUsage {
    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// The set of [`KeyUsage`]s attached to a key handle. A handle may only be
/// used for the operations in its set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyUsages(u8);

impl KeyUsages {
    /// The empty usage set.
    pub const fn none() -> Self {
        Self(0)
    }

    /// A set holding a single usage.
    pub const fn only(usage: KeyUsage) -> Self {
        Self(usage.bit())
    }

    /// Returns the set extended by `usage`.
    #[must_use]
    pub const fn with(self, usage: KeyUsage) -> Self {
        Self(self.0 | usage.bit())
    }

    /// Whether the set permits `usage`.
    pub const fn allows(self, usage: KeyUsage) -> bool {
        self.0 & usage.bit() != 0
    }
}

/// RSA key material in normalized JWK form, as handed to
/// [`CryptoProvider::import_jwk`].
#[derive(Debug, Clone, Copy)]
pub enum RsaJwk<'a> {
    /// A public key, imported for wrapping.
    Public(&'a RsaPublicParams),
    /// A private key, imported for unwrapping.
    Private(&'a RsaPrivateParams),
}

/// The primitive family a secret key handle is bound to.
///
/// Operations check the binding: an AES-CBC key cannot be fed to HMAC and
/// vice versa. `Raw` is the transient state of a composite CEK whose
/// halves have not yet been re-imported under their real algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretAlgorithm {
    /// AES in CBC mode with PKCS#7 padding
    AesCbc,
    /// AES in Galois/Counter Mode
    AesGcm,
    /// AES Key Wrap (RFC 3394)
    AesKw,
    /// HMAC with the given hash
    Hmac(HmacHash),
    /// Unstructured secret bytes
    Raw,
}

/// Parameters for a content encryption or decryption call.
#[derive(Debug, Clone, Copy)]
pub enum CipherParams<'a> {
    /// AES-GCM with the given IV and additional authenticated data.
    ///
    /// The encrypt direction returns `ciphertext ‖ tag`; the decrypt
    /// direction expects the same concatenation and verifies the tag
    /// itself, in constant time.
    AesGcm {
        /// The 96-bit IV
        iv: &'a [u8],
        /// Additional authenticated data
        aad: &'a [u8],
    },
    /// AES-CBC with PKCS#7 padding and the given IV. Unauthenticated; the
    /// caller owns MAC computation and verification.
    AesCbc {
        /// The 128-bit IV
        iv: &'a [u8],
    },
}

/// The set of primitive operations the codec consumes.
///
/// The provider owns all raw key material. Handles are opaque to the codec
/// and annotated with a usage set and an extractability flag; an operation
/// not covered by a handle's usages fails with
/// [`Error::CryptoPrimitive`](crate::error::Error::CryptoPrimitive), as
/// does [`export_raw`](Self::export_raw) on a non-extractable handle.
pub trait CryptoProvider {
    /// The opaque key handle type.
    type Key: fmt::Debug;

    /// Fills `buf` with cryptographically secure random bytes.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::CryptoPrimitive`](crate::error::Error::CryptoPrimitive)
    /// if the random source is unavailable.
    fn random(buf: &mut [u8]) -> Result<()>;

    /// Imports normalized RSA JWK parameters. The handle is
    /// non-extractable.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MalformedKey`](crate::error::Error::MalformedKey)
    /// if the parameters do not form a valid key.
    fn import_jwk(jwk: &RsaJwk<'_>, usages: KeyUsages) -> Result<Self::Key>;

    /// Generates a fresh secret key of `len` bytes under `alg`.
    ///
    /// # Errors
    ///
    /// Fails if `len` is not a valid key length for `alg`.
    fn generate_key(
        alg: SecretAlgorithm,
        len: usize,
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<Self::Key>;

    /// Exports the raw bytes of an extractable secret key. The returned
    /// buffer is wiped on drop.
    ///
    /// # Errors
    ///
    /// Fails for non-extractable or non-secret handles.
    fn export_raw(key: &Self::Key) -> Result<Zeroizing<Vec<u8>>>;

    /// Imports raw bytes as a secret key under `alg`.
    ///
    /// # Errors
    ///
    /// Fails if the length is not valid for `alg`.
    fn import_raw(
        raw: &[u8],
        alg: SecretAlgorithm,
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<Self::Key>;

    /// Wraps the raw material of `key` under `wrapping_key`.
    ///
    /// Requires the `wrap` usage on `wrapping_key`. `key` itself need not
    /// be extractable: its bytes never leave the provider.
    ///
    /// # Errors
    ///
    /// Fails on a usage violation or a primitive failure.
    fn wrap_raw(
        key: &Self::Key,
        wrapping_key: &Self::Key,
        alg: KeyManagementAlgorithm,
    ) -> Result<Vec<u8>>;

    /// Unwraps `wrapped` under `unwrapping_key` and imports the result as
    /// a secret key under `inner`.
    ///
    /// Requires the `unwrap` usage on `unwrapping_key`.
    ///
    /// # Errors
    ///
    /// Fails on a usage violation or a primitive failure, e.g. an RSA
    /// padding error or an AES-KW integrity mismatch.
    fn unwrap_raw(
        wrapped: &[u8],
        unwrapping_key: &Self::Key,
        alg: KeyManagementAlgorithm,
        inner: SecretAlgorithm,
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<Self::Key>;

    /// Content encryption. See [`CipherParams`] for the shape of the
    /// result. Requires the `encrypt` usage.
    ///
    /// # Errors
    ///
    /// Fails on a usage violation or a primitive failure.
    fn encrypt(params: &CipherParams<'_>, key: &Self::Key, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Content decryption, the inverse of [`encrypt`](Self::encrypt).
    /// Requires the `decrypt` usage.
    ///
    /// # Errors
    ///
    /// For AES-GCM the provider performs the tag check and reports a
    /// mismatch as
    /// [`Error::IntegrityFailure`](crate::error::Error::IntegrityFailure).
    fn decrypt(params: &CipherParams<'_>, key: &Self::Key, data: &[u8]) -> Result<Vec<u8>>;

    /// Computes the full-length HMAC of `data`. Requires the `sign` usage.
    ///
    /// # Errors
    ///
    /// Fails on a usage violation or if the key is not an HMAC key for
    /// `hash`.
    fn sign(hash: HmacHash, key: &Self::Key, data: &[u8]) -> Result<Vec<u8>>;
}
