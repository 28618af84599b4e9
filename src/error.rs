//! The error taxonomy shared by every stage of the codec.

use alloc::string::String;

use thiserror::Error;

/// The result type used throughout this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The ways an encryption or decryption operation can fail.
///
/// The first failing stage aborts the whole operation and its error is
/// surfaced to the caller verbatim; nothing inside the pipeline recovers,
/// retries, or substitutes placeholder key material.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An algorithm identifier outside the supported set, either in the
    /// codec configuration or in a protected header.
    #[error("unsupported algorithm: `{0}`")]
    UnsupportedAlgorithm(String),

    /// Structurally invalid input: wrong segment count, invalid base64url,
    /// bad header JSON, a `crit` member, a missing `alg`/`enc`, or an
    /// IV/tag length that does not match the selected algorithm.
    #[error("malformed input: {0}")]
    MalformedInput(&'static str),

    /// A JSON Web Key missing required members or carrying an inconsistent
    /// `kty` or `alg`.
    #[error("malformed key: {0}")]
    MalformedKey(String),

    /// The authentication tag did not verify. No plaintext is produced.
    #[error("integrity check failed")]
    IntegrityFailure,

    /// A failure inside the cryptographic backend, such as an RSA padding
    /// error during key unwrap or a key usage violation.
    #[error("crypto primitive failure: {0}")]
    CryptoPrimitive(String),

    /// A violated internal length relationship. Reaching this indicates a
    /// bug in the codec, not bad input.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(&'static str),
}
