//! Import of RSA JSON Web Keys ([RFC 7517]) for CEK wrap and unwrap.
//!
//! [RFC 7517]: <https://datatracker.ietf.org/doc/html/rfc7517>

pub mod rsa;

use serde_json::Value;

use crate::{
    crypto::{CryptoProvider, KeyUsage, KeyUsages, RsaJwk},
    error::Result,
};

/// Imports an RSA public key for CEK wrapping.
///
/// The JWK is normalized first (see [`rsa`] for the accepted parameter
/// shapes); the resulting handle is non-extractable and restricted to the
/// `wrap` usage.
///
/// # Errors
///
/// Returns [`Error::MalformedKey`](crate::Error::MalformedKey) if required
/// members are missing, a member cannot be coerced, or `kty`/`alg`
/// disagree with an RSA-OAEP key.
pub fn import_rsa_public_key<P: CryptoProvider>(jwk: &Value) -> Result<P::Key> {
    let params = rsa::RsaPublicParams::from_value(jwk)?;
    P::import_jwk(&RsaJwk::Public(&params), KeyUsages::only(KeyUsage::Wrap))
}

/// Imports an RSA private key for CEK unwrapping.
///
/// The resulting handle is non-extractable and restricted to the `unwrap`
/// usage.
///
/// # Errors
///
/// Returns [`Error::MalformedKey`](crate::Error::MalformedKey) under the
/// same conditions as [`import_rsa_public_key`], with the private member
/// set (`n, e, d, p, q, dp, dq, qi`) required instead.
pub fn import_rsa_private_key<P: CryptoProvider>(jwk: &Value) -> Result<P::Key> {
    let params = rsa::RsaPrivateParams::from_value(jwk)?;
    P::import_jwk(&RsaJwk::Private(&params), KeyUsages::only(KeyUsage::Unwrap))
}
