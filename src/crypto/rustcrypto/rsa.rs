use alloc::{format, vec, vec::Vec};

use ::rsa::{BigUint, Oaep, RsaPrivateKey, RsaPublicKey};
use rand_core::OsRng;

use crate::{
    base64_url::Base64UrlString,
    error::{Error, Result},
    jwa::KeyManagementAlgorithm,
    jwk::rsa::{RsaPrivateParams, RsaPublicParams},
};

fn uint(field: &Base64UrlString) -> Result<BigUint> {
    // normalization already validated the base64url text
    Ok(BigUint::from_bytes_be(&field.decode()?))
}

pub(super) fn public_from_params(params: &RsaPublicParams) -> Result<RsaPublicKey> {
    RsaPublicKey::new(uint(&params.n)?, uint(&params.e)?)
        .map_err(|err| Error::MalformedKey(format!("invalid RSA public key: {err}")))
}

pub(super) fn private_from_params(params: &RsaPrivateParams) -> Result<RsaPrivateKey> {
    let n = uint(&params.public.n)?;
    let e = uint(&params.public.e)?;
    let d = uint(&params.d)?;
    let p = uint(&params.p)?;
    let q = uint(&params.q)?;

    // dp, dq and qi were validated during normalization; the precomputation
    // below rebuilds them from the primes
    let mut key = RsaPrivateKey::from_components(n, e, d, vec![p, q])
        .map_err(|err| Error::MalformedKey(format!("invalid RSA private key: {err}")))?;
    key.precompute()
        .map_err(|err| Error::MalformedKey(format!("invalid RSA prime factors: {err}")))?;
    Ok(key)
}

fn padding(alg: KeyManagementAlgorithm) -> Result<Oaep> {
    Ok(match alg {
        KeyManagementAlgorithm::RsaOaep => Oaep::new::<sha1::Sha1>(),
        KeyManagementAlgorithm::RsaOaep256 => Oaep::new::<sha2::Sha256>(),
        _ => return Err(Error::InternalInvariant("not an RSA-OAEP algorithm")),
    })
}

pub(super) fn oaep_encrypt(
    alg: KeyManagementAlgorithm,
    key: &RsaPublicKey,
    cek: &[u8],
) -> Result<Vec<u8>> {
    key.encrypt(&mut OsRng, padding(alg)?, cek)
        .map_err(|err| Error::CryptoPrimitive(format!("RSA-OAEP encryption: {err}")))
}

pub(super) fn oaep_decrypt(
    alg: KeyManagementAlgorithm,
    key: &RsaPrivateKey,
    wrapped: &[u8],
) -> Result<Vec<u8>> {
    key.decrypt(padding(alg)?, wrapped)
        .map_err(|err| Error::CryptoPrimitive(format!("RSA-OAEP decryption: {err}")))
}
