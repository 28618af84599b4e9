//! The default backend, implemented with the [RustCrypto] ecosystem.
//!
//! [RustCrypto]: <https://github.com/RustCrypto>

mod aes;
mod hmac;
mod rsa;

use alloc::{boxed::Box, format, vec, vec::Vec};
use core::fmt;

use rand_core::{OsRng, RngCore as _};
use secrecy::{ExposeSecret as _, SecretBox};
use zeroize::Zeroizing;

use super::provider::{CipherParams, CryptoProvider, KeyUsage, KeyUsages, RsaJwk, SecretAlgorithm};
use crate::{
    error::{Error, Result},
    jwa::{HmacHash, KeyManagementAlgorithm},
};

/// The RustCrypto based [`CryptoProvider`].
#[derive(Debug)]
pub enum RustCrypto {}

/// A key handle produced by the [`RustCrypto`] backend.
///
/// Raw secret material lives in a [`SecretBox`] and is zeroized when the
/// handle is dropped.
pub struct Key {
    material: Material,
    usages: KeyUsages,
    extractable: bool,
}

enum Material {
    RsaPublic(::rsa::RsaPublicKey),
    RsaPrivate(Box<::rsa::RsaPrivateKey>),
    Secret {
        alg: SecretAlgorithm,
        bytes: SecretBox<[u8]>,
    },
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("usages", &self.usages)
            .field("extractable", &self.extractable)
            .finish_non_exhaustive()
    }
}

impl Key {
    fn new_secret(alg: SecretAlgorithm, bytes: Vec<u8>, extractable: bool, usages: KeyUsages) -> Self {
        Self {
            material: Material::Secret {
                alg,
                bytes: SecretBox::new(bytes.into_boxed_slice()),
            },
            usages,
            extractable,
        }
    }

    fn require_usage(&self, usage: KeyUsage) -> Result<()> {
        if self.usages.allows(usage) {
            Ok(())
        } else {
            Err(Error::CryptoPrimitive(format!(
                "key usage does not permit {usage:?}"
            )))
        }
    }

    fn secret(&self, expected: SecretAlgorithm) -> Result<&[u8]> {
        match &self.material {
            Material::Secret { alg, bytes } if *alg == expected => Ok(bytes.expose_secret()),
            Material::Secret { alg, .. } => Err(Error::CryptoPrimitive(format!(
                "key is bound to {alg:?}, not {expected:?}"
            ))),
            _ => Err(Error::CryptoPrimitive("expected a secret key".into())),
        }
    }
}

fn check_secret_len(alg: SecretAlgorithm, len: usize) -> Result<()> {
    let valid = match alg {
        SecretAlgorithm::AesCbc | SecretAlgorithm::AesGcm | SecretAlgorithm::AesKw => {
            matches!(len, 16 | 24 | 32)
        }
        SecretAlgorithm::Hmac(_) | SecretAlgorithm::Raw => len != 0,
    };
    if valid {
        Ok(())
    } else {
        Err(Error::CryptoPrimitive(format!(
            "invalid key length {len} for {alg:?}"
        )))
    }
}

impl CryptoProvider for RustCrypto {
    type Key = Key;

    fn random(buf: &mut [u8]) -> Result<()> {
        OsRng.fill_bytes(buf);
        Ok(())
    }

    fn import_jwk(jwk: &RsaJwk<'_>, usages: KeyUsages) -> Result<Key> {
        let material = match jwk {
            RsaJwk::Public(params) => Material::RsaPublic(rsa::public_from_params(params)?),
            RsaJwk::Private(params) => {
                Material::RsaPrivate(Box::new(rsa::private_from_params(params)?))
            }
        };
        Ok(Key {
            material,
            usages,
            extractable: false,
        })
    }

    fn generate_key(
        alg: SecretAlgorithm,
        len: usize,
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<Key> {
        check_secret_len(alg, len)?;
        let mut bytes = vec![0u8; len];
        OsRng.fill_bytes(&mut bytes);
        Ok(Key::new_secret(alg, bytes, extractable, usages))
    }

    fn export_raw(key: &Key) -> Result<Zeroizing<Vec<u8>>> {
        if !key.extractable {
            return Err(Error::CryptoPrimitive("key is not extractable".into()));
        }
        match &key.material {
            Material::Secret { bytes, .. } => Ok(Zeroizing::new(bytes.expose_secret().to_vec())),
            _ => Err(Error::CryptoPrimitive(
                "only secret keys can be exported raw".into(),
            )),
        }
    }

    fn import_raw(
        raw: &[u8],
        alg: SecretAlgorithm,
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<Key> {
        check_secret_len(alg, raw.len())?;
        Ok(Key::new_secret(alg, raw.to_vec(), extractable, usages))
    }

    fn wrap_raw(key: &Key, wrapping_key: &Key, alg: KeyManagementAlgorithm) -> Result<Vec<u8>> {
        wrapping_key.require_usage(KeyUsage::Wrap)?;
        let Material::Secret { bytes: cek, .. } = &key.material else {
            return Err(Error::CryptoPrimitive("only secret keys can be wrapped".into()));
        };

        match alg {
            KeyManagementAlgorithm::RsaOaep | KeyManagementAlgorithm::RsaOaep256 => {
                let Material::RsaPublic(public) = &wrapping_key.material else {
                    return Err(Error::CryptoPrimitive(
                        "RSA-OAEP wrapping requires an RSA public key".into(),
                    ));
                };
                rsa::oaep_encrypt(alg, public, cek.expose_secret())
            }
            KeyManagementAlgorithm::A128Kw | KeyManagementAlgorithm::A256Kw => {
                let kek = wrapping_key.secret(SecretAlgorithm::AesKw)?;
                aes::key_wrap(alg, kek, cek.expose_secret())
            }
        }
    }

    fn unwrap_raw(
        wrapped: &[u8],
        unwrapping_key: &Key,
        alg: KeyManagementAlgorithm,
        inner: SecretAlgorithm,
        extractable: bool,
        usages: KeyUsages,
    ) -> Result<Key> {
        unwrapping_key.require_usage(KeyUsage::Unwrap)?;

        let cek = match alg {
            KeyManagementAlgorithm::RsaOaep | KeyManagementAlgorithm::RsaOaep256 => {
                let Material::RsaPrivate(private) = &unwrapping_key.material else {
                    return Err(Error::CryptoPrimitive(
                        "RSA-OAEP unwrapping requires an RSA private key".into(),
                    ));
                };
                rsa::oaep_decrypt(alg, private, wrapped)?
            }
            KeyManagementAlgorithm::A128Kw | KeyManagementAlgorithm::A256Kw => {
                let kek = unwrapping_key.secret(SecretAlgorithm::AesKw)?;
                aes::key_unwrap(alg, kek, wrapped)?
            }
        };

        check_secret_len(inner, cek.len())?;
        Ok(Key::new_secret(inner, cek, extractable, usages))
    }

    fn encrypt(params: &CipherParams<'_>, key: &Key, plaintext: &[u8]) -> Result<Vec<u8>> {
        key.require_usage(KeyUsage::Encrypt)?;
        match params {
            CipherParams::AesGcm { iv, aad } => {
                aes::gcm_encrypt(key.secret(SecretAlgorithm::AesGcm)?, iv, aad, plaintext)
            }
            CipherParams::AesCbc { iv } => {
                aes::cbc_encrypt(key.secret(SecretAlgorithm::AesCbc)?, iv, plaintext)
            }
        }
    }

    fn decrypt(params: &CipherParams<'_>, key: &Key, data: &[u8]) -> Result<Vec<u8>> {
        key.require_usage(KeyUsage::Decrypt)?;
        match params {
            CipherParams::AesGcm { iv, aad } => {
                aes::gcm_decrypt(key.secret(SecretAlgorithm::AesGcm)?, iv, aad, data)
            }
            CipherParams::AesCbc { iv } => {
                aes::cbc_decrypt(key.secret(SecretAlgorithm::AesCbc)?, iv, data)
            }
        }
    }

    fn sign(hash: HmacHash, key: &Key, data: &[u8]) -> Result<Vec<u8>> {
        key.require_usage(KeyUsage::Sign)?;
        hmac::sign(hash, key.secret(SecretAlgorithm::Hmac(hash))?, data)
    }
}
