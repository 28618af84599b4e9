//! Content Encryption Key generation and the composite split.

use crate::{
    crypto::{CryptoProvider, KeyUsage, KeyUsages, SecretAlgorithm},
    error::{Error, Result},
    jwa::{ContentEncryptionAlgorithm, ContentSpec},
};

/// A freshly generated CEK, still whole.
pub(super) struct Cek<P: CryptoProvider> {
    pub(super) handle: P::Key,
}

impl<P: CryptoProvider> Cek<P> {
    pub(super) fn handle(&self) -> &P::Key {
        &self.handle
    }
}

/// Generates the CEK for one encryption operation.
///
/// AEAD suites get their exact content key, non-extractable. Composite
/// suites get an extractable raw secret of `cek_bytes` bytes whose halves
/// are re-imported under their real algorithms at split time.
pub(super) fn create_cek<P: CryptoProvider>(
    enc: ContentEncryptionAlgorithm,
) -> Result<Cek<P>> {
    let handle = match enc.spec() {
        ContentSpec::Aead { key_bytes, .. } => P::generate_key(
            SecretAlgorithm::AesGcm,
            key_bytes,
            false,
            KeyUsages::only(KeyUsage::Encrypt),
        )?,
        ContentSpec::Composite { .. } => P::generate_key(
            SecretAlgorithm::Raw,
            enc.cek_bytes(),
            true,
            KeyUsages::none(),
        )?,
    };
    Ok(Cek { handle })
}

/// The two halves of a composite CEK.
pub(super) struct SplitCek<P: CryptoProvider> {
    pub(super) mac_key: P::Key,
    pub(super) enc_key: P::Key,
}

/// Splits a composite CEK per [section 5.2 of RFC 7518]: the first
/// `mac.key_bytes` bytes become the MAC key, the remainder the AES-CBC
/// key. The order is fixed and must not be reversed.
///
/// `direction` selects the usage of the AES-CBC half (`encrypt` on the
/// sender side, `decrypt` on the receiver side).
///
/// [section 5.2 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-5.2>
pub(super) fn split_cek<P: CryptoProvider>(
    cek: &P::Key,
    enc: ContentEncryptionAlgorithm,
    direction: KeyUsage,
) -> Result<SplitCek<P>> {
    let ContentSpec::Composite {
        enc_key_bytes, mac, ..
    } = enc.spec()
    else {
        return Err(Error::InternalInvariant(
            "the CEK split applies to composite suites only",
        ));
    };

    let raw = P::export_raw(cek)?;
    if raw.len() != mac.key_bytes + enc_key_bytes {
        return Err(Error::InternalInvariant(
            "CEK length does not match the registry",
        ));
    }

    let (mac_half, enc_half) = raw.split_at(mac.key_bytes);
    let split = SplitCek {
        mac_key: P::import_raw(
            mac_half,
            SecretAlgorithm::Hmac(mac.hash),
            false,
            KeyUsages::only(KeyUsage::Sign),
        )?,
        enc_key: P::import_raw(enc_half, SecretAlgorithm::AesCbc, false, KeyUsages::only(direction))?,
    };
    // `raw` is zeroized here
    Ok(split)
}
