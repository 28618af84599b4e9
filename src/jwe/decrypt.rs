//! The content decryption pipeline, receiver side.

use alloc::vec::Vec;

use super::{cek, encrypt};
use crate::{
    bytes,
    crypto::{CipherParams, CryptoProvider, KeyUsage},
    error::{Error, Result},
    jwa::{ContentEncryptionAlgorithm, ContentSpec},
};

/// Decrypts `ciphertext` under `cek`, verifying the authentication tag.
///
/// On the composite path the MAC is recomputed over
/// `aad ‖ iv ‖ ciphertext ‖ AL` and compared in constant time before
/// AES-CBC runs; a mismatch yields [`Error::IntegrityFailure`] and no
/// plaintext. On the AEAD path `ciphertext ‖ tag` is reassembled and the
/// provider's authenticated decrypt performs the check.
pub(super) fn decrypt_content<P: CryptoProvider>(
    enc: ContentEncryptionAlgorithm,
    cek: &P::Key,
    iv: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>> {
    match enc.spec() {
        ContentSpec::Aead { .. } => {
            let mut sealed = Vec::with_capacity(ciphertext.len() + tag.len());
            sealed.extend_from_slice(ciphertext);
            sealed.extend_from_slice(tag);
            P::decrypt(&CipherParams::AesGcm { iv, aad }, cek, &sealed)
        }
        ContentSpec::Composite { mac, .. } => {
            let keys = cek::split_cek::<P>(cek, enc, KeyUsage::Decrypt)?;
            let expected = encrypt::compute_tag::<P>(&keys.mac_key, mac, aad, iv, ciphertext)?;
            if !bytes::ct_eq(&expected, tag) {
                return Err(Error::IntegrityFailure);
            }
            P::decrypt(&CipherParams::AesCbc { iv }, &keys.enc_key, ciphertext)
        }
    }
}
