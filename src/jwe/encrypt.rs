//! The content encryption pipeline, sender side.

use alloc::{vec, vec::Vec};

use super::cek::{self, Cek};
use crate::{
    bytes,
    crypto::{CipherParams, CryptoProvider, KeyUsage},
    error::{Error, Result},
    jwa::{ContentEncryptionAlgorithm, ContentSpec, MacParams},
};

/// Ciphertext plus its detached authentication tag.
pub(super) struct EncryptedContent {
    pub(super) ciphertext: Vec<u8>,
    pub(super) tag: Vec<u8>,
}

/// Draws a fresh IV of the length the content algorithm dictates.
pub(super) fn create_iv<P: CryptoProvider>(spec: ContentSpec) -> Result<Vec<u8>> {
    let mut iv = vec![0u8; spec.iv_bytes()];
    P::random(&mut iv)?;
    Ok(iv)
}

/// Encrypts `plaintext`, binding `aad` (the ASCII bytes of the
/// base64url-encoded protected header) into the authentication tag.
pub(super) fn encrypt_content<P: CryptoProvider>(
    enc: ContentEncryptionAlgorithm,
    cek: &Cek<P>,
    iv: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<EncryptedContent> {
    match enc.spec() {
        ContentSpec::Aead { tag_bytes, .. } => {
            let sealed = P::encrypt(&CipherParams::AesGcm { iv, aad }, cek.handle(), plaintext)?;
            if sealed.len() < tag_bytes {
                return Err(Error::InternalInvariant("AEAD output shorter than its tag"));
            }
            let mut ciphertext = sealed;
            let tag = ciphertext.split_off(ciphertext.len() - tag_bytes);
            Ok(EncryptedContent { ciphertext, tag })
        }
        ContentSpec::Composite { mac, .. } => {
            let keys = cek::split_cek::<P>(cek.handle(), enc, KeyUsage::Encrypt)?;
            let ciphertext = P::encrypt(&CipherParams::AesCbc { iv }, &keys.enc_key, plaintext)?;
            let tag = compute_tag::<P>(&keys.mac_key, mac, aad, iv, &ciphertext)?;
            Ok(EncryptedContent { ciphertext, tag })
        }
    }
}

/// HMAC over `aad ‖ iv ‖ ciphertext ‖ AL`, truncated to the leading
/// `mac.truncated_bytes` bytes ([section 5.2.2.1 of RFC 7518]).
///
/// `AL` is the 64-bit big-endian bit length of the AAD.
///
/// [section 5.2.2.1 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-5.2.2.1>
pub(super) fn compute_tag<P: CryptoProvider>(
    mac_key: &P::Key,
    mac: MacParams,
    aad: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    let mut input = Vec::with_capacity(aad.len() + iv.len() + ciphertext.len() + 8);
    input.extend_from_slice(aad);
    input.extend_from_slice(iv);
    input.extend_from_slice(ciphertext);
    input.extend_from_slice(&bytes::al_bytes(aad.len()));

    let mut tag = P::sign(mac.hash, mac_key, &input)?;
    tag.truncate(mac.truncated_bytes);
    Ok(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{KeyUsages, RustCrypto, SecretAlgorithm};

    // RFC 7518 appendix B: AES_128_CBC_HMAC_SHA_256 test vector. The
    // 32-byte key splits into a 16-byte MAC key and a 16-byte ENC key.
    const K: [u8; 32] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d,
        0x1e, 0x1f,
    ];
    const IV: [u8; 16] = [
        0x1a, 0xf3, 0x8c, 0x2d, 0xc2, 0xb9, 0x6f, 0xfd, 0xd8, 0x66, 0x94, 0x09, 0x23, 0x41, 0xbc,
        0x04,
    ];
    const PLAINTEXT: &[u8] = b"A cipher system must not be required to be secret, and it must be \
        able to fall into the hands of the enemy without inconvenience";
    const AAD: &[u8] = b"The second principle of Auguste Kerckhoffs";
    const CIPHERTEXT: [u8; 144] = [
        0xc8, 0x0e, 0xdf, 0xa3, 0x2d, 0xdf, 0x39, 0xd5, 0xef, 0x00, 0xc0, 0xb4, 0x68, 0x83, 0x42,
        0x79, 0xa2, 0xe4, 0x6a, 0x1b, 0x80, 0x49, 0xf7, 0x92, 0xf7, 0x6b, 0xfe, 0x54, 0xb9, 0x03,
        0xa9, 0xc9, 0xa9, 0x4a, 0xc9, 0xb4, 0x7a, 0xd2, 0x65, 0x5c, 0x5f, 0x10, 0xf9, 0xae, 0xf7,
        0x14, 0x27, 0xe2, 0xfc, 0x6f, 0x9b, 0x3f, 0x39, 0x9a, 0x22, 0x14, 0x89, 0xf1, 0x63, 0x62,
        0xc7, 0x03, 0x23, 0x36, 0x09, 0xd4, 0x5a, 0xc6, 0x98, 0x64, 0xe3, 0x32, 0x1c, 0xf8, 0x29,
        0x35, 0xac, 0x40, 0x96, 0xc8, 0x6e, 0x13, 0x33, 0x14, 0xc5, 0x40, 0x19, 0xe8, 0xca, 0x79,
        0x80, 0xdf, 0xa4, 0xb9, 0xcf, 0x1b, 0x38, 0x4c, 0x48, 0x6f, 0x3a, 0x54, 0xc5, 0x10, 0x78,
        0x15, 0x8e, 0xe5, 0xd7, 0x9d, 0xe5, 0x9f, 0xbd, 0x34, 0xd8, 0x48, 0xb3, 0xd6, 0x95, 0x50,
        0xa6, 0x76, 0x46, 0x34, 0x44, 0x27, 0xad, 0xe5, 0x4b, 0x88, 0x51, 0xff, 0xb5, 0x98, 0xf7,
        0xf8, 0x00, 0x74, 0xb9, 0x47, 0x3c, 0x82, 0xe2, 0xdb,
    ];
    const TAG: [u8; 16] = [
        0x65, 0x2c, 0x3f, 0xa3, 0x6b, 0x0a, 0x7c, 0x5b, 0x32, 0x19, 0xfa, 0xb3, 0xa3, 0x0b, 0xc1,
        0xc4,
    ];

    fn vector_cek() -> Cek<RustCrypto> {
        let handle =
            RustCrypto::import_raw(&K, SecretAlgorithm::Raw, true, KeyUsages::none()).unwrap();
        Cek { handle }
    }

    #[test]
    fn aes_128_cbc_hmac_sha_256_matches_the_rfc_vector() {
        let content = encrypt_content::<RustCrypto>(
            ContentEncryptionAlgorithm::A128CbcHs256,
            &vector_cek(),
            &IV,
            AAD,
            PLAINTEXT,
        )
        .unwrap();

        assert_eq!(content.ciphertext, CIPHERTEXT);
        assert_eq!(content.tag, TAG);
    }

    #[test]
    fn composite_decryption_mirrors_the_vector() {
        let cek = vector_cek();
        let plaintext = super::super::decrypt::decrypt_content::<RustCrypto>(
            ContentEncryptionAlgorithm::A128CbcHs256,
            cek.handle(),
            &IV,
            AAD,
            &CIPHERTEXT,
            &TAG,
        )
        .unwrap();
        assert_eq!(plaintext, PLAINTEXT);
    }

    #[test]
    fn composite_decryption_fails_closed_on_a_bad_tag() {
        let cek = vector_cek();
        let mut tag = TAG;
        tag[15] ^= 1;
        let err = super::super::decrypt::decrypt_content::<RustCrypto>(
            ContentEncryptionAlgorithm::A128CbcHs256,
            cek.handle(),
            &IV,
            AAD,
            &CIPHERTEXT,
            &tag,
        )
        .unwrap_err();
        assert!(matches!(err, Error::IntegrityFailure));
    }
}
