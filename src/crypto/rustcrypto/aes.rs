use alloc::{format, vec, vec::Vec};

use ::aes::{
    cipher::{
        block_padding::Pkcs7, generic_array::GenericArray, BlockDecryptMut as _,
        BlockEncryptMut as _, KeyIvInit as _,
    },
    Aes128, Aes256,
};
use aes_gcm::{
    aead::{Aead as _, KeyInit as _, Payload},
    Aes128Gcm, Aes256Gcm, Nonce,
};
use aes_kw::Kek;

use crate::{
    error::{Error, Result},
    jwa::KeyManagementAlgorithm,
};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

pub(super) fn cbc_encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    match key.len() {
        16 => Aes128CbcEnc::new_from_slices(key, iv)
            .map(|cipher| cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        32 => Aes256CbcEnc::new_from_slices(key, iv)
            .map(|cipher| cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        len => {
            return Err(Error::CryptoPrimitive(format!(
                "unsupported AES-CBC key length {len}"
            )))
        }
    }
    .map_err(|err| Error::CryptoPrimitive(format!("AES-CBC encryption: {err}")))
}

pub(super) fn cbc_decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let decrypted = match key.len() {
        16 => Aes128CbcDec::new_from_slices(key, iv)
            .map_err(|err| Error::CryptoPrimitive(format!("AES-CBC decryption: {err}")))?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        32 => Aes256CbcDec::new_from_slices(key, iv)
            .map_err(|err| Error::CryptoPrimitive(format!("AES-CBC decryption: {err}")))?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        len => {
            return Err(Error::CryptoPrimitive(format!(
                "unsupported AES-CBC key length {len}"
            )))
        }
    };
    decrypted.map_err(|_| Error::CryptoPrimitive("invalid PKCS#7 padding".into()))
}

pub(super) fn gcm_encrypt(key: &[u8], iv: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    if iv.len() != 12 {
        return Err(Error::CryptoPrimitive("AES-GCM requires a 96-bit IV".into()));
    }
    let nonce = Nonce::from_slice(iv);

    let sealed = match key.len() {
        16 => Aes128Gcm::new_from_slice(key)
            .map_err(|_| Error::CryptoPrimitive("invalid AES-GCM key length".into()))?
            .encrypt(nonce, Payload { msg: plaintext, aad }),
        32 => Aes256Gcm::new_from_slice(key)
            .map_err(|_| Error::CryptoPrimitive("invalid AES-GCM key length".into()))?
            .encrypt(nonce, Payload { msg: plaintext, aad }),
        len => {
            return Err(Error::CryptoPrimitive(format!(
                "unsupported AES-GCM key length {len}"
            )))
        }
    };
    sealed.map_err(|_| Error::CryptoPrimitive("AES-GCM encryption failed".into()))
}

pub(super) fn gcm_decrypt(key: &[u8], iv: &[u8], aad: &[u8], sealed: &[u8]) -> Result<Vec<u8>> {
    if iv.len() != 12 {
        return Err(Error::CryptoPrimitive("AES-GCM requires a 96-bit IV".into()));
    }
    let nonce = Nonce::from_slice(iv);

    let opened = match key.len() {
        16 => Aes128Gcm::new_from_slice(key)
            .map_err(|_| Error::CryptoPrimitive("invalid AES-GCM key length".into()))?
            .decrypt(nonce, Payload { msg: sealed, aad }),
        32 => Aes256Gcm::new_from_slice(key)
            .map_err(|_| Error::CryptoPrimitive("invalid AES-GCM key length".into()))?
            .decrypt(nonce, Payload { msg: sealed, aad }),
        len => {
            return Err(Error::CryptoPrimitive(format!(
                "unsupported AES-GCM key length {len}"
            )))
        }
    };
    // the aead crate reports nothing beyond "the tag did not verify"
    opened.map_err(|_| Error::IntegrityFailure)
}

pub(super) fn key_wrap(alg: KeyManagementAlgorithm, kek: &[u8], cek: &[u8]) -> Result<Vec<u8>> {
    if cek.is_empty() || cek.len() % 8 != 0 {
        return Err(Error::CryptoPrimitive(
            "AES-KW input must be a non-empty multiple of 64 bits".into(),
        ));
    }

    let mut wrapped = vec![0u8; cek.len() + 8];
    match alg {
        KeyManagementAlgorithm::A128Kw => kek_128(kek)?.wrap(cek, &mut wrapped),
        KeyManagementAlgorithm::A256Kw => kek_256(kek)?.wrap(cek, &mut wrapped),
        _ => return Err(Error::InternalInvariant("not an AES-KW algorithm")),
    }
    .map_err(|err| Error::CryptoPrimitive(format!("AES-KW wrap: {err}")))?;
    Ok(wrapped)
}

pub(super) fn key_unwrap(
    alg: KeyManagementAlgorithm,
    kek: &[u8],
    wrapped: &[u8],
) -> Result<Vec<u8>> {
    if wrapped.len() < 24 || wrapped.len() % 8 != 0 {
        return Err(Error::CryptoPrimitive(
            "AES-KW ciphertext has an invalid length".into(),
        ));
    }

    let mut cek = vec![0u8; wrapped.len() - 8];
    match alg {
        KeyManagementAlgorithm::A128Kw => kek_128(kek)?.unwrap(wrapped, &mut cek),
        KeyManagementAlgorithm::A256Kw => kek_256(kek)?.unwrap(wrapped, &mut cek),
        _ => return Err(Error::InternalInvariant("not an AES-KW algorithm")),
    }
    .map_err(|err| Error::CryptoPrimitive(format!("AES-KW unwrap: {err}")))?;
    Ok(cek)
}

fn kek_128(kek: &[u8]) -> Result<Kek<Aes128>> {
    if kek.len() != 16 {
        return Err(Error::CryptoPrimitive("A128KW requires a 128-bit key".into()));
    }
    Ok(Kek::new(GenericArray::from_slice(kek)))
}

fn kek_256(kek: &[u8]) -> Result<Kek<Aes256>> {
    if kek.len() != 32 {
        return Err(Error::CryptoPrimitive("A256KW requires a 256-bit key".into()));
    }
    Ok(Kek::new(GenericArray::from_slice(kek)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 3394 section 4.1: wrap 128 bits of key data with a 128-bit KEK
    const KEK_128: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];
    const KEY_DATA_128: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    const WRAPPED_128: [u8; 24] = [
        0x1f, 0xa6, 0x8b, 0x0a, 0x81, 0x12, 0xb4, 0x47, 0xae, 0xf3, 0x4b, 0xd8, 0xfb, 0x5a, 0x7b,
        0x82, 0x9d, 0x3e, 0x86, 0x23, 0x71, 0xd2, 0xcf, 0xe5,
    ];

    #[test]
    fn aes_key_wrap_matches_rfc_3394() {
        let wrapped = key_wrap(KeyManagementAlgorithm::A128Kw, &KEK_128, &KEY_DATA_128).unwrap();
        assert_eq!(wrapped, WRAPPED_128);

        let unwrapped = key_unwrap(KeyManagementAlgorithm::A128Kw, &KEK_128, &WRAPPED_128).unwrap();
        assert_eq!(unwrapped, KEY_DATA_128);
    }

    #[test]
    fn aes_key_unwrap_detects_tampering() {
        let mut wrapped = WRAPPED_128;
        wrapped[0] ^= 1;
        assert!(matches!(
            key_unwrap(KeyManagementAlgorithm::A128Kw, &KEK_128, &wrapped),
            Err(Error::CryptoPrimitive(_))
        ));
    }

    #[test]
    fn cbc_round_trip_for_every_padding_length() {
        let key = [0x42u8; 16];
        let iv = [0x24u8; 16];
        for len in 0..=33 {
            let plaintext = vec![0xa5u8; len];
            let ciphertext = cbc_encrypt(&key, &iv, &plaintext).unwrap();
            assert_eq!(ciphertext.len() % 16, 0);
            assert!(ciphertext.len() > plaintext.len());
            assert_eq!(cbc_decrypt(&key, &iv, &ciphertext).unwrap(), plaintext);
        }
    }

    #[test]
    fn gcm_rejects_tampered_aad() {
        let key = [7u8; 32];
        let iv = [9u8; 12];
        let sealed = gcm_encrypt(&key, &iv, b"aad", b"payload").unwrap();
        assert!(matches!(
            gcm_decrypt(&key, &iv, b"tampered", &sealed),
            Err(Error::IntegrityFailure)
        ));
        assert_eq!(gcm_decrypt(&key, &iv, b"aad", &sealed).unwrap(), b"payload");
    }
}
