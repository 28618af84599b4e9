//! Implementation of JSON Web Encryption (JWE) as defined in [RFC 7516],
//! restricted to the compact serialization.
//!
//! [RFC 7516]: <https://www.rfc-editor.org/rfc/rfc7516.html>

mod cek;
mod decrypt;
mod encrypt;

use alloc::string::{String, ToString};
use core::{fmt, marker::PhantomData};

use crate::{
    base64_url,
    crypto::{CryptoProvider, KeyUsage, KeyUsages, RustCrypto, SecretAlgorithm},
    error::{Error, Result},
    format::CompactJwe,
    header::JweHeader,
    jwa::{ContentEncryptionAlgorithm, ContentSpec, KeyManagementAlgorithm},
};

/// A JWE codec bound to a [`CryptoProvider`].
///
/// A codec carries the currently selected key management and content
/// encryption algorithms. [`encrypt`](Self::encrypt) uses them as
/// configured; [`decrypt`](Self::decrypt) replaces them with whatever the
/// parsed protected header names, which is why it takes `&mut self`.
/// Concurrent callers must use distinct codec instances or serialize
/// access.
///
/// Keys, CEKs and IVs live only inside a single operation. A CEK or IV is
/// never reused across calls.
pub struct JweCodec<P: CryptoProvider = RustCrypto> {
    alg: KeyManagementAlgorithm,
    enc: ContentEncryptionAlgorithm,
    _provider: PhantomData<P>,
}

impl<P: CryptoProvider> fmt::Debug for JweCodec<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JweCodec")
            .field("alg", &self.alg)
            .field("enc", &self.enc)
            .finish()
    }
}

impl JweCodec {
    /// Creates a codec over the bundled [`RustCrypto`] backend.
    pub fn new(alg: KeyManagementAlgorithm, enc: ContentEncryptionAlgorithm) -> Self {
        Self::with_provider(alg, enc)
    }
}

impl<P: CryptoProvider> JweCodec<P> {
    /// Creates a codec over a custom [`CryptoProvider`].
    pub fn with_provider(alg: KeyManagementAlgorithm, enc: ContentEncryptionAlgorithm) -> Self {
        Self {
            alg,
            enc,
            _provider: PhantomData,
        }
    }

    /// The currently selected algorithm pair.
    pub fn algorithms(&self) -> (KeyManagementAlgorithm, ContentEncryptionAlgorithm) {
        (self.alg, self.enc)
    }

    /// Reconfigures the algorithm pair used by [`encrypt`](Self::encrypt).
    pub fn set_algorithms(
        &mut self,
        alg: KeyManagementAlgorithm,
        enc: ContentEncryptionAlgorithm,
    ) {
        self.alg = alg;
        self.enc = enc;
    }

    /// Encrypts `plaintext` into a five-segment compact JWE under the
    /// configured algorithm pair.
    ///
    /// `wrapping_key` must carry the `wrap` usage: an RSA public key for
    /// the RSA-OAEP algorithms, an AES-KW secret key for `A128KW` and
    /// `A256KW`. A fresh CEK and IV are drawn for every call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CryptoPrimitive`] if the wrapping key does not fit
    /// the configured algorithm or a primitive fails.
    pub fn encrypt(&self, wrapping_key: &P::Key, plaintext: &str) -> Result<String> {
        let header = JweHeader {
            alg: self.alg,
            enc: self.enc,
        };
        let header_b64 = base64_url::encode(header.to_json()?);
        // the AAD is the encoded header, not the decoded JSON
        let aad = header_b64.as_bytes();

        let cek = cek::create_cek::<P>(self.enc)?;
        let iv = encrypt::create_iv::<P>(self.enc.spec())?;

        let encrypted_cek = P::wrap_raw(cek.handle(), wrapping_key, self.alg)?;
        let content = encrypt::encrypt_content::<P>(self.enc, &cek, &iv, aad, plaintext.as_bytes())?;

        let compact = CompactJwe {
            encrypted_key: base64_url::encode(encrypted_cek),
            iv: base64_url::encode(iv),
            ciphertext: base64_url::encode(content.ciphertext),
            tag: base64_url::encode(content.tag),
            header: header_b64,
        };
        Ok(compact.to_string())
    }

    /// Decrypts a compact JWE back into its UTF-8 plaintext.
    ///
    /// The codec's algorithm pair is replaced by the one named in the
    /// protected header before any key material is touched. For the
    /// composite suites the MAC is verified, in constant time, before a
    /// single block is decrypted; on any failure no partial output is
    /// surfaced.
    ///
    /// # Errors
    ///
    /// * [`Error::MalformedInput`] on a structural defect: segment count,
    ///   base64url, header JSON, `crit`, IV/tag lengths, non-UTF-8
    ///   plaintext.
    /// * [`Error::UnsupportedAlgorithm`] if the header names an algorithm
    ///   outside the supported set.
    /// * [`Error::IntegrityFailure`] if an authentication tag does not
    ///   verify.
    /// * [`Error::CryptoPrimitive`] if the unwrapping key does not fit or
    ///   a primitive fails.
    pub fn decrypt(&mut self, unwrapping_key: &P::Key, compact: &str) -> Result<String> {
        let compact: CompactJwe = compact.parse()?;

        let header_bytes = base64_url::decode(&compact.header)?;
        let header = JweHeader::parse(&header_bytes)?;
        // the codec follows the header from here on
        self.alg = header.alg;
        self.enc = header.enc;
        let spec = self.enc.spec();

        let encrypted_cek = base64_url::decode(&compact.encrypted_key)?;
        let iv = base64_url::decode(&compact.iv)?;
        let ciphertext = base64_url::decode(&compact.ciphertext)?;
        let tag = base64_url::decode(&compact.tag)?;

        if iv.len() != spec.iv_bytes() {
            return Err(Error::MalformedInput(
                "IV length does not match the content algorithm",
            ));
        }
        if tag.len() != spec.tag_bytes() {
            return Err(Error::MalformedInput(
                "tag length does not match the content algorithm",
            ));
        }

        let cek = match spec {
            ContentSpec::Aead { .. } => P::unwrap_raw(
                &encrypted_cek,
                unwrapping_key,
                self.alg,
                SecretAlgorithm::AesGcm,
                false,
                KeyUsages::only(KeyUsage::Decrypt),
            )?,
            // re-imported extractable so the MAC and ENC halves can be
            // split out
            ContentSpec::Composite { .. } => P::unwrap_raw(
                &encrypted_cek,
                unwrapping_key,
                self.alg,
                SecretAlgorithm::Raw,
                true,
                KeyUsages::none(),
            )?,
        };

        // the AAD is the first segment exactly as transmitted
        let plaintext = decrypt::decrypt_content::<P>(
            self.enc,
            &cek,
            &iv,
            compact.header.as_bytes(),
            &ciphertext,
            &tag,
        )?;

        String::from_utf8(plaintext).map_err(|_| Error::MalformedInput("plaintext is not UTF-8"))
    }
}
