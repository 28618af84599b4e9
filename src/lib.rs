//! A [JSON Web Encryption] (JWE) codec for the compact serialization.
//!
//! The codec turns a UTF-8 plaintext into the dotted five-segment compact
//! form `header.encrypted_key.iv.ciphertext.tag` and back, supporting
//! RSAES-OAEP and AES Key Wrap for key management and AES-GCM and
//! AES-CBC-HMAC for content encryption.
//!
//! All primitive cryptography is reached through the
//! [`CryptoProvider`](crypto::CryptoProvider) contract; the bundled
//! [`RustCrypto`](crypto::RustCrypto) backend implements it with the
//! [RustCrypto] ecosystem.
//!
//! [JSON Web Encryption]: <https://www.rfc-editor.org/rfc/rfc7516.html>
//! [RustCrypto]: <https://github.com/RustCrypto>
#![warn(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    explicit_outlives_requirements,
    clippy::missing_errors_doc
)]
#![deny(
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    macro_use_extern_crate,
    non_ascii_idents,
    elided_lifetimes_in_paths
)]
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "std", allow(unused_qualifications))]

extern crate alloc;

pub(crate) mod base64_url;
pub(crate) mod bytes;

pub mod crypto;
pub mod error;
pub mod format;
pub mod header;
pub mod jwa;
pub mod jwe;
pub mod jwk;

pub use base64_url::Base64UrlString;

#[doc(inline)]
pub use self::{
    error::{Error, Result},
    header::JweHeader,
    jwe::JweCodec,
};
