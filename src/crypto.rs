//! The cryptographic backend consumed by the codec.
//!
//! The codec never touches a primitive directly; everything flows through
//! the [`CryptoProvider`] contract over opaque key handles, so any
//! primitive library able to satisfy the contract can back the codec. The
//! bundled [`RustCrypto`] backend implements it with the RustCrypto
//! ecosystem crates.

pub mod provider;
pub mod rustcrypto;

#[doc(inline)]
pub use self::{
    provider::{CipherParams, CryptoProvider, KeyUsage, KeyUsages, RsaJwk, SecretAlgorithm},
    rustcrypto::RustCrypto,
};
