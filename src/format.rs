//! Serialization formats for a JWE.
//!
//! Only the compact serialization of [section 7.1 of RFC 7516] is
//! implemented; the JSON serializations are out of scope.
//!
//! [section 7.1 of RFC 7516]: <https://datatracker.ietf.org/doc/html/rfc7516#section-7.1>

mod compact;

#[doc(inline)]
pub use compact::CompactJwe;
