//! Small binary helpers shared across the codec.

use subtle::ConstantTimeEq as _;

/// The `AL` field of the composite MAC input: the bit length of the
/// additional authenticated data as a 64-bit big-endian integer
/// ([section 5.2.2.1 of RFC 7518]).
///
/// [section 5.2.2.1 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-5.2.2.1>
pub(crate) fn al_bytes(aad_len: usize) -> [u8; 8] {
    ((aad_len as u64) * 8).to_be_bytes()
}

/// Strips leading zero bytes, as required before big-endian RSA integer
/// parameters are base64url-encoded into JWK fields.
pub(crate) fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

/// Compares two byte sequences without short-circuiting on the first
/// mismatch. Sequences of different lengths never compare equal.
pub(crate) fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
