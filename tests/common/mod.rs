use std::sync::OnceLock;

use jwe_compact::Base64UrlString;
use rsa::{
    traits::{PrivateKeyParts as _, PublicKeyParts as _},
    BigUint, RsaPrivateKey,
};
use serde_json::{json, Value};

/// A 2048-bit RSA keypair in JWK form, generated once per test binary.
pub struct RsaTestKey {
    pub public_jwk: Value,
    pub private_jwk: Value,
}

pub fn rsa_test_key() -> &'static RsaTestKey {
    static KEY: OnceLock<RsaTestKey> = OnceLock::new();
    KEY.get_or_init(|| {
        let mut key = RsaPrivateKey::new(&mut rand_core::OsRng, 2048).expect("RSA key generation");
        key.precompute().expect("precomputation");

        let b64 = |uint: &BigUint| Base64UrlString::encode(uint.to_bytes_be()).to_string();

        let n = b64(key.n());
        let e = b64(key.e());
        let primes = key.primes();

        RsaTestKey {
            public_jwk: json!({ "kty": "RSA", "n": n.clone(), "e": e.clone() }),
            private_jwk: json!({
                "kty": "RSA",
                "n": n,
                "e": e,
                "d": b64(key.d()),
                "p": b64(&primes[0]),
                "q": b64(&primes[1]),
                "dp": b64(key.dp().expect("key must be precomputed")),
                "dq": b64(key.dq().expect("key must be precomputed")),
                "qi": b64(&key.crt_coefficient().expect("invalid prime factor pair")),
            }),
        }
    })
}
