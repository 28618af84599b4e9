mod common;

use jwe_compact::{
    jwa::{ContentEncryptionAlgorithm, KeyManagementAlgorithm},
    jwk::{self, rsa::RsaPublicParams},
    Error, JweCodec,
};
use serde_json::json;

use jwe_compact::crypto::RustCrypto;

#[test]
fn exponent_shapes_normalize_identically() {
    let key = common::rsa_test_key();

    let mut int_jwk = key.public_jwk.clone();
    int_jwk["e"] = json!(65537);
    let mut hex_jwk = key.public_jwk.clone();
    hex_jwk["e"] = json!("01:00:01");

    let b64 = RsaPublicParams::from_value(&key.public_jwk).unwrap();
    let int = RsaPublicParams::from_value(&int_jwk).unwrap();
    let hex = RsaPublicParams::from_value(&hex_jwk).unwrap();

    assert_eq!(b64, int);
    assert_eq!(b64, hex);
    assert_eq!(b64.e.as_str(), "AQAB");
}

#[test]
fn exponent_shapes_interoperate() {
    let key = common::rsa_test_key();
    let private = jwk::import_rsa_private_key::<RustCrypto>(&key.private_jwk).unwrap();

    let mut int_jwk = key.public_jwk.clone();
    int_jwk["e"] = json!(65537);
    let mut hex_jwk = key.public_jwk.clone();
    hex_jwk["e"] = json!("01:00:01");

    for jwk in [&key.public_jwk, &int_jwk, &hex_jwk] {
        let public = jwk::import_rsa_public_key::<RustCrypto>(jwk).unwrap();
        let codec = JweCodec::new(
            KeyManagementAlgorithm::RsaOaep,
            ContentEncryptionAlgorithm::A128CbcHs256,
        );
        let token = codec.encrypt(&public, "Hello, World!").unwrap();

        let mut decoder = JweCodec::new(
            KeyManagementAlgorithm::RsaOaep,
            ContentEncryptionAlgorithm::A128Gcm,
        );
        assert_eq!(decoder.decrypt(&private, &token).unwrap(), "Hello, World!");
    }
}

#[test]
fn private_jwk_requires_the_full_member_set() {
    let key = common::rsa_test_key();
    let mut jwk = key.private_jwk.clone();
    jwk.as_object_mut().unwrap().remove("qi");

    let err = jwk::import_rsa_private_key::<RustCrypto>(&jwk).unwrap_err();
    assert!(matches!(err, Error::MalformedKey(_)));
}

#[test]
fn inconsistent_kty_or_alg_is_rejected() {
    let key = common::rsa_test_key();

    let mut jwk = key.public_jwk.clone();
    jwk["kty"] = json!("EC");
    assert!(matches!(
        jwk::import_rsa_public_key::<RustCrypto>(&jwk),
        Err(Error::MalformedKey(_))
    ));

    let mut jwk = key.public_jwk.clone();
    jwk["alg"] = json!("RSA1_5");
    assert!(matches!(
        jwk::import_rsa_public_key::<RustCrypto>(&jwk),
        Err(Error::MalformedKey(_))
    ));
}

#[test]
fn extra_members_are_tolerated() {
    let key = common::rsa_test_key();
    let mut jwk = key.public_jwk.clone();
    jwk["alg"] = json!("RSA-OAEP");
    jwk["use"] = json!("enc");
    jwk["kid"] = json!("test-key-1");

    assert!(jwk::import_rsa_public_key::<RustCrypto>(&jwk).is_ok());
}
