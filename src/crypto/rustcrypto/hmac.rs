use alloc::vec::Vec;

use ::hmac::Hmac;
use digest::Mac as _;
use sha2::{Sha256, Sha512};

use crate::{
    error::{Error, Result},
    jwa::HmacHash,
};

pub(super) fn sign(hash: HmacHash, key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let invalid = |_| Error::CryptoPrimitive("invalid HMAC key length".into());
    let output = match hash {
        HmacHash::Sha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(key).map_err(invalid)?;
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
        HmacHash::Sha512 => {
            let mut mac = Hmac::<Sha512>::new_from_slice(key).map_err(invalid)?;
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
    };
    Ok(output)
}
