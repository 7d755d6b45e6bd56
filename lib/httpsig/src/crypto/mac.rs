use crate::{algorithm::MacProvider, Algorithm, Result};
use ring::hmac;

macro_rules! define_hmac {
    ($(#[$meta:meta])* $ty:ident, $ring_algorithm:expr, $algorithm:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $ty;

        impl MacProvider for $ty {
            fn name(&self) -> &str {
                $algorithm.as_ref()
            }

            fn sign(&self, data: &[u8], secret: &[u8]) -> Result<Vec<u8>> {
                let key = hmac::Key::new($ring_algorithm, secret);
                Ok(hmac::sign(&key, data).as_ref().to_vec())
            }

            fn verify(&self, data: &[u8], candidate: &[u8], secret: &[u8]) -> Result<bool> {
                let key = hmac::Key::new($ring_algorithm, secret);
                Ok(hmac::verify(&key, data, candidate).is_ok())
            }
        }
    };
}

define_hmac!(
    /// `hmac-sha256`
    HmacSha256,
    hmac::HMAC_SHA256,
    Algorithm::HmacSha256
);

define_hmac!(
    /// `hmac-sha384`
    HmacSha384,
    hmac::HMAC_SHA384,
    Algorithm::HmacSha384
);

define_hmac!(
    /// `hmac-sha512`
    HmacSha512,
    hmac::HMAC_SHA512,
    Algorithm::HmacSha512
);
