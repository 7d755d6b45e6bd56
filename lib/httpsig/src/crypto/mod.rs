//!
//! Keys and `ring`-backed cryptographic capabilities
//!

use crate::algorithm::Algorithm;
use ring::signature::{EcdsaKeyPair, Ed25519KeyPair, KeyPair, RsaKeyPair};
use std::any::Any;

mod asymmetric;
mod mac;

pub mod parse;

pub use self::{
    asymmetric::{EcdsaSha256, Ed25519, RsaSha256, RsaSha512},
    mac::{HmacSha256, HmacSha384, HmacSha512},
};

/// Key used to produce a signature
///
/// Which variant is accepted depends on the algorithm. MAC algorithms only take [`PrivateKey::Secret`].
#[non_exhaustive]
pub enum PrivateKey {
    /// Shared secret for MAC algorithms
    Secret(Vec<u8>),

    /// RSA key pair
    Rsa(RsaKeyPair),

    /// Ed25519 key pair
    Ed25519(Ed25519KeyPair),

    /// ECDSA P-256 key pair
    Ecdsa(EcdsaKeyPair),

    /// Key understood by a caller-registered capability
    Custom(Box<dyn Any + Send + Sync>),
}

impl PrivateKey {
    /// Built-in algorithm this key is usually used with
    #[must_use]
    pub fn default_algorithm(&self) -> Option<Algorithm> {
        let algorithm = match self {
            Self::Secret(..) => Algorithm::HmacSha256,
            Self::Rsa(..) => Algorithm::RsaSha256,
            Self::Ed25519(..) => Algorithm::Ed25519,
            Self::Ecdsa(..) => Algorithm::EcdsaSha256,
            Self::Custom(..) => return None,
        };

        Some(algorithm)
    }

    /// Derive the key a verifier needs to check signatures made with this key
    ///
    /// For secrets this is the secret itself
    #[must_use]
    pub fn public_key(&self) -> Option<PublicKey> {
        let public_key = match self {
            Self::Secret(secret) => PublicKey::Secret(secret.clone()),
            Self::Rsa(key) => PublicKey::Rsa(key.public_key().as_ref().to_vec()),
            Self::Ed25519(key) => PublicKey::Ed25519(key.public_key().as_ref().to_vec()),
            Self::Ecdsa(key) => PublicKey::Ecdsa(key.public_key().as_ref().to_vec()),
            Self::Custom(..) => return None,
        };

        Some(public_key)
    }
}

/// Key used to check a signature
#[non_exhaustive]
pub enum PublicKey {
    /// Shared secret for MAC algorithms
    Secret(Vec<u8>),

    /// DER encoded `RSAPublicKey`
    Rsa(Vec<u8>),

    /// Raw Ed25519 public key
    Ed25519(Vec<u8>),

    /// Uncompressed SEC1 encoded P-256 point
    Ecdsa(Vec<u8>),

    /// Key understood by a caller-registered capability
    Custom(Box<dyn Any + Send + Sync>),
}
