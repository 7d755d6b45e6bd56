//!
//! Algorithm registry
//!
//! Maps algorithm names onto either an asymmetric signer or a MAC provider
//!

use crate::{
    crypto::{self, PrivateKey, PublicKey},
    Error, Result,
};
use ring::rand::SecureRandom;
use std::{collections::HashMap, sync::Arc};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};
use subtle::ConstantTimeEq;

/// Algorithms with a built-in implementation
#[derive(AsRefStr, Clone, Copy, Debug, EnumIter, EnumString, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Algorithm {
    /// HMAC with SHA-256
    #[strum(serialize = "hmac-sha256")]
    HmacSha256,

    /// HMAC with SHA-384
    #[strum(serialize = "hmac-sha384")]
    HmacSha384,

    /// HMAC with SHA-512
    #[strum(serialize = "hmac-sha512")]
    HmacSha512,

    /// RSASSA-PKCS1-v1_5 with SHA-256
    #[strum(serialize = "rsa-sha256")]
    RsaSha256,

    /// RSASSA-PKCS1-v1_5 with SHA-512
    #[strum(serialize = "rsa-sha512")]
    RsaSha512,

    /// Ed25519
    #[strum(serialize = "ed25519")]
    Ed25519,

    /// ECDSA over P-256 with SHA-256 (ASN.1 encoded signatures)
    #[strum(serialize = "ecdsa-sha256")]
    EcdsaSha256,
}

/// Asymmetric signature capability
pub trait AsymmetricSigner: Send + Sync {
    /// Canonical algorithm name
    fn name(&self) -> &str;

    /// Sign the data with the private key
    ///
    /// Implementations reject keys of the wrong shape with [`Error::KeyTypeMismatch`]
    fn sign(&self, rng: &dyn SecureRandom, key: &PrivateKey, data: &[u8]) -> Result<Vec<u8>>;

    /// Check the signature over the data with the public key
    fn verify(&self, key: &PublicKey, data: &[u8], signature: &[u8]) -> Result<()>;
}

/// Keyed MAC capability
pub trait MacProvider: Send + Sync {
    /// Canonical algorithm name
    fn name(&self) -> &str;

    /// Compute the MAC over the data
    fn sign(&self, data: &[u8], secret: &[u8]) -> Result<Vec<u8>>;

    /// Check whether the candidate is the MAC over the data
    ///
    /// The comparison runs in constant time
    fn verify(&self, data: &[u8], candidate: &[u8], secret: &[u8]) -> Result<bool> {
        let expected = self.sign(data, secret)?;
        Ok(expected.as_slice().ct_eq(candidate).into())
    }
}

/// An algorithm name bound to its implementation
#[derive(Clone)]
pub enum Capability {
    /// Asymmetric signature algorithm
    Asymmetric(Arc<dyn AsymmetricSigner>),

    /// MAC algorithm
    Mac(Arc<dyn MacProvider>),
}

impl Capability {
    /// Canonical name of the algorithm
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Asymmetric(signer) => signer.name(),
            Self::Mac(mac) => mac.name(),
        }
    }
}

/// Registry of algorithm implementations
///
/// Asymmetric implementations always take precedence over MAC implementations of the same name
#[derive(Clone)]
pub struct Registry {
    asymmetric: HashMap<String, Arc<dyn AsymmetricSigner>>,
    mac: HashMap<String, Arc<dyn MacProvider>>,
}

impl Registry {
    /// Registry without any algorithms
    #[must_use]
    pub fn empty() -> Self {
        Self {
            asymmetric: HashMap::new(),
            mac: HashMap::new(),
        }
    }

    /// Register an asymmetric signer under its canonical name
    pub fn register_asymmetric<S>(&mut self, signer: S) -> &mut Self
    where
        S: AsymmetricSigner + 'static,
    {
        self.asymmetric
            .insert(signer.name().to_string(), Arc::new(signer));
        self
    }

    /// Register a MAC provider under its canonical name
    pub fn register_mac<M>(&mut self, mac: M) -> &mut Self
    where
        M: MacProvider + 'static,
    {
        self.mac.insert(mac.name().to_string(), Arc::new(mac));
        self
    }

    /// Look up an asymmetric signer
    #[must_use]
    pub fn resolve_signer(&self, name: &str) -> Option<Arc<dyn AsymmetricSigner>> {
        self.asymmetric.get(name).cloned()
    }

    /// Look up a MAC provider
    #[must_use]
    pub fn resolve_mac(&self, name: &str) -> Option<Arc<dyn MacProvider>> {
        self.mac.get(name).cloned()
    }

    /// Look up an algorithm, trying asymmetric signers first and MAC providers second
    pub fn resolve(&self, name: &str) -> Result<Capability> {
        if let Some(signer) = self.resolve_signer(name) {
            return Ok(Capability::Asymmetric(signer));
        }

        if let Some(mac) = self.resolve_mac(name) {
            return Ok(Capability::Mac(mac));
        }

        Err(Error::UnknownAlgorithm {
            name: name.to_string(),
        })
    }

    /// Names of all registered algorithms
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.asymmetric
            .keys()
            .chain(self.mac.keys())
            .map(String::as_str)
    }
}

impl Default for Registry {
    /// Registry with every built-in [`Algorithm`]
    fn default() -> Self {
        let mut registry = Self::empty();
        for algorithm in Algorithm::iter() {
            match algorithm {
                Algorithm::HmacSha256 => registry.register_mac(crypto::HmacSha256),
                Algorithm::HmacSha384 => registry.register_mac(crypto::HmacSha384),
                Algorithm::HmacSha512 => registry.register_mac(crypto::HmacSha512),
                Algorithm::RsaSha256 => registry.register_asymmetric(crypto::RsaSha256),
                Algorithm::RsaSha512 => registry.register_asymmetric(crypto::RsaSha512),
                Algorithm::Ed25519 => registry.register_asymmetric(crypto::Ed25519),
                Algorithm::EcdsaSha256 => registry.register_asymmetric(crypto::EcdsaSha256),
            };
        }

        registry
    }
}

#[cfg(test)]
mod test {
    use super::{Algorithm, Capability, MacProvider, Registry};
    use crate::{Error, Result};
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    struct FakeMac;

    impl MacProvider for FakeMac {
        fn name(&self) -> &str {
            "ed25519"
        }

        fn sign(&self, data: &[u8], _secret: &[u8]) -> Result<Vec<u8>> {
            Ok(data.to_vec())
        }
    }

    #[test]
    fn default_registry_has_builtins() {
        let registry = Registry::default();
        for algorithm in Algorithm::iter() {
            let capability = registry.resolve(algorithm.as_ref()).unwrap();
            assert_eq!(capability.name(), algorithm.as_ref());
        }

        assert!(matches!(
            registry.resolve("hmac-sha256"),
            Ok(Capability::Mac(..))
        ));
        assert!(matches!(
            registry.resolve("rsa-sha256"),
            Ok(Capability::Asymmetric(..))
        ));
    }

    #[test]
    fn unknown_algorithm() {
        let registry = Registry::default();
        let err = registry.resolve("rot13").err().unwrap();
        assert!(matches!(err, Error::UnknownAlgorithm { ref name } if name == "rot13"));

        assert!(Registry::empty().resolve("hmac-sha256").is_err());
    }

    #[test]
    fn asymmetric_takes_precedence() {
        let mut registry = Registry::default();
        registry.register_mac(FakeMac);

        assert!(registry.resolve_mac("ed25519").is_some());
        assert!(matches!(
            registry.resolve("ed25519"),
            Ok(Capability::Asymmetric(..))
        ));
    }

    #[test]
    fn registered_names() {
        let registry = Registry::default();
        let mut names: Vec<&str> = registry.names().collect();
        names.sort_unstable();

        let mut expected: Vec<String> = Algorithm::iter()
            .map(|algorithm| algorithm.as_ref().to_string())
            .collect();
        expected.sort_unstable();
        assert_eq!(names, expected);

        let mut registry = Registry::empty();
        assert_eq!(registry.names().count(), 0);

        registry.register_mac(FakeMac);
        assert_eq!(registry.names().collect::<Vec<_>>(), ["ed25519"]);
    }

    #[test]
    fn names_roundtrip() {
        for algorithm in Algorithm::iter() {
            assert_eq!(Algorithm::from_str(algorithm.as_ref()).unwrap(), algorithm);
        }
    }
}
