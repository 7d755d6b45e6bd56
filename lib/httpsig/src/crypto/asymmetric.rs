use super::{PrivateKey, PublicKey};
use crate::{algorithm::AsymmetricSigner, Algorithm, Error, Result};
use ring::{
    rand::SecureRandom,
    signature::{
        RsaEncoding, UnparsedPublicKey, VerificationAlgorithm, ECDSA_P256_SHA256_ASN1, ED25519,
        RSA_PKCS1_2048_8192_SHA256, RSA_PKCS1_2048_8192_SHA512, RSA_PKCS1_SHA256,
        RSA_PKCS1_SHA512,
    },
};

#[inline]
fn key_type_mismatch(algorithm: Algorithm) -> Error {
    Error::KeyTypeMismatch {
        algorithm: algorithm.as_ref().to_string(),
    }
}

#[inline]
fn verify_with(
    algorithm: &'static dyn VerificationAlgorithm,
    key: &[u8],
    data: &[u8],
    signature: &[u8],
) -> Result<()> {
    UnparsedPublicKey::new(algorithm, key)
        .verify(data, signature)
        .map_err(|_| Error::VerificationFailure)
}

fn rsa_sign(
    algorithm: Algorithm,
    padding: &'static dyn RsaEncoding,
    rng: &dyn SecureRandom,
    key: &PrivateKey,
    data: &[u8],
) -> Result<Vec<u8>> {
    let PrivateKey::Rsa(key) = key else {
        return Err(key_type_mismatch(algorithm));
    };

    let mut buf = vec![0; key.public().modulus_len()];
    key.sign(padding, rng, data, &mut buf)
        .map_err(|err| Error::Crypto(err.into()))?;

    Ok(buf)
}

/// `rsa-sha256`
#[derive(Clone, Copy, Debug, Default)]
pub struct RsaSha256;

impl AsymmetricSigner for RsaSha256 {
    fn name(&self) -> &str {
        Algorithm::RsaSha256.as_ref()
    }

    fn sign(&self, rng: &dyn SecureRandom, key: &PrivateKey, data: &[u8]) -> Result<Vec<u8>> {
        rsa_sign(Algorithm::RsaSha256, &RSA_PKCS1_SHA256, rng, key, data)
    }

    fn verify(&self, key: &PublicKey, data: &[u8], signature: &[u8]) -> Result<()> {
        let PublicKey::Rsa(key) = key else {
            return Err(key_type_mismatch(Algorithm::RsaSha256));
        };

        verify_with(&RSA_PKCS1_2048_8192_SHA256, key, data, signature)
    }
}

/// `rsa-sha512`
#[derive(Clone, Copy, Debug, Default)]
pub struct RsaSha512;

impl AsymmetricSigner for RsaSha512 {
    fn name(&self) -> &str {
        Algorithm::RsaSha512.as_ref()
    }

    fn sign(&self, rng: &dyn SecureRandom, key: &PrivateKey, data: &[u8]) -> Result<Vec<u8>> {
        rsa_sign(Algorithm::RsaSha512, &RSA_PKCS1_SHA512, rng, key, data)
    }

    fn verify(&self, key: &PublicKey, data: &[u8], signature: &[u8]) -> Result<()> {
        let PublicKey::Rsa(key) = key else {
            return Err(key_type_mismatch(Algorithm::RsaSha512));
        };

        verify_with(&RSA_PKCS1_2048_8192_SHA512, key, data, signature)
    }
}

/// `ed25519`
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519;

impl AsymmetricSigner for Ed25519 {
    fn name(&self) -> &str {
        Algorithm::Ed25519.as_ref()
    }

    fn sign(&self, _rng: &dyn SecureRandom, key: &PrivateKey, data: &[u8]) -> Result<Vec<u8>> {
        let PrivateKey::Ed25519(key) = key else {
            return Err(key_type_mismatch(Algorithm::Ed25519));
        };

        Ok(key.sign(data).as_ref().to_vec())
    }

    fn verify(&self, key: &PublicKey, data: &[u8], signature: &[u8]) -> Result<()> {
        let PublicKey::Ed25519(key) = key else {
            return Err(key_type_mismatch(Algorithm::Ed25519));
        };

        verify_with(&ED25519, key, data, signature)
    }
}

/// `ecdsa-sha256`
///
/// Keys have to be P-256 keys created with `ECDSA_P256_SHA256_ASN1_SIGNING`
#[derive(Clone, Copy, Debug, Default)]
pub struct EcdsaSha256;

impl AsymmetricSigner for EcdsaSha256 {
    fn name(&self) -> &str {
        Algorithm::EcdsaSha256.as_ref()
    }

    fn sign(&self, rng: &dyn SecureRandom, key: &PrivateKey, data: &[u8]) -> Result<Vec<u8>> {
        let PrivateKey::Ecdsa(key) = key else {
            return Err(key_type_mismatch(Algorithm::EcdsaSha256));
        };

        let signature = key
            .sign(rng, data)
            .map_err(|err| Error::Crypto(err.into()))?;

        Ok(signature.as_ref().to_vec())
    }

    fn verify(&self, key: &PublicKey, data: &[u8], signature: &[u8]) -> Result<()> {
        let PublicKey::Ecdsa(key) = key else {
            return Err(key_type_mismatch(Algorithm::EcdsaSha256));
        };

        verify_with(&ECDSA_P256_SHA256_ASN1, key, data, signature)
    }
}
