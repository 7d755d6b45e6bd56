//!
//! Parse cryptographic keys for use with the built-in algorithms
//!

use super::{PrivateKey, PublicKey};
use const_oid::db::{
    rfc5912::{ID_EC_PUBLIC_KEY, RSA_ENCRYPTION, SECP_256_R_1},
    rfc8410::ID_ED_25519,
};
use miette::Diagnostic;
use pkcs8::{Document, PrivateKeyInfo, SecretDocument, SubjectPublicKeyInfoRef};
use ring::{
    rand::SystemRandom,
    signature::{EcdsaKeyPair, Ed25519KeyPair, RsaKeyPair, ECDSA_P256_SHA256_ASN1_SIGNING},
};
use thiserror::Error;

const PKCS1_RSA_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";

/// Key parsing error
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Malformed DER structure
    #[error(transparent)]
    Der(#[from] pkcs8::der::Error),

    /// Key rejected
    #[error(transparent)]
    KeyRejected(#[from] ring::error::KeyRejected),

    /// Malformed key
    #[error("Malformed key")]
    MalformedKey,

    /// Malformed PKCS#8 document
    #[error(transparent)]
    Pkcs8(#[from] pkcs8::Error),

    /// Unknown key type
    #[error("Unknown key type")]
    UnknownKeyType,
}

/// Parse a public key from its SPKI PEM form
///
/// Currently supported algorithms:
///
/// - RSA
/// - Ed25519
/// - ECDSA (P-256)
#[inline]
pub fn public_key(pem: &str) -> Result<PublicKey, Error> {
    let (_pem_tag, document) = Document::from_pem(pem)?;
    let spki: SubjectPublicKeyInfoRef<'_> = document.decode_msg()?;

    let raw_bytes = spki
        .subject_public_key
        .as_bytes()
        .ok_or(Error::MalformedKey)?
        .to_vec();

    let public_key = if spki.algorithm.oid == RSA_ENCRYPTION {
        PublicKey::Rsa(raw_bytes)
    } else if spki.algorithm.oid == ID_ED_25519 {
        PublicKey::Ed25519(raw_bytes)
    } else if spki.algorithm.oid == ID_EC_PUBLIC_KEY
        && spki.algorithm.parameters_oid().ok() == Some(SECP_256_R_1)
    {
        PublicKey::Ecdsa(raw_bytes)
    } else {
        return Err(Error::UnknownKeyType);
    };

    Ok(public_key)
}

/// Parse a private key from its PKCS#8 PEM form
///
/// PKCS#1 `RSA PRIVATE KEY` documents are accepted as well.
/// Decoding is constant-time and temporary allocations are zeroized.
///
/// Currently supported algorithms:
///
/// - RSA
/// - Ed25519
/// - ECDSA (P-256)
#[inline]
pub fn private_key(pem: &str) -> Result<PrivateKey, Error> {
    let (tag_line, document) = SecretDocument::from_pem(pem)?;
    if tag_line == PKCS1_RSA_PRIVATE_KEY_LABEL {
        return Ok(PrivateKey::Rsa(RsaKeyPair::from_der(document.as_bytes())?));
    }

    let private_key_raw: PrivateKeyInfo<'_> = document.decode_msg()?;

    let signing_key = if private_key_raw.algorithm.oid == RSA_ENCRYPTION {
        PrivateKey::Rsa(RsaKeyPair::from_pkcs8(document.as_bytes())?)
    } else if private_key_raw.algorithm.oid == ID_ED_25519 {
        PrivateKey::Ed25519(Ed25519KeyPair::from_pkcs8_maybe_unchecked(
            document.as_bytes(),
        )?)
    } else if private_key_raw.algorithm.oid == ID_EC_PUBLIC_KEY {
        PrivateKey::Ecdsa(EcdsaKeyPair::from_pkcs8(
            &ECDSA_P256_SHA256_ASN1_SIGNING,
            document.as_bytes(),
            &SystemRandom::new(),
        )?)
    } else {
        return Err(Error::UnknownKeyType);
    };

    Ok(signing_key)
}
