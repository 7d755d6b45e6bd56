//!
//! HTTP message signatures (Cavage draft)
//!
//! Builds the signature string from a set of headers (plus the `(request-target)` pseudo-header),
//! signs it through an algorithm looked up by name, and writes/parses the `Signature` parameters header.
//!
//! The cryptography itself lives behind the [`AsymmetricSigner`] and [`MacProvider`] capabilities.
//! [`Registry::default`] ships `ring`-backed implementations for the common algorithms.
//!

#![deny(missing_docs)]

use http::HeaderName;

pub use self::{
    algorithm::{Algorithm, AsymmetricSigner, Capability, MacProvider, Registry},
    cavage::{signature_string::RequestTarget, SignatureScheme},
    config::SignerConfiguration,
    crypto::{PrivateKey, PublicKey},
    error::Error,
    sign::Signer,
    verify::Verifier,
};
pub use ring;

pub mod algorithm;
pub mod cavage;
pub mod config;
pub mod crypto;

#[cfg(feature = "easy")]
pub mod easy;

mod error;
mod sign;
mod verify;

/// Boxed error type used by custom cryptographic capabilities
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias defaulting to the crate [`Error`]
pub type Result<T, E = Error> = std::result::Result<T, E>;

static SIGNATURE_HEADER: HeaderName = HeaderName::from_static("signature");
