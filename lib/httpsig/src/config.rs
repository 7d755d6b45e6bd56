//!
//! Typed configuration for building signers
//!

use crate::cavage::SignatureScheme;
use serde::{Deserialize, Serialize};

/// Signer configuration
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SignerConfiguration {
    /// Algorithm names in order of preference
    pub algorithms: Vec<String>,

    /// Components to sign. Empty means the default list.
    #[serde(default)]
    pub headers: Vec<String>,

    /// Header slot the signature is written into
    #[serde(default)]
    pub scheme: SignatureScheme,
}
