//!
//! Cavage-style HTTP signatures
//!
//! The `Signature`/`Authorization` parameter header, the signature string and the header slot selection
//!

mod parse;
mod scheme;
mod serialise;

pub mod signature_string;

pub use self::{
    parse::parse,
    scheme::{locate, select_scheme, SignatureScheme},
    serialise::serialise,
};

/// Name of the pseudo-header covering the request method and target
pub const REQUEST_TARGET: &str = "(request-target)";

/// Components signed when none are given
pub const DEFAULT_HEADERS: &[&str] = &["date"];

/// Parameters of a signature header
#[derive(Clone, Debug)]
pub struct SignatureHeader<'a, I> {
    /// Opaque key identifier
    pub key_id: &'a str,

    /// Deprecated algorithm parameter
    ///
    /// Never used to select the verification algorithm. The signer always emits it.
    pub algorithm: Option<&'a str>,

    /// Signed component identifiers, in signing order
    pub headers: I,

    /// Base64 encoded signature
    pub signature: &'a str,
}
