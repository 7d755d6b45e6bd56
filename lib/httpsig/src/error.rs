use crate::BoxError;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// HTTP signature error
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Failed to decode the Base64 encoded signature
    #[error(transparent)]
    #[diagnostic(code(httpsig::base64))]
    Base64Decode(#[from] base64_simd::Error),

    /// Opaque failure reported by a cryptographic capability
    #[error(transparent)]
    Crypto(BoxError),

    /// Couldn't get key from user-provided closure
    #[error(transparent)]
    GetKey(BoxError),

    /// Header had an invalid value (not visible ASCII)
    #[error(transparent)]
    HeaderValueToStr(#[from] http::header::ToStrError),

    /// Signature header value couldn't be turned into an HTTP header value
    #[error(transparent)]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    /// Key doesn't have the shape the algorithm expects
    #[error("Key type doesn't match the algorithm \"{algorithm}\"")]
    #[diagnostic(code(httpsig::key_type_mismatch))]
    KeyTypeMismatch {
        /// Canonical name of the algorithm that rejected the key
        algorithm: String,
    },

    /// Signature parameter isn't a `key=value` pair
    #[error("Malformed signature parameter")]
    #[diagnostic(code(httpsig::malformed_parameter))]
    MalformedParameter {
        /// Location of the offending parameter inside the header value
        #[label("expected `key=\"value\"`")]
        span: SourceSpan,
    },

    /// Required signature parameter is absent
    #[error("Missing \"{name}\" parameter in HTTP signature")]
    #[diagnostic(code(httpsig::missing_parameter))]
    MissingRequiredParameter {
        /// Name of the missing parameter
        name: &'static str,
    },

    /// Header named in the signed components is absent from the message
    #[error("Missing header \"{name}\"")]
    #[diagnostic(code(httpsig::missing_header))]
    MissingSignedHeader {
        /// Lowercased name of the header
        name: String,
    },

    /// None of the preferred algorithms has an implementation
    #[error("None of the preferred algorithms is available")]
    NoAlgorithmAvailable,

    /// The `(request-target)` component was requested for a message without a request line
    #[error("Cannot sign with \"(request-target)\" on anything other than an HTTP request")]
    #[diagnostic(code(httpsig::request_target_not_permitted))]
    RequestTargetNotPermitted,

    /// Both header slots carry signature parameters
    #[error("Both \"Signature\" and \"Authorization\" have signature parameters")]
    #[diagnostic(code(httpsig::scheme_ambiguous))]
    SchemeAmbiguous,

    /// Neither header slot carries signature parameters
    #[error("Neither \"Signature\" nor \"Authorization\" have signature parameters")]
    #[diagnostic(code(httpsig::scheme_missing))]
    SchemeMissing,

    /// MAC didn't match
    #[error("Invalid HTTP signature")]
    #[diagnostic(code(httpsig::signature_mismatch))]
    SignatureMismatch,

    /// Algorithm name isn't registered as either an asymmetric or MAC algorithm
    #[error("No cryptographic implementation available for algorithm \"{name}\"")]
    #[diagnostic(code(httpsig::unknown_algorithm))]
    UnknownAlgorithm {
        /// Requested algorithm name
        name: String,
    },

    /// Asymmetric verification failed
    #[error("Verification failed")]
    #[diagnostic(code(httpsig::verification_failure))]
    VerificationFailure,
}
