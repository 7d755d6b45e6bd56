//!
//! Easy and fool-proof HTTP signature handling
//!
//! Opinionated defaults on top of [`Signer`] and [`Verifier`]
//!

use crate::{
    cavage::{signature_string::RequestLine, SignatureScheme, REQUEST_TARGET},
    Algorithm, BoxError, Error, PrivateKey, PublicKey, Registry, Result, Signer, Verifier,
};
use http::{
    header::{CONTENT_TYPE, DATE, HOST},
    HeaderMap, HeaderName, HeaderValue, Method, Request,
};
use std::{sync::OnceLock, time::SystemTime};
use tracing::{debug, instrument};

static DIGEST: HeaderName = HeaderName::from_static("digest");

/// Registry with the built-in algorithms
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(Registry::default)
}

fn components(method: &Method, headers: &HeaderMap) -> Vec<&'static str> {
    let mut components = vec![REQUEST_TARGET];
    if headers.contains_key(HOST) {
        components.push("host");
    }
    components.push("date");

    if !matches!(*method, Method::GET | Method::HEAD) {
        if headers.contains_key(CONTENT_TYPE) {
            components.push("content-type");
        }
        if headers.contains_key(&DIGEST) {
            components.push("digest");
        }
    }

    components
}

/// Sign an HTTP request using opinionated defaults
///
/// - Sets the `Date` header if it is missing
/// - Sets the `Host` header from the URI if it is missing
/// - Signs `(request-target)`, `host` and `date` (plus `content-type` and `digest` when present on requests with a body)
/// - Picks the algorithm based on the type of key
#[instrument(skip_all, fields(key_id = %key_id))]
pub fn sign_request<B>(req: &mut Request<B>, key_id: &str, key: &PrivateKey) -> Result<()> {
    let algorithm = key.default_algorithm().ok_or(Error::NoAlgorithmAvailable)?;

    // Additions are staged on a copy and only land on the request once signing succeeded
    let mut headers = req.headers().clone();
    if !headers.contains_key(DATE) {
        let date = httpdate::fmt_http_date(SystemTime::now());
        headers.insert(DATE, HeaderValue::from_str(&date)?);
    }

    if !headers.contains_key(HOST) {
        if let Some(authority) = req.uri().authority() {
            headers.insert(HOST, HeaderValue::from_str(authority.as_str())?);
        }
    }

    let signer = Signer::new(
        registry(),
        algorithm.as_ref(),
        components(req.method(), &headers),
        SignatureScheme::Signature,
    )?;
    debug!(algorithm = signer.algorithm(), "signing request");

    let request_line = RequestLine::new(req.method(), req.uri());
    let signature = signer.signature_value(key, key_id, &headers, &request_line)?;
    headers.append(signer.scheme().header_name(), signature);

    *req.headers_mut() = headers;

    Ok(())
}

/// Verify an HTTP request using opinionated defaults
///
/// `get_key` resolves the key ID into the public key and the algorithm it is used with
#[instrument(skip_all)]
pub fn verify_request<B, F, E>(req: &Request<B>, get_key: F) -> Result<()>
where
    F: FnOnce(&str) -> Result<(PublicKey, Algorithm), E>,
    E: Into<BoxError>,
{
    let verifier = Verifier::for_request(registry(), req)?;
    let (public_key, algorithm) =
        get_key(verifier.key_id()).map_err(|err| Error::GetKey(err.into()))?;

    verifier.verify(&public_key, algorithm.as_ref())
}
