use crate::{
    algorithm::{Capability, Registry},
    cavage::{
        self,
        signature_string::{NotPermitted, RequestLine, RequestTarget},
        SignatureHeader, SignatureScheme,
    },
    Error, PublicKey, Result,
};
use http::{HeaderMap, Request, Response};
use tracing::{debug, instrument};

/// HTTP verifier
///
/// Parses the signature parameters on construction. Look up the key via [`Verifier::key_id`], then call [`Verifier::verify`].
pub struct Verifier<'a, T> {
    registry: &'a Registry,
    headers: &'a HeaderMap,
    request_target: T,
    scheme: SignatureScheme,
    signature_header: SignatureHeader<'a, Vec<&'a str>>,
}

impl<'a> Verifier<'a, RequestLine<'a>> {
    /// Verifier for an HTTP request
    pub fn for_request<B>(registry: &'a Registry, request: &'a Request<B>) -> Result<Self> {
        Self::new(registry, request.headers(), RequestLine::from(request))
    }
}

impl<'a> Verifier<'a, NotPermitted> {
    /// Verifier for an HTTP response
    ///
    /// Signatures covering `(request-target)` fail to verify
    pub fn for_response<B>(registry: &'a Registry, response: &'a Response<B>) -> Result<Self> {
        Self::new(registry, response.headers(), NotPermitted)
    }
}

impl<'a, T> Verifier<'a, T>
where
    T: RequestTarget,
{
    /// Locate and parse the signature parameters inside the headers
    #[instrument(skip_all)]
    pub fn new(registry: &'a Registry, headers: &'a HeaderMap, request_target: T) -> Result<Self> {
        let (scheme, parameters) = cavage::locate(headers)?;
        debug!(?scheme, "located signature parameters");

        let signature_header = cavage::parse(parameters)?;

        Ok(Self {
            registry,
            headers,
            request_target,
            scheme,
            signature_header,
        })
    }

    /// Identifier of the key the message claims to be signed with
    #[must_use]
    pub fn key_id(&self) -> &'a str {
        self.signature_header.key_id
    }

    /// Components covered by the signature
    #[must_use]
    pub fn signed_headers(&self) -> &[&'a str] {
        &self.signature_header.headers
    }

    /// Header slot the signature was found in
    #[must_use]
    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// Verify the signature with the key and the caller-chosen algorithm
    ///
    /// The `algorithm` parameter of the header is never consulted
    #[instrument(skip_all, fields(key_id = %self.key_id(), algorithm = %algorithm))]
    pub fn verify(&self, key: &PublicKey, algorithm: &str) -> Result<()> {
        let result = match self.registry.resolve(algorithm)? {
            Capability::Asymmetric(signer) => {
                let signature_string = self.signature_string()?;
                let signature = self.decoded_signature()?;

                signer.verify(key, signature_string.as_bytes(), &signature)
            }
            Capability::Mac(mac) => {
                let PublicKey::Secret(ref secret) = key else {
                    return Err(Error::KeyTypeMismatch {
                        algorithm: mac.name().to_string(),
                    });
                };

                let signature_string = self.signature_string()?;
                let signature = self.decoded_signature()?;

                if mac.verify(signature_string.as_bytes(), &signature, secret)? {
                    Ok(())
                } else {
                    Err(Error::SignatureMismatch)
                }
            }
        };

        if let Err(ref error) = result {
            debug!(%error, "signature verification failed");
        }

        result
    }

    fn signature_string(&self) -> Result<String> {
        cavage::signature_string::construct(
            self.headers,
            self.signature_header.headers.iter().copied(),
            &self.request_target,
        )
    }

    fn decoded_signature(&self) -> Result<Vec<u8>> {
        base64_simd::STANDARD
            .decode_to_vec(self.signature_header.signature)
            .map_err(Error::from)
    }
}
