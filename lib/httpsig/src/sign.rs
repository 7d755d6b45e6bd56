use crate::{
    algorithm::{Capability, Registry},
    cavage::{
        self,
        signature_string::{NotPermitted, RequestLine, RequestTarget},
        SignatureHeader, SignatureScheme, DEFAULT_HEADERS,
    },
    config::SignerConfiguration,
    Error, PrivateKey, Result,
};
use http::{HeaderMap, HeaderValue, Request, Response};
use ring::rand::SystemRandom;
use tracing::{debug, instrument};

/// HTTP signer
///
/// The algorithm is resolved once on construction.
/// Signing appends a new signature header and never touches existing ones, so messages can carry multiple signatures.
#[derive(Clone)]
pub struct Signer {
    capability: Capability,
    headers: Vec<String>,
    scheme: SignatureScheme,
    rng: SystemRandom,
}

impl Signer {
    /// Create a new signer for the algorithm
    ///
    /// An empty list of headers signs the default list (`date`)
    pub fn new<I, H>(
        registry: &Registry,
        algorithm: &str,
        headers: I,
        scheme: SignatureScheme,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = H>,
        H: AsRef<str>,
    {
        let capability = registry.resolve(algorithm)?;
        Ok(Self::from_capability(capability, headers, scheme))
    }

    /// Create a new signer with the first algorithm of the preference list the registry can resolve
    pub fn with_preferences<A, I, H>(
        registry: &Registry,
        algorithms: A,
        headers: I,
        scheme: SignatureScheme,
    ) -> Result<Self>
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        I: IntoIterator<Item = H>,
        H: AsRef<str>,
    {
        let capability = algorithms
            .into_iter()
            .find_map(|algorithm| registry.resolve(algorithm.as_ref()).ok())
            .ok_or(Error::NoAlgorithmAvailable)?;

        debug!(algorithm = capability.name(), "selected signing algorithm");

        Ok(Self::from_capability(capability, headers, scheme))
    }

    /// Create a new signer from its configuration
    pub fn from_configuration(
        registry: &Registry,
        configuration: &SignerConfiguration,
    ) -> Result<Self> {
        Self::with_preferences(
            registry,
            &configuration.algorithms,
            &configuration.headers,
            configuration.scheme,
        )
    }

    /// Create a new signer around an already resolved capability
    pub fn from_capability<I, H>(capability: Capability, headers: I, scheme: SignatureScheme) -> Self
    where
        I: IntoIterator<Item = H>,
        H: AsRef<str>,
    {
        let mut headers: Vec<String> = headers
            .into_iter()
            .map(|header| header.as_ref().to_lowercase())
            .collect();

        if headers.is_empty() {
            headers.extend(DEFAULT_HEADERS.iter().map(ToString::to_string));
        }

        Self {
            capability,
            headers,
            scheme,
            rng: SystemRandom::new(),
        }
    }

    /// Canonical name of the algorithm
    #[must_use]
    pub fn algorithm(&self) -> &str {
        self.capability.name()
    }

    /// Components this signer signs
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().map(String::as_str)
    }

    /// Header slot this signer writes into
    #[must_use]
    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// Compute the signature header value without attaching it to anything
    #[instrument(skip_all, fields(key_id = %key_id, algorithm = %self.algorithm()))]
    pub fn signature_value(
        &self,
        key: &PrivateKey,
        key_id: &str,
        headers: &HeaderMap,
        request_target: &dyn RequestTarget,
    ) -> Result<HeaderValue> {
        let signature_string =
            cavage::signature_string::construct(headers, self.headers(), request_target)?;

        let signature = match self.capability {
            Capability::Asymmetric(ref signer) => {
                signer.sign(&self.rng, key, signature_string.as_bytes())?
            }
            Capability::Mac(ref mac) => {
                let PrivateKey::Secret(ref secret) = key else {
                    debug!("MAC algorithm used with a non-secret key");
                    return Err(Error::KeyTypeMismatch {
                        algorithm: mac.name().to_string(),
                    });
                };

                mac.sign(signature_string.as_bytes(), secret)?
            }
        };

        let signature = base64_simd::STANDARD.encode_to_string(signature);
        let parameters = cavage::serialise(SignatureHeader {
            key_id,
            algorithm: Some(self.algorithm()),
            headers: self.headers(),
            signature: &signature,
        });

        HeaderValue::from_str(&self.scheme.frame(parameters)).map_err(Error::from)
    }

    /// Sign the headers and append the signature header
    ///
    /// Nothing is modified if signing fails
    pub fn sign_headers(
        &self,
        key: &PrivateKey,
        key_id: &str,
        headers: &mut HeaderMap,
        request_target: &dyn RequestTarget,
    ) -> Result<()> {
        let value = self.signature_value(key, key_id, headers, request_target)?;
        headers.append(self.scheme.header_name(), value);

        Ok(())
    }

    /// Sign an HTTP request
    pub fn sign_request<B>(
        &self,
        key: &PrivateKey,
        key_id: &str,
        request: &mut Request<B>,
    ) -> Result<()> {
        let value = self.signature_value(
            key,
            key_id,
            request.headers(),
            &RequestLine::from(&*request),
        )?;
        request
            .headers_mut()
            .append(self.scheme.header_name(), value);

        Ok(())
    }

    /// Sign an HTTP response
    ///
    /// Responses have no request line. Signing `(request-target)` fails.
    pub fn sign_response<B>(
        &self,
        key: &PrivateKey,
        key_id: &str,
        response: &mut Response<B>,
    ) -> Result<()> {
        self.sign_headers(key, key_id, response.headers_mut(), &NotPermitted)
    }
}
