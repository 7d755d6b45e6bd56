use crate::{Error, Result, SIGNATURE_HEADER};
use http::{header::AUTHORIZATION, HeaderMap, HeaderName};
use serde::{Deserialize, Serialize};

/// Auth-scheme token prefixed to the parameters inside the `Authorization` header
const AUTH_SCHEME: &str = "Signature ";

const PARAMETER_MARKERS: &[&str] = &["keyId", "headers", "signature"];

/// Header slot carrying the signature parameters
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureScheme {
    /// `Signature` header
    #[default]
    Signature,

    /// `Authorization` header with the `Signature` auth-scheme
    Authorization,
}

impl SignatureScheme {
    /// Name of the header this scheme writes into
    #[must_use]
    pub fn header_name(self) -> &'static HeaderName {
        match self {
            Self::Signature => &SIGNATURE_HEADER,
            Self::Authorization => &AUTHORIZATION,
        }
    }

    /// Wrap serialised parameters into a value for this slot
    #[must_use]
    pub fn frame(self, parameters: String) -> String {
        match self {
            Self::Signature => parameters,
            Self::Authorization => format!("{AUTH_SCHEME}{parameters}"),
        }
    }

    /// Strip the slot-specific framing from a header value
    #[must_use]
    pub fn unframe(self, value: &str) -> &str {
        match self {
            Self::Signature => value,
            Self::Authorization => {
                let value = value.trim_start();
                match value.get(..AUTH_SCHEME.len()) {
                    Some(prefix) if prefix.eq_ignore_ascii_case(AUTH_SCHEME) => {
                        &value[AUTH_SCHEME.len()..]
                    }
                    _ => value,
                }
            }
        }
    }
}

#[inline]
fn has_parameters(value: Option<&str>) -> bool {
    value.is_some_and(|value| {
        PARAMETER_MARKERS
            .iter()
            .any(|marker| value.contains(marker))
    })
}

/// Decide which of the two header slots is authoritative
///
/// Exactly one of them may carry signature parameters.
/// Returns the chosen slot and its parameters with the slot framing removed.
pub fn select_scheme<'a>(
    signature: Option<&'a str>,
    authorization: Option<&'a str>,
) -> Result<(SignatureScheme, &'a str)> {
    match (signature, authorization) {
        (sig, auth) if has_parameters(sig) && has_parameters(auth) => Err(Error::SchemeAmbiguous),
        (Some(sig), _) if has_parameters(Some(sig)) => Ok((SignatureScheme::Signature, sig)),
        (_, Some(auth)) if has_parameters(Some(auth)) => Ok((
            SignatureScheme::Authorization,
            SignatureScheme::Authorization.unframe(auth),
        )),
        _ => Err(Error::SchemeMissing),
    }
}

/// Locate the signature parameters inside a header map
///
/// Only the first value of each slot is considered. Values that aren't visible ASCII can't carry parameters.
pub fn locate(headers: &HeaderMap) -> Result<(SignatureScheme, &str)> {
    select_scheme(
        slot(headers, &SIGNATURE_HEADER),
        slot(headers, &AUTHORIZATION),
    )
}

#[inline]
fn slot<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

#[cfg(test)]
mod test {
    use super::{locate, select_scheme, SignatureScheme};
    use crate::Error;
    use http::{header::AUTHORIZATION, HeaderMap, HeaderValue};

    const PARAMETERS: &str = r#"keyId="Test",headers="date",signature="abc""#;

    #[test]
    fn signature_slot() {
        let (scheme, value) = select_scheme(Some(PARAMETERS), Some("Bearer token")).unwrap();
        assert_eq!(scheme, SignatureScheme::Signature);
        assert_eq!(value, PARAMETERS);
    }

    #[test]
    fn authorization_slot() {
        let authorization = format!("Signature {PARAMETERS}");
        let (scheme, value) = select_scheme(None, Some(&authorization)).unwrap();
        assert_eq!(scheme, SignatureScheme::Authorization);
        assert_eq!(value, PARAMETERS);

        let (_, value) = select_scheme(Some(""), Some(PARAMETERS)).unwrap();
        assert_eq!(value, PARAMETERS);
    }

    #[test]
    fn ambiguous() {
        assert!(matches!(
            select_scheme(Some(PARAMETERS), Some(PARAMETERS)),
            Err(Error::SchemeAmbiguous)
        ));
    }

    #[test]
    fn missing() {
        assert!(matches!(select_scheme(None, None), Err(Error::SchemeMissing)));
        assert!(matches!(
            select_scheme(Some("nothing"), Some("Basic dXNlcjpwYXNz")),
            Err(Error::SchemeMissing)
        ));
    }

    #[test]
    fn framing_roundtrip() {
        let wrapped = SignatureScheme::Authorization.frame(PARAMETERS.to_string());
        assert_eq!(wrapped, format!("Signature {PARAMETERS}"));
        assert_eq!(SignatureScheme::Authorization.unframe(&wrapped), PARAMETERS);
        assert_eq!(SignatureScheme::Signature.unframe(PARAMETERS), PARAMETERS);
    }

    #[test]
    fn locate_in_header_map() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("signature {PARAMETERS}")).unwrap(),
        );

        let (scheme, value) = locate(&headers).unwrap();
        assert_eq!(scheme, SignatureScheme::Authorization);
        assert_eq!(value, PARAMETERS);
    }
}
