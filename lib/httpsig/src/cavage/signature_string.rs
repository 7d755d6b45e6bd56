//!
//! Utilities for handling signature strings
//!

use super::{DEFAULT_HEADERS, REQUEST_TARGET};
use crate::{Error, Result};
use http::{request::Parts, HeaderMap, HeaderName, Method, Request, Uri};
use itertools::Either;
use std::fmt::Write;

/// Source of the `(request-target)` value
///
/// Messages without a request line use [`NotPermitted`]
pub trait RequestTarget {
    /// Lowercased method and the request target, separated by a space
    fn request_target(&self) -> Result<String>;
}

/// Request target of an actual HTTP request
#[derive(Clone, Copy, Debug)]
pub struct RequestLine<'a> {
    method: &'a Method,
    uri: &'a Uri,
}

impl<'a> RequestLine<'a> {
    /// Request target from a method and URI
    #[must_use]
    pub fn new(method: &'a Method, uri: &'a Uri) -> Self {
        Self { method, uri }
    }
}

impl<'a, B> From<&'a Request<B>> for RequestLine<'a> {
    fn from(request: &'a Request<B>) -> Self {
        Self::new(request.method(), request.uri())
    }
}

impl<'a> From<&'a Parts> for RequestLine<'a> {
    fn from(parts: &'a Parts) -> Self {
        Self::new(&parts.method, &parts.uri)
    }
}

impl RequestTarget for RequestLine<'_> {
    fn request_target(&self) -> Result<String> {
        let method = self.method.as_str().to_lowercase();
        let path_and_query = self.uri.path_and_query().map_or_else(
            || self.uri.path(),
            |path_and_query| path_and_query.as_str(),
        );

        Ok(format!("{method} {path_and_query}"))
    }
}

/// Request target of a message without a request line (responses)
#[derive(Clone, Copy, Debug, Default)]
pub struct NotPermitted;

impl RequestTarget for NotPermitted {
    fn request_target(&self) -> Result<String> {
        Err(Error::RequestTargetNotPermitted)
    }
}

/// Join every occurrence of a header, trimmed, with `", "`
fn header_value(headers: &HeaderMap, name: &str) -> Result<String> {
    let missing = || Error::MissingSignedHeader {
        name: name.to_string(),
    };

    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| missing())?;
    let mut values = headers.get_all(&header_name).iter().peekable();
    if values.peek().is_none() {
        return Err(missing());
    }

    let mut joined = String::new();
    for (idx, value) in values.enumerate() {
        if idx > 0 {
            joined.push_str(", ");
        }
        joined.push_str(value.to_str()?.trim());
    }

    Ok(joined)
}

/// Construct the signature string from a list of components
///
/// An empty component list signs [`DEFAULT_HEADERS`].
/// Component names are matched case-insensitively and always written in lowercase.
#[inline]
pub fn construct<'a, I>(
    headers: &HeaderMap,
    components: I,
    request_target: &dyn RequestTarget,
) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut components = components.into_iter().peekable();
    let components = if components.peek().is_none() {
        Either::Left(DEFAULT_HEADERS.iter().copied())
    } else {
        Either::Right(components)
    };

    let mut signature_string = String::new();
    for (idx, component) in components.enumerate() {
        if idx > 0 {
            signature_string.push('\n');
        }

        let name = component.to_lowercase();
        let value = if name == REQUEST_TARGET {
            request_target.request_target()?
        } else {
            header_value(headers, &name)?
        };

        let _ = write!(signature_string, "{name}: {value}");
    }

    Ok(signature_string)
}
