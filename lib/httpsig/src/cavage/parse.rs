use super::{SignatureHeader, DEFAULT_HEADERS};
use crate::{Error, Result};

/// Iterator over the `key=value` pairs of a signature header
///
/// Yields the span of every pair alongside it so errors can point into the input
struct ParseIter<'a> {
    /// Remaining, not yet split input
    rest: Option<&'a str>,

    /// Offset of `rest` inside the original input
    offset: usize,
}

impl<'a> Iterator for ParseIter<'a> {
    type Item = Result<(&'a str, &'a str)>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        let (pair, remaining) = match rest.split_once(',') {
            Some((pair, remaining)) => (pair, Some(remaining)),
            None => (rest, None),
        };

        let start = self.offset;
        self.offset += pair.len() + 1;
        self.rest = remaining;

        let Some((key, value)) = pair.split_once('=') else {
            return Some(Err(Error::MalformedParameter {
                span: (start, pair.len()).into(),
            }));
        };

        let key = key.trim();
        if key.is_empty() {
            return Some(Err(Error::MalformedParameter {
                span: (start, pair.len()).into(),
            }));
        }

        Some(Ok((key, value.trim().trim_matches('"'))))
    }
}

/// Parse the parameters of a cavage `Signature` header
///
/// Unknown parameters are skipped. The `algorithm` parameter is read but nothing depends on it.
/// A missing `headers` parameter falls back to [`DEFAULT_HEADERS`].
#[inline]
pub fn parse(input: &str) -> Result<SignatureHeader<'_, Vec<&str>>> {
    let kv_iter = ParseIter {
        rest: Some(input),
        offset: 0,
    };

    let mut key_id = None;
    let mut algorithm = None;
    let mut headers = None;
    let mut signature = None;

    for kv in kv_iter {
        let (key, value) = kv?;

        match key {
            "keyId" => key_id = Some(value),
            "algorithm" => algorithm = Some(value),
            "headers" => headers = Some(value),
            "signature" => signature = Some(value),
            _ => continue,
        }
    }

    let key_id = key_id
        .filter(|key_id| !key_id.is_empty())
        .ok_or(Error::MissingRequiredParameter { name: "keyId" })?;
    let signature = signature
        .filter(|signature| !signature.is_empty())
        .ok_or(Error::MissingRequiredParameter { name: "signature" })?;

    let mut headers: Vec<&str> = headers
        .map(|headers| headers.split_whitespace().collect())
        .unwrap_or_default();
    if headers.is_empty() {
        headers.extend_from_slice(DEFAULT_HEADERS);
    }

    Ok(SignatureHeader {
        key_id,
        algorithm,
        headers,
        signature,
    })
}
