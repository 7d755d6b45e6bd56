use super::SignatureHeader;
use std::fmt::Write;

/// Serialise the parameters into a cavage `Signature` header value
///
/// Parameters are written in the order `keyId`, `algorithm`, `headers`, `signature`.
/// Header names are lowercased.
#[inline]
pub fn serialise<'a, I>(header: SignatureHeader<'_, I>) -> String
where
    I: Iterator<Item = &'a str>,
{
    let mut buffer = String::new();

    let _ = write!(buffer, "keyId=\"{}\",", header.key_id);

    if let Some(algorithm) = header.algorithm {
        let _ = write!(buffer, "algorithm=\"{algorithm}\",");
    }

    buffer.push_str("headers=\"");
    for item in itertools::intersperse(header.headers, " ") {
        buffer.push_str(&item.to_lowercase());
    }
    buffer.push_str("\",");

    let _ = write!(buffer, "signature=\"{}\"", header.signature);

    buffer
}
