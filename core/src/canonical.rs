//! Construct the string to sign.
//!
//! ## Format
//!
//! ```text
//! VERB + "\n" +
//! Content-MD5 + "\n" +
//! Content-Type + "\n" +
//! Date + "\n" +
//! CanonicalizedExtensionHeaders +
//! CanonicalizedResource;
//! ```
//!
//! `CanonicalizedExtensionHeaders` is zero or more `name:value` lines, each
//! followed by `\n`. The whole string has no trailing newline.

use std::fmt::Write;

use http::header::CONTENT_TYPE;
use http::HeaderMap;
use http::Method;
use log::debug;

use crate::path::SubResource;
use crate::{Error, Result};

/// Header carrying the MD5 digest of the body.
pub const CONTENT_MD5: &str = "content-md5";

/// Service specific canonicalization rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalRules {
    /// Headers whose name starts with this prefix take part in signing.
    ///
    /// Matched case-insensitively. `None` disables extension headers.
    pub extension_prefix: Option<&'static str>,
    /// Content-Type line used when the request carries none.
    pub default_content_type: &'static str,
    /// Query markers kept in the canonical resource, in priority order.
    pub subresources: &'static [SubResource],
}

/// Build the string to sign.
///
/// `date` is the value of the date line: an HTTP date for header signing or
/// the resolved expiry for query signing.
pub fn string_to_sign(
    method: &Method,
    headers: &HeaderMap,
    date: &str,
    path: &str,
    rules: &CanonicalRules,
) -> Result<String> {
    if date.contains(['\r', '\n']) {
        return Err(Error::encoding_invalid("date line must not contain newlines"));
    }

    let mut s = String::new();
    writeln!(&mut s, "{}", method.as_str())?;
    writeln!(&mut s, "{}", header_get_or_default(headers, CONTENT_MD5, "")?)?;
    writeln!(
        &mut s,
        "{}",
        header_get_or_default(headers, CONTENT_TYPE.as_str(), rules.default_content_type)?
    )?;
    writeln!(&mut s, "{date}")?;

    if let Some(prefix) = rules.extension_prefix {
        for line in canonicalize_extension_headers(headers, prefix)? {
            writeln!(&mut s, "{line}")?;
        }
    }

    s.write_str(&canonicalize_resource(path, rules.subresources))?;

    debug!("string to sign: {s:?}");
    Ok(s)
}

fn header_get_or_default<'a>(
    headers: &'a HeaderMap,
    key: &str,
    default: &'a str,
) -> Result<&'a str> {
    match headers.get(key) {
        Some(v) => Ok(v.to_str()?),
        None => Ok(default),
    }
}

/// Collect extension headers as sorted `name:value` lines.
///
/// Names are lowercased, values are trimmed but keep their case. Repeated
/// headers are joined with `,`.
pub fn canonicalize_extension_headers(headers: &HeaderMap, prefix: &str) -> Result<Vec<String>> {
    let prefix = prefix.to_ascii_lowercase();

    let mut lines = Vec::new();
    for name in headers.keys() {
        let name = name.as_str();
        if !name.to_ascii_lowercase().starts_with(&prefix) {
            continue;
        }

        let mut values = Vec::new();
        for value in headers.get_all(name) {
            let value = value.to_str().map_err(|e| {
                Error::encoding_invalid(format!("header {name} has a value that can't be signed"))
                    .with_source(e)
            })?;
            values.push(value.trim());
        }

        lines.push((name.to_ascii_lowercase(), values.join(",")));
    }

    lines.sort();

    Ok(lines
        .into_iter()
        .map(|(name, value)| format!("{name}:{value}"))
        .collect())
}

/// Strip the query from `path`, keeping only a whitelisted sub-resource.
///
/// `/b/k?acl&versionId=1` becomes `/b/k?acl`, `/b?prefix=a` becomes `/b`.
pub fn canonicalize_resource(path: &str, subresources: &[SubResource]) -> String {
    let Some((stripped, query)) = path.split_once('?') else {
        return path.to_string();
    };

    let marker = subresources.iter().find(|sub| {
        query
            .split(['&', '?'])
            .any(|pair| pair.split('=').next() == Some(sub.as_str()))
    });

    match marker {
        Some(sub) => format!("{stripped}?{}", sub.as_str()),
        None => stripped.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use http::header::HeaderName;
    use http::HeaderValue;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;
    use test_case::test_case;

    fn headers_from(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (k, v) in pairs {
            headers.append(
                HeaderName::from_str(k).unwrap(),
                HeaderValue::from_str(v).unwrap(),
            );
        }
        headers
    }

    const RULES: CanonicalRules = CanonicalRules {
        extension_prefix: Some("x-amz-"),
        default_content_type: "",
        subresources: &[SubResource::Acl, SubResource::Torrent],
    };

    #[test_case("/mybucket/photo.jpg?acl", "/mybucket/photo.jpg?acl"; "item acl")]
    #[test_case("/mybucket?acl", "/mybucket?acl"; "collection acl")]
    #[test_case("/mybucket/photo.jpg?acl&prefix=a&max-keys=3", "/mybucket/photo.jpg?acl"; "acl first")]
    #[test_case("/mybucket?prefix=a&acl", "/mybucket?acl"; "acl last")]
    #[test_case("/mybucket?prefix=a&acl=", "/mybucket?acl"; "acl with empty value")]
    #[test_case("/mybucket?prefix=a&max-keys=3", "/mybucket"; "filters dropped")]
    #[test_case("/mybucket?aclx=1&xacl", "/mybucket"; "acl must be standalone")]
    #[test_case("/mybucket/movie.mkv?torrent", "/mybucket/movie.mkv?torrent"; "torrent")]
    #[test_case("/mybucket/movie.mkv?torrent&acl", "/mybucket/movie.mkv?acl"; "acl wins over torrent")]
    #[test_case("/", "/"; "root")]
    fn test_canonicalize_resource(input: &str, expected: &str) {
        assert_eq!(canonicalize_resource(input, RULES.subresources), expected);
    }

    #[test]
    fn test_canonicalize_resource_respects_whitelist() {
        assert_eq!(
            canonicalize_resource("/queue/msg?torrent", &[SubResource::Acl]),
            "/queue/msg"
        );
    }

    #[test]
    fn test_extension_headers_sorted_and_trimmed() {
        let headers = headers_from(&[
            ("X-Amz-Meta-Zebra", "  Stripes "),
            ("x-amz-acl", "public-read"),
            ("X-AMZ-Meta-Apple", "Red"),
            ("x-other", "ignored"),
        ]);

        assert_eq!(
            canonicalize_extension_headers(&headers, "x-amz-").unwrap(),
            vec![
                "x-amz-acl:public-read",
                "x-amz-meta-apple:Red",
                "x-amz-meta-zebra:Stripes",
            ]
        );
    }

    #[test_case("x-amz-"; "lowercase prefix")]
    #[test_case("X-AMZ-"; "uppercase prefix")]
    #[test_case("X-Amz-"; "mixed case prefix")]
    fn test_extension_prefix_is_case_insensitive(prefix: &str) {
        let headers = headers_from(&[
            ("X-Amz-Meta-B", "Two"),
            ("x-amz-meta-a", "One"),
            ("x-other", "ignored"),
        ]);

        assert_eq!(
            canonicalize_extension_headers(&headers, prefix).unwrap(),
            vec!["x-amz-meta-a:One", "x-amz-meta-b:Two"]
        );
    }

    #[test]
    fn test_extension_header_repeated_values() {
        let headers = headers_from(&[("x-amz-meta-tag", "a"), ("x-amz-meta-tag", " b")]);

        assert_eq!(
            canonicalize_extension_headers(&headers, "x-amz-").unwrap(),
            vec!["x-amz-meta-tag:a,b"]
        );
    }

    #[test]
    fn test_extension_header_rejects_opaque_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-amz-meta-raw",
            HeaderValue::from_bytes(b"caf\xc3\xa9").unwrap(),
        );

        let err = canonicalize_extension_headers(&headers, "x-amz-").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodingInvalid);
    }

    #[test]
    fn test_string_to_sign() {
        let headers = headers_from(&[
            ("Content-MD5", "4gJE4saaMU4BqNR0kLY+lw=="),
            ("Content-Type", "image/jpeg"),
            ("X-Amz-Meta-Author", "someone"),
        ]);

        let s = string_to_sign(
            &Method::PUT,
            &headers,
            "1700000000",
            "/mybucket/photo.jpg?acl&x=1",
            &RULES,
        )
        .unwrap();

        assert_eq!(
            s,
            "PUT\n4gJE4saaMU4BqNR0kLY+lw==\nimage/jpeg\n1700000000\nx-amz-meta-author:someone\n/mybucket/photo.jpg?acl"
        );
    }

    #[test]
    fn test_string_to_sign_defaults() {
        let rules = CanonicalRules {
            extension_prefix: None,
            default_content_type: "text/plain",
            subresources: &[SubResource::Acl],
        };
        let headers = headers_from(&[("x-amz-meta-ignored", "1")]);

        let s = string_to_sign(&Method::GET, &headers, "42", "/queue", &rules).unwrap();
        assert_eq!(s, "GET\n\ntext/plain\n42\n/queue");
    }

    #[test]
    fn test_string_to_sign_rejects_newline_date() {
        let err = string_to_sign(&Method::GET, &HeaderMap::new(), "1\n2", "/", &RULES)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodingInvalid);
    }
}
