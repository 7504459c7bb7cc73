use http::header::HeaderName;
use http::header::AUTHORIZATION;
use http::header::CONTENT_LENGTH;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use std::str::FromStr;

use crate::body::BodyLength;
use crate::path::build_path;
use crate::path::KeyEscape;
use crate::path::SubResource;
use crate::{Error, Result};

/// RequestDescriptor describes one request before it gets signed.
///
/// Built by the caller per operation and consumed by a single signing call.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// Bucket or queue name.
    pub collection: Option<String>,
    /// Object key or message id.
    pub item: Option<String>,
    /// Sub-resource addressed by this request, part of the signed path.
    pub subresource: Option<SubResource>,
    /// Caller query parameters, in order. Never part of the signed path.
    pub params: Vec<(String, String)>,
    /// Request headers.
    pub headers: HeaderMap,
    /// Body length, when known.
    pub content_length: Option<u64>,
}

impl RequestDescriptor {
    /// Create a descriptor for the service root.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            collection: None,
            item: None,
            subresource: None,
            params: Vec::new(),
            headers: HeaderMap::new(),
            content_length: None,
        }
    }

    /// Set the bucket or queue name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Set the object key or message id.
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    /// Address a sub-resource such as the ACL.
    pub fn with_subresource(mut self, subresource: SubResource) -> Self {
        self.subresource = Some(subresource);
        self
    }

    /// Append a caller query parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Append caller query parameters.
    pub fn with_params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Insert a header, rejecting names or values that can't be sent.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_str(name)?;
        let value = HeaderValue::from_str(value)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Merge headers, later values replace earlier ones.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Set the body length.
    pub fn with_content_length(mut self, length: u64) -> Self {
        self.content_length = Some(length);
        self
    }

    /// Measure the body length from a stream.
    pub fn with_body<B: BodyLength + ?Sized>(mut self, body: &mut B) -> Result<Self> {
        self.content_length = Some(body.length()?);
        Ok(self)
    }

    /// Build the canonical path of this request.
    pub fn path(&self, escape: KeyEscape) -> Result<String> {
        build_path(
            self.collection.as_deref(),
            self.item.as_deref(),
            self.subresource,
            escape,
        )
    }

    /// Length that ends up in `Content-Length`.
    ///
    /// An explicit header wins over the measured body.
    pub fn resolved_content_length(&self) -> Result<Option<u64>> {
        match self.headers.get(CONTENT_LENGTH) {
            Some(v) => {
                let v = v.to_str()?;
                let length = v.trim().parse::<u64>().map_err(|e| {
                    Error::request_invalid(format!("content-length {v:?} is not a number"))
                        .with_source(e)
                })?;
                Ok(Some(length))
            }
            None => Ok(self.content_length),
        }
    }
}

/// SigningMethod is the method that used in signing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SigningMethod {
    /// Signing with the `Authorization` header.
    Header,
    /// Signing with query, valid until the given unix timestamp.
    Query(i64),
}

/// SigningScheme is the transport a generator signs for by default.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum SigningScheme {
    /// Pre-signed URLs carrying `Signature`, `Expires` and `AWSAccessKeyId`.
    #[default]
    Query,
    /// `Authorization` header.
    Header,
}

/// SignedRequest is the final output of a signing call.
///
/// For header signing `headers` carries `Authorization` and the exact `Date`
/// that was signed. The transport must send these headers unchanged;
/// modifying any signed header afterwards invalidates the signature.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Headers to send.
    pub headers: HeaderMap,
}

impl SignedRequest {
    /// The `Authorization` value, if this request was signed in the header.
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Convert into an [`http::Request`] for the transport layer.
    pub fn into_request<B>(self, body: B) -> Result<http::Request<B>> {
        let mut builder = http::Request::builder()
            .method(self.method)
            .uri(self.url.as_str());
        if let Some(headers) = builder.headers_mut() {
            *headers = self.headers;
        }
        Ok(builder.body(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use std::io::Cursor;

    #[test]
    fn test_with_header_rejects_newline() {
        let err = RequestDescriptor::new(Method::GET)
            .with_header("x-amz-meta-note", "line1\nline2")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodingInvalid);

        let err = RequestDescriptor::new(Method::GET)
            .with_header("bad header", "v")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodingInvalid);
    }

    #[test]
    fn test_content_length_header_wins() {
        let mut body = Cursor::new(vec![0u8; 10]);
        let req = RequestDescriptor::new(Method::PUT)
            .with_body(&mut body)
            .unwrap();
        assert_eq!(req.resolved_content_length().unwrap(), Some(10));

        let req = req.with_header("Content-Length", "3").unwrap();
        assert_eq!(req.resolved_content_length().unwrap(), Some(3));

        let req = req.with_header("Content-Length", "three").unwrap();
        assert_eq!(
            req.resolved_content_length().unwrap_err().kind(),
            ErrorKind::RequestInvalid
        );
    }

    #[test]
    fn test_into_request() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("AWS ak:sig"));

        let signed = SignedRequest {
            method: Method::DELETE,
            url: "https://s3.amazonaws.com:443/bucket/key".to_string(),
            headers,
        };
        assert_eq!(signed.authorization(), Some("AWS ak:sig"));

        let req = signed.into_request(()).unwrap();
        assert_eq!(req.method(), Method::DELETE);
        assert_eq!(req.uri().path(), "/bucket/key");
        assert_eq!(req.headers()[AUTHORIZATION], "AWS ak:sig");
    }
}
