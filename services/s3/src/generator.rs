use std::collections::BTreeMap;
use std::str::FromStr;

use http::header::HeaderName;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use urlgen_core::path::{build_path, SubResource};
use urlgen_core::time::DateTime;
use urlgen_core::{
    BodyLength, ExpiryPolicy, OsEnv, RequestDescriptor, Result, SignedRequest, Signer,
    SigningScheme,
};

use crate::constants::X_AMZ_META_PREFIX;
use crate::{Config, RequestSigner};

/// Generator produces authenticated requests for the S3 REST API.
///
/// Every operation signs with the scheme from [`Config::scheme`]: a
/// pre-signed URL by default, or an `Authorization` header.
///
/// Clones share the same expiry policy.
#[derive(Debug, Clone)]
pub struct Generator {
    signer: Signer<RequestSigner>,
    scheme: SigningScheme,
}

impl Generator {
    /// Create a generator from config.
    pub fn new(config: Config) -> Result<Self> {
        let credential = config.credential()?;
        let builder = RequestSigner::new(config.endpoint())
            .with_key_escape(config.key_escape)
            .with_algorithm(config.algorithm);

        let signer = Signer::new(credential, builder)
            .with_expiry(config.initial_expiry())
            .with_unset_expiry(config.unset_expiry);

        Ok(Self {
            signer,
            scheme: config.scheme,
        })
    }

    /// Create a generator configured from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::new(Config::new().from_env(&OsEnv))
    }

    /// Create a generator around an existing signer.
    pub fn from_signer(signer: Signer<RequestSigner>, scheme: SigningScheme) -> Self {
        Self { signer, scheme }
    }

    /// Pin the signing time.
    ///
    /// # Note
    ///
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.signer = self.signer.with_time(time);
        self
    }

    /// The underlying signer.
    pub fn signer(&self) -> &Signer<RequestSigner> {
        &self.signer
    }

    /// The scheme operations sign with.
    pub fn scheme(&self) -> SigningScheme {
        self.scheme
    }

    /// Current expiry policy.
    pub fn expiry(&self) -> ExpiryPolicy {
        self.signer.expiry()
    }

    /// Expire URLs `seconds` after they are generated.
    pub fn set_expires_in(&self, seconds: i64) {
        self.signer.set_expires_in(seconds)
    }

    /// Expire URLs at a fixed unix timestamp.
    pub fn set_expires(&self, timestamp: i64) {
        self.signer.set_expires(timestamp)
    }

    /// Unset the expiry.
    pub fn clear_expiry(&self) {
        self.signer.clear_expiry()
    }

    /// Sign an arbitrary request with the configured scheme.
    pub fn generate(&self, req: RequestDescriptor) -> Result<SignedRequest> {
        self.signer.sign_with(req, self.scheme)
    }

    /// Sign an arbitrary request into a pre-signed URL.
    pub fn presign(&self, req: RequestDescriptor) -> Result<SignedRequest> {
        self.signer.presign(req)
    }

    /// Sign an arbitrary request with the `Authorization` header.
    pub fn sign(&self, req: RequestDescriptor) -> Result<SignedRequest> {
        self.signer.sign(req)
    }

    /// `PUT /{bucket}`
    pub fn create_bucket(&self, bucket: &str, headers: HeaderMap) -> Result<SignedRequest> {
        self.generate(
            RequestDescriptor::new(Method::PUT)
                .with_collection(bucket)
                .with_headers(headers),
        )
    }

    /// `GET /{bucket}?{params}`
    ///
    /// `params` such as `prefix`, `marker` or `max-keys` are appended after
    /// the signature is computed and never signed.
    pub fn list_bucket(
        &self,
        bucket: &str,
        params: &[(&str, &str)],
        headers: HeaderMap,
    ) -> Result<SignedRequest> {
        self.generate(
            RequestDescriptor::new(Method::GET)
                .with_collection(bucket)
                .with_params(params.iter().copied())
                .with_headers(headers),
        )
    }

    /// `DELETE /{bucket}`
    pub fn delete_bucket(&self, bucket: &str, headers: HeaderMap) -> Result<SignedRequest> {
        self.generate(
            RequestDescriptor::new(Method::DELETE)
                .with_collection(bucket)
                .with_headers(headers),
        )
    }

    /// `PUT /{bucket}/{key}`
    ///
    /// Metadata entries become `x-amz-meta-*` headers and replace headers of
    /// the same name. A body, when given, is measured for `Content-Length`
    /// unless `headers` already carries one.
    pub fn put(
        &self,
        bucket: &str,
        key: &str,
        metadata: &BTreeMap<String, String>,
        headers: HeaderMap,
        body: Option<&mut dyn BodyLength>,
    ) -> Result<SignedRequest> {
        let mut req = RequestDescriptor::new(Method::PUT)
            .with_collection(bucket)
            .with_item(key)
            .with_headers(headers)
            .with_headers(metadata_headers(metadata)?);
        if let Some(body) = body {
            req = req.with_body(body)?;
        }

        self.generate(req)
    }

    /// `GET /{bucket}/{key}`
    pub fn get(&self, bucket: &str, key: &str, headers: HeaderMap) -> Result<SignedRequest> {
        self.object(Method::GET, bucket, key, headers)
    }

    /// `HEAD /{bucket}/{key}`
    pub fn head(&self, bucket: &str, key: &str, headers: HeaderMap) -> Result<SignedRequest> {
        self.object(Method::HEAD, bucket, key, headers)
    }

    /// `DELETE /{bucket}/{key}`
    pub fn delete(&self, bucket: &str, key: &str, headers: HeaderMap) -> Result<SignedRequest> {
        self.object(Method::DELETE, bucket, key, headers)
    }

    /// `GET /{bucket}?acl`
    pub fn get_bucket_acl(&self, bucket: &str, headers: HeaderMap) -> Result<SignedRequest> {
        self.get_acl(bucket, None, headers)
    }

    /// `GET /{bucket}/{key}?acl`, or the bucket ACL when `key` is `None`.
    pub fn get_acl(
        &self,
        bucket: &str,
        key: Option<&str>,
        headers: HeaderMap,
    ) -> Result<SignedRequest> {
        let mut req = RequestDescriptor::new(Method::GET)
            .with_collection(bucket)
            .with_subresource(SubResource::Acl)
            .with_headers(headers);
        req.item = key.map(String::from);

        self.generate(req)
    }

    /// `PUT /{bucket}?acl`
    pub fn put_bucket_acl(
        &self,
        bucket: &str,
        acl_document: &str,
        headers: HeaderMap,
    ) -> Result<SignedRequest> {
        self.put_acl(bucket, None, acl_document, headers)
    }

    /// `PUT /{bucket}/{key}?acl`, or the bucket ACL when `key` is `None`.
    ///
    /// The document itself is not signed, only its length is announced.
    pub fn put_acl(
        &self,
        bucket: &str,
        key: Option<&str>,
        acl_document: &str,
        headers: HeaderMap,
    ) -> Result<SignedRequest> {
        let mut req = RequestDescriptor::new(Method::PUT)
            .with_collection(bucket)
            .with_subresource(SubResource::Acl)
            .with_content_length(acl_document.len() as u64)
            .with_headers(headers);
        req.item = key.map(String::from);

        self.generate(req)
    }

    /// `GET /{bucket}/{key}?torrent`
    pub fn get_torrent(
        &self,
        bucket: &str,
        key: &str,
        headers: HeaderMap,
    ) -> Result<SignedRequest> {
        self.generate(
            RequestDescriptor::new(Method::GET)
                .with_collection(bucket)
                .with_item(key)
                .with_subresource(SubResource::Torrent)
                .with_headers(headers),
        )
    }

    /// `GET /`
    pub fn list_all_my_buckets(&self, headers: HeaderMap) -> Result<SignedRequest> {
        self.generate(RequestDescriptor::new(Method::GET).with_headers(headers))
    }

    /// Plain URL of a bucket or object, without any signature.
    pub fn make_bare_url(&self, bucket: &str, key: Option<&str>) -> Result<String> {
        let builder = self.signer.builder();
        let path = build_path(Some(bucket), key, None, builder.key_escape())?;
        Ok(builder.endpoint().url(&path))
    }

    fn object(
        &self,
        method: Method,
        bucket: &str,
        key: &str,
        headers: HeaderMap,
    ) -> Result<SignedRequest> {
        self.generate(
            RequestDescriptor::new(method)
                .with_collection(bucket)
                .with_item(key)
                .with_headers(headers),
        )
    }
}

/// Turn user metadata into `x-amz-meta-<lowercased name>` headers.
pub fn metadata_headers(metadata: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(metadata.len());
    for (name, value) in metadata {
        let name = HeaderName::from_str(&format!(
            "{X_AMZ_META_PREFIX}{}",
            name.to_ascii_lowercase()
        ))?;
        headers.insert(name, HeaderValue::from_str(value)?);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use urlgen_core::ErrorKind;

    use super::*;

    #[test]
    fn test_metadata_headers_lowercase() {
        let metadata = BTreeMap::from([
            ("Color".to_string(), "Blue".to_string()),
            ("author".to_string(), "alice".to_string()),
        ]);
        let headers = metadata_headers(&metadata).unwrap();

        assert_eq!(headers["x-amz-meta-color"], "Blue");
        assert_eq!(headers["x-amz-meta-author"], "alice");
    }

    #[test]
    fn test_metadata_headers_rejects_newline() {
        let metadata = BTreeMap::from([("note".to_string(), "a\nb".to_string())]);
        assert_eq!(
            metadata_headers(&metadata).unwrap_err().kind(),
            ErrorKind::EncodingInvalid
        );
    }
}
