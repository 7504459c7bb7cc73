//! S3 request signer.
use http::header::CONTENT_LENGTH;
use http::header::DATE;
use http::HeaderValue;
use urlgen_core::assemble::apply_authorization;
use urlgen_core::assemble::bare_url;
use urlgen_core::assemble::presigned_url;
use urlgen_core::canonical::string_to_sign;
use urlgen_core::path::KeyEscape;
use urlgen_core::time::format_http_date;
use urlgen_core::time::DateTime;
use urlgen_core::{
    Credential, Endpoint, RequestDescriptor, Result, SignRequest, Signature, SignatureAlgorithm,
    SignedRequest, SigningMethod,
};

use super::constants::*;

/// RequestSigner that implements S3 query string and header authentication.
///
/// - [Signing and Authenticating REST Requests](https://docs.aws.amazon.com/AmazonS3/latest/userguide/RESTAuthentication.html)
#[derive(Debug, Clone)]
pub struct RequestSigner {
    endpoint: Endpoint,
    key_escape: KeyEscape,
    algorithm: SignatureAlgorithm,
}

impl RequestSigner {
    /// Create a signer for the given endpoint.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            key_escape: KeyEscape::default(),
            algorithm: SignatureAlgorithm::default(),
        }
    }

    /// Choose how `/` inside object keys is written.
    pub fn with_key_escape(mut self, key_escape: KeyEscape) -> Self {
        self.key_escape = key_escape;
        self
    }

    /// Choose the HMAC digest.
    pub fn with_algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// The endpoint URLs point at.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// The key escaping in use.
    pub fn key_escape(&self) -> KeyEscape {
        self.key_escape
    }
}

impl SignRequest for RequestSigner {
    fn sign_request(
        &self,
        req: RequestDescriptor,
        cred: &Credential,
        now: DateTime,
        method: SigningMethod,
    ) -> Result<SignedRequest> {
        let path = req.path(self.key_escape)?;
        let content_length = req.resolved_content_length()?;

        let RequestDescriptor {
            method: http_method,
            params,
            mut headers,
            ..
        } = req;

        if let Some(length) = content_length {
            headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
        }

        // Query signing always signs the expiry in place of the date.
        let date = match method {
            SigningMethod::Header => match headers.get(DATE) {
                Some(v) => v.to_str()?.to_string(),
                None => format_http_date(now),
            },
            SigningMethod::Query(expires) => expires.to_string(),
        };

        let string_to_sign = string_to_sign(&http_method, &headers, &date, &path, &S3_RULES)?;
        let signature = Signature::compute(cred, &string_to_sign, self.algorithm)?;

        let url = match method {
            SigningMethod::Header => {
                apply_authorization(&mut headers, &date, &signature, cred.access_key_id())?;
                bare_url(&self.endpoint, &path, &params)
            }
            SigningMethod::Query(expires) => presigned_url(
                &self.endpoint,
                &path,
                &params,
                &signature,
                expires,
                cred.access_key_id(),
                &[],
            ),
        };

        Ok(SignedRequest {
            method: http_method,
            url,
            headers,
        })
    }
}
