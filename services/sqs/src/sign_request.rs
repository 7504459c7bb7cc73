use http::header::HeaderName;
use http::header::CONTENT_LENGTH;
use http::header::CONTENT_TYPE;
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

/// RequestSigner that implements SQS query string and header authentication.
///
/// Unlike S3, queue requests always carry `AWS-Version`, `Content-Type` and
/// `Content-Length`, and pre-signed URLs also get `Version` and `Timestamp`.
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

    /// Choose how `/` inside message ids is written.
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
        let content_length = req.resolved_content_length()?.unwrap_or(0);

        let RequestDescriptor {
            method: http_method,
            params,
            mut headers,
            ..
        } = req;

        headers
            .entry(HeaderName::from_static(AWS_VERSION))
            .or_insert(HeaderValue::from_static(VERSION));
        headers
            .entry(CONTENT_TYPE)
            .or_insert(HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
        headers.insert(CONTENT_LENGTH, HeaderValue::from(content_length));

        // A caller supplied Date is signed in both schemes.
        let date = match (headers.get(DATE), method) {
            (Some(v), _) => v.to_str()?.to_string(),
            (None, SigningMethod::Header) => format_http_date(now),
            (None, SigningMethod::Query(expires)) => expires.to_string(),
        };

        let string_to_sign = string_to_sign(&http_method, &headers, &date, &path, &SQS_RULES)?;
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
                &[
                    (QUERY_VERSION, VERSION.to_string()),
                    (QUERY_TIMESTAMP, format_http_date(now)),
                ],
            ),
        };

        Ok(SignedRequest {
            method: http_method,
            url,
            headers,
        })
    }
}
