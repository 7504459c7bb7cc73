use std::fmt::Debug;
use std::sync::Arc;

use log::debug;
use log::warn;

use crate::expiry::DEFAULT_EXPIRES_IN;
use crate::time::{self, DateTime};
use crate::utils::redact_signature;
use crate::{
    Credential, Error, ExpiryCell, ExpiryPolicy, RequestDescriptor, Result, SignRequest,
    SignedRequest, SigningMethod, SigningScheme, UnsetExpiry,
};

/// Signer holds the credential and the expiry policy, and drives a
/// service specific [`SignRequest`] implementation.
///
/// Clones share the same expiry policy.
pub struct Signer<S: SignRequest> {
    credential: Credential,
    builder: Arc<S>,
    expiry: ExpiryCell,
    unset_expiry: UnsetExpiry,
    time: Option<DateTime>,
}

impl<S: SignRequest> Clone for Signer<S> {
    fn clone(&self) -> Self {
        Self {
            credential: self.credential.clone(),
            builder: self.builder.clone(),
            expiry: self.expiry.clone(),
            unset_expiry: self.unset_expiry,
            time: self.time,
        }
    }
}

impl<S: SignRequest> Debug for Signer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("credential", &self.credential)
            .field("builder", &self.builder)
            .field("expiry", &self.expiry.get())
            .field("unset_expiry", &self.unset_expiry)
            .finish()
    }
}

impl<S: SignRequest> Signer<S> {
    /// Create a new signer expiring query signatures 60 seconds after signing.
    pub fn new(credential: Credential, builder: S) -> Self {
        Self {
            credential,
            builder: Arc::new(builder),
            expiry: ExpiryCell::new(ExpiryPolicy::relative(DEFAULT_EXPIRES_IN)),
            unset_expiry: UnsetExpiry::default(),
            time: None,
        }
    }

    /// Start from the given expiry policy.
    pub fn with_expiry(self, policy: ExpiryPolicy) -> Self {
        self.expiry.set(policy);
        self
    }

    /// Decide what query signing does when the expiry is unset.
    pub fn with_unset_expiry(mut self, unset_expiry: UnsetExpiry) -> Self {
        self.unset_expiry = unset_expiry;
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// The credential used for signing.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// The service specific request signer.
    pub fn builder(&self) -> &S {
        &self.builder
    }

    /// Current expiry policy.
    pub fn expiry(&self) -> ExpiryPolicy {
        self.expiry.get()
    }

    /// Expire query signatures `seconds` after signing time.
    pub fn set_expires_in(&self, seconds: i64) {
        self.expiry.set_relative(seconds);
    }

    /// Expire query signatures at a fixed unix timestamp.
    pub fn set_expires(&self, timestamp: i64) {
        self.expiry.set_absolute(timestamp);
    }

    /// Unset the expiry.
    pub fn clear_expiry(&self) {
        self.expiry.clear();
    }

    /// Resolve the expiry for a signing at `now`.
    pub fn resolve_expiry(&self, now: i64) -> Result<i64> {
        let policy = self.expiry.get();
        if policy.is_set() {
            return policy.checked_resolve(now).ok_or_else(|| {
                Error::request_invalid(format!(
                    "expiry {policy:?} overflows when resolved at {now}"
                ))
            });
        }

        match self.unset_expiry {
            UnsetExpiry::Reject => Err(Error::expiry_unset(
                "neither a relative nor an absolute expiry is set",
            )),
            UnsetExpiry::Zero => {
                warn!("expiry is unset, signing with Expires=0");
                Ok(policy.resolve(now))
            }
        }
    }

    fn now(&self) -> DateTime {
        self.time.unwrap_or_else(time::now)
    }

    /// Sign the request with the `Authorization` header.
    pub fn sign(&self, req: RequestDescriptor) -> Result<SignedRequest> {
        let now = self.now();
        self.builder
            .sign_request(req, &self.credential, now, SigningMethod::Header)
    }

    /// Sign the request into a pre-signed URL.
    pub fn presign(&self, req: RequestDescriptor) -> Result<SignedRequest> {
        let now = self.now();
        let expires = self.resolve_expiry(now.timestamp())?;

        let signed =
            self.builder
                .sign_request(req, &self.credential, now, SigningMethod::Query(expires))?;
        debug!("presigned url: {}", redact_signature(&signed.url));
        Ok(signed)
    }

    /// Sign the request with the given scheme.
    pub fn sign_with(&self, req: RequestDescriptor, scheme: SigningScheme) -> Result<SignedRequest> {
        match scheme {
            SigningScheme::Query => self.presign(req),
            SigningScheme::Header => self.sign(req),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use http::HeaderMap;
    use http::Method;

    #[derive(Debug)]
    struct EchoExpiry;

    impl SignRequest for EchoExpiry {
        fn sign_request(
            &self,
            req: RequestDescriptor,
            _: &Credential,
            _: DateTime,
            method: SigningMethod,
        ) -> Result<SignedRequest> {
            let url = match method {
                SigningMethod::Header => "header".to_string(),
                SigningMethod::Query(expires) => expires.to_string(),
            };
            Ok(SignedRequest {
                method: req.method,
                url,
                headers: HeaderMap::new(),
            })
        }
    }

    fn signer() -> Signer<EchoExpiry> {
        let cred = Credential::new("AKIDEXAMPLE", "secret").unwrap();
        Signer::new(cred, EchoExpiry).with_time(time::from_unix_timestamp(1000).unwrap())
    }

    #[test]
    fn test_default_expiry_is_sixty_seconds() {
        let signed = signer().presign(RequestDescriptor::new(Method::GET)).unwrap();
        assert_eq!(signed.url, "1060");
    }

    #[test]
    fn test_expiry_setters() {
        let signer = signer();
        signer.set_expires_in(5);
        assert_eq!(signer.resolve_expiry(1000).unwrap(), 1005);

        signer.set_expires(2000);
        assert_eq!(signer.resolve_expiry(1000).unwrap(), 2000);
        assert_eq!(signer.resolve_expiry(5000).unwrap(), 2000);
    }

    #[test]
    fn test_expiry_overflow_is_an_error() {
        let signer = signer();
        signer.set_expires_in(i64::MAX);

        let err = signer
            .presign(RequestDescriptor::new(Method::GET))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);

        // Header signing ignores the expiry.
        assert!(signer.sign(RequestDescriptor::new(Method::GET)).is_ok());
    }

    #[test]
    fn test_unset_expiry_modes() {
        let signer = signer();
        signer.clear_expiry();

        let err = signer
            .presign(RequestDescriptor::new(Method::GET))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExpiryUnset);

        // Header signing doesn't need an expiry.
        assert!(signer.sign(RequestDescriptor::new(Method::GET)).is_ok());

        let signer = signer.with_unset_expiry(UnsetExpiry::Zero);
        let signed = signer.presign(RequestDescriptor::new(Method::GET)).unwrap();
        assert_eq!(signed.url, "0");
    }

    #[test]
    fn test_sign_with_scheme() {
        let signer = signer();
        let signed = signer
            .sign_with(RequestDescriptor::new(Method::GET), SigningScheme::Header)
            .unwrap();
        assert_eq!(signed.url, "header");

        let signed = signer
            .sign_with(RequestDescriptor::new(Method::GET), SigningScheme::Query)
            .unwrap();
        assert_eq!(signed.url, "1060");
    }

    #[test]
    fn test_clones_share_expiry() {
        let a = signer();
        let b = a.clone();
        b.set_expires(42);
        assert_eq!(a.expiry(), ExpiryPolicy::absolute(42));
    }
}
