use std::fmt::Debug;

use crate::time::DateTime;
use crate::{Credential, RequestDescriptor, Result, SignedRequest, SigningMethod};

/// SignRequest is the trait each service implements to turn a descriptor
/// into a signed request.
///
/// Implementations own the service specific parts: canonicalization rules,
/// default headers and any extra query parameters.
pub trait SignRequest: Debug + Send + Sync + 'static {
    /// Sign the request.
    ///
    /// ## Now
    ///
    /// `now` is the signing time. Header signing writes it into `Date`,
    /// query signing may use it for extra parameters.
    ///
    /// ## Method
    ///
    /// [`SigningMethod::Query`] carries the already resolved expiry.
    fn sign_request(
        &self,
        req: RequestDescriptor,
        cred: &Credential,
        now: DateTime,
        method: SigningMethod,
    ) -> Result<SignedRequest>;
}
