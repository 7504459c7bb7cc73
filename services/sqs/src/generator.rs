use http::Method;
use urlgen_core::time::DateTime;
use urlgen_core::{
    BodyLength, ExpiryPolicy, OsEnv, RequestDescriptor, Result, SignedRequest, Signer,
    SigningScheme,
};

use crate::{Config, RequestSigner};

/// Item addressing the tail of a queue, where messages are sent.
const QUEUE_BACK: &str = "back";
/// Item addressing the head of a queue, where messages are received.
const QUEUE_FRONT: &str = "front";

/// Generator produces authenticated requests for the SQS REST API.
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
        let builder = RequestSigner::new(config.endpoint())
            .with_key_escape(config.key_escape)
            .with_algorithm(config.algorithm);
        let signer = Signer::new(config.credential()?, builder)
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

    /// `GET /[?QueueNamePrefix=prefix]`
    pub fn list_queues(&self, prefix: Option<&str>) -> Result<SignedRequest> {
        let mut req = RequestDescriptor::new(Method::GET);
        if let Some(prefix) = prefix {
            req = req.with_param("QueueNamePrefix", prefix);
        }
        self.generate(req)
    }

    /// `POST /?QueueName=name[&DefaultVisibilityTimeout=n]`
    pub fn create_queue(
        &self,
        name: &str,
        visibility_timeout: Option<u32>,
    ) -> Result<SignedRequest> {
        let mut req = RequestDescriptor::new(Method::POST).with_param("QueueName", name);
        if let Some(timeout) = visibility_timeout {
            req = req.with_param("DefaultVisibilityTimeout", timeout.to_string());
        }
        self.generate(req)
    }

    /// `DELETE /{queue}[?ForceDeletion=true]`
    ///
    /// Without `force` the service refuses to delete a queue that still
    /// holds messages.
    pub fn delete_queue(&self, queue: &str, force: bool) -> Result<SignedRequest> {
        let mut req = RequestDescriptor::new(Method::DELETE).with_collection(queue);
        if force {
            req = req.with_param("ForceDeletion", "true");
        }
        self.generate(req)
    }

    /// `GET /{queue}?Attribute=All`
    pub fn get_queue_attributes(&self, queue: &str) -> Result<SignedRequest> {
        self.generate(
            RequestDescriptor::new(Method::GET)
                .with_collection(queue)
                .with_param("Attribute", "All"),
        )
    }

    /// `PUT /{queue}?Attribute=VisibilityTimeout&Value=n`
    pub fn set_visibility_timeout(&self, queue: &str, seconds: u32) -> Result<SignedRequest> {
        self.generate(
            RequestDescriptor::new(Method::PUT)
                .with_collection(queue)
                .with_param("Attribute", "VisibilityTimeout")
                .with_param("Value", seconds.to_string()),
        )
    }

    /// `PUT /{queue}/back` with the message as body.
    pub fn send_message(&self, queue: &str, body: &mut dyn BodyLength) -> Result<SignedRequest> {
        self.generate(
            RequestDescriptor::new(Method::PUT)
                .with_collection(queue)
                .with_item(QUEUE_BACK)
                .with_body(body)?,
        )
    }

    /// `GET /{queue}/front[?NumberOfMessages=n][&VisibilityTimeout=n]`
    pub fn receive_message(
        &self,
        queue: &str,
        count: Option<u32>,
        visibility_timeout: Option<u32>,
    ) -> Result<SignedRequest> {
        let mut req = RequestDescriptor::new(Method::GET)
            .with_collection(queue)
            .with_item(QUEUE_FRONT);
        if let Some(count) = count {
            req = req.with_param("NumberOfMessages", count.to_string());
        }
        if let Some(timeout) = visibility_timeout {
            req = req.with_param("VisibilityTimeout", timeout.to_string());
        }
        self.generate(req)
    }

    /// `GET /{queue}/{message_id}`, reads a message without hiding it.
    pub fn peek_message(&self, queue: &str, message_id: &str) -> Result<SignedRequest> {
        self.message(Method::GET, queue, message_id)
    }

    /// `DELETE /{queue}/{message_id}`
    pub fn delete_message(&self, queue: &str, message_id: &str) -> Result<SignedRequest> {
        self.message(Method::DELETE, queue, message_id)
    }

    fn message(&self, method: Method, queue: &str, message_id: &str) -> Result<SignedRequest> {
        self.generate(
            RequestDescriptor::new(method)
                .with_collection(queue)
                .with_item(message_id),
        )
    }
}
