use std::fmt::{Debug, Formatter};

use urlgen_core::path::KeyEscape;
use urlgen_core::utils::Redact;
use urlgen_core::{
    var_bool, var_port, Credential, Endpoint, Env, Error, ExpiryPolicy, Result,
    SignatureAlgorithm, SigningScheme, UnsetExpiry, DEFAULT_EXPIRES_IN,
};

use super::constants::*;

/// Config carries all the configuration for the S3 generator.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SECRET_ACCESS_KEY`]
    pub secret_access_key: Option<String>,
    /// `host` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`URLGEN_S3_HOST`]
    /// - default to [`DEFAULT_HOST`]
    pub host: Option<String>,
    /// `port` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`URLGEN_S3_PORT`]
    /// - default to 443 or 80 depending on `secure`
    pub port: Option<u16>,
    /// `secure` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`URLGEN_S3_SECURE`]
    /// - default to `true`
    pub secure: Option<bool>,
    /// Whether `/` inside object keys is escaped.
    pub key_escape: KeyEscape,
    /// Digest of the signature.
    pub algorithm: SignatureAlgorithm,
    /// Transport operations sign for.
    pub scheme: SigningScheme,
    /// Initial expiry, defaults to 60 seconds from signing time.
    pub expiry: Option<ExpiryPolicy>,
    /// What query signing does once the expiry has been cleared.
    pub unset_expiry: UnsetExpiry,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set access_key_id
    pub fn with_access_key_id(mut self, access_key_id: impl Into<String>) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self
    }

    /// Set secret_access_key
    pub fn with_secret_access_key(mut self, secret_access_key: impl Into<String>) -> Self {
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Set host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set secure
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    /// Set key_escape
    pub fn with_key_escape(mut self, key_escape: KeyEscape) -> Self {
        self.key_escape = key_escape;
        self
    }

    /// Set algorithm
    pub fn with_algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set scheme
    pub fn with_scheme(mut self, scheme: SigningScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Set expiry
    pub fn with_expiry(mut self, expiry: ExpiryPolicy) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Set unset_expiry
    pub fn with_unset_expiry(mut self, unset_expiry: UnsetExpiry) -> Self {
        self.unset_expiry = unset_expiry;
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, env: &dyn Env) -> Self {
        if let Some(v) = env.var(AWS_ACCESS_KEY_ID) {
            self.access_key_id.get_or_insert(v);
        }
        if let Some(v) = env.var(AWS_SECRET_ACCESS_KEY) {
            self.secret_access_key.get_or_insert(v);
        }
        if let Some(v) = env.var(URLGEN_S3_HOST) {
            self.host.get_or_insert(v);
        }
        if let Some(port) = var_port(env, URLGEN_S3_PORT) {
            self.port.get_or_insert(port);
        }
        if let Some(secure) = var_bool(env, URLGEN_S3_SECURE) {
            self.secure.get_or_insert(secure);
        }

        self
    }

    /// Build the credential, failing if either key is missing.
    pub fn credential(&self) -> Result<Credential> {
        let access_key_id = self
            .access_key_id
            .as_deref()
            .ok_or_else(|| Error::config_invalid("access key id is not configured"))?;
        let secret_access_key = self
            .secret_access_key
            .as_deref()
            .ok_or_else(|| Error::config_invalid("secret access key is not configured"))?;

        Credential::new(access_key_id, secret_access_key)
    }

    /// Build the endpoint.
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(
            self.host.as_deref().unwrap_or(DEFAULT_HOST),
            self.port,
            self.secure.unwrap_or(true),
        )
    }

    /// The expiry a new generator starts with.
    pub fn initial_expiry(&self) -> ExpiryPolicy {
        self.expiry
            .unwrap_or_else(|| ExpiryPolicy::relative(DEFAULT_EXPIRES_IN))
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &self.access_key_id.as_ref().map(Redact::from))
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(Redact::from),
            )
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("key_escape", &self.key_escape)
            .field("algorithm", &self.algorithm)
            .field("scheme", &self.scheme)
            .field("expiry", &self.expiry)
            .field("unset_expiry", &self.unset_expiry)
            .finish()
    }
}
