//! Core components for signing S3 and SQS style requests.
//!
//! This crate holds everything the service crates share: the string to sign,
//! the keyed hash, the expiry policy and the assembly of pre-signed URLs and
//! `Authorization` headers. It performs no network I/O.
//!
//! ## Overview
//!
//! - [`Credential`]: the access key id and secret key.
//! - [`ExpiryPolicy`] / [`ExpiryCell`]: relative or absolute expiry of query signatures.
//! - [`path::build_path`]: `(collection, item, sub-resource)` into a canonical path.
//! - [`canonical::string_to_sign`]: the exact string that gets signed.
//! - [`Signature`]: HMAC of that string and its transport encodings.
//! - [`SignRequest`]: the per service seam, driven by [`Signer`].
//!
//! ## Example
//!
//! ```
//! use http::Method;
//! use urlgen_core::canonical::{string_to_sign, CanonicalRules};
//! use urlgen_core::path::{KeyEscape, SubResource};
//! use urlgen_core::{Credential, Signature, SignatureAlgorithm};
//!
//! # fn main() -> urlgen_core::Result<()> {
//! let rules = CanonicalRules {
//!     extension_prefix: Some("x-amz-"),
//!     default_content_type: "",
//!     subresources: &[SubResource::Acl, SubResource::Torrent],
//! };
//! let path = urlgen_core::path::build_path(
//!     Some("mybucket"),
//!     Some("logs/2024.txt"),
//!     None,
//!     KeyEscape::EncodeSlash,
//! )?;
//! assert_eq!(path, "/mybucket/logs%2F2024.txt");
//!
//! let s = string_to_sign(&Method::GET, &http::HeaderMap::new(), "1700000000", &path, &rules)?;
//! let cred = Credential::new("AKIDEXAMPLE", "secret")?;
//! let sig = Signature::compute(&cred, &s, SignatureAlgorithm::HmacSha1)?;
//! println!("Signature={}", sig.to_query_value());
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod assemble;
pub mod canonical;
pub mod hash;
pub mod path;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};

mod env;
pub use env::{parse_bool, var_bool, var_port, Env, OsEnv, StaticEnv};

mod credential;
pub use credential::Credential;

mod expiry;
pub use expiry::{ExpiryCell, ExpiryPolicy, UnsetExpiry, DEFAULT_EXPIRES_IN};

mod body;
pub use body::{seek_length, BodyLength};

mod endpoint;
pub use endpoint::{default_port, Endpoint};

mod signature;
pub use signature::{Signature, SignatureAlgorithm, AUTHORIZATION_SCHEME};

mod request;
pub use request::{RequestDescriptor, SignedRequest, SigningMethod, SigningScheme};

mod api;
pub use api::SignRequest;

mod signer;
pub use signer::Signer;
