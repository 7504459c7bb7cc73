//! Amazon S3 query string and header authentication.
//!
//! Generates pre-signed URLs and `Authorization` values for the S3 REST API
//! without sending anything over the network.
//!
//! ## Example
//!
//! ```
//! use http::HeaderMap;
//! use urlgen_s3::{Config, Generator};
//!
//! # fn main() -> urlgen_core::Result<()> {
//! let generator = Generator::new(
//!     Config::new()
//!         .with_access_key_id("AKIDEXAMPLE")
//!         .with_secret_access_key("wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY"),
//! )?;
//! generator.set_expires(1700000000);
//!
//! let signed = generator.get("mybucket", "logs/2024.txt", HeaderMap::new())?;
//! assert!(signed
//!     .url
//!     .starts_with("https://s3.amazonaws.com:443/mybucket/logs/2024.txt?Signature="));
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::*;

mod config;
pub use config::Config;

mod sign_request;
pub use sign_request::RequestSigner;

mod generator;
pub use generator::{metadata_headers, Generator};
