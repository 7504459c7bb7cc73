//! Amazon SQS query string and header authentication.
//!
//! Same signing family as S3 with a few twists: no extension headers are
//! signed, `Content-Type` defaults to `text/plain`, and pre-signed URLs carry
//! the API `Version` and a `Timestamp`.

mod constants;
pub use constants::*;

mod config;
pub use config::Config;

mod sign_request;
pub use sign_request::RequestSigner;

mod generator;
pub use generator::Generator;
