//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, PUT, DELETE)
//! - [`TokenStore`] - Durable auth token storage

pub mod http;
pub mod token_store;

pub use http::{Headers, HttpClient, HttpError, Method, Response};
pub use token_store::{TokenStore, AUTH_TOKEN_KEY};
