//! HTTP access to the musicboxd server.
//!
//! [`ApiGateway`] is the request layer; [`MusicboxdApi`] puts one typed
//! method on top of it per endpoint.

mod client;
mod gateway;

pub use client::{MusicboxdApi, ProfileUpdateOutcome};
pub use gateway::{encode_segment, ApiGateway, ApiResponse, RequestBody};
