//! musicboxd - a terminal client for the musicboxd album review service
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod notifications;
pub mod render;
pub mod session;
pub mod storage;
pub mod traits;
pub mod view;
