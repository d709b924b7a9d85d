//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST)
//! - [`DisplayTarget`] - A value holder the poller writes status fields into

pub mod display;
pub mod http;

pub use display::{DisplayTarget, TargetKind};
pub use http::{Headers, HttpClient, HttpError, Response};
