//! HTTP transport types for the third-party task list.
//!
//! # Design
//! These types describe an outbound GET and its response as plain data.
//! `ExternalTasksClient` builds `HttpRequest` values and parses
//! `HttpResponse` values without touching the network; the server crate
//! executes the round-trip. That keeps the parsing rules testable without
//! an upstream.

/// An outbound GET described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// The upstream's answer described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}
