//! Transport kernel - exchange-agnostic REST plumbing.
//!
//! The kernel knows nothing about any particular venue: it normalizes
//! request parameters, builds URLs, executes HTTP calls with a bounded
//! retry loop, and decodes typed response envelopes. Venue modules under
//! `exchanges::` supply endpoints and payload shapes.
//!
//! The HTTP layer sits behind the [`HttpTransport`] trait so tests can
//! substitute a scripted transport for the real `reqwest` client.

pub mod params;
pub mod rest;

pub use params::tidy_request_params;
pub use rest::{
    HttpTransport, RawResponse, ReqwestTransport, RestClient, RestClientConfig, RestRequest,
    RestResponse,
};
