//! Client SDK for the IBM Cognos Analytics REST API.
//!
//! The crate is layered bottom-up: [`rest`] owns the HTTP transport (headers,
//! cookies, retry policy, response normalization), [`objects`] holds the typed
//! records mirroring remote entity shapes, [`services`] maps one endpoint
//! family each onto those records, and [`client::CognosClient`] ties it all
//! together with the session login/logout flows.
//!
//! Business outcomes (created, already exists, rejected) are reported as
//! [`services::Outcome`] values and log lines, never as errors; the error type
//! [`error::ClientError`] is reserved for transport faults and malformed data.

pub mod client;
pub mod error;
pub mod objects;
pub mod rest;
pub mod services;

pub use client::CognosClient;
pub use error::ClientError;
pub use rest::{RestResponse, RestService, RetryPolicy};
pub use services::{MemberType, Outcome};
